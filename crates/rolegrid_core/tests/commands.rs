use rolegrid_core::{
    CommandOutcome, ExperimentDetails, GridCommand, GridLimits, GridService, GridServiceError,
    SectionMode,
};
use serde_json::json;

#[test]
fn commands_deserialize_from_tagged_json() {
    let role_id = uuid::Uuid::new_v4();
    let section_id = uuid::Uuid::new_v4();

    let command: GridCommand = serde_json::from_value(json!({
        "command": "set_cell_content",
        "section_id": section_id,
        "role_id": role_id,
        "content": "hi"
    }))
    .expect("command json should deserialize");

    assert_eq!(
        command,
        GridCommand::SetCellContent {
            section_id,
            role_id,
            content: "hi".to_string(),
        }
    );
    let add: GridCommand = serde_json::from_value(json!({"command": "add_role"}))
        .expect("command json should deserialize");
    assert_eq!(add, GridCommand::AddRole);
    let mode: GridCommand = serde_json::from_value(json!({
        "command": "set_section_mode",
        "section_id": section_id,
        "mode": "shared"
    }))
    .expect("command json should deserialize");
    assert_eq!(mode.name(), "set_section_mode");
}

#[test]
fn apply_sequence_builds_grid_and_submits() {
    let mut service = GridService::default();

    let CommandOutcome::RoleAdded { role_id } = service.apply(GridCommand::AddRole).unwrap() else {
        panic!("expected role outcome");
    };
    let CommandOutcome::SectionAdded { section_id } =
        service.apply(GridCommand::AddSection).unwrap()
    else {
        panic!("expected section outcome");
    };

    for command in [
        GridCommand::RenameRole {
            role_id,
            name: "Guide".to_string(),
        },
        GridCommand::SetSectionTitle {
            section_id,
            title: "Goal".to_string(),
        },
        GridCommand::SetCellContent {
            section_id,
            role_id,
            content: "Lead the way".to_string(),
        },
    ] {
        assert_eq!(service.apply(command).unwrap(), CommandOutcome::Updated);
    }

    let outcome = service
        .apply(GridCommand::Submit {
            details: ExperimentDetails::default(),
        })
        .unwrap();
    let CommandOutcome::Submitted { payload } = outcome else {
        panic!("expected submitted outcome");
    };
    assert_eq!(payload.roles[0].name, "Guide");
    assert_eq!(payload.roles[0].sections[0].content, "Lead the way");
}

#[test]
fn rejected_command_leaves_grid_unchanged() {
    let mut service = GridService::new(GridLimits::new(1, 1).expect("non-zero limits are valid"));
    service.apply(GridCommand::AddRole).unwrap();
    service.apply(GridCommand::AddSection).unwrap();
    let before = service.grid().clone();

    assert!(service.apply(GridCommand::AddRole).expect_err("role limit").is_limit());
    assert!(service.apply(GridCommand::AddSection).expect_err("section limit").is_limit());
    let ghost = uuid::Uuid::new_v4();
    assert_eq!(
        service
            .apply(GridCommand::SetSectionMode {
                section_id: ghost,
                mode: SectionMode::Shared,
            })
            .expect_err("unknown section"),
        GridServiceError::SectionNotFound(ghost)
    );

    assert_eq!(service.grid(), &before);
}

#[test]
fn removal_outcomes_echo_ids() {
    let mut service = GridService::default();
    let role_id = service.add_role().unwrap();
    let section_id = service.add_section().unwrap();

    assert_eq!(
        service.apply(GridCommand::RemoveRole { role_id }).unwrap(),
        CommandOutcome::RoleRemoved { role_id }
    );
    assert_eq!(
        service
            .apply(GridCommand::RemoveSection { section_id })
            .unwrap(),
        CommandOutcome::SectionRemoved { section_id }
    );
    assert_eq!(service.grid().role_count(), 0);
    assert_eq!(service.grid().section_count(), 0);
}

#[test]
fn outcome_serializes_with_tag() {
    let role_id = uuid::Uuid::new_v4();
    let value = serde_json::to_value(CommandOutcome::RoleAdded { role_id })
        .expect("outcome should serialize");
    assert_eq!(value, json!({"outcome": "role_added", "role_id": role_id}));
}
