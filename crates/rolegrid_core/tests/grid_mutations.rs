use rolegrid_core::{
    GridLimits, GridService, GridServiceError, LimitKind, SectionMode, DEFAULT_MAX_ROLES,
    DEFAULT_MAX_SECTIONS,
};

fn private_cell_counts(service: &GridService) -> Vec<usize> {
    service
        .grid()
        .sections()
        .iter()
        .filter_map(|section| section.role_cells().map(<[_]>::len))
        .collect()
}

#[test]
fn add_role_extends_private_rows_and_widens_shared_rows() {
    let mut service = GridService::default();
    let first_role = service.add_role().unwrap();
    let private_row = service.add_section().unwrap();
    let shared_row = service.add_section().unwrap();
    service
        .set_section_mode(shared_row, SectionMode::Shared)
        .unwrap();

    let second_role = service.add_role().unwrap();

    let grid = service.grid();
    let cells = grid
        .section(private_row)
        .expect("section should exist")
        .role_cells()
        .expect("row should be private");
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[0].role_id, first_role);
    assert_eq!(cells[1].role_id, second_role);
    assert!(cells[1].content.is_empty());
    let span = grid
        .section(shared_row)
        .expect("section should exist")
        .shared_cell()
        .expect("row should be shared")
        .span;
    assert_eq!(span, 2);
    grid.validate().expect("grid shape should be valid");
}

#[test]
fn role_sequence_keeps_private_cell_count_equal_to_role_count() {
    let mut service = GridService::default();
    service.add_section().unwrap();
    service.add_section().unwrap();
    let shared = service.add_section().unwrap();
    service.set_section_mode(shared, SectionMode::Shared).unwrap();

    let mut added = Vec::new();
    for _ in 0..3 {
        added.push(service.add_role().unwrap());
        assert!(private_cell_counts(&service)
            .iter()
            .all(|count| *count == service.grid().role_count()));
        service.grid().validate().expect("grid shape should be valid");
    }

    service.remove_role(added[1]).unwrap();
    assert_eq!(private_cell_counts(&service), vec![2, 2]);
    service.add_role().unwrap();
    service.remove_role(added[0]).unwrap();
    service.remove_role(added[2]).unwrap();

    assert_eq!(service.grid().role_count(), 1);
    assert_eq!(private_cell_counts(&service), vec![1, 1]);
    let shared_cell = service
        .grid()
        .section(shared)
        .expect("section should exist")
        .shared_cell()
        .expect("row should be shared");
    assert_eq!(shared_cell.span, 1);
    service.grid().validate().expect("grid shape should be valid");
}

#[test]
fn remove_role_drops_exactly_that_column() {
    let mut service = GridService::default();
    let roles: Vec<_> = (0..3).map(|_| service.add_role().unwrap()).collect();
    let row = service.add_section().unwrap();
    for (role, content) in roles.iter().zip(["a", "b", "c"]) {
        service.set_cell_content(row, *role, content).unwrap();
    }

    let removed = service.remove_role(roles[1]).unwrap();
    assert_eq!(removed.id, roles[1]);

    let grid = service.grid();
    let contents: Vec<_> = grid
        .section(row)
        .expect("section should exist")
        .role_cells()
        .expect("row should be private")
        .iter()
        .map(|cell| cell.content.as_str())
        .collect();
    assert_eq!(contents, vec!["a", "c"]);
    assert_eq!(grid.role(roles[2]).unwrap().position, 1);
}

#[test]
fn remove_role_keeps_shared_content() {
    let mut service = GridService::default();
    let first = service.add_role().unwrap();
    service.add_role().unwrap();
    let shared = service.add_section().unwrap();
    service.set_section_mode(shared, SectionMode::Shared).unwrap();
    service.set_shared_content(shared, "rules for all").unwrap();

    service.remove_role(first).unwrap();

    let section = service.grid().section(shared).expect("section should exist");
    assert_eq!(section.shared_content(), Some("rules for all"));
    assert_eq!(section.shared_cell().expect("row should be shared").span, 1);
}

#[test]
fn add_role_beyond_max_is_rejected_without_change() {
    let mut service = GridService::default();
    for _ in 0..DEFAULT_MAX_ROLES {
        service.add_role().unwrap();
    }
    let before = service.grid().clone();

    let err = service.add_role().expect_err("role limit should be reached");

    assert_eq!(
        err,
        GridServiceError::LimitExceeded {
            kind: LimitKind::Roles,
            max: DEFAULT_MAX_ROLES,
        }
    );
    assert!(err.is_limit());
    assert_eq!(err.to_string(), "You can only add up to 5 roles.");
    assert_eq!(service.grid(), &before);
}

#[test]
fn add_section_beyond_max_is_rejected_without_change() {
    let mut service = GridService::default();
    for _ in 0..DEFAULT_MAX_SECTIONS {
        service.add_section().unwrap();
    }
    assert_eq!(service.grid().section_count(), 10);
    let before = service.grid().clone();

    let err = service.add_section().expect_err("section limit should be reached");

    assert_eq!(
        err,
        GridServiceError::LimitExceeded {
            kind: LimitKind::Sections,
            max: DEFAULT_MAX_SECTIONS,
        }
    );
    assert_eq!(err.to_string(), "You can only add up to 10 sections.");
    assert_eq!(service.grid(), &before);
}

#[test]
fn custom_limits_are_enforced_exactly() {
    let mut service = GridService::new(GridLimits::new(1, 11).expect("non-zero limits are valid"));
    service.add_role().unwrap();
    assert!(service.add_role().expect_err("role limit should be reached").is_limit());

    for _ in 0..11 {
        service.add_section().unwrap();
    }
    assert!(service.add_section().expect_err("section limit should be reached").is_limit());
    assert_eq!(service.grid().section_count(), 11);
}

#[test]
fn add_section_defaults_to_private_with_cell_per_role() {
    let mut service = GridService::default();
    service.add_role().unwrap();
    service.add_role().unwrap();

    let row = service.add_section().unwrap();

    let section = service.grid().section(row).expect("section should exist");
    assert_eq!(section.mode(), SectionMode::Private);
    assert_eq!(section.role_cells().expect("row should be private").len(), 2);
    assert!(section.title.is_empty());
}

#[test]
fn remove_section_renumbers_following_rows() {
    let mut service = GridService::default();
    let rows: Vec<_> = (0..3).map(|_| service.add_section().unwrap()).collect();

    let removed = service.remove_section(rows[0]).unwrap();
    assert_eq!(removed.id, rows[0]);

    let grid = service.grid();
    assert_eq!(grid.section(rows[1]).unwrap().position, 0);
    assert_eq!(grid.section(rows[2]).unwrap().position, 1);
    grid.validate().expect("grid shape should be valid");
}

#[test]
fn remove_section_frees_room_under_the_limit() {
    let mut service = GridService::new(GridLimits::new(5, 2).expect("non-zero limits are valid"));
    let first = service.add_section().unwrap();
    service.add_section().unwrap();
    assert!(service.add_section().is_err());

    service.remove_section(first).unwrap();

    assert!(service.add_section().is_ok());
}

#[test]
fn unknown_references_are_reported() {
    let mut service = GridService::default();
    let ghost = uuid::Uuid::new_v4();

    assert_eq!(
        service.remove_role(ghost).expect_err("unknown role"),
        GridServiceError::RoleNotFound(ghost)
    );
    assert_eq!(
        service.remove_section(ghost).expect_err("unknown section"),
        GridServiceError::SectionNotFound(ghost)
    );
    assert_eq!(
        service
            .set_section_mode(ghost, SectionMode::Shared)
            .expect_err("unknown section"),
        GridServiceError::SectionNotFound(ghost)
    );
}
