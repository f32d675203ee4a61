use rolegrid_core::{
    reconfigure_all, Grid, GridLimits, GridService, GridServiceError, Role, Section,
    SectionMode,
};

fn service_with_roles(count: usize) -> GridService {
    let mut service = GridService::default();
    for _ in 0..count {
        service.add_role().unwrap();
    }
    service
}

#[test]
fn switching_to_shared_discards_private_content() {
    let mut service = service_with_roles(3);
    let row = service.add_section().unwrap();
    let role = service.grid().roles()[0].id;
    service.set_cell_content(row, role, "secret").unwrap();

    service.set_section_mode(row, SectionMode::Shared).unwrap();

    let section = service.grid().section(row).expect("section should exist");
    assert_eq!(section.cells.len(), 1);
    assert_eq!(section.shared_content(), Some(""));
    assert_eq!(section.shared_cell().expect("row should be shared").span, 3);
}

#[test]
fn private_shared_private_round_trip_restores_shape_not_data() {
    let mut service = service_with_roles(2);
    let row = service.add_section().unwrap();
    let roles = service.grid().role_ids();
    service.set_cell_content(row, roles[0], "x").unwrap();
    service.set_cell_content(row, roles[1], "y").unwrap();

    service.set_section_mode(row, SectionMode::Shared).unwrap();
    service.set_shared_content(row, "z").unwrap();
    service.set_section_mode(row, SectionMode::Private).unwrap();

    let cells = service
        .grid()
        .section(row)
        .expect("section should exist")
        .role_cells()
        .expect("row should be private");
    assert_eq!(cells.len(), 2);
    assert!(cells.iter().all(|cell| cell.content.is_empty()));
    assert_eq!(cells[0].role_id, roles[0]);
    assert_eq!(cells[1].role_id, roles[1]);
}

#[test]
fn reselecting_current_mode_keeps_content() {
    let mut service = service_with_roles(1);
    let row = service.add_section().unwrap();
    service.set_section_mode(row, SectionMode::Shared).unwrap();
    service.set_shared_content(row, "kept").unwrap();

    service.set_section_mode(row, SectionMode::Shared).unwrap();

    assert_eq!(
        service.grid().section(row).expect("section should exist").shared_content(),
        Some("kept")
    );
}

#[test]
fn shared_row_has_one_cell_for_any_role_count() {
    let mut service = service_with_roles(0);
    let row = service.add_section().unwrap();
    service.set_section_mode(row, SectionMode::Shared).unwrap();
    let span = service
        .grid()
        .section(row)
        .expect("section should exist")
        .shared_cell()
        .expect("row should be shared")
        .span;
    assert_eq!(span, 0);

    for expected in 1..=5 {
        service.add_role().unwrap();
        let section = service.grid().section(row).expect("section should exist");
        assert_eq!(section.cells.len(), 1);
        assert_eq!(section.shared_cell().expect("row should be shared").span, expected);
    }
}

#[test]
fn cell_edits_must_match_row_mode() {
    let mut service = service_with_roles(1);
    let role = service.grid().roles()[0].id;
    let private_row = service.add_section().unwrap();
    let shared_row = service.add_section().unwrap();
    service
        .set_section_mode(shared_row, SectionMode::Shared)
        .unwrap();

    assert_eq!(
        service
            .set_shared_content(private_row, "nope")
            .expect_err("private row rejects shared content"),
        GridServiceError::ModeMismatch {
            section_id: private_row,
            expected: SectionMode::Shared,
        }
    );
    assert_eq!(
        service
            .set_cell_content(shared_row, role, "nope")
            .expect_err("shared row rejects per-role content"),
        GridServiceError::ModeMismatch {
            section_id: shared_row,
            expected: SectionMode::Private,
        }
    );
}

#[test]
fn section_mode_parses_form_values() {
    assert_eq!(
        " Shared ".parse::<SectionMode>().expect("mode name should parse"),
        SectionMode::Shared
    );
    assert_eq!(
        "private".parse::<SectionMode>().expect("mode name should parse"),
        SectionMode::Private
    );
    let err = "merged".parse::<SectionMode>().expect_err("unknown mode must be rejected");
    assert!(err.to_string().contains("expected private|shared"));
}

#[test]
fn reconfigure_all_normalizes_default_rendered_rows() {
    let roles = vec![Role::new("A", 0), Role::new("B", 0)];
    let ids: Vec<_> = roles.iter().map(|role| role.id).collect();
    let shared = Section::shared("Context", 0, 0);
    let lopsided = Section::private("Goal", 0, &ids[..1]);
    let mut grid = Grid::from_parts(roles, vec![lopsided, shared]);
    assert!(grid.validate().is_err());

    reconfigure_all(&mut grid);

    grid.validate().expect("grid shape should be valid");
    assert_eq!(grid.sections()[0].role_cells().expect("row should be private").len(), 2);
    assert_eq!(grid.sections()[1].shared_cell().expect("row should be shared").span, 2);
}

#[test]
fn load_reconfigures_and_resume_keeps_content() {
    let mut source = service_with_roles(2);
    let row = source.add_section().unwrap();
    source.set_section_mode(row, SectionMode::Shared).unwrap();
    source.set_shared_content(row, "keep me").unwrap();
    let grid = source.into_grid();

    let resumed = GridService::resume(grid.clone(), GridLimits::default())
        .expect("well-shaped grid should resume");
    assert_eq!(
        resumed.grid().section(row).expect("section should exist").shared_content(),
        Some("keep me")
    );

    let loaded =
        GridService::load(grid, GridLimits::default()).expect("grid within limits should load");
    let content = loaded
        .grid()
        .section(row)
        .expect("section should exist")
        .shared_content();
    assert_eq!(content, Some(""));
    loaded.grid().validate().expect("grid shape should be valid");
}

#[test]
fn load_rejects_grid_over_limits() {
    let roles = (0..3).map(|index| Role::new(format!("r{index}"), index)).collect();
    let grid = Grid::from_parts(roles, Vec::new());

    let limits = GridLimits::new(2, 10).expect("non-zero limits are valid");
    let err = GridService::load(grid, limits).expect_err("oversized grid must be refused");

    assert!(err.is_limit());
}

#[test]
fn resume_rejects_misshapen_grid() {
    let roles = vec![Role::new("A", 0)];
    let grid = Grid::from_parts(roles, vec![Section::private("Goal", 0, &[])]);

    let err = GridService::resume(grid, GridLimits::default())
        .expect_err("misshaped grid must be refused");

    assert!(matches!(err, GridServiceError::InvalidShape(_)));
}
