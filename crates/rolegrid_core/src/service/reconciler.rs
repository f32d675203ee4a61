//! Cell-shape reconciler.
//!
//! # Responsibility
//! - Rebuild a row's cell layout from its mode and the current roles.
//! - Refresh shared-row spans after role-count changes.
//!
//! # Invariants
//! - `reconcile` never preserves content: it lays the row out from scratch.
//! - `sync_span` never touches content.
//! - Both are idempotent for the same `(section, mode, roles)` input.

use crate::model::grid::Grid;
use crate::model::role::Role;
use crate::model::section::{RoleCell, Section, SectionCells, SectionMode, SharedCell};
use log::debug;

/// Lays `section` out for `mode` against `roles`, discarding prior cells.
pub fn reconcile(section: &mut Section, mode: SectionMode, roles: &[Role]) {
    section.cells = match mode {
        SectionMode::Shared => SectionCells::Shared {
            cell: SharedCell::empty(roles.len()),
        },
        SectionMode::Private => SectionCells::Private {
            cells: roles.iter().map(|role| RoleCell::empty(role.id)).collect(),
        },
    };
    debug!(
        "event=section_reconcile module=reconciler status=ok section_id={} mode={} cells={}",
        section.id,
        mode,
        section.cells.len()
    );
}

/// Stretches a shared row across `role_count` columns; private rows are left alone.
pub fn sync_span(section: &mut Section, role_count: usize) {
    if let SectionCells::Shared { cell } = &mut section.cells {
        cell.span = role_count;
    }
}

/// Re-lays every section using its already-declared mode.
///
/// Used once when a grid is loaded with default-shaped rows.
pub fn reconfigure_all(grid: &mut Grid) {
    let (roles, sections) = grid.roles_and_sections_mut();
    for section in sections.iter_mut() {
        let mode = section.mode();
        reconcile(section, mode, roles);
    }
    debug!(
        "event=grid_reconfigure module=reconciler status=ok sections={}",
        grid.section_count()
    );
}

#[cfg(test)]
mod tests {
    use super::{reconcile, sync_span};
    use crate::model::role::Role;
    use crate::model::section::{Section, SectionMode};

    fn roles(count: usize) -> Vec<Role> {
        (0..count)
            .map(|index| Role::new(format!("r{index}"), index))
            .collect()
    }

    #[test]
    fn reconcile_shared_creates_one_spanning_cell() {
        let roles = roles(3);
        let ids: Vec<_> = roles.iter().map(|role| role.id).collect();
        let mut section = Section::private("Goal", 0, &ids);

        reconcile(&mut section, SectionMode::Shared, &roles);

        let cell = section.shared_cell().expect("row should be shared");
        assert_eq!(cell.span, 3);
        assert!(cell.content.is_empty());
        assert_eq!(section.cells.len(), 1);
    }

    #[test]
    fn reconcile_private_aligns_cells_with_roles() {
        let roles = roles(2);
        let mut section = Section::shared("Rules", 0, 2);

        reconcile(&mut section, SectionMode::Private, &roles);

        let cells = section.role_cells().expect("row should be private");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].role_id, roles[0].id);
        assert_eq!(cells[1].role_id, roles[1].id);
    }

    #[test]
    fn reconcile_is_idempotent_in_shape() {
        let roles = roles(4);
        let mut section = Section::shared("Tone", 0, 1);

        reconcile(&mut section, SectionMode::Private, &roles);
        let first = section.cells.clone();
        reconcile(&mut section, SectionMode::Private, &roles);

        assert_eq!(section.cells, first);
    }

    #[test]
    fn sync_span_ignores_private_rows() {
        let roles = roles(2);
        let ids: Vec<_> = roles.iter().map(|role| role.id).collect();
        let mut section = Section::private("Goal", 0, &ids);
        let before = section.cells.clone();

        sync_span(&mut section, 7);

        assert_eq!(section.cells, before);
    }
}
