//! Grid model: ordered roles (columns) and ordered sections (rows).
//!
//! # Responsibility
//! - Own the role and section sequences and expose them read-only.
//! - Keep explicit `position` fields in step with list order.
//! - Report (not enforce) cell-shape invariant violations.
//!
//! # Invariants
//! - Structural enforcement lives in `service::grid_service` and
//!   `service::reconciler`; this type only stores.

use crate::model::role::{Role, RoleId};
use crate::model::section::{Section, SectionCells, SectionId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// First cell-shape invariant violation found by `Grid::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridShapeError {
    /// Private row does not hold one cell per role.
    CellCountMismatch {
        section_id: SectionId,
        expected: usize,
        actual: usize,
    },
    /// Private cell at `column` is keyed to a different role.
    CellMisaligned {
        section_id: SectionId,
        column: usize,
        expected: RoleId,
        actual: RoleId,
    },
    /// Shared cell span differs from the role count.
    SpanMismatch {
        section_id: SectionId,
        expected: usize,
        actual: usize,
    },
    /// Stored role position differs from its list index.
    StaleRolePosition {
        role_id: RoleId,
        expected: usize,
        actual: usize,
    },
    /// Stored section position differs from its list index.
    StaleSectionPosition {
        section_id: SectionId,
        expected: usize,
        actual: usize,
    },
}

impl Display for GridShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CellCountMismatch {
                section_id,
                expected,
                actual,
            } => write!(
                f,
                "section {section_id} holds {actual} private cell(s), expected {expected}"
            ),
            Self::CellMisaligned {
                section_id,
                column,
                expected,
                actual,
            } => write!(
                f,
                "section {section_id} column {column} is keyed to role {actual}, expected {expected}"
            ),
            Self::SpanMismatch {
                section_id,
                expected,
                actual,
            } => write!(
                f,
                "shared section {section_id} spans {actual} column(s), expected {expected}"
            ),
            Self::StaleRolePosition {
                role_id,
                expected,
                actual,
            } => write!(
                f,
                "role {role_id} stores position {actual}, expected {expected}"
            ),
            Self::StaleSectionPosition {
                section_id,
                expected,
                actual,
            } => write!(
                f,
                "section {section_id} stores position {actual}, expected {expected}"
            ),
        }
    }
}

impl Error for GridShapeError {}

/// Authoritative in-memory grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    roles: Vec<Role>,
    sections: Vec<Section>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from ordered parts and refreshes positions.
    ///
    /// Cell shapes are taken as given; callers that cannot vouch for them
    /// should run `service::reconciler::reconfigure_all` afterwards.
    pub fn from_parts(roles: Vec<Role>, sections: Vec<Section>) -> Self {
        let mut grid = Self { roles, sections };
        grid.renumber();
        grid
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Role IDs in column order.
    pub fn role_ids(&self) -> Vec<RoleId> {
        self.roles.iter().map(|role| role.id).collect()
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn role_at(&self, position: usize) -> Option<&Role> {
        self.roles.get(position)
    }

    pub fn section_at(&self, position: usize) -> Option<&Section> {
        self.sections.get(position)
    }

    pub fn role_index(&self, id: RoleId) -> Option<usize> {
        self.roles.iter().position(|role| role.id == id)
    }

    pub fn section_index(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }

    /// Checks positions and cell shapes; reports the first violation.
    pub fn validate(&self) -> Result<(), GridShapeError> {
        for (expected, role) in self.roles.iter().enumerate() {
            if role.position != expected {
                return Err(GridShapeError::StaleRolePosition {
                    role_id: role.id,
                    expected,
                    actual: role.position,
                });
            }
        }

        let role_count = self.roles.len();
        for (expected, section) in self.sections.iter().enumerate() {
            if section.position != expected {
                return Err(GridShapeError::StaleSectionPosition {
                    section_id: section.id,
                    expected,
                    actual: section.position,
                });
            }
            match &section.cells {
                SectionCells::Private { cells } => {
                    if cells.len() != role_count {
                        return Err(GridShapeError::CellCountMismatch {
                            section_id: section.id,
                            expected: role_count,
                            actual: cells.len(),
                        });
                    }
                    for (column, (cell, role)) in cells.iter().zip(&self.roles).enumerate() {
                        if cell.role_id != role.id {
                            return Err(GridShapeError::CellMisaligned {
                                section_id: section.id,
                                column,
                                expected: role.id,
                                actual: cell.role_id,
                            });
                        }
                    }
                }
                SectionCells::Shared { cell } => {
                    if cell.span != role_count {
                        return Err(GridShapeError::SpanMismatch {
                            section_id: section.id,
                            expected: role_count,
                            actual: cell.span,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn role_mut(&mut self, id: RoleId) -> Option<&mut Role> {
        self.roles.iter_mut().find(|role| role.id == id)
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.id == id)
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    /// Splits borrows so a row can be reshaped against the role list.
    pub(crate) fn roles_and_sections_mut(&mut self) -> (&[Role], &mut [Section]) {
        (&self.roles, &mut self.sections)
    }

    pub(crate) fn push_role(&mut self, role: Role) {
        self.roles.push(role);
        self.renumber();
    }

    pub(crate) fn remove_role_at(&mut self, index: usize) -> Role {
        let role = self.roles.remove(index);
        self.renumber();
        role
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        self.sections.push(section);
        self.renumber();
    }

    pub(crate) fn remove_section_at(&mut self, index: usize) -> Section {
        let section = self.sections.remove(index);
        self.renumber();
        section
    }

    fn renumber(&mut self) {
        for (position, role) in self.roles.iter_mut().enumerate() {
            role.position = position;
        }
        for (position, section) in self.sections.iter_mut().enumerate() {
            section.position = position;
        }
    }
}
