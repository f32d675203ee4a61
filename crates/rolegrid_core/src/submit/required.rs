//! Required-field presence check run by UI collaborators before submitting.
//!
//! The serializer never calls this; a blank name still yields a record.

use crate::model::grid::Grid;
use crate::model::role::RoleId;
use crate::model::section::SectionId;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// One required text field left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum MissingField {
    RoleName { role_id: RoleId, position: usize },
    SectionTitle { section_id: SectionId, position: usize },
}

impl Display for MissingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoleName { position, .. } => {
                write!(f, "role {} needs a name", position + 1)
            }
            Self::SectionTitle { position, .. } => {
                write!(f, "section {} needs a title", position + 1)
            }
        }
    }
}

/// Lists blank role names (column order) then blank section titles (row order).
pub fn missing_required_fields(grid: &Grid) -> Vec<MissingField> {
    let roles = grid
        .roles()
        .iter()
        .filter(|role| role.name.trim().is_empty())
        .map(|role| MissingField::RoleName {
            role_id: role.id,
            position: role.position,
        });
    let sections = grid
        .sections()
        .iter()
        .filter(|section| section.title.trim().is_empty())
        .map(|section| MissingField::SectionTitle {
            section_id: section.id,
            position: section.position,
        });
    roles.chain(sections).collect()
}
