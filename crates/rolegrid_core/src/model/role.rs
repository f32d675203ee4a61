//! Role (grid column) model.
//!
//! # Invariants
//! - `id` is stable and never reused for another role.
//! - `position` equals the role's index in `Grid::roles()` after every
//!   structural change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a role column.
pub type RoleId = Uuid;

/// One named column of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable ID used to key private cells.
    pub id: RoleId,
    /// Free text; may stay empty until the user fills it in.
    pub name: String,
    /// Zero-based column index among current roles.
    pub position: usize,
}

impl Role {
    /// Creates a role with a generated stable ID.
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self::with_id(Uuid::new_v4(), name, position)
    }

    /// Creates a role with a caller-provided ID.
    pub fn with_id(id: RoleId, name: impl Into<String>, position: usize) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }

    /// Column header placeholder shown while the name is empty.
    pub fn display_label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Role {}", self.position + 1)
        } else {
            self.name.clone()
        }
    }
}
