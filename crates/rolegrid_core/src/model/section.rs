//! Section (grid row) model and its cell shapes.
//!
//! # Responsibility
//! - Define the two row modes and the cell layout each one implies.
//! - Give typed access to private per-role cells and the shared cell.
//!
//! # Invariants
//! - A row's mode is derived from its cell shape, never stored separately.
//! - Private rows hold one `RoleCell` per role, in role order.
//! - Shared rows hold exactly one `SharedCell` whose `span` is the role count.

use crate::model::role::RoleId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a section row.
pub type SectionId = Uuid;

/// Declared content mode for a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMode {
    /// Content varies per role: one cell per column.
    #[default]
    Private,
    /// Content common to all roles: one merged cell.
    Shared,
}

impl SectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Shared => "shared",
        }
    }
}

impl Display for SectionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized mode strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSectionModeError(pub String);

impl Display for ParseSectionModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported section mode `{}`; expected private|shared",
            self.0
        )
    }
}

impl Error for ParseSectionModeError {}

impl FromStr for SectionMode {
    type Err = ParseSectionModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "shared" => Ok(Self::Shared),
            other => Err(ParseSectionModeError(other.to_string())),
        }
    }
}

/// Content of one (section, role) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCell {
    /// Role this cell belongs to.
    pub role_id: RoleId,
    pub content: String,
}

impl RoleCell {
    /// Creates an empty cell for one role.
    pub fn empty(role_id: RoleId) -> Self {
        Self {
            role_id,
            content: String::new(),
        }
    }
}

/// Single merged cell of a shared row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedCell {
    pub content: String,
    /// Number of role columns the cell is merged across.
    pub span: usize,
}

impl SharedCell {
    pub fn empty(span: usize) -> Self {
        Self {
            content: String::new(),
            span,
        }
    }
}

/// Cell layout of a row; the variant is the row's mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SectionCells {
    Private { cells: Vec<RoleCell> },
    Shared { cell: SharedCell },
}

impl SectionCells {
    pub fn mode(&self) -> SectionMode {
        match self {
            Self::Private { .. } => SectionMode::Private,
            Self::Shared { .. } => SectionMode::Shared,
        }
    }

    /// Number of content cells held by the row.
    pub fn len(&self) -> usize {
        match self {
            Self::Private { cells } => cells.len(),
            Self::Shared { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One titled row of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Stable ID used by commands to address the row.
    pub id: SectionId,
    /// Free text; may stay empty until the user fills it in.
    pub title: String,
    /// Zero-based row index among all sections.
    pub position: usize,
    pub cells: SectionCells,
}

impl Section {
    /// Creates a private row with one empty cell per given role.
    pub fn private(title: impl Into<String>, position: usize, role_ids: &[RoleId]) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            position,
            cells: SectionCells::Private {
                cells: role_ids.iter().copied().map(RoleCell::empty).collect(),
            },
        }
    }

    /// Creates a shared row spanning `span` role columns.
    pub fn shared(title: impl Into<String>, position: usize, span: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            position,
            cells: SectionCells::Shared {
                cell: SharedCell::empty(span),
            },
        }
    }

    pub fn mode(&self) -> SectionMode {
        self.cells.mode()
    }

    pub fn is_shared(&self) -> bool {
        self.mode() == SectionMode::Shared
    }

    /// Returns private cells, or `None` for a shared row.
    pub fn role_cells(&self) -> Option<&[RoleCell]> {
        match &self.cells {
            SectionCells::Private { cells } => Some(cells),
            SectionCells::Shared { .. } => None,
        }
    }

    /// Returns the shared cell, or `None` for a private row.
    pub fn shared_cell(&self) -> Option<&SharedCell> {
        match &self.cells {
            SectionCells::Shared { cell } => Some(cell),
            SectionCells::Private { .. } => None,
        }
    }

    /// Looks up one role's content in a private row.
    pub fn content_for(&self, role_id: RoleId) -> Option<&str> {
        self.role_cells()?
            .iter()
            .find(|cell| cell.role_id == role_id)
            .map(|cell| cell.content.as_str())
    }

    /// Content of the shared cell, if this row is shared.
    pub fn shared_content(&self) -> Option<&str> {
        self.shared_cell().map(|cell| cell.content.as_str())
    }
}
