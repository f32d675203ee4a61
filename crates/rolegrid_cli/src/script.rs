//! Position-addressed grid scripts.
//!
//! # Responsibility
//! - Parse a JSON list of editing steps that name roles and sections by
//!   their current zero-based position.
//! - Resolve each step to a `GridCommand` against the live grid, then apply it.
//!
//! # Invariants
//! - Positions are resolved at the moment the step runs, so a removal shifts
//!   the positions seen by later steps.
//! - The first failing step stops the script; earlier steps stay applied.

use rolegrid_core::{Grid, GridCommand, GridService, GridServiceError, SectionMode};
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// One scripted edit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    AddRole,
    RemoveRole {
        role: usize,
    },
    AddSection,
    RemoveSection {
        section: usize,
    },
    SetSectionMode {
        section: usize,
        mode: SectionMode,
    },
    RenameRole {
        role: usize,
        name: String,
    },
    SetSectionTitle {
        section: usize,
        title: String,
    },
    SetCellContent {
        section: usize,
        role: usize,
        content: String,
    },
    SetSharedContent {
        section: usize,
        content: String,
    },
}

#[derive(Debug)]
pub enum ScriptError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    NoRoleAt {
        step: usize,
        position: usize,
    },
    NoSectionAt {
        step: usize,
        position: usize,
    },
    Rejected {
        step: usize,
        source: GridServiceError,
    },
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid script `{}`: {source}", path.display())
            }
            Self::NoRoleAt { step, position } => {
                write!(f, "step {step}: no role at position {position}")
            }
            Self::NoSectionAt { step, position } => {
                write!(f, "step {step}: no section at position {position}")
            }
            Self::Rejected { step, source } => write!(f, "step {step}: {source}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Rejected { source, .. } => Some(source),
            Self::NoRoleAt { .. } | Self::NoSectionAt { .. } => None,
        }
    }
}

/// Reads a script file containing a JSON array of steps.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    load_json::<Vec<ScriptStep>>(path)
}

/// Parses a JSON document of the given type from disk.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    let raw = fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ScriptError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl ScriptStep {
    /// Turns positions into ids against the current grid.
    ///
    /// `step` is the one-based step number used in error messages.
    pub fn resolve(&self, grid: &Grid, step: usize) -> Result<GridCommand, ScriptError> {
        let role_id = |position: usize| {
            grid.role_at(position)
                .map(|role| role.id)
                .ok_or(ScriptError::NoRoleAt { step, position })
        };
        let section_id = |position: usize| {
            grid.section_at(position)
                .map(|section| section.id)
                .ok_or(ScriptError::NoSectionAt { step, position })
        };

        let command = match self {
            Self::AddRole => GridCommand::AddRole,
            Self::RemoveRole { role } => GridCommand::RemoveRole {
                role_id: role_id(*role)?,
            },
            Self::AddSection => GridCommand::AddSection,
            Self::RemoveSection { section } => GridCommand::RemoveSection {
                section_id: section_id(*section)?,
            },
            Self::SetSectionMode { section, mode } => GridCommand::SetSectionMode {
                section_id: section_id(*section)?,
                mode: *mode,
            },
            Self::RenameRole { role, name } => GridCommand::RenameRole {
                role_id: role_id(*role)?,
                name: name.clone(),
            },
            Self::SetSectionTitle { section, title } => GridCommand::SetSectionTitle {
                section_id: section_id(*section)?,
                title: title.clone(),
            },
            Self::SetCellContent {
                section,
                role,
                content,
            } => GridCommand::SetCellContent {
                section_id: section_id(*section)?,
                role_id: role_id(*role)?,
                content: content.clone(),
            },
            Self::SetSharedContent { section, content } => GridCommand::SetSharedContent {
                section_id: section_id(*section)?,
                content: content.clone(),
            },
        };
        Ok(command)
    }
}

/// Applies every step in order.
pub fn run_script(service: &mut GridService, steps: &[ScriptStep]) -> Result<(), ScriptError> {
    for (index, step) in steps.iter().enumerate() {
        let number = index + 1;
        let command = step.resolve(service.grid(), number)?;
        service
            .apply(command)
            .map_err(|source| ScriptError::Rejected {
                step: number,
                source,
            })?;
    }
    Ok(())
}
