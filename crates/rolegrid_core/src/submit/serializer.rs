//! Grid-to-payload serializer.
//!
//! # Responsibility
//! - Flatten the grid into per-role private rows plus a shared-row list.
//! - Render the record as JSON text without further modification.
//!
//! # Invariants
//! - Reads the grid only; never mutates it.
//! - `index` is the row's absolute position, not a per-mode counter.
//! - Blank names/titles are serialized as-is.

use crate::model::experiment::ExperimentDetails;
use crate::model::grid::Grid;
use crate::model::section::SectionCells;
use crate::submit::payload::{
    PrivateSectionPayload, RolePayload, SharedSectionPayload, SubmissionPayload,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors while producing submission text.
#[derive(Debug)]
pub enum SubmitError {
    Json(serde_json::Error),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "failed to encode submission: {err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Builds the submission record from the current grid state.
pub fn serialize_grid(grid: &Grid, details: &ExperimentDetails) -> SubmissionPayload {
    let roles = grid
        .roles()
        .iter()
        .map(|role| {
            let sections = grid
                .sections()
                .iter()
                .filter_map(|section| match &section.cells {
                    SectionCells::Private { cells } => Some(PrivateSectionPayload {
                        index: section.position,
                        title: section.title.clone(),
                        content: cells
                            .iter()
                            .find(|cell| cell.role_id == role.id)
                            .map(|cell| cell.content.clone())
                            .unwrap_or_default(),
                        role: role.name.clone(),
                    }),
                    SectionCells::Shared { .. } => None,
                })
                .collect();
            RolePayload {
                name: role.name.clone(),
                sections,
            }
        })
        .collect();

    let sections = grid
        .sections()
        .iter()
        .filter_map(|section| {
            section.shared_cell().map(|cell| SharedSectionPayload {
                index: section.position,
                title: section.title.clone(),
                content: cell.content.clone(),
            })
        })
        .collect();

    SubmissionPayload {
        creator: details.creator.clone(),
        starting_message: details.starting_message.clone(),
        llms: details.llms.clone(),
        note: details.note.clone(),
        favourite: details.favourite,
        roles,
        sections,
    }
}

/// Renders a payload as compact JSON text.
pub fn to_json(payload: &SubmissionPayload) -> Result<String, SubmitError> {
    Ok(serde_json::to_string(payload)?)
}

/// Serializes the grid and renders it in one step.
pub fn encode_submission(grid: &Grid, details: &ExperimentDetails) -> Result<String, SubmitError> {
    to_json(&serialize_grid(grid, details))
}
