//! Payload-to-grid decoder for submission consumers.
//!
//! # Responsibility
//! - Parse submission JSON back into experiment details and a grid.
//! - Re-interleave private and shared rows by their absolute `index`.
//!
//! # Invariants
//! - The rebuilt grid passes `Grid::validate()`.
//! - Every role must list every private row exactly once.
//! - With zero roles, private rows cannot be recovered and shared rows are
//!   compacted in index order.

use crate::model::experiment::ExperimentDetails;
use crate::model::grid::Grid;
use crate::model::role::Role;
use crate::model::section::{RoleCell, Section, SectionCells, SharedCell};
use crate::submit::payload::SubmissionPayload;
use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors while rebuilding a grid from submission text.
#[derive(Debug)]
pub enum DecodeError {
    /// Input is not a well-formed submission record.
    Json(serde_json::Error),
    /// Two rows claim the same absolute index.
    DuplicateIndex(usize),
    /// Row indices are not contiguous from zero.
    IndexGap { expected: usize, found: usize },
    /// Roles disagree on a private row's title.
    TitleMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    /// A private entry's `role` differs from the role listing it.
    RoleMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    /// A role does not list a private row that other roles do.
    MissingPrivateCell { index: usize, role: String },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed submission: {err}"),
            Self::DuplicateIndex(index) => write!(f, "row index {index} appears more than once"),
            Self::IndexGap { expected, found } => {
                write!(f, "row index gap: expected {expected}, found {found}")
            }
            Self::TitleMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "row {index} title mismatch: `{expected}` vs `{found}`"
            ),
            Self::RoleMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "row {index} listed under role `{expected}` names role `{found}`"
            ),
            Self::MissingPrivateCell { index, role } => {
                write!(f, "role `{role}` is missing private row {index}")
            }
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

enum RowDraft {
    Private {
        title: String,
        contents: Vec<Option<String>>,
    },
    Shared {
        title: String,
        content: String,
    },
}

/// Parses submission JSON into its details and rebuilt grid.
pub fn decode_submission(json: &str) -> Result<(ExperimentDetails, Grid), DecodeError> {
    let payload: SubmissionPayload = serde_json::from_str(json)?;
    rebuild_grid(payload)
}

/// Rebuilds details and grid from an already-parsed payload.
pub fn rebuild_grid(payload: SubmissionPayload) -> Result<(ExperimentDetails, Grid), DecodeError> {
    let details = ExperimentDetails {
        creator: payload.creator,
        starting_message: payload.starting_message,
        llms: payload.llms,
        note: payload.note,
        favourite: payload.favourite,
    };

    let role_count = payload.roles.len();
    let mut rows: BTreeMap<usize, RowDraft> = BTreeMap::new();

    for shared in payload.sections {
        if rows.contains_key(&shared.index) {
            return Err(DecodeError::DuplicateIndex(shared.index));
        }
        rows.insert(
            shared.index,
            RowDraft::Shared {
                title: shared.title,
                content: shared.content,
            },
        );
    }

    let mut roles = Vec::with_capacity(role_count);
    for (column, role_payload) in payload.roles.into_iter().enumerate() {
        for entry in role_payload.sections {
            if entry.role != role_payload.name {
                return Err(DecodeError::RoleMismatch {
                    index: entry.index,
                    expected: role_payload.name,
                    found: entry.role,
                });
            }
            let draft = rows.entry(entry.index).or_insert_with(|| RowDraft::Private {
                title: entry.title.clone(),
                contents: vec![None; role_count],
            });
            match draft {
                RowDraft::Shared { .. } => return Err(DecodeError::DuplicateIndex(entry.index)),
                RowDraft::Private { title, contents } => {
                    if *title != entry.title {
                        return Err(DecodeError::TitleMismatch {
                            index: entry.index,
                            expected: title.clone(),
                            found: entry.title,
                        });
                    }
                    if contents[column].is_some() {
                        return Err(DecodeError::DuplicateIndex(entry.index));
                    }
                    contents[column] = Some(entry.content);
                }
            }
        }
        roles.push(Role::new(role_payload.name, column));
    }

    if role_count > 0 {
        for (expected, found) in rows.keys().copied().enumerate() {
            if expected != found {
                return Err(DecodeError::IndexGap { expected, found });
            }
        }
    }

    let mut sections = Vec::with_capacity(rows.len());
    for (position, (index, draft)) in rows.into_iter().enumerate() {
        let section = match draft {
            RowDraft::Shared { title, content } => {
                let mut section = Section::shared(title, position, role_count);
                section.cells = SectionCells::Shared {
                    cell: SharedCell {
                        content,
                        span: role_count,
                    },
                };
                section
            }
            RowDraft::Private { title, contents } => {
                let mut cells = Vec::with_capacity(role_count);
                for (role, content) in roles.iter().zip(contents) {
                    let content = content.ok_or_else(|| DecodeError::MissingPrivateCell {
                        index,
                        role: role.name.clone(),
                    })?;
                    cells.push(RoleCell {
                        role_id: role.id,
                        content,
                    });
                }
                let mut section = Section::private(title, position, &[]);
                section.cells = SectionCells::Private { cells };
                section
            }
        };
        sections.push(section);
    }

    let grid = Grid::from_parts(roles, sections);
    debug!(
        "event=submission_decode module=submit status=ok roles={} sections={}",
        grid.role_count(),
        grid.section_count()
    );
    Ok((details, grid))
}
