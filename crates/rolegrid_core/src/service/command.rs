//! Inbound user commands and their dispatch.
//!
//! # Responsibility
//! - Give UI collaborators one serializable command vocabulary.
//! - Route each command to exactly one `GridService` operation.
//!
//! # Invariants
//! - Commands are applied one at a time, to completion, in arrival order.

use crate::model::experiment::ExperimentDetails;
use crate::model::role::RoleId;
use crate::model::section::{SectionId, SectionMode};
use crate::service::grid_service::{GridResult, GridService};
use crate::submit::payload::SubmissionPayload;
use serde::{Deserialize, Serialize};

/// One discrete user action against the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GridCommand {
    AddRole,
    RemoveRole {
        role_id: RoleId,
    },
    AddSection,
    RemoveSection {
        section_id: SectionId,
    },
    SetSectionMode {
        section_id: SectionId,
        mode: SectionMode,
    },
    RenameRole {
        role_id: RoleId,
        name: String,
    },
    SetSectionTitle {
        section_id: SectionId,
        title: String,
    },
    SetCellContent {
        section_id: SectionId,
        role_id: RoleId,
        content: String,
    },
    SetSharedContent {
        section_id: SectionId,
        content: String,
    },
    Submit {
        details: ExperimentDetails,
    },
}

impl GridCommand {
    /// Stable snake_case name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddRole => "add_role",
            Self::RemoveRole { .. } => "remove_role",
            Self::AddSection => "add_section",
            Self::RemoveSection { .. } => "remove_section",
            Self::SetSectionMode { .. } => "set_section_mode",
            Self::RenameRole { .. } => "rename_role",
            Self::SetSectionTitle { .. } => "set_section_title",
            Self::SetCellContent { .. } => "set_cell_content",
            Self::SetSharedContent { .. } => "set_shared_content",
            Self::Submit { .. } => "submit",
        }
    }
}

/// Result of one successfully applied command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    RoleAdded { role_id: RoleId },
    RoleRemoved { role_id: RoleId },
    SectionAdded { section_id: SectionId },
    SectionRemoved { section_id: SectionId },
    /// Text edit or mode change applied in place.
    Updated,
    Submitted { payload: SubmissionPayload },
}

impl GridService {
    /// Applies one command and reports what changed.
    ///
    /// Rejected commands (limits, stale references) leave the grid unchanged.
    pub fn apply(&mut self, command: GridCommand) -> GridResult<CommandOutcome> {
        log::debug!(
            "event=command_apply module=command status=start command={}",
            command.name()
        );
        let outcome = match command {
            GridCommand::AddRole => CommandOutcome::RoleAdded {
                role_id: self.add_role()?,
            },
            GridCommand::RemoveRole { role_id } => CommandOutcome::RoleRemoved {
                role_id: self.remove_role(role_id)?.id,
            },
            GridCommand::AddSection => CommandOutcome::SectionAdded {
                section_id: self.add_section()?,
            },
            GridCommand::RemoveSection { section_id } => CommandOutcome::SectionRemoved {
                section_id: self.remove_section(section_id)?.id,
            },
            GridCommand::SetSectionMode { section_id, mode } => {
                self.set_section_mode(section_id, mode)?;
                CommandOutcome::Updated
            }
            GridCommand::RenameRole { role_id, name } => {
                self.rename_role(role_id, name)?;
                CommandOutcome::Updated
            }
            GridCommand::SetSectionTitle { section_id, title } => {
                self.set_section_title(section_id, title)?;
                CommandOutcome::Updated
            }
            GridCommand::SetCellContent {
                section_id,
                role_id,
                content,
            } => {
                self.set_cell_content(section_id, role_id, content)?;
                CommandOutcome::Updated
            }
            GridCommand::SetSharedContent {
                section_id,
                content,
            } => {
                self.set_shared_content(section_id, content)?;
                CommandOutcome::Updated
            }
            GridCommand::Submit { details } => CommandOutcome::Submitted {
                payload: self.submit(&details),
            },
        };
        Ok(outcome)
    }
}
