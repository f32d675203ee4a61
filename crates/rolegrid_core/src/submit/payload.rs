//! Submission record shapes.
//!
//! Field names and declaration order match the wire format the form handler
//! expects; do not reorder.

use serde::{Deserialize, Serialize};

/// Full record handed to the submission collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub creator: String,
    pub starting_message: String,
    pub llms: Vec<String>,
    pub note: String,
    pub favourite: bool,
    /// One entry per role, in column order.
    pub roles: Vec<RolePayload>,
    /// Shared rows only, in row order.
    pub sections: Vec<SharedSectionPayload>,
}

/// One role and its private rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    pub name: String,
    pub sections: Vec<PrivateSectionPayload>,
}

/// One private row as seen by one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateSectionPayload {
    /// Absolute row position among all sections.
    pub index: usize,
    pub title: String,
    pub content: String,
    /// Owning role's name, repeated for consumers that flatten the list.
    pub role: String,
}

/// One shared row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSectionPayload {
    /// Absolute row position among all sections.
    pub index: usize,
    pub title: String,
    pub content: String,
}
