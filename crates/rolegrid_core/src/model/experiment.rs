//! Experiment details submitted alongside the grid.

use serde::{Deserialize, Serialize};

/// Form fields that are not part of the role/section grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentDetails {
    pub creator: String,
    /// Message that opens every simulated conversation.
    pub starting_message: String,
    /// Selected model identifiers, in selection order.
    pub llms: Vec<String>,
    pub note: String,
    pub favourite: bool,
}
