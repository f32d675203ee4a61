//! FFI use-case API for the Flutter grid editor.
//!
//! # Responsibility
//! - Expose one process-wide grid session to Dart via FRB.
//! - Accept user commands as JSON and answer with response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Commands are applied one at a time under the session lock.
//! - Submission is refused while required fields are blank.

use log::warn;
use rolegrid_core::{
    audit_placeholders, core_version as core_version_inner, init_logging as init_logging_inner,
    missing_required_fields, ping as ping_inner, to_json, CommandOutcome, ExperimentDetails,
    GridCommand, GridLimits, GridService, GridView,
};
use std::sync::{Mutex, MutexGuard, OnceLock};

static SESSION: OnceLock<Mutex<GridService>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Envelope for one grid command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridActionResponse {
    /// Whether the command was applied.
    pub ok: bool,
    /// Set when the rejection should be shown as a blocking notice.
    pub limit_notice: bool,
    /// Serialized `CommandOutcome` on success.
    pub outcome_json: Option<String>,
    /// Serialized grid view after the call (unchanged on rejection).
    pub view_json: String,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

/// Form fields submitted next to the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitDetails {
    pub creator: String,
    pub starting_message: String,
    pub llms: Vec<String>,
    pub note: String,
    pub favourite: bool,
}

/// Envelope for a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSubmitResponse {
    pub ok: bool,
    /// Serialized submission record, handed to the form post unmodified.
    pub payload_json: Option<String>,
    /// One message per blank required field.
    pub missing_fields: Vec<String>,
    pub message: String,
}

/// Replaces the session with an empty grid using the given limits.
///
/// `None` keeps the default for that dimension.
#[flutter_rust_bridge::frb(sync)]
pub fn grid_reset(max_roles: Option<u32>, max_sections: Option<u32>) -> GridActionResponse {
    let defaults = GridLimits::default();
    let limits = GridLimits::new(
        max_roles.map_or(defaults.max_roles(), |value| value as usize),
        max_sections.map_or(defaults.max_sections(), |value| value as usize),
    );
    let mut session = lock_session();
    match limits {
        Ok(limits) => {
            *session = GridService::new(limits);
            GridActionResponse {
                ok: true,
                limit_notice: false,
                outcome_json: None,
                view_json: view_json(&session),
                message: "Grid reset.".to_string(),
            }
        }
        Err(err) => GridActionResponse {
            ok: false,
            limit_notice: false,
            outcome_json: None,
            view_json: view_json(&session),
            message: format!("grid_reset failed: {err}"),
        },
    }
}

/// Applies one JSON-encoded `GridCommand` to the session.
///
/// # FFI contract
/// - A `submit` command is refused (ok=false) while required fields are blank,
///   matching `grid_submit`.
#[flutter_rust_bridge::frb(sync)]
pub fn grid_apply(command_json: String) -> GridActionResponse {
    let mut session = lock_session();
    let command: GridCommand = match serde_json::from_str(&command_json) {
        Ok(command) => command,
        Err(err) => {
            return GridActionResponse {
                ok: false,
                limit_notice: false,
                outcome_json: None,
                view_json: view_json(&session),
                message: format!("grid_apply failed: invalid command: {err}"),
            };
        }
    };

    if matches!(command, GridCommand::Submit { .. }) {
        let missing = missing_field_messages(&session);
        if !missing.is_empty() {
            return GridActionResponse {
                ok: false,
                limit_notice: false,
                outcome_json: None,
                view_json: view_json(&session),
                message: format!("Please fill in: {}.", missing.join("; ")),
            };
        }
    }

    match session.apply(command) {
        Ok(outcome) => GridActionResponse {
            ok: true,
            limit_notice: false,
            outcome_json: serde_json::to_string(&outcome).ok(),
            view_json: view_json(&session),
            message: outcome_message(&outcome).to_string(),
        },
        Err(err) => GridActionResponse {
            ok: false,
            limit_notice: err.is_limit(),
            outcome_json: None,
            view_json: view_json(&session),
            message: err.to_string(),
        },
    }
}

/// Returns the current grid view as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn grid_view() -> String {
    view_json(&lock_session())
}

/// Returns the placeholder catalog and unknown-tag report as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn grid_placeholder_audit() -> String {
    let session = lock_session();
    serde_json::to_string(&audit_placeholders(session.grid())).unwrap_or_default()
}

/// Serializes the session grid for form submission.
///
/// # FFI contract
/// - Refuses (ok=false) while any role name or section title is blank.
/// - Never mutates the grid.
#[flutter_rust_bridge::frb(sync)]
pub fn grid_submit(details: SubmitDetails) -> GridSubmitResponse {
    let session = lock_session();
    let missing = missing_field_messages(&session);
    if !missing.is_empty() {
        return GridSubmitResponse {
            ok: false,
            payload_json: None,
            message: format!("Please fill in {} required field(s).", missing.len()),
            missing_fields: missing,
        };
    }

    let details = ExperimentDetails {
        creator: details.creator,
        starting_message: details.starting_message,
        llms: details.llms,
        note: details.note,
        favourite: details.favourite,
    };
    match to_json(&session.submit(&details)) {
        Ok(payload_json) => GridSubmitResponse {
            ok: true,
            payload_json: Some(payload_json),
            missing_fields: Vec::new(),
            message: "Grid serialized.".to_string(),
        },
        Err(err) => GridSubmitResponse {
            ok: false,
            payload_json: None,
            missing_fields: Vec::new(),
            message: format!("grid_submit failed: {err}"),
        },
    }
}

fn lock_session() -> MutexGuard<'static, GridService> {
    let session = SESSION.get_or_init(|| Mutex::new(GridService::default()));
    session.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn missing_field_messages(session: &GridService) -> Vec<String> {
    missing_required_fields(session.grid())
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn view_json(session: &GridService) -> String {
    serde_json::to_string(&GridView::project(session.grid())).unwrap_or_default()
}

fn outcome_message(outcome: &CommandOutcome) -> &'static str {
    match outcome {
        CommandOutcome::RoleAdded { .. } => "Role added.",
        CommandOutcome::RoleRemoved { .. } => "Role removed.",
        CommandOutcome::SectionAdded { .. } => "Section added.",
        CommandOutcome::SectionRemoved { .. } => "Section removed.",
        CommandOutcome::Updated => "Grid updated.",
        CommandOutcome::Submitted { .. } => "Grid serialized.",
    }
}

#[cfg(test)]
mod tests {
    use super::{grid_apply, grid_reset, grid_submit, ping, SubmitDetails};

    const SUBMIT_COMMAND: &str = r#"{"command":"submit","details":{"creator":"ada","starting_message":"","llms":[],"note":"","favourite":false}}"#;

    // One test drives the shared session so ordering stays deterministic.
    #[test]
    fn session_flow_enforces_limits_and_required_fields() {
        assert_eq!(ping(), "pong");
        assert!(!grid_reset(Some(0), None).ok);
        assert!(grid_reset(Some(1), Some(2)).ok);

        let added = grid_apply(r#"{"command":"add_role"}"#.to_string());
        assert!(added.ok);
        let outcome: serde_json::Value = serde_json::from_str(
            added
                .outcome_json
                .as_deref()
                .expect("applied command should carry an outcome"),
        )
        .expect("outcome should be valid json");
        let role_id = outcome["role_id"]
            .as_str()
            .expect("role_added outcome should name the role")
            .to_string();

        let rejected = grid_apply(r#"{"command":"add_role"}"#.to_string());
        assert!(!rejected.ok);
        assert!(rejected.limit_notice);
        assert_eq!(rejected.message, "You can only add up to 1 roles.");

        let garbage = grid_apply("{".to_string());
        assert!(!garbage.ok);
        assert!(!garbage.limit_notice);

        let blocked = grid_submit(SubmitDetails::default());
        assert!(!blocked.ok);
        assert_eq!(blocked.missing_fields, vec!["role 1 needs a name"]);

        let blocked_command = grid_apply(SUBMIT_COMMAND.to_string());
        assert!(!blocked_command.ok);
        assert!(!blocked_command.limit_notice);
        assert!(blocked_command.outcome_json.is_none());
        assert!(blocked_command.message.contains("role 1 needs a name"));

        let rename = format!(r#"{{"command":"rename_role","role_id":"{role_id}","name":"Host"}}"#);
        assert!(grid_apply(rename).ok);

        let submitted = grid_submit(SubmitDetails {
            creator: "ada".to_string(),
            ..SubmitDetails::default()
        });
        assert!(submitted.ok);
        let payload: serde_json::Value = serde_json::from_str(
            submitted
                .payload_json
                .as_deref()
                .expect("accepted submission should carry a payload"),
        )
        .expect("payload should be valid json");
        assert_eq!(payload["roles"][0]["name"], "Host");
        assert_eq!(payload["creator"], "ada");

        let submitted_command = grid_apply(SUBMIT_COMMAND.to_string());
        assert!(submitted_command.ok);
        let outcome: serde_json::Value = serde_json::from_str(
            submitted_command
                .outcome_json
                .as_deref()
                .expect("submit command should carry an outcome"),
        )
        .expect("outcome should be valid json");
        assert_eq!(outcome["outcome"], "submitted");
        assert_eq!(outcome["payload"]["roles"][0]["name"], "Host");
    }
}
