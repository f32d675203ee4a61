//! Core domain logic for the role/section experiment grid.
//! This crate is the single source of truth for grid invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod placeholder;
pub mod service;
pub mod submit;
pub mod view;

pub use config::{ConfigError, GridLimits, LimitKind, DEFAULT_MAX_ROLES, DEFAULT_MAX_SECTIONS};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::experiment::ExperimentDetails;
pub use model::grid::{Grid, GridShapeError};
pub use model::role::{Role, RoleId};
pub use model::section::{
    ParseSectionModeError, RoleCell, Section, SectionCells, SectionId, SectionMode, SharedCell,
};
pub use placeholder::catalog::{
    audit_placeholders, available_placeholders, scan_placeholders, Placeholder,
    PlaceholderReport, PlaceholderScope, PlaceholderUse,
};
pub use service::command::{CommandOutcome, GridCommand};
pub use service::grid_service::{GridResult, GridService, GridServiceError};
pub use service::reconciler::{reconcile, reconfigure_all, sync_span};
pub use submit::decode::{decode_submission, rebuild_grid, DecodeError};
pub use submit::payload::{
    PrivateSectionPayload, RolePayload, SharedSectionPayload, SubmissionPayload,
};
pub use submit::required::{missing_required_fields, MissingField};
pub use submit::serializer::{encode_submission, serialize_grid, to_json, SubmitError};
pub use view::projection::{render_text, CellView, GridView, HeaderView, RowView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
