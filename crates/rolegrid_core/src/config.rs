//! Grid limit configuration.
//!
//! # Responsibility
//! - Hold the project-wide role/section maxima enforced by the mutator.
//! - Reject nonsensical limit values at construction time.
//!
//! # Invariants
//! - Both limits are strictly positive.
//! - An add is rejected when the current count is already `>= max`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of role columns a grid may hold.
pub const DEFAULT_MAX_ROLES: usize = 5;
/// Maximum number of section rows a grid may hold.
pub const DEFAULT_MAX_SECTIONS: usize = 10;

/// Which grid dimension a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Roles,
    Sections,
}

impl LimitKind {
    /// Plural noun used in user-facing notices.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Sections => "sections",
        }
    }
}

/// Errors from limit construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A limit of zero would make the dimension unusable.
    ZeroLimit(LimitKind),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroLimit(kind) => write!(f, "max {} must be at least 1", kind.noun()),
        }
    }
}

impl Error for ConfigError {}

/// Role/section maxima for one grid session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLimits {
    max_roles: usize,
    max_sections: usize,
}

impl GridLimits {
    /// Creates limits after rejecting zero values.
    pub fn new(max_roles: usize, max_sections: usize) -> Result<Self, ConfigError> {
        if max_roles == 0 {
            return Err(ConfigError::ZeroLimit(LimitKind::Roles));
        }
        if max_sections == 0 {
            return Err(ConfigError::ZeroLimit(LimitKind::Sections));
        }
        Ok(Self {
            max_roles,
            max_sections,
        })
    }

    pub fn max_roles(&self) -> usize {
        self.max_roles
    }

    pub fn max_sections(&self) -> usize {
        self.max_sections
    }

    /// Returns the maximum for one dimension.
    pub fn max_for(&self, kind: LimitKind) -> usize {
        match kind {
            LimitKind::Roles => self.max_roles,
            LimitKind::Sections => self.max_sections,
        }
    }

    /// Returns whether one more entity of `kind` fits next to `current` ones.
    pub fn allows_another(&self, kind: LimitKind, current: usize) -> bool {
        current < self.max_for(kind)
    }
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            max_roles: DEFAULT_MAX_ROLES,
            max_sections: DEFAULT_MAX_SECTIONS,
        }
    }
}
