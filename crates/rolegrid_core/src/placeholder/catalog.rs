//! Placeholder catalog and content audit.
//!
//! # Responsibility
//! - Derive the tags each role and the experiment make available.
//! - Find `<TAG>` tokens in cell content and flag ones nothing defines.
//!
//! # Invariants
//! - Role tags are `<NAME_NOUN>`, `<NAME_POSS>`, `<NAME_NUM>` with the name
//!   upper-cased and every run of characters outside `[A-Z0-9]` collapsed to `_`.
//! - Every advertised tag matches the scan pattern.
//! - Roles whose name has no ASCII letter or digit contribute no tags.

use crate::model::grid::Grid;
use crate::model::role::{Role, RoleId};
use crate::model::section::{SectionCells, SectionId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Z0-9_]+>").expect("valid placeholder regex"));
static NON_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Z0-9]+").expect("valid tag stem regex"));

/// Total number of agents across all roles.
pub const AGENTS_NUM_TAG: &str = "<AGENTS_NUM>";
/// Number of distinct roles.
pub const ROLES_NUM_TAG: &str = "<ROLES_NUM>";

const ROLE_TAG_SUFFIXES: [&str; 3] = ["NOUN", "POSS", "NUM"];

/// Who a placeholder's value is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum PlaceholderScope {
    Role { role_id: RoleId },
    Experiment,
}

/// One substitutable tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub tag: String,
    #[serde(flatten)]
    pub scope: PlaceholderScope,
}

/// One occurrence of an undefined tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderUse {
    pub section_id: SectionId,
    /// `None` for a shared row's content.
    pub role_id: Option<RoleId>,
    pub tag: String,
}

/// Audit result for one grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceholderReport {
    pub available: Vec<Placeholder>,
    pub unknown: Vec<PlaceholderUse>,
}

impl PlaceholderReport {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty()
    }
}

/// Tags contributed by one role.
pub fn role_placeholders(role: &Role) -> Vec<Placeholder> {
    let upper = role.name.to_uppercase();
    let collapsed = NON_TAG_RE.replace_all(&upper, "_");
    let stem = collapsed.trim_matches('_');
    if stem.is_empty() {
        return Vec::new();
    }
    ROLE_TAG_SUFFIXES
        .iter()
        .map(|suffix| Placeholder {
            tag: format!("<{stem}_{suffix}>"),
            scope: PlaceholderScope::Role { role_id: role.id },
        })
        .collect()
}

/// Tags every experiment provides regardless of roles.
pub fn experiment_placeholders() -> Vec<Placeholder> {
    [AGENTS_NUM_TAG, ROLES_NUM_TAG]
        .into_iter()
        .map(|tag| Placeholder {
            tag: tag.to_string(),
            scope: PlaceholderScope::Experiment,
        })
        .collect()
}

/// Full catalog for the grid: role tags in column order, then experiment tags.
pub fn available_placeholders(grid: &Grid) -> Vec<Placeholder> {
    let mut placeholders: Vec<Placeholder> =
        grid.roles().iter().flat_map(role_placeholders).collect();
    placeholders.extend(experiment_placeholders());
    placeholders
}

/// Returns the distinct tags referenced in `text`.
pub fn scan_placeholders(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect()
}

/// Lists every cell that references a tag missing from the catalog.
pub fn audit_placeholders(grid: &Grid) -> PlaceholderReport {
    let available = available_placeholders(grid);
    let known: HashSet<&str> = available.iter().map(|p| p.tag.as_str()).collect();

    let mut unknown = Vec::new();
    for section in grid.sections() {
        match &section.cells {
            SectionCells::Private { cells } => {
                for cell in cells {
                    collect_unknown(
                        &mut unknown,
                        &known,
                        section.id,
                        Some(cell.role_id),
                        &cell.content,
                    );
                }
            }
            SectionCells::Shared { cell } => {
                collect_unknown(&mut unknown, &known, section.id, None, &cell.content);
            }
        }
    }

    if !unknown.is_empty() {
        log::debug!(
            "event=placeholder_audit module=placeholder status=unknown_tags count={}",
            unknown.len()
        );
    }

    PlaceholderReport { available, unknown }
}

fn collect_unknown(
    out: &mut Vec<PlaceholderUse>,
    known: &HashSet<&str>,
    section_id: SectionId,
    role_id: Option<RoleId>,
    content: &str,
) {
    for tag in scan_placeholders(content) {
        if !known.contains(tag.as_str()) {
            out.push(PlaceholderUse {
                section_id,
                role_id,
                tag,
            });
        }
    }
}
