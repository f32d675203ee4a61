//! Model → view projection.
//!
//! # Responsibility
//! - Project the grid into header/row/cell records a renderer can draw.
//! - Render a plain-text table for terminals.
//!
//! # Invariants
//! - Every row's `col_span` values sum to the role count (when roles exist).

use crate::model::grid::Grid;
use crate::model::role::RoleId;
use crate::model::section::{SectionCells, SectionId, SectionMode};
use serde::Serialize;

const TEXT_CELL_WIDTH: usize = 18;

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub role_id: RoleId,
    pub name: String,
    /// Name, or a positional fallback while the name is blank.
    pub label: String,
}

/// One drawable content cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// `None` for a shared row's merged cell.
    pub role_id: Option<RoleId>,
    pub content: String,
    pub col_span: usize,
}

/// One drawable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub section_id: SectionId,
    pub title: String,
    pub mode: SectionMode,
    pub cells: Vec<CellView>,
}

/// Renderable snapshot of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
}

impl GridView {
    /// Projects the current grid state.
    pub fn project(grid: &Grid) -> Self {
        let headers = grid
            .roles()
            .iter()
            .map(|role| HeaderView {
                role_id: role.id,
                name: role.name.clone(),
                label: role.display_label(),
            })
            .collect();

        let rows = grid
            .sections()
            .iter()
            .map(|section| {
                let cells = match &section.cells {
                    SectionCells::Private { cells } => cells
                        .iter()
                        .map(|cell| CellView {
                            role_id: Some(cell.role_id),
                            content: cell.content.clone(),
                            col_span: 1,
                        })
                        .collect(),
                    SectionCells::Shared { cell } => vec![CellView {
                        role_id: None,
                        content: cell.content.clone(),
                        col_span: cell.span,
                    }],
                };
                RowView {
                    section_id: section.id,
                    title: section.title.clone(),
                    mode: section.mode(),
                    cells,
                }
            })
            .collect();

        Self { headers, rows }
    }
}

/// Renders a fixed-width text table, one line per row.
pub fn render_text(view: &GridView) -> String {
    let mut out = String::new();
    out.push_str(&pad("section", TEXT_CELL_WIDTH));
    for header in &view.headers {
        out.push('|');
        out.push_str(&pad(&header.label, TEXT_CELL_WIDTH));
    }
    out.push('\n');

    for row in &view.rows {
        let title = format!("{} ({})", row.title, row.mode);
        out.push_str(&pad(&title, TEXT_CELL_WIDTH));
        for cell in &row.cells {
            let span = cell.col_span.max(1);
            // Merged cells absorb the separators they cover.
            let width = TEXT_CELL_WIDTH * span + (span - 1);
            out.push('|');
            out.push_str(&pad(&cell.content.replace('\n', " "), width));
        }
        out.push('\n');
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let mut clipped: String = text.chars().take(width).collect();
    let used = clipped.chars().count();
    clipped.extend(std::iter::repeat(' ').take(width - used));
    clipped
}
