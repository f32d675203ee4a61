//! Grid structural mutation service.
//!
//! # Responsibility
//! - Add/remove roles and sections within configured limits.
//! - Keep every row's cell layout in step with the role list.
//! - Apply free-text edits to role names, section titles and cells.
//!
//! # Invariants
//! - Every public mutation leaves `Grid::validate()` passing.
//! - A rejected mutation leaves the grid untouched.
//! - Only `set_section_mode` changes a row's own cell count.

use crate::config::{GridLimits, LimitKind};
use crate::model::experiment::ExperimentDetails;
use crate::model::grid::{Grid, GridShapeError};
use crate::model::role::{Role, RoleId};
use crate::model::section::{RoleCell, Section, SectionCells, SectionId, SectionMode};
use crate::service::reconciler::{reconcile, reconfigure_all, sync_span};
use crate::submit::payload::SubmissionPayload;
use crate::submit::serializer::serialize_grid;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from grid service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridServiceError {
    /// Add rejected because the dimension is already full.
    LimitExceeded { kind: LimitKind, max: usize },
    /// Target role does not exist.
    RoleNotFound(RoleId),
    /// Target section does not exist.
    SectionNotFound(SectionId),
    /// Edit addressed a cell kind the row does not have.
    ModeMismatch {
        section_id: SectionId,
        expected: SectionMode,
    },
    /// Adopted grid breaks a cell-shape invariant.
    InvalidShape(GridShapeError),
}

impl GridServiceError {
    /// Returns whether this is a user-facing limit notice rather than a bad reference.
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::LimitExceeded { .. })
    }
}

impl Display for GridServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LimitExceeded { kind, max } => {
                write!(f, "You can only add up to {max} {}.", kind.noun())
            }
            Self::RoleNotFound(id) => write!(f, "role not found: {id}"),
            Self::SectionNotFound(id) => write!(f, "section not found: {id}"),
            Self::ModeMismatch {
                section_id,
                expected,
            } => write!(f, "section {section_id} is not {expected}"),
            Self::InvalidShape(err) => write!(f, "invalid grid shape: {err}"),
        }
    }
}

impl Error for GridServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidShape(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GridShapeError> for GridServiceError {
    fn from(value: GridShapeError) -> Self {
        Self::InvalidShape(value)
    }
}

pub type GridResult<T> = Result<T, GridServiceError>;

/// Single-owner grid session.
///
/// One instance handles one user's edits; calls are linearized by `&mut self`.
#[derive(Debug, Clone)]
pub struct GridService {
    grid: Grid,
    limits: GridLimits,
}

impl GridService {
    /// Creates a session over an empty grid.
    pub fn new(limits: GridLimits) -> Self {
        Self {
            grid: Grid::new(),
            limits,
        }
    }

    /// Adopts a pre-rendered grid and normalizes every row to its declared mode.
    ///
    /// Cell content is discarded; use `resume` for a grid whose shape is
    /// already trusted.
    ///
    /// # Errors
    /// - `LimitExceeded` when the grid already holds more entities than allowed.
    pub fn load(mut grid: Grid, limits: GridLimits) -> GridResult<Self> {
        check_capacity(&grid, limits)?;
        reconfigure_all(&mut grid);
        info!(
            "event=grid_load module=grid status=ok roles={} sections={}",
            grid.role_count(),
            grid.section_count()
        );
        Ok(Self { grid, limits })
    }

    /// Continues editing a grid that already satisfies the shape invariants,
    /// keeping all content (e.g. one rebuilt from a decoded submission).
    ///
    /// # Errors
    /// - `LimitExceeded` when the grid holds more entities than allowed.
    /// - `InvalidShape` when `Grid::validate()` fails.
    pub fn resume(grid: Grid, limits: GridLimits) -> GridResult<Self> {
        check_capacity(&grid, limits)?;
        grid.validate()?;
        info!(
            "event=grid_resume module=grid status=ok roles={} sections={}",
            grid.role_count(),
            grid.section_count()
        );
        Ok(Self { grid, limits })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn limits(&self) -> GridLimits {
        self.limits
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Appends an unnamed role column.
    ///
    /// Private rows gain one trailing empty cell; shared rows widen their span.
    pub fn add_role(&mut self) -> GridResult<RoleId> {
        self.ensure_room(LimitKind::Roles, self.grid.role_count())?;

        let role = Role::new(String::new(), self.grid.role_count());
        let role_id = role.id;
        self.grid.push_role(role);

        let role_count = self.grid.role_count();
        for section in self.grid.sections_mut() {
            if let SectionCells::Private { cells } = &mut section.cells {
                cells.push(RoleCell::empty(role_id));
            }
            sync_span(section, role_count);
        }

        info!(
            "event=role_add module=grid status=ok role_id={} role_count={}",
            role_id, role_count
        );
        Ok(role_id)
    }

    /// Removes one role column and the matching cell of every private row.
    pub fn remove_role(&mut self, role_id: RoleId) -> GridResult<Role> {
        let index = self
            .grid
            .role_index(role_id)
            .ok_or(GridServiceError::RoleNotFound(role_id))?;
        let removed = self.grid.remove_role_at(index);

        let role_count = self.grid.role_count();
        for section in self.grid.sections_mut() {
            if let SectionCells::Private { cells } = &mut section.cells {
                cells.retain(|cell| cell.role_id != role_id);
            }
            sync_span(section, role_count);
        }

        info!(
            "event=role_remove module=grid status=ok role_id={} column={} role_count={}",
            role_id, index, role_count
        );
        Ok(removed)
    }

    /// Appends an untitled private row with one empty cell per role.
    pub fn add_section(&mut self) -> GridResult<SectionId> {
        self.ensure_room(LimitKind::Sections, self.grid.section_count())?;

        let section = Section::private(
            String::new(),
            self.grid.section_count(),
            &self.grid.role_ids(),
        );
        let section_id = section.id;
        self.grid.push_section(section);

        info!(
            "event=section_add module=grid status=ok section_id={} section_count={}",
            section_id,
            self.grid.section_count()
        );
        Ok(section_id)
    }

    /// Removes one row with all of its cells.
    pub fn remove_section(&mut self, section_id: SectionId) -> GridResult<Section> {
        let index = self
            .grid
            .section_index(section_id)
            .ok_or(GridServiceError::SectionNotFound(section_id))?;
        let removed = self.grid.remove_section_at(index);

        info!(
            "event=section_remove module=grid status=ok section_id={} row={} section_count={}",
            section_id,
            index,
            self.grid.section_count()
        );
        Ok(removed)
    }

    /// Switches a row between private and shared.
    ///
    /// A real switch rebuilds the row with empty cells. Re-selecting the
    /// current mode keeps existing content.
    pub fn set_section_mode(&mut self, section_id: SectionId, mode: SectionMode) -> GridResult<()> {
        let (roles, sections) = self.grid.roles_and_sections_mut();
        let section = sections
            .iter_mut()
            .find(|section| section.id == section_id)
            .ok_or(GridServiceError::SectionNotFound(section_id))?;

        if section.mode() == mode {
            debug!(
                "event=section_mode module=grid status=unchanged section_id={} mode={}",
                section_id, mode
            );
            return Ok(());
        }

        reconcile(section, mode, roles);
        info!(
            "event=section_mode module=grid status=ok section_id={} mode={}",
            section_id, mode
        );
        Ok(())
    }

    pub fn rename_role(&mut self, role_id: RoleId, name: impl Into<String>) -> GridResult<()> {
        let role = self
            .grid
            .role_mut(role_id)
            .ok_or(GridServiceError::RoleNotFound(role_id))?;
        role.name = name.into();
        Ok(())
    }

    pub fn set_section_title(
        &mut self,
        section_id: SectionId,
        title: impl Into<String>,
    ) -> GridResult<()> {
        let section = self
            .grid
            .section_mut(section_id)
            .ok_or(GridServiceError::SectionNotFound(section_id))?;
        section.title = title.into();
        Ok(())
    }

    /// Replaces one role's content in a private row.
    pub fn set_cell_content(
        &mut self,
        section_id: SectionId,
        role_id: RoleId,
        content: impl Into<String>,
    ) -> GridResult<()> {
        if self.grid.role(role_id).is_none() {
            return Err(GridServiceError::RoleNotFound(role_id));
        }
        let section = self
            .grid
            .section_mut(section_id)
            .ok_or(GridServiceError::SectionNotFound(section_id))?;

        match &mut section.cells {
            SectionCells::Private { cells } => {
                let cell = cells
                    .iter_mut()
                    .find(|cell| cell.role_id == role_id)
                    .ok_or(GridServiceError::RoleNotFound(role_id))?;
                cell.content = content.into();
                Ok(())
            }
            SectionCells::Shared { .. } => Err(GridServiceError::ModeMismatch {
                section_id,
                expected: SectionMode::Private,
            }),
        }
    }

    /// Replaces the merged content of a shared row.
    pub fn set_shared_content(
        &mut self,
        section_id: SectionId,
        content: impl Into<String>,
    ) -> GridResult<()> {
        let section = self
            .grid
            .section_mut(section_id)
            .ok_or(GridServiceError::SectionNotFound(section_id))?;

        match &mut section.cells {
            SectionCells::Shared { cell } => {
                cell.content = content.into();
                Ok(())
            }
            SectionCells::Private { .. } => Err(GridServiceError::ModeMismatch {
                section_id,
                expected: SectionMode::Shared,
            }),
        }
    }

    /// Produces the submission record for the current grid state.
    pub fn submit(&self, details: &ExperimentDetails) -> SubmissionPayload {
        let payload = serialize_grid(&self.grid, details);
        info!(
            "event=grid_submit module=grid status=ok roles={} shared_sections={}",
            payload.roles.len(),
            payload.sections.len()
        );
        payload
    }

    fn ensure_room(&self, kind: LimitKind, current: usize) -> GridResult<()> {
        if self.limits.allows_another(kind, current) {
            return Ok(());
        }
        let max = self.limits.max_for(kind);
        warn!(
            "event=limit_exceeded module=grid status=rejected kind={} count={} max={}",
            kind.noun(),
            current,
            max
        );
        Err(GridServiceError::LimitExceeded { kind, max })
    }
}

impl Default for GridService {
    fn default() -> Self {
        Self::new(GridLimits::default())
    }
}

fn check_capacity(grid: &Grid, limits: GridLimits) -> GridResult<()> {
    for (kind, count) in [
        (LimitKind::Roles, grid.role_count()),
        (LimitKind::Sections, grid.section_count()),
    ] {
        let max = limits.max_for(kind);
        if count > max {
            warn!(
                "event=grid_adopt module=grid status=rejected kind={} count={} max={}",
                kind.noun(),
                count,
                max
            );
            return Err(GridServiceError::LimitExceeded { kind, max });
        }
    }
    Ok(())
}
