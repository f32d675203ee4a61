//! Grid domain model.
//!
//! # Responsibility
//! - Define the plain-data shapes for roles, sections, cells and the grid.
//! - Stay independent of any rendering substrate.
//!
//! # Invariants
//! - Every role and section is identified by a stable UUID.
//! - Positions are explicit fields, refreshed on every structural change.

pub mod experiment;
pub mod grid;
pub mod role;
pub mod section;
