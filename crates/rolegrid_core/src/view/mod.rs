//! Rendering projections of the grid model.
//!
//! Renderers read `GridView`; user edits flow back as `GridCommand`s.

pub mod projection;
