//! Flutter bridge for the grid editor.

pub mod api;
