//! Grid use-case services.
//!
//! # Responsibility
//! - Enforce grid limits and cell-shape invariants on every mutation.
//! - Keep UI/FFI layers decoupled from model internals.

pub mod command;
pub mod grid_service;
pub mod reconciler;
