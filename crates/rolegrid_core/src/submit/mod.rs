//! Submission protocol: grid serialization and its inverse.
//!
//! # Responsibility
//! - Flatten the grid into the role→sections / shared-sections record.
//! - Let consumers rebuild row order from absolute `index` values.
//! - Offer a required-field presence check for the UI boundary.

pub mod decode;
pub mod payload;
pub mod required;
pub mod serializer;
