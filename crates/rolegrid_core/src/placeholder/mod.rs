//! Prompt placeholders referenced from section content.
//!
//! Content cells may embed `<TAG>` tokens that the simulator substitutes
//! per run (agent counts, role nouns). This module knows which tags exist.

pub mod catalog;
