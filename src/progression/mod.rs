//! Best-of-N match progression
//!
//! This module contains the incremental builder that accepts round results
//! one at a time and decides when, and by whom, a match is won.

pub mod builder;

// Re-export commonly used types
pub use builder::{MatchProgression, MatchState};
