//! Elo-based rating system with divisions and banded K-factors
//!
//! This module provides the pure Elo math, the sorted band-table lookup
//! shared by K-factors and divisions, and the rating engine that combines
//! them with placement handling and floor clamping.

pub mod bands;
pub mod elo;
pub mod engine;

// Re-export commonly used types
pub use bands::{BandTable, Division, KFactor};
pub use engine::{RatingAdjustment, RatingEngine};
