//! Ladder Core - rating and progression engine for 1v1 tournament ladders
//!
//! This crate tracks best-of-N matches round by round, assigns Elo-based
//! skill ratings with rating-banded K-factors and divisions, and derives
//! ranked standings by replaying the full chronological match log.

pub mod config;
pub mod error;
pub mod progression;
pub mod rating;
pub mod scoreboard;
pub mod standings;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use progression::{MatchProgression, MatchState};
pub use rating::RatingEngine;
pub use scoreboard::Scoreboard;
pub use standings::{LadderHooks, StandingsHooks, StandingsReplay, UserStatistics};
pub use storage::{InMemoryMatchStore, MatchStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
