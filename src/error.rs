//! Error types for the ladder engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

use crate::types::{MatchId, UserId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ladder scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Invalid state: {message}")]
    State { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Match {match_id} references unknown user: {user_id}")]
    MissingParticipant { match_id: MatchId, user_id: UserId },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: MatchId },
}
