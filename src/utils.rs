//! Utility functions for the ladder engine

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Fraction of matches won, or 0.0 when no matches were played
pub fn win_rate(wins: u32, matches_played: u32) -> f64 {
    if matches_played == 0 {
        return 0.0;
    }
    f64::from(wins) / f64::from(matches_played)
}
