//! Pure Elo rating math
//!
//! This module wraps the expected-score curve from the skillratings crate
//! and derives integer rating adjustments from it. All functions here are
//! stateless; division and placement handling live in the engine.

use crate::error::{LadderError, Result};
use skillratings::elo::{expected_score as elo_expected_score, EloRating};
use skillratings::Outcomes;

/// Maps a match outcome to its chess score
pub fn score_for(outcome: Outcomes) -> f64 {
    match outcome {
        Outcomes::WIN => 1.0,
        Outcomes::DRAW => 0.5,
        Outcomes::LOSS => 0.0,
    }
}

/// Calculates the expected score of a player based on the rating difference
/// between that player and an opponent.
///
/// The expected score is a number between 0 and 1. An expected score of 0.5
/// implies that both players have the same rating.
pub fn expected_score(rating: f64, opponent_rating: f64) -> Result<f64> {
    if !rating.is_finite() || !opponent_rating.is_finite() {
        return Err(LadderError::InvalidInput {
            message: format!(
                "ratings must be finite numbers (got {} vs {})",
                rating, opponent_rating
            ),
        }
        .into());
    }

    let (expected, _) = elo_expected_score(
        &EloRating { rating },
        &EloRating {
            rating: opponent_rating,
        },
    );
    Ok(expected)
}

/// Calculates the rating adjustment from the player's current rating, the
/// opponent's rating, the score, and the constant K.
///
/// Score can be any number from 0 to 1, but in most cases it is either 0 or
/// 1 (did the player win or lose?). Use 0.5 as the score to signify a draw.
///
/// K is the maximum rating coefficient for any given match: if K = 40 and
/// the rating difference between two players is great (the expected score
/// for either player is ~1 or ~0), then the most their rating will change
/// is 40.
pub fn adjust(rating: f64, opponent_rating: f64, score: f64, k: f64) -> Result<i64> {
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(LadderError::InvalidInput {
            message: format!("score must be between 0 and 1 (got {})", score),
        }
        .into());
    }
    if !k.is_finite() {
        return Err(LadderError::InvalidInput {
            message: format!("K-factor must be a finite number (got {})", k),
        }
        .into());
    }

    let expected = expected_score(rating, opponent_rating)?;
    Ok((k * (score - expected)).round() as i64)
}
