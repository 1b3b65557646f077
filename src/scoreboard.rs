//! Score tracking for round-less contests
//!
//! Keeps track of user scores in a contest that resolves in a single shot
//! instead of discrete rounds. Scores are constrained to `[0, 1]`.

use crate::error::{LadderError, Result};
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Per-user scores for a single contest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Scores in participant insertion order, all starting at 0
    entries: Vec<(UserId, f64)>,
}

impl Scoreboard {
    /// Creates a new scoreboard for the given participants
    pub fn new(participants: Vec<UserId>) -> Result<Self> {
        if participants.is_empty() {
            return Err(LadderError::Validation {
                reason: "a scoreboard requires at least one participant".to_string(),
            }
            .into());
        }
        for (i, user_id) in participants.iter().enumerate() {
            if participants[..i].contains(user_id) {
                return Err(LadderError::Validation {
                    reason: format!("duplicate participant: {}", user_id),
                }
                .into());
            }
        }

        Ok(Self {
            entries: participants
                .into_iter()
                .map(|user_id| (user_id, 0.0))
                .collect(),
        })
    }

    /// Sets a user's score, which must lie within `[0, 1]`
    pub fn set_score(&mut self, user_id: &str, score: f64) -> Result<()> {
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(LadderError::Validation {
                reason: format!("score out of range; must be between 0 and 1 (got {})", score),
            }
            .into());
        }

        let entry = self
            .entries
            .iter_mut()
            .find(|(id, _)| id == user_id)
            .ok_or_else(|| LadderError::Validation {
                reason: format!("cannot set score of user not on this scoreboard: {}", user_id),
            })?;
        entry.1 = score;
        Ok(())
    }

    /// Sets this user's score to 1 and every other score to 0
    pub fn set_winner(&mut self, user_id: &str) -> Result<()> {
        if !self.entries.iter().any(|(id, _)| id == user_id) {
            return Err(LadderError::Validation {
                reason: format!("cannot set score of user not on this scoreboard: {}", user_id),
            }
            .into());
        }

        for (id, score) in &mut self.entries {
            *score = if id == user_id { 1.0 } else { 0.0 };
        }
        Ok(())
    }

    pub fn get_score(&self, user_id: &str) -> Result<f64> {
        self.entries
            .iter()
            .find(|(id, _)| id == user_id)
            .map(|(_, score)| *score)
            .ok_or_else(|| {
                LadderError::Validation {
                    reason: format!(
                        "cannot get score of user not on this scoreboard: {}",
                        user_id
                    ),
                }
                .into()
            })
    }

    /// All scores in participant insertion order
    pub fn scores(&self) -> &[(UserId, f64)] {
        &self.entries
    }

    /// Returns the user with the highest score.
    ///
    /// Fails while every score is still 0 (no winner yet). The first
    /// participant holding the maximum wins score ties.
    pub fn get_winner(&self) -> Result<&UserId> {
        let mut winner: Option<&UserId> = None;
        let mut best = 0.0;

        for (user_id, score) in &self.entries {
            if *score > best {
                winner = Some(user_id);
                best = *score;
            }
        }

        winner.ok_or_else(|| {
            LadderError::State {
                message: "cannot get highest; all scores are 0".to_string(),
            }
            .into()
        })
    }

    /// Returns true if there is at least one winner
    pub fn is_resolved(&self) -> bool {
        self.get_winner().is_ok()
    }
}
