//! Canonical ladder hooks: Elo standings with divisions and placement
//!
//! The default hooks implementation used for the ladder's own rankings.
//! Statistics are immutable value objects; every update returns a new
//! instance so earlier snapshots stay valid while the replay reads them.

use crate::error::{LadderError, Result};
use crate::rating::RatingEngine;
use crate::standings::hooks::{StandingsHooks, StatsSnapshot};
use crate::types::{Match, User};
use crate::utils::win_rate;
use serde::{Deserialize, Serialize};
use skillratings::Outcomes;
use std::cmp::Ordering;

/// Immutable per-user ladder statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub matches_played: u32,
    pub wins: u32,
    pub rating: i64,
    /// False until the user clears their placement matches
    pub ranked: bool,
}

impl UserStatistics {
    pub fn new(rating: i64) -> Self {
        Self {
            matches_played: 0,
            wins: 0,
            rating,
            ranked: false,
        }
    }

    /// Copy with the match count (and win count, if won) incremented
    pub fn record_match(&self, won: bool) -> Self {
        Self {
            matches_played: self.matches_played + 1,
            wins: if won { self.wins + 1 } else { self.wins },
            ..self.clone()
        }
    }

    /// Copy with a new rating
    pub fn with_rating(&self, rating: i64) -> Self {
        Self {
            rating,
            ..self.clone()
        }
    }

    /// Copy with the ranked flag set
    pub fn with_ranked(&self, ranked: bool) -> Self {
        Self {
            ranked,
            ..self.clone()
        }
    }

    pub fn losses(&self) -> u32 {
        self.matches_played - self.wins
    }

    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.matches_played)
    }
}

/// Standings hooks backed by the rating engine.
///
/// Each participant's adjustment reads the opponent's rating as of just
/// before the match. A match with multiple winners rates as a draw for
/// the tied participants. Users are flagged unranked until they clear
/// their placement matches.
pub struct LadderHooks {
    engine: RatingEngine,
}

impl LadderHooks {
    pub fn new(engine: RatingEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &RatingEngine {
        &self.engine
    }

    fn outcome_for(record: &Match, user_id: &str) -> Outcomes {
        if record.is_winner(user_id) {
            if record.winners.len() > 1 {
                Outcomes::DRAW
            } else {
                Outcomes::WIN
            }
        } else {
            Outcomes::LOSS
        }
    }
}

impl StandingsHooks for LadderHooks {
    type Stats = UserStatistics;

    fn on_start(&self, _user: &User) -> UserStatistics {
        UserStatistics::new(self.engine.initial_rating())
    }

    fn on_match(
        &self,
        user: &User,
        stats: UserStatistics,
        record: &Match,
        snapshot: &StatsSnapshot<'_, UserStatistics>,
    ) -> Result<UserStatistics> {
        let opponent_id = record
            .opponents_of(&user.id)
            .into_iter()
            .next()
            .ok_or_else(|| LadderError::Validation {
                reason: format!("match {} has no opponent for {}", record.id, user.tag()),
            })?;
        let opponent_rating = snapshot
            .get(&opponent_id)
            .map(|opponent| opponent.rating)
            .ok_or(LadderError::MissingParticipant {
                match_id: record.id,
                user_id: opponent_id,
            })?;

        let outcome = Self::outcome_for(record, &user.id);
        let adjustment =
            self.engine
                .rate(stats.rating, opponent_rating, outcome, stats.matches_played)?;

        let next = stats
            .record_match(outcome == Outcomes::WIN)
            .with_rating(adjustment.new_rating);
        let ranked = !self.engine.is_placement(next.matches_played);
        Ok(next.with_ranked(ranked))
    }

    /// Rating descending, then win rate descending
    fn compare(&self, a: &UserStatistics, b: &UserStatistics) -> Ordering {
        b.rating.cmp(&a.rating).then_with(|| {
            b.win_rate()
                .partial_cmp(&a.win_rate())
                .unwrap_or(Ordering::Equal)
        })
    }
}
