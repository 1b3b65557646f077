//! Match progression builder and lifecycle management
//!
//! Helps construct matches by adding rounds to them one by one. The builder
//! owns all win-counting and threshold logic in memory; persistence happens
//! through the injected store.

use crate::error::{LadderError, Result};
use crate::storage::MatchStore;
use crate::types::{Match, MatchId, Round, User, UserId};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Possible states of a match in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    /// The match is accepting rounds
    Open,
    /// A winner has been decided (terminal state)
    Complete,
}

/// Incremental builder that turns round outcomes into a completed match
/// under best-of-N rules.
///
/// Not safe for concurrent round additions on the same match; the owning
/// session must serialize writes per match.
pub struct MatchProgression {
    store: Arc<dyn MatchStore>,
    match_id: MatchId,
    participants: Vec<User>,
    num_rounds: u32,
    match_point: u32,
    rounds: Vec<Round>,
    state: MatchState,
    winners: Vec<UserId>,
    opened_at: DateTime<Utc>,
}

impl MatchProgression {
    /// Opens a match in progress, persisting it through the store.
    ///
    /// Requires at least two distinct participants and one round.
    pub async fn open(
        store: Arc<dyn MatchStore>,
        participants: Vec<User>,
        num_rounds: u32,
    ) -> Result<Self> {
        if participants.len() < 2 {
            return Err(LadderError::Validation {
                reason: format!(
                    "a match requires at least 2 participants (got {})",
                    participants.len()
                ),
            }
            .into());
        }
        if num_rounds < 1 {
            return Err(LadderError::Validation {
                reason: "a match requires at least 1 round".to_string(),
            }
            .into());
        }
        for (i, user) in participants.iter().enumerate() {
            if participants[..i].iter().any(|other| other.id == user.id) {
                return Err(LadderError::Validation {
                    reason: format!("duplicate participant: {}", user.tag()),
                }
                .into());
            }
        }

        let match_id = store.open_match(&participants, num_rounds).await?;
        info!(match_id, num_rounds, "opened match");

        Ok(Self {
            store,
            match_id,
            participants,
            num_rounds,
            match_point: num_rounds / 2 + 1,
            rounds: Vec::new(),
            state: MatchState::Open,
            winners: Vec::new(),
            opened_at: current_timestamp(),
        })
    }

    /// Adds a round to the builder and re-evaluates the match.
    ///
    /// Returns the finalized match once a participant's round-win count
    /// reaches the match point, or `None` while more rounds are needed.
    pub async fn add_round(
        &mut self,
        winners: &[UserId],
        meta: serde_json::Value,
    ) -> Result<Option<Match>> {
        if self.state == MatchState::Complete {
            return Err(LadderError::State {
                message: format!("match {} is already complete", self.match_id),
            }
            .into());
        }
        if self.rounds.len() as u32 >= self.num_rounds {
            return Err(LadderError::State {
                message: format!(
                    "match {} already has all {} rounds",
                    self.match_id, self.num_rounds
                ),
            }
            .into());
        }
        if winners.is_empty() {
            return Err(LadderError::Validation {
                reason: "this round does not have a winner".to_string(),
            }
            .into());
        }
        for winner in winners {
            if !self.is_participant(winner) {
                return Err(LadderError::Validation {
                    reason: format!("this match does not involve user \"{}\"", winner),
                }
                .into());
            }
        }
        if meta.is_null() {
            warn!(match_id = self.match_id, "adding round without metainfo");
        }

        let round_id = self
            .store
            .append_round(self.match_id, winners, &meta)
            .await?;

        self.rounds.push(Round {
            id: round_id,
            participants: self.participant_ids(),
            winners: winners.to_vec(),
            meta,
        });

        self.update_match().await
    }

    /// Gets the total amount of round wins for this user according to the
    /// rounds currently added.
    pub fn get_round_wins(&self, user_id: &str) -> Result<u32> {
        if !self.is_participant(user_id) {
            return Err(LadderError::Validation {
                reason: format!("the user {} is not a part of this match", user_id),
            }
            .into());
        }

        Ok(self
            .rounds
            .iter()
            .filter(|round| round.is_winner(user_id))
            .count() as u32)
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn match_point(&self) -> u32 {
        self.match_point
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds.len() as u32
    }

    pub fn participants(&self) -> &[User] {
        &self.participants
    }

    /// The winners of this match, empty until it completes
    pub fn winners(&self) -> &[UserId] {
        &self.winners
    }

    fn is_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|user| user.id == user_id)
    }

    fn participant_ids(&self) -> Vec<UserId> {
        self.participants.iter().map(|user| user.id.clone()).collect()
    }

    /// Re-evaluates win tallies and finalizes the match if any participant
    /// reached the match point. Every participant at or over the threshold
    /// becomes a winner, so a simultaneous crossing is an explicit tie.
    async fn update_match(&mut self) -> Result<Option<Match>> {
        let winners: Vec<UserId> = self
            .participants
            .iter()
            .filter(|user| {
                self.rounds
                    .iter()
                    .filter(|round| round.is_winner(&user.id))
                    .count() as u32
                    >= self.match_point
            })
            .map(|user| user.id.clone())
            .collect();

        if winners.is_empty() {
            return Ok(None);
        }

        self.winners = winners;
        self.state = MatchState::Complete;
        self.store
            .finalize_match(self.match_id, &self.winners)
            .await?;
        info!(
            match_id = self.match_id,
            winners = ?self.winners,
            rounds = self.rounds.len(),
            "match complete"
        );

        Ok(Some(self.to_match()))
    }

    fn to_match(&self) -> Match {
        Match {
            id: self.match_id,
            participants: self.participant_ids(),
            num_rounds: self.num_rounds,
            rounds: self.rounds.clone(),
            complete: true,
            winners: self.winners.clone(),
            played_at: self.opened_at,
        }
    }
}
