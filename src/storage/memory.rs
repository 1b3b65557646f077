//! In-memory match storage implementation
//!
//! Reference implementation of [`MatchStore`] backed by a tokio `RwLock`.
//! Ids are assigned sequentially, so the match log is chronologically
//! ordered by construction. Used by tests and embedders that don't need
//! durable persistence.

use crate::error::{LadderError, Result};
use crate::storage::MatchStore;
use crate::types::{Match, MatchId, Round, RoundId, User, UserId};
use crate::utils::current_timestamp;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    matches: Vec<Match>,
    next_match_id: MatchId,
    next_round_id: RoundId,
}

/// In-memory match store with sequential ids
#[derive(Debug)]
pub struct InMemoryMatchStore {
    state: RwLock<StoreState>,
}

impl Default for InMemoryMatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                users: Vec::new(),
                matches: Vec::new(),
                next_match_id: 1,
                next_round_id: 1,
            }),
        }
    }

    /// Register a user so replay can resolve them as a participant
    pub async fn register_user(&self, user: User) -> Result<()> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|existing| existing.id == user.id) {
            return Err(LadderError::Validation {
                reason: format!("user {} is already registered", user.id),
            }
            .into());
        }
        state.users.push(user);
        Ok(())
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn match_count(&self) -> usize {
        self.state.read().await.matches.len()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn load_all_users(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.users.clone())
    }

    async fn load_all_matches(&self) -> Result<Vec<Match>> {
        let state = self.state.read().await;
        let mut matches = state.matches.clone();
        matches.sort_by_key(|m| m.id);
        Ok(matches)
    }

    async fn open_match(&self, participants: &[User], num_rounds: u32) -> Result<MatchId> {
        let mut state = self.state.write().await;
        let id = state.next_match_id;
        state.next_match_id += 1;

        state.matches.push(Match {
            id,
            participants: participants.iter().map(|user| user.id.clone()).collect(),
            num_rounds,
            rounds: Vec::new(),
            complete: false,
            winners: Vec::new(),
            played_at: current_timestamp(),
        });

        Ok(id)
    }

    async fn append_round(
        &self,
        match_id: MatchId,
        winners: &[UserId],
        meta: &serde_json::Value,
    ) -> Result<RoundId> {
        let mut state = self.state.write().await;
        let round_id = state.next_round_id;
        state.next_round_id += 1;

        let record = state
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(LadderError::MatchNotFound { match_id })?;
        if record.complete {
            return Err(LadderError::State {
                message: format!("match {} is already complete", match_id),
            }
            .into());
        }

        record.rounds.push(Round {
            id: round_id,
            participants: record.participants.clone(),
            winners: winners.to_vec(),
            meta: meta.clone(),
        });

        Ok(round_id)
    }

    async fn finalize_match(&self, match_id: MatchId, winners: &[UserId]) -> Result<()> {
        let mut state = self.state.write().await;
        let record = state
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(LadderError::MatchNotFound { match_id })?;
        if record.complete {
            return Err(LadderError::State {
                message: format!("match {} is already finalized", match_id),
            }
            .into());
        }

        record.complete = true;
        record.winners = winners.to_vec();
        Ok(())
    }
}
