//! Match storage interface and implementations
//!
//! This module defines the persistence collaborator seam for the ladder
//! engine. The engine performs all win-counting and rating logic itself;
//! the store only records users, matches and rounds, and must return the
//! match log in chronological (ascending id) order.

pub mod memory;

use crate::error::Result;
use crate::types::{Match, MatchId, RoundId, User, UserId};
use async_trait::async_trait;

pub use memory::InMemoryMatchStore;

/// Trait for match persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Load every registered user
    async fn load_all_users(&self) -> Result<Vec<User>>;

    /// Load the full match log in chronologically ascending order.
    ///
    /// Replay correctness depends on this ordering; ratings are not
    /// commutative across matches.
    async fn load_all_matches(&self) -> Result<Vec<Match>>;

    /// Record a newly opened match and return its id
    async fn open_match(&self, participants: &[User], num_rounds: u32) -> Result<MatchId>;

    /// Record a round played within an open match and return its id
    async fn append_round(
        &self,
        match_id: MatchId,
        winners: &[UserId],
        meta: &serde_json::Value,
    ) -> Result<RoundId>;

    /// Mark a match complete with its final winners
    async fn finalize_match(&self, match_id: MatchId, winners: &[UserId]) -> Result<()>;
}
