//! Test fixtures and mock implementations for integration testing

use async_trait::async_trait;
use ladder_core::error::Result;
use ladder_core::storage::{InMemoryMatchStore, MatchStore};
use ladder_core::types::{Match, MatchId, RoundId, User, UserId};
use std::sync::{Arc, Mutex};

/// A persistence call observed by the recording store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    OpenMatch { num_rounds: u32 },
    AppendRound { match_id: MatchId },
    FinalizeMatch { match_id: MatchId, winners: Vec<UserId> },
}

/// Match store that records persistence calls while delegating to an
/// in-memory store
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: InMemoryMatchStore,
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register_user(&self, user: User) -> Result<()> {
        self.inner.register_user(user).await
    }

    /// Get all recorded calls (for testing)
    pub fn get_calls(&self) -> Vec<StoreCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: StoreCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl MatchStore for RecordingStore {
    async fn load_all_users(&self) -> Result<Vec<User>> {
        self.inner.load_all_users().await
    }

    async fn load_all_matches(&self) -> Result<Vec<Match>> {
        self.inner.load_all_matches().await
    }

    async fn open_match(&self, participants: &[User], num_rounds: u32) -> Result<MatchId> {
        self.record(StoreCall::OpenMatch { num_rounds });
        self.inner.open_match(participants, num_rounds).await
    }

    async fn append_round(
        &self,
        match_id: MatchId,
        winners: &[UserId],
        meta: &serde_json::Value,
    ) -> Result<RoundId> {
        self.record(StoreCall::AppendRound { match_id });
        self.inner.append_round(match_id, winners, meta).await
    }

    async fn finalize_match(&self, match_id: MatchId, winners: &[UserId]) -> Result<()> {
        self.record(StoreCall::FinalizeMatch {
            match_id,
            winners: winners.to_vec(),
        });
        self.inner.finalize_match(match_id, winners).await
    }
}

/// Create a test user with a fixed discriminator
pub fn create_test_user(id: &str) -> User {
    User::new(id, id, "0001")
}

/// Install a test subscriber so `RUST_LOG` controls engine tracing
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
