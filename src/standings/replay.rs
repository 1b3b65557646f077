//! Chronological replay of the match log
//!
//! Computes a ranked snapshot by folding every completed match through the
//! caller's hooks. The computation is a full, deterministic re-derivation
//! on every call; nothing is cached and no partial result ever escapes.

use crate::error::{LadderError, Result};
use crate::standings::hooks::{StandingsHooks, StatsSnapshot};
use crate::storage::MatchStore;
use crate::types::{User, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Derives rankings from the full match history
pub struct StandingsReplay {
    store: Arc<dyn MatchStore>,
}

impl StandingsReplay {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self { store }
    }

    /// Calculates the ranking of users.
    ///
    /// Loads all users and the chronologically ordered match log, folds
    /// each completed match through the hooks (staging participant updates
    /// so every input is read before any is written), applies the finish
    /// hook, and returns `(user, stats)` pairs in comparator order.
    ///
    /// Fails with `MissingParticipantError` if a match references a user
    /// absent from the loaded set; partial results are discarded.
    pub async fn calculate<H: StandingsHooks>(&self, hooks: &H) -> Result<Vec<(User, H::Stats)>> {
        let users = self.store.load_all_users().await?;
        let matches = self.store.load_all_matches().await?;
        debug!(
            users = users.len(),
            matches = matches.len(),
            "replaying match log"
        );

        let mut stats: HashMap<UserId, H::Stats> = HashMap::with_capacity(users.len());
        for user in &users {
            stats.insert(user.id.clone(), hooks.on_start(user));
        }

        {
            let by_id: HashMap<&str, &User> =
                users.iter().map(|user| (user.id.as_str(), user)).collect();

            for record in &matches {
                if !record.complete {
                    debug!(match_id = record.id, "skipping incomplete match");
                    continue;
                }

                let mut staged: Vec<(UserId, H::Stats)> =
                    Vec::with_capacity(record.participants.len());
                {
                    let snapshot = StatsSnapshot::new(&stats);
                    for user_id in &record.participants {
                        let user = by_id.get(user_id.as_str()).copied().ok_or_else(|| {
                            LadderError::MissingParticipant {
                                match_id: record.id,
                                user_id: user_id.clone(),
                            }
                        })?;
                        let current = stats.get(user_id).cloned().ok_or_else(|| {
                            LadderError::MissingParticipant {
                                match_id: record.id,
                                user_id: user_id.clone(),
                            }
                        })?;

                        let next = hooks.on_match(user, current, record, &snapshot)?;
                        staged.push((user_id.clone(), next));
                    }
                }

                for (user_id, next) in staged {
                    stats.insert(user_id, next);
                }
            }
        }

        let mut entries: Vec<(User, H::Stats)> = Vec::with_capacity(users.len());
        for user in users {
            let folded = stats
                .remove(&user.id)
                .map(|s| hooks.on_finish(&user, s))
                .ok_or_else(|| LadderError::State {
                    message: format!("statistics missing for user {}", user.id),
                })?;
            entries.push((user, folded));
        }

        entries.sort_by(|a, b| hooks.compare(&a.1, &b.1));
        Ok(entries)
    }
}
