//! Pluggable hooks for the standings replay
//!
//! Callers define how statistics are initialized, folded over each match,
//! post-processed and sorted, all over their own statistics type. The
//! replay drives the hooks in chronological match order.

use crate::error::Result;
use crate::types::{Match, User, UserId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Read access to every user's statistics as of immediately before the
/// match currently being processed.
///
/// Both participants of a match are updated within the same replay step;
/// reading the opponent through the snapshot guarantees the pre-match
/// value regardless of participant iteration order.
pub struct StatsSnapshot<'a, S> {
    stats: &'a HashMap<UserId, S>,
}

impl<'a, S> StatsSnapshot<'a, S> {
    pub(crate) fn new(stats: &'a HashMap<UserId, S>) -> Self {
        Self { stats }
    }

    pub fn get(&self, user_id: &str) -> Option<&S> {
        self.stats.get(user_id)
    }
}

/// Typed capabilities for deriving per-user statistics from the match log
pub trait StandingsHooks {
    /// The caller-defined statistics type
    type Stats: Clone;

    /// Initial statistics for a user, before any match is read
    fn on_start(&self, user: &User) -> Self::Stats;

    /// Folds one match into a participant's statistics.
    ///
    /// Invoked once per participant per match, in ascending match order.
    /// Opponent statistics read through the snapshot reflect the state
    /// just before this match.
    fn on_match(
        &self,
        user: &User,
        stats: Self::Stats,
        record: &Match,
        snapshot: &StatsSnapshot<'_, Self::Stats>,
    ) -> Result<Self::Stats>;

    /// Post-processing after the whole log has been folded
    fn on_finish(&self, _user: &User, stats: Self::Stats) -> Self::Stats {
        stats
    }

    /// Final ordering of the rankings; ties are broken by whatever
    /// secondary fields the comparator inspects
    fn compare(&self, a: &Self::Stats, b: &Self::Stats) -> Ordering;
}
