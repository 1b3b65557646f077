//! Common types used throughout the ladder engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for users
pub type UserId = String;

/// Unique identifier for matches, assigned by storage in chronological order
pub type MatchId = i64;

/// Unique identifier for rounds within a match
pub type RoundId = i64;

/// A registered user on the ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Numerical suffix that lets users share a display name
    pub discriminator: String,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        name: impl Into<String>,
        discriminator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            discriminator: discriminator.into(),
        }
    }

    /// Returns the tag of this user, a combination of name and discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.name, self.discriminator)
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single game instance within a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub participants: Vec<UserId>,
    /// Non-empty subset of the participants
    pub winners: Vec<UserId>,
    /// Opaque game-specific metadata (characters, map, etc.)
    pub meta: serde_json::Value,
}

impl Round {
    /// Shortcut returning only the first winner
    pub fn winner(&self) -> Option<&UserId> {
        self.winners.first()
    }

    pub fn is_winner(&self, user_id: &str) -> bool {
        self.winners.iter().any(|w| w == user_id)
    }
}

/// A contest resolved by one or more rounds under a best-of-N rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub participants: Vec<UserId>,
    /// Maximum amount of rounds in this match
    pub num_rounds: u32,
    /// Rounds added so far, in play order
    pub rounds: Vec<Round>,
    pub complete: bool,
    /// Only set once a participant reaches the match point
    pub winners: Vec<UserId>,
    pub played_at: DateTime<Utc>,
}

impl Match {
    /// The amount of round wins needed to win this match.
    ///
    /// Based on the total round count divided by two, rounded down,
    /// and incremented by 1. For example:
    ///  - Series of 3 ((3 / 2 = 1) + 1 = 2)
    ///  - Series of 4 ((4 / 2 = 2) + 1 = 3) (tie is possible)
    ///  - Series of 5 ((5 / 2 = 2) + 1 = 3)
    pub fn match_point(&self) -> u32 {
        self.num_rounds / 2 + 1
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    pub fn is_winner(&self, user_id: &str) -> bool {
        self.winners.iter().any(|w| w == user_id)
    }

    /// All participants other than the given user
    pub fn opponents_of(&self, user_id: &str) -> Vec<UserId> {
        self.participants
            .iter()
            .filter(|p| p.as_str() != user_id)
            .cloned()
            .collect()
    }

    /// Counts rounds won by this user so far
    pub fn round_wins(&self, user_id: &str) -> u32 {
        self.rounds
            .iter()
            .filter(|round| round.is_winner(user_id))
            .count() as u32
    }
}
