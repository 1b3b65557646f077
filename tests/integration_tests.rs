//! Integration tests for the ladder engine
//!
//! These tests validate the whole pipeline working together:
//! - Match progression persisting through the store
//! - Standings replay over the accumulated match log
//! - Rating adjustments, placement handling and ranking order
//! - Error propagation across component boundaries

// Modules for organizing tests
mod fixtures;

use ladder_core::config::RatingConfig;
use ladder_core::progression::MatchProgression;
use ladder_core::rating::RatingEngine;
use ladder_core::standings::{LadderHooks, StandingsReplay, UserStatistics};
use ladder_core::storage::{InMemoryMatchStore, MatchStore};
use ladder_core::types::{User, UserId};
use serde_json::json;
use std::sync::Arc;

use fixtures::{create_test_user, init_tracing, RecordingStore, StoreCall};

fn create_test_hooks() -> LadderHooks {
    LadderHooks::new(RatingEngine::new(&RatingConfig::default()).unwrap())
}

/// Play a complete best-of-N match where `winner` takes every round
async fn play_match(store: Arc<dyn MatchStore>, users: &[User], num_rounds: u32, winner: &str) {
    let mut builder = MatchProgression::open(store, users.to_vec(), num_rounds)
        .await
        .unwrap();

    let winners = vec![winner.to_string()];
    loop {
        if builder
            .add_round(&winners, json!({"winner": winner}))
            .await
            .unwrap()
            .is_some()
        {
            break;
        }
    }
}

/// Integration test setup that registers users in a fresh store
async fn create_test_system(user_ids: &[&str]) -> (Arc<InMemoryMatchStore>, Vec<User>) {
    init_tracing();
    let store = Arc::new(InMemoryMatchStore::new());
    let mut users = Vec::new();
    for id in user_ids {
        let user = create_test_user(id);
        store.register_user(user.clone()).await.unwrap();
        users.push(user);
    }
    (store, users)
}

#[tokio::test]
async fn test_complete_ladder_workflow() {
    let (store, users) = create_test_system(&["alice", "bob", "carol"]).await;
    let pair = |a: usize, b: usize| vec![users[a].clone(), users[b].clone()];

    // alice beats bob twice, bob beats carol, carol beats alice once
    play_match(store.clone(), &pair(0, 1), 3, "alice").await;
    play_match(store.clone(), &pair(0, 1), 3, "alice").await;
    play_match(store.clone(), &pair(1, 2), 3, "bob").await;
    play_match(store.clone(), &pair(2, 0), 3, "carol").await;

    let replay = StandingsReplay::new(store.clone());
    let rankings = replay.calculate(&create_test_hooks()).await.unwrap();

    assert_eq!(rankings.len(), 3);
    assert_eq!(rankings[0].0.id, "alice");

    for (user, stats) in &rankings {
        assert!(stats.matches_played >= 1, "{} played no matches", user.tag());
    }

    // Ratings are ordered the way the comparator promises
    for pair in rankings.windows(2) {
        assert!(pair[0].1.rating >= pair[1].1.rating);
    }
}

#[tokio::test]
async fn test_placement_users_are_unranked() {
    let (store, users) = create_test_system(&["alice", "bob"]).await;

    // Two completed matches leave both users inside placement
    play_match(store.clone(), &users, 3, "alice").await;
    play_match(store.clone(), &users, 3, "alice").await;

    let replay = StandingsReplay::new(store.clone());
    let rankings = replay.calculate(&create_test_hooks()).await.unwrap();
    assert!(rankings.iter().all(|(_, stats)| !stats.ranked));

    // A third match clears placement for both
    play_match(store.clone(), &users, 3, "bob").await;
    let rankings = replay.calculate(&create_test_hooks()).await.unwrap();
    assert!(rankings.iter().all(|(_, stats)| stats.ranked));
}

#[tokio::test]
async fn test_replay_is_deterministic_across_calls() {
    let (store, users) = create_test_system(&["alice", "bob"]).await;

    play_match(store.clone(), &users, 3, "alice").await;
    play_match(store.clone(), &users, 3, "bob").await;
    play_match(store.clone(), &users, 5, "alice").await;

    let replay = StandingsReplay::new(store);
    let hooks = create_test_hooks();

    let first = replay.calculate(&hooks).await.unwrap();
    let second = replay.calculate(&hooks).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }
}

#[tokio::test]
async fn test_replay_is_order_sensitive() {
    // Same multiset of results in a different order: ratings diverge
    // because each adjustment depends on the ratings at that point
    async fn final_ratings(winners_in_order: &[&str]) -> Vec<(UserId, i64)> {
        let (store, users) = create_test_system(&["alice", "bob"]).await;
        for winner in winners_in_order {
            play_match(store.clone(), &users, 1, winner).await;
        }

        let replay = StandingsReplay::new(store);
        let mut ratings = replay
            .calculate(&create_test_hooks())
            .await
            .unwrap()
            .into_iter()
            .map(|(user, stats)| (user.id, stats.rating))
            .collect::<Vec<_>>();
        ratings.sort();
        ratings
    }

    let forward = final_ratings(&["alice", "alice", "alice", "alice", "bob"]).await;
    let swapped = final_ratings(&["alice", "bob", "alice", "alice", "alice"]).await;

    assert_ne!(forward, swapped);
}

#[tokio::test]
async fn test_unknown_participant_discards_replay() {
    let (store, _) = create_test_system(&["alice"]).await;

    // A match against an unregistered opponent poisons the log
    let users = vec![create_test_user("alice"), create_test_user("ghost")];
    play_match(store.clone(), &users, 1, "ghost").await;

    let replay = StandingsReplay::new(store);
    let result = replay.calculate(&create_test_hooks()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_progression_issues_expected_persistence_calls() {
    init_tracing();
    let store = Arc::new(RecordingStore::new());
    store.register_user(create_test_user("alice")).await.unwrap();
    store.register_user(create_test_user("bob")).await.unwrap();

    let users = vec![create_test_user("alice"), create_test_user("bob")];
    let mut builder = MatchProgression::open(store.clone(), users, 3).await.unwrap();
    let alice = vec!["alice".to_string()];
    builder.add_round(&alice, json!({})).await.unwrap();
    builder.add_round(&alice, json!({})).await.unwrap();

    let calls = store.get_calls();
    assert_eq!(
        calls,
        vec![
            StoreCall::OpenMatch { num_rounds: 3 },
            StoreCall::AppendRound { match_id: 1 },
            StoreCall::AppendRound { match_id: 1 },
            StoreCall::FinalizeMatch {
                match_id: 1,
                winners: alice.clone(),
            },
        ]
    );

    // The finalized match shows up completed in the log
    let matches = store.load_all_matches().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].complete);
    assert_eq!(matches[0].winners, alice);
}

#[tokio::test]
async fn test_floor_holds_across_a_losing_streak() {
    let (store, users) = create_test_system(&["alice", "bob"]).await;

    for _ in 0..25 {
        play_match(store.clone(), &users, 1, "bob").await;
    }

    let hooks = create_test_hooks();
    let replay = StandingsReplay::new(store);
    let rankings = replay.calculate(&hooks).await.unwrap();

    let floor = hooks.engine().floor();
    let alice: &UserStatistics = rankings
        .iter()
        .find(|(user, _)| user.id == "alice")
        .map(|(_, stats)| stats)
        .unwrap();

    assert!(alice.rating >= floor);
    assert_eq!(alice.wins, 0);
    assert_eq!(alice.losses(), 25);
}
