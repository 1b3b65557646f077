//! Rating engine combining Elo math with divisions, placement and floors
//!
//! The engine is built once from a [`RatingConfig`] and resolves divisions
//! and K-factors through pre-sorted band tables. It owns the full
//! adjustment pipeline: Elo delta, division multiplier, floor clamp.

use crate::config::{KFactorConfig, RatingConfig};
use crate::error::Result;
use crate::rating::bands::{BandTable, Division, KFactor};
use crate::rating::elo;
use serde::{Deserialize, Serialize};
use skillratings::Outcomes;
use tracing::debug;

/// Result of a single rating adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingAdjustment {
    pub old_rating: i64,
    pub new_rating: i64,
    /// Applied delta, after multipliers and floor clamping
    pub delta: i64,
    /// Name of the division the adjustment was rated under
    pub division: String,
    /// Whether placement rules were in effect
    pub placement: bool,
}

/// Resolves divisions and K-factors and computes rating adjustments
#[derive(Debug, Clone)]
pub struct RatingEngine {
    divisions: BandTable<Division>,
    k_factor: KFactor,
    placement: Division,
    placement_matches: u32,
    floor: i64,
    initial_rating: i64,
}

impl RatingEngine {
    /// Build an engine from configuration, sorting the band tables once
    pub fn new(config: &RatingConfig) -> Result<Self> {
        crate::config::rating::validate_config(config)?;

        let divisions = BandTable::new(
            config
                .divisions
                .iter()
                .map(|d| {
                    (
                        d.threshold,
                        Division {
                            name: d.name.clone(),
                            k: d.k,
                            gain: d.gain,
                            loss: d.loss,
                        },
                    )
                })
                .collect(),
        )?;

        let k_factor = match &config.k_factor {
            KFactorConfig::Fixed(k) => KFactor::Fixed(*k),
            KFactorConfig::Banded(bands) => KFactor::Banded(BandTable::new(
                bands.iter().map(|band| (band.threshold, band.k)).collect(),
            )?),
        };

        Ok(Self {
            divisions,
            k_factor,
            placement: Division {
                name: "Placement".to_string(),
                k: config.placement_k,
                gain: 1.0,
                loss: 1.0,
            },
            placement_matches: config.placement_matches,
            floor: config.floor,
            initial_rating: config.initial_rating,
        })
    }

    pub fn initial_rating(&self) -> i64 {
        self.initial_rating
    }

    pub fn floor(&self) -> i64 {
        self.floor
    }

    pub fn placement_matches(&self) -> u32 {
        self.placement_matches
    }

    /// The division this rating translates to
    pub fn division_for(&self, rating: i64) -> &Division {
        self.divisions.resolve(rating)
    }

    /// Resolve the standalone K-factor for a rating
    pub fn resolve_k(&self, rating: i64) -> f64 {
        self.k_factor.resolve(rating)
    }

    /// Whether a user with this many recorded matches is still in placement
    pub fn is_placement(&self, matches_played: u32) -> bool {
        matches_played < self.placement_matches
    }

    /// The division used for rating a match: a dedicated placement division
    /// while the user's recorded matches are below the placement threshold,
    /// the regular banded lookup afterwards.
    pub fn effective_division(&self, rating: i64, matches_played: u32) -> &Division {
        if self.is_placement(matches_played) {
            &self.placement
        } else {
            self.division_for(rating)
        }
    }

    /// Clamp a proposed delta so the resulting rating never falls below the
    /// floor. The delta shrinks just enough that the new rating equals the
    /// floor exactly.
    pub fn clamp_to_floor(&self, rating: i64, delta: i64) -> i64 {
        if rating + delta < self.floor {
            self.floor - rating
        } else {
            delta
        }
    }

    /// Full adjustment pipeline for one participant of a match: Elo delta
    /// under the effective division's K-factor, win/loss multiplier
    /// (rounded up), then floor clamp.
    pub fn rate(
        &self,
        rating: i64,
        opponent_rating: i64,
        outcome: Outcomes,
        matches_played: u32,
    ) -> Result<RatingAdjustment> {
        let placement = self.is_placement(matches_played);
        let division = self.effective_division(rating, matches_played).clone();

        let raw = elo::adjust(
            rating as f64,
            opponent_rating as f64,
            elo::score_for(outcome),
            division.k,
        )?;

        let multiplier = match outcome {
            Outcomes::WIN => division.gain,
            Outcomes::LOSS => division.loss,
            Outcomes::DRAW => 1.0,
        };
        let scaled = (raw as f64 * multiplier).ceil() as i64;
        let delta = self.clamp_to_floor(rating, scaled);

        debug!(
            rating,
            opponent_rating,
            delta,
            division = %division.name,
            placement,
            "rating adjusted"
        );

        Ok(RatingAdjustment {
            old_rating: rating,
            new_rating: rating + delta,
            delta,
            division: division.name,
            placement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_engine() -> RatingEngine {
        RatingEngine::new(&RatingConfig::default()).unwrap()
    }

    #[test]
    fn test_division_resolution_scenario() {
        let engine = create_test_engine();

        assert_eq!(engine.division_for(1075).name, "A");
        assert_eq!(engine.division_for(999).name, "C");
        assert_eq!(engine.division_for(1100).name, "S");
    }

    #[test]
    fn test_resolve_k_banded() {
        let engine = create_test_engine();

        assert_eq!(engine.resolve_k(500), 60.0);
        assert_eq!(engine.resolve_k(975), 70.0);
        assert_eq!(engine.resolve_k(1150), 80.0);
    }

    #[test]
    fn test_placement_uses_dedicated_division() {
        let engine = create_test_engine();

        assert!(engine.is_placement(0));
        assert!(engine.is_placement(2));
        assert!(!engine.is_placement(3));

        let placement = engine.effective_division(1000, 0);
        assert_eq!(placement.name, "Placement");
        assert_eq!(placement.k, 40.0);

        let regular = engine.effective_division(1000, 3);
        assert_eq!(regular.name, "B");
    }

    #[test]
    fn test_rate_placement_win() {
        let engine = create_test_engine();

        // Equal ratings under placement K = 40: round(40 * 0.5) = 20
        let adj = engine.rate(1000, 1000, Outcomes::WIN, 0).unwrap();
        assert!(adj.placement);
        assert_eq!(adj.delta, 20);
        assert_eq!(adj.new_rating, 1020);
        assert_eq!(adj.division, "Placement");
    }

    #[test]
    fn test_rate_established_win_and_loss() {
        let engine = create_test_engine();

        // Division B: K = 32, no multipliers
        let win = engine.rate(1000, 1000, Outcomes::WIN, 10).unwrap();
        assert!(!win.placement);
        assert_eq!(win.delta, 16);
        assert_eq!(win.division, "B");

        let loss = engine.rate(1000, 1000, Outcomes::LOSS, 10).unwrap();
        assert_eq!(loss.delta, -16);
    }

    #[test]
    fn test_loss_multiplier_rounds_up() {
        let engine = create_test_engine();

        // Division C at 980: K = 48, loss multiplier 0.5.
        // round(48 * -0.5) = -24, ceil(-24 * 0.5) = -12
        let adj = engine.rate(980, 980, Outcomes::LOSS, 10).unwrap();
        assert_eq!(adj.division, "C");
        assert_eq!(adj.delta, -12);
        assert_eq!(adj.new_rating, 968);
    }

    #[test]
    fn test_floor_clamps_delta_exactly() {
        let engine = create_test_engine();

        // A loss at 960 would land at 948; the clamp stops it at the floor
        let adj = engine.rate(960, 960, Outcomes::LOSS, 10).unwrap();
        assert_eq!(adj.new_rating, 950);
        assert_eq!(adj.delta, -10);

        // Already at the floor: losses no longer move the rating
        let adj = engine.rate(950, 950, Outcomes::LOSS, 10).unwrap();
        assert_eq!(adj.new_rating, 950);
        assert_eq!(adj.delta, 0);
    }

    #[test]
    fn test_clamp_leaves_normal_deltas_alone() {
        let engine = create_test_engine();

        assert_eq!(engine.clamp_to_floor(1200, -16), -16);
        assert_eq!(engine.clamp_to_floor(1200, 16), 16);
        assert_eq!(engine.clamp_to_floor(955, -24), -5);
    }

    #[test]
    fn test_draw_uses_unit_multiplier() {
        let engine = create_test_engine();

        let adj = engine.rate(1000, 1000, Outcomes::DRAW, 10).unwrap();
        assert_eq!(adj.delta, 0);
    }

    proptest! {
        #[test]
        fn prop_rating_never_below_floor(
            opponents in proptest::collection::vec(0i64..3000, 1..40)
        ) {
            let engine = create_test_engine();
            let mut rating = engine.initial_rating();

            for (i, opponent) in opponents.iter().enumerate() {
                let adj = engine
                    .rate(rating, *opponent, Outcomes::LOSS, i as u32)
                    .unwrap();
                rating = adj.new_rating;
                prop_assert!(rating >= engine.floor());
            }
        }

        #[test]
        fn prop_win_never_decreases_rating(
            rating in 950i64..3000,
            opponent in 0i64..3000,
            matches_played in 0u32..20
        ) {
            let engine = create_test_engine();
            let adj = engine
                .rate(rating, opponent, Outcomes::WIN, matches_played)
                .unwrap();
            prop_assert!(adj.new_rating >= rating);
        }
    }
}
