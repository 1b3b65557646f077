//! Rating system configuration
//!
//! This module defines the primary configuration structures for the rating
//! engine, including TOML loading, environment variable overrides and
//! validation.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

fn default_multiplier() -> f64 {
    1.0
}

/// Configuration for a single rating division
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionConfig {
    /// The name of the division
    pub name: String,
    /// The skill rating a user has to reach to be in this division
    pub threshold: i64,
    /// The K-factor to use while in this division
    pub k: f64,
    /// If a user wins a match while in this division, the rating
    /// adjustment is multiplied by this value
    #[serde(default = "default_multiplier")]
    pub gain: f64,
    /// If a user loses a match while in this division, the rating
    /// adjustment is multiplied by this value
    #[serde(default = "default_multiplier")]
    pub loss: f64,
}

/// K-factor selection: either a fixed constant or a ratings-banded table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KFactorConfig {
    Fixed(f64),
    Banded(Vec<KBandConfig>),
}

/// One entry of a ratings-banded K-factor table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KBandConfig {
    pub threshold: i64,
    pub k: f64,
}

/// Main rating engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Initial rating for new users
    pub initial_rating: i64,
    /// Rating adjustments never set a user's rating below this value
    pub floor: i64,
    /// A user's first matches are rated under placement rules
    pub placement_matches: u32,
    /// K-factor used during placement matches
    pub placement_k: f64,
    /// Standalone K-factor resolution, independent of divisions
    pub k_factor: KFactorConfig,
    /// Division table, thresholds in ascending order
    pub divisions: Vec<DivisionConfig>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1000,
            floor: 950,
            placement_matches: 3,
            placement_k: 40.0,
            k_factor: KFactorConfig::Banded(vec![
                KBandConfig {
                    threshold: 0,
                    k: 60.0,
                },
                KBandConfig {
                    threshold: 950,
                    k: 70.0,
                },
                KBandConfig {
                    threshold: 1000,
                    k: 70.0,
                },
                KBandConfig {
                    threshold: 1100,
                    k: 80.0,
                },
            ]),
            divisions: vec![
                DivisionConfig {
                    name: "C".to_string(),
                    threshold: 0,
                    k: 48.0,
                    gain: 1.5,
                    loss: 0.5,
                },
                DivisionConfig {
                    name: "B".to_string(),
                    threshold: 1000,
                    k: 32.0,
                    gain: 1.0,
                    loss: 1.0,
                },
                DivisionConfig {
                    name: "A".to_string(),
                    threshold: 1050,
                    k: 24.0,
                    gain: 1.0,
                    loss: 1.0,
                },
                DivisionConfig {
                    name: "S".to_string(),
                    threshold: 1100,
                    k: 16.0,
                    gain: 1.0,
                    loss: 1.5,
                },
            ],
        }
    }
}

impl RatingConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| anyhow!("Invalid rating configuration: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to read rating configuration {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Self::from_toml(&contents)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(initial) = env::var("RATING_INITIAL") {
            config.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_INITIAL value: {}", initial))?;
        }
        if let Ok(floor) = env::var("RATING_FLOOR") {
            config.floor = floor
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_FLOOR value: {}", floor))?;
        }
        if let Ok(matches) = env::var("PLACEMENT_MATCHES") {
            config.placement_matches = matches
                .parse()
                .map_err(|_| anyhow!("Invalid PLACEMENT_MATCHES value: {}", matches))?;
        }
        if let Ok(k) = env::var("PLACEMENT_K") {
            config.placement_k = k
                .parse()
                .map_err(|_| anyhow!("Invalid PLACEMENT_K value: {}", k))?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &RatingConfig) -> Result<()> {
    if config.divisions.is_empty() {
        return Err(anyhow!("Division table cannot be empty"));
    }

    for division in &config.divisions {
        if division.name.is_empty() {
            return Err(anyhow!("Division name cannot be empty"));
        }
        if division.k <= 0.0 || !division.k.is_finite() {
            return Err(anyhow!(
                "Division {} K-factor must be positive",
                division.name
            ));
        }
        if division.gain <= 0.0 || division.loss <= 0.0 {
            return Err(anyhow!(
                "Division {} multipliers must be positive",
                division.name
            ));
        }
    }

    if let KFactorConfig::Banded(bands) = &config.k_factor {
        if bands.is_empty() {
            return Err(anyhow!("Banded K-factor table cannot be empty"));
        }
        for band in bands {
            if band.k <= 0.0 || !band.k.is_finite() {
                return Err(anyhow!("K-factor band values must be positive"));
            }
        }
    }

    if config.placement_k <= 0.0 || !config.placement_k.is_finite() {
        return Err(anyhow!("Placement K-factor must be positive"));
    }
    if config.initial_rating < config.floor {
        return Err(anyhow!("Initial rating cannot be below the rating floor"));
    }

    Ok(())
}
