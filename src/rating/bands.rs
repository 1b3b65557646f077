//! Rating-banded lookup tables
//!
//! A band table maps ascending rating thresholds to values (K-factors,
//! divisions). The table is sorted once at construction and queried by
//! binary search: resolution picks the entry with the highest threshold
//! at or below the subject's rating, falling back to the lowest band
//! when the rating is below every threshold.

use crate::error::{LadderError, Result};
use serde::{Deserialize, Serialize};

/// A sorted table of (threshold, value) bands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandTable<T> {
    bands: Vec<(i64, T)>,
}

impl<T> BandTable<T> {
    /// Build a band table, sorting entries by threshold.
    ///
    /// Fails on an empty table or duplicate thresholds.
    pub fn new(mut bands: Vec<(i64, T)>) -> Result<Self> {
        if bands.is_empty() {
            return Err(LadderError::Configuration {
                message: "band table cannot be empty".to_string(),
            }
            .into());
        }

        bands.sort_by_key(|(threshold, _)| *threshold);

        if bands
            .windows(2)
            .any(|pair| pair[0].0 == pair[1].0)
        {
            return Err(LadderError::Configuration {
                message: "band table contains duplicate thresholds".to_string(),
            }
            .into());
        }

        Ok(Self { bands })
    }

    /// Resolve the band for a rating: the entry with the highest threshold
    /// that is at or below it, or the lowest band when below all of them.
    pub fn resolve(&self, rating: i64) -> &T {
        let idx = self.bands.partition_point(|(threshold, _)| *threshold <= rating);
        if idx == 0 {
            &self.bands[0].1
        } else {
            &self.bands[idx - 1].1
        }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(i64, T)> {
        self.bands.iter()
    }
}

/// A rating division: a named skill bucket with its own K-factor and
/// win/loss multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Division {
    /// The name of the division
    pub name: String,
    /// The K-factor to use while in this division
    pub k: f64,
    /// Multiplier applied to rating adjustments after a win
    pub gain: f64,
    /// Multiplier applied to rating adjustments after a loss
    pub loss: f64,
}

/// K-factor resolution: a fixed constant or a ratings-banded table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KFactor {
    Fixed(f64),
    Banded(BandTable<f64>),
}

impl KFactor {
    /// Resolve the K-factor for a rating
    pub fn resolve(&self, rating: i64) -> f64 {
        match self {
            KFactor::Fixed(k) => *k,
            KFactor::Banded(table) => *table.resolve(rating),
        }
    }
}
