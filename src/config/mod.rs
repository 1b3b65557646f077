//! Configuration management for the ladder engine
//!
//! This module handles rating configuration loading from TOML files and
//! environment variables, validation, and default values.

pub mod rating;

// Re-export commonly used types
pub use rating::{DivisionConfig, KFactorConfig, RatingConfig};
