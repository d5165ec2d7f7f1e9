//! Engine configuration with layered resolution.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`BUDDY_*`)
//! 2. Config file (`buddy.toml`)
//! 3. Compiled defaults

pub mod allocation_config;
pub mod defaults;
pub mod discovery_config;
pub mod observability_config;
pub mod scoring_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use allocation_config::AllocationConfig;
pub use discovery_config::DiscoveryConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::{OverlapFormula, ScoringConfig};
pub use storage_config::StorageConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuddyConfig {
    pub storage: StorageConfig,
    pub scoring: ScoringConfig,
    pub allocation: AllocationConfig,
    pub discovery: DiscoveryConfig,
    pub observability: ObservabilityConfig,
}

impl BuddyConfig {
    /// Load configuration from an optional TOML file, then apply `BUDDY_*`
    /// environment overrides and validate the result.
    ///
    /// A missing file is not an error; compiled defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => {
                let content =
                    std::fs::read_to_string(p).map_err(|e| ConfigError::ReadError {
                        path: p.display().to_string(),
                        message: e.to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: p.display().to_string(),
                    message: e.to_string(),
                })?
            }
            _ => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scoring;
        if !s.loneliness_weight.is_finite() || !s.leisure_weight.is_finite() {
            return Err(invalid("scoring.*_weight", "weights must be finite"));
        }
        if s.loneliness_weight < 0.0 || s.leisure_weight < 0.0 {
            return Err(invalid("scoring.*_weight", "weights must be non-negative"));
        }
        if s
            .category_similarity
            .iter()
            .chain([&s.missing_category_similarity, &s.empty_leisure_similarity])
            .any(|v| !(0.0..=1.0).contains(v))
        {
            return Err(invalid(
                "scoring.category_similarity",
                "similarities must be between 0.0 and 1.0",
            ));
        }
        if !s.min_score.is_finite() || s.min_score < 0.0 || s.min_score > s.max_score() {
            return Err(invalid(
                "scoring.min_score",
                "must be between 0 and the sum of the term weights",
            ));
        }

        let a = &self.allocation;
        if a.group_capacity == 0 {
            return Err(invalid("allocation.group_capacity", "must be greater than 0"));
        }
        if a.group_minimum > a.group_capacity {
            return Err(invalid(
                "allocation.group_minimum",
                "must not exceed allocation.group_capacity",
            ));
        }

        if !self.discovery.similar_min_score.is_finite() {
            return Err(invalid(
                "discovery.similar_min_score",
                "must be a finite number",
            ));
        }
        if self.discovery.mood_window == 0 {
            return Err(invalid("discovery.mood_window", "must be greater than 0"));
        }
        if self.storage.read_pool_size == 0 {
            return Err(invalid("storage.read_pool_size", "must be greater than 0"));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `BUDDY_DB_PATH`, `BUDDY_GROUP_CAPACITY`, etc.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BUDDY_DB_PATH") {
            self.storage.db_path = val;
        }
        if let Some(v) = env_parse("BUDDY_READ_POOL_SIZE") {
            self.storage.read_pool_size = v;
        }
        if let Some(v) = env_parse("BUDDY_LONELINESS_WEIGHT") {
            self.scoring.loneliness_weight = v;
        }
        if let Some(v) = env_parse("BUDDY_LEISURE_WEIGHT") {
            self.scoring.leisure_weight = v;
        }
        if let Some(v) = env_parse("BUDDY_MIN_SCORE") {
            self.scoring.min_score = v;
        }
        if let Ok(val) = std::env::var("BUDDY_OVERLAP_FORMULA") {
            match val.to_ascii_lowercase().as_str() {
                "jaccard" => self.scoring.overlap_formula = OverlapFormula::Jaccard,
                "over_larger" => self.scoring.overlap_formula = OverlapFormula::OverLarger,
                _ => {}
            }
        }
        if let Some(v) = env_parse("BUDDY_GROUP_CAPACITY") {
            self.allocation.group_capacity = v;
        }
        if let Some(v) = env_parse("BUDDY_MAX_CAPACITY_RETRIES") {
            self.allocation.max_capacity_retries = v;
        }
        if let Some(v) = env_parse("BUDDY_MAX_CANDIDATES") {
            self.discovery.max_candidates = v;
        }
        if let Ok(val) = std::env::var("BUDDY_LOG_LEVEL") {
            self.observability.log_level = val;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
