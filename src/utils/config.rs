//! Configuration and constants for the analysis pipeline.
//!
//! Defaults live here as constants; [`AnalysisConfig`] is the TOML-backed
//! view of them that the CLI loads and overrides from flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Current output schema version for sessions and reports
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Fraction of the session duration used to derive the cutoff time
pub const DEFAULT_CUTOFF_PERCENTAGE: f64 = 0.10;

/// Upper bound on simple cycles enumerated while breaking cycles.
/// Densely recursive graphs can have combinatorially many cycles.
pub const DEFAULT_MAX_CYCLES: usize = 10_000;

/// Number of hot functions kept in reports
pub const DEFAULT_TOP_FUNCTIONS: usize = 20;

/// Bucket for inline time outside every tracked category
pub const OTHER_CATEGORY: &str = "Other";

/// Settings that shape how a session is turned into display views
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Fraction (0.0 - 1.0) of the session duration below which nodes are pruned
    pub cutoff_percentage: f64,

    /// Key prefixes whose inline time is charted separately
    pub categories: Vec<String>,

    /// Remove cycle edges so the graph can be drawn as a tree
    pub break_cycles: bool,

    /// Cycle enumeration budget
    pub max_cycles: usize,

    /// Number of hot functions listed in reports
    pub top_functions: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cutoff_percentage: DEFAULT_CUTOFF_PERCENTAGE,
            categories: Vec::new(),
            break_cycles: true,
            max_cycles: DEFAULT_MAX_CYCLES,
            top_functions: DEFAULT_TOP_FUNCTIONS,
        }
    }
}

impl AnalysisConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cutoff_percentage.is_finite()
            || !(0.0..=1.0).contains(&self.cutoff_percentage)
        {
            return Err(ConfigError::InvalidValue(format!(
                "cutoff_percentage must be between 0.0 and 1.0, got {}",
                self.cutoff_percentage
            )));
        }

        if self.max_cycles == 0 {
            return Err(ConfigError::InvalidValue(
                "max_cycles must be greater than 0".to_string(),
            ));
        }

        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "categories cannot contain empty names".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load analysis settings from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Parse` - If TOML is invalid
/// * `ConfigError::InvalidValue` - If a value is out of range
///
/// # Example
/// ```ignore
/// let config = load_config("analysis.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
