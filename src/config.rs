//! Run configuration loaded from TOML
//!
//! Every section is optional; missing keys fall back to their defaults.
//!
//! ```toml
//! method = "combined"
//!
//! [scoring]
//! unigram = 1.0
//! digram = 1.5
//!
//! [search]
//! max_iterations = 80000
//! stagnation_limit = 2500
//! acceptance = { rule = "annealing", initial_temperature = 0.05, cooling_rate = 0.9995 }
//!
//! [retry]
//! max_attempts = 40
//! workers = 4
//! seed = 7
//! ```

use crate::error::{CrackError, Result};
use crate::retry::RetryConfig;
use crate::scorer::ScoreWeights;
use crate::solver::{Method, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration shipped with the binary, mirroring [`CrackConfig::default`]
pub const DEFAULT_TOML: &str = include_str!("../subcrack-default.toml");

/// Everything a `crack` run needs besides the ciphertext and cribs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrackConfig {
    pub method: Method,
    pub scoring: ScoreWeights,
    pub search: SearchConfig,
    pub retry: RetryConfig,
}

impl CrackConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CrackError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = crate::error::read_text_file(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CrackError::InvalidConfig(e.to_string()))
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.search.validate()?;
        self.retry.validate()
    }
}
