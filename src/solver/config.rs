// Configuration for the stochastic key search
//
// The search is heuristic and carries no termination proof, so every run is
// bounded by an iteration budget. Restarts and the acceptance rule are the
// two knobs that trade run time against the chance of escaping local optima.

use crate::error::{CrackError, Result};
use serde::{Deserialize, Serialize};

/// Rule for accepting a proposed swap that does not improve the score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Acceptance {
    /// Pure hill climbing: only strictly better keys are accepted
    #[default]
    Greedy,
    /// Simulated annealing: a worse key is accepted with probability
    /// `exp(-delta / T)`, where `T` starts at `initial_temperature` after every
    /// restart and is multiplied by `cooling_rate` each iteration
    Annealing {
        initial_temperature: f64,
        cooling_rate: f64,
    },
}

/// Parameters of one stochastic search attempt
///
/// # Example
/// ```
/// use subcrack::solver::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.max_iterations, 50_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Swap proposals evaluated before the attempt gives up
    pub max_iterations: usize,

    /// Consecutive non-improving proposals that trigger a random restart
    ///
    /// A 26-symbol key has 325 distinct swaps, so a window of a few thousand
    /// proposals has almost certainly tried all of them.
    pub stagnation_limit: usize,

    /// Stop as soon as the best score is at or below this value
    pub target_score: Option<f64>,

    pub acceptance: Acceptance,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50_000,
            stagnation_limit: 2_000,
            target_score: None,
            acceptance: Acceptance::Greedy,
        }
    }
}

impl SearchConfig {
    /// Short attempts, suited to running many of them
    pub fn quick() -> Self {
        Self {
            max_iterations: 10_000,
            stagnation_limit: 1_000,
            ..Self::default()
        }
    }

    /// Long attempts with more restarts, for short or awkward ciphertexts
    pub fn thorough() -> Self {
        Self {
            max_iterations: 200_000,
            stagnation_limit: 3_000,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(CrackError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if self.stagnation_limit == 0 {
            return Err(CrackError::InvalidConfig(
                "stagnation_limit must be at least 1".to_string(),
            ));
        }

        if let Some(target) = self.target_score {
            if !target.is_finite() {
                return Err(CrackError::InvalidConfig(format!(
                    "target_score must be finite, got {}",
                    target
                )));
            }
        }

        if let Acceptance::Annealing {
            initial_temperature,
            cooling_rate,
        } = self.acceptance
        {
            if !(initial_temperature.is_finite() && initial_temperature > 0.0) {
                return Err(CrackError::InvalidConfig(format!(
                    "initial_temperature must be positive, got {}",
                    initial_temperature
                )));
            }
            if !(cooling_rate > 0.0 && cooling_rate <= 1.0) {
                return Err(CrackError::InvalidConfig(format!(
                    "cooling_rate must be in (0, 1], got {}",
                    cooling_rate
                )));
            }
        }

        Ok(())
    }
}
