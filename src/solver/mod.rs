// Key search over the space of alphabet permutations
//
// Two interchangeable strategies implement `KeySearch`:
//
// - `StochasticSearch`: hill climbing over single swaps with random restarts
//   (optionally simulated annealing). Different seeds explore different parts
//   of the key space, so repeating it is meaningful.
// - `RankMatch`: deterministic frequency-rank matching. Same input, same key.
//
// Neither strategy fails on a poor result. They return the best key they saw
// and leave judging it to the caller (crib matching in `retry`).

mod config;
mod rank_match;
mod stochastic;

pub use config::{Acceptance, SearchConfig};
pub use rank_match::RankMatch;
pub use stochastic::StochasticSearch;

use crate::key::Key;
use crate::scorer::{Scorer, TextProfile};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Which search strategy to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Hill climbing with random restarts
    #[default]
    Stochastic,
    /// Frequency rank matching, no search
    Deterministic,
    /// One rank-matching check, then stochastic attempts
    Combined,
}

/// Why a search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Iteration budget used up
    BudgetExhausted,
    /// Best score reached the configured target
    ThresholdReached,
    /// Cancel token fired mid-search
    Cancelled,
    /// Single-shot method, nothing to terminate
    Deterministic,
}

/// Best key found by one search run
#[derive(Debug, Clone)]
pub struct Solution {
    pub key: Key,
    /// Score of `key` (lower is better)
    pub score: f64,
    pub iterations: usize,
    pub restarts: usize,
    pub termination: Termination,
}

/// A search strategy over substitution keys
pub trait KeySearch: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Whether runs with different seeds can produce different keys
    fn is_randomized(&self) -> bool;

    /// Find the best key for the profiled ciphertext
    ///
    /// `profile` must have been built over the scorer's alphabet.
    fn search(
        &self,
        scorer: &Scorer,
        profile: &TextProfile,
        seed: u64,
        cancel: &CancelToken,
    ) -> Solution;
}

/// Cooperative cancellation flag shared between a caller and running searches
///
/// A child token is cancelled when it or any of its ancestors is cancelled;
/// cancelling a child leaves its ancestors untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    ancestors: Vec<Arc<AtomicBool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also observes this token's cancellation
    pub fn child(&self) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(Arc::clone(&self.flag));
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            ancestors,
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .ancestors
                .iter()
                .any(|ancestor| ancestor.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests;
