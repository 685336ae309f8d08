//! Crib-driven retry loop around the key searches
//!
//! A stochastic search lands in a different local optimum for every seed, so
//! the driver keeps running fresh attempts until every crib (a known or
//! guessed plaintext fragment) shows up in the decryption. Unlike the
//! "loop until found" scripts this replaces, the loop is always bounded by
//! `max_attempts` and can be cancelled from outside.
//!
//! With `workers > 1` attempts run on scoped threads; the first attempt that
//! satisfies the cribs cancels the others.

use crate::cipher;
use crate::config::CrackConfig;
use crate::error::{CrackError, Result};
use crate::model::FrequencyModel;
use crate::scorer::{Scorer, TextProfile};
use crate::solver::{
    CancelToken, KeySearch, Method, RankMatch, Solution, StochasticSearch,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Parameters of the retry loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Upper bound on search attempts, deterministic ones included
    pub max_attempts: usize,

    /// Threads running attempts concurrently
    pub workers: usize,

    /// Attempt `k` uses seed `seed + k`; random seeds when unset
    pub seed: Option<u64>,

    /// Ignore case when matching cribs; matching is exact by default
    pub ignore_case_cribs: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            workers: 1,
            seed: None,
            ignore_case_cribs: false,
        }
    }
}

impl RetryConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(CrackError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(CrackError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn seed_for(&self, attempt: usize) -> u64 {
        match self.seed {
            Some(base) => base.wrapping_add(attempt as u64),
            None => rand::thread_rng().gen(),
        }
    }
}

/// Known plaintext fragments that must all appear in a decryption
#[derive(Debug, Clone, Default)]
pub struct Cribs {
    fragments: Vec<String>,
    ignore_case: bool,
}

impl Cribs {
    /// Fragments are matched exactly unless `ignore_case` is set
    pub fn new<S: AsRef<str>>(fragments: &[S], ignore_case: bool) -> Self {
        let fragments = fragments
            .iter()
            .map(|f| {
                if ignore_case {
                    f.as_ref().to_lowercase()
                } else {
                    f.as_ref().to_string()
                }
            })
            .collect();
        Self {
            fragments,
            ignore_case,
        }
    }

    /// True when every fragment occurs in `plaintext`; vacuously true when empty
    pub fn all_present(&self, plaintext: &str) -> bool {
        if self.ignore_case {
            let folded = plaintext.to_lowercase();
            self.fragments.iter().all(|f| folded.contains(f.as_str()))
        } else {
            self.fragments.iter().all(|f| plaintext.contains(f.as_str()))
        }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// A decryption produced by one attempt
#[derive(Debug, Clone)]
pub struct Decryption {
    pub plaintext: String,
    pub solution: Solution,
    /// 1-based attempt number
    pub attempt: usize,
    /// Name of the search that produced it
    pub method: &'static str,
}

/// Result of a retry run
#[derive(Debug, Clone)]
pub enum RetryOutcome {
    /// All cribs found
    Found(Decryption),
    /// Attempt cap reached; `best` is the lowest-scoring decryption seen
    Exhausted {
        attempts: usize,
        best: Option<Decryption>,
    },
    /// Cancel token fired before the cribs were found
    Cancelled {
        attempts: usize,
        best: Option<Decryption>,
    },
}

impl RetryOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RetryOutcome::Found(_))
    }

    /// The winning decryption, or the best one seen
    pub fn decryption(&self) -> Option<&Decryption> {
        match self {
            RetryOutcome::Found(d) => Some(d),
            RetryOutcome::Exhausted { best, .. } | RetryOutcome::Cancelled { best, .. } => {
                best.as_ref()
            }
        }
    }

    /// Number of attempts made
    pub fn attempts(&self) -> usize {
        match self {
            RetryOutcome::Found(d) => d.attempt,
            RetryOutcome::Exhausted { attempts, .. } | RetryOutcome::Cancelled { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Runs searches until a decryption contains every crib
pub struct RetryDriver<'s> {
    scorer: &'s Scorer,
    searches: Vec<Box<dyn KeySearch>>,
    config: RetryConfig,
}

/// Bookkeeping shared by the sequential and parallel loops
struct Tally {
    attempts: usize,
    best: Option<Decryption>,
}

impl Tally {
    fn new() -> Self {
        Self {
            attempts: 0,
            best: None,
        }
    }

    fn record(&mut self, decryption: &Decryption) {
        self.attempts += 1;
        let better = match &self.best {
            Some(best) => decryption.solution.score < best.solution.score,
            None => true,
        };
        if better {
            self.best = Some(decryption.clone());
        }
    }
}

impl<'s> RetryDriver<'s> {
    pub fn new(scorer: &'s Scorer, config: RetryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scorer,
            searches: Vec::new(),
            config,
        })
    }

    /// Driver for the method, search, and retry settings of a [`CrackConfig`]
    pub fn from_config(
        scorer: &'s Scorer,
        model: &FrequencyModel,
        config: &CrackConfig,
    ) -> Result<Self> {
        let mut driver = Self::new(scorer, config.retry.clone())?;
        if matches!(config.method, Method::Deterministic | Method::Combined) {
            driver = driver.with_search(Box::new(RankMatch::new(model, scorer.alphabet())?));
        }
        if matches!(config.method, Method::Stochastic | Method::Combined) {
            driver = driver.with_search(Box::new(StochasticSearch::new(config.search.clone())?));
        }
        Ok(driver)
    }

    /// Add a search strategy
    ///
    /// Deterministic strategies run once, before any randomized attempt;
    /// randomized strategies then take turns until the attempt cap.
    pub fn with_search(mut self, search: Box<dyn KeySearch>) -> Self {
        self.searches.push(search);
        self
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Decrypt `ciphertext` until every crib appears, the cap is hit, or `cancel` fires
    pub fn run<S: AsRef<str>>(
        &self,
        ciphertext: &str,
        cribs: &[S],
        cancel: &CancelToken,
    ) -> Result<RetryOutcome> {
        if self.searches.is_empty() {
            return Err(CrackError::InvalidConfig(
                "retry driver has no search strategy".to_string(),
            ));
        }

        let cribs = Cribs::new(cribs, self.config.ignore_case_cribs);
        let profile = self.scorer.profile(ciphertext);
        let mut tally = Tally::new();

        for search in self.searches.iter().filter(|s| !s.is_randomized()) {
            if let Some(outcome) = self.stop_reason(&tally, cancel) {
                return Ok(outcome);
            }
            let decryption =
                self.attempt(search.as_ref(), ciphertext, &profile, tally.attempts + 1, cancel)?;
            tally.record(&decryption);
            if cribs.all_present(&decryption.plaintext) {
                return Ok(self.found(decryption));
            }
        }

        let randomized: Vec<&dyn KeySearch> = self
            .searches
            .iter()
            .filter(|s| s.is_randomized())
            .map(|s| s.as_ref())
            .collect();
        if randomized.is_empty() {
            return Ok(RetryOutcome::Exhausted {
                attempts: tally.attempts,
                best: tally.best,
            });
        }

        if self.config.workers > 1 {
            self.run_parallel(&randomized, ciphertext, &profile, &cribs, cancel, tally)
        } else {
            self.run_sequential(&randomized, ciphertext, &profile, &cribs, cancel, tally)
        }
    }

    fn run_sequential(
        &self,
        searches: &[&dyn KeySearch],
        ciphertext: &str,
        profile: &TextProfile,
        cribs: &Cribs,
        cancel: &CancelToken,
        mut tally: Tally,
    ) -> Result<RetryOutcome> {
        loop {
            if let Some(outcome) = self.stop_reason(&tally, cancel) {
                return Ok(outcome);
            }
            let attempt = tally.attempts + 1;
            let search = searches[attempt % searches.len()];
            let decryption = self.attempt(search, ciphertext, profile, attempt, cancel)?;
            tally.record(&decryption);
            if cribs.all_present(&decryption.plaintext) {
                return Ok(self.found(decryption));
            }
        }
    }

    fn run_parallel(
        &self,
        searches: &[&dyn KeySearch],
        ciphertext: &str,
        profile: &TextProfile,
        cribs: &Cribs,
        cancel: &CancelToken,
        mut tally: Tally,
    ) -> Result<RetryOutcome> {
        let stop = cancel.child();
        let next_attempt = AtomicUsize::new(tally.attempts + 1);
        let (sender, receiver) = crossbeam::channel::unbounded::<Result<Decryption>>();

        let found = crossbeam::thread::scope(|scope| -> Result<Option<Decryption>> {
            for worker in 0..self.config.workers {
                let sender = sender.clone();
                let stop = &stop;
                let next_attempt = &next_attempt;
                scope.spawn(move |_| {
                    tracing::trace!(worker, "worker started");
                    while !stop.is_cancelled() {
                        let attempt = next_attempt.fetch_add(1, Ordering::Relaxed);
                        if attempt > self.config.max_attempts {
                            break;
                        }
                        let search = searches[attempt % searches.len()];
                        let result = self.attempt(search, ciphertext, profile, attempt, stop);
                        if let Ok(decryption) = &result {
                            if cribs.all_present(&decryption.plaintext) {
                                stop.cancel();
                            }
                        }
                        if sender.send(result).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(sender);

            let mut winner: Option<Decryption> = None;
            for result in receiver.iter() {
                let decryption = match result {
                    Ok(decryption) => decryption,
                    Err(e) => {
                        stop.cancel();
                        return Err(e);
                    }
                };
                if winner.is_some() {
                    continue;
                }
                tally.record(&decryption);
                if cribs.all_present(&decryption.plaintext) {
                    winner = Some(decryption);
                }
            }
            Ok(winner)
        })
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;

        if let Some(decryption) = found {
            return Ok(self.found(decryption));
        }
        Ok(self
            .stop_reason(&tally, cancel)
            .unwrap_or(RetryOutcome::Exhausted {
                attempts: tally.attempts,
                best: tally.best,
            }))
    }

    /// Outcome to return before starting another attempt, if any
    fn stop_reason(&self, tally: &Tally, cancel: &CancelToken) -> Option<RetryOutcome> {
        if cancel.is_cancelled() {
            tracing::debug!(attempts = tally.attempts, "retry loop cancelled");
            return Some(RetryOutcome::Cancelled {
                attempts: tally.attempts,
                best: tally.best.clone(),
            });
        }
        if tally.attempts >= self.config.max_attempts {
            tracing::debug!(attempts = tally.attempts, "attempt cap reached");
            return Some(RetryOutcome::Exhausted {
                attempts: tally.attempts,
                best: tally.best.clone(),
            });
        }
        None
    }

    fn attempt(
        &self,
        search: &dyn KeySearch,
        ciphertext: &str,
        profile: &TextProfile,
        attempt: usize,
        cancel: &CancelToken,
    ) -> Result<Decryption> {
        let seed = self.config.seed_for(attempt);
        let solution = search.search(self.scorer, profile, seed, cancel);
        let plaintext = cipher::apply(ciphertext, self.scorer.alphabet(), &solution.key)?;
        tracing::debug!(
            attempt,
            method = search.name(),
            seed,
            score = solution.score,
            "attempt finished"
        );
        Ok(Decryption {
            plaintext,
            solution,
            attempt,
            method: search.name(),
        })
    }

    fn found(&self, decryption: Decryption) -> RetryOutcome {
        tracing::info!(
            attempt = decryption.attempt,
            method = decryption.method,
            score = decryption.solution.score,
            "cribs found"
        );
        RetryOutcome::Found(decryption)
    }
}
