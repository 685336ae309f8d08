use super::{Acceptance, CancelToken, KeySearch, SearchConfig, Solution, Termination};
use crate::error::Result;
use crate::key::Key;
use crate::scorer::{Scorer, TextProfile};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hill climbing over single swaps with random restarts
///
/// Each iteration proposes swapping the images of two random positions of
/// the current key. Better keys are always accepted; worse ones only under
/// [`Acceptance::Annealing`]. After `stagnation_limit` proposals without an
/// improvement the walk restarts from a fresh random key. The best key seen
/// across all restarts is returned.
#[derive(Debug, Clone)]
pub struct StochasticSearch {
    config: SearchConfig,
}

/// Key and score of the walk's position
#[derive(Clone)]
struct Candidate {
    key: Key,
    score: f64,
}

impl Candidate {
    fn random(n: usize, scorer: &Scorer, profile: &TextProfile, rng: &mut StdRng) -> Self {
        let key = Key::random(n, rng);
        let score = scorer.score_under(profile, &key);
        Self { key, score }
    }
}

impl StochasticSearch {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn initial_temperature(&self) -> f64 {
        match self.config.acceptance {
            Acceptance::Greedy => 0.0,
            Acceptance::Annealing {
                initial_temperature,
                ..
            } => initial_temperature,
        }
    }

    fn cool(&self, temperature: f64) -> f64 {
        match self.config.acceptance {
            Acceptance::Greedy => 0.0,
            Acceptance::Annealing { cooling_rate, .. } => temperature * cooling_rate,
        }
    }

    fn target_reached(&self, score: f64) -> bool {
        self.config.target_score.is_some_and(|target| score <= target)
    }
}

/// Two distinct positions in `0..n`; requires `n >= 2`
fn distinct_pair(rng: &mut StdRng, n: usize) -> (usize, usize) {
    let i = rng.gen_range(0..n);
    let mut j = rng.gen_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

/// Metropolis criterion for a move that is `delta` worse
fn accept_worse(delta: f64, temperature: f64, rng: &mut StdRng) -> bool {
    temperature > 0.0 && rng.gen::<f64>() < (-delta / temperature).exp()
}

impl KeySearch for StochasticSearch {
    fn name(&self) -> &'static str {
        "stochastic"
    }

    fn is_randomized(&self) -> bool {
        true
    }

    fn search(
        &self,
        scorer: &Scorer,
        profile: &TextProfile,
        seed: u64,
        cancel: &CancelToken,
    ) -> Solution {
        let n = scorer.alphabet().len();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut current = Candidate::random(n, scorer, profile, &mut rng);
        let mut best = current.clone();
        let mut temperature = self.initial_temperature();
        let mut stale = 0usize;
        let mut restarts = 0usize;
        let mut iterations = 0usize;

        let termination = loop {
            if self.target_reached(best.score) {
                break Termination::ThresholdReached;
            }
            // A single-symbol alphabet has exactly one key
            if iterations >= self.config.max_iterations || n < 2 {
                break Termination::BudgetExhausted;
            }
            if cancel.is_cancelled() {
                break Termination::Cancelled;
            }
            iterations += 1;

            let (i, j) = distinct_pair(&mut rng, n);
            let key = current.key.swap(i, j);
            let score = scorer.score_under(profile, &key);

            if score < current.score {
                current = Candidate { key, score };
                stale = 0;
                if score < best.score {
                    tracing::trace!(iteration = iterations, score, "improved");
                    best = current.clone();
                }
            } else {
                if accept_worse(score - current.score, temperature, &mut rng) {
                    current = Candidate { key, score };
                }
                stale += 1;
                if stale >= self.config.stagnation_limit {
                    restarts += 1;
                    tracing::trace!(
                        iteration = iterations,
                        restarts,
                        best = best.score,
                        "stagnant, restarting"
                    );
                    current = Candidate::random(n, scorer, profile, &mut rng);
                    if current.score < best.score {
                        best = current.clone();
                    }
                    temperature = self.initial_temperature();
                    stale = 0;
                    continue;
                }
            }

            temperature = self.cool(temperature);
        };

        tracing::debug!(
            seed,
            iterations,
            restarts,
            score = best.score,
            ?termination,
            "stochastic search finished"
        );

        Solution {
            key: best.key,
            score: best.score,
            iterations,
            restarts,
            termination,
        }
    }
}
