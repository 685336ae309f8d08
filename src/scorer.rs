//! Plausibility scoring of candidate plaintexts
//!
//! The score is an average per-symbol cost (lower is better) made of two
//! terms:
//!
//! - a unigram term, `count(s) * -ln p(s)` summed over symbols, i.e. the
//!   cross-entropy of the text's letters against the language model
//! - a digram term, `-ln p(a, b)` summed over adjacent symbol pairs
//!
//! Probabilities are clamped to [`PROBABILITY_FLOOR`] so unseen digrams cost a
//! lot without costing infinity. Characters outside the alphabet contribute
//! nothing and break digram adjacency (pairs are word-internal).
//!
//! Scoring a candidate key never needs the decrypted text: a [`TextProfile`]
//! of the ciphertext holds every count the score depends on, and
//! [`Scorer::score_under`] relabels those counts through the key.

use crate::alphabet::Alphabet;
use crate::error::{CrackError, Result};
use crate::key::Key;
use crate::model::FrequencyModel;
use serde::{Deserialize, Serialize};

/// Smallest probability used when taking logarithms
pub const PROBABILITY_FLOOR: f64 = 1e-6;

/// Relative weight of the unigram and digram terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub unigram: f64,
    pub digram: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            unigram: 1.0,
            digram: 1.0,
        }
    }
}

impl ScoreWeights {
    /// Validate weights
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("unigram", self.unigram), ("digram", self.digram)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CrackError::InvalidConfig(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.unigram == 0.0 && self.digram == 0.0 {
            return Err(CrackError::InvalidConfig(
                "at least one score weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Symbol and digram counts of a text, gathered in one pass
#[derive(Debug, Clone, PartialEq)]
pub struct TextProfile {
    unigrams: Vec<u64>,
    /// Non-zero digram counts as (first, second, count)
    digrams: Vec<(usize, usize, u64)>,
    symbols: u64,
}

impl TextProfile {
    /// Count alphabet symbols and word-internal digrams of `text`
    pub fn new(text: &str, alphabet: &Alphabet) -> Self {
        let n = alphabet.len();
        let mut unigrams = vec![0u64; n];
        let mut pairs = vec![0u64; n * n];
        let mut symbols = 0u64;
        let mut previous: Option<usize> = None;

        for c in text.chars() {
            match alphabet.index_of(c) {
                Some(i) => {
                    unigrams[i] += 1;
                    symbols += 1;
                    if let Some(p) = previous {
                        pairs[p * n + i] += 1;
                    }
                    previous = Some(i);
                }
                None => previous = None,
            }
        }

        let digrams = pairs
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(idx, &count)| (idx / n, idx % n, count))
            .collect();

        Self {
            unigrams,
            digrams,
            symbols,
        }
    }

    /// Number of alphabet symbols in the text
    pub fn symbol_count(&self) -> u64 {
        self.symbols
    }

    /// Occurrences of the symbol at alphabet index `index`
    pub fn count(&self, index: usize) -> u64 {
        self.unigrams.get(index).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u64] {
        &self.unigrams
    }

    /// Occurrences of the adjacent pair (`first`, `second`)
    pub fn digram_count(&self, first: usize, second: usize) -> u64 {
        self.digrams
            .iter()
            .find(|(a, b, _)| *a == first && *b == second)
            .map_or(0, |(_, _, count)| *count)
    }

    /// Number of distinct adjacent pairs
    pub fn distinct_digrams(&self) -> usize {
        self.digrams.len()
    }
}

/// Scores texts against a frequency model over a fixed alphabet
#[derive(Debug, Clone)]
pub struct Scorer {
    alphabet: Alphabet,
    weights: ScoreWeights,
    /// `-ln p` for each alphabet index
    unigram_cost: Vec<f64>,
    /// `-ln p(a, b)` at `a * n + b`
    digram_cost: Vec<f64>,
}

impl Scorer {
    /// Build a scorer; the model must cover exactly the alphabet's symbols
    pub fn new(model: &FrequencyModel, alphabet: &Alphabet, weights: ScoreWeights) -> Result<Self> {
        weights.validate()?;
        if !model.covers(alphabet) {
            return Err(CrackError::InvalidModel(format!(
                "model symbols '{}' do not match alphabet '{}'",
                model.alphabet(),
                alphabet
            )));
        }

        let ranks: Vec<usize> = alphabet
            .symbols()
            .iter()
            .filter_map(|&c| model.rank_of(c))
            .collect();
        let n = ranks.len();

        let unigram_cost = ranks.iter().map(|&r| cost(model.freq(r))).collect();
        let mut digram_cost = vec![0.0; n * n];
        for (a, &ra) in ranks.iter().enumerate() {
            for (b, &rb) in ranks.iter().enumerate() {
                digram_cost[a * n + b] = cost(model.digram(ra, rb));
            }
        }

        Ok(Self {
            alphabet: alphabet.clone(),
            weights,
            unigram_cost,
            digram_cost,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Profile a text over this scorer's alphabet
    pub fn profile(&self, text: &str) -> TextProfile {
        TextProfile::new(text, &self.alphabet)
    }

    /// Score a plaintext; deterministic and linear in the text length
    ///
    /// # Example
    /// ```
    /// use subcrack::alphabet::Alphabet;
    /// use subcrack::model::FrequencyModel;
    /// use subcrack::scorer::{ScoreWeights, Scorer};
    ///
    /// let scorer = Scorer::new(
    ///     &FrequencyModel::english(),
    ///     &Alphabet::english(),
    ///     ScoreWeights::default(),
    /// )
    /// .unwrap();
    ///
    /// assert!(scorer.score("the weather is nice") < scorer.score("qzx jvkq wy xzzq"));
    /// ```
    pub fn score(&self, plaintext: &str) -> f64 {
        self.evaluate(&self.profile(plaintext), |i| i)
    }

    /// Score of the plaintext obtained by applying `key` to the profiled text
    ///
    /// # Panics
    ///
    /// Panics if `key` or `profile` was built over an alphabet of a different
    /// size than this scorer's. Debug builds check the sizes up front.
    pub fn score_under(&self, profile: &TextProfile, key: &Key) -> f64 {
        debug_assert_eq!(
            key.len(),
            self.unigram_cost.len(),
            "key length differs from the scorer's alphabet"
        );
        debug_assert_eq!(
            profile.unigrams.len(),
            self.unigram_cost.len(),
            "profile was built over a different alphabet"
        );
        let images = key.images();
        self.evaluate(profile, |i| images[i])
    }

    fn evaluate(&self, profile: &TextProfile, image: impl Fn(usize) -> usize) -> f64 {
        if profile.symbols == 0 {
            return 0.0;
        }
        let n = self.unigram_cost.len();

        let unigram: f64 = profile
            .unigrams
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(c, &count)| count as f64 * self.unigram_cost[image(c)])
            .sum();

        let digram: f64 = profile
            .digrams
            .iter()
            .map(|&(a, b, count)| count as f64 * self.digram_cost[image(a) * n + image(b)])
            .sum();

        (self.weights.unigram * unigram + self.weights.digram * digram) / profile.symbols as f64
    }
}

fn cost(probability: f64) -> f64 {
    -probability.max(PROBABILITY_FLOOR).ln()
}
