use super::{CancelToken, KeySearch, Solution, Termination};
use crate::alphabet::Alphabet;
use crate::error::{CrackError, Result};
use crate::key::Key;
use crate::model::FrequencyModel;
use crate::scorer::{Scorer, TextProfile};
use std::cmp::Reverse;

/// Deterministic key from frequency ranks
///
/// The most frequent cipher symbol is mapped to the language's most frequent
/// symbol, the second to the second, and so on. Ties are broken by alphabet
/// position, so identical ciphertexts always yield identical keys.
#[derive(Debug, Clone)]
pub struct RankMatch {
    /// Alphabet index of the model symbol at each rank
    plain_by_rank: Vec<usize>,
}

impl RankMatch {
    pub fn new(model: &FrequencyModel, alphabet: &Alphabet) -> Result<Self> {
        if !model.covers(alphabet) {
            return Err(CrackError::InvalidModel(format!(
                "model symbols '{}' do not match alphabet '{}'",
                model.alphabet(),
                alphabet
            )));
        }

        let plain_by_rank = model
            .ranked_symbols()
            .iter()
            .filter_map(|&symbol| alphabet.index_of(symbol))
            .collect();

        Ok(Self { plain_by_rank })
    }

    /// Cipher alphabet indices ordered by descending count, ties by index
    pub fn cipher_ranking(profile: &TextProfile) -> Vec<usize> {
        let mut order: Vec<usize> = (0..profile.counts().len()).collect();
        // Stable sort keeps alphabet order among equal counts
        order.sort_by_key(|&c| Reverse(profile.count(c)));
        order
    }

    /// Key mapping cipher rank r to model rank r
    ///
    /// # Panics
    ///
    /// Panics if `profile` counts symbols of an alphabet whose size differs
    /// from the one this matcher was built for.
    pub fn key_for(&self, profile: &TextProfile) -> Key {
        debug_assert_eq!(
            profile.counts().len(),
            self.plain_by_rank.len(),
            "profile was built over a different alphabet"
        );
        let mut images = vec![0; self.plain_by_rank.len()];
        for (rank, cipher) in Self::cipher_ranking(profile).into_iter().enumerate() {
            images[cipher] = self.plain_by_rank[rank];
        }
        Key::from_permutation(images)
    }
}

impl KeySearch for RankMatch {
    fn name(&self) -> &'static str {
        "deterministic"
    }

    fn is_randomized(&self) -> bool {
        false
    }

    fn search(
        &self,
        scorer: &Scorer,
        profile: &TextProfile,
        _seed: u64,
        _cancel: &CancelToken,
    ) -> Solution {
        let key = self.key_for(profile);
        let score = scorer.score_under(profile, &key);
        tracing::debug!(score, "rank matching finished");

        Solution {
            key,
            score,
            iterations: 0,
            restarts: 0,
            termination: Termination::Deterministic,
        }
    }
}
