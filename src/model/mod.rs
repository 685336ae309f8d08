// Rank-ordered language statistics for scoring candidate plaintexts
//
// Index 0 of every table is the most frequent symbol of the language, index 1
// the second most frequent, and so on. Rank-matching relies on this order, so
// it is stored as arrays indexed by rank rather than derived from a map.
//
// Values are normalised to probabilities on construction; the model is never
// mutated afterwards and is shared by reference between solvers and workers.

pub mod english;

use crate::alphabet::{check_case_mapping, fold_case, Alphabet};
use crate::error::{read_text_file, CrackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Immutable unigram and digram statistics for one language
#[derive(Debug, Clone)]
pub struct FrequencyModel {
    ranked: Vec<char>,
    rank_index: HashMap<char, usize>,
    unigrams: Vec<f64>,
    digrams: Vec<Vec<f64>>,
}

/// On-disk form of a frequency model
///
/// ```json
/// { "symbols": "etaoin...", "unigrams": [12.49, ...], "digrams": [[0.378, ...], ...] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    /// Symbols from most to least frequent
    pub symbols: String,
    pub unigrams: Vec<f64>,
    pub digrams: Vec<Vec<f64>>,
}

impl FrequencyModel {
    /// Build a model from rank-ordered tables
    ///
    /// Tables may be given in any unit (fractions, percentages, raw counts);
    /// each is rescaled to sum to one.
    pub fn new(ranked_symbols: &str, unigrams: &[f64], digrams: &[Vec<f64>]) -> Result<Self> {
        let ranked: Vec<char> = ranked_symbols.chars().map(fold_case).collect();
        let n = ranked.len();

        if n == 0 {
            return Err(CrackError::InvalidModel("model has no symbols".to_string()));
        }
        if unigrams.len() != n {
            return Err(CrackError::InvalidModel(format!(
                "unigram vector has {} entries for {} symbols",
                unigrams.len(),
                n
            )));
        }
        if digrams.len() != n {
            return Err(CrackError::InvalidModel(format!(
                "digram matrix has {} rows for {} symbols",
                digrams.len(),
                n
            )));
        }
        if let Some((row, cols)) = digrams
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n)
            .map(|(i, row)| (i, row.len()))
        {
            return Err(CrackError::InvalidModel(format!(
                "digram row {} has {} columns, expected {}",
                row, cols, n
            )));
        }

        let mut rank_index = HashMap::with_capacity(n);
        for (rank, &c) in ranked.iter().enumerate() {
            if rank_index.insert(c, rank).is_some() {
                return Err(CrackError::InvalidModel(format!(
                    "symbol '{}' is ranked more than once",
                    c
                )));
            }
        }
        check_case_mapping(&ranked).map_err(CrackError::InvalidModel)?;

        let unigrams = normalise(unigrams.iter().copied(), "unigram")?;
        let flat = normalise(digrams.iter().flatten().copied(), "digram")?;
        let digrams = flat.chunks(n).map(<[f64]>::to_vec).collect();

        Ok(Self {
            ranked,
            rank_index,
            unigrams,
            digrams,
        })
    }

    /// Compiled-in English statistics
    pub fn english() -> Self {
        let unigrams = english::UNIGRAMS.to_vec();
        let digrams: Vec<Vec<f64>> = english::DIGRAMS.iter().map(|row| row.to_vec()).collect();
        let ranked: Vec<char> = english::RANKED_LETTERS.chars().collect();
        let rank_index = ranked.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        let unigram_total: f64 = unigrams.iter().sum();
        let digram_total: f64 = digrams.iter().flatten().sum();

        Self {
            ranked,
            rank_index,
            unigrams: unigrams.iter().map(|v| v / unigram_total).collect(),
            digrams: digrams
                .iter()
                .map(|row| row.iter().map(|v| v / digram_total).collect())
                .collect(),
        }
    }

    /// Load and validate a model from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_text_file(path)?;
        let file: ModelFile = serde_json::from_str(&text).map_err(|e| {
            CrackError::InvalidModel(format!("{}: {}", path.display(), e))
        })?;
        Self::from_model_file(&file)
    }

    pub fn from_model_file(file: &ModelFile) -> Result<Self> {
        Self::new(&file.symbols, &file.unigrams, &file.digrams)
    }

    /// Export the (normalised) tables
    pub fn to_model_file(&self) -> ModelFile {
        ModelFile {
            symbols: self.ranked.iter().collect(),
            unigrams: self.unigrams.clone(),
            digrams: self.digrams.clone(),
        }
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Unigram probability of the symbol at `rank`
    pub fn freq(&self, rank: usize) -> f64 {
        self.unigrams[rank]
    }

    /// Probability of the pair (`rank_a`, `rank_b`) among all adjacent pairs
    pub fn digram(&self, rank_a: usize, rank_b: usize) -> f64 {
        self.digrams[rank_a][rank_b]
    }

    /// Frequency rank of a symbol, ignoring case
    pub fn rank_of(&self, symbol: char) -> Option<usize> {
        self.rank_index.get(&fold_case(symbol)).copied()
    }

    /// Symbol holding frequency rank `rank`
    pub fn symbol_at(&self, rank: usize) -> Option<char> {
        self.ranked.get(rank).copied()
    }

    /// The model's symbols in frequency order
    pub fn ranked_symbols(&self) -> &[char] {
        &self.ranked
    }

    /// The model's symbols as an alphabet in rank order
    pub fn alphabet(&self) -> Alphabet {
        Alphabet::from_distinct(self.ranked.clone())
    }

    /// Whether the model covers exactly the symbols of `alphabet`
    pub fn covers(&self, alphabet: &Alphabet) -> bool {
        self.len() == alphabet.len() && alphabet.symbols().iter().all(|&c| self.rank_of(c).is_some())
    }
}

fn normalise(values: impl Iterator<Item = f64>, table: &str) -> Result<Vec<f64>> {
    let values: Vec<f64> = values.collect();
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(CrackError::InvalidModel(format!(
            "{} table contains invalid entry {}",
            table, bad
        )));
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(CrackError::InvalidModel(format!("{} table sums to zero", table)));
    }
    Ok(values.into_iter().map(|v| v / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_digrams() -> Vec<Vec<f64>> {
        vec![vec![1.0, 2.0, 1.0], vec![2.0, 0.0, 1.0], vec![1.0, 1.0, 1.0]]
    }

    #[test]
    fn test_english_shape() {
        let model = FrequencyModel::english();
        assert_eq!(model.len(), 26);
        for a in 0..26 {
            for b in 0..26 {
                assert!(model.digram(a, b) >= 0.0);
            }
        }
        assert_eq!(model.symbol_at(0), Some('e'));
        assert_eq!(model.symbol_at(1), Some('t'));
        assert_eq!(model.symbol_at(25), Some('z'));
        assert_eq!(model.symbol_at(26), None);
    }

    #[test]
    fn test_english_rank_order_is_descending() {
        let model = FrequencyModel::english();
        for rank in 1..model.len() {
            assert!(model.freq(rank - 1) >= model.freq(rank));
        }
    }

    #[test]
    fn test_english_tables_are_normalised() {
        let model = FrequencyModel::english();
        let unigram_sum: f64 = (0..26).map(|r| model.freq(r)).sum();
        let digram_sum: f64 = (0..26)
            .flat_map(|a| (0..26).map(move |b| (a, b)))
            .map(|(a, b)| model.digram(a, b))
            .sum();
        assert!((unigram_sum - 1.0).abs() < 1e-9);
        assert!((digram_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_english_matches_validated_construction() {
        let english = FrequencyModel::english();
        let rebuilt = FrequencyModel::from_model_file(&english.to_model_file()).unwrap();
        assert_eq!(rebuilt.ranked_symbols(), english.ranked_symbols());
        assert!((rebuilt.freq(0) - english.freq(0)).abs() < 1e-12);
    }

    #[test]
    fn test_known_digrams() {
        let model = FrequencyModel::english();
        let t = model.rank_of('t').unwrap();
        let h = model.rank_of('h').unwrap();
        let q = model.rank_of('q').unwrap();
        let u = model.rank_of('u').unwrap();
        // "th" is the most common English digram
        assert!(model.digram(t, h) > model.digram(h, t));
        assert!(model.digram(q, u) > model.digram(q, t));
    }

    #[test]
    fn test_rank_lookup_round_trip() {
        let model = FrequencyModel::english();
        for rank in 0..model.len() {
            let symbol = model.symbol_at(rank).unwrap();
            assert_eq!(model.rank_of(symbol), Some(rank));
            assert_eq!(model.rank_of(symbol.to_ascii_uppercase()), Some(rank));
        }
        assert_eq!(model.rank_of('?'), None);
    }

    #[test]
    fn test_covers_english_alphabet() {
        let model = FrequencyModel::english();
        assert!(model.covers(&Alphabet::english()));
        assert!(!model.covers(&Alphabet::new("abc").unwrap()));
        assert!(model.alphabet().same_symbols(&Alphabet::english()));
    }

    #[test]
    fn test_new_normalises() {
        let model = FrequencyModel::new("abc", &[2.0, 1.0, 1.0], &tiny_digrams()).unwrap();
        assert_eq!(model.freq(0), 0.5);
        assert_eq!(model.digram(0, 1), 0.2);
    }

    #[test]
    fn test_unigram_length_mismatch() {
        let err = FrequencyModel::new("abc", &[1.0, 1.0], &tiny_digrams()).unwrap_err();
        assert!(matches!(err, CrackError::InvalidModel(_)));
    }

    #[test]
    fn test_digram_row_count_mismatch() {
        let digrams = vec![vec![1.0; 3], vec![1.0; 3]];
        assert!(FrequencyModel::new("abc", &[1.0; 3], &digrams).is_err());
    }

    #[test]
    fn test_ragged_digram_matrix() {
        let digrams = vec![vec![1.0; 3], vec![1.0; 2], vec![1.0; 3]];
        let err = FrequencyModel::new("abc", &[1.0; 3], &digrams).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_negative_entry_rejected() {
        assert!(FrequencyModel::new("abc", &[1.0, -0.1, 1.0], &tiny_digrams()).is_err());

        let mut digrams = tiny_digrams();
        digrams[2][2] = -1.0;
        assert!(FrequencyModel::new("abc", &[1.0; 3], &digrams).is_err());
    }

    #[test]
    fn test_non_finite_entry_rejected() {
        assert!(FrequencyModel::new("abc", &[1.0, f64::NAN, 1.0], &tiny_digrams()).is_err());
    }

    #[test]
    fn test_all_zero_table_rejected() {
        assert!(FrequencyModel::new("abc", &[0.0; 3], &tiny_digrams()).is_err());
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        assert!(FrequencyModel::new("aba", &[1.0; 3], &tiny_digrams()).is_err());
    }

    #[test]
    fn test_symbol_without_single_uppercase_rejected() {
        let err = FrequencyModel::new("abß", &[1.0; 3], &tiny_digrams()).unwrap_err();
        assert!(matches!(err, CrackError::InvalidModel(_)));
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let file = ModelFile {
            symbols: "abc".to_string(),
            unigrams: vec![3.0, 2.0, 1.0],
            digrams: tiny_digrams(),
        };
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let model = FrequencyModel::from_json_file(&path).unwrap();
        assert_eq!(model.len(), 3);
        assert_eq!(model.symbol_at(0), Some('a'));
        assert_eq!(model.freq(0), 0.5);
    }

    #[test]
    fn test_json_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FrequencyModel::from_json_file(&path),
            Err(CrackError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_json_file_missing() {
        assert!(matches!(
            FrequencyModel::from_json_file("/no/such/model.json"),
            Err(CrackError::FileUnavailable { .. })
        ));
    }
}
