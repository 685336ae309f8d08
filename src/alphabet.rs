//! Symbol sets that define the domain of substitution keys

use crate::error::{CrackError, Result};
use std::collections::HashMap;
use std::fmt;

/// The 26 lowercase ASCII letters in natural order
pub const ENGLISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Ordered set of distinct, case-folded symbols
///
/// Index `i` of the alphabet is the position keys refer to. Lookups fold
/// case, so `'Q'` and `'q'` resolve to the same index.
///
/// # Example
/// ```
/// use subcrack::alphabet::Alphabet;
///
/// let alphabet = Alphabet::english();
/// assert_eq!(alphabet.len(), 26);
/// assert_eq!(alphabet.index_of('C'), Some(2));
/// assert_eq!(alphabet.index_of('!'), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from a string of distinct symbols
    ///
    /// Every symbol must have a one-to-one case mapping, and either all
    /// symbols carry case or none do, so that substitution can restore the
    /// case of every letter it rewrites.
    pub fn new(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(CrackError::InvalidAlphabet(
                "alphabet must contain at least one symbol".to_string(),
            ));
        }

        let mut folded = Vec::with_capacity(symbols.len());
        let mut index = HashMap::new();
        for c in symbols.chars() {
            let c = fold_case(c);
            if index.insert(c, folded.len()).is_some() {
                return Err(CrackError::InvalidAlphabet(format!(
                    "symbol '{}' appears more than once",
                    c
                )));
            }
            folded.push(c);
        }
        check_case_mapping(&folded).map_err(CrackError::InvalidAlphabet)?;

        Ok(Self {
            symbols: folded,
            index,
        })
    }

    /// The lowercase English alphabet
    pub fn english() -> Self {
        Self::from_distinct(ENGLISH_ALPHABET.chars().collect())
    }

    /// Build from symbols already known to be distinct and lowercase
    pub(crate) fn from_distinct(symbols: Vec<char>) -> Self {
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Position of a symbol, ignoring case
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.index.get(&fold_case(c)).copied()
    }

    /// Symbol stored at `index`
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Whether both alphabets contain the same symbols, in any order
    pub fn same_symbols(&self, other: &Alphabet) -> bool {
        self.len() == other.len() && self.symbols.iter().all(|c| other.index.contains_key(c))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Lowercase a character when the lowercase form uppercases back to it
///
/// Characters such as the Kelvin sign lowercase to an ASCII letter but do not
/// come back; they are left alone so that substitution stays reversible.
pub(crate) fn fold_case(c: char) -> char {
    if !c.is_uppercase() {
        return c;
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if single_upper(l) == Some(c) => l,
        _ => c,
    }
}

/// Check that substitution over `symbols` can carry case through a round trip
///
/// Symbols are expected to be folded already. A symbol such as `'ß'`
/// uppercases to two characters and is refused, as is an alphabet mixing
/// cased letters with caseless symbols like digits.
pub(crate) fn check_case_mapping(symbols: &[char]) -> std::result::Result<(), String> {
    let mut first: Option<(char, bool)> = None;
    for &c in symbols {
        let cased = case_pairing(c).ok_or_else(|| {
            format!(
                "symbol '{}' has no single-character uppercase that folds back to it",
                c
            )
        })?;
        match first {
            None => first = Some((c, cased)),
            Some((other, other_cased)) if other_cased != cased => {
                return Err(format!(
                    "alphabet mixes cased and caseless symbols ('{}' and '{}')",
                    other, c
                ));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// `Some(true)` for a lowercase letter with a reversible uppercase,
/// `Some(false)` for a caseless symbol, `None` otherwise
fn case_pairing(c: char) -> Option<bool> {
    if c.is_uppercase() {
        return None;
    }
    match single_upper(c) {
        Some(u) if u == c => Some(false),
        Some(u) if fold_case(u) == c => Some(true),
        _ => None,
    }
}

fn single_upper(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}
