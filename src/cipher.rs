//! Applying substitution keys to text

use crate::alphabet::Alphabet;
use crate::error::{CrackError, Result};
use crate::key::Key;

/// Map every alphabet symbol of `text` through `key`
///
/// Alphabet symbols are looked up case-insensitively and the original case is
/// restored on the image. Everything else (whitespace, digits, punctuation,
/// letters outside the alphabet) passes through unchanged. The key length is
/// checked before any character is processed.
///
/// # Example
/// ```
/// use subcrack::{alphabet::Alphabet, cipher, key::Key};
///
/// let alphabet = Alphabet::english();
/// let key = Key::from_subkey(&alphabet, "bcdefghijklmnopqrstuvwxyza").unwrap();
/// assert_eq!(cipher::apply("Bmf", &alphabet, &key).unwrap(), "Ale");
/// ```
pub fn apply(text: &str, alphabet: &Alphabet, key: &Key) -> Result<String> {
    if key.len() != alphabet.len() {
        return Err(CrackError::KeyLengthMismatch {
            alphabet: alphabet.len(),
            key: key.len(),
        });
    }

    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        let image = alphabet
            .index_of(c)
            .and_then(|i| key.image(i))
            .and_then(|p| alphabet.symbol(p));
        match image {
            Some(plain) if c.is_uppercase() => output.extend(plain.to_uppercase()),
            Some(plain) => output.push(plain),
            None => output.push(c),
        }
    }
    Ok(output)
}

/// Apply the inverse of `key`, turning plaintext back into ciphertext
pub fn encrypt(plaintext: &str, alphabet: &Alphabet, key: &Key) -> Result<String> {
    apply(plaintext, alphabet, &key.inverse())
}
