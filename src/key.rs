//! Substitution keys: permutations over alphabet positions
//!
//! A [`Key`] maps each cipher symbol (by alphabet index) to the index of its
//! plaintext symbol. Every constructor either builds a permutation by
//! construction or validates one, so a `Key` always has an inverse.

use crate::alphabet::Alphabet;
use crate::error::{CrackError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Bijection from cipher alphabet positions to plaintext alphabet positions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    images: Vec<usize>,
}

impl Key {
    /// Key that maps every symbol to itself
    pub fn identity(len: usize) -> Self {
        Self {
            images: (0..len).collect(),
        }
    }

    /// Uniformly random permutation
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut images: Vec<usize> = (0..len).collect();
        images.shuffle(rng);
        Self { images }
    }

    /// Build a key from explicit images, rejecting anything that is not a permutation
    pub fn from_images(images: Vec<usize>) -> Result<Self> {
        let mut seen = vec![false; images.len()];
        for &image in &images {
            match seen.get_mut(image) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(CrackError::InvalidKey(format!(
                        "image {} is assigned more than once",
                        image
                    )))
                }
                None => {
                    return Err(CrackError::InvalidKey(format!(
                        "image {} is outside an alphabet of {} symbols",
                        image,
                        images.len()
                    )))
                }
            }
        }
        Ok(Self { images })
    }

    /// Wrap images that are a permutation by construction
    pub(crate) fn from_permutation(images: Vec<usize>) -> Self {
        debug_assert!(Self::from_images(images.clone()).is_ok());
        Self { images }
    }

    /// Decryption key from a subkey string
    ///
    /// `subkey[i]` is the cipher symbol that `alphabet[i]` encrypts to, so the
    /// returned key maps cipher `subkey[i]` back to plaintext `alphabet[i]`.
    ///
    /// # Example
    /// ```
    /// use subcrack::{alphabet::Alphabet, key::Key};
    ///
    /// let alphabet = Alphabet::english();
    /// let key = Key::from_subkey(&alphabet, "bcdefghijklmnopqrstuvwxyza").unwrap();
    /// // cipher 'b' decrypts to 'a'
    /// assert_eq!(key.image(1), Some(0));
    /// ```
    pub fn from_subkey(alphabet: &Alphabet, subkey: &str) -> Result<Self> {
        let subkey_len = subkey.chars().count();
        if subkey_len != alphabet.len() {
            return Err(CrackError::KeyLengthMismatch {
                alphabet: alphabet.len(),
                key: subkey_len,
            });
        }

        let mut images = vec![usize::MAX; alphabet.len()];
        for (plain, c) in subkey.chars().enumerate() {
            let cipher = alphabet.index_of(c).ok_or_else(|| {
                CrackError::InvalidKey(format!("subkey symbol '{}' is not in the alphabet", c))
            })?;
            if images[cipher] != usize::MAX {
                return Err(CrackError::InvalidKey(format!(
                    "subkey symbol '{}' appears more than once",
                    c
                )));
            }
            images[cipher] = plain;
        }

        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Plaintext index for cipher index `cipher`
    pub fn image(&self, cipher: usize) -> Option<usize> {
        self.images.get(cipher).copied()
    }

    pub fn images(&self) -> &[usize] {
        &self.images
    }

    /// New key with the images at `i` and `j` exchanged
    ///
    /// Exchanging two outputs of a permutation yields a permutation, so the
    /// result needs no validation. Panics if either index is out of range.
    pub fn swap(&self, i: usize, j: usize) -> Self {
        let mut images = self.images.clone();
        images.swap(i, j);
        Self { images }
    }

    pub fn inverse(&self) -> Self {
        let mut images = vec![0; self.images.len()];
        for (cipher, &plain) in self.images.iter().enumerate() {
            images[plain] = cipher;
        }
        Self { images }
    }

    /// Displayable cipher → plaintext table for this key
    pub fn mapping<'a>(&'a self, alphabet: &'a Alphabet) -> KeyMapping<'a> {
        KeyMapping {
            key: self,
            alphabet,
        }
    }
}

/// Two-line rendering of a key: cipher symbols above their plaintext images
pub struct KeyMapping<'a> {
    key: &'a Key,
    alphabet: &'a Alphabet,
}

impl fmt::Display for KeyMapping<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cipher: {}", self.alphabet)?;
        write!(f, "plain : ")?;
        for &image in self.key.images() {
            let symbol = self.alphabet.symbol(image).unwrap_or('?');
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
