//! subcrack - monoalphabetic substitution cipher solver
//!
//! This library recovers the key of a simple substitution cipher from the
//! ciphertext alone. Candidate decryptions are scored against unigram and
//! digram statistics of the plaintext language; a stochastic hill climber
//! (or a deterministic frequency-rank match) searches the key space, and a
//! retry loop repeats the search until known plaintext fragments ("cribs")
//! appear in the result.
//!
//! ```
//! use subcrack::{alphabet::Alphabet, cipher, key::Key};
//!
//! let alphabet = Alphabet::english();
//! let key = Key::from_subkey(&alphabet, "bcdefghijklmnopqrstuvwxyza").unwrap();
//! assert_eq!(cipher::apply("Bmf", &alphabet, &key).unwrap(), "Ale");
//! ```

pub mod alphabet;
pub mod cipher;
pub mod cli;
pub mod config;
pub mod error;
pub mod key;
pub mod model;
pub mod retry;
pub mod scorer;
pub mod solver;

pub use error::{CrackError, Result};
