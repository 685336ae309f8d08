// Shared passages and helpers for the integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use subcrack::alphabet::Alphabet;
use subcrack::cipher;
use subcrack::key::Key;

/// About 700 characters of ordinary English prose
pub const LONG_PASSAGE: &str = "The old lighthouse keeper climbed the narrow stairs every evening \
at sunset. From the top of the tower he could see the whole harbor, the fishing boats returning \
with their nets, and the dark line of the northern hills beyond the town. He had lived there for \
more than thirty years, and in all that time he had never once let the great lamp go out. On \
stormy nights he would sit beside the window with a cup of tea and watch the waves break against \
the rocks below. The people of the village said that he knew the sea better than any sailor, and \
when the weather turned they would come to ask his advice before they set out. He always told \
them the truth, even when it was not what they wanted to hear.";

/// About 270 characters, short enough that a single attempt often fails
pub const MEDIUM_PASSAGE: &str = "When the winter wind blows down from the northern mountains, \
the farmers of the valley bring their animals into the barns and wait for the storm to pass. \
The children stay near the fire and listen to the stories their grandparents tell about the \
hard seasons of the past.";

/// A single sentence of about 80 characters
pub const SHORT_SENTENCE: &str =
    "The fishing boats came back into the harbor just before the storm reached the town.";

/// Encrypt `plaintext` under a key drawn from `seed`; returns the ciphertext
/// and the key that decrypts it
pub fn encrypt_with_seed(plaintext: &str, seed: u64) -> (String, Key) {
    let alphabet = Alphabet::english();
    let key = Key::random(alphabet.len(), &mut StdRng::seed_from_u64(seed));
    let ciphertext = cipher::encrypt(plaintext, &alphabet, &key).unwrap();
    (ciphertext, key)
}

/// Fraction of letters in `candidate` that equal the letter at the same position of `truth`
pub fn letter_accuracy(candidate: &str, truth: &str) -> f64 {
    let letters: Vec<(char, char)> = candidate
        .chars()
        .zip(truth.chars())
        .filter(|(_, t)| t.is_ascii_alphabetic())
        .collect();
    let correct = letters
        .iter()
        .filter(|(c, t)| c.eq_ignore_ascii_case(t))
        .count();
    correct as f64 / letters.len() as f64
}
