//! Property-based tests for the cipher, key, and scoring layers
//!
//! Core properties tested:
//! 1. Applying a key and then its inverse restores the text
//! 2. Case and non-alphabet characters survive a substitution
//! 3. Subkey parsing agrees with the encryption direction
//! 4. Relabelled scoring matches scoring the decrypted text
//! 5. Scores are finite and non-negative

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use subcrack::alphabet::Alphabet;
use subcrack::cipher;
use subcrack::key::Key;
use subcrack::model::FrequencyModel;
use subcrack::scorer::{ScoreWeights, Scorer};

fn english_scorer() -> Scorer {
    Scorer::new(
        &FrequencyModel::english(),
        &Alphabet::english(),
        ScoreWeights::default(),
    )
    .unwrap()
}

fn seeded_key(seed: u64) -> Key {
    Key::random(26, &mut StdRng::seed_from_u64(seed))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_inverse_restores_text(text in ".{0,200}", seed in any::<u64>()) {
        let alphabet = Alphabet::english();
        let key = seeded_key(seed);
        let encrypted = cipher::apply(&text, &alphabet, &key).unwrap();
        let restored = cipher::apply(&encrypted, &alphabet, &key.inverse()).unwrap();
        prop_assert_eq!(restored, text);
    }

    #[test]
    fn prop_substitution_preserves_shape(text in "[a-zA-Z0-9 ,.!?']{0,200}", seed in any::<u64>()) {
        let alphabet = Alphabet::english();
        let output = cipher::apply(&text, &alphabet, &seeded_key(seed)).unwrap();
        prop_assert_eq!(output.chars().count(), text.chars().count());

        for (before, after) in text.chars().zip(output.chars()) {
            if before.is_ascii_alphabetic() {
                prop_assert!(after.is_ascii_alphabetic());
                prop_assert_eq!(before.is_ascii_uppercase(), after.is_ascii_uppercase());
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn prop_subkey_decrypts_what_it_encrypts(text in "[a-z ]{0,100}", seed in any::<u64>()) {
        let alphabet = Alphabet::english();
        // A subkey lists the cipher symbol of each plaintext letter
        let encryption = seeded_key(seed);
        let subkey: String = encryption
            .images()
            .iter()
            .map(|&c| alphabet.symbol(c).unwrap())
            .collect();

        let key = Key::from_subkey(&alphabet, &subkey).unwrap();
        let ciphertext = cipher::apply(&text, &alphabet, &encryption).unwrap();
        prop_assert_eq!(cipher::apply(&ciphertext, &alphabet, &key).unwrap(), text.clone());
        prop_assert_eq!(cipher::encrypt(&text, &alphabet, &key).unwrap(), ciphertext);
    }

    #[test]
    fn prop_score_under_matches_decrypted_score(text in "[a-zA-Z ,.]{0,300}", seed in any::<u64>()) {
        let scorer = english_scorer();
        let key = seeded_key(seed);
        let decrypted = cipher::apply(&text, scorer.alphabet(), &key).unwrap();

        let relabelled = scorer.score_under(&scorer.profile(&text), &key);
        let direct = scorer.score(&decrypted);
        prop_assert!((relabelled - direct).abs() < 1e-9, "{} vs {}", relabelled, direct);
    }

    #[test]
    fn prop_score_is_finite_and_non_negative(text in ".{0,300}") {
        let score = english_scorer().score(&text);
        prop_assert!(score.is_finite());
        prop_assert!(score >= 0.0);
    }

    #[test]
    fn prop_swap_twice_is_identity(seed in any::<u64>(), i in 0usize..26, j in 0usize..26) {
        let key = seeded_key(seed);
        prop_assert_eq!(key.swap(i, j).swap(i, j), key);
    }

    #[test]
    fn prop_wrong_length_subkey_rejected(len in 0usize..60) {
        prop_assume!(len != 26);
        let subkey: String = "abcdefghijklmnopqrstuvwxyz".chars().cycle().take(len).collect();
        prop_assert!(Key::from_subkey(&Alphabet::english(), &subkey).is_err());
    }
}
