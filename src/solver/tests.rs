// Tests for both key search strategies
//
// The passages below are encrypted with seeded random keys; assertions are
// about score behaviour and determinism, not about exact plaintext recovery,
// which the integration tests cover with larger budgets.

use super::*;
use crate::alphabet::Alphabet;
use crate::cipher;
use crate::model::FrequencyModel;
use crate::scorer::ScoreWeights;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PASSAGE: &str = "When the winter wind blows down from the northern mountains, the farmers \
    of the valley bring their animals into the barns and wait for the storm to pass.";

fn english_scorer() -> Scorer {
    Scorer::new(
        &FrequencyModel::english(),
        &Alphabet::english(),
        ScoreWeights::default(),
    )
    .unwrap()
}

fn encrypted_passage(seed: u64) -> (String, Key) {
    let alphabet = Alphabet::english();
    let key = Key::random(26, &mut StdRng::seed_from_u64(seed));
    let ciphertext = cipher::encrypt(PASSAGE, &alphabet, &key).unwrap();
    (ciphertext, key)
}

fn quick_search() -> StochasticSearch {
    StochasticSearch::new(SearchConfig {
        max_iterations: 5_000,
        stagnation_limit: 500,
        ..SearchConfig::default()
    })
    .unwrap()
}

#[test]
fn test_rank_match_is_deterministic() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(1);
    let profile = scorer.profile(&ciphertext);
    let rank_match = RankMatch::new(&FrequencyModel::english(), &Alphabet::english()).unwrap();

    let first = rank_match.search(&scorer, &profile, 1, &CancelToken::new());
    let second = rank_match.search(&scorer, &profile, 999, &CancelToken::new());

    assert_eq!(first.key, second.key);
    assert_eq!(first.score, second.score);
    assert_eq!(first.termination, Termination::Deterministic);
    assert_eq!(first.iterations, 0);
}

#[test]
fn test_rank_match_maps_most_frequent_to_e() {
    let alphabet = Alphabet::english();
    let rank_match = RankMatch::new(&FrequencyModel::english(), &alphabet).unwrap();
    let profile = TextProfile::new("xxxx yyy zz w", &alphabet);
    let key = rank_match.key_for(&profile);

    let plain = |c: char| {
        let image = key.image(alphabet.index_of(c).unwrap()).unwrap();
        alphabet.symbol(image).unwrap()
    };
    assert_eq!(plain('x'), 'e');
    assert_eq!(plain('y'), 't');
    assert_eq!(plain('z'), 'a');
    assert_eq!(plain('w'), 'o');
}

#[test]
fn test_rank_match_breaks_ties_by_alphabet_position() {
    let alphabet = Alphabet::english();
    let profile = TextProfile::new("ba", &alphabet);
    let ranking = RankMatch::cipher_ranking(&profile);
    // a and b tie on one occurrence each, the rest tie on zero
    assert_eq!(&ranking[..4], &[0, 1, 2, 3]);
    assert_eq!(ranking.len(), 26);
}

#[test]
fn test_rank_match_rejects_foreign_alphabet() {
    let alphabet = Alphabet::new("abc").unwrap();
    assert!(RankMatch::new(&FrequencyModel::english(), &alphabet).is_err());
}

#[test]
#[should_panic]
fn test_rank_match_panics_on_profile_of_other_alphabet() {
    let alphabet = Alphabet::new("abc").unwrap();
    let model = FrequencyModel::new("abc", &[3.0, 2.0, 1.0], &[vec![1.0; 3], vec![1.0; 3], vec![1.0; 3]]).unwrap();
    let rank_match = RankMatch::new(&model, &alphabet).unwrap();
    let profile = english_scorer().profile(PASSAGE);
    let _key = rank_match.key_for(&profile);
}

#[test]
fn test_stochastic_same_seed_same_solution() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(2);
    let profile = scorer.profile(&ciphertext);
    let search = quick_search();

    let a = search.search(&scorer, &profile, 42, &CancelToken::new());
    let b = search.search(&scorer, &profile, 42, &CancelToken::new());
    assert_eq!(a.key, b.key);
    assert_eq!(a.score, b.score);
    assert_eq!(a.iterations, b.iterations);
}

#[test]
fn test_stochastic_respects_budget() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(3);
    let profile = scorer.profile(&ciphertext);
    let solution = quick_search().search(&scorer, &profile, 7, &CancelToken::new());

    assert_eq!(solution.iterations, 5_000);
    assert_eq!(solution.termination, Termination::BudgetExhausted);
}

#[test]
fn test_stochastic_reports_score_of_returned_key() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(4);
    let profile = scorer.profile(&ciphertext);
    let solution = quick_search().search(&scorer, &profile, 8, &CancelToken::new());

    assert_eq!(solution.score, scorer.score_under(&profile, &solution.key));
}

#[test]
fn test_stochastic_improves_on_raw_ciphertext() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(5);
    let profile = scorer.profile(&ciphertext);
    let solution = quick_search().search(&scorer, &profile, 9, &CancelToken::new());

    assert!(solution.score < scorer.score(&ciphertext));
}

#[test]
fn test_stochastic_restarts_when_stagnant() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(6);
    let profile = scorer.profile(&ciphertext);
    let search = StochasticSearch::new(SearchConfig {
        max_iterations: 2_000,
        stagnation_limit: 50,
        ..SearchConfig::default()
    })
    .unwrap();

    let solution = search.search(&scorer, &profile, 10, &CancelToken::new());
    assert!(solution.restarts > 0);
}

#[test]
fn test_stochastic_stops_at_target_score() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(7);
    let profile = scorer.profile(&ciphertext);
    let search = StochasticSearch::new(SearchConfig {
        target_score: Some(f64::MAX),
        ..SearchConfig::default()
    })
    .unwrap();

    let solution = search.search(&scorer, &profile, 11, &CancelToken::new());
    assert_eq!(solution.termination, Termination::ThresholdReached);
    assert_eq!(solution.iterations, 0);
}

#[test]
fn test_stochastic_honours_cancellation() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(8);
    let profile = scorer.profile(&ciphertext);
    let cancel = CancelToken::new();
    cancel.cancel();

    let solution = quick_search().search(&scorer, &profile, 12, &cancel);
    assert_eq!(solution.termination, Termination::Cancelled);
    assert_eq!(solution.iterations, 0);
    assert_eq!(solution.key.len(), 26);
}

#[test]
fn test_annealing_variant_searches() {
    let scorer = english_scorer();
    let (ciphertext, _) = encrypted_passage(9);
    let profile = scorer.profile(&ciphertext);
    let search = StochasticSearch::new(SearchConfig {
        max_iterations: 5_000,
        stagnation_limit: 1_000,
        target_score: None,
        acceptance: Acceptance::Annealing {
            initial_temperature: 0.05,
            cooling_rate: 0.999,
        },
    })
    .unwrap();

    let solution = search.search(&scorer, &profile, 13, &CancelToken::new());
    assert!(solution.score < scorer.score(&ciphertext));
    assert_eq!(solution.score, scorer.score_under(&profile, &solution.key));
}

#[test]
fn test_single_symbol_alphabet() {
    let model = FrequencyModel::new("a", &[1.0], &[vec![1.0]]).unwrap();
    let alphabet = Alphabet::new("a").unwrap();
    let scorer = Scorer::new(&model, &alphabet, ScoreWeights::default()).unwrap();
    let profile = scorer.profile("aaa");

    let solution = quick_search().search(&scorer, &profile, 1, &CancelToken::new());
    assert_eq!(solution.key, Key::identity(1));
    assert_eq!(solution.termination, Termination::BudgetExhausted);
}

#[test]
fn test_invalid_search_config_rejected() {
    let config = SearchConfig {
        max_iterations: 0,
        ..SearchConfig::default()
    };
    assert!(StochasticSearch::new(config).is_err());
}

#[test]
fn test_cancel_token_child_follows_parent() {
    let parent = CancelToken::new();
    let child = parent.child();
    let grandchild = child.child();
    assert!(!grandchild.is_cancelled());

    parent.cancel();
    assert!(child.is_cancelled());
    assert!(grandchild.is_cancelled());
}

#[test]
fn test_cancel_token_child_does_not_cancel_parent() {
    let parent = CancelToken::new();
    let child = parent.child();
    child.cancel();
    assert!(child.is_cancelled());
    assert!(!parent.is_cancelled());
}

#[test]
fn test_strategy_names() {
    let rank_match = RankMatch::new(&FrequencyModel::english(), &Alphabet::english()).unwrap();
    assert_eq!(quick_search().name(), "stochastic");
    assert!(quick_search().is_randomized());
    assert_eq!(rank_match.name(), "deterministic");
    assert!(!rank_match.is_randomized());
}
