#![no_main]

use libfuzzer_sys::fuzz_target;
use subcrack::alphabet::Alphabet;
use subcrack::model::{FrequencyModel, ModelFile};
use subcrack::scorer::{ScoreWeights, Scorer};

fuzz_target!(|data: &[u8]| {
    let Ok(file) = serde_json::from_slice::<ModelFile>(data) else {
        return;
    };
    // Accepted models must produce finite scores
    if let Ok(model) = FrequencyModel::from_model_file(&file) {
        let alphabet = model.alphabet();
        if let Ok(scorer) = Scorer::new(&model, &alphabet, ScoreWeights::default()) {
            let text: String = alphabet.symbols().iter().collect();
            assert!(scorer.score(&text).is_finite());
        }
    }
});
