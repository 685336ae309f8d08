#![no_main]

use libfuzzer_sys::fuzz_target;
use subcrack::alphabet::Alphabet;
use subcrack::cipher;
use subcrack::key::Key;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // First line is the subkey, the rest is text to transform
    let (subkey, text) = input.split_once('\n').unwrap_or((input, ""));

    let alphabet = Alphabet::english();
    if let Ok(key) = Key::from_subkey(&alphabet, subkey) {
        let decrypted = cipher::apply(text, &alphabet, &key).unwrap();
        let restored = cipher::encrypt(&decrypted, &alphabet, &key).unwrap();
        assert_eq!(restored, text);
    }
});
