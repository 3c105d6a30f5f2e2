#![no_main]

use libfuzzer_sys::fuzz_target;
use paillier::{Ciphertext, ModifiedKeyPair, StandardKeyPair};

use std::sync::OnceLock;

static STANDARD: OnceLock<StandardKeyPair> = OnceLock::new();
static MODIFIED: OnceLock<ModifiedKeyPair> = OnceLock::new();

// Arbitrary ciphertext bytes must decrypt or fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    let standard = STANDARD.get_or_init(|| StandardKeyPair::generate_with_size(512).unwrap());
    let modified = MODIFIED.get_or_init(|| ModifiedKeyPair::generate_with_size(512).unwrap());

    let ciphertext = Ciphertext::from(data);
    let _ = standard.decrypt(&ciphertext);
    let _ = modified.decrypt(&ciphertext);
});
