#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier::{ModifiedKeyPair, PublicParams, StandardKeyPair};
use std::sync::OnceLock;

static STANDARD: OnceLock<StandardKeyPair> = OnceLock::new();
static MODIFIED: OnceLock<ModifiedKeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let standard = STANDARD.get_or_init(|| StandardKeyPair::generate_with_size(512).unwrap());
    let modified = MODIFIED.get_or_init(|| ModifiedKeyPair::generate_with_size(512).unwrap());

    // Reduce into the plaintext space of each key
    let raw = BigUint::from_bytes_be(data);

    let m = &raw % standard.public_key().n();
    let c = standard.encrypt(&m).expect("plaintext below n must encrypt");
    assert_eq!(standard.decrypt(&c).expect("valid ciphertext must decrypt"), m);

    let m = &raw % modified.public_key().n();
    let c = modified.encrypt(&m).expect("plaintext below n must encrypt");
    assert_eq!(modified.decrypt(&c).expect("valid ciphertext must decrypt"), m);
});
