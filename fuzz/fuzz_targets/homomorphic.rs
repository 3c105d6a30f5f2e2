#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use paillier::{HomomorphicCryptosystem, KeyPair, ModifiedKeyPair, PublicParams, StandardKeyPair};

use std::sync::OnceLock;

static STANDARD: OnceLock<StandardKeyPair> = OnceLock::new();
static MODIFIED: OnceLock<ModifiedKeyPair> = OnceLock::new();

fn check<S: HomomorphicCryptosystem>(keypair: &KeyPair<S>, m1: &BigUint, m2: &BigUint) {
    let n = keypair.public_key().n();
    let (m1, m2) = (m1 % n, m2 % n);

    let Ok(c1) = keypair.encrypt(&m1) else {
        return;
    };
    let Ok(c2) = keypair.encrypt(&m2) else {
        return;
    };

    let sum = keypair.add(&c1, &c2);
    assert_eq!(keypair.decrypt(&sum).ok(), Some((&m1 + &m2) % n));

    let product = keypair.mul_scalar(&c1, &m2);
    assert_eq!(keypair.decrypt(&product).ok(), Some((&m1 * &m2) % n));
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let standard = STANDARD.get_or_init(|| StandardKeyPair::generate_with_size(512).unwrap());
    let modified = MODIFIED.get_or_init(|| ModifiedKeyPair::generate_with_size(512).unwrap());

    let (m1_bytes, m2_bytes) = data.split_at(data.len() / 2);
    let m1 = BigUint::from_bytes_be(m1_bytes);
    let m2 = BigUint::from_bytes_be(m2_bytes);

    check(standard, &m1, &m2);
    check(modified, &m1, &m2);
});
