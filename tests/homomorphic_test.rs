// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used)]

use std::sync::OnceLock;

use num_bigint_dig::{BigUint, RandBigInt};
use paillier::{
    Error, HomomorphicCryptosystem, KeyPair, KeyPairBuilder, ModifiedKeyPair, ModifiedPaillier,
    Paillier, PublicParams, StandardKeyPair,
};
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;

static STANDARD: OnceLock<StandardKeyPair> = OnceLock::new();
static MODIFIED: OnceLock<ModifiedKeyPair> = OnceLock::new();

fn builder() -> KeyPairBuilder {
    KeyPairBuilder::new().bit_length(512).certainty(64)
}

fn standard() -> &'static StandardKeyPair {
    STANDARD.get_or_init(|| builder().build_with_rng(&mut StdRng::seed_from_u64(1)).unwrap())
}

fn modified() -> &'static ModifiedKeyPair {
    MODIFIED.get_or_init(|| builder().build_with_rng(&mut StdRng::seed_from_u64(2)).unwrap())
}

fn round_trips<S: HomomorphicCryptosystem>(keypair: &KeyPair<S>, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = keypair.public_key().n().clone();

    for _ in 0..100 {
        let m = rng.gen_biguint_below(&n);
        let c = keypair.encrypt_with_rng(&m, &mut rng).unwrap();
        assert_eq!(keypair.decrypt(&c).unwrap(), m);
    }
}

fn sum_decrypts<S: HomomorphicCryptosystem>(keypair: &KeyPair<S>, a: u64, b: u64) -> bool {
    let n = keypair.public_key().n();
    let (a, b) = (BigUint::from(a), BigUint::from(b));

    let c1 = keypair.encrypt(&a).unwrap();
    let c2 = keypair.encrypt(&b).unwrap();
    let sum = keypair.add(&c1, &c2);

    keypair.decrypt(&sum).unwrap() == (a + b) % n
}

fn product_decrypts<S: HomomorphicCryptosystem>(keypair: &KeyPair<S>, a: u64, k: u64) -> bool {
    let n = keypair.public_key().n();
    let (a, k) = (BigUint::from(a), BigUint::from(k));

    let c = keypair.encrypt(&a).unwrap();
    let product = keypair.mul_scalar(&c, &k);

    keypair.decrypt(&product).unwrap() == (a * k) % n
}

#[test]
fn standard_512_bit_round_trip() {
    round_trips(standard(), 100);
}

#[test]
fn modified_512_bit_round_trip() {
    round_trips(modified(), 200);
}

#[test]
fn keygen_terminates_for_seeded_randomness() {
    for seed in 0..4 {
        let keypair: StandardKeyPair = builder()
            .max_retries(8)
            .build_with_rng(&mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert!(keypair.public_key().n().bits() >= 511);

        let keypair: ModifiedKeyPair = builder()
            .max_retries(8)
            .build_with_rng(&mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert!(keypair.public_key().n().bits() >= 511);
    }
}

#[quickcheck]
fn standard_addition_is_homomorphic(a: u64, b: u64) -> bool {
    sum_decrypts(standard(), a, b)
}

#[quickcheck]
fn modified_addition_is_homomorphic(a: u64, b: u64) -> bool {
    sum_decrypts(modified(), a, b)
}

#[quickcheck]
fn standard_scalar_multiplication_is_homomorphic(a: u64, k: u64) -> bool {
    product_decrypts(standard(), a, k)
}

#[quickcheck]
fn modified_scalar_multiplication_is_homomorphic(a: u64, k: u64) -> bool {
    product_decrypts(modified(), a, k)
}

#[test]
fn addition_wraps_at_modulus() {
    let keypair = standard();
    let n = keypair.public_key().n();
    let big = n - 1u32;

    let c1 = keypair.encrypt(&big).unwrap();
    let c2 = keypair.encrypt(&big).unwrap();
    let sum = Paillier::add(keypair.public_key(), &c1, &c2);

    assert_eq!(keypair.decrypt(&sum).unwrap(), (&big + &big) % n);
}

#[test]
fn encryption_is_probabilistic() {
    let m = BigUint::from(1234u32);

    let s1 = standard().encrypt(&m).unwrap();
    let s2 = standard().encrypt(&m).unwrap();
    assert_ne!(s1, s2);
    assert_eq!(standard().decrypt(&s1).unwrap(), m);
    assert_eq!(standard().decrypt(&s2).unwrap(), m);

    let m1 = modified().encrypt(&m).unwrap();
    let m2 = modified().encrypt(&m).unwrap();
    assert_ne!(m1, m2);
    assert_eq!(modified().decrypt(&m1).unwrap(), m);
    assert_eq!(modified().decrypt(&m2).unwrap(), m);
}

#[test]
fn modified_randomizer_range() {
    let keypair = modified();
    let l = keypair.public_key().randomizer_bits();
    let m = BigUint::from(99u32);

    let too_large = BigUint::from(1u32) << l;
    let err = ModifiedPaillier::encrypt_with_randomizer(keypair.public_key(), &m, &too_large);
    assert_eq!(err, Err(Error::InvalidRandomizer { bits: l }));

    let ok = &too_large - 1u32;
    let c = keypair.encrypt_with_randomizer(&m, &ok).unwrap();
    assert_eq!(keypair.decrypt(&c).unwrap(), m);
}

#[test]
fn out_of_range_plaintext_is_rejected() {
    let n = standard().public_key().n().clone();
    assert_eq!(standard().encrypt(&n), Err(Error::OutOfRangePlaintext));

    let n = modified().public_key().n().clone();
    assert_eq!(modified().encrypt(&n), Err(Error::OutOfRangePlaintext));
}

#[test]
fn toy_scenario_from_known_primes() {
    let p = BigUint::from(11u32);
    let q = BigUint::from(13u32);
    let (m1, m2) = (BigUint::from(5u32), BigUint::from(7u32));

    let keypair = StandardKeyPair::from_primes(&p, &q).unwrap();
    let mut rng = StdRng::seed_from_u64(143);
    let c1 = keypair.encrypt_with_rng(&m1, &mut rng).unwrap();
    let c2 = keypair.encrypt_with_rng(&m2, &mut rng).unwrap();
    assert_eq!(keypair.decrypt(&keypair.add(&c1, &c2)).unwrap(), BigUint::from(12u32));
    assert_eq!(keypair.decrypt(&keypair.mul_scalar(&c1, &m2)).unwrap(), BigUint::from(35u32));

    let keypair = ModifiedKeyPair::from_primes(&p, &q, BigUint::from(10u32)).unwrap();
    let c1 = keypair.encrypt_with_rng(&m1, &mut rng).unwrap();
    let c2 = keypair.encrypt_with_rng(&m2, &mut rng).unwrap();
    assert_eq!(keypair.decrypt(&keypair.add(&c1, &c2)).unwrap(), BigUint::from(12u32));
    assert_eq!(keypair.decrypt(&keypair.mul_scalar(&c1, &m2)).unwrap(), BigUint::from(35u32));
}

#[test]
fn key_material_is_shareable_across_threads() {
    let keypair = standard();
    let m = BigUint::from(77u32);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let c = keypair.encrypt(&m).unwrap();
                assert_eq!(keypair.decrypt(&c).unwrap(), m);
            });
        }
    });
}
