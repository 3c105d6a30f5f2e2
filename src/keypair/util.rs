// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::crypto::util::{is_coprime, l_function};
use crate::error::{Error, Result};

/// Small odd primes used to reject candidates before Miller-Rabin.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Minimum number of free bits left in `t` when searching `p = 2·d·t + 1`.
pub(crate) const MIN_COFACTOR_BITS: usize = 16;

/// Number of Miller-Rabin rounds needed for a false-positive bound of
/// `2^-certainty`. Each round errs with probability at most 1/4.
#[inline]
pub(crate) const fn miller_rabin_rounds(certainty: usize) -> usize {
    let rounds = certainty.div_ceil(2);
    if rounds == 0 { 1 } else { rounds }
}

/// Random odd integer of exactly `bits` bits (MSB and LSB set).
#[inline]
fn generate_candidate<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    let mut candidate = rng.gen_biguint(bits);

    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one();

    candidate
}

/// Returns true if `n` is a proper multiple of a sieve prime.
#[inline]
fn has_small_factor(n: &BigUint) -> bool {
    for &prime in SIEVE_PRIMES {
        if (n % prime).is_zero() {
            return *n != BigUint::from(prime);
        }
    }
    false
}

/// Draws a probable prime of exactly `bits` bits whose false-positive
/// probability is bounded by `2^-certainty`.
pub(crate) fn generate_prime<R>(bits: usize, certainty: usize, rng: &mut R) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    debug_assert!(bits >= 2, "prime generation requires at least 2 bits");

    let rounds = miller_rabin_rounds(certainty);
    let mut tried = 0usize;
    loop {
        let candidate = generate_candidate(bits, rng);
        tried += 1;

        if has_small_factor(&candidate) {
            continue;
        }
        if probably_prime(&candidate, rounds) {
            log::trace!("found {bits}-bit prime after {tried} candidates");
            return candidate;
        }
    }
}

/// Draws two distinct, independently generated primes of `bits` bits each.
pub(crate) fn generate_prime_pair<R>(
    bits: usize,
    certainty: usize,
    rng: &mut R,
) -> (BigUint, BigUint)
where
    R: RngCore + CryptoRng + ?Sized,
{
    let p = generate_prime(bits, certainty, rng);
    let q = generate_distinct_prime(&p, bits, certainty, rng);
    (p, q)
}

/// Draws a prime of `bits` bits different from `other`.
pub(crate) fn generate_distinct_prime<R>(
    other: &BigUint,
    bits: usize,
    certainty: usize,
    rng: &mut R,
) -> BigUint
where
    R: RngCore + CryptoRng + ?Sized,
{
    loop {
        let q = generate_prime(bits, certainty, rng);
        if q != *other {
            return q;
        }
        log::debug!("drew the same prime twice, redrawing");
    }
}

/// Draws a prime `p = 2·d·t + 1` of exactly `bits` bits, so that `d | p - 1`.
///
/// `t` is uniform over the range that keeps `p` at the requested size.
pub(crate) fn generate_prime_with_divisor<R>(
    bits: usize,
    divisor: &BigUint,
    certainty: usize,
    rng: &mut R,
) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if divisor.is_zero() || bits < 2 {
        return Err(Error::InvalidParameters("divisor must be nonzero".into()));
    }

    let step = divisor << 1;
    let lower = BigUint::one() << (bits - 1);
    let upper = BigUint::one() << bits;

    // 2^(bits-1) <= step·t + 1 <= 2^bits - 1
    let t_min = (&lower - 1u32 + &step - 1u32) / &step;
    let t_max = (&upper - 2u32) / &step;
    if t_min.is_zero() || t_min > t_max {
        return Err(Error::InvalidParameters(format!(
            "a {}-bit divisor leaves no room in a {bits}-bit prime",
            divisor.bits()
        )));
    }

    let rounds = miller_rabin_rounds(certainty);
    let t_end = &t_max + 1u32;
    loop {
        let t = rng.gen_biguint_range(&t_min, &t_end);
        let candidate = &step * &t + 1u32;

        if has_small_factor(&candidate) {
            continue;
        }
        if probably_prime(&candidate, rounds) {
            return Ok(candidate);
        }
    }
}

/// Checks that `base^λ ≡ 1 (mod n)` and `gcd(L(base^λ mod n²), n) = 1`,
/// which together mean `n` divides the order of `base` in (ℤ/n²ℤ)*.
/// Returns `L(base^λ mod n²)`.
pub(crate) fn validate_generator(
    base: &BigUint,
    lambda: &BigUint,
    n: &BigUint,
    n_squared: &BigUint,
) -> Result<BigUint> {
    let u = base.modpow(lambda, n_squared);

    // L is only meaningful on exact quotients
    if !(&u % n).is_one() {
        return Err(Error::InvalidKeyMaterial);
    }
    let l = l_function(&u, n).ok_or(Error::InvalidKeyMaterial)?;

    if !is_coprime(&l, n) {
        return Err(Error::InvalidKeyMaterial);
    }
    Ok(l)
}

/// Validates caller-supplied primes: distinct odd primes with
/// `gcd(pq, (p-1)(q-1)) = 1`.
pub(crate) fn check_prime_pair(p: &BigUint, q: &BigUint, n: &BigUint) -> Result<()> {
    let three = BigUint::from(3u32);
    if p == q || *p < three || *q < three {
        return Err(Error::InvalidParameters("p and q must be distinct odd primes".into()));
    }
    if !probably_prime(p, 20) || !probably_prime(q, 20) {
        return Err(Error::InvalidParameters("p and q must be prime".into()));
    }
    check_totient_coprime(p, q, n)
}

/// `gcd(pq, (p-1)(q-1)) = 1`. Always true for primes of equal length.
pub(crate) fn check_totient_coprime(p: &BigUint, q: &BigUint, n: &BigUint) -> Result<()> {
    let phi = (p - 1u32) * (q - 1u32);
    if !is_coprime(n, &phi) {
        return Err(Error::InvalidKeyMaterial);
    }
    Ok(())
}

/// Runs `attempt` until it yields key material that passes validation.
///
/// Only [`Error::InvalidKeyMaterial`] is retried; any other error ends the
/// loop immediately.
pub(crate) fn with_retries<T, F>(max_retries: usize, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    for n in 1..=max_retries {
        match attempt() {
            Err(Error::InvalidKeyMaterial) => {
                log::debug!(
                    "key material rejected by generator check (attempt {n}/{max_retries}), \
                     drawing fresh primes"
                );
            }
            other => return other,
        }
    }

    Err(Error::KeyGenerationFailed {
        attempts: max_retries,
    })
}
