// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key material for the modified Paillier scheme.
//!
//! The public generator is `g = h^(λ/α) mod n²` for a small fixed base `h`
//! and a secret divisor `α | λ`. Decryption exponentiates by `α` instead of
//! `λ`, which is cheaper whenever `α` is much shorter than `λ`.

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{KeyPairBuilder, util};
use crate::crypto::PublicParams;
use crate::crypto::util::{carmichael_lambda, is_coprime, l_function};
use crate::error::{Error, Result};

/// Fixed base `h` from which the public generator is derived.
pub const BASE: u32 = 2;

/// Default randomizer bound `l`: randomizers are drawn from `[0, 2^l)`.
pub const DEFAULT_RANDOMIZER_BITS: usize = 320;

/// Public parameters `(n, g)`, the cached `n²`, and the randomizer bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) n_squared: BigUint,
    pub(crate) bit_length: usize,
    pub(crate) randomizer_bits: usize,
}

impl PublicKey {
    /// Construct a public key from `n`, `g` and the randomizer bound `l`.
    pub fn new(n: BigUint, g: BigUint, randomizer_bits: usize) -> Result<Self> {
        if n.is_zero() || g.is_zero() || randomizer_bits == 0 {
            return Err(Error::InvalidPublicKey);
        }

        let n_squared = &n * &n;
        if g >= n_squared {
            return Err(Error::InvalidPublicKey);
        }

        let bit_length = n.bits();
        Ok(Self {
            n,
            g,
            n_squared,
            bit_length,
            randomizer_bits,
        })
    }

    /// Return the generator `g = h^(λ/α) mod n²`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return `l`, the bit bound on encryption randomizers.
    pub fn randomizer_bits(&self) -> usize {
        self.randomizer_bits
    }
}

impl PublicParams for PublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    fn bit_length(&self) -> usize {
        self.bit_length
    }
}

/// Decryption exponent `α`. The inverse `μ'` is recomputed per decryption.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    pub(crate) alpha: BigUint,
}

impl PrivateKey {
    pub fn new(alpha: BigUint) -> Result<Self> {
        if alpha <= BigUint::one() {
            return Err(Error::InvalidPrivateKey);
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> &BigUint {
        &self.alpha
    }
}

/// Derive the key pair for `(p, q, α)` and validate the base.
fn derive(
    p: &BigUint,
    q: &BigUint,
    alpha: BigUint,
    randomizer_bits: usize,
) -> Result<(PublicKey, PrivateKey)> {
    let n = p * q;
    util::check_totient_coprime(p, q, &n)?;

    let lambda = carmichael_lambda(p, q);
    if alpha <= BigUint::one() || alpha >= lambda || !(&lambda % &alpha).is_zero() {
        return Err(Error::InvalidPrivateKey);
    }
    if alpha.bits() > randomizer_bits {
        return Err(Error::InvalidPrivateKey);
    }

    let n_squared = &n * &n;
    let h = BigUint::from(BASE);

    // h must have order divisible by n; then g^α = h^λ makes L(g^α) a unit.
    util::validate_generator(&h, &lambda, &n, &n_squared)?;

    let g = h.modpow(&(&lambda / &alpha), &n_squared);
    let public = PublicKey::new(n, g, randomizer_bits)?;
    let secret = PrivateKey::new(alpha)?;

    Ok((public, secret))
}

/// Checks that `α` decrypts under `(n, g)`: `g^α ≡ 1 (mod n)` and
/// `L(g^α mod n²)` is a unit mod `n`.
pub(crate) fn check_key_pair(public: &PublicKey, secret: &PrivateKey) -> Result<()> {
    let u = public.g.modpow(&secret.alpha, &public.n_squared);
    if !(&u % &public.n).is_one() {
        return Err(Error::InvalidPrivateKey);
    }

    let l = l_function(&u, &public.n).ok_or(Error::InvalidPrivateKey)?;
    if !is_coprime(&l, &public.n) {
        return Err(Error::InvalidPrivateKey);
    }
    Ok(())
}

/// Build a key pair from caller-supplied primes, a divisor `α` of `λ` and
/// the randomizer bound `l`.
pub(crate) fn from_primes(
    p: &BigUint,
    q: &BigUint,
    alpha: BigUint,
    randomizer_bits: usize,
) -> Result<(PublicKey, PrivateKey)> {
    util::check_prime_pair(p, q, &(p * q))?;
    derive(p, q, alpha, randomizer_bits)
}

/// Key generation for the modified scheme.
///
/// `α` is drawn as a prime of `divisor_bits` bits and `p` is searched as
/// `2·α·t + 1`, so `α | p - 1 | λ` holds by construction.
pub(crate) fn generate<R>(builder: &KeyPairBuilder, rng: &mut R) -> Result<(PublicKey, PrivateKey)>
where
    R: RngCore + CryptoRng + ?Sized,
{
    builder.validate()?;
    builder.validate_divisor()?;

    let prime_bits = builder.bit_length / 2;
    util::with_retries(builder.max_retries, || {
        let alpha = util::generate_prime(builder.divisor_bits, builder.certainty, rng);
        let p = util::generate_prime_with_divisor(prime_bits, &alpha, builder.certainty, rng)?;
        let q = util::generate_distinct_prime(&p, prime_bits, builder.certainty, rng);

        derive(&p, &q, alpha, builder.randomizer_bits)
    })
}
