// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key material for the standard Paillier scheme (Paillier 1999).

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::KeyPairBuilder;
use super::util;
use crate::crypto::PublicParams;
use crate::crypto::util::{carmichael_lambda, mod_inverse};
use crate::error::{Error, Result};

/// Fixed generator. Valid whenever `gcd(L(2^λ mod n²), n) = 1`.
pub const GENERATOR: u32 = 2;

/// Public parameters `(n, g)` with the cached square `n²`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) n_squared: BigUint,
    pub(crate) bit_length: usize,
}

impl PublicKey {
    /// Construct a public key from `n` and `g`.
    ///
    /// `n` must be nonzero and `g` must lie in `[1, n²)`.
    pub fn new(n: BigUint, g: BigUint) -> Result<Self> {
        if n.is_zero() || g.is_zero() {
            return Err(Error::InvalidPublicKey);
        }

        let n_squared = &n * &n;
        if g >= n_squared {
            return Err(Error::InvalidPublicKey);
        }

        let bit_length = n.bits();
        Ok(Self { n, g, n_squared, bit_length })
    }

    /// Return the generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
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

/// Decryption key `(λ, μ)`. Zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    /// λ = lcm(p - 1, q - 1)
    pub(crate) lambda: BigUint,

    /// μ = L(g^λ mod n²)⁻¹ mod n
    pub(crate) mu: BigUint,
}

impl PrivateKey {
    /// Construct a private key from `λ` and `μ`.
    pub fn new(lambda: BigUint, mu: BigUint) -> Result<Self> {
        if lambda.is_zero() || mu.is_zero() {
            return Err(Error::InvalidPrivateKey);
        }
        Ok(Self { lambda, mu })
    }

    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    pub fn mu(&self) -> &BigUint {
        &self.mu
    }
}

/// Derive the key pair for a given prime pair and validate the generator.
fn derive(p: &BigUint, q: &BigUint) -> Result<(PublicKey, PrivateKey)> {
    let n = p * q;
    util::check_totient_coprime(p, q, &n)?;

    let public = PublicKey::new(n, BigUint::from(GENERATOR))?;
    let lambda = carmichael_lambda(p, q);

    let l = util::validate_generator(&public.g, &lambda, &public.n, &public.n_squared)?;
    let mu = mod_inverse(&l, &public.n)?;

    let secret = PrivateKey::new(lambda, mu)?;
    Ok((public, secret))
}

/// Checks that `(λ, μ)` decrypts under `(n, g)`: `g` passes the generator
/// check for `λ` and `μ · L(g^λ mod n²) ≡ 1 (mod n)`.
pub(crate) fn check_key_pair(public: &PublicKey, secret: &PrivateKey) -> Result<()> {
    let l = util::validate_generator(&public.g, &secret.lambda, &public.n, &public.n_squared)
        .map_err(|_| Error::InvalidPrivateKey)?;

    if !((l * &secret.mu) % &public.n).is_one() {
        return Err(Error::InvalidPrivateKey);
    }
    Ok(())
}

/// Build a key pair from caller-supplied primes.
///
/// No size floor applies, so this accepts toy primes for known-answer tests.
pub(crate) fn from_primes(p: &BigUint, q: &BigUint) -> Result<(PublicKey, PrivateKey)> {
    util::check_prime_pair(p, q, &(p * q))?;
    derive(p, q)
}

/// Key generation: draw fresh primes until the generator check passes.
pub(crate) fn generate<R>(builder: &KeyPairBuilder, rng: &mut R) -> Result<(PublicKey, PrivateKey)>
where
    R: RngCore + CryptoRng + ?Sized,
{
    builder.validate()?;

    let prime_bits = builder.bit_length / 2;
    util::with_retries(builder.max_retries, || {
        let (p, q) = util::generate_prime_pair(prime_bits, builder.certainty, rng);
        derive(&p, &q)
    })
}
