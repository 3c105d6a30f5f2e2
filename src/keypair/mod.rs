// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod modified;
pub mod standard;
pub(crate) mod util;

use num_bigint_dig::BigUint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::crypto::{HomomorphicCryptosystem, ModifiedPaillier, Paillier};
use crate::error::{Error, Result};

/// Key pair for the standard scheme.
pub type StandardKeyPair = KeyPair<Paillier>;

/// Key pair for the modified scheme.
pub type ModifiedKeyPair = KeyPair<ModifiedPaillier>;

/// A complete key pair for scheme `S`.
///
/// Key material is immutable after construction; a shared reference may be
/// used from several threads at once. Secret material is zeroized on drop.
#[allow(missing_debug_implementations)]
pub struct KeyPair<S: HomomorphicCryptosystem> {
    public: S::PublicKey,
    secret: S::PrivateKey,
}

impl<S: HomomorphicCryptosystem> KeyPair<S> {
    /// Generate a key pair with default parameters (2048-bit modulus).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Assemble a key pair from existing components.
    ///
    /// Fails with [`Error::InvalidPrivateKey`] unless `secret` decrypts
    /// under `public`.
    pub fn from_parts(public: S::PublicKey, secret: S::PrivateKey) -> Result<Self> {
        S::check_key_pair(&public, &secret)?;
        Ok(Self { public, secret })
    }

    /// Return the public key.
    pub fn public_key(&self) -> &S::PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &S::PrivateKey {
        &self.secret
    }

    /// Encrypt `m` with a randomizer drawn from the OS generator.
    pub fn encrypt(&self, m: &BigUint) -> Result<Ciphertext> {
        S::encrypt(&self.public, m, &mut OsRng)
    }

    /// Encrypt `m` with a randomizer drawn from `rng`.
    pub fn encrypt_with_rng<R>(&self, m: &BigUint, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        S::encrypt(&self.public, m, rng)
    }

    /// Encrypt `m` with a caller-chosen randomizer.
    pub fn encrypt_with_randomizer(&self, m: &BigUint, r: &BigUint) -> Result<Ciphertext> {
        S::encrypt_with_randomizer(&self.public, m, r)
    }

    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint> {
        S::decrypt(&self.secret, &self.public, ciphertext)
    }

    /// Ciphertext of `m1 + m2 mod n`.
    pub fn add(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        S::add(&self.public, c1, c2)
    }

    /// Ciphertext of `m · k mod n`.
    pub fn mul_scalar(&self, c: &Ciphertext, k: &BigUint) -> Ciphertext {
        S::mul_scalar(&self.public, c, k)
    }
}

impl KeyPair<Paillier> {
    /// Build a standard key pair from known primes.
    ///
    /// Skips the size floor but applies every structural check. Intended for
    /// known-answer tests.
    pub fn from_primes(p: &BigUint, q: &BigUint) -> Result<Self> {
        let (public, secret) = standard::from_primes(p, q)?;
        Ok(Self { public, secret })
    }
}

impl KeyPair<ModifiedPaillier> {
    /// Build a modified key pair from known primes and a divisor `α` of
    /// `λ = lcm(p - 1, q - 1)`.
    pub fn from_primes(p: &BigUint, q: &BigUint, alpha: BigUint) -> Result<Self> {
        Self::from_primes_with_bound(p, q, alpha, modified::DEFAULT_RANDOMIZER_BITS)
    }

    /// Like [`KeyPair::from_primes`] with randomizers bounded by `2^l`.
    pub fn from_primes_with_bound(
        p: &BigUint,
        q: &BigUint,
        alpha: BigUint,
        randomizer_bits: usize,
    ) -> Result<Self> {
        let (public, secret) = modified::from_primes(p, q, alpha, randomizer_bits)?;
        Ok(Self { public, secret })
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPairBuilder {
    pub(crate) bit_length: usize,
    pub(crate) certainty: usize,
    pub(crate) max_retries: usize,
    pub(crate) randomizer_bits: usize,
    pub(crate) divisor_bits: usize,
}

impl KeyPairBuilder {
    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: 2048,
            certainty: 64,
            max_retries: 16,
            randomizer_bits: modified::DEFAULT_RANDOMIZER_BITS,
            divisor_bits: 160,
        }
    }

    /// Minimum recommended for production (NIST/ENISA standard)
    pub const MIN_SECURE_BITS: usize = 2048;

    /// Absolute minimum enforced in production builds
    /// Can be bypassed with `allow-weak-keys` feature flag
    #[cfg(not(feature = "allow-weak-keys"))]
    const ABSOLUTE_MIN_BITS: usize = 512;

    #[cfg(feature = "allow-weak-keys")]
    const ABSOLUTE_MIN_BITS: usize = 128;

    /// Set the desired modulus bit length. Each prime gets half.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Primality certainty: false positives occur with probability at most
    /// `2^-certainty`.
    pub fn certainty(mut self, certainty: usize) -> Self {
        self.certainty = certainty;
        self
    }

    /// How many times to draw fresh primes when the generator check fails.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Bit bound `l` on modified-scheme randomizers.
    pub fn randomizer_bits(mut self, bits: usize) -> Self {
        self.randomizer_bits = bits;
        self
    }

    /// Bit length of the modified-scheme decryption exponent `α`.
    pub fn divisor_bits(mut self, bits: usize) -> Self {
        self.divisor_bits = bits;
        self
    }

    /// Generate a key pair for scheme `S` using the OS generator.
    pub fn build<S: HomomorphicCryptosystem>(&self) -> Result<KeyPair<S>> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate a key pair for scheme `S` drawing entropy from `rng`.
    pub fn build_with_rng<S, R>(&self, rng: &mut R) -> Result<KeyPair<S>>
    where
        S: HomomorphicCryptosystem,
        R: RngCore + CryptoRng + ?Sized,
    {
        let (public, secret) = S::generate_keys(self, rng)?;
        Ok(KeyPair { public, secret })
    }

    /// Check the settings shared by both schemes.
    pub(crate) fn validate(&self) -> Result<()> {
        // Hard block dangerously small keys
        if self.bit_length < Self::ABSOLUTE_MIN_BITS {
            return Err(Error::InvalidKeySize {
                min: Self::ABSOLUTE_MIN_BITS,
                actual: self.bit_length,
            });
        }
        if self.bit_length % 2 != 0 {
            return Err(Error::InvalidParameters("bit length must be even".into()));
        }
        if self.certainty == 0 {
            return Err(Error::InvalidParameters("certainty must be positive".into()));
        }
        if self.max_retries == 0 {
            return Err(Error::InvalidParameters("max_retries must be positive".into()));
        }

        if self.bit_length < Self::MIN_SECURE_BITS {
            log::warn!(
                "{}-bit key is cryptographically weak, use {} bits minimum for production",
                self.bit_length,
                Self::MIN_SECURE_BITS
            );
        }
        Ok(())
    }

    /// Check the modified-scheme divisor settings against the prime size.
    pub(crate) fn validate_divisor(&self) -> Result<()> {
        if self.randomizer_bits == 0 {
            return Err(Error::InvalidParameters("randomizer bits must be positive".into()));
        }
        if self.divisor_bits < 2 || self.divisor_bits > self.randomizer_bits {
            return Err(Error::InvalidParameters(format!(
                "divisor bits must lie in [2, {}], got {}",
                self.randomizer_bits, self.divisor_bits
            )));
        }

        let prime_bits = self.bit_length / 2;
        if self.divisor_bits + util::MIN_COFACTOR_BITS > prime_bits {
            return Err(Error::InvalidParameters(format!(
                "a {}-bit divisor does not fit in {prime_bits}-bit primes",
                self.divisor_bits
            )));
        }
        Ok(())
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
