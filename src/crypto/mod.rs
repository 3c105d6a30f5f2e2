// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;
pub mod util;

use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::keypair::{KeyPairBuilder, modified, standard};

/// Public modulus data shared by every scheme whose ciphertexts have the
/// form `g^x mod n²`.
pub trait PublicParams {
    /// Return the public modulus `n`.
    fn n(&self) -> &BigUint;

    /// Return the ciphertext modulus `n²`.
    fn n_squared(&self) -> &BigUint;

    /// Return the bit length of `n`.
    fn bit_length(&self) -> usize;
}

/// An additively homomorphic public-key cryptosystem over `(ℤ/n²ℤ)*`.
///
/// Plaintexts live in `[0, n)`, ciphertexts in `[0, n²)`. Multiplying two
/// ciphertexts adds their plaintexts and raising a ciphertext to `k`
/// multiplies its plaintext by `k`, both modulo `n`.
pub trait HomomorphicCryptosystem {
    type PublicKey: PublicParams;
    type PrivateKey;

    /// Generate fresh key material as configured by `builder`.
    fn generate_keys<R>(
        builder: &KeyPairBuilder,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::PrivateKey)>
    where
        R: RngCore + CryptoRng + ?Sized;

    /// Check that `priv_key` decrypts ciphertexts produced under `pub_key`.
    fn check_key_pair(pub_key: &Self::PublicKey, priv_key: &Self::PrivateKey) -> Result<()>;

    /// Draw a randomizer from the scheme's randomizer domain.
    fn sample_randomizer<R>(pub_key: &Self::PublicKey, rng: &mut R) -> BigUint
    where
        R: RngCore + CryptoRng + ?Sized;

    /// Encrypt `m` under a caller-chosen randomizer `r`.
    fn encrypt_with_randomizer(
        pub_key: &Self::PublicKey,
        m: &BigUint,
        r: &BigUint,
    ) -> Result<Ciphertext>;

    /// Recover the plaintext of a ciphertext produced under `pub_key`.
    ///
    /// A value in range that was not produced under `pub_key` decrypts to an
    /// arbitrary plaintext; the scheme carries no integrity tag.
    fn decrypt(
        priv_key: &Self::PrivateKey,
        pub_key: &Self::PublicKey,
        ciphertext: &Ciphertext,
    ) -> Result<BigUint>;

    /// Encrypt `m` under a freshly drawn randomizer.
    fn encrypt<R>(pub_key: &Self::PublicKey, m: &BigUint, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let r = Self::sample_randomizer(pub_key, rng);
        Self::encrypt_with_randomizer(pub_key, m, &r)
    }

    /// Homomorphic addition: `E(m₁) · E(m₂) mod n² = E(m₁ + m₂ mod n)`.
    fn add(pub_key: &Self::PublicKey, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        Ciphertext::new((c1.value() * c2.value()) % pub_key.n_squared())
    }

    /// Homomorphic scalar multiplication: `E(m)^k mod n² = E(m · k mod n)`.
    fn mul_scalar(pub_key: &Self::PublicKey, c: &Ciphertext, k: &BigUint) -> Ciphertext {
        Ciphertext::new(c.value().modpow(k, pub_key.n_squared()))
    }
}

/// The standard Paillier scheme: `c = g^m · r^n mod n²`, `r ∈ ℤ*_n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paillier;

/// The modified scheme: `c = g^(m + n·r) mod n²`, `r ∈ [0, 2^l)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifiedPaillier;

impl HomomorphicCryptosystem for Paillier {
    type PublicKey = standard::PublicKey;
    type PrivateKey = standard::PrivateKey;

    fn generate_keys<R>(
        builder: &KeyPairBuilder,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::PrivateKey)>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        standard::generate(builder, rng)
    }

    fn check_key_pair(pub_key: &Self::PublicKey, priv_key: &Self::PrivateKey) -> Result<()> {
        standard::check_key_pair(pub_key, priv_key)
    }

    fn sample_randomizer<R>(pub_key: &Self::PublicKey, rng: &mut R) -> BigUint
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        pub_key.sample_randomizer(rng)
    }

    fn encrypt_with_randomizer(
        pub_key: &Self::PublicKey,
        m: &BigUint,
        r: &BigUint,
    ) -> Result<Ciphertext> {
        pub_key.encrypt_with_randomizer(m, r)
    }

    fn decrypt(
        priv_key: &Self::PrivateKey,
        pub_key: &Self::PublicKey,
        ciphertext: &Ciphertext,
    ) -> Result<BigUint> {
        priv_key.decrypt(pub_key, ciphertext)
    }
}

impl HomomorphicCryptosystem for ModifiedPaillier {
    type PublicKey = modified::PublicKey;
    type PrivateKey = modified::PrivateKey;

    fn generate_keys<R>(
        builder: &KeyPairBuilder,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::PrivateKey)>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        modified::generate(builder, rng)
    }

    fn check_key_pair(pub_key: &Self::PublicKey, priv_key: &Self::PrivateKey) -> Result<()> {
        modified::check_key_pair(pub_key, priv_key)
    }

    fn sample_randomizer<R>(pub_key: &Self::PublicKey, rng: &mut R) -> BigUint
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        pub_key.sample_randomizer(rng)
    }

    fn encrypt_with_randomizer(
        pub_key: &Self::PublicKey,
        m: &BigUint,
        r: &BigUint,
    ) -> Result<Ciphertext> {
        pub_key.encrypt_with_randomizer(m, r)
    }

    fn decrypt(
        priv_key: &Self::PrivateKey,
        pub_key: &Self::PublicKey,
        ciphertext: &Ciphertext,
    ) -> Result<BigUint> {
        priv_key.decrypt(pub_key, ciphertext)
    }
}
