// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during cryptographic operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The generator failed the order check `gcd(L(g^λ mod n²), n) = 1`.
    ///
    /// Key generation recovers from this by drawing fresh primes.
    #[error("Key material failed generator validation")]
    InvalidKeyMaterial,

    #[error("Key generation failed: no valid key material after {attempts} attempts")]
    KeyGenerationFailed { attempts: usize },

    #[error("Modular inverse does not exist")]
    NoInverse,

    #[error("Randomizer must be strictly below 2^{bits}")]
    InvalidRandomizer { bits: usize },

    #[error("Plaintext must lie in [0, n)")]
    OutOfRangePlaintext,

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,
}

pub type Result<T> = std::result::Result<T, Error>;
