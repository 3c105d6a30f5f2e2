// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Cryptosystem
//!
//! Probabilistic public-key encryption with additive homomorphism, based on
//! the composite residuosity problem modulo n² for n = pq.
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! Two variants share one interface, [`HomomorphicCryptosystem`]:
//!
//! - [`Paillier`]: `c = g^m · r^n mod n²` with private key `(λ, μ)`.
//! - [`ModifiedPaillier`]: `c = g^(m + n·r) mod n²` with `g = h^(λ/α)` and
//!   private key `α`, a divisor of `λ`. Randomizers are bounded by `2^l`.
//!
//! In both, multiplying ciphertexts adds plaintexts and exponentiating a
//! ciphertext by `k` multiplies its plaintext by `k`, modulo `n`.
//!
//! ## Security
//!
//! Exponentiation uses `num-bigint-dig`, which is not constant time.
//! Private keys are zeroized on drop via the `zeroize` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use num_bigint_dig::BigUint;
//! use paillier::StandardKeyPair;
//!
//! let keypair = StandardKeyPair::generate_with_size(2048).expect("key generation failed");
//!
//! let a = keypair.encrypt(&BigUint::from(20u32)).expect("encryption failed");
//! let b = keypair.encrypt(&BigUint::from(22u32)).expect("encryption failed");
//!
//! let sum = keypair.add(&a, &b);
//! assert_eq!(keypair.decrypt(&sum).expect("decryption failed"), BigUint::from(42u32));
//! ```

mod ciphertext;
mod crypto;
mod error;
mod keypair;

pub use ciphertext::Ciphertext;
pub use crypto::{HomomorphicCryptosystem, ModifiedPaillier, Paillier, PublicParams};
pub use error::{Error, Result};
pub use keypair::{KeyPair, KeyPairBuilder, ModifiedKeyPair, StandardKeyPair, modified, standard};

/// Modular arithmetic helpers used by both schemes.
pub mod arith {
    pub use crate::crypto::util::{carmichael_lambda, is_coprime, l_function, mod_inverse};
}
