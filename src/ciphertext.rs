// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Deref;

use num_bigint_dig::BigUint;

/// An encrypted value in `[0, n²)`.
///
/// Ciphertexts carry no reference to the key that produced them. Combining
/// ciphertexts from different keys is not detected and yields garbage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_inner(self) -> BigUint {
        self.value
    }

    /// Big-endian encoding of the ciphertext value.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }
}

impl Deref for Ciphertext {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for Ciphertext {
    fn from(bytes: &[u8]) -> Self {
        Self::new(BigUint::from_bytes_be(bytes))
    }
}
