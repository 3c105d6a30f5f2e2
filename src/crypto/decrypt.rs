// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_traits::Zero;

use super::util::{l_function, mod_inverse};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{modified, standard};

/// Rejects values outside `(0, n²)`.
///
/// Zero is not a valid ciphertext under either scheme and would underflow L.
#[inline]
fn check_range<'c>(ciphertext: &'c Ciphertext, n_squared: &BigUint) -> Result<&'c BigUint> {
    let c = ciphertext.value();
    if c.is_zero() || c >= n_squared {
        return Err(Error::InvalidCiphertext);
    }
    Ok(c)
}

impl standard::PrivateKey {
    /// m = L(c^λ mod n²) · μ mod n
    pub(crate) fn decrypt(
        &self,
        pub_key: &standard::PublicKey,
        ciphertext: &Ciphertext,
    ) -> Result<BigUint> {
        let c = check_range(ciphertext, &pub_key.n_squared)?;

        let u = c.modpow(&self.lambda, &pub_key.n_squared);
        let l = l_function(&u, &pub_key.n).ok_or(Error::InvalidCiphertext)?;

        Ok((l * &self.mu) % &pub_key.n)
    }
}

impl modified::PrivateKey {
    /// m = L(c^α mod n²) · L(g^α mod n²)⁻¹ mod n
    pub(crate) fn decrypt(
        &self,
        pub_key: &modified::PublicKey,
        ciphertext: &Ciphertext,
    ) -> Result<BigUint> {
        let c = check_range(ciphertext, &pub_key.n_squared)?;

        // μ' is not stored with the key; key generation guarantees it exists.
        let g_alpha = pub_key.g.modpow(&self.alpha, &pub_key.n_squared);
        let l_g = l_function(&g_alpha, &pub_key.n).ok_or(Error::NoInverse)?;
        let mu = mod_inverse(&l_g, &pub_key.n)?;

        let u = c.modpow(&self.alpha, &pub_key.n_squared);
        let l_c = l_function(&u, &pub_key.n).ok_or(Error::InvalidCiphertext)?;

        Ok((l_c * mu) % &pub_key.n)
    }
}
