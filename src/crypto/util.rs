// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigInt, BigUint, ModInverse, Sign};
use num_integer::Integer;
use num_traits::{CheckedSub, One, Zero};

use crate::error::{Error, Result};

/// L(u) = (u - 1) / n
///
/// Exact division when `u ≡ 1 (mod n)`, which holds for `u = x^λ mod n²`
/// whenever `x` is a unit. Returns `None` for `u = 0`, the only input on
/// which the subtraction underflows.
#[inline]
pub fn l_function(u: &BigUint, n: &BigUint) -> Option<BigUint> {
    debug_assert!(!n.is_zero(), "n must be nonzero in L function");

    u.checked_sub(&BigUint::one()).map(|v| v / n)
}

/// Computes a⁻¹ mod m.
///
/// Fails with [`Error::NoInverse`] when `gcd(a, m) ≠ 1`.
pub fn mod_inverse<'i>(a: &'i BigUint, m: &'i BigUint) -> Result<BigUint> {
    if a.is_zero() {
        return Err(Error::NoInverse);
    }
    let inv = a.mod_inverse(m).ok_or(Error::NoInverse)?;

    // Normalize into [0, m) before leaving the signed domain.
    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    inv.mod_floor(&modulus).to_biguint().ok_or(Error::NoInverse)
}

/// Carmichael's function for n = pq: λ = lcm(p - 1, q - 1).
pub fn carmichael_lambda(p: &BigUint, q: &BigUint) -> BigUint {
    let p_minus_1 = p - BigUint::one();
    let q_minus_1 = q - BigUint::one();
    p_minus_1.lcm(&q_minus_1)
}

/// Returns true when `gcd(a, b) = 1`.
#[inline]
pub fn is_coprime(a: &BigUint, b: &BigUint) -> bool {
    a.gcd(b).is_one()
}
