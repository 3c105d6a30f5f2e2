// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::{CryptoRng, RngCore};

use super::util::is_coprime;
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keypair::{modified, standard};

impl standard::PublicKey {
    /// Uniform `r ∈ [1, 2^bit_length)` with `gcd(r, n) = 1`.
    pub(crate) fn sample_randomizer<R>(&self, rng: &mut R) -> BigUint
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        loop {
            let r = rng.gen_biguint(self.bit_length);
            if !r.is_zero() && is_coprime(&r, &self.n) {
                return r;
            }
        }
    }

    /// c = g^m · r^n mod n²
    ///
    /// `r` is expected to be a unit mod `n`; this is not checked.
    pub(crate) fn encrypt_with_randomizer(&self, m: &BigUint, r: &BigUint) -> Result<Ciphertext> {
        if m >= &self.n {
            return Err(Error::OutOfRangePlaintext);
        }

        let gm = self.g.modpow(m, &self.n_squared);
        let rn = r.modpow(&self.n, &self.n_squared);
        let c = (gm * rn) % &self.n_squared;

        Ok(Ciphertext::new(c))
    }
}

impl modified::PublicKey {
    /// Uniform `r ∈ [0, 2^l)`.
    pub(crate) fn sample_randomizer<R>(&self, rng: &mut R) -> BigUint
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        rng.gen_biguint(self.randomizer_bits)
    }

    /// c = g^(m + n·r) mod n²
    ///
    /// Fails with [`Error::InvalidRandomizer`] when `r ≥ 2^l`; the check runs
    /// before any exponentiation.
    pub(crate) fn encrypt_with_randomizer(&self, m: &BigUint, r: &BigUint) -> Result<Ciphertext> {
        if r.bits() > self.randomizer_bits {
            return Err(Error::InvalidRandomizer {
                bits: self.randomizer_bits,
            });
        }
        if m >= &self.n {
            return Err(Error::OutOfRangePlaintext);
        }

        let exponent = m + &self.n * r;
        let c = self.g.modpow(&exponent, &self.n_squared);

        Ok(Ciphertext::new(c))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::crypto::{HomomorphicCryptosystem, ModifiedPaillier, Paillier, PublicParams};
    use crate::keypair::{KeyPairBuilder, ModifiedKeyPair, StandardKeyPair};
    use num_traits::One;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn standard_plaintext_must_be_below_n() {
        let keypair = StandardKeyPair::from_primes(&big(11), &big(13)).unwrap();

        assert_eq!(
            keypair.encrypt_with_randomizer(&big(143), &big(2)),
            Err(Error::OutOfRangePlaintext)
        );
        assert!(keypair.encrypt_with_randomizer(&big(142), &big(2)).is_ok());
    }

    #[test]
    fn modified_plaintext_must_be_below_n() {
        let keypair = ModifiedKeyPair::from_primes(&big(11), &big(13), big(10)).unwrap();
        assert_eq!(
            keypair.encrypt_with_randomizer(&big(1000), &big(2)),
            Err(Error::OutOfRangePlaintext)
        );
    }

    #[test]
    fn randomizer_at_bound_is_rejected() {
        let keypair = ModifiedKeyPair::from_primes(&big(11), &big(13), big(10)).unwrap();
        let l = keypair.public_key().randomizer_bits();

        let at_bound = BigUint::one() << l;
        assert_eq!(
            keypair.encrypt_with_randomizer(&big(5), &at_bound),
            Err(Error::InvalidRandomizer { bits: l })
        );

        let below_bound = &at_bound - 1u32;
        let c = keypair.encrypt_with_randomizer(&big(5), &below_bound).unwrap();
        assert_eq!(keypair.decrypt(&c).unwrap(), big(5));
    }

    #[test]
    fn zero_randomizer_round_trips() {
        let keypair = ModifiedKeyPair::from_primes(&big(11), &big(13), big(10)).unwrap();

        // r = 0 leaves c = g^m = 64^5 mod 143²
        let c = keypair.encrypt_with_randomizer(&big(5), &BigUint::zero()).unwrap();
        assert_eq!(c.value(), &big(64).modpow(&big(5), &big(20449)));
        assert_eq!(keypair.decrypt(&c).unwrap(), big(5));
    }

    #[test]
    fn custom_bound_applies_to_known_keys() {
        let keypair =
            ModifiedKeyPair::from_primes_with_bound(&big(11), &big(13), big(10), 8).unwrap();

        let c = keypair.encrypt_with_randomizer(&big(7), &big(255)).unwrap();
        assert_eq!(keypair.decrypt(&c).unwrap(), big(7));
        assert_eq!(
            keypair.encrypt_with_randomizer(&big(7), &big(256)),
            Err(Error::InvalidRandomizer { bits: 8 })
        );

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..32 {
            let r = ModifiedPaillier::sample_randomizer(keypair.public_key(), &mut rng);
            assert!(r < big(256));
        }
    }

    #[test]
    fn randomizer_is_checked_before_plaintext() {
        let keypair = ModifiedKeyPair::from_primes(&big(11), &big(13), big(10)).unwrap();
        let huge = BigUint::one() << 400usize;
        assert!(matches!(
            keypair.encrypt_with_randomizer(&big(1000), &huge),
            Err(Error::InvalidRandomizer { .. })
        ));
    }

    #[test]
    fn sampled_randomizers_respect_their_domain() {
        let mut rng = StdRng::seed_from_u64(3);
        let standard = StandardKeyPair::from_primes(&big(11), &big(13)).unwrap();
        let modified = ModifiedKeyPair::from_primes(&big(11), &big(13), big(10)).unwrap();

        for _ in 0..64 {
            let r = Paillier::sample_randomizer(standard.public_key(), &mut rng);
            assert!(!r.is_zero());
            assert!(r.bits() <= standard.public_key().bit_length());
            assert!(is_coprime(&r, standard.public_key().n()));

            let r = ModifiedPaillier::sample_randomizer(modified.public_key(), &mut rng);
            assert!(r.bits() <= modified.public_key().randomizer_bits());
        }
    }

    #[test]
    fn ciphertexts_lie_below_n_squared() {
        let mut rng = StdRng::seed_from_u64(8);
        let keypair: StandardKeyPair = KeyPairBuilder::new()
            .bit_length(512)
            .build_with_rng(&mut rng)
            .unwrap();

        let m = keypair.public_key().n() - 1u32;
        let c = keypair.encrypt_with_rng(&m, &mut rng).unwrap();
        assert!(c.value() < keypair.public_key().n_squared());
    }
}
