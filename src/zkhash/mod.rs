//! Two-input hashing natives.
//!
//! Two modes exist and each has its own entry point:
//!
//! * [`poseidon_hash`]: production Poseidon over BN254 `Fr`;
//! * [`fake_hash`]: deterministic, non-cryptographic, for test suites that
//!   need speed over security.
//!
//! Hosts that pick the mode from their build configuration pass a
//! [`HashMode`] explicitly; there is no process-wide mode switch.

use core::fmt;

use ark_ff::BigInt;

pub mod fast;
mod grain;
pub mod poseidon;

use crate::constants::POSEIDON_DOMAIN;
use crate::field::{self, FieldElement};

/// 256-bit unsigned hash output, stored little-endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest([u8; 32]);

impl Digest {
    pub const fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_limbs(limbs: [u64; 4]) -> Self {
        Self(field::bigint_to_le_bytes(&BigInt::new(limbs)))
    }

    /// Integer value of a field element's canonical representative.
    pub fn from_field(value: &FieldElement) -> Self {
        Self(field::to_le_bytes(value))
    }

    pub fn to_le_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = self.0;
        out.reverse();
        out
    }

    /// Four little-endian 64-bit limbs, the layout of a host `u256`.
    pub fn to_limbs(&self) -> [u64; 4] {
        let mut limbs = [0u64; 4];
        for (limb, chunk) in limbs.iter_mut().zip(self.0.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }
        limbs
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&format_args!("{self}")).finish()
    }
}

/// Which backend a host routes its hash calls to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashMode {
    #[default]
    Poseidon,
    Fast,
}

impl HashMode {
    pub fn hash(self, a: u128, b: u128) -> Digest {
        match self {
            HashMode::Poseidon => poseidon_hash(a, b),
            HashMode::Fast => fake_hash(a, b),
        }
    }
}

/// Poseidon hash of two 128-bit integers, domain-separated with capacity `1`.
pub fn poseidon_hash(a: u128, b: u128) -> Digest {
    let out = poseidon::hash_with_domain(
        [field::from_u128(a), field::from_u128(b)],
        FieldElement::from(POSEIDON_DOMAIN),
    );
    Digest::from_field(&out)
}

/// Fast deterministic stand-in for [`poseidon_hash`].
pub fn fake_hash(a: u128, b: u128) -> Digest {
    Digest::from_limbs(fast::fast_hash_limbs(a, b))
}
