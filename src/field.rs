//! Scalar field arithmetic for the BN254 curve.
//!
//! `FieldElement` is arkworks' Montgomery-form `Fr`; every value is kept
//! reduced into `[0, p)` and arithmetic never mutates its operands. This
//! module adds the canonical wire encoding and the radix-2 evaluation domain
//! the verifier needs for rotations and the Lagrange basis.

use ark_ff::{batch_inversion, BigInt, BigInteger, FftField, Field, One, PrimeField, Zero};
use ark_serialize::CanonicalDeserialize;

use crate::constants::FIELD_BYTES;

pub use ark_bn254::Fr as FieldElement;

/// Exact embedding of a `u128`; the modulus exceeds `2^128`.
pub fn from_u128(value: u128) -> FieldElement {
    FieldElement::from(value)
}

/// Little-endian bytes of a four-limb integer.
pub(crate) fn bigint_to_le_bytes(value: &BigInt<4>) -> [u8; FIELD_BYTES] {
    let mut out = [0u8; FIELD_BYTES];
    out.copy_from_slice(&value.to_bytes_le());
    out
}

/// Canonical little-endian bytes of the reduced representative.
pub fn to_le_bytes(value: &FieldElement) -> [u8; FIELD_BYTES] {
    bigint_to_le_bytes(&value.into_bigint())
}

/// Decodes canonical little-endian bytes, rejecting values `>= p`.
pub fn from_canonical_le(bytes: &[u8; FIELD_BYTES]) -> Option<FieldElement> {
    FieldElement::deserialize_compressed(&bytes[..]).ok()
}

/// Reduces an arbitrary byte string modulo `p`. Used for challenges only.
pub fn from_uniform_bytes(bytes: &[u8]) -> FieldElement {
    FieldElement::from_le_bytes_mod_order(bytes)
}

/// Multiplicative domain `{1, omega, ..., omega^(n-1)}` with `n = 2^k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationDomain {
    k: u32,
    n: u64,
    omega: FieldElement,
    omega_inv: FieldElement,
    n_inv: FieldElement,
}

impl EvaluationDomain {
    /// Returns `None` when `k` exceeds the field's two-adicity.
    pub fn new(k: u32) -> Option<Self> {
        if k > FieldElement::TWO_ADICITY {
            return None;
        }
        let n = 1u64 << k;
        let omega = FieldElement::get_root_of_unity(n)?;
        let omega_inv = omega.inverse()?;
        let n_inv = FieldElement::from(n).inverse()?;
        Some(Self {
            k,
            n,
            omega,
            omega_inv,
            n_inv,
        })
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn size(&self) -> u64 {
        self.n
    }

    /// Generator of the domain.
    pub fn omega(&self) -> FieldElement {
        self.omega
    }

    /// `x^n`
    pub fn pow_n(&self, x: &FieldElement) -> FieldElement {
        x.pow([self.n])
    }

    /// `Z_H(x) = x^n - 1`
    pub fn vanishing_eval(&self, x: &FieldElement) -> FieldElement {
        self.pow_n(x) - FieldElement::one()
    }

    /// `omega^rotation * x`, negative rotations step backwards.
    pub fn rotate(&self, x: &FieldElement, rotation: i32) -> FieldElement {
        let step = if rotation < 0 {
            self.omega_inv
        } else {
            self.omega
        };
        *x * step.pow([u64::from(rotation.unsigned_abs())])
    }

    /// Evaluations `L_0(z), ..., L_{count-1}(z)` of the Lagrange basis.
    ///
    /// `L_i(z) = omega^i (z^n - 1) / (n (z - omega^i))`. Returns `None` when `z`
    /// lies inside the domain.
    pub fn lagrange_evals(&self, z: &FieldElement, count: usize) -> Option<Vec<FieldElement>> {
        let vanishing = self.vanishing_eval(z);
        if vanishing.is_zero() {
            return None;
        }
        if count == 0 {
            return Some(Vec::new());
        }
        let common = vanishing * self.n_inv;

        let mut omega_powers = Vec::with_capacity(count);
        let mut denominators = Vec::with_capacity(count);
        let mut current = FieldElement::one();
        for _ in 0..count {
            omega_powers.push(current);
            denominators.push(*z - current);
            current *= self.omega;
        }
        batch_inversion(&mut denominators);

        Some(
            omega_powers
                .iter()
                .zip(denominators.iter())
                .map(|(w, d_inv)| *w * common * d_inv)
                .collect(),
        )
    }
}
