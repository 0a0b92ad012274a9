//! BN254 group encodings and the pairing check.
//!
//! - G1 on the wire: 32-byte compressed x with sign/infinity flags
//! - G2 on the wire: 64-byte compressed (x.c0 | x.c1) with flags
//! - Decoding checks curve and subgroup membership, then re-encodes and
//!   compares so every accepted point has exactly one byte representation.

use ark_bn254::{Bn254, G1Affine, G1Projective, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::CurveGroup;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::Zero;

use crate::constants::{G1_BYTES, G2_BYTES};
use crate::field::FieldElement;

pub fn decode_g1(bytes: &[u8; G1_BYTES]) -> Option<G1Affine> {
    let point = G1Affine::deserialize_compressed(&bytes[..]).ok()?;
    (encode_g1(&point)? == *bytes).then_some(point)
}

pub fn encode_g1(point: &G1Affine) -> Option<[u8; G1_BYTES]> {
    let mut out = [0u8; G1_BYTES];
    point.serialize_compressed(&mut out[..]).ok()?;
    Some(out)
}

pub fn decode_g2(bytes: &[u8; G2_BYTES]) -> Option<G2Affine> {
    let point = G2Affine::deserialize_compressed(&bytes[..]).ok()?;
    (encode_g2(&point)? == *bytes).then_some(point)
}

pub fn encode_g2(point: &G2Affine) -> Option<[u8; G2_BYTES]> {
    let mut out = [0u8; G2_BYTES];
    point.serialize_compressed(&mut out[..]).ok()?;
    Some(out)
}

/// A G1 commitment together with its canonical encoding, which is what the
/// transcript absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment {
    point: G1Affine,
    bytes: [u8; G1_BYTES],
}

impl Commitment {
    pub fn new(point: G1Affine) -> Option<Self> {
        let bytes = encode_g1(&point)?;
        Some(Self { point, bytes })
    }

    pub fn decode(bytes: [u8; G1_BYTES]) -> Option<Self> {
        let point = decode_g1(&bytes)?;
        Some(Self { point, bytes })
    }

    pub fn point(&self) -> &G1Affine {
        &self.point
    }

    pub fn bytes(&self) -> &[u8; G1_BYTES] {
        &self.bytes
    }
}

/// `sum_i scalars[i] * points[i]`; extra entries on either side are ignored.
pub fn linear_combination<'a>(
    points: impl IntoIterator<Item = &'a G1Affine>,
    scalars: impl IntoIterator<Item = &'a FieldElement>,
) -> G1Projective {
    points
        .into_iter()
        .zip(scalars)
        .fold(G1Projective::zero(), |acc, (p, s)| acc + *p * s)
}

/// Checks `e(lhs, g2) == e(rhs, s_g2)` with a single multi-pairing.
pub fn pairing_check(
    lhs: &G1Projective,
    rhs: &G1Projective,
    g2: &G2Affine,
    s_g2: &G2Affine,
) -> bool {
    let g1_terms = [lhs.into_affine(), (-*rhs).into_affine()];
    let g2_terms = [*g2, *s_g2];
    Bn254::multi_pairing(g1_terms, g2_terms).is_zero()
}
