//! KZG verifier parameters and the GWC multi-point opening check.
//!
//! For every opening point `z_j` the verifier folds the commitments `C_i` and
//! claimed evaluations `e_i` opened there with powers of `v`:
//!
//! ```text
//! F_j = sum_i v^i C_i        E_j = sum_i v^i e_i
//! ```
//!
//! and then batches the points with powers of `u` into a single pairing
//! equation:
//!
//! ```text
//! e(sum_j u^j (F_j - E_j [1]_1 + z_j W_j), [1]_2) == e(sum_j u^j W_j, [tau]_2)
//! ```

use ark_bn254::{G1Affine, G1Projective, G2Affine};
use ark_ff::{One, Zero};

use super::curve::{self, Commitment};
use super::reader::ByteReader;
use crate::constants::{PARAMS_BYTES_LEN, PARAMS_MAGIC};
use crate::error::{Artifact, VerifierError, VerifierResult};
use crate::field::FieldElement;

/// Verifier half of the structured reference string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KzgParams {
    /// Largest circuit-size exponent these parameters can open.
    pub k: u32,
    /// `[1]_1`
    pub g1: G1Affine,
    /// `[1]_2`
    pub g2: G2Affine,
    /// `[tau]_2`
    pub s_g2: G2Affine,
}

impl KzgParams {
    pub fn from_bytes(bytes: &[u8]) -> VerifierResult<Self> {
        if bytes.len() != PARAMS_BYTES_LEN {
            return Err(VerifierError::malformed(Artifact::Params, "params length mismatch"));
        }
        let mut reader = ByteReader::new(bytes, Artifact::Params);
        reader.expect_magic(&PARAMS_MAGIC)?;
        let k = reader.read_u32()?;
        let g1 = *reader.read_g1()?.point();
        let g2 = reader.read_g2()?;
        let s_g2 = reader.read_g2()?;
        reader.finish()?;

        if g1.infinity || g2.infinity || s_g2.infinity {
            return Err(VerifierError::malformed(Artifact::Params, "identity generator"));
        }
        Ok(Self { k, g1, g2, s_g2 })
    }

    /// Returns `None` if a point has no compressed encoding.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        let mut out = Vec::with_capacity(PARAMS_BYTES_LEN);
        out.extend_from_slice(&PARAMS_MAGIC);
        out.extend_from_slice(&self.k.to_le_bytes());
        out.extend_from_slice(&curve::encode_g1(&self.g1)?);
        out.extend_from_slice(&curve::encode_g2(&self.g2)?);
        out.extend_from_slice(&curve::encode_g2(&self.s_g2)?);
        Some(out)
    }
}

/// One commitment opened at a point with its claimed evaluation.
#[derive(Debug, Clone, Copy)]
pub struct OpeningQuery<'a> {
    pub commitment: &'a Commitment,
    pub eval: FieldElement,
}

/// All queries opened at the same point.
#[derive(Debug, Clone)]
pub struct OpeningSet<'a> {
    pub point: FieldElement,
    pub queries: Vec<OpeningQuery<'a>>,
}

/// Checks every opening set against its witness. `sets` and `witnesses`
/// correspond one to one.
pub fn verify_gwc(
    params: &KzgParams,
    sets: &[OpeningSet<'_>],
    witnesses: &[Commitment],
    v: &FieldElement,
    u: &FieldElement,
) -> VerifierResult<()> {
    if sets.len() != witnesses.len() {
        return Err(VerifierError::VerificationFailed("witness count differs from opening points"));
    }

    let mut lhs = G1Projective::zero();
    let mut rhs = G1Projective::zero();
    let mut u_power = FieldElement::one();
    for (set, witness) in sets.iter().zip(witnesses) {
        let mut v_power = FieldElement::one();
        let mut folded = G1Projective::zero();
        let mut eval = FieldElement::zero();
        for query in &set.queries {
            folded += *query.commitment.point() * v_power;
            eval += query.eval * v_power;
            v_power *= v;
        }

        let w = *witness.point();
        lhs += (folded - params.g1 * eval + w * set.point) * u_power;
        rhs += G1Projective::from(w) * u_power;
        u_power *= u;
    }

    if curve::pairing_check(&lhs, &rhs, &params.g2, &params.s_g2) {
        Ok(())
    } else {
        Err(VerifierError::VerificationFailed("opening pairing check failed"))
    }
}
