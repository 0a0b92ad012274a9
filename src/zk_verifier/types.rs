// types.rs - artifact types decoded from the caller's byte buffers

use super::circuit::CircuitInfo;
use super::curve::Commitment;
use super::reader::ByteReader;
use crate::constants::{FIELD_BYTES, SCHEME_KZG_GWC, U32_BYTES, VK_MAGIC};
use crate::error::{Artifact, VerifierError, VerifierResult};
use crate::field::{self, FieldElement};
use crate::validation_limits::VerifierLimits;

/// Polynomial commitment scheme selected by `scheme_id`.
///
/// Id `0` is reserved for IPA commitments, which have no verifier here; it is
/// rejected like every other unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitmentScheme {
    /// KZG over BN254 with the GWC multi-point opening.
    KzgGwc,
}

impl TryFrom<u8> for CommitmentScheme {
    type Error = VerifierError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            SCHEME_KZG_GWC => Ok(CommitmentScheme::KzgGwc),
            _ => Err(VerifierError::UnsupportedScheme(id)),
        }
    }
}

impl From<CommitmentScheme> for u8 {
    fn from(scheme: CommitmentScheme) -> u8 {
        match scheme {
            CommitmentScheme::KzgGwc => SCHEME_KZG_GWC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    pub k: u32,
    /// One commitment per fixed column, in column order.
    pub fixed_commitments: Vec<Commitment>,
}

impl VerificationKey {
    pub fn from_bytes(bytes: &[u8], limits: &VerifierLimits) -> VerifierResult<Self> {
        let mut reader = ByteReader::new(bytes, Artifact::VerifyingKey);
        reader.expect_magic(&VK_MAGIC)?;
        let k = reader.read_u32()?;
        let num_fixed =
            reader.read_count(|n| limits.verify_columns_count(n), "too many fixed columns")?;
        let mut fixed_commitments = Vec::with_capacity(num_fixed);
        for _ in 0..num_fixed {
            fixed_commitments.push(reader.read_g1()?);
        }
        reader.finish()?;
        Ok(Self {
            k,
            fixed_commitments,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.fixed_commitments.len() * 32);
        out.extend_from_slice(&VK_MAGIC);
        out.extend_from_slice(&self.k.to_le_bytes());
        out.extend_from_slice(&(self.fixed_commitments.len() as u32).to_le_bytes());
        for c in &self.fixed_commitments {
            out.extend_from_slice(c.bytes());
        }
        out
    }
}

/// Values of the instance column, row `i` holding `self.0[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicInputs(pub Vec<FieldElement>);

impl PublicInputs {
    /// Decodes `count | scalars`, requiring exactly `expected` entries.
    pub fn from_bytes(bytes: &[u8], expected: usize) -> VerifierResult<Self> {
        let mut reader = ByteReader::new(bytes, Artifact::PublicInputs);
        let count = reader.read_u32()? as usize;
        if count != expected {
            return Err(reader.malformed("public input count differs from circuit info"));
        }
        if reader.remaining() != count.saturating_mul(FIELD_BYTES) {
            return Err(reader.malformed("public input length mismatch"));
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(reader.read_scalar()?);
        }
        reader.finish()?;
        Ok(Self(values))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(U32_BYTES + self.0.len() * FIELD_BYTES);
        out.extend_from_slice(&(self.0.len() as u32).to_le_bytes());
        for value in &self.0 {
            out.extend_from_slice(&field::to_le_bytes(value));
        }
        out
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Prover messages, in transcript order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub advice_commitments: Vec<Commitment>,
    pub quotient_commitments: Vec<Commitment>,
    /// One per advice query.
    pub advice_evals: Vec<FieldElement>,
    /// One per fixed query.
    pub fixed_evals: Vec<FieldElement>,
    /// One per quotient piece, all at the current row.
    pub quotient_evals: Vec<FieldElement>,
    /// One opening witness per opening rotation.
    pub opening_witnesses: Vec<Commitment>,
}

impl Proof {
    /// Decodes a proof whose shape is dictated by `circuit`. The length is
    /// checked up front so nothing is decoded from a mis-sized buffer.
    pub fn from_bytes(bytes: &[u8], circuit: &CircuitInfo) -> VerifierResult<Self> {
        let expected = circuit
            .proof_len()
            .ok_or(VerifierError::malformed(Artifact::Proof, "proof length overflow"))?;
        if bytes.len() != expected {
            return Err(VerifierError::malformed(Artifact::Proof, "proof length mismatch"));
        }

        let pieces = circuit.quotient_pieces();
        let mut reader = ByteReader::new(bytes, Artifact::Proof);
        let advice_commitments = read_points(&mut reader, circuit.num_advice)?;
        let quotient_commitments = read_points(&mut reader, pieces)?;
        let advice_evals = read_scalars(&mut reader, circuit.advice_queries.len())?;
        let fixed_evals = read_scalars(&mut reader, circuit.fixed_queries.len())?;
        let quotient_evals = read_scalars(&mut reader, pieces)?;
        let opening_witnesses = read_points(&mut reader, circuit.opening_rotations().len())?;
        reader.finish()?;

        Ok(Self {
            advice_commitments,
            quotient_commitments,
            advice_evals,
            fixed_evals,
            quotient_evals,
            opening_witnesses,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for c in self
            .advice_commitments
            .iter()
            .chain(self.quotient_commitments.iter())
        {
            out.extend_from_slice(c.bytes());
        }
        for e in self
            .advice_evals
            .iter()
            .chain(self.fixed_evals.iter())
            .chain(self.quotient_evals.iter())
        {
            out.extend_from_slice(&field::to_le_bytes(e));
        }
        for w in &self.opening_witnesses {
            out.extend_from_slice(w.bytes());
        }
        out
    }
}

fn read_points(reader: &mut ByteReader<'_>, count: usize) -> VerifierResult<Vec<Commitment>> {
    (0..count).map(|_| reader.read_g1()).collect()
}

fn read_scalars(reader: &mut ByteReader<'_>, count: usize) -> VerifierResult<Vec<FieldElement>> {
    (0..count).map(|_| reader.read_scalar()).collect()
}
