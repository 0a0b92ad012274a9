//! Bounds-checked cursor over an untrusted artifact buffer.

use ark_bn254::G2Affine;

use super::curve::{self, Commitment};
use crate::constants::{FIELD_BYTES, G1_BYTES, G2_BYTES};
use crate::error::{Artifact, VerifierError, VerifierResult};
use crate::field::{self, FieldElement};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    artifact: Artifact,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8], artifact: Artifact) -> Self {
        Self {
            bytes,
            offset: 0,
            artifact,
        }
    }

    pub(crate) fn malformed(&self, detail: &'static str) -> VerifierError {
        VerifierError::malformed(self.artifact, detail)
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub(crate) fn read_exact(&mut self, len: usize) -> VerifierResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.malformed("unexpected end of buffer"));
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..start + len])
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> VerifierResult<[u8; N]> {
        let bytes = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub(crate) fn expect_magic(&mut self, magic: &[u8; 4]) -> VerifierResult<()> {
        if &self.read_array::<4>()? != magic {
            return Err(self.malformed("bad magic tag"));
        }
        Ok(())
    }

    pub(crate) fn read_u8(&mut self) -> VerifierResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub(crate) fn read_u32(&mut self) -> VerifierResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_i32(&mut self) -> VerifierResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a u32 count and checks it with `within` before the caller allocates.
    pub(crate) fn read_count(
        &mut self,
        within: impl FnOnce(usize) -> bool,
        detail: &'static str,
    ) -> VerifierResult<usize> {
        let count = self.read_u32()? as usize;
        if !within(count) {
            return Err(self.malformed(detail));
        }
        Ok(count)
    }

    pub(crate) fn read_scalar(&mut self) -> VerifierResult<FieldElement> {
        let bytes = self.read_array::<FIELD_BYTES>()?;
        field::from_canonical_le(&bytes).ok_or_else(|| self.malformed("non-canonical field element"))
    }

    pub(crate) fn read_g1(&mut self) -> VerifierResult<Commitment> {
        let bytes = self.read_array::<G1_BYTES>()?;
        Commitment::decode(bytes).ok_or_else(|| self.malformed("invalid G1 point"))
    }

    pub(crate) fn read_g2(&mut self) -> VerifierResult<G2Affine> {
        let bytes = self.read_array::<G2_BYTES>()?;
        curve::decode_g2(&bytes).ok_or_else(|| self.malformed("invalid G2 point"))
    }

    /// Rejects trailing bytes.
    pub(crate) fn finish(self) -> VerifierResult<()> {
        if self.remaining() != 0 {
            return Err(self.malformed("trailing bytes"));
        }
        Ok(())
    }
}
