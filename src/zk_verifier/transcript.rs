//! Fiat-Shamir transcript over SHA-512.
//!
//! Messages are framed by a one-byte prefix so points, scalars and raw bytes
//! can never be confused with each other:
//!
//! | Prefix | Message | Payload |
//! |--------|---------|---------|
//! | `0` | challenge request | none |
//! | `1` | G1 point | 32-byte compressed encoding |
//! | `2` | scalar | 32-byte canonical little-endian |
//! | `3` | bytes | u64 length, then the bytes |
//!
//! A challenge is the 64-byte digest of a clone of the running state reduced
//! modulo `p`; the request prefix stays in the running state so consecutive
//! challenges differ. Identical absorbed sequences yield identical challenges.

use sha2::{Digest as _, Sha512};

use super::curve::Commitment;
use crate::constants::{PREFIX_BYTES, PREFIX_CHALLENGE, PREFIX_POINT, PREFIX_SCALAR};
use crate::error::TranscriptError;
use crate::field::{self, FieldElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptState {
    /// Nothing absorbed yet.
    Fresh,
    /// At least one message absorbed since the last challenge.
    Absorbing,
    /// The last operation produced a challenge.
    Squeezed,
}

#[derive(Clone)]
pub struct Transcript {
    hasher: Sha512,
    state: TranscriptState,
}

impl Transcript {
    /// Starts a transcript bound to `domain`.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha512::new();
        hasher.update((domain.len() as u64).to_le_bytes());
        hasher.update(domain);
        Self {
            hasher,
            state: TranscriptState::Fresh,
        }
    }

    pub fn state(&self) -> TranscriptState {
        self.state
    }

    pub fn absorb_point(&mut self, commitment: &Commitment) {
        self.hasher.update([PREFIX_POINT]);
        self.hasher.update(commitment.bytes());
        self.state = TranscriptState::Absorbing;
    }

    pub fn absorb_scalar(&mut self, scalar: &FieldElement) {
        self.hasher.update([PREFIX_SCALAR]);
        self.hasher.update(field::to_le_bytes(scalar));
        self.state = TranscriptState::Absorbing;
    }

    pub fn absorb_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update([PREFIX_BYTES]);
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self.state = TranscriptState::Absorbing;
    }

    pub fn squeeze_challenge(&mut self) -> Result<FieldElement, TranscriptError> {
        if self.state == TranscriptState::Fresh {
            return Err(TranscriptError::NothingAbsorbed);
        }
        self.hasher.update([PREFIX_CHALLENGE]);
        let digest = self.hasher.clone().finalize();
        self.state = TranscriptState::Squeezed;
        Ok(field::from_uniform_bytes(digest.as_slice()))
    }
}
