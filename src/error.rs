//! src/error.rs
use core::fmt;

use thiserror::Error;

/// Serialized artifact a decoding failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// KZG verifier parameters (`params`).
    Params,
    /// Verification key (`vk_bytes`).
    VerifyingKey,
    /// Circuit layout and gates (`circuit_info`).
    CircuitInfo,
    /// Public input vector.
    PublicInputs,
    /// Proof transcript bytes.
    Proof,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Params => write!(f, "params"),
            Artifact::VerifyingKey => write!(f, "verifying key"),
            Artifact::CircuitInfo => write!(f, "circuit info"),
            Artifact::PublicInputs => write!(f, "public inputs"),
            Artifact::Proof => write!(f, "proof"),
        }
    }
}

/// Reasons a proof is rejected.
///
/// Every variant collapses to `false` at the dispatch boundary; the variants
/// exist for tests, tooling and debug logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifierError {
    // ========== Decoding ==========
    /// A buffer does not parse into the expected structure, or is oversized.
    #[error("malformed {artifact}: {detail}")]
    MalformedEncoding {
        artifact: Artifact,
        detail: &'static str,
    },

    /// `scheme_id` is outside the supported enumeration.
    #[error("unsupported commitment scheme id {0}")]
    UnsupportedScheme(u8),

    // ========== Sizing ==========
    /// The circuit-size exponent is missing or disagrees between artifacts.
    #[error("circuit size mismatch: {0}")]
    SizeMismatch(&'static str),

    // ========== Cryptographic ==========
    /// Well-formed inputs that do not satisfy the verification equations.
    #[error("verification failed: {0}")]
    VerificationFailed(&'static str),
}

impl VerifierError {
    /// Helper constructor for decoding failures.
    pub const fn malformed(artifact: Artifact, detail: &'static str) -> Self {
        Self::MalformedEncoding { artifact, detail }
    }
}

/// Result alias used across the verifier.
pub type VerifierResult<T> = Result<T, VerifierError>;

/// Misuse of the Fiat-Shamir transcript state machine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptError {
    /// A challenge was requested before any message was absorbed.
    #[error("cannot squeeze a challenge from a fresh transcript")]
    NothingAbsorbed,
}

impl From<TranscriptError> for VerifierError {
    fn from(_: TranscriptError) -> Self {
        VerifierError::VerificationFailed("transcript out of sequence")
    }
}
