//! Plonkish proof verification with KZG commitments over BN254.
//!
//! The verifier is stateless: every artifact is decoded from bytes on each
//! call, checked against [`VerifierLimits`](crate::validation_limits::VerifierLimits)
//! and discarded when the call returns.

pub mod circuit;
pub mod curve;
pub mod kzg;
mod reader;
pub mod transcript;
pub mod types;
pub mod verifier;

// Re-export artifact types
pub use circuit::{CircuitInfo, Expression, Query, Rotation};
pub use curve::Commitment;
pub use kzg::KzgParams;
pub use transcript::{Transcript, TranscriptState};
pub use types::{CommitmentScheme, Proof, PublicInputs, VerificationKey};

// Re-export the entry point
pub use verifier::deserialize_circuit_and_verify;
