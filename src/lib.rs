//! Ledger crypto natives: lib.rs
//!
//! Entry points the host VM binds its native functions to. Hashing always
//! succeeds; verification is a pure function returning `true` only for a
//! proof that checks out against every supplied artifact.

pub mod utils;

pub mod constants;
pub mod error;
pub mod field;
pub mod validation_limits;
pub mod zk_verifier;
pub mod zkhash;

pub use crate::error::{Artifact, TranscriptError, VerifierError, VerifierResult};
pub use crate::field::FieldElement;
pub use crate::validation_limits::VerifierLimits;
pub use crate::zk_verifier::deserialize_circuit_and_verify;
pub use crate::zkhash::{fake_hash, poseidon_hash, Digest, HashMode};

// ========================
// Proof verification
// ========================

/// Verifies a Plonkish KZG proof under the default [`VerifierLimits`].
///
/// `k = None` takes the circuit size from `circuit_info`; a circuit that does
/// not carry one is rejected. Every failure maps to `false`.
pub fn verify_halo2_proof(
    params: &[u8],
    vk_bytes: &[u8],
    circuit_info: &[u8],
    public_inputs: &[u8],
    proof: &[u8],
    scheme_id: u8,
    k: Option<u32>,
) -> bool {
    verify_halo2_proof_with_limits(
        params,
        vk_bytes,
        circuit_info,
        public_inputs,
        proof,
        scheme_id,
        k,
        &VerifierLimits::default(),
    )
}

/// [`verify_halo2_proof`] with caller-supplied bounds.
#[allow(clippy::too_many_arguments)]
pub fn verify_halo2_proof_with_limits(
    params: &[u8],
    vk_bytes: &[u8],
    circuit_info: &[u8],
    public_inputs: &[u8],
    proof: &[u8],
    scheme_id: u8,
    k: Option<u32>,
    limits: &VerifierLimits,
) -> bool {
    match deserialize_circuit_and_verify(
        params,
        vk_bytes,
        circuit_info,
        public_inputs,
        proof,
        scheme_id,
        k,
        limits,
    ) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(scheme_id, ?k, "halo2 proof rejected: {err}");
            false
        }
    }
}

// ========================
// Host ABI helpers
// ========================

/// Maps the host's `(k_present, k)` argument pair to an optional exponent.
pub fn k_from_native(k_present: bool, k: u32) -> Option<u32> {
    k_present.then_some(k)
}

/// Inverse of [`k_from_native`]; absence is `(false, 0)`.
pub fn k_to_native(k: Option<u32>) -> (bool, u32) {
    match k {
        Some(k) => (true, k),
        None => (false, 0),
    }
}
