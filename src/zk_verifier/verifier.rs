//! Proof verification: artifact parsing, size resolution and transcript replay.
//!
//! Step order (every step must pass before the next runs):
//! 1. scheme selector, artifact sizes
//! 2. circuit info, `k` resolution, params, verification key
//! 3. public inputs, proof (length derived from the circuit)
//! 4. transcript replay: `y`, `x`, `v`, `u`
//! 5. gate identity at `x`
//! 6. GWC multi-opening pairing check

use ark_ff::{Field, Zero};

use super::circuit::{CircuitInfo, Rotation};
use super::kzg::{self, KzgParams, OpeningQuery, OpeningSet};
use super::transcript::Transcript;
use super::types::{CommitmentScheme, Proof, PublicInputs, VerificationKey};
use crate::constants::TRANSCRIPT_DOMAIN;
use crate::error::{Artifact, VerifierError, VerifierResult};
use crate::field::{EvaluationDomain, FieldElement};
use crate::utils::trace;
use crate::validation_limits::VerifierLimits;

/// Parses every artifact and verifies `proof` against them.
#[allow(clippy::too_many_arguments)]
pub fn deserialize_circuit_and_verify(
    params: &[u8],
    vk_bytes: &[u8],
    circuit_info: &[u8],
    public_inputs: &[u8],
    proof: &[u8],
    scheme_id: u8,
    k: Option<u32>,
    limits: &VerifierLimits,
) -> VerifierResult<()> {
    let scheme = CommitmentScheme::try_from(scheme_id)?;
    trace!("scheme={:?}", scheme);

    for (artifact, bytes) in [
        (Artifact::Params, params),
        (Artifact::VerifyingKey, vk_bytes),
        (Artifact::CircuitInfo, circuit_info),
        (Artifact::PublicInputs, public_inputs),
        (Artifact::Proof, proof),
    ] {
        if !limits.verify_artifact_size(bytes.len()) {
            return Err(VerifierError::malformed(artifact, "artifact too large"));
        }
    }

    let circuit = CircuitInfo::from_bytes(circuit_info, limits)?;
    let k = circuit.resolve_k(k)?;
    if !limits.verify_k(k) {
        return Err(VerifierError::SizeMismatch("k outside supported range"));
    }
    trace!("k={} gates={} max_degree={}", k, circuit.gates.len(), circuit.max_degree());

    let params = KzgParams::from_bytes(params)?;
    if params.k < k {
        return Err(VerifierError::SizeMismatch("params too small for k"));
    }
    let vk = VerificationKey::from_bytes(vk_bytes, limits)?;
    if vk.k != k {
        return Err(VerifierError::SizeMismatch("verifying key k differs"));
    }
    if vk.fixed_commitments.len() != circuit.num_fixed {
        return Err(VerifierError::malformed(
            Artifact::VerifyingKey,
            "fixed column count differs from circuit info",
        ));
    }

    let domain = EvaluationDomain::new(k)
        .ok_or(VerifierError::SizeMismatch("k outside supported range"))?;
    if circuit.num_public_inputs as u64 > domain.size() {
        return Err(VerifierError::SizeMismatch("public inputs exceed rows"));
    }

    let instance = PublicInputs::from_bytes(public_inputs, circuit.num_public_inputs)?;
    let proof = Proof::from_bytes(proof, &circuit)?;

    match scheme {
        CommitmentScheme::KzgGwc => verify_kzg_gwc(
            &params,
            &vk,
            &circuit,
            circuit_info,
            &domain,
            &instance,
            &proof,
        ),
    }
}

/// Challenges squeezed while replaying the transcript.
struct Challenges {
    y: FieldElement,
    x: FieldElement,
    v: FieldElement,
    u: FieldElement,
}

fn verify_kzg_gwc(
    params: &KzgParams,
    vk: &VerificationKey,
    circuit: &CircuitInfo,
    circuit_info: &[u8],
    domain: &EvaluationDomain,
    instance: &PublicInputs,
    proof: &Proof,
) -> VerifierResult<()> {
    let mut transcript = Transcript::new(TRANSCRIPT_DOMAIN);

    transcript.absorb_bytes(circuit_info);
    transcript.absorb_scalar(&FieldElement::from(domain.k()));
    for c in &vk.fixed_commitments {
        transcript.absorb_point(c);
    }
    for value in &instance.0 {
        transcript.absorb_scalar(value);
    }

    for c in &proof.advice_commitments {
        transcript.absorb_point(c);
    }
    let y = transcript.squeeze_challenge()?;

    for c in &proof.quotient_commitments {
        transcript.absorb_point(c);
    }
    let x = transcript.squeeze_challenge()?;
    if domain.vanishing_eval(&x).is_zero() {
        return Err(VerifierError::VerificationFailed("evaluation point inside domain"));
    }

    for e in proof
        .advice_evals
        .iter()
        .chain(proof.fixed_evals.iter())
        .chain(proof.quotient_evals.iter())
    {
        transcript.absorb_scalar(e);
    }
    let v = transcript.squeeze_challenge()?;

    for w in &proof.opening_witnesses {
        transcript.absorb_point(w);
    }
    let u = transcript.squeeze_challenge()?;
    let challenges = Challenges { y, x, v, u };
    trace!("transcript replayed");

    check_gates(circuit, domain, instance, proof, &challenges)?;
    trace!("gate identity holds");

    let sets = opening_sets(circuit, domain, vk, proof, &challenges.x);
    kzg::verify_gwc(
        params,
        &sets,
        &proof.opening_witnesses,
        &challenges.v,
        &challenges.u,
    )?;
    trace!("opening check passed");
    Ok(())
}

/// `sum_i y^(g-1-i) gate_i(x) == h(x) (x^n - 1)`
fn check_gates(
    circuit: &CircuitInfo,
    domain: &EvaluationDomain,
    instance: &PublicInputs,
    proof: &Proof,
    challenges: &Challenges,
) -> VerifierResult<()> {
    let x = &challenges.x;

    let instance_evals = circuit
        .instance_queries
        .iter()
        .map(|rotation| {
            let point = domain.rotate(x, rotation.0);
            let basis = domain
                .lagrange_evals(&point, instance.len())
                .ok_or(VerifierError::VerificationFailed("evaluation point inside domain"))?;
            Ok(basis
                .iter()
                .zip(instance.0.iter())
                .map(|(l, value)| *l * value)
                .sum::<FieldElement>())
        })
        .collect::<VerifierResult<Vec<_>>>()?;

    let acc = circuit.gates.iter().fold(FieldElement::zero(), |acc, gate| {
        acc * challenges.y
            + gate.evaluate(
                &|c| c,
                &|i| proof.fixed_evals[i],
                &|i| proof.advice_evals[i],
                &|i| instance_evals[i],
                &|a| -a,
                &|a, b| a + b,
                &|a, b| a * b,
                &|a, f| a * f,
            )
    });

    let x_n = domain.pow_n(x);
    let h = proof
        .quotient_evals
        .iter()
        .rev()
        .fold(FieldElement::zero(), |h, piece| h * x_n + piece);

    if acc == h * (x_n - FieldElement::ONE) {
        Ok(())
    } else {
        Err(VerifierError::VerificationFailed("gate constraints not satisfied"))
    }
}

/// Groups every opened commitment by its evaluation point, ascending by
/// rotation. The quotient pieces are opened at `x` itself.
fn opening_sets<'a>(
    circuit: &CircuitInfo,
    domain: &EvaluationDomain,
    vk: &'a VerificationKey,
    proof: &'a Proof,
    x: &FieldElement,
) -> Vec<OpeningSet<'a>> {
    circuit
        .opening_rotations()
        .into_iter()
        .map(|rotation| {
            let advice = circuit
                .advice_queries
                .iter()
                .zip(proof.advice_evals.iter())
                .filter(|(q, _)| q.rotation == rotation)
                .map(|(q, eval)| OpeningQuery {
                    commitment: &proof.advice_commitments[q.column],
                    eval: *eval,
                });
            let fixed = circuit
                .fixed_queries
                .iter()
                .zip(proof.fixed_evals.iter())
                .filter(|(q, _)| q.rotation == rotation)
                .map(|(q, eval)| OpeningQuery {
                    commitment: &vk.fixed_commitments[q.column],
                    eval: *eval,
                });
            let mut queries: Vec<_> = advice.chain(fixed).collect();
            if rotation == Rotation::cur() {
                queries.extend(
                    proof
                        .quotient_commitments
                        .iter()
                        .zip(proof.quotient_evals.iter())
                        .map(|(commitment, eval)| OpeningQuery {
                            commitment,
                            eval: *eval,
                        }),
                );
            }
            OpeningSet {
                point: domain.rotate(x, rotation.0),
                queries,
            }
        })
        .collect()
}
