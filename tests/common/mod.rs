//! Reference prover used to generate verifier fixtures.
//!
//! Knows the toxic-waste `tau`, so commitments are `p(tau) [1]_1` and an
//! opening witness is `(F(tau) - F(z)) / (tau - z) [1]_1`. Polynomials use
//! naive coefficient arithmetic; fixtures stay tiny.

#![allow(dead_code)]

use ark_bn254::{G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, Zero};
use ark_std::UniformRand;

use ledger_crypto_natives::constants::TRANSCRIPT_DOMAIN;
use ledger_crypto_natives::field::EvaluationDomain;
use ledger_crypto_natives::zk_verifier::{
    CircuitInfo, Commitment, Expression, KzgParams, Proof, PublicInputs, Query, Rotation,
    Transcript, VerificationKey,
};
use ledger_crypto_natives::{FieldElement, VerifierLimits, VerifierResult};

pub const SCHEME_KZG: u8 = 1;
pub const TEST_K: u32 = 3;
pub const PROOF_LEN: usize = 512;

type Poly = Vec<FieldElement>;

fn fe(v: u64) -> FieldElement {
    FieldElement::from(v)
}

// ---- Polynomial helpers ----------------------------------------------------

fn eval(p: &[FieldElement], x: &FieldElement) -> FieldElement {
    p.iter().rev().fold(FieldElement::zero(), |acc, c| acc * x + c)
}

fn add(a: &[FieldElement], b: &[FieldElement]) -> Poly {
    let mut out = vec![FieldElement::zero(); a.len().max(b.len())];
    for (i, c) in a.iter().enumerate() {
        out[i] += c;
    }
    for (i, c) in b.iter().enumerate() {
        out[i] += c;
    }
    out
}

fn mul(a: &[FieldElement], b: &[FieldElement]) -> Poly {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![FieldElement::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += *x * y;
        }
    }
    out
}

fn scale(a: &[FieldElement], s: &FieldElement) -> Poly {
    a.iter().map(|c| *c * s).collect()
}

/// Coefficients of the polynomial taking `values[i]` at `omega^i`.
fn interpolate(domain: &EvaluationDomain, values: &[FieldElement]) -> Poly {
    let n = domain.size() as usize;
    let omega_inv = domain.omega().inverse().unwrap();
    let n_inv = fe(n as u64).inverse().unwrap();
    (0..n)
        .map(|j| {
            let step = omega_inv.pow([j as u64]);
            let mut w = FieldElement::one();
            let mut acc = FieldElement::zero();
            for v in values {
                acc += *v * w;
                w *= step;
            }
            acc * n_inv
        })
        .collect()
}

/// `p(omega^rotation X)`
fn rotate(domain: &EvaluationDomain, p: &[FieldElement], rotation: i32) -> Poly {
    let step = domain.rotate(&FieldElement::one(), rotation);
    let mut w = FieldElement::one();
    p.iter()
        .map(|c| {
            let out = *c * w;
            w *= step;
            out
        })
        .collect()
}

/// Divides by `X^n - 1`, asserting the remainder vanishes.
fn divide_by_vanishing(numerator: &[FieldElement], n: usize) -> Poly {
    let mut rem = numerator.to_vec();
    if rem.len() <= n {
        assert!(rem.iter().all(|c| c.is_zero()), "numerator not divisible");
        return Vec::new();
    }
    let mut quotient = vec![FieldElement::zero(); rem.len() - n];
    for i in (n..rem.len()).rev() {
        let c = rem[i];
        quotient[i - n] = c;
        rem[i] = FieldElement::zero();
        rem[i - n] += c;
    }
    assert!(rem.iter().all(|c| c.is_zero()), "witness does not satisfy the gates");
    quotient
}

// ---- Test circuit ----------------------------------------------------------

/// Three advice columns `a, b, c`, selectors `q_mul, q_pub, q_chain` and one
/// instance column:
///
/// - `q_mul * (a * b - c)`
/// - `q_pub * (a - instance)`
/// - `q_chain * (c - b_next)`
/// - `q_pub * (q_pub - 1)`
pub fn test_circuit(k: Option<u32>) -> CircuitInfo {
    let cur = Rotation::cur();
    let a = || Expression::Advice(0);
    let b = || Expression::Advice(1);
    let c = || Expression::Advice(2);
    let b_next = || Expression::Advice(3);
    let q_mul = || Expression::Fixed(0);
    let q_pub = || Expression::Fixed(1);
    let q_chain = || Expression::Fixed(2);

    let minus_one = -FieldElement::one();
    CircuitInfo {
        k,
        num_advice: 3,
        num_fixed: 3,
        num_public_inputs: 2,
        advice_queries: vec![
            Query::new(0, cur),
            Query::new(1, cur),
            Query::new(2, cur),
            Query::new(1, Rotation::next()),
        ],
        fixed_queries: vec![Query::new(0, cur), Query::new(1, cur), Query::new(2, cur)],
        instance_queries: vec![cur],
        gates: vec![
            q_mul() * (a() * b() - c()),
            q_pub() * (a() - Expression::Instance(0)),
            q_chain() * (c() + b_next() * minus_one),
            q_pub() * (q_pub() - Expression::Constant(FieldElement::one())),
        ],
    }
}

/// The test circuit plus a selector `q_prev` on rows 1 and 2 checking
/// `a_prev == instance_prev`, which exercises negative rotations on both an
/// advice and an instance query.
pub fn rotated_circuit(k: Option<u32>) -> CircuitInfo {
    let prev = Rotation::prev();
    let mut circuit = test_circuit(k);
    circuit.num_fixed = 4;
    circuit.advice_queries.push(Query::new(0, prev));
    circuit.fixed_queries.push(Query::new(3, Rotation::cur()));
    circuit.instance_queries.push(prev);
    circuit
        .gates
        .push(Expression::Fixed(3) * (Expression::Advice(4) - Expression::Instance(1)));
    circuit
}

/// One advice column opened at rotations `0` and `2`. With `k = 1` both map
/// to the same point because `omega^2 = 1`.
pub fn coinciding_circuit(k: Option<u32>) -> CircuitInfo {
    let cur = Rotation::cur();
    let q = || Expression::Fixed(0);
    CircuitInfo {
        k,
        num_advice: 1,
        num_fixed: 1,
        num_public_inputs: 1,
        advice_queries: vec![Query::new(0, cur), Query::new(0, Rotation(2))],
        fixed_queries: vec![Query::new(0, cur)],
        instance_queries: vec![cur],
        gates: vec![
            q() * (Expression::Advice(0) - Expression::Instance(0)),
            q() * (Expression::Advice(1) - Expression::Instance(0)),
        ],
    }
}

/// Column values for one of the fixture circuits.
pub struct Witness {
    pub advice: Vec<Vec<FieldElement>>,
    pub fixed: Vec<Vec<FieldElement>>,
    pub instance: Vec<FieldElement>,
}

fn column(n: usize, rows: &[u64]) -> Vec<FieldElement> {
    let mut col: Vec<_> = rows.iter().map(|v| fe(*v)).collect();
    col.resize(n, FieldElement::zero());
    col
}

/// `a_i * b_i = c_i`, `b_{i+1} = c_i` on the first two rows, and `a_0, a_1`
/// exposed as public inputs.
pub fn test_witness(n: usize, public: [u64; 2], b0: u64) -> Witness {
    let [a0, a1] = public;
    let c0 = a0 * b0;
    let c1 = a1 * c0;
    let a2 = 7;
    let c2 = a2 * c1;
    Witness {
        advice: vec![
            column(n, &[a0, a1, a2]),
            column(n, &[b0, c0, c1]),
            column(n, &[c0, c1, c2]),
        ],
        fixed: vec![column(n, &[1, 1, 1]), column(n, &[1, 1]), column(n, &[1, 1])],
        instance: vec![fe(a0), fe(a1)],
    }
}

fn default_witness(n: usize, public: [u64; 2]) -> Witness {
    test_witness(n, public, 2)
}

pub fn rotated_witness(n: usize, public: [u64; 2]) -> Witness {
    let mut witness = test_witness(n, public, 2);
    witness.fixed.push(column(n, &[0, 1, 1]));
    witness
}

/// Only `public[0]` is exposed; the second row is unconstrained.
pub fn coinciding_witness(n: usize, public: [u64; 2]) -> Witness {
    Witness {
        advice: vec![column(n, &[public[0], 9])],
        fixed: vec![column(n, &[1])],
        instance: vec![fe(public[0])],
    }
}

// ---- Fixtures ----------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct FixtureOptions {
    /// Encode `k` inside the circuit info.
    pub implicit_k: bool,
    /// Circuit size.
    pub k: u32,
    /// `k` written into the params; must be at least `k`.
    pub params_k: u32,
    pub public: [u64; 2],
    pub circuit: fn(Option<u32>) -> CircuitInfo,
    pub witness: fn(usize, [u64; 2]) -> Witness,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            implicit_k: true,
            k: TEST_K,
            params_k: TEST_K,
            public: [3, 5],
            circuit: test_circuit,
            witness: default_witness,
        }
    }
}

impl FixtureOptions {
    pub fn rotated() -> Self {
        Self {
            circuit: rotated_circuit,
            witness: rotated_witness,
            ..Self::default()
        }
    }

    pub fn coinciding() -> Self {
        Self {
            k: 1,
            params_k: 1,
            circuit: coinciding_circuit,
            witness: coinciding_witness,
            ..Self::default()
        }
    }
}

/// Serialized artifacts of one valid proof.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub k: u32,
    pub params: Vec<u8>,
    pub vk: Vec<u8>,
    pub circuit_info: Vec<u8>,
    pub public_inputs: Vec<u8>,
    pub proof: Vec<u8>,
}

impl Fixture {
    pub fn new() -> Self {
        build_fixture(FixtureOptions::default())
    }

    pub fn verify(&self, scheme_id: u8, k: Option<u32>) -> bool {
        ledger_crypto_natives::verify_halo2_proof(
            &self.params,
            &self.vk,
            &self.circuit_info,
            &self.public_inputs,
            &self.proof,
            scheme_id,
            k,
        )
    }

    pub fn verify_result(&self, scheme_id: u8, k: Option<u32>) -> VerifierResult<()> {
        self.verify_with_limits(scheme_id, k, &VerifierLimits::default())
    }

    pub fn verify_with_limits(
        &self,
        scheme_id: u8,
        k: Option<u32>,
        limits: &VerifierLimits,
    ) -> VerifierResult<()> {
        ledger_crypto_natives::deserialize_circuit_and_verify(
            &self.params,
            &self.vk,
            &self.circuit_info,
            &self.public_inputs,
            &self.proof,
            scheme_id,
            k,
            limits,
        )
    }
}

fn commit(g1: &G1Affine, tau: &FieldElement, p: &[FieldElement]) -> Commitment {
    Commitment::new((*g1 * eval(p, tau)).into_affine()).unwrap()
}

pub fn build_fixture(opts: FixtureOptions) -> Fixture {
    let mut rng = ark_std::test_rng();
    let tau = FieldElement::rand(&mut rng);

    let k = opts.k;
    let domain = EvaluationDomain::new(k).unwrap();
    let n = domain.size() as usize;
    let circuit = (opts.circuit)(opts.implicit_k.then_some(k));
    let circuit_bytes = circuit.to_bytes();
    assert!(CircuitInfo::from_bytes(&circuit_bytes, &VerifierLimits::default()).is_ok());

    let g1 = G1Affine::generator();
    let g2 = G2Affine::generator();
    let params = KzgParams {
        k: opts.params_k,
        g1,
        g2,
        s_g2: (g2 * tau).into_affine(),
    };

    let witness = (opts.witness)(n, opts.public);
    let advice: Vec<Poly> = witness.advice.iter().map(|c| interpolate(&domain, c)).collect();
    let fixed: Vec<Poly> = witness.fixed.iter().map(|c| interpolate(&domain, c)).collect();
    let mut instance_values = witness.instance.clone();
    instance_values.resize(n, FieldElement::zero());
    let instance = interpolate(&domain, &instance_values);

    let vk = VerificationKey {
        k,
        fixed_commitments: fixed.iter().map(|p| commit(&g1, &tau, p)).collect(),
    };
    let public_inputs = PublicInputs(witness.instance.clone());

    let mut transcript = Transcript::new(TRANSCRIPT_DOMAIN);
    transcript.absorb_bytes(&circuit_bytes);
    transcript.absorb_scalar(&fe(u64::from(k)));
    for c in &vk.fixed_commitments {
        transcript.absorb_point(c);
    }
    for v in &public_inputs.0 {
        transcript.absorb_scalar(v);
    }

    let advice_commitments: Vec<_> = advice.iter().map(|p| commit(&g1, &tau, p)).collect();
    for c in &advice_commitments {
        transcript.absorb_point(c);
    }
    let y = transcript.squeeze_challenge().unwrap();

    // Quotient from the y-combined gates.
    let rotated = |polys: &[Poly], queries: &[Query]| -> Vec<Poly> {
        queries
            .iter()
            .map(|q| rotate(&domain, &polys[q.column], q.rotation.0))
            .collect()
    };
    let advice_rot = rotated(&advice, &circuit.advice_queries);
    let fixed_rot = rotated(&fixed, &circuit.fixed_queries);
    let instance_rot: Vec<Poly> = circuit
        .instance_queries
        .iter()
        .map(|r| rotate(&domain, &instance, r.0))
        .collect();
    let numerator = circuit.gates.iter().fold(Vec::new(), |acc: Poly, gate| {
        let g = gate.evaluate(
            &|c| vec![c],
            &|i| fixed_rot[i].clone(),
            &|i| advice_rot[i].clone(),
            &|i| instance_rot[i].clone(),
            &|a: Poly| scale(&a, &-FieldElement::one()),
            &|a: Poly, b: Poly| add(&a, &b),
            &|a: Poly, b: Poly| mul(&a, &b),
            &|a: Poly, f| scale(&a, &f),
        );
        add(&scale(&acc, &y), &g)
    });
    let h = divide_by_vanishing(&numerator, n);
    let pieces = circuit.quotient_pieces();
    assert!(h.len() <= pieces * n, "quotient too large");
    let quotient: Vec<Poly> = (0..pieces)
        .map(|j| {
            let mut piece: Poly = h.iter().skip(j * n).take(n).copied().collect();
            piece.resize(n, FieldElement::zero());
            piece
        })
        .collect();
    let quotient_commitments: Vec<_> = quotient.iter().map(|p| commit(&g1, &tau, p)).collect();
    for c in &quotient_commitments {
        transcript.absorb_point(c);
    }
    let x = transcript.squeeze_challenge().unwrap();

    let at = |p: &Poly, rotation: Rotation| eval(p, &domain.rotate(&x, rotation.0));
    let advice_evals: Vec<_> = circuit
        .advice_queries
        .iter()
        .map(|q| at(&advice[q.column], q.rotation))
        .collect();
    let fixed_evals: Vec<_> = circuit
        .fixed_queries
        .iter()
        .map(|q| at(&fixed[q.column], q.rotation))
        .collect();
    let quotient_evals: Vec<_> = quotient.iter().map(|p| eval(p, &x)).collect();
    for e in advice_evals.iter().chain(&fixed_evals).chain(&quotient_evals) {
        transcript.absorb_scalar(e);
    }
    let v = transcript.squeeze_challenge().unwrap();

    let opening_witnesses: Vec<_> = circuit
        .opening_rotations()
        .into_iter()
        .map(|rotation| {
            let mut polys: Vec<&Poly> = Vec::new();
            polys.extend(
                circuit
                    .advice_queries
                    .iter()
                    .filter(|q| q.rotation == rotation)
                    .map(|q| &advice[q.column]),
            );
            polys.extend(
                circuit
                    .fixed_queries
                    .iter()
                    .filter(|q| q.rotation == rotation)
                    .map(|q| &fixed[q.column]),
            );
            if rotation == Rotation::cur() {
                polys.extend(quotient.iter());
            }
            let z = domain.rotate(&x, rotation.0);
            let mut v_power = FieldElement::one();
            let mut f_tau = FieldElement::zero();
            let mut f_z = FieldElement::zero();
            for p in polys {
                f_tau += v_power * eval(p, &tau);
                f_z += v_power * eval(p, &z);
                v_power *= v;
            }
            let w = (f_tau - f_z) * (tau - z).inverse().unwrap();
            Commitment::new((g1 * w).into_affine()).unwrap()
        })
        .collect();

    let proof = Proof {
        advice_commitments,
        quotient_commitments,
        advice_evals,
        fixed_evals,
        quotient_evals,
        opening_witnesses,
    };

    Fixture {
        k,
        params: params.to_bytes().unwrap(),
        vk: vk.to_bytes(),
        circuit_info: circuit_bytes,
        public_inputs: public_inputs.to_bytes(),
        proof: proof.to_bytes(),
    }
}
