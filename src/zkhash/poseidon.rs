//! Poseidon permutation over the BN254 scalar field.
//!
//! Parameter set `poseidon-bn254-x5-3-v1`: width 3, S-box `x^5`, 8 full rounds
//! and 57 partial rounds, constants from the Grain LFSR. This is the parameter
//! set circomlib ships for two inputs, so digests interoperate with it.

use ark_ff::{Field, Zero};
use lazy_static::lazy_static;

use super::grain::GrainLfsr;
use crate::field::FieldElement;

pub const WIDTH: usize = 3;
pub const RATE: usize = 2;
pub const FULL_ROUNDS: usize = 8;
pub const PARTIAL_ROUNDS: usize = 57;
const FIELD_BITS: u16 = 254;

/// Round constants and mixing matrix of one Poseidon instance.
#[derive(Debug, Clone)]
pub struct PoseidonParameters {
    pub round_constants: Vec<[FieldElement; WIDTH]>,
    pub mds: [[FieldElement; WIDTH]; WIDTH],
}

lazy_static! {
    static ref BN254_X5_3: PoseidonParameters = PoseidonParameters::generate();
}

impl PoseidonParameters {
    /// The versioned protocol constant table.
    pub fn bn254_x5_3() -> &'static PoseidonParameters {
        &BN254_X5_3
    }

    fn generate() -> Self {
        let mut grain = GrainLfsr::new(
            FIELD_BITS,
            WIDTH as u16,
            FULL_ROUNDS as u16,
            PARTIAL_ROUNDS as u16,
        );

        let round_constants = (0..FULL_ROUNDS + PARTIAL_ROUNDS)
            .map(|_| {
                let mut row = [FieldElement::zero(); WIDTH];
                for c in row.iter_mut() {
                    *c = grain.next_field_element(FIELD_BITS);
                }
                row
            })
            .collect();

        // Cauchy matrix 1 / (x_i + y_j) from 2t distinct samples.
        let (xs, ys) = loop {
            let mut samples = [FieldElement::zero(); 2 * WIDTH];
            for s in samples.iter_mut() {
                *s = grain.next_field_element_reduced(FIELD_BITS);
            }
            let distinct = samples
                .iter()
                .enumerate()
                .all(|(i, a)| samples[i + 1..].iter().all(|b| a != b));
            let cross_sums_nonzero = samples[..WIDTH]
                .iter()
                .all(|x| samples[WIDTH..].iter().all(|y| !(*x + y).is_zero()));
            if distinct && cross_sums_nonzero {
                let mut xs = [FieldElement::zero(); WIDTH];
                let mut ys = [FieldElement::zero(); WIDTH];
                xs.copy_from_slice(&samples[..WIDTH]);
                ys.copy_from_slice(&samples[WIDTH..]);
                break (xs, ys);
            }
        };

        let mut mds = [[FieldElement::zero(); WIDTH]; WIDTH];
        for (i, row) in mds.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                // cross sums were checked non-zero above
                *entry = (xs[i] + ys[j]).inverse().unwrap_or_default();
            }
        }

        Self {
            round_constants,
            mds,
        }
    }

    /// Applies the full permutation to `state` in place.
    pub fn permute(&self, state: &mut [FieldElement; WIDTH]) {
        let half_full = FULL_ROUNDS / 2;
        for (round, constants) in self.round_constants.iter().enumerate() {
            for (lane, c) in state.iter_mut().zip(constants.iter()) {
                *lane += c;
            }
            if round < half_full || round >= half_full + PARTIAL_ROUNDS {
                for lane in state.iter_mut() {
                    *lane = sbox(lane);
                }
            } else {
                state[0] = sbox(&state[0]);
            }
            *state = self.mix(state);
        }
    }

    fn mix(&self, state: &[FieldElement; WIDTH]) -> [FieldElement; WIDTH] {
        let mut out = [FieldElement::zero(); WIDTH];
        for (o, row) in out.iter_mut().zip(self.mds.iter()) {
            *o = row.iter().zip(state.iter()).map(|(m, s)| *m * s).sum();
        }
        out
    }
}

#[inline]
fn sbox(x: &FieldElement) -> FieldElement {
    x.square().square() * x
}

/// Hashes `RATE` field elements with `domain` in the capacity lane and
/// returns lane 0 of the permuted state.
pub fn hash_with_domain(inputs: [FieldElement; RATE], domain: FieldElement) -> FieldElement {
    let mut state = [domain, inputs[0], inputs[1]];
    PoseidonParameters::bn254_x5_3().permute(&mut state);
    state[0]
}
