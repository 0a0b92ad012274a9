//! Grain LFSR used to derive Poseidon round constants and the MDS matrix.
//!
//! The 80-bit register is seeded with the parameter description (field kind,
//! S-box kind, field size, width, full and partial rounds, thirty ones) and
//! the first 160 outputs are discarded. Output bits follow the self-shrinking
//! rule: bits are drawn in pairs and the second is emitted only if the first
//! is one.

use std::collections::VecDeque;

use ark_ff::{BigInt, BigInteger, PrimeField};

use crate::field::FieldElement;

const REGISTER_BITS: usize = 80;
const WARMUP_ROUNDS: usize = 160;

pub(crate) struct GrainLfsr {
    register: VecDeque<bool>,
}

impl GrainLfsr {
    pub(crate) fn new(field_bits: u16, width: u16, full_rounds: u16, partial_rounds: u16) -> Self {
        let mut register = VecDeque::with_capacity(REGISTER_BITS);
        let mut push = |value: u64, bits: u32| {
            for i in (0..bits).rev() {
                register.push_back((value >> i) & 1 == 1);
            }
        };
        push(1, 2); // prime field
        push(0, 4); // x^alpha S-box
        push(u64::from(field_bits), 12);
        push(u64::from(width), 12);
        push(u64::from(full_rounds), 10);
        push(u64::from(partial_rounds), 10);
        push((1 << 30) - 1, 30);
        debug_assert_eq!(register.len(), REGISTER_BITS);

        let mut lfsr = Self { register };
        for _ in 0..WARMUP_ROUNDS {
            lfsr.clock();
        }
        lfsr
    }

    fn clock(&mut self) -> bool {
        let r = &self.register;
        let bit = r[62] ^ r[51] ^ r[38] ^ r[23] ^ r[13] ^ r[0];
        self.register.pop_front();
        self.register.push_back(bit);
        bit
    }

    fn next_bit(&mut self) -> bool {
        loop {
            let keep = self.clock();
            let bit = self.clock();
            if keep {
                return bit;
            }
        }
    }

    /// Next `bits` output bits as an integer, most significant bit first.
    fn next_integer(&mut self, bits: u16) -> BigInt<4> {
        let mut limbs = [0u64; 4];
        for _ in 0..bits {
            let carry_in = self.next_bit() as u64;
            let mut carry = carry_in;
            for limb in limbs.iter_mut() {
                let next_carry = *limb >> 63;
                *limb = (*limb << 1) | carry;
                carry = next_carry;
            }
        }
        BigInt::new(limbs)
    }

    /// Rejection-samples a `bits`-bit integer below the modulus.
    pub(crate) fn next_field_element(&mut self, bits: u16) -> FieldElement {
        loop {
            if let Some(value) = FieldElement::from_bigint(self.next_integer(bits)) {
                return value;
            }
        }
    }

    /// Samples a `bits`-bit integer and reduces it modulo `p`.
    pub(crate) fn next_field_element_reduced(&mut self, bits: u16) -> FieldElement {
        FieldElement::from_le_bytes_mod_order(&self.next_integer(bits).to_bytes_le())
    }
}
