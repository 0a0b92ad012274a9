//! Non-cryptographic two-input hash for test environments.
//!
//! Chains the SplitMix64 finalizer over the four 64-bit words of the inputs
//! and expands the accumulator into four output words. Deterministic and
//! cheap; offers no collision or preimage resistance.

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;
/// ASCII `ledger-1`
const SEED: u64 = 0x6c65_6467_6572_2d31;

#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Returns the digest as four little-endian 64-bit limbs.
pub fn fast_hash_limbs(a: u128, b: u128) -> [u64; 4] {
    let words = [a as u64, (a >> 64) as u64, b as u64, (b >> 64) as u64];
    let acc = words
        .iter()
        .fold(SEED, |acc, w| mix64(acc ^ w).wrapping_add(GOLDEN_GAMMA));

    let mut out = [0u64; 4];
    for (i, limb) in out.iter_mut().enumerate() {
        *limb = mix64(acc.wrapping_add(GOLDEN_GAMMA.wrapping_mul(i as u64 + 1)));
    }
    out
}
