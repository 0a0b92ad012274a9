//! Protocol-wide constants

// ==================================
// BN254 byte-size helpers
// ==================================

/// Field element size in bytes (BN254 Fr, canonical little-endian)
pub const FIELD_BYTES: usize = 32;
/// Compressed G1 point = x with sign/infinity flags in the top bits
pub const G1_BYTES: usize = 32;
/// Compressed G2 point = (x.c0, x.c1) with flags
pub const G2_BYTES: usize = 64;
/// u32 length prefixes and counters on the wire
pub const U32_BYTES: usize = 4;

// =====================
// Artifact magic tags
// =====================

/// KZG verifier parameters: `k | [1]_1 | [1]_2 | [tau]_2`
pub const PARAMS_MAGIC: [u8; 4] = *b"kzp1";
/// Verification key: `k | num_fixed | fixed commitments`
pub const VK_MAGIC: [u8; 4] = *b"hvk1";
/// Circuit info: sizes, queries and gates
pub const CIRCUIT_INFO_MAGIC: [u8; 4] = *b"hci1";

/// Params bytes = magic + k + G1 + 2 * G2
pub const PARAMS_BYTES_LEN: usize = 4 + U32_BYTES + G1_BYTES + 2 * G2_BYTES; // 168

// ==========================
// Commitment-scheme selector
// ==========================

/// Reserved for inner-product-argument commitments; not supported.
pub const SCHEME_IPA: u8 = 0;
/// KZG commitments with the GWC multi-point opening, over BN254.
pub const SCHEME_KZG_GWC: u8 = 1;

// ==========================
// Fiat-Shamir framing
// ==========================

/// Domain tag the verifier transcript is initialised with.
pub const TRANSCRIPT_DOMAIN: &[u8] = b"ledger-crypto-natives/plonkish-kzg/v1";

pub const PREFIX_CHALLENGE: u8 = 0;
pub const PREFIX_POINT: u8 = 1;
pub const PREFIX_SCALAR: u8 = 2;
pub const PREFIX_BYTES: u8 = 3;

// ==========================
// Hashing
// ==========================

/// Capacity lane value for the two-input Poseidon hash.
pub const POSEIDON_DOMAIN: u64 = 1;
