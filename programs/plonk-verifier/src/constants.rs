//! Protocol constants for the width-4 PLONK verifier
//!
//! Layout sizes, transcript domain tags and the SRS G2 generator.

/// Number of witness wires per gate (a, b, c, d)
pub const STATE_WIDTH: usize = 4;

/// Number of wires the gate may read at the next row (only d)
pub const ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP: usize = 1;

/// Main gate selectors: q_a, q_b, q_c, q_d, q_m, q_const
pub const NUM_SELECTOR_COMMITMENTS: usize = STATE_WIDTH + 2;

/// Number of quotient chunks t_0..t_3
pub const NUM_QUOTIENT_CHUNKS: usize = STATE_WIDTH;

/// Size of one serialized word (field element or base-field coordinate)
pub const WORD_SIZE: usize = 32;

/// Number of 32-byte words in a serialized proof
///
/// wires (4 points) + grand product (1 point) + quotient chunks (4 points)
/// + 11 scalars + opening proofs (2 points)
pub const SERIALIZED_PROOF_LENGTH: usize = 2 * STATE_WIDTH
    + 2
    + 2 * NUM_QUOTIENT_CHUNKS
    + STATE_WIDTH
    + ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP
    + 1
    + (STATE_WIDTH - 1)
    + 1
    + 1
    + 4;

/// Upper bound on public inputs accepted by the on-chain instruction
pub const MAX_PUBLIC_INPUTS: usize = 16;

/// Opening of `d(X)` at `z*omega` shares one challenge power sequence with the
/// openings at `z`: quotient, linearization, 4 wires, 3 permutations come first
pub const POWER_FOR_Z_OMEGA_OPENING: u64 =
    1 + 1 + STATE_WIDTH as u64 + (STATE_WIDTH as u64 - 1);

// ============================================================================
// Transcript domain tags
// ============================================================================

/// Tag prepended when updating state half 0
pub const DST_0: [u8; 4] = [0x00, 0x00, 0x00, 0x00];

/// Tag prepended when updating state half 1
pub const DST_1: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// Tag prepended when squeezing a challenge
pub const DST_CHALLENGE: [u8; 4] = [0x00, 0x00, 0x00, 0x02];

/// Challenges keep the low 253 bits of the digest (0x1fff...ff)
pub const CHALLENGE_TOP_BYTE_MASK: u8 = 0x1f;

// ============================================================================
// SRS
// ============================================================================

/// BN254 G2 generator in EIP-197 order (x.c1, x.c0, y.c1, y.c0)
pub const SRS_G2_GENERATOR: [u8; 128] = [
    // x.c1
    0x19, 0x8e, 0x93, 0x93, 0x92, 0x0d, 0x48, 0x3a,
    0x72, 0x60, 0xbf, 0xb7, 0x31, 0xfb, 0x5d, 0x25,
    0xf1, 0xaa, 0x49, 0x33, 0x35, 0xa9, 0xe7, 0x12,
    0x97, 0xe4, 0x85, 0xb7, 0xae, 0xf3, 0x12, 0xc2,
    // x.c0
    0x18, 0x00, 0xde, 0xef, 0x12, 0x1f, 0x1e, 0x76,
    0x42, 0x6a, 0x00, 0x66, 0x5e, 0x5c, 0x44, 0x79,
    0x67, 0x43, 0x22, 0xd4, 0xf7, 0x5e, 0xda, 0xdd,
    0x46, 0xde, 0xbd, 0x5c, 0xd9, 0x92, 0xf6, 0xed,
    // y.c1
    0x09, 0x06, 0x89, 0xd0, 0x58, 0x5f, 0xf0, 0x75,
    0xec, 0x9e, 0x99, 0xad, 0x69, 0x0c, 0x33, 0x95,
    0xbc, 0x4b, 0x31, 0x33, 0x70, 0xb3, 0x8e, 0xf3,
    0x55, 0xac, 0xda, 0xdc, 0xd1, 0x22, 0x97, 0x5b,
    // y.c0
    0x12, 0xc8, 0x5e, 0xa5, 0xdb, 0x8c, 0x6d, 0xeb,
    0x4a, 0xab, 0x71, 0x80, 0x8d, 0xcb, 0x40, 0x8f,
    0xe3, 0xd1, 0xe7, 0x69, 0x0c, 0x43, 0xd3, 0x7b,
    0x4c, 0xe6, 0xcc, 0x01, 0x66, 0xfa, 0x7d, 0xaa,
];
