//! Embedded verification key
//!
//! Key of the bn254 reference circuit: one public input, evaluation domain of
//! size 8, permutation coset shifts 5, 7 and 10. Used by the `VERIFY`
//! instruction; other circuits register their key with `INIT_VK`.

use crate::bn254::{Fr, G1Point, G2Point};
use crate::constants::{ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP, STATE_WIDTH};
use crate::types::VerificationKey;

/// Evaluation domain size
const DOMAIN_SIZE: u64 = 8;

/// Number of public inputs
const NUM_INPUTS: u32 = 1;

/// Permutation coset shifts k_1, k_2, k_3
const PERMUTATION_NON_RESIDUES: [u64; STATE_WIDTH - 1] = [5, 7, 10];

/// Generator of the size-8 evaluation domain
/// = 0x2b337de1c8c14f22ec9b9e2f96afef3652627366f8170a0a948dad4ac1bd5e80
const OMEGA: [u8; 32] = [
    0x2b, 0x33, 0x7d, 0xe1, 0xc8, 0xc1, 0x4f, 0x22,
    0xec, 0x9b, 0x9e, 0x2f, 0x96, 0xaf, 0xef, 0x36,
    0x52, 0x62, 0x73, 0x66, 0xf8, 0x17, 0x0a, 0x0a,
    0x94, 0x8d, 0xad, 0x4a, 0xc1, 0xbd, 0x5e, 0x80,
];

/// Main gate selector commitments: q_a, q_b, q_c, q_d, q_m, q_const
const SELECTOR_COMMITMENTS: [[u8; 64]; STATE_WIDTH + 2] = [
    // q_a
    [
        0x22, 0x1f, 0x0a, 0x47, 0x24, 0x49, 0x6e, 0xef,
        0x2d, 0x6f, 0x4a, 0x3f, 0xeb, 0x4f, 0xfc, 0x02,
        0x08, 0xde, 0x7b, 0xfd, 0xb7, 0x37, 0xea, 0x8e,
        0x2b, 0x83, 0x5e, 0x06, 0x16, 0xd0, 0x61, 0xd2,
        0x11, 0xc9, 0x39, 0xdd, 0xcd, 0x22, 0x08, 0x7b,
        0x6f, 0xd5, 0x9d, 0x79, 0x9e, 0x15, 0x92, 0x45,
        0x73, 0xb8, 0xa8, 0x15, 0xa7, 0x89, 0xd2, 0x37,
        0x41, 0x4b, 0x84, 0x30, 0xfc, 0xf6, 0x99, 0x74,
    ],
    // q_b
    [
        0x1a, 0x49, 0x1b, 0x60, 0xcd, 0xae, 0x81, 0x1d,
        0xc0, 0x3c, 0x00, 0x65, 0x5a, 0x64, 0x07, 0x3c,
        0xf5, 0x36, 0x11, 0x53, 0x24, 0xb3, 0x40, 0x89,
        0x5c, 0x6d, 0xb7, 0xe3, 0x87, 0xee, 0xa6, 0x81,
        0x06, 0xe6, 0x3b, 0x07, 0x1a, 0xba, 0xe5, 0xad,
        0x0d, 0xc2, 0x81, 0xf1, 0x03, 0xe2, 0x34, 0xf3,
        0x45, 0x35, 0xd7, 0x95, 0x69, 0x9d, 0xcc, 0x6a,
        0x89, 0x5d, 0x59, 0x64, 0x42, 0x2a, 0x59, 0x52,
    ],
    // q_c
    [
        0x23, 0xf7, 0x71, 0xb8, 0x34, 0xfc, 0xf9, 0x4e,
        0x74, 0x92, 0x7d, 0x88, 0x86, 0x0d, 0xa4, 0xf1,
        0xf5, 0x24, 0xc6, 0x95, 0x10, 0x68, 0x00, 0xf2,
        0x1d, 0xbb, 0xa7, 0x51, 0x4d, 0xa4, 0xd2, 0x4a,
        0x27, 0x5c, 0xf7, 0xfe, 0x30, 0xa3, 0xf8, 0x06,
        0xdc, 0x12, 0x2e, 0x4f, 0x6d, 0x7e, 0x5c, 0xb5,
        0x3e, 0xf3, 0x2c, 0x4b, 0x3b, 0x85, 0x54, 0xee,
        0x84, 0xb3, 0xd3, 0xe6, 0x3d, 0x71, 0x97, 0x9a,
    ],
    // q_d
    [
        0x1a, 0x49, 0x1b, 0x60, 0xcd, 0xae, 0x81, 0x1d,
        0xc0, 0x3c, 0x00, 0x65, 0x5a, 0x64, 0x07, 0x3c,
        0xf5, 0x36, 0x11, 0x53, 0x24, 0xb3, 0x40, 0x89,
        0x5c, 0x6d, 0xb7, 0xe3, 0x87, 0xee, 0xa6, 0x81,
        0x29, 0x7e, 0x13, 0x6b, 0xc6, 0x76, 0xba, 0x7c,
        0xaa, 0x8d, 0xc3, 0xc5, 0x7d, 0x9f, 0x23, 0x6a,
        0x52, 0x4b, 0x92, 0xfb, 0xfe, 0xd3, 0xfe, 0x22,
        0xb2, 0xc3, 0x32, 0xb2, 0x96, 0x52, 0xa3, 0xf5,
    ],
    // q_m
    [
        0x28, 0xc3, 0xe8, 0x48, 0xb7, 0xbd, 0x79, 0xad,
        0x40, 0x8b, 0xbc, 0xc1, 0x96, 0x81, 0x46, 0x07,
        0xab, 0x5c, 0x1d, 0xe6, 0xab, 0x27, 0x60, 0x42,
        0x36, 0xe5, 0x96, 0x93, 0x8e, 0x61, 0x55, 0xf0,
        0x0e, 0xf8, 0x67, 0xa1, 0x1b, 0x55, 0x0b, 0x3a,
        0x2a, 0x16, 0x47, 0xa5, 0x4a, 0xfb, 0xe5, 0x00,
        0x42, 0xb2, 0x5d, 0xae, 0x35, 0xf6, 0x37, 0x1d,
        0x32, 0x54, 0xbc, 0x3f, 0x94, 0xa0, 0x59, 0xa1,
    ],
    // q_const (identity)
    [0u8; 64],
];

/// Next-step selector commitment q_d_next (unused by this circuit)
const NEXT_STEP_SELECTOR_COMMITMENTS: [[u8; 64]; ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP] = [[0u8; 64]];

/// Permutation (sigma) commitments, one per state wire
const PERMUTATION_COMMITMENTS: [[u8; 64]; STATE_WIDTH] = [
    // sigma_0
    [
        0x01, 0x44, 0x54, 0xce, 0x2b, 0x4d, 0x98, 0x13,
        0x20, 0x91, 0x1a, 0x24, 0x07, 0x1a, 0xda, 0x0c,
        0xc9, 0x63, 0x23, 0xbc, 0xaf, 0x51, 0x7c, 0x96,
        0x2a, 0x77, 0x71, 0xea, 0x88, 0x2d, 0xfc, 0xab,
        0x29, 0xbc, 0x9f, 0xb3, 0xf2, 0x42, 0xfa, 0x4d,
        0x90, 0x7d, 0x45, 0x0c, 0x06, 0x66, 0x1b, 0x59,
        0xac, 0x3e, 0x76, 0xbf, 0x44, 0xa8, 0x71, 0xd6,
        0x4c, 0x7d, 0x7e, 0x99, 0xde, 0xe6, 0xf0, 0x3e,
    ],
    // sigma_1
    [
        0x13, 0xd0, 0x24, 0x30, 0xc8, 0xf7, 0xb5, 0xd8,
        0x4c, 0x47, 0xd0, 0x7b, 0xa4, 0xba, 0x11, 0xdc,
        0x17, 0xf7, 0xe2, 0x97, 0xd0, 0xc4, 0xfc, 0xb3,
        0x82, 0xc1, 0x31, 0xbe, 0x88, 0xa2, 0x5f, 0xb1,
        0x14, 0x3a, 0xae, 0x30, 0x95, 0xe6, 0x53, 0x39,
        0x98, 0xcd, 0x79, 0xcf, 0xcb, 0x2c, 0xe4, 0xc9,
        0xe1, 0x15, 0xc0, 0xc8, 0x3f, 0xc0, 0xea, 0xeb,
        0xfe, 0x07, 0xd8, 0x6a, 0xf1, 0xcb, 0x39, 0x50,
    ],
    // sigma_2
    [
        0x2e, 0x58, 0x24, 0x18, 0x74, 0x23, 0x69, 0x77,
        0xd6, 0xbc, 0x4e, 0xa2, 0xf1, 0xb4, 0x98, 0xb3,
        0x53, 0x8c, 0xab, 0x28, 0x86, 0x62, 0x85, 0x9d,
        0x95, 0xf0, 0x55, 0x7b, 0xad, 0x9c, 0xba, 0xe2,
        0x0b, 0xa7, 0x56, 0x34, 0x77, 0x3b, 0xf3, 0x39,
        0x9c, 0x8a, 0xdd, 0xd4, 0xd1, 0x31, 0x1e, 0xfb,
        0xc9, 0xa8, 0x9d, 0xa0, 0xc1, 0x87, 0x76, 0xe6,
        0x39, 0xec, 0xa2, 0x22, 0x3d, 0x34, 0xf5, 0x6a,
    ],
    // sigma_3
    [
        0x1e, 0xab, 0xdf, 0xa3, 0xd4, 0x8c, 0x78, 0x1c,
        0xa4, 0x7e, 0x0f, 0xaa, 0xc6, 0x2e, 0x85, 0x96,
        0x1f, 0x29, 0x54, 0x75, 0xc9, 0x0d, 0xaf, 0x24,
        0x4d, 0x58, 0xfd, 0x90, 0xd3, 0xb7, 0x2d, 0x0a,
        0x1a, 0x70, 0x3f, 0x11, 0x3b, 0x32, 0x0a, 0x32,
        0x8b, 0xab, 0x83, 0x76, 0xde, 0x9a, 0x29, 0xe6,
        0x2d, 0x8a, 0xa8, 0x6b, 0x13, 0x62, 0x9c, 0x19,
        0x3f, 0x3e, 0xef, 0xdf, 0x7d, 0x56, 0x2b, 0xaf,
    ],
];

/// SRS [x]_2 in EIP-197 order (x.c1, x.c0, y.c1, y.c0)
const G2_X: [u8; 128] = [
    // x.c1 = 0x12740934ba9615b77b6a49b06fcce83ce90d67b1d0e2a530069e3a7306569a91
    0x12, 0x74, 0x09, 0x34, 0xba, 0x96, 0x15, 0xb7,
    0x7b, 0x6a, 0x49, 0xb0, 0x6f, 0xcc, 0xe8, 0x3c,
    0xe9, 0x0d, 0x67, 0xb1, 0xd0, 0xe2, 0xa5, 0x30,
    0x06, 0x9e, 0x3a, 0x73, 0x06, 0x56, 0x9a, 0x91,
    // x.c0 = 0x116da8c89a0d090f3d8644ada33a5f1c8013ba7204aeca62d66d931b99afe6e7
    0x11, 0x6d, 0xa8, 0xc8, 0x9a, 0x0d, 0x09, 0x0f,
    0x3d, 0x86, 0x44, 0xad, 0xa3, 0x3a, 0x5f, 0x1c,
    0x80, 0x13, 0xba, 0x72, 0x04, 0xae, 0xca, 0x62,
    0xd6, 0x6d, 0x93, 0x1b, 0x99, 0xaf, 0xe6, 0xe7,
    // y.c1 = 0x25222d9816e5f86b4a7dedd00d04acc5c979c18bd22b834ea8c6d07c0ba441db
    0x25, 0x22, 0x2d, 0x98, 0x16, 0xe5, 0xf8, 0x6b,
    0x4a, 0x7d, 0xed, 0xd0, 0x0d, 0x04, 0xac, 0xc5,
    0xc9, 0x79, 0xc1, 0x8b, 0xd2, 0x2b, 0x83, 0x4e,
    0xa8, 0xc6, 0xd0, 0x7c, 0x0b, 0xa4, 0x41, 0xdb,
    // y.c0 = 0x076441042e77b6309644b56251f059cf14befc72ac8a6157d30924e58dc4c172
    0x07, 0x64, 0x41, 0x04, 0x2e, 0x77, 0xb6, 0x30,
    0x96, 0x44, 0xb5, 0x62, 0x51, 0xf0, 0x59, 0xcf,
    0x14, 0xbe, 0xfc, 0x72, 0xac, 0x8a, 0x61, 0x57,
    0xd3, 0x09, 0x24, 0xe5, 0x8d, 0xc4, 0xc1, 0x72,
];

/// Build the embedded verification key
pub fn embedded_verification_key() -> VerificationKey {
    VerificationKey {
        domain_size: DOMAIN_SIZE,
        num_inputs: NUM_INPUTS,
        omega: Fr::from_canonical_unchecked(OMEGA),
        selector_commitments: SELECTOR_COMMITMENTS.map(G1Point),
        next_step_selector_commitments: NEXT_STEP_SELECTOR_COMMITMENTS.map(G1Point),
        permutation_commitments: PERMUTATION_COMMITMENTS.map(G1Point),
        permutation_non_residues: PERMUTATION_NON_RESIDUES.map(Fr::from_u64),
        g2_x: G2Point(G2_X),
    }
}
