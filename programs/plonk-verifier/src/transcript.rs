//! Fiat-Shamir transcript for PLONK verification
//!
//! Two-lane Keccak256 sponge. Every absorbed word updates both lanes from the
//! same pre-update state, and each challenge is squeezed with a running
//! 4-byte big-endian counter.

use crate::bn254::{Fr, G1Point};
use crate::constants::{CHALLENGE_TOP_BYTE_MASK, DST_0, DST_1, DST_CHALLENGE, WORD_SIZE};
use solana_nostd_keccak::hashv;

/// Keccak256 hash output size
const HASH_SIZE: usize = 32;

/// Transcript for Fiat-Shamir heuristic
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    state_0: [u8; HASH_SIZE],
    state_1: [u8; HASH_SIZE],
    challenge_counter: u32,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Create new transcript with both lanes zeroed
    pub fn new() -> Self {
        Self {
            state_0: [0u8; HASH_SIZE],
            state_1: [0u8; HASH_SIZE],
            challenge_counter: 0,
        }
    }

    /// Absorb one 32-byte word
    pub fn update_with_u256(&mut self, value: &[u8; WORD_SIZE]) {
        let old_state_0 = self.state_0;
        self.state_0 = hashv(&[&DST_0, &old_state_0, &self.state_1, value]);
        self.state_1 = hashv(&[&DST_1, &old_state_0, &self.state_1, value]);
    }

    /// Absorb a field element (big-endian, 32 bytes)
    #[inline]
    pub fn update_with_fr(&mut self, value: &Fr) {
        self.update_with_u256(&value.to_bytes());
    }

    /// Absorb a G1 point as x then y
    #[inline]
    pub fn update_with_g1(&mut self, point: &G1Point) {
        self.update_with_u256(&point.x());
        self.update_with_u256(&point.y());
    }

    /// Squeeze the next challenge
    ///
    /// The digest is truncated to 253 bits, which is always below r.
    pub fn get_challenge(&mut self) -> Fr {
        let counter = self.challenge_counter.to_be_bytes();
        let mut query = hashv(&[&DST_CHALLENGE, &self.state_0, &self.state_1, &counter]);
        self.challenge_counter = self.challenge_counter.wrapping_add(1);

        query[0] &= CHALLENGE_TOP_BYTE_MASK;
        Fr::from_canonical_unchecked(query)
    }

    /// Get current state (for debugging)
    #[cfg(test)]
    pub fn get_state(&self) -> ([u8; 32], [u8; 32], u32) {
        (self.state_0, self.state_1, self.challenge_counter)
    }
}
