//! BN254 curve operations using Solana's alt_bn128 syscalls
//!
//! Scalar field arithmetic is delegated to `ark-bn254`; group operations and
//! the pairing go through the `sol_alt_bn128` host functions.

use crate::constants::{SRS_G2_GENERATOR, WORD_SIZE};
use crate::error::PlonkError;
use ark_ff::{BigInteger, Field, One, PrimeField, Zero};
use solana_bn254::prelude::{alt_bn128_addition, alt_bn128_multiplication, alt_bn128_pairing};

/// G1 point size in bytes (x, y coordinates)
pub const G1_POINT_SIZE: usize = 64;

/// G2 point size in bytes (x, y coordinates, each 64 bytes)
pub const G2_POINT_SIZE: usize = 128;

/// Field element size in bytes
pub const FR_SIZE: usize = 32;

/// Pairing input size for one (G1, G2) pair
const PAIRING_ELEMENT_SIZE: usize = G1_POINT_SIZE + G2_POINT_SIZE;

/// BN254 base field modulus p
pub const FIELD_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d,
    0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
];

/// BN254 scalar field modulus r
pub const SCALAR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91,
    0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// G1 generator point
pub const G1_GENERATOR: [u8; 64] = [
    // x = 1
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    // y = 2
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
];

/// Identity point (point at infinity) in G1
pub const G1_IDENTITY: [u8; 64] = [0u8; 64];

/// A G1 affine point (64 bytes, x || y big-endian)
///
/// The all-zero encoding is the point at infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G1Point(pub [u8; G1_POINT_SIZE]);

impl Default for G1Point {
    fn default() -> Self {
        Self(G1_IDENTITY)
    }
}

impl G1Point {
    /// Create from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlonkError> {
        if bytes.len() < G1_POINT_SIZE {
            return Err(PlonkError::InvalidG1Point);
        }
        let mut arr = [0u8; G1_POINT_SIZE];
        arr.copy_from_slice(&bytes[..G1_POINT_SIZE]);
        Ok(Self(arr))
    }

    /// Build from two base field words
    pub fn from_coordinates(x: &[u8; WORD_SIZE], y: &[u8; WORD_SIZE]) -> Self {
        let mut arr = [0u8; G1_POINT_SIZE];
        arr[..32].copy_from_slice(x);
        arr[32..].copy_from_slice(y);
        Self(arr)
    }

    /// x coordinate (big-endian)
    pub fn x(&self) -> [u8; WORD_SIZE] {
        let mut x = [0u8; WORD_SIZE];
        x.copy_from_slice(&self.0[..32]);
        x
    }

    /// y coordinate (big-endian)
    pub fn y(&self) -> [u8; WORD_SIZE] {
        let mut y = [0u8; WORD_SIZE];
        y.copy_from_slice(&self.0[32..]);
        y
    }

    /// Check if point is identity (zero)
    pub fn is_identity(&self) -> bool {
        is_zero(&self.0)
    }

    /// Get generator point
    pub fn generator() -> Self {
        Self(G1_GENERATOR)
    }

    /// Get identity point
    pub fn identity() -> Self {
        Self(G1_IDENTITY)
    }

    /// Negate point: -P = (x, -y) where -y = p - y
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return *self;
        }

        let mut result = [0u8; G1_POINT_SIZE];
        result[..32].copy_from_slice(&self.0[..32]);
        field_sub(&FIELD_MODULUS, &self.0[32..64], &mut result[32..64]);
        Self(result)
    }

    /// Add two G1 points
    pub fn add(&self, other: &Self) -> Result<Self, PlonkError> {
        if self.is_identity() {
            return Ok(*other);
        }
        if other.is_identity() {
            return Ok(*self);
        }

        let mut input = [0u8; 2 * G1_POINT_SIZE];
        input[..64].copy_from_slice(&self.0);
        input[64..].copy_from_slice(&other.0);

        let result = alt_bn128_addition(&input)
            .map_err(|_| PlonkError::Bn254SyscallError)?;

        Self::from_bytes(&result).map_err(|_| PlonkError::Bn254SyscallError)
    }

    /// Subtract: self + (-other)
    pub fn sub(&self, other: &Self) -> Result<Self, PlonkError> {
        self.add(&other.negate())
    }

    /// Scalar multiplication
    pub fn mul(&self, scalar: &Fr) -> Result<Self, PlonkError> {
        if scalar.is_zero() || self.is_identity() {
            return Ok(Self::identity());
        }

        let mut input = [0u8; G1_POINT_SIZE + FR_SIZE];
        input[..64].copy_from_slice(&self.0);
        input[64..].copy_from_slice(&scalar.to_bytes());

        let result = alt_bn128_multiplication(&input)
            .map_err(|_| PlonkError::Bn254SyscallError)?;

        Self::from_bytes(&result).map_err(|_| PlonkError::Bn254SyscallError)
    }

    /// Accumulate `self + point * scalar`
    pub fn add_scaled(&self, point: &Self, scalar: &Fr) -> Result<Self, PlonkError> {
        self.add(&point.mul(scalar)?)
    }
}

/// A G2 affine point (128 bytes, EIP-197 order: x.c1, x.c0, y.c1, y.c0)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G2Point(pub [u8; G2_POINT_SIZE]);

impl Default for G2Point {
    fn default() -> Self {
        Self([0u8; G2_POINT_SIZE])
    }
}

impl G2Point {
    /// Create from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlonkError> {
        if bytes.len() < G2_POINT_SIZE {
            return Err(PlonkError::InvalidG2Point);
        }
        let mut arr = [0u8; G2_POINT_SIZE];
        arr.copy_from_slice(&bytes[..G2_POINT_SIZE]);
        Ok(Self(arr))
    }

    /// SRS generator [1]_2
    pub fn generator() -> Self {
        Self(SRS_G2_GENERATOR)
    }
}

/// A scalar field element, reduced mod r
///
/// Bytes cross the boundary only in [`Fr::from_bytes`] and [`Fr::to_bytes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fr(ark_bn254::Fr);

impl Fr {
    /// Decode a canonical big-endian element
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlonkError> {
        if bytes.len() < FR_SIZE {
            return Err(PlonkError::InvalidFieldElement);
        }
        let mut arr = [0u8; FR_SIZE];
        arr.copy_from_slice(&bytes[..FR_SIZE]);
        if !is_canonical_scalar(&arr) {
            return Err(PlonkError::InvalidFieldElement);
        }
        Ok(Self(ark_bn254::Fr::from_be_bytes_mod_order(&arr)))
    }

    /// Wrap bytes already known to be `< r`
    pub(crate) fn from_canonical_unchecked(bytes: [u8; FR_SIZE]) -> Self {
        Self(ark_bn254::Fr::from_be_bytes_mod_order(&bytes))
    }

    /// Big-endian encoding
    pub fn to_bytes(&self) -> [u8; FR_SIZE] {
        let bytes = self.0.into_bigint().to_bytes_be();
        let mut arr = [0u8; FR_SIZE];
        arr[FR_SIZE - bytes.len()..].copy_from_slice(&bytes);
        arr
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Zero element
    pub fn zero() -> Self {
        Self(ark_bn254::Fr::zero())
    }

    /// One element
    pub fn one() -> Self {
        Self(ark_bn254::Fr::one())
    }

    /// Create field element from u64
    pub fn from_u64(value: u64) -> Self {
        Self(ark_bn254::Fr::from(value))
    }

    /// Add two field elements (mod r)
    pub fn add(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    /// Subtract two field elements (mod r)
    pub fn sub(&self, other: &Self) -> Self {
        Self(self.0 - other.0)
    }

    /// Multiply two field elements (mod r)
    pub fn mul(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Negate field element
    pub fn negate(&self) -> Self {
        Self(-self.0)
    }

    /// Square the field element
    pub fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Compute self^exp
    pub fn pow(&self, exp: u64) -> Self {
        Self(self.0.pow([exp]))
    }

    /// Modular inverse, None for zero
    pub fn inverse(&self) -> Option<Self> {
        self.0.inverse().map(Self)
    }
}

/// Pairing check: e(P1, Q1) * e(P2, Q2) * ... == 1
/// Returns true if the product of pairings equals identity
pub fn pairing_check(pairs: &[(G1Point, G2Point)]) -> Result<bool, PlonkError> {
    if pairs.is_empty() {
        return Ok(true);
    }

    // Each pair: 64 (G1) + 128 (G2) = 192 bytes
    let mut input = vec![0u8; pairs.len() * PAIRING_ELEMENT_SIZE];

    for (chunk, (g1, g2)) in input.chunks_exact_mut(PAIRING_ELEMENT_SIZE).zip(pairs) {
        chunk[..G1_POINT_SIZE].copy_from_slice(&g1.0);
        chunk[G1_POINT_SIZE..].copy_from_slice(&g2.0);
    }

    let result = alt_bn128_pairing(&input)
        .map_err(|_| PlonkError::Bn254SyscallError)?;

    // Pairing returns 32 bytes, big-endian 1 on success
    Ok(result.len() == 32 && result[..31].iter().all(|&b| b == 0) && result[31] == 1)
}

// ============================================================================
// Byte helpers
// ============================================================================

/// Check if bytes are all zero
#[inline(always)]
fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

/// True when the big-endian word is below r
#[inline(always)]
pub fn is_canonical_scalar(bytes: &[u8; FR_SIZE]) -> bool {
    compare_bytes(bytes, &SCALAR_MODULUS) < 0
}

/// Subtraction: result = a - b (assumes a >= b)
#[inline(always)]
fn field_sub(a: &[u8], b: &[u8], result: &mut [u8]) {
    let mut borrow: u16 = 0;
    for i in (0..32).rev() {
        let ai = a[i] as u16;
        let bi = b[i] as u16;
        let diff = ai.wrapping_sub(bi).wrapping_sub(borrow);
        borrow = (diff >> 8) & 1;
        result[i] = diff as u8;
    }
}

/// Compare two byte arrays (big-endian)
#[inline(always)]
fn compare_bytes(a: &[u8], b: &[u8]) -> i32 {
    for i in 0..a.len().min(b.len()) {
        if a[i] > b[i] {
            return 1;
        }
        if a[i] < b[i] {
            return -1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r_minus_one() -> Fr {
        let mut bytes = SCALAR_MODULUS;
        bytes[31] -= 1;
        Fr::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_g1_identity() {
        let id = G1Point::identity();
        assert!(id.is_identity());
        assert_eq!(id, G1Point::default());
    }

    #[test]
    fn test_g1_negate() {
        let id = G1Point::identity();
        assert!(id.negate().is_identity());

        let neg_g = G1Point::generator().negate();
        assert_eq!(neg_g.x(), G1Point::generator().x());
        // -2 mod p = p - 2
        let mut expected_y = FIELD_MODULUS;
        expected_y[31] -= 2;
        assert_eq!(neg_g.y(), expected_y);
        assert_eq!(neg_g.negate(), G1Point::generator());
    }

    #[test]
    fn test_g1_add_and_mul_agree() {
        let g = G1Point::generator();
        let doubled = g.add(&g).unwrap();
        let times_two = g.mul(&Fr::from_u64(2)).unwrap();
        assert_eq!(doubled, times_two);

        let three_g = g.mul(&Fr::from_u64(3)).unwrap();
        assert_eq!(three_g.sub(&g).unwrap(), doubled);
    }

    #[test]
    fn test_g1_add_inverse_is_identity() {
        let g = G1Point::generator();
        assert!(g.add(&g.negate()).unwrap().is_identity());
    }

    #[test]
    fn test_g1_mul_by_zero_and_order() {
        let g = G1Point::generator();
        assert!(g.mul(&Fr::zero()).unwrap().is_identity());
        // (r - 1) * G = -G
        assert_eq!(g.mul(&r_minus_one()).unwrap(), g.negate());
    }

    #[test]
    fn test_g1_off_curve_rejected() {
        let bogus = G1Point::from_coordinates(&Fr::from_u64(1).to_bytes(), &Fr::from_u64(3).to_bytes());
        assert_eq!(
            bogus.add(&G1Point::generator()),
            Err(PlonkError::Bn254SyscallError)
        );
    }

    #[test]
    fn test_fr_operations() {
        let one = Fr::one();
        let zero = Fr::zero();

        assert!(!one.is_zero());
        assert!(zero.is_zero());
        assert_eq!(zero.add(&one), one);
        assert_eq!(zero.sub(&one), r_minus_one());
        assert_eq!(one.negate(), r_minus_one());
        assert_eq!(zero.negate(), zero);
        assert_eq!(r_minus_one().add(&one), zero);
        assert_eq!(Fr::from_u64(6).mul(&Fr::from_u64(7)), Fr::from_u64(42));
        assert_eq!(Fr::from_u64(9).square(), Fr::from_u64(81));
    }

    #[test]
    fn test_fr_pow() {
        assert_eq!(Fr::from_u64(2).pow(10), Fr::from_u64(1024));
        assert_eq!(Fr::from_u64(5).pow(0), Fr::one());
        assert_eq!(Fr::zero().pow(3), Fr::zero());
    }

    #[test]
    fn test_fr_inverse() {
        assert!(Fr::zero().inverse().is_none());
        let seven = Fr::from_u64(7);
        let inv = seven.inverse().unwrap();
        assert_eq!(seven.mul(&inv), Fr::one());
        assert_eq!(r_minus_one().inverse().unwrap(), r_minus_one());
    }

    #[test]
    fn test_scalar_modulus_matches_field() {
        let modulus = ark_bn254::Fr::MODULUS.to_bytes_be();
        assert_eq!(modulus.as_slice(), &SCALAR_MODULUS[..]);
    }

    #[test]
    fn test_fr_largest_element_decodes() {
        let largest = Fr::zero().sub(&Fr::one());
        let bytes = largest.to_bytes();
        assert_eq!(bytes[31], SCALAR_MODULUS[31] - 1);
        assert_eq!(bytes[..31], SCALAR_MODULUS[..31]);
        assert_eq!(Fr::from_bytes(&bytes), Ok(largest));
        assert!(is_canonical_scalar(&bytes));
    }

    #[test]
    fn test_fr_canonical_decoding() {
        assert_eq!(Fr::from_bytes(&SCALAR_MODULUS), Err(PlonkError::InvalidFieldElement));
        assert_eq!(Fr::from_bytes(&[0xffu8; 32]), Err(PlonkError::InvalidFieldElement));
        assert_eq!(Fr::from_bytes(&[0u8; 31]), Err(PlonkError::InvalidFieldElement));
        assert!(Fr::from_bytes(&r_minus_one().to_bytes()).is_ok());
    }

    #[test]
    fn test_pairing_generator_cancels() {
        let g1 = G1Point::generator();
        let g2 = G2Point::generator();
        assert!(pairing_check(&[(g1, g2), (g1.negate(), g2)]).unwrap());
        assert!(!pairing_check(&[(g1, g2), (g1, g2)]).unwrap());
    }

    #[test]
    fn test_pairing_with_identity() {
        let g2 = G2Point::generator();
        assert!(pairing_check(&[(G1Point::identity(), g2)]).unwrap());
        assert!(pairing_check(&[]).unwrap());
    }
}
