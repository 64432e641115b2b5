//! PLONK proof and verification key types
//!
//! Proofs arrive as a flat list of 32-byte big-endian words. Verification keys
//! are stored in account data with a little-endian header followed by
//! big-endian curve and field data.

use crate::bn254::{Fr, G1Point, G2Point, FR_SIZE, G1_POINT_SIZE, G2_POINT_SIZE};
use crate::constants::{
    ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP, NUM_QUOTIENT_CHUNKS, NUM_SELECTOR_COMMITMENTS,
    SERIALIZED_PROOF_LENGTH, STATE_WIDTH, WORD_SIZE,
};
use crate::error::PlonkError;

/// Width-4 PLONK proof with access to `d(z*omega)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// Public inputs, supplied next to the serialized proof
    pub input_values: Vec<Fr>,
    /// Commitments to a, b, c, d
    pub wire_commitments: [G1Point; STATE_WIDTH],
    /// Commitment to the permutation grand product z(X)
    pub grand_product_commitment: G1Point,
    /// Commitments to t_0..t_3
    pub quotient_poly_commitments: [G1Point; NUM_QUOTIENT_CHUNKS],
    /// a(z), b(z), c(z), d(z)
    pub wire_values_at_z: [Fr; STATE_WIDTH],
    /// d(z*omega)
    pub wire_values_at_z_omega: [Fr; ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP],
    /// z(z*omega)
    pub grand_product_at_z_omega: Fr,
    /// t(z)
    pub quotient_polynomial_at_z: Fr,
    /// r(z)
    pub linearization_polynomial_at_z: Fr,
    /// sigma_0(z), sigma_1(z), sigma_2(z)
    pub permutation_polynomials_at_z: [Fr; STATE_WIDTH - 1],
    /// KZG opening proof at z
    pub opening_at_z_proof: G1Point,
    /// KZG opening proof at z*omega
    pub opening_at_z_omega_proof: G1Point,
}

/// Sequential reader over serialized proof words
struct WordReader<'a> {
    words: &'a [[u8; WORD_SIZE]],
    offset: usize,
}

impl<'a> WordReader<'a> {
    fn new(words: &'a [[u8; WORD_SIZE]]) -> Self {
        Self { words, offset: 0 }
    }

    fn next_word(&mut self) -> Result<&'a [u8; WORD_SIZE], PlonkError> {
        let word = self.words.get(self.offset).ok_or(PlonkError::MalformedProof)?;
        self.offset += 1;
        Ok(word)
    }

    fn next_fr(&mut self) -> Result<Fr, PlonkError> {
        let word = self.next_word()?;
        Fr::from_bytes(word).map_err(|_| PlonkError::MalformedProof)
    }

    fn next_g1(&mut self) -> Result<G1Point, PlonkError> {
        let x = self.next_word()?;
        let y = self.next_word()?;
        Ok(G1Point::from_coordinates(x, y))
    }

    fn next_frs<const N: usize>(&mut self) -> Result<[Fr; N], PlonkError> {
        let mut out = [Fr::zero(); N];
        for slot in out.iter_mut() {
            *slot = self.next_fr()?;
        }
        Ok(out)
    }

    fn next_g1s<const N: usize>(&mut self) -> Result<[G1Point; N], PlonkError> {
        let mut out = [G1Point::identity(); N];
        for slot in out.iter_mut() {
            *slot = self.next_g1()?;
        }
        Ok(out)
    }
}

impl Proof {
    /// Decode a proof from exactly `SERIALIZED_PROOF_LENGTH` words
    ///
    /// Layout: wire commitments, grand product commitment, quotient commitments,
    /// wire values at z, d(z*omega), z(z*omega), t(z), r(z), sigma_i(z),
    /// opening at z, opening at z*omega.
    pub fn deserialize(
        public_inputs: &[Fr],
        serialized_proof: &[[u8; WORD_SIZE]],
    ) -> Result<Self, PlonkError> {
        if serialized_proof.len() != SERIALIZED_PROOF_LENGTH {
            return Err(PlonkError::MalformedProof);
        }

        let mut reader = WordReader::new(serialized_proof);

        let wire_commitments = reader.next_g1s()?;
        let grand_product_commitment = reader.next_g1()?;
        let quotient_poly_commitments = reader.next_g1s()?;
        let wire_values_at_z = reader.next_frs()?;
        let wire_values_at_z_omega = reader.next_frs()?;
        let grand_product_at_z_omega = reader.next_fr()?;
        let quotient_polynomial_at_z = reader.next_fr()?;
        let linearization_polynomial_at_z = reader.next_fr()?;
        let permutation_polynomials_at_z = reader.next_frs()?;
        let opening_at_z_proof = reader.next_g1()?;
        let opening_at_z_omega_proof = reader.next_g1()?;

        Ok(Self {
            input_values: public_inputs.to_vec(),
            wire_commitments,
            grand_product_commitment,
            quotient_poly_commitments,
            wire_values_at_z,
            wire_values_at_z_omega,
            grand_product_at_z_omega,
            quotient_polynomial_at_z,
            linearization_polynomial_at_z,
            permutation_polynomials_at_z,
            opening_at_z_proof,
            opening_at_z_omega_proof,
        })
    }
}

/// Verification key for one circuit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    /// Evaluation domain size n (power of two)
    pub domain_size: u64,
    /// Number of public inputs
    pub num_inputs: u32,
    /// Generator of the evaluation domain
    pub omega: Fr,
    /// q_a, q_b, q_c, q_d, q_m, q_const
    pub selector_commitments: [G1Point; NUM_SELECTOR_COMMITMENTS],
    /// q_d_next
    pub next_step_selector_commitments: [G1Point; ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP],
    /// sigma_0..sigma_3
    pub permutation_commitments: [G1Point; STATE_WIDTH],
    /// Coset shifts k_1, k_2, k_3 separating the wire columns
    pub permutation_non_residues: [Fr; STATE_WIDTH - 1],
    /// SRS [x]_2 for the pairing
    pub g2_x: G2Point,
}

/// Sequential reader over verification key bytes
struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn take(&mut self, len: usize) -> &'a [u8] {
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        slice
    }

    fn fr(&mut self) -> Result<Fr, PlonkError> {
        Fr::from_bytes(self.take(FR_SIZE)).map_err(|_| PlonkError::InvalidVerificationKey)
    }

    fn g1s<const N: usize>(&mut self) -> Result<[G1Point; N], PlonkError> {
        let mut out = [G1Point::identity(); N];
        for slot in out.iter_mut() {
            *slot = G1Point::from_bytes(self.take(G1_POINT_SIZE))?;
        }
        Ok(out)
    }
}

impl VerificationKey {
    /// Serialized size in bytes
    ///
    /// domain_size (8) + num_inputs (4) + omega (32) + selectors (6 x 64)
    /// + next-step selector (64) + permutations (4 x 64) + non-residues (3 x 32)
    /// + g2_x (128)
    pub const SIZE: usize = 8
        + 4
        + FR_SIZE
        + NUM_SELECTOR_COMMITMENTS * G1_POINT_SIZE
        + ACCESSIBLE_STATE_POLYS_ON_NEXT_STEP * G1_POINT_SIZE
        + STATE_WIDTH * G1_POINT_SIZE
        + (STATE_WIDTH - 1) * FR_SIZE
        + G2_POINT_SIZE;

    /// Parse and validate a verification key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlonkError> {
        if bytes.len() < Self::SIZE {
            return Err(PlonkError::InvalidVerificationKey);
        }

        let mut reader = ByteReader { bytes, offset: 0 };

        let mut domain_size = [0u8; 8];
        domain_size.copy_from_slice(reader.take(8));
        let domain_size = u64::from_le_bytes(domain_size);

        let mut num_inputs = [0u8; 4];
        num_inputs.copy_from_slice(reader.take(4));
        let num_inputs = u32::from_le_bytes(num_inputs);

        if !domain_size.is_power_of_two() {
            return Err(PlonkError::InvalidVerificationKey);
        }
        if num_inputs == 0 || num_inputs as u64 > domain_size {
            return Err(PlonkError::InvalidVerificationKey);
        }

        let omega = reader.fr()?;
        let selector_commitments = reader.g1s()?;
        let next_step_selector_commitments = reader.g1s()?;
        let permutation_commitments = reader.g1s()?;

        let mut permutation_non_residues = [Fr::zero(); STATE_WIDTH - 1];
        for slot in permutation_non_residues.iter_mut() {
            *slot = reader.fr()?;
        }

        let g2_x = G2Point::from_bytes(reader.take(G2_POINT_SIZE))?;

        Ok(Self {
            domain_size,
            num_inputs,
            omega,
            selector_commitments,
            next_step_selector_commitments,
            permutation_commitments,
            permutation_non_residues,
            g2_x,
        })
    }

    /// Serialize into the account layout read by `from_bytes`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        out.extend_from_slice(&self.domain_size.to_le_bytes());
        out.extend_from_slice(&self.num_inputs.to_le_bytes());
        out.extend_from_slice(&self.omega.to_bytes());
        for point in self
            .selector_commitments
            .iter()
            .chain(self.next_step_selector_commitments.iter())
            .chain(self.permutation_commitments.iter())
        {
            out.extend_from_slice(&point.0);
        }
        for k in &self.permutation_non_residues {
            out.extend_from_slice(&k.to_bytes());
        }
        out.extend_from_slice(&self.g2_x.0);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bn254::SCALAR_MODULUS;
    use crate::keys::embedded_verification_key;

    fn dummy_words() -> Vec<[u8; WORD_SIZE]> {
        (0..SERIALIZED_PROOF_LENGTH as u64)
            .map(|i| Fr::from_u64(i + 1).to_bytes())
            .collect()
    }

    #[test]
    fn test_vk_size() {
        assert_eq!(VerificationKey::SIZE, 972);
    }

    #[test]
    fn test_proof_layout() {
        let words = dummy_words();
        let proof = Proof::deserialize(&[Fr::one()], &words).unwrap();

        assert_eq!(proof.input_values, vec![Fr::one()]);
        assert_eq!(proof.wire_commitments[0], G1Point::from_coordinates(&words[0], &words[1]));
        assert_eq!(proof.grand_product_commitment, G1Point::from_coordinates(&words[8], &words[9]));
        assert_eq!(
            proof.quotient_poly_commitments[3],
            G1Point::from_coordinates(&words[16], &words[17])
        );
        assert_eq!(proof.wire_values_at_z[0], Fr::from_u64(19));
        assert_eq!(proof.wire_values_at_z_omega[0], Fr::from_u64(23));
        assert_eq!(proof.grand_product_at_z_omega, Fr::from_u64(24));
        assert_eq!(proof.quotient_polynomial_at_z, Fr::from_u64(25));
        assert_eq!(proof.linearization_polynomial_at_z, Fr::from_u64(26));
        assert_eq!(proof.permutation_polynomials_at_z[2], Fr::from_u64(29));
        assert_eq!(proof.opening_at_z_proof, G1Point::from_coordinates(&words[29], &words[30]));
        assert_eq!(
            proof.opening_at_z_omega_proof,
            G1Point::from_coordinates(&words[31], &words[32])
        );
    }

    #[test]
    fn test_proof_wrong_length() {
        let mut words = dummy_words();
        words.pop();
        assert_eq!(Proof::deserialize(&[], &words), Err(PlonkError::MalformedProof));

        let mut words = dummy_words();
        words.push([0u8; 32]);
        assert_eq!(Proof::deserialize(&[], &words), Err(PlonkError::MalformedProof));

        assert_eq!(Proof::deserialize(&[], &[]), Err(PlonkError::MalformedProof));
    }

    #[test]
    fn test_proof_non_canonical_scalar() {
        let mut words = dummy_words();
        words[24] = SCALAR_MODULUS;
        assert_eq!(Proof::deserialize(&[], &words), Err(PlonkError::MalformedProof));
    }

    #[test]
    fn test_proof_coordinates_taken_as_is() {
        let mut words = dummy_words();
        words[0] = [0xff; 32];
        assert!(Proof::deserialize(&[], &words).is_ok());
    }

    #[test]
    fn test_vk_round_trip() {
        let vk = embedded_verification_key();
        let bytes = vk.to_bytes();
        assert_eq!(bytes.len(), VerificationKey::SIZE);
        assert_eq!(VerificationKey::from_bytes(&bytes).unwrap(), vk);
    }

    #[test]
    fn test_vk_field_offsets() {
        let vk = embedded_verification_key();
        let bytes = vk.to_bytes();
        assert_eq!(bytes[12..44], vk.omega.to_bytes());
        assert_eq!(&bytes[44..108], &vk.selector_commitments[0].0);
        assert_eq!(&bytes[428..492], &vk.next_step_selector_commitments[0].0);
        assert_eq!(&bytes[492..556], &vk.permutation_commitments[0].0);
        assert_eq!(bytes[748..780], vk.permutation_non_residues[0].to_bytes());
        assert_eq!(&bytes[844..972], &vk.g2_x.0);
    }

    #[test]
    fn test_vk_too_short() {
        let bytes = embedded_verification_key().to_bytes();
        assert_eq!(
            VerificationKey::from_bytes(&bytes[..VerificationKey::SIZE - 1]),
            Err(PlonkError::InvalidVerificationKey)
        );
    }

    #[test]
    fn test_vk_rejects_bad_domain() {
        for domain_size in [0u64, 6, 12] {
            let mut bytes = embedded_verification_key().to_bytes();
            bytes[..8].copy_from_slice(&domain_size.to_le_bytes());
            assert_eq!(
                VerificationKey::from_bytes(&bytes),
                Err(PlonkError::InvalidVerificationKey)
            );
        }
    }

    #[test]
    fn test_vk_rejects_bad_input_count() {
        for num_inputs in [0u32, 9] {
            let mut bytes = embedded_verification_key().to_bytes();
            bytes[8..12].copy_from_slice(&num_inputs.to_le_bytes());
            assert_eq!(
                VerificationKey::from_bytes(&bytes),
                Err(PlonkError::InvalidVerificationKey)
            );
        }
    }

    #[test]
    fn test_vk_rejects_non_canonical_scalars() {
        let mut bytes = embedded_verification_key().to_bytes();
        bytes[12..44].copy_from_slice(&SCALAR_MODULUS);
        assert_eq!(VerificationKey::from_bytes(&bytes), Err(PlonkError::InvalidVerificationKey));

        let mut bytes = embedded_verification_key().to_bytes();
        bytes[780..812].copy_from_slice(&[0xff; 32]);
        assert_eq!(VerificationKey::from_bytes(&bytes), Err(PlonkError::InvalidVerificationKey));
    }
}
