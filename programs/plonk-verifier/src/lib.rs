//! PLONK Verifier for Solana
//!
//! Verifies width-4 PLONK proofs (with access to `d(z*omega)`) over BN254,
//! using Keccak256 Fiat-Shamir and a KZG pairing check on the alt_bn128
//! syscalls.
//!
//! # Architecture
//!
//! ```text
//! instruction data ──→ parse_verify_payload ──→ Proof::deserialize
//!                                                    │
//!          Transcript ←── verify_initial ←───────────┘
//!          Lagrange   ←──     │
//!                             ↓
//!                      verify_commitments ──→ sol_alt_bn128 pairing
//! ```
//!
//! # Proof Format
//!
//! 33 big-endian 32-byte words:
//! - 4 wire commitments, grand product commitment, 4 quotient commitments (G1)
//! - wire values at z (4), d(z*omega), z(z*omega), t(z), r(z), sigma_i(z) (3)
//! - opening proofs at z and z*omega (G1)

use pinocchio::{
    account_info::AccountInfo,
    entrypoint,
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};

pub mod bn254;
pub mod constants;
pub mod error;
pub mod keys;
pub mod lagrange;
pub mod transcript;
pub mod types;
pub mod verifier;

use bn254::Fr;
use constants::{MAX_PUBLIC_INPUTS, SERIALIZED_PROOF_LENGTH, WORD_SIZE};

pub use error::PlonkError;
pub use keys::embedded_verification_key;
pub use types::*;
pub use verifier::{try_verify_serialized_proof, verify, verify_serialized_proof};

/// Program ID placeholder (update after deployment)
pub const ID: Pubkey = [
    0x50, 0x6c, 0x6f, 0x6e, 0x6b, 0x56, 0x65, 0x72,  // "PlonkVer"
    0x69, 0x66, 0x69, 0x65, 0x72, 0x53, 0x6f, 0x6c,  // "ifierSol"
    0x61, 0x6e, 0x61, 0x00, 0x00, 0x00, 0x00, 0x00,  // "ana"
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
];

/// Instruction discriminators
pub mod instruction {
    /// Verify a proof against the embedded verification key
    /// Data: [public_inputs_count (4)] || [public_inputs (N × 32)] || [proof (33 × 32)]
    pub const VERIFY: u8 = 0;

    /// Verify a proof with the verification key stored in an account
    /// Accounts: [vk_account]
    /// Data: same as VERIFY
    pub const VERIFY_WITH_VK_ACCOUNT: u8 = 1;

    /// Initialize or update a verification key account
    /// Accounts: [vk_account (writable), authority (signer), system_program]
    /// Data: [verification_key (972)]
    pub const INIT_VK: u8 = 2;
}

/// VK account layout: authority (32) || verification key
pub const VK_ACCOUNT_HEADER_SIZE: usize = 32;

/// Total VK account data size
pub const VK_ACCOUNT_SIZE: usize = VK_ACCOUNT_HEADER_SIZE + VerificationKey::SIZE;

#[cfg(not(feature = "no-entrypoint"))]
entrypoint!(process_instruction);

/// Main entrypoint - routes to instruction handlers
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let (discriminator, data) = instruction_data
        .split_first()
        .ok_or(ProgramError::InvalidInstructionData)?;

    match *discriminator {
        instruction::VERIFY => process_verify(program_id, accounts, data),
        instruction::VERIFY_WITH_VK_ACCOUNT => process_verify_with_vk(program_id, accounts, data),
        instruction::INIT_VK => process_init_vk(program_id, accounts, data),
        _ => Err(ProgramError::InvalidInstructionData),
    }
}

/// Split a VERIFY payload into public inputs and proof words
///
/// Format:
/// - public_inputs_count (4 bytes, little-endian, at most `MAX_PUBLIC_INPUTS`)
/// - public_inputs (count × 32 bytes, canonical scalars)
/// - proof (`SERIALIZED_PROOF_LENGTH` × 32 bytes)
pub fn parse_verify_payload(
    data: &[u8],
) -> Result<(Vec<Fr>, Vec<[u8; WORD_SIZE]>), PlonkError> {
    if data.len() < 4 {
        return Err(PlonkError::MalformedProof);
    }
    let pi_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if pi_count > MAX_PUBLIC_INPUTS {
        return Err(PlonkError::TooManyPublicInputs);
    }

    let pi_end = 4 + pi_count * WORD_SIZE;
    if data.len() != pi_end + SERIALIZED_PROOF_LENGTH * WORD_SIZE {
        return Err(PlonkError::MalformedProof);
    }

    let public_inputs = data[4..pi_end]
        .chunks_exact(WORD_SIZE)
        .map(|chunk| Fr::from_bytes(chunk).map_err(|_| PlonkError::MalformedProof))
        .collect::<Result<Vec<_>, _>>()?;

    let serialized_proof = data[pi_end..]
        .chunks_exact(WORD_SIZE)
        .map(|chunk| {
            let mut word = [0u8; WORD_SIZE];
            word.copy_from_slice(chunk);
            word
        })
        .collect();

    Ok((public_inputs, serialized_proof))
}

/// Build a VERIFY payload (without the discriminator)
pub fn encode_verify_payload(public_inputs: &[Fr], serialized_proof: &[[u8; WORD_SIZE]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + (public_inputs.len() + serialized_proof.len()) * WORD_SIZE);
    data.extend_from_slice(&(public_inputs.len() as u32).to_le_bytes());
    for input in public_inputs {
        data.extend_from_slice(&input.to_bytes());
    }
    for word in serialized_proof {
        data.extend_from_slice(word);
    }
    data
}

fn run_verification(
    vk: &VerificationKey,
    public_inputs: &[Fr],
    serialized_proof: &[[u8; WORD_SIZE]],
) -> ProgramResult {
    match try_verify_serialized_proof(vk, public_inputs, serialized_proof) {
        Ok(()) => {
            pinocchio::msg!("PLONK proof verified successfully");
            Ok(())
        }
        Err(e) => {
            pinocchio::msg!("PLONK proof verification failed");
            Err(e.into())
        }
    }
}

/// Process VERIFY instruction
fn process_verify(
    _program_id: &Pubkey,
    _accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let (public_inputs, serialized_proof) = parse_verify_payload(data)?;

    // Use Box to avoid stack overflow
    let vk = Box::new(embedded_verification_key());

    run_verification(&vk, &public_inputs, &serialized_proof)
}

/// Process VERIFY_WITH_VK_ACCOUNT instruction
fn process_verify_with_vk(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [vk_account, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !vk_account.is_owned_by(program_id) {
        return Err(ProgramError::InvalidAccountOwner);
    }

    let (public_inputs, serialized_proof) = parse_verify_payload(data)?;

    let vk_data = vk_account.try_borrow_data()?;
    let vk = Box::new(read_vk_account(&vk_data)?);

    run_verification(&vk, &public_inputs, &serialized_proof)
}

/// Process INIT_VK instruction
///
/// An account with an all-zero authority header is unclaimed; the first signer
/// to write a key claims it and only that signer may replace the key later.
fn process_init_vk(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [vk_account, authority, _system_program, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !authority.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }
    if !vk_account.is_writable() {
        return Err(ProgramError::InvalidAccountData);
    }
    if !vk_account.is_owned_by(program_id) {
        return Err(ProgramError::InvalidAccountOwner);
    }

    if data.len() != VerificationKey::SIZE {
        return Err(PlonkError::InvalidVerificationKey.into());
    }
    let vk = VerificationKey::from_bytes(data).map_err(|e| {
        pinocchio::msg!("Rejected invalid verification key");
        e
    })?;

    let mut vk_data = vk_account.try_borrow_mut_data()?;
    write_vk_account(&mut vk_data, authority.key(), &vk)?;

    pinocchio::msg!("Verification key initialized");
    Ok(())
}

/// Load the verification key stored after the authority header
pub fn read_vk_account(account_data: &[u8]) -> Result<VerificationKey, ProgramError> {
    if account_data.len() < VK_ACCOUNT_SIZE {
        pinocchio::msg!("VK account too small");
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(VerificationKey::from_bytes(
        &account_data[VK_ACCOUNT_HEADER_SIZE..VK_ACCOUNT_SIZE],
    )?)
}

/// Store `vk` under `authority`, claiming the account if it is unclaimed
///
/// Fails with `IncorrectAuthority` when another key already owns the account.
pub fn write_vk_account(
    account_data: &mut [u8],
    authority: &Pubkey,
    vk: &VerificationKey,
) -> ProgramResult {
    if account_data.len() < VK_ACCOUNT_SIZE {
        return Err(ProgramError::AccountDataTooSmall);
    }

    let stored_authority = &account_data[..VK_ACCOUNT_HEADER_SIZE];
    let unclaimed = stored_authority.iter().all(|&b| b == 0);
    if !unclaimed && stored_authority != authority.as_slice() {
        pinocchio::msg!("VK account belongs to another authority");
        return Err(ProgramError::IncorrectAuthority);
    }

    account_data[..VK_ACCOUNT_HEADER_SIZE].copy_from_slice(authority);
    account_data[VK_ACCOUNT_HEADER_SIZE..VK_ACCOUNT_SIZE].copy_from_slice(&vk.to_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proof_words() -> Vec<[u8; WORD_SIZE]> {
        (0..SERIALIZED_PROOF_LENGTH as u64)
            .map(|i| Fr::from_u64(i).to_bytes())
            .collect()
    }

    #[test]
    fn test_instruction_discriminators() {
        assert_eq!(instruction::VERIFY, 0);
        assert_eq!(instruction::VERIFY_WITH_VK_ACCOUNT, 1);
        assert_eq!(instruction::INIT_VK, 2);
    }

    #[test]
    fn test_vk_account_size() {
        assert_eq!(VK_ACCOUNT_SIZE, 32 + 972);
    }

    #[test]
    fn test_parse_payload() {
        let inputs = [Fr::from_u64(3), Fr::from_u64(4)];
        let words = proof_words();
        let data = encode_verify_payload(&inputs, &words);
        assert_eq!(data.len(), 4 + 2 * 32 + 33 * 32);

        let (parsed_inputs, parsed_words) = parse_verify_payload(&data).unwrap();
        assert_eq!(parsed_inputs, inputs.to_vec());
        assert_eq!(parsed_words, words);
    }

    #[test]
    fn test_parse_payload_length_errors() {
        assert_eq!(parse_verify_payload(&[]), Err(PlonkError::MalformedProof));
        assert_eq!(parse_verify_payload(&[1, 0, 0]), Err(PlonkError::MalformedProof));

        let mut data = encode_verify_payload(&[Fr::one()], &proof_words());
        data.push(0);
        assert_eq!(parse_verify_payload(&data), Err(PlonkError::MalformedProof));

        data.truncate(data.len() - 2);
        assert_eq!(parse_verify_payload(&data), Err(PlonkError::MalformedProof));
    }

    #[test]
    fn test_parse_payload_too_many_inputs() {
        let inputs = vec![Fr::one(); MAX_PUBLIC_INPUTS + 1];
        let data = encode_verify_payload(&inputs, &proof_words());
        assert_eq!(parse_verify_payload(&data), Err(PlonkError::TooManyPublicInputs));
    }

    #[test]
    fn test_parse_payload_non_canonical_input() {
        let mut data = encode_verify_payload(&[Fr::one()], &proof_words());
        data[4..36].copy_from_slice(&bn254::SCALAR_MODULUS);
        assert_eq!(parse_verify_payload(&data), Err(PlonkError::MalformedProof));
    }

    #[test]
    fn test_parse_payload_largest_input() {
        let largest = Fr::zero().sub(&Fr::one());
        let data = encode_verify_payload(&[largest], &proof_words());
        let (parsed_inputs, _) = parse_verify_payload(&data).unwrap();
        assert_eq!(parsed_inputs, vec![largest]);
    }

    #[test]
    fn test_vk_account_claim_and_update() {
        let owner: Pubkey = [7u8; 32];
        let vk = embedded_verification_key();
        let mut account = vec![0u8; VK_ACCOUNT_SIZE];

        write_vk_account(&mut account, &owner, &vk).unwrap();
        assert_eq!(account[..VK_ACCOUNT_HEADER_SIZE], owner);
        assert_eq!(read_vk_account(&account).unwrap(), vk);

        let mut updated = vk.clone();
        updated.num_inputs = 2;
        write_vk_account(&mut account, &owner, &updated).unwrap();
        assert_eq!(account[..VK_ACCOUNT_HEADER_SIZE], owner);
        assert_eq!(read_vk_account(&account).unwrap(), updated);
    }

    #[test]
    fn test_vk_account_other_authority_refused() {
        let owner: Pubkey = [7u8; 32];
        let intruder: Pubkey = [9u8; 32];
        let vk = embedded_verification_key();
        let mut account = vec![0u8; VK_ACCOUNT_SIZE];
        write_vk_account(&mut account, &owner, &vk).unwrap();
        let before = account.clone();

        let mut replacement = vk.clone();
        replacement.num_inputs = 2;
        assert_eq!(
            write_vk_account(&mut account, &intruder, &replacement),
            Err(ProgramError::IncorrectAuthority)
        );
        assert_eq!(account, before);
    }

    #[test]
    fn test_vk_account_too_small() {
        let owner: Pubkey = [7u8; 32];
        let vk = embedded_verification_key();
        let mut account = vec![0u8; VK_ACCOUNT_SIZE - 1];
        assert_eq!(
            write_vk_account(&mut account, &owner, &vk),
            Err(ProgramError::AccountDataTooSmall)
        );
        assert!(account.iter().all(|&b| b == 0));
        assert_eq!(read_vk_account(&account), Err(ProgramError::InvalidAccountData));
    }

    #[test]
    fn test_vk_account_rejects_invalid_key() {
        let mut account = vec![0u8; VK_ACCOUNT_SIZE];
        account[..VK_ACCOUNT_HEADER_SIZE].copy_from_slice(&[7u8; 32]);
        let err: ProgramError = PlonkError::InvalidVerificationKey.into();
        assert_eq!(read_vk_account(&account), Err(err));
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            process_instruction(&ID, &[], &[]),
            Err(ProgramError::InvalidInstructionData)
        );
        assert_eq!(
            process_instruction(&ID, &[], &[7]),
            Err(ProgramError::InvalidInstructionData)
        );
    }

    #[test]
    fn test_account_instructions_need_accounts() {
        assert_eq!(
            process_instruction(&ID, &[], &[instruction::VERIFY_WITH_VK_ACCOUNT]),
            Err(ProgramError::NotEnoughAccountKeys)
        );
        assert_eq!(
            process_instruction(&ID, &[], &[instruction::INIT_VK]),
            Err(ProgramError::NotEnoughAccountKeys)
        );
    }

    #[test]
    fn test_verify_malformed_payload() {
        let err: ProgramError = PlonkError::MalformedProof.into();
        assert_eq!(
            process_instruction(&ID, &[], &[instruction::VERIFY, 1, 0, 0, 0]),
            Err(err)
        );
    }
}
