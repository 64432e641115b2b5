//! PLONK verification errors

use pinocchio::program_error::ProgramError;
use thiserror::Error;

/// Errors that can occur during PLONK proof verification
/// Starting at 6000 to avoid conflicts with system errors
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PlonkError {
    #[error("Malformed proof or public inputs")]
    MalformedProof = 6000,

    #[error("Invalid verification key")]
    InvalidVerificationKey = 6001,

    #[error("Invalid field element")]
    InvalidFieldElement = 6002,

    #[error("Invalid G1 point")]
    InvalidG1Point = 6003,

    #[error("Invalid G2 point")]
    InvalidG2Point = 6004,

    #[error("Evaluation point lies in the evaluation domain")]
    DomainViolation = 6005,

    #[error("Lagrange polynomial index out of range")]
    LagrangeIndexOutOfRange = 6006,

    #[error("Proof rejected")]
    InvalidProof = 6007,

    #[error("BN254 syscall error")]
    Bn254SyscallError = 6008,

    #[error("Too many public inputs")]
    TooManyPublicInputs = 6009,
}

impl From<PlonkError> for ProgramError {
    fn from(e: PlonkError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
