//! PLONK proof verification
//!
//! Width-4 gates with access to `d(z*omega)`, KZG openings at `z` and
//! `z*omega` batched into a single two-pair pairing check.
//!
//! ```text
//! Init ──verify_initial──→ ChallengesDerived ──verify_at_z──→ IdentityChecked
//!                                                                  │
//!                                      verify_commitments (pairing)│
//!                                                                  ↓
//!                                                   Accepted / Rejected
//! ```

use crate::bn254::{pairing_check, Fr, G1Point, G2Point};
use crate::constants::{POWER_FOR_Z_OMEGA_OPENING, STATE_WIDTH, WORD_SIZE};
use crate::error::PlonkError;
use crate::lagrange::{batch_evaluate_lagrange_poly_out_of_domain, evaluate_vanishing};
use crate::transcript::Transcript;
use crate::types::{Proof, VerificationKey};

/// Stage at which a proof was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifierStage {
    /// Input validation and challenge derivation
    Init,
    /// Gate and permutation identity at z
    ChallengesDerived,
    /// Commitment aggregation and pairing
    IdentityChecked,
}

impl VerifierStage {
    fn rejection_message(self) -> &'static str {
        match self {
            VerifierStage::Init => "PLONK proof rejected: invalid inputs",
            VerifierStage::ChallengesDerived => "PLONK proof rejected: identity at z does not hold",
            VerifierStage::IdentityChecked => "PLONK proof rejected: opening check failed",
        }
    }
}

/// Challenges and cached values shared by the verification steps
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialVerifierState {
    pub alpha: Fr,
    pub beta: Fr,
    pub gamma: Fr,
    pub v: Fr,
    pub u: Fr,
    pub z: Fr,
    /// L_i(z) for every public input index
    pub cached_lagrange_evals: Vec<Fr>,
}

impl PartialVerifierState {
    fn l0_at_z(&self) -> Result<Fr, PlonkError> {
        self.cached_lagrange_evals
            .first()
            .copied()
            .ok_or(PlonkError::MalformedProof)
    }
}

#[cold]
fn reject(stage: VerifierStage, err: PlonkError) -> PlonkError {
    pinocchio::msg!(stage.rejection_message());
    #[cfg(feature = "devnet")]
    pinocchio::msg!(&err.to_string());
    err
}

/// Derive all challenges and check the polynomial identity at z
///
/// Transcript order: public inputs, wire commitments → beta, gamma;
/// grand product commitment → alpha; quotient commitments → z;
/// evaluations → v; opening proofs → u.
#[inline(never)]
pub fn verify_initial(
    proof: &Proof,
    vk: &VerificationKey,
) -> Result<PartialVerifierState, PlonkError> {
    if vk.num_inputs == 0 || proof.input_values.len() != vk.num_inputs as usize {
        return Err(reject(VerifierStage::Init, PlonkError::MalformedProof));
    }

    let mut transcript = Transcript::new();
    for input in &proof.input_values {
        transcript.update_with_fr(input);
    }
    for commitment in &proof.wire_commitments {
        transcript.update_with_g1(commitment);
    }
    let beta = transcript.get_challenge();
    let gamma = transcript.get_challenge();

    transcript.update_with_g1(&proof.grand_product_commitment);
    let alpha = transcript.get_challenge();

    for commitment in &proof.quotient_poly_commitments {
        transcript.update_with_g1(commitment);
    }
    let z = transcript.get_challenge();

    let poly_nums: Vec<u64> = (0..proof.input_values.len() as u64).collect();
    let cached_lagrange_evals =
        batch_evaluate_lagrange_poly_out_of_domain(&poly_nums, vk.domain_size, &vk.omega, &z)
            .map_err(|e| reject(VerifierStage::Init, e))?;

    let mut state = PartialVerifierState {
        alpha,
        beta,
        gamma,
        z,
        cached_lagrange_evals,
        ..Default::default()
    };

    verify_at_z(&state, proof, vk).map_err(|e| reject(VerifierStage::ChallengesDerived, e))?;

    for value in &proof.wire_values_at_z {
        transcript.update_with_fr(value);
    }
    for value in &proof.wire_values_at_z_omega {
        transcript.update_with_fr(value);
    }
    for value in &proof.permutation_polynomials_at_z {
        transcript.update_with_fr(value);
    }
    transcript.update_with_fr(&proof.quotient_polynomial_at_z);
    transcript.update_with_fr(&proof.linearization_polynomial_at_z);
    transcript.update_with_fr(&proof.grand_product_at_z_omega);
    state.v = transcript.get_challenge();

    transcript.update_with_g1(&proof.opening_at_z_proof);
    transcript.update_with_g1(&proof.opening_at_z_omega_proof);
    state.u = transcript.get_challenge();

    Ok(state)
}

/// Check `t(z) * Z_H(z) == r(z) + PI(z) - permutation terms - alpha^2 L_0(z)`
pub fn verify_at_z(
    state: &PartialVerifierState,
    proof: &Proof,
    vk: &VerificationKey,
) -> Result<(), PlonkError> {
    let vanishing = evaluate_vanishing(vk.domain_size, &state.z);
    if vanishing.is_zero() {
        return Err(PlonkError::InvalidProof);
    }

    let lhs = vanishing.mul(&proof.quotient_polynomial_at_z);

    let mut rhs = proof.linearization_polynomial_at_z;
    for (lagrange, input) in state.cached_lagrange_evals.iter().zip(&proof.input_values) {
        rhs = rhs.add(&lagrange.mul(input));
    }

    let wires = &proof.wire_values_at_z;
    let mut z_part = proof.grand_product_at_z_omega;
    for (sigma, wire) in proof.permutation_polynomials_at_z.iter().zip(wires) {
        z_part = z_part.mul(&sigma.mul(&state.beta).add(&state.gamma).add(wire));
    }
    z_part = z_part
        .mul(&wires[STATE_WIDTH - 1].add(&state.gamma))
        .mul(&state.alpha);
    rhs = rhs.sub(&z_part);

    let quotient_challenge = state.alpha.square();
    rhs = rhs.sub(&state.l0_at_z()?.mul(&quotient_challenge));

    if lhs != rhs {
        return Err(PlonkError::InvalidProof);
    }
    Ok(())
}

/// Rebuild the linearization commitment `[D]`, already scaled by v
#[inline(never)]
pub fn reconstruct_d(
    state: &PartialVerifierState,
    proof: &Proof,
    vk: &VerificationKey,
) -> Result<G1Point, PlonkError> {
    let wires = &proof.wire_values_at_z;

    // Main gate: q_const + sum(q_i * w_i) + q_m * a * b + q_d_next * d(z*omega)
    let mut res = vk.selector_commitments[STATE_WIDTH + 1];
    for (selector, wire) in vk.selector_commitments[..STATE_WIDTH].iter().zip(wires) {
        res = res.add_scaled(selector, wire)?;
    }
    res = res.add_scaled(&vk.selector_commitments[STATE_WIDTH], &wires[0].mul(&wires[1]))?;
    res = res.add_scaled(
        &vk.next_step_selector_commitments[0],
        &proof.wire_values_at_z_omega[0],
    )?;

    // (a + beta*z + gamma) * prod(w_i + beta*k_i*z + gamma) * alpha + L_0(z) * alpha^2
    let z_beta = state.z.mul(&state.beta);
    let mut grand_product_part_at_z = z_beta.add(&wires[0]).add(&state.gamma);
    for (k, wire) in vk.permutation_non_residues.iter().zip(&wires[1..]) {
        grand_product_part_at_z =
            grand_product_part_at_z.mul(&z_beta.mul(k).add(&state.gamma).add(wire));
    }
    grand_product_part_at_z = grand_product_part_at_z
        .mul(&state.alpha)
        .add(&state.l0_at_z()?.mul(&state.alpha.square()));

    let grand_product_part_at_z_omega = state.v.pow(POWER_FOR_Z_OMEGA_OPENING).mul(&state.u);

    // alpha * beta * z(z*omega) * prod(sigma_i(z) * beta + gamma + w_i), paired with sigma_3
    let mut last_permutation_part_at_z = Fr::one();
    for (sigma, wire) in proof.permutation_polynomials_at_z.iter().zip(wires) {
        last_permutation_part_at_z =
            last_permutation_part_at_z.mul(&state.beta.mul(sigma).add(&state.gamma).add(wire));
    }
    last_permutation_part_at_z = last_permutation_part_at_z
        .mul(&state.beta)
        .mul(&proof.grand_product_at_z_omega)
        .mul(&state.alpha);

    let permutation_part = proof
        .grand_product_commitment
        .mul(&grand_product_part_at_z)?
        .sub(&vk.permutation_commitments[STATE_WIDTH - 1].mul(&last_permutation_part_at_z)?)?;

    res = res.add(&permutation_part)?.mul(&state.v)?;
    res.add_scaled(&proof.grand_product_commitment, &grand_product_part_at_z_omega)
}

/// Aggregate all openings and run the final pairing check
#[inline(never)]
pub fn verify_commitments(
    state: &PartialVerifierState,
    proof: &Proof,
    vk: &VerificationKey,
) -> Result<(), PlonkError> {
    let d = reconstruct_d(state, proof, vk)?;

    // t(X) = t_0 + X^n t_1 + X^2n t_2 + X^3n t_3
    let z_in_domain_size = state.z.pow(vk.domain_size);
    let mut commitment_aggregation = proof.quotient_poly_commitments[0];
    let mut current = Fr::one();
    for commitment in &proof.quotient_poly_commitments[1..] {
        current = current.mul(&z_in_domain_size);
        commitment_aggregation = commitment_aggregation.add_scaled(commitment, &current)?;
    }

    // [D] carries v^1
    commitment_aggregation = commitment_aggregation.add(&d)?;

    let mut aggregation_challenge = state.v;
    for commitment in &proof.wire_commitments {
        aggregation_challenge = aggregation_challenge.mul(&state.v);
        commitment_aggregation = commitment_aggregation.add_scaled(commitment, &aggregation_challenge)?;
    }
    for commitment in &vk.permutation_commitments[..STATE_WIDTH - 1] {
        aggregation_challenge = aggregation_challenge.mul(&state.v);
        commitment_aggregation = commitment_aggregation.add_scaled(commitment, &aggregation_challenge)?;
    }

    // v^9 went into [D] with the grand product; d(z*omega) takes v^10 * u
    aggregation_challenge = aggregation_challenge.mul(&state.v);
    aggregation_challenge = aggregation_challenge.mul(&state.v);
    commitment_aggregation = commitment_aggregation.add_scaled(
        &proof.wire_commitments[STATE_WIDTH - 1],
        &aggregation_challenge.mul(&state.u),
    )?;

    // Matching scalar side
    let mut aggregation_challenge = state.v;
    let mut aggregated_value = proof
        .quotient_polynomial_at_z
        .add(&proof.linearization_polynomial_at_z.mul(&aggregation_challenge));
    for value in proof
        .wire_values_at_z
        .iter()
        .chain(proof.permutation_polynomials_at_z.iter())
    {
        aggregation_challenge = aggregation_challenge.mul(&state.v);
        aggregated_value = aggregated_value.add(&value.mul(&aggregation_challenge));
    }
    aggregation_challenge = aggregation_challenge.mul(&state.v);
    aggregated_value = aggregated_value.add(
        &proof
            .grand_product_at_z_omega
            .mul(&aggregation_challenge)
            .mul(&state.u),
    );
    aggregation_challenge = aggregation_challenge.mul(&state.v);
    aggregated_value = aggregated_value.add(
        &proof.wire_values_at_z_omega[0]
            .mul(&aggregation_challenge)
            .mul(&state.u),
    );

    commitment_aggregation =
        commitment_aggregation.sub(&G1Point::generator().mul(&aggregated_value)?)?;

    let mut pair_with_generator =
        commitment_aggregation.add_scaled(&proof.opening_at_z_proof, &state.z)?;
    let z_omega_u = state.z.mul(&vk.omega).mul(&state.u);
    pair_with_generator =
        pair_with_generator.add_scaled(&proof.opening_at_z_omega_proof, &z_omega_u)?;

    let pair_with_x = proof
        .opening_at_z_omega_proof
        .mul(&state.u)?
        .add(&proof.opening_at_z_proof)?
        .negate();

    let valid = pairing_check(&[
        (pair_with_generator, G2Point::generator()),
        (pair_with_x, vk.g2_x),
    ])?;

    if !valid {
        return Err(PlonkError::InvalidProof);
    }
    Ok(())
}

/// Verify a decoded proof against a verification key
#[inline(never)]
pub fn verify(proof: &Proof, vk: &VerificationKey) -> Result<(), PlonkError> {
    let state = verify_initial(proof, vk)?;
    verify_commitments(&state, proof, vk).map_err(|e| reject(VerifierStage::IdentityChecked, e))
}

/// Decode and verify a serialized proof, returning the rejection reason
pub fn try_verify_serialized_proof(
    vk: &VerificationKey,
    public_inputs: &[Fr],
    serialized_proof: &[[u8; WORD_SIZE]],
) -> Result<(), PlonkError> {
    if public_inputs.len() != vk.num_inputs as usize {
        return Err(reject(VerifierStage::Init, PlonkError::MalformedProof));
    }

    // Box to keep the proof off the BPF stack
    let proof = Box::new(
        Proof::deserialize(public_inputs, serialized_proof)
            .map_err(|e| reject(VerifierStage::Init, e))?,
    );

    verify(&proof, vk)
}

/// Decode and verify a serialized proof
pub fn verify_serialized_proof(
    vk: &VerificationKey,
    public_inputs: &[Fr],
    serialized_proof: &[[u8; WORD_SIZE]],
) -> bool {
    try_verify_serialized_proof(vk, public_inputs, serialized_proof).is_ok()
}
