//! Lagrange basis evaluation outside the evaluation domain
//!
//! For a multiplicative domain of size `n` generated by `omega`:
//!
//! ```text
//! L_i(x) = omega^i * (x^n - 1) / (n * (x - omega^i))
//! ```

use crate::bn254::Fr;
use crate::error::PlonkError;

/// `Z_H(x) = x^n - 1`
pub fn evaluate_vanishing(domain_size: u64, at: &Fr) -> Fr {
    at.pow(domain_size).sub(&Fr::one())
}

/// Evaluate a single Lagrange basis polynomial at a point outside the domain
pub fn evaluate_lagrange_poly_out_of_domain(
    poly_num: u64,
    domain_size: u64,
    omega: &Fr,
    at: &Fr,
) -> Result<Fr, PlonkError> {
    if poly_num >= domain_size {
        return Err(PlonkError::LagrangeIndexOutOfRange);
    }

    let vanishing = evaluate_vanishing(domain_size, at);
    if vanishing.is_zero() {
        return Err(PlonkError::DomainViolation);
    }

    let omega_power = omega.pow(poly_num);
    let numerator = omega_power.mul(&vanishing);
    let denominator = Fr::from_u64(domain_size).mul(&at.sub(&omega_power));
    let inv = denominator.inverse().ok_or(PlonkError::DomainViolation)?;

    Ok(numerator.mul(&inv))
}

/// Evaluate several Lagrange basis polynomials with a single inversion
///
/// Results are returned in the order of `poly_nums`.
pub fn batch_evaluate_lagrange_poly_out_of_domain(
    poly_nums: &[u64],
    domain_size: u64,
    omega: &Fr,
    at: &Fr,
) -> Result<Vec<Fr>, PlonkError> {
    if poly_nums.is_empty() {
        return Ok(Vec::new());
    }
    if poly_nums.iter().any(|&i| i >= domain_size) {
        return Err(PlonkError::LagrangeIndexOutOfRange);
    }

    let vanishing = evaluate_vanishing(domain_size, at);
    if vanishing.is_zero() {
        return Err(PlonkError::DomainViolation);
    }

    let n = Fr::from_u64(domain_size);
    let mut numerators = Vec::with_capacity(poly_nums.len());
    let mut denominators = Vec::with_capacity(poly_nums.len());
    for &poly_num in poly_nums {
        let omega_power = omega.pow(poly_num);
        numerators.push(omega_power.mul(&vanishing));
        denominators.push(n.mul(&at.sub(&omega_power)));
    }

    // prefix[i] = d_0 * ... * d_{i-1}
    let mut prefix = Vec::with_capacity(denominators.len());
    let mut running = Fr::one();
    for d in &denominators {
        prefix.push(running);
        running = running.mul(d);
    }

    let mut inv = running.inverse().ok_or(PlonkError::DomainViolation)?;

    let mut results = vec![Fr::zero(); poly_nums.len()];
    for i in (0..denominators.len()).rev() {
        // inv currently holds (d_0 * ... * d_i)^-1
        let d_inv = inv.mul(&prefix[i]);
        inv = inv.mul(&denominators[i]);
        results[i] = numerators[i].mul(&d_inv);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Order-4 root of unity in the BN254 scalar field
    fn omega_4() -> Fr {
        // primitive 2^28-th root of unity
        let root_2_28 = Fr::from_bytes(
            &hex::decode("2a3c09f0a58a7e8500e0a7eb8ef62abc402d111e41112ed49bd61b6e725b19f0").unwrap(),
        )
        .unwrap();
        root_2_28.pow(1 << 26)
    }

    #[test]
    fn test_omega_4_has_order_4() {
        let omega = omega_4();
        assert_eq!(omega.pow(4), Fr::one());
        assert_ne!(omega.pow(2), Fr::one());
    }

    #[test]
    fn test_vanishing() {
        assert_eq!(evaluate_vanishing(4, &Fr::from_u64(2)), Fr::from_u64(15));
        assert!(evaluate_vanishing(4, &omega_4()).is_zero());
    }

    #[test]
    fn test_lagrange_basis_sums_to_one() {
        let omega = omega_4();
        let at = Fr::from_u64(12345);
        let mut sum = Fr::zero();
        for i in 0..4 {
            sum = sum.add(&evaluate_lagrange_poly_out_of_domain(i, 4, &omega, &at).unwrap());
        }
        assert_eq!(sum, Fr::one());
    }

    #[test]
    fn test_lagrange_l0_closed_form() {
        // L_0(x) = (x^n - 1) / (n (x - 1))
        let omega = omega_4();
        let at = Fr::from_u64(3);
        let l0 = evaluate_lagrange_poly_out_of_domain(0, 4, &omega, &at).unwrap();
        // (81 - 1) / (4 * 2) = 10
        assert_eq!(l0, Fr::from_u64(10));
    }

    #[test]
    fn test_batch_matches_single() {
        let omega = omega_4();
        let at = Fr::from_u64(987654321);
        let indices = [3u64, 0, 2, 1];
        let batch = batch_evaluate_lagrange_poly_out_of_domain(&indices, 4, &omega, &at).unwrap();
        assert_eq!(batch.len(), indices.len());
        for (value, &i) in batch.iter().zip(indices.iter()) {
            let single = evaluate_lagrange_poly_out_of_domain(i, 4, &omega, &at).unwrap();
            assert_eq!(*value, single);
        }
    }

    #[test]
    fn test_batch_empty() {
        let result = batch_evaluate_lagrange_poly_out_of_domain(&[], 4, &omega_4(), &Fr::from_u64(9));
        assert_eq!(result, Ok(Vec::new()));
    }

    #[test]
    fn test_domain_violation() {
        let omega = omega_4();
        for k in 0..4 {
            let at = omega.pow(k);
            assert_eq!(
                evaluate_lagrange_poly_out_of_domain(0, 4, &omega, &at),
                Err(PlonkError::DomainViolation)
            );
            assert_eq!(
                batch_evaluate_lagrange_poly_out_of_domain(&[0, 1], 4, &omega, &at),
                Err(PlonkError::DomainViolation)
            );
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let omega = omega_4();
        let at = Fr::from_u64(2);
        assert_eq!(
            evaluate_lagrange_poly_out_of_domain(4, 4, &omega, &at),
            Err(PlonkError::LagrangeIndexOutOfRange)
        );
        assert_eq!(
            batch_evaluate_lagrange_poly_out_of_domain(&[0, 4], 4, &omega, &at),
            Err(PlonkError::LagrangeIndexOutOfRange)
        );
    }
}
