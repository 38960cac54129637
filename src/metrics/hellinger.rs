// Hellinger distance between discrete probability distributions.
//
//   H(p, q) = sqrt( 0.5 * sum_i (sqrt(p_i) - sqrt(q_i))^2 )
//
// The sum runs over the union of both index sets; an index missing from one
// side contributes its full sqrt-mass from the other. Inputs are validated
// (finite, non-negative) but never renormalized.

use tracing::debug;

use crate::document::SparseDistribution;
use crate::errors::{DistanceError, Result};

/// Hellinger distance between two sparse distributions.
///
/// Returns 0.0 for identical distributions and 1.0 for distributions with
/// disjoint support. Two empty distributions are at distance 0.0.
pub fn hellinger_distance(p: &SparseDistribution, q: &SparseDistribution) -> Result<f64> {
    p.validate()?;
    q.validate()?;

    let indices = p.merged_indices(q);
    debug!(p_len = p.len(), q_len = q.len(), union = indices.len(), "hellinger");

    let sum: f64 = indices
        .into_iter()
        .map(|i| {
            let diff = p.get(i).sqrt() - q.get(i).sqrt();
            diff * diff
        })
        .sum();

    Ok((0.5 * sum).sqrt())
}

/// Hellinger distance over dense vectors of equal length.
pub fn hellinger_dense(p: &[f64], q: &[f64]) -> Result<f64> {
    if p.len() != q.len() {
        return Err(DistanceError::invalid(format!(
            "dense vectors differ in length: {} vs {}",
            p.len(),
            q.len()
        )));
    }
    let p = SparseDistribution::new(p.iter().enumerate().map(|(i, &v)| (i as u32, v)));
    let q = SparseDistribution::new(q.iter().enumerate().map(|(i, &v)| (i as u32, v)));
    hellinger_distance(&p, &q)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(pairs: &[(u32, f64)]) -> SparseDistribution {
        SparseDistribution::new(pairs.iter().copied())
    }

    #[test]
    fn test_identical_is_zero() {
        let p = dist(&[(0, 0.5), (1, 0.5)]);
        assert_eq!(hellinger_distance(&p, &p).unwrap(), 0.0);
    }

    #[test]
    fn test_disjoint_support_is_one() {
        let p = dist(&[(0, 1.0)]);
        let q = dist(&[(1, 1.0)]);
        assert!((hellinger_distance(&p, &q).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_overlap_known_value() {
        // sqrt(0.5 * ((sqrt(.5) - 1)^2 + .5))
        let p = dist(&[(0, 0.5), (1, 0.5)]);
        let q = dist(&[(0, 1.0)]);
        let expected = (0.5 * ((0.5f64.sqrt() - 1.0).powi(2) + 0.5)).sqrt();
        assert!((hellinger_distance(&p, &q).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_both_empty_is_zero() {
        let empty = SparseDistribution::default();
        assert_eq!(hellinger_distance(&empty, &empty).unwrap(), 0.0);
    }

    #[test]
    fn test_one_empty_uses_zero_fill() {
        let empty = SparseDistribution::default();
        let q = dist(&[(0, 0.5), (1, 0.5)]);
        let d = hellinger_distance(&empty, &q).unwrap();
        assert!((d - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_negative_probability_rejected() {
        let p = dist(&[(0, 1.2), (1, -0.2)]);
        let q = dist(&[(0, 1.0)]);
        let err = hellinger_distance(&p, &q).unwrap_err();
        assert!(matches!(err, DistanceError::InvalidInput(_)));
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_dense_length_mismatch() {
        assert!(hellinger_dense(&[0.5, 0.5], &[1.0]).is_err());
        let d = hellinger_dense(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!((d - 1.0).abs() < 1e-12);
    }
}
