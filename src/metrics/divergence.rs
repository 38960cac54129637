// Information-theoretic divergences between sparse distributions.

use crate::document::SparseDistribution;
use crate::errors::Result;

/// Kullback-Leibler divergence `KL(p || q) = sum p_i ln(p_i / q_i)`, in nats.
///
/// Indices where `p_i == 0` contribute nothing. If `q_i == 0` where
/// `p_i > 0` the divergence is infinite.
pub fn kullback_leibler(p: &SparseDistribution, q: &SparseDistribution) -> Result<f64> {
    p.validate()?;
    q.validate()?;
    Ok(kl_unchecked(p, q))
}

fn kl_unchecked(p: &SparseDistribution, q: &SparseDistribution) -> f64 {
    let mut sum = 0.0;
    for (index, pi) in p.iter() {
        if pi == 0.0 {
            continue;
        }
        let qi = q.get(index);
        if qi == 0.0 {
            return f64::INFINITY;
        }
        sum += pi * (pi / qi).ln();
    }
    sum
}

/// Jensen-Shannon divergence, `0.5 KL(p || m) + 0.5 KL(q || m)` with
/// `m = (p + q) / 2`.
///
/// Symmetric and always finite, bounded by `ln 2` for normalized inputs.
pub fn jensen_shannon(p: &SparseDistribution, q: &SparseDistribution) -> Result<f64> {
    p.validate()?;
    q.validate()?;

    let m = SparseDistribution::new(
        p.merged_indices(q)
            .into_iter()
            .map(|i| (i, 0.5 * (p.get(i) + q.get(i)))),
    );
    // Rounding can push tiny negatives out of the sum.
    Ok((0.5 * kl_unchecked(p, &m) + 0.5 * kl_unchecked(q, &m)).max(0.0))
}
