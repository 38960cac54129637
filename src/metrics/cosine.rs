// Cosine distance between sparse vectors.
//
//   1 - (a · b) / (|a| |b|)
//
// Negative similarities are clamped so the distance stays in [0, 1].

use crate::document::SparseDistribution;

/// Cosine distance between two sparse vectors.
///
/// Two empty vectors are identical (0.0). A zero-magnitude vector compared
/// with anything else has no direction to share, so the distance is 1.0.
pub fn cosine_distance(a: &SparseDistribution, b: &SparseDistribution) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for index in a.merged_indices(b) {
        let x = a.get(index);
        let y = b.get(index);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denominator = mag_a.sqrt() * mag_b.sqrt();
    if denominator < f64::EPSILON {
        return 1.0;
    }

    let similarity = (dot / denominator).clamp(0.0, 1.0);
    1.0 - similarity
}
