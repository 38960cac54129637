// Jaccard distance between documents.
//
// Each document is reduced to a set (distinct tokens, or the indices of a bag
// of words with a positive count) and compared as
//
//   1 - |A ∩ B| / |A ∪ B|
//
// Two empty sets are treated as identical (distance 0.0). A token list and a
// bag of words only share items once a vocabulary maps tokens to indices;
// without one, tokens and indices are distinct set members.

use std::collections::HashSet;
use std::hash::Hash;

use tracing::debug;

use crate::document::{Document, SparseBagOfWords};
use crate::errors::Result;
use crate::vocabulary::Vocabulary;

/// Jaccard distance between two documents of either kind.
///
/// A token list compared with a bag of words shares no items, so the result
/// is 1.0 unless both are empty. Use `jaccard_distance_with` to resolve tokens
/// to indices first.
pub fn jaccard_distance(a: &Document, b: &Document) -> Result<f64> {
    if std::mem::discriminant(a) != std::mem::discriminant(b) {
        debug!(a = a.kind(), b = b.kind(), "jaccard over mixed kinds without a vocabulary");
    }
    Ok(jaccard_set_distance(&a.item_set(None), &b.item_set(None)))
}

/// Jaccard distance with tokens resolved through `vocabulary`.
///
/// Accepts any mix of token lists and bags of words.
pub fn jaccard_distance_with(
    vocabulary: &dyn Vocabulary,
    a: &Document,
    b: &Document,
) -> Result<f64> {
    let set_a = a.item_set(Some(vocabulary));
    let set_b = b.item_set(Some(vocabulary));
    Ok(jaccard_set_distance(&set_a, &set_b))
}

/// `1 - |A ∩ B| / |A ∪ B|`, or 0.0 when both sets are empty.
pub fn jaccard_set_distance<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    debug!(intersection, union, "jaccard");

    if union == 0 {
        return 0.0;
    }
    1.0 - intersection as f64 / union as f64
}

/// Weighted Jaccard distance between two bags of words.
///
/// For each index in either bag we take the smaller and the larger count:
///
///   1 - sum(min(a_i, b_i)) / sum(max(a_i, b_i))
///
/// Unlike `jaccard_distance` this lets repeated words count. Two empty (or
/// all-zero) bags are at distance 0.0.
pub fn weighted_jaccard_distance(a: &SparseBagOfWords, b: &SparseBagOfWords) -> f64 {
    let mut min_sum = 0u64;
    let mut max_sum = 0u64;

    for index in a.merged_indices(b) {
        let ca = a.count(index);
        let cb = b.count(index);
        min_sum += u64::from(ca.min(cb));
        max_sum += u64::from(ca.max(cb));
    }

    if max_sum == 0 {
        0.0
    } else {
        1.0 - min_sum as f64 / max_sum as f64
    }
}
