// Value types the metrics operate on.
//
// Distributions and bags are stored sparsely in a BTreeMap so every metric can
// walk a merged, ordered index set and treat missing indices as zero.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::{DistanceError, Result};
use crate::vocabulary::Vocabulary;

/// A discrete probability distribution stored as `(index, probability)` pairs.
///
/// Indices that are not present have probability 0. Duplicate indices are
/// summed on construction. Summing to 1 is the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(u32, f64)>", into = "Vec<(u32, f64)>")]
pub struct SparseDistribution {
    probs: BTreeMap<u32, f64>,
    /// First input pair that was not a finite non-negative number. Kept
    /// apart so summing duplicates cannot hide it from `validate`.
    rejected: Option<(u32, f64)>,
}

impl SparseDistribution {
    pub fn new(pairs: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let mut probs = BTreeMap::new();
        let mut rejected = None;
        for (index, prob) in pairs {
            if rejected.is_none() && !is_valid_probability(prob) {
                rejected = Some((index, prob));
            }
            *probs.entry(index).or_insert(0.0) += prob;
        }
        Self { probs, rejected }
    }

    /// Parse a JSON array of `[index, probability]` pairs.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Probability mass at `index`, 0 when absent.
    pub fn get(&self, index: u32) -> f64 {
        self.probs.get(&index).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.probs.iter().map(|(&i, &p)| (i, p))
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.probs.values().sum()
    }

    /// Drop every entry whose probability is below `minimum_probability`.
    ///
    /// Mirrors the way topic models omit topics under a floor value.
    /// An invalid input pair survives truncation so `validate` still sees it.
    pub fn truncate_below(&self, minimum_probability: f64) -> Self {
        Self {
            probs: self
                .probs
                .iter()
                .filter(|(_, &p)| p >= minimum_probability)
                .map(|(&i, &p)| (i, p))
                .collect(),
            rejected: self.rejected,
        }
    }

    /// Index holding the most mass. Ties go to the lowest index.
    pub fn argmax(&self) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;
        for (index, prob) in self.iter() {
            match best {
                Some((_, p)) if prob <= p => {}
                _ => best = Some((index, prob)),
            }
        }
        best.map(|(index, _)| index)
    }

    /// Reject negative, NaN and infinite probabilities, checking every input
    /// pair as given and every summed entry.
    pub fn validate(&self) -> Result<()> {
        let bad = self
            .rejected
            .into_iter()
            .chain(self.iter().filter(|&(_, p)| !is_valid_probability(p)))
            .next();
        match bad {
            Some((index, prob)) => Err(DistanceError::invalid(format!(
                "probability at index {index} must be a finite non-negative number, got {prob}"
            ))),
            None => Ok(()),
        }
    }

    /// Sorted union of the indices of `self` and `other`.
    pub fn merged_indices(&self, other: &Self) -> BTreeSet<u32> {
        self.probs.keys().chain(other.probs.keys()).copied().collect()
    }
}

fn is_valid_probability(prob: f64) -> bool {
    prob.is_finite() && prob >= 0.0
}

impl From<Vec<(u32, f64)>> for SparseDistribution {
    fn from(pairs: Vec<(u32, f64)>) -> Self {
        Self::new(pairs)
    }
}

impl From<SparseDistribution> for Vec<(u32, f64)> {
    fn from(dist: SparseDistribution) -> Self {
        dist.probs.into_iter().collect()
    }
}

/// Term frequencies of a document over a fixed vocabulary, as `(index, count)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(u32, u32)>", into = "Vec<(u32, u32)>")]
pub struct SparseBagOfWords {
    counts: BTreeMap<u32, u32>,
}

impl SparseBagOfWords {
    pub fn new(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut counts = BTreeMap::new();
        for (index, count) in pairs {
            let slot = counts.entry(index).or_insert(0u32);
            *slot = slot.saturating_add(count);
        }
        Self { counts }
    }

    pub fn count(&self, index: u32) -> u32 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.counts.iter().map(|(&i, &c)| (i, c))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Indices with a positive count. Magnitude is ignored.
    pub fn present(&self) -> impl Iterator<Item = u32> + '_ {
        self.counts.iter().filter(|(_, &c)| c > 0).map(|(&i, _)| i)
    }

    pub fn merged_indices(&self, other: &Self) -> BTreeSet<u32> {
        self.counts.keys().chain(other.counts.keys()).copied().collect()
    }
}

impl From<Vec<(u32, u32)>> for SparseBagOfWords {
    fn from(pairs: Vec<(u32, u32)>) -> Self {
        Self::new(pairs)
    }
}

impl From<SparseBagOfWords> for Vec<(u32, u32)> {
    fn from(bow: SparseBagOfWords) -> Self {
        bow.counts.into_iter().collect()
    }
}

/// A document in either of the two shapes the Jaccard distance accepts.
///
/// From JSON, an array of strings is a token list and an array of
/// `[index, count]` pairs is a bag of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Tokens(Vec<String>),
    Bag(SparseBagOfWords),
}

/// One member of a document's normalized set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item<'a> {
    Token(&'a str),
    Index(u32),
}

impl Document {
    pub fn tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Document::Tokens(tokens.iter().map(|t| t.as_ref().to_string()).collect())
    }

    /// Parse a JSON document, rejecting anything that is neither a list of
    /// tokens nor a list of `[index, count]` pairs.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            DistanceError::invalid(format!(
                "expected a list of tokens or a list of [index, count] pairs: {e}"
            ))
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Document::Tokens(_) => "token list",
            Document::Bag(_) => "bag of words",
        }
    }

    /// Reduce the document to its set of distinct items.
    ///
    /// With a vocabulary, known tokens become indices so a token list and a
    /// bag of words over the same vocabulary compare item for item. Unknown
    /// tokens stay tokens.
    pub fn item_set(&self, vocabulary: Option<&dyn Vocabulary>) -> HashSet<Item<'_>> {
        match self {
            Document::Tokens(tokens) => tokens
                .iter()
                .map(|t| match vocabulary.and_then(|v| v.token_id(t)) {
                    Some(id) => Item::Index(id),
                    None => Item::Token(t.as_str()),
                })
                .collect(),
            Document::Bag(bow) => bow.present().map(Item::Index).collect(),
        }
    }
}

impl From<Vec<String>> for Document {
    fn from(tokens: Vec<String>) -> Self {
        Document::Tokens(tokens)
    }
}

impl From<SparseBagOfWords> for Document {
    fn from(bow: SparseBagOfWords) -> Self {
        Document::Bag(bow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_indices_are_summed() {
        let dist = SparseDistribution::new([(0, 0.25), (1, 0.5), (0, 0.25)]);
        assert_eq!(dist.len(), 2);
        assert!((dist.get(0) - 0.5).abs() < 1e-12);
        assert_eq!(dist.get(7), 0.0);
    }

    #[test]
    fn test_argmax_prefers_lowest_index_on_tie() {
        let dist = SparseDistribution::new([(3, 0.4), (1, 0.4), (2, 0.2)]);
        assert_eq!(dist.argmax(), Some(1));
        assert_eq!(SparseDistribution::default().argmax(), None);
    }

    #[test]
    fn test_truncate_below() {
        let dist = SparseDistribution::new([(0, 0.9), (1, 1e-9), (2, 0.1)]);
        let kept = dist.truncate_below(1e-8);
        assert_eq!(kept.iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(SparseDistribution::new([(0, -0.1)]).validate().is_err());
        assert!(SparseDistribution::new([(0, f64::NAN)]).validate().is_err());
        assert!(SparseDistribution::new([(0, 1.0)]).validate().is_ok());
    }

    #[test]
    fn test_validate_sees_negative_hidden_by_duplicate() {
        let dist = SparseDistribution::new([(0, 1.5), (0, -0.5)]);
        assert!((dist.get(0) - 1.0).abs() < 1e-12);
        let err = dist.validate().unwrap_err();
        assert!(err.to_string().contains("index 0"), "Unexpected error: {err}");

        let truncated = dist.truncate_below(1e-8);
        assert!(truncated.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_sum() {
        let dist = SparseDistribution::new([(2, f64::MAX), (2, f64::MAX)]);
        assert!(dist.validate().is_err());
    }

    #[test]
    fn test_bag_present_skips_zero_counts() {
        let bow = SparseBagOfWords::new([(0, 2), (1, 0), (4, 1)]);
        assert_eq!(bow.present().collect::<Vec<_>>(), vec![0, 4]);
    }

    #[test]
    fn test_document_json_shapes() {
        let tokens = Document::from_json(r#"["bank", "river"]"#).unwrap();
        assert_eq!(tokens.kind(), "token list");

        let bag = Document::from_json("[[0, 1], [3, 2]]").unwrap();
        assert_eq!(bag, Document::Bag(SparseBagOfWords::new([(0, 1), (3, 2)])));

        let err = Document::from_json(r#"{"bank": 1}"#).unwrap_err();
        assert!(matches!(err, DistanceError::InvalidInput(_)));
    }

    #[test]
    fn test_distribution_json_round_trip_shape() {
        let dist: SparseDistribution = serde_json::from_str("[[1, 0.5], [0, 0.5]]").unwrap();
        assert_eq!(serde_json::to_string(&dist).unwrap(), "[[0,0.5],[1,0.5]]");
    }

    #[test]
    fn test_distribution_from_bad_json() {
        let err = SparseDistribution::from_json(r#"["bank"]"#).unwrap_err();
        assert!(matches!(err, DistanceError::Json(_)));
    }
}
