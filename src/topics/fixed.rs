// A topic model backed by precomputed distributions.
//
// Used when topic inference already ran elsewhere and its output was saved
// alongside the corpus: the distribution at position i belongs to document i.

use anyhow::Result;

use super::traits::TopicModel;
use crate::document::{SparseBagOfWords, SparseDistribution};

/// Precomputed topic distributions, one per corpus document.
#[derive(Debug, Clone, Default)]
pub struct FixedTopicModel {
    entries: Vec<(SparseBagOfWords, SparseDistribution)>,
}

impl FixedTopicModel {
    pub fn new(entries: Vec<(SparseBagOfWords, SparseDistribution)>) -> Self {
        Self { entries }
    }

    /// Pair each document's bag of words with the distribution at the same
    /// position. Fails when the two lists differ in length.
    pub fn from_aligned(
        bows: Vec<SparseBagOfWords>,
        distributions: Vec<SparseDistribution>,
    ) -> Result<Self> {
        if bows.len() != distributions.len() {
            anyhow::bail!(
                "{} documents but {} topic distributions, they must line up one to one",
                bows.len(),
                distributions.len()
            );
        }
        Ok(Self::new(bows.into_iter().zip(distributions).collect()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TopicModel for FixedTopicModel {
    /// Look a document up by its words. Fails when no document has this bag,
    /// or when several do and their distributions disagree.
    fn infer(&self, bow: &SparseBagOfWords) -> Result<SparseDistribution> {
        let mut matches = self
            .entries
            .iter()
            .filter(|(known, _)| known == bow)
            .map(|(_, dist)| dist);

        let first = matches
            .next()
            .ok_or_else(|| anyhow::anyhow!("No precomputed topic distribution for {:?}", bow))?;
        if matches.any(|other| other != first) {
            anyhow::bail!(
                "Several documents share the bag {:?} with different topic distributions, look them up by position",
                bow
            );
        }
        Ok(first.clone())
    }

    fn infer_at(&self, position: usize, _bow: &SparseBagOfWords) -> Result<SparseDistribution> {
        self.entries
            .get(position)
            .map(|(_, dist)| dist.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No precomputed topic distribution for document {position} ({} loaded)",
                    self.entries.len()
                )
            })
    }
}
