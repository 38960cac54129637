// Topic model trait: swap-ready abstraction.
//
// Training and inference live outside this crate. Anything that can turn a
// bag of words into a distribution over topics plugs in here, and the
// metrics consume its output as plain data.

use anyhow::Result;

use crate::document::{SparseBagOfWords, SparseDistribution};

/// A trained topic model.
pub trait TopicModel: Send + Sync {
    /// Infer the topic distribution of a single document.
    fn infer(&self, bow: &SparseBagOfWords) -> Result<SparseDistribution>;

    /// Infer the distribution of the document at `position` in the corpus.
    ///
    /// Models that only look at the words can ignore the position.
    fn infer_at(&self, position: usize, bow: &SparseBagOfWords) -> Result<SparseDistribution> {
        let _ = position;
        self.infer(bow)
    }
}

/// The topic a document most likely belongs to, or `None` when the model
/// assigns it no mass at all.
pub fn most_likely_topic(model: &dyn TopicModel, bow: &SparseBagOfWords) -> Result<Option<u32>> {
    Ok(model.infer(bow)?.argmax())
}
