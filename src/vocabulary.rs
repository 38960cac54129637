// Vocabulary: the token <-> index mapping shared by bags of words and topics.
//
// Tokenization itself happens upstream; a Dictionary only assigns ids to the
// tokens it is handed, in first-seen order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::SparseBagOfWords;

/// Lookup between tokens and vocabulary indices.
pub trait Vocabulary {
    fn token_id(&self, token: &str) -> Option<u32>;
    fn token(&self, id: u32) -> Option<&str>;
}

/// A vocabulary built from tokenized documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Dictionary {
    id2token: Vec<String>,
    token2id: HashMap<String, u32>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from documents, assigning ids in first-seen order.
    pub fn from_documents<D, S>(documents: &[D]) -> Self
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::new();
        for doc in documents {
            dictionary.add_document(doc.as_ref());
        }
        dictionary
    }

    /// Add every unseen token of `tokens` to the vocabulary.
    pub fn add_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            self.insert(token.as_ref());
        }
    }

    fn insert(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.token2id.get(token) {
            return id;
        }
        let id = self.id2token.len() as u32;
        self.id2token.push(token.to_string());
        self.token2id.insert(token.to_string(), id);
        id
    }

    /// Convert a token list into a bag of words. Unknown tokens are ignored.
    pub fn doc2bow<S: AsRef<str>>(&self, tokens: &[S]) -> SparseBagOfWords {
        SparseBagOfWords::new(
            tokens
                .iter()
                .filter_map(|t| self.token2id.get(t.as_ref()).map(|&id| (id, 1))),
        )
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }
}

impl Vocabulary for Dictionary {
    fn token_id(&self, token: &str) -> Option<u32> {
        self.token2id.get(token).copied()
    }

    fn token(&self, id: u32) -> Option<&str> {
        self.id2token.get(id as usize).map(String::as_str)
    }
}

impl From<Vec<String>> for Dictionary {
    fn from(tokens: Vec<String>) -> Self {
        let mut dictionary = Self::new();
        dictionary.add_document(&tokens);
        dictionary
    }
}

impl From<Dictionary> for Vec<String> {
    fn from(dictionary: Dictionary) -> Self {
        dictionary.id2token
    }
}
