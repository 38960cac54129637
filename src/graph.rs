// Document similarity graph.
//
// One node per document, one edge per unordered pair. Edge weight is the
// inverse of the Jaccard distance, so near-identical documents get heavy
// edges. Edges heavier than the threshold are "strong", the rest "weak".
// Laying the graph out is left to whatever GraphRenderer consumes it.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::document::Document;
use crate::metrics::jaccard_distance_with;
use crate::topics::traits::TopicModel;
use crate::vocabulary::Dictionary;

/// Default weight above which an edge counts as strong.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 1.25;

/// An edge between documents `source < target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    /// Jaccard distance between the two documents
    pub distance: f64,
    /// `1 / distance`; infinite for identical documents
    pub weight: f64,
    pub strong: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: usize,
    pub tokens: Vec<String>,
    /// Most likely topic, when a topic model was supplied
    pub topic: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub threshold: f64,
}

/// Anything that can present a similarity graph.
pub trait GraphRenderer {
    fn render(&mut self, graph: &SimilarityGraph) -> Result<()>;
}

impl SimilarityGraph {
    /// Build the complete graph over tokenized documents.
    pub fn from_documents(documents: &[Vec<String>], threshold: f64) -> Result<Self> {
        let dictionary = Dictionary::from_documents(documents);
        let docs: Vec<Document> = documents.iter().cloned().map(Document::Tokens).collect();

        let mut edges = Vec::with_capacity(docs.len() * docs.len().saturating_sub(1) / 2);
        for i in 0..docs.len() {
            for j in (i + 1)..docs.len() {
                let distance = jaccard_distance_with(&dictionary, &docs[i], &docs[j])
                    .with_context(|| format!("Failed to compare documents {i} and {j}"))?;
                let weight = if distance == 0.0 {
                    f64::INFINITY
                } else {
                    1.0 / distance
                };
                edges.push(Edge {
                    source: i,
                    target: j,
                    distance,
                    weight,
                    strong: weight > threshold,
                });
            }
        }

        debug!(nodes = docs.len(), edges = edges.len(), threshold, "Built similarity graph");

        let nodes = documents
            .iter()
            .enumerate()
            .map(|(id, tokens)| Node {
                id,
                tokens: tokens.clone(),
                topic: None,
            })
            .collect();

        Ok(Self {
            nodes,
            edges,
            threshold,
        })
    }

    /// Label every node with its most likely topic under `model`.
    ///
    /// Nodes are passed to the model by corpus position, so documents with
    /// the same bag of words can still carry different topics.
    pub fn assign_topics(&mut self, model: &dyn TopicModel, dictionary: &Dictionary) -> Result<()> {
        for node in &mut self.nodes {
            let bow = dictionary.doc2bow(&node.tokens);
            node.topic = model
                .infer_at(node.id, &bow)
                .with_context(|| format!("Failed to infer topic for document {}", node.id))?
                .argmax();
        }
        Ok(())
    }

    pub fn strong_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.strong)
    }

    pub fn weak_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| !e.strong)
    }

    /// Connected components when only strong edges are kept, each sorted,
    /// ordered by their smallest node.
    pub fn strong_components(&self) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut parent: Vec<usize> = (0..n).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for edge in self.strong_edges() {
            let a = find(&mut parent, edge.source);
            let b = find(&mut parent, edge.target);
            if a != b {
                parent[a.max(b)] = a.min(b);
            }
        }

        let mut components: Vec<Vec<usize>> = Vec::new();
        let mut slot_of_root = vec![usize::MAX; n];
        for node in 0..n {
            let root = find(&mut parent, node);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = components.len();
                components.push(Vec::new());
            }
            components[slot_of_root[root]].push(node);
        }
        components
    }
}
