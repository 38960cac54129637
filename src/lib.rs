// docdist: distance metrics for topic distributions and bag-of-words documents
//
// This is the library root. The metrics are pure functions over the value
// types in `document`; everything else either feeds them (vocabulary, topics)
// or consumes their results (graph, output).

pub mod config;
pub mod document;
pub mod errors;
pub mod graph;
pub mod metrics;
pub mod output;
pub mod topics;
pub mod vocabulary;
