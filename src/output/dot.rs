// Graphviz DOT export of a similarity graph.
//
// Strong edges are solid with their weight as penwidth; weak edges are
// dashed. Positioning is left to Graphviz.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};

use crate::graph::{GraphRenderer, SimilarityGraph};

/// Writes the graph as DOT text to any `Write`r: a file, stdout, a buffer.
pub struct DotRenderer<W: Write> {
    writer: W,
}

impl<W: Write> DotRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> GraphRenderer for DotRenderer<W> {
    fn render(&mut self, graph: &SimilarityGraph) -> Result<()> {
        self.writer
            .write_all(to_dot(graph).as_bytes())
            .context("Failed to write DOT graph")?;
        self.writer.flush().context("Failed to flush DOT graph")
    }
}

/// Render the graph as an undirected DOT document.
pub fn to_dot(graph: &SimilarityGraph) -> String {
    let mut out = String::from("graph documents {\n");

    for node in &graph.nodes {
        let color = match node.topic {
            Some(0) => "skyblue",
            Some(_) => "pink",
            None => "white",
        };
        let label = escape_quoted(&node.tokens.join(" "));
        let _ = writeln!(
            out,
            "  {} [style=filled, fillcolor={color}, tooltip=\"{label}\"];",
            node.id
        );
    }

    for edge in &graph.edges {
        if edge.strong {
            // Identical documents have infinite weight; cap the pen.
            let width = edge.weight.min(8.0);
            let _ = writeln!(
                out,
                "  {} -- {} [penwidth={width:.2}];",
                edge.source, edge.target
            );
        } else {
            let _ = writeln!(
                out,
                "  {} -- {} [style=dashed, color=\"#0000ff33\"];",
                edge.source, edge.target
            );
        }
    }

    out.push_str("}\n");
    out
}

/// Escape text for a double-quoted DOT string.
fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
