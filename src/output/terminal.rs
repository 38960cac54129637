// Colored terminal output for distances and similarity graphs.

use anyhow::Result;
use colored::Colorize;

use crate::graph::{GraphRenderer, SimilarityGraph};
use crate::metrics::Metric;

/// Print a single distance with a bar showing where it falls in [0, 1].
pub fn display_distance(metric: Metric, distance: f64) {
    println!("{}: {}", metric.name().bold(), colorize_distance(distance, metric.is_bounded()));

    if metric.is_bounded() {
        let bar_width: usize = 20;
        let filled = (distance.clamp(0.0, 1.0) * bar_width as f64).round() as usize;
        let empty = bar_width.saturating_sub(filled);
        println!("  [{}{}] 0 = identical, 1 = nothing shared", "=".repeat(filled), " ".repeat(empty));
    }

    let mut axioms = vec!["non-negative"];
    if metric.is_symmetric() {
        axioms.push("symmetric");
    }
    if metric.obeys_triangle_inequality() {
        axioms.push("triangle inequality");
    }
    println!("  {}", format!("Properties: {}", axioms.join(", ")).dimmed());
}

/// Renders the edge table and strong components to stdout.
pub struct TerminalRenderer;

impl GraphRenderer for TerminalRenderer {
    fn render(&mut self, graph: &SimilarityGraph) -> Result<()> {
        println!(
            "\n{}",
            format!(
                "=== Similarity graph ({} documents, {} edges, threshold {:.2}) ===",
                graph.nodes.len(),
                graph.edges.len(),
                graph.threshold
            )
            .bold()
        );
        println!();

        println!(
            "  {:>4}  {:<6} {:<45}",
            "Id".dimmed(),
            "Topic".dimmed(),
            "Document".dimmed()
        );
        for node in &graph.nodes {
            let topic = node
                .topic
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            let preview = super::truncate_chars(&node.tokens.join(" "), 45);
            println!("  {:>4}  {:<6} {}", node.id, topic, preview);
        }
        println!();

        let strong: Vec<_> = graph.strong_edges().collect();
        println!("  {} ({})", "Strong edges".bold(), strong.len());
        for edge in &strong {
            println!(
                "    {:>3} -- {:<3} distance {:.3}  weight {}",
                edge.source,
                edge.target,
                edge.distance,
                format_weight(edge.weight).bright_green()
            );
        }
        println!(
            "  {}",
            format!("{} weak edges not shown", graph.weak_edges().count()).dimmed()
        );
        println!();

        println!("  {}", "Components (strong edges only)".bold());
        for (i, component) in graph.strong_components().iter().enumerate() {
            let ids: Vec<String> = component.iter().map(|id| id.to_string()).collect();
            println!("    {:>2}. {}", i + 1, ids.join(", "));
        }
        println!();
        Ok(())
    }
}

fn format_weight(weight: f64) -> String {
    if weight.is_infinite() {
        "inf".to_string()
    } else {
        format!("{weight:.2}")
    }
}

/// Color a distance: close is green, far is blue.
fn colorize_distance(distance: f64, bounded: bool) -> colored::ColoredString {
    let text = format!("{distance:.4}");
    if !bounded && distance > 1.0 {
        return text.normal();
    }
    if distance < 0.25 {
        text.bright_green()
    } else if distance < 0.6 {
        text.bright_yellow()
    } else {
        text.bright_blue()
    }
}
