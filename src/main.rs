use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use docdist::config::Config;
use docdist::document::{Document, SparseDistribution};
use docdist::graph::{GraphRenderer, SimilarityGraph};
use docdist::metrics::{self, Metric};
use docdist::output::dot::DotRenderer;
use docdist::output::terminal::{self, TerminalRenderer};
use docdist::topics::fixed::FixedTopicModel;
use docdist::topics::parse::parse_topic_string;
use docdist::vocabulary::Dictionary;

/// docdist: distances between topic distributions and documents.
///
/// Inputs are JSON, given inline or as a path to a file: distributions are
/// arrays of [index, probability] pairs, documents are arrays of tokens or
/// arrays of [index, count] pairs.
#[derive(Parser)]
#[command(name = "docdist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hellinger distance between two distributions
    Hellinger {
        /// First distribution, e.g. '[[0, 0.5], [1, 0.5]]'
        p: String,
        /// Second distribution
        q: String,
    },

    /// Distance between two distributions with any supported metric
    Distance {
        /// hellinger, jaccard, kullback-leibler, jensen-shannon or cosine
        /// (default: DOCDIST_METRIC or hellinger)
        #[arg(long)]
        metric: Option<String>,
        p: String,
        q: String,
    },

    /// Jaccard distance between two documents
    Jaccard {
        /// First document, e.g. '["bank", "water"]' or '[[0, 1], [3, 2]]'
        a: String,
        /// Second document
        b: String,
        /// JSON array of vocabulary tokens (index = position); lets tokens
        /// match bag-of-words indices when the two kinds are mixed
        #[arg(long)]
        vocabulary: Option<PathBuf>,
    },

    /// Build and print the Jaccard similarity graph of a corpus
    Graph {
        /// JSON file holding an array of token arrays
        #[arg(long)]
        corpus: PathBuf,

        /// Edge weight above which an edge is strong (default: 1.25)
        #[arg(long)]
        threshold: Option<f64>,

        /// JSON file with one topic distribution per document, used to
        /// label nodes with their most likely topic
        #[arg(long)]
        topics: Option<PathBuf>,

        /// Also write the graph as Graphviz DOT to this path
        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Walk through the metrics on a small water/finance corpus
    Demo,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docdist=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Hellinger { p, q } => {
            let p = load_distribution(&p, &config)?;
            let q = load_distribution(&q, &config)?;
            let distance = metrics::hellinger_distance(&p, &q)?;
            terminal::display_distance(Metric::Hellinger, distance);
        }

        Commands::Distance { metric, p, q } => {
            let metric = match metric {
                Some(name) => name.parse::<Metric>()?,
                None => config.default_metric,
            };
            let p = load_distribution(&p, &config)?;
            let q = load_distribution(&q, &config)?;
            let distance = metric.distance(&p, &q)?;
            terminal::display_distance(metric, distance);
        }

        Commands::Jaccard { a, b, vocabulary } => {
            let a = Document::from_json(&read_input(&a)?)?;
            let b = Document::from_json(&read_input(&b)?)?;
            let distance = match vocabulary {
                Some(path) => {
                    let dictionary: Dictionary = read_json(&path)?;
                    info!(tokens = dictionary.len(), "Loaded vocabulary");
                    metrics::jaccard_distance_with(&dictionary, &a, &b)?
                }
                None => metrics::jaccard_distance(&a, &b)?,
            };
            terminal::display_distance(Metric::Jaccard, distance);
        }

        Commands::Graph {
            corpus,
            threshold,
            topics,
            dot,
        } => {
            let texts: Vec<Vec<String>> = read_json(&corpus)?;
            let threshold = threshold.unwrap_or(config.edge_threshold);
            info!(documents = texts.len(), threshold, "Building similarity graph");

            let mut graph = SimilarityGraph::from_documents(&texts, threshold)?;

            if let Some(path) = topics {
                let distributions: Vec<SparseDistribution> = read_json(&path)?;
                let dictionary = Dictionary::from_documents(&texts);
                let bows = texts.iter().map(|t| dictionary.doc2bow(t)).collect();
                let model = FixedTopicModel::from_aligned(bows, distributions)?;
                graph.assign_topics(&model, &dictionary)?;
            }

            TerminalRenderer.render(&graph)?;

            if let Some(path) = dot {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create DOT file {}", path.display()))?;
                DotRenderer::new(BufWriter::new(file)).render(&graph)?;
                println!("DOT graph written to: {}", path.display());
            }
        }

        Commands::Demo => run_demo(&config)?,
    }

    Ok(())
}

/// Treat `arg` as inline JSON when it looks like JSON, otherwise as a path.
fn read_input(arg: &str) -> Result<String> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Ok(arg.to_string());
    }
    std::fs::read_to_string(arg).with_context(|| format!("Failed to read input file {arg}"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_distribution(arg: &str, config: &Config) -> Result<SparseDistribution> {
    let dist = SparseDistribution::from_json(&read_input(arg)?)
        .context("Expected a distribution: an array of [index, probability] pairs")?;
    Ok(dist.truncate_below(config.minimum_probability))
}

/// The toy corpus: five documents about rivers, six about money.
fn demo_corpus() -> Vec<Vec<String>> {
    let raw: [&[&str]; 11] = [
        &["bank", "river", "shore", "water"],
        &["river", "water", "flow", "fast", "tree"],
        &["bank", "water", "fall", "flow"],
        &["bank", "bank", "water", "rain", "river"],
        &["river", "water", "mud", "tree"],
        &["money", "transaction", "bank", "finance"],
        &["bank", "borrow", "money"],
        &["bank", "finance"],
        &["finance", "money", "sell", "bank"],
        &["borrow", "sell"],
        &["bank", "loan", "sell"],
    ];
    raw.iter()
        .map(|doc| doc.iter().map(|t| t.to_string()).collect())
        .collect()
}

fn run_demo(config: &Config) -> Result<()> {
    let texts = demo_corpus();
    let dictionary = Dictionary::from_documents(&texts);
    println!(
        "{}",
        format!(
            "Corpus: {} documents, {} distinct tokens",
            texts.len(),
            dictionary.len()
        )
        .bold()
    );

    let doc_water = Document::tokens(&["river", "water", "shore"]);
    let doc_bank = Document::tokens(&["finance", "bank", "tree", "water"]);
    let bow_water = Document::Bag(dictionary.doc2bow(&["river", "water", "shore"]));
    let bow_bank = Document::Bag(dictionary.doc2bow(&["finance", "bank", "tree", "water"]));

    println!("\n{}", "Jaccard".bold());
    println!(
        "  bags of words:   {:.4}",
        metrics::jaccard_distance(&bow_water, &bow_bank)?
    );
    println!(
        "  token lists:     {:.4}",
        metrics::jaccard_distance(&doc_water, &doc_bank)?
    );
    println!(
        "  mixed:           {:.4}",
        metrics::jaccard_distance_with(&dictionary, &doc_water, &bow_bank)?
    );
    println!(
        "  ['word'] twice:  {:.4}",
        metrics::jaccard_distance(&Document::tokens(&["word"]), &Document::tokens(&["word"]))?
    );

    // Two topics as a topic model would print them.
    let water_topic = parse_topic_string(
        r#"0.30*"water" + 0.25*"river" + 0.15*"bank" + 0.10*"flow" + 0.10*"tree" + 0.10*"mud""#,
        &dictionary,
    )?;
    let finance_topic = parse_topic_string(
        r#"0.35*"bank" + 0.20*"money" + 0.20*"finance" + 0.15*"sell" + 0.10*"borrow""#,
        &dictionary,
    )?;

    println!("\n{}", "Topic word distributions".bold());
    for metric in Metric::ALL {
        let ab = metric.distance(&water_topic, &finance_topic)?;
        let ba = metric.distance(&finance_topic, &water_topic)?;
        println!(
            "  {:<18} {:.4}  (reversed {:.4})",
            metric.name(),
            ab,
            ba
        );
    }
    println!(
        "  {:<18} {:.4}",
        "hellinger (self)",
        metrics::hellinger_distance(&water_topic, &water_topic)?
    );

    let graph = SimilarityGraph::from_documents(&texts, config.edge_threshold)?;
    TerminalRenderer.render(&graph)?;
    Ok(())
}
