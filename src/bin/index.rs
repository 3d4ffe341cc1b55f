//! Indexing binary entry point.
//!
//! Reads a papers JSON file (the `{"data": [...]}` request shape), runs the
//! indexing pipeline against a Qdrant instance and prints a summary report.
//!
//! # Examples
//!
//! Index a batch of papers:
//! ```bash
//! index --input papers.json
//! ```
//!
//! Against a remote Qdrant with a larger cap:
//! ```bash
//! index --input papers.json --qdrant-url http://qdrant:6334 --paper-cap 50
//! ```

use anyhow::{Context, Result};
use arxiv_paper_search::{
    chunker::ChunkerConfig,
    embedding::{fastembed::FastEmbedProvider, EmbeddingProvider},
    fetch::arxiv::ArxivPdfFetcher,
    ingestion::{IngestionConfig, IngestionPipeline, PaperStatus},
    server::IndexRequest,
    storage::qdrant::{QdrantStore, DEFAULT_COLLECTION},
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Indexing CLI for loading papers into the vector store
#[derive(Parser, Debug)]
#[command(
    name = "index",
    version,
    about = "Index arXiv papers into the vector store",
    long_about = "Reads paper metadata from a JSON file, downloads and chunks each paper's \
                  PDF, embeds the chunks locally and upserts them into Qdrant.

EXAMPLES:
  Index a batch of papers:
    index --input papers.json

  Against a remote Qdrant with a larger cap:
    index --input papers.json --qdrant-url http://qdrant:6334 --paper-cap 50

  Custom chunk geometry:
    index --input papers.json --chunk-size 800 --overlap 100"
)]
struct Args {
    /// Input JSON file with the `{"data": [...]}` shape
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Qdrant gRPC endpoint
    #[arg(long, value_name = "URL", default_value = "http://localhost:6334")]
    qdrant_url: String,

    /// Qdrant collection name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// Maximum papers to process in this run
    #[arg(long, value_name = "N", default_value = "10")]
    paper_cap: usize,

    /// Chunks per embedding/upsert batch
    #[arg(long, value_name = "N", default_value = "20")]
    batch_size: usize,

    /// Chunk window size in characters
    #[arg(long, value_name = "N", default_value = "1000")]
    chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[arg(long, value_name = "N", default_value = "200")]
    overlap: usize,

    /// Logging verbosity level
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// FastEmbed model cache directory
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<String>,
}

/// Initialize logging subsystem with the specified level
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("Starting paper indexing run");
    debug!("CLI arguments: {:?}", args);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {:?}", args.input);
    }

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {:?}", args.input))?;
    let request: IndexRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {:?} as an index request", args.input))?;

    info!(papers = request.data.len(), "Loaded papers from {:?}", args.input);
    if request.data.is_empty() {
        warn!("No papers found in input file");
        return Ok(());
    }

    let embedding_provider = FastEmbedProvider::new(None, args.cache_dir.clone())
        .context("Failed to initialize embedding model")?;
    info!(
        "Embedding model ready: {} ({} dims)",
        embedding_provider.model_name(),
        embedding_provider.dimension()
    );

    let store = Arc::new(
        QdrantStore::new(
            &args.qdrant_url,
            &args.collection,
            embedding_provider.dimension(),
        )
        .context("Failed to connect to Qdrant")?,
    );

    let fetcher = ArxivPdfFetcher::new().context("Failed to build HTTP client")?;

    let config = IngestionConfig {
        paper_cap: args.paper_cap,
        embed_batch_size: args.batch_size,
        chunker: ChunkerConfig::new(args.chunk_size, args.overlap)
            .context("Invalid chunk geometry")?,
    };

    let pipeline = IngestionPipeline::new(embedding_provider, store, fetcher, config);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .context("Invalid progress template")?,
    );
    spinner.set_message(format!("Indexing {} papers...", request.data.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = pipeline
        .ingest(&request.data)
        .await
        .context("Indexing run failed")?;

    spinner.finish_and_clear();

    for outcome in &report.outcomes {
        match &outcome.status {
            PaperStatus::Indexed { chunks } => {
                println!("  indexed  {} ({} chunks)", outcome.url, chunks)
            }
            PaperStatus::AlreadyIndexed => println!("  skipped  {} (already indexed)", outcome.url),
            PaperStatus::Failed { reason } => println!("  FAILED   {} ({})", outcome.url, reason),
        }
    }

    println!("\n╔════════════════════════════════════════╗");
    println!("║        Indexing Completed              ║");
    println!("╠════════════════════════════════════════╣");
    println!("║ Papers indexed:       {:>16} ║", report.processed());
    println!("║ Papers skipped:       {:>16} ║", report.skipped());
    println!("║ Papers failed:        {:>16} ║", report.failed());
    println!("║ Chunks written:       {:>16} ║", report.indexed_chunks());
    println!("║ Elapsed:              {:>13.0}ms ║", report.elapsed_ms);
    println!("╚════════════════════════════════════════╝");

    if report.failed() > 0 {
        warn!(
            "{} papers failed to index - check logs for details",
            report.failed()
        );
    }

    Ok(())
}
