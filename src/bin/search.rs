//! Search binary entry point.
//!
//! Runs semantic queries against an indexed paper collection, either as a
//! single shot or as an interactive session.
//!
//! # Examples
//!
//! Single query with a table:
//! ```bash
//! search --query "schwarzschild metric derivation"
//! ```
//!
//! Interactive session:
//! ```bash
//! search --interactive
//! ```

use anyhow::{Context, Result};
use arxiv_paper_search::{
    embedding::{fastembed::FastEmbedProvider, EmbeddingProvider},
    models::FinalResult,
    query::{RerankedSearchEngine, SearchEngine, SearchOutcome, SearchQuery, DEFAULT_LIMIT},
    rerank::fastembed::FastEmbedReranker,
    server::{SearchResponse, SEARCH_CONTEXT},
    storage::qdrant::{QdrantStore, DEFAULT_COLLECTION},
};
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output format for search results
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Human-readable table
    Table,
    /// Full response as pretty-printed JSON
    Json,
}

/// Search CLI for querying indexed papers
#[derive(Parser, Debug)]
#[command(
    name = "search",
    version,
    about = "Semantic search over indexed arXiv papers",
    long_about = "Embeds the query locally, retrieves candidate chunks from Qdrant, merges \
                  adjacent chunks into passages and reranks them with a cross-encoder.

EXAMPLES:
  Single query with a table:
    search --query \"schwarzschild metric derivation\"

  Top 3 results as JSON:
    search --query \"event horizon\" --limit 3 --format json

  Interactive session:
    search --interactive"
)]
struct Args {
    /// Query text (omit for interactive mode)
    #[arg(short, long, value_name = "TEXT", conflicts_with = "interactive")]
    query: Option<String>,

    /// Maximum number of results to return
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Start an interactive search session
    #[arg(short, long)]
    interactive: bool,

    /// Qdrant gRPC endpoint
    #[arg(long, value_name = "URL", default_value = "http://localhost:6334")]
    qdrant_url: String,

    /// Qdrant collection name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// Logging verbosity level
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// FastEmbed model cache directory
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<String>,
}

/// Initialize logging subsystem with the specified level
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

type Engine = RerankedSearchEngine<FastEmbedProvider, Arc<QdrantStore>, FastEmbedReranker>;

/// Run one query through the engine.
async fn execute_search(engine: &Engine, query: &str, limit: usize) -> Result<SearchOutcome> {
    let search_query = SearchQuery::new(query.to_string(), Some(limit));
    engine
        .search(&search_query)
        .await
        .with_context(|| format!("Search failed for query: {}", query))
}

/// Truncate a string to at most `max` characters, appending an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", head)
}

/// Render results as a table.
fn format_results_table(outcome: &SearchOutcome) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Chunk").add_attribute(Attribute::Bold),
            Cell::new("Excerpt").add_attribute(Attribute::Bold),
        ]);

    for (rank, result) in outcome.results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(truncate(&result.metadata.title, 40)),
            confidence_cell(result),
            Cell::new(format!(
                "{}/{}",
                result.metadata.chunk_index, result.metadata.total_chunks
            )),
            Cell::new(truncate(&result.content, 80)),
        ]);
    }

    table
}

fn confidence_cell(result: &FinalResult) -> Cell {
    let cell = Cell::new(format!("{:.4}", result.confidence));
    if result.confidence >= 0.8 {
        cell.fg(Color::Green)
    } else if result.confidence >= 0.5 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Red)
    }
}

/// Render the full response shape as pretty-printed JSON.
fn format_results_json(query: &str, outcome: SearchOutcome) -> Result<String> {
    let response = SearchResponse {
        query: query.to_string(),
        results_count: outcome.results.len(),
        results: outcome.results,
        timing: outcome.timing,
        context: SEARCH_CONTEXT.to_string(),
    };
    serde_json::to_string_pretty(&response).context("Failed to serialize results")
}

/// Print one search outcome in the chosen format.
fn print_outcome(query: &str, outcome: SearchOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if outcome.results.is_empty() {
                println!("No results found for: {}", query);
                return Ok(());
            }
            println!("{}", format_results_table(&outcome));
            println!(
                "Retrieval: {:.2}ms | Reranking: {:.2}ms | Total: {:.2}ms",
                outcome.timing.retrieval_ms, outcome.timing.reranking_ms, outcome.timing.total_ms
            );
        }
        OutputFormat::Json => {
            println!("{}", format_results_json(query, outcome)?);
        }
    }
    Ok(())
}

/// Execute a single query and print the results.
async fn run_single_query(
    engine: &Engine,
    query: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let outcome = execute_search(engine, query, limit).await?;
    print_outcome(query, outcome, format)
}

/// Interactive search loop.
async fn run_interactive(engine: &Engine, mut limit: usize, mut format: OutputFormat) -> Result<()> {
    println!("Interactive paper search. Type a query, or /help for commands.");

    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
    loop {
        match editor.readline("search> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                if let Some(rest) = line.strip_prefix('/') {
                    let mut parts = rest.split_whitespace();
                    match parts.next() {
                        Some("quit") | Some("exit") => break,
                        Some("top") => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
                            Some(n) if n > 0 => {
                                limit = n;
                                println!("Now returning up to {} results", limit);
                            }
                            _ => println!("Usage: /top <n>"),
                        },
                        Some("format") => match parts.next() {
                            Some("table") => {
                                format = OutputFormat::Table;
                                println!("Output format: table");
                            }
                            Some("json") => {
                                format = OutputFormat::Json;
                                println!("Output format: json");
                            }
                            _ => println!("Usage: /format <table|json>"),
                        },
                        Some("help") => {
                            println!("Commands:");
                            println!("  /top <n>             set the result limit");
                            println!("  /format <table|json> set the output format");
                            println!("  /quit                exit");
                            println!("Anything else is treated as a search query.");
                        }
                        _ => println!("Unknown command, try /help"),
                    }
                    continue;
                }

                match execute_search(engine, line, limit).await {
                    Ok(outcome) => print_outcome(line, outcome, format)?,
                    Err(e) => eprintln!("Error: {:#}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Readline failure"),
        }
    }

    println!("Goodbye.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);
    debug!("CLI arguments: {:?}", args);

    if args.query.is_none() && !args.interactive {
        anyhow::bail!("Provide --query <TEXT> or run with --interactive");
    }
    if args.limit == 0 {
        anyhow::bail!("--limit must be at least 1");
    }

    let embedding_provider = FastEmbedProvider::new(None, args.cache_dir.clone())
        .context("Failed to initialize embedding model")?;
    let store = Arc::new(
        QdrantStore::new(
            &args.qdrant_url,
            &args.collection,
            embedding_provider.dimension(),
        )
        .context("Failed to connect to Qdrant")?,
    );
    let reranker = FastEmbedReranker::new(None, args.cache_dir.clone())
        .context("Failed to initialize reranking model")?;
    info!("Models loaded, ready to search");

    let engine = RerankedSearchEngine::new(embedding_provider, store, reranker);

    match args.query {
        Some(query) => run_single_query(&engine, &query, args.limit, args.format).await,
        None => run_interactive(&engine, args.limit, args.format).await,
    }
}
