//! Request/response surface of the service.
//!
//! This module holds the wire-level DTOs and a thin `Api` facade that wires
//! the indexing and query pipelines to them. HTTP routing and process
//! startup live outside the crate; a web layer only needs to deserialize a
//! request, call the matching `Api` method and serialize the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::embedding::EmbeddingProvider;
use crate::fetch::DocumentFetcher;
use crate::ingestion::{IngestionConfig, IngestionError, IngestionPipeline};
use crate::models::{FinalResult, Paper};
use crate::query::{QueryError, RerankedSearchEngine, SearchEngine, SearchQuery, SearchTiming};
use crate::rerank::Reranker;
use crate::storage::VectorStore;

/// Fixed context string attached to every search response, telling the LLM
/// consumer what corpus the results came from.
pub const SEARCH_CONTEXT: &str = "The following results are from a semantic search about the family of Schwarzschild solutions in physics. Each result contains content from academic papers with normalized confidence scores.";

/// Errors surfaced to the request layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The indexing run itself could not start
    #[error("Indexing failed: {0}")]
    Indexing(#[from] IngestionError),

    /// The search pipeline failed; the request produced no results
    #[error("Search unavailable: {0}")]
    Search(#[from] QueryError),
}

/// Result type for request handling.
pub type ServerResult<T> = Result<T, ServerError>;

/// Request to index a batch of papers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRequest {
    /// Papers to index
    pub data: Vec<Paper>,
}

/// Response to an indexing request.
///
/// `success` reflects that the run completed, not that every paper was
/// indexed; per-paper failures show up in `skipped_papers` and the logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    /// The run completed
    pub success: bool,

    /// Total chunks written across all papers
    pub indexed_chunks: usize,

    /// Papers newly indexed in this run
    pub processed_papers: usize,

    /// Papers skipped: already indexed or failed
    pub skipped_papers: usize,

    /// Wall-clock duration of the run in milliseconds
    pub time_ms: f64,
}

fn default_limit() -> usize {
    crate::query::DEFAULT_LIMIT
}

/// Request to search the indexed corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query text
    pub query: String,

    /// Maximum results to return
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Response to a search request, formatted for LLM consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as submitted
    pub query: String,

    /// Number of results returned
    pub results_count: usize,

    /// Ranked results, best first
    pub results: Vec<FinalResult>,

    /// Per-stage timing
    pub timing: SearchTiming,

    /// Corpus description for the consumer
    pub context: String,
}

/// Facade tying the pipelines to the request DTOs.
///
/// Collaborators are injected once at construction; the embedding provider
/// and store are shared between the two pipelines, so they must be cheap to
/// clone (fastembed handles and `Arc`-wrapped stores are).
pub struct Api<E, S, F, R>
where
    E: EmbeddingProvider,
    S: VectorStore,
    F: DocumentFetcher,
    R: Reranker,
{
    ingestion: IngestionPipeline<E, S, F>,
    engine: RerankedSearchEngine<E, S, R>,
}

impl<E, S, F, R> Api<E, S, F, R>
where
    E: EmbeddingProvider + Clone,
    S: VectorStore + Clone,
    F: DocumentFetcher,
    R: Reranker,
{
    /// Build the facade from shared collaborators.
    pub fn new(
        embedding_provider: E,
        store: S,
        fetcher: F,
        reranker: R,
        config: IngestionConfig,
    ) -> Self {
        Self {
            ingestion: IngestionPipeline::new(
                embedding_provider.clone(),
                store.clone(),
                fetcher,
                config,
            ),
            engine: RerankedSearchEngine::new(embedding_provider, store, reranker),
        }
    }

    /// Handle an indexing request.
    ///
    /// # Errors
    /// Returns `ServerError::Indexing` only when the run cannot start (e.g.
    /// the collection cannot be created); per-paper failures are folded into
    /// the response counts
    pub async fn index_papers(&self, request: IndexRequest) -> ServerResult<IndexResponse> {
        let report = self.ingestion.ingest(&request.data).await?;
        Ok(IndexResponse {
            success: true,
            indexed_chunks: report.indexed_chunks(),
            processed_papers: report.processed(),
            skipped_papers: report.skipped(),
            time_ms: report.elapsed_ms,
        })
    }

    /// Handle a search request.
    ///
    /// # Errors
    /// Returns `ServerError::Search` if any pipeline stage fails
    pub async fn search_papers(&self, request: SearchRequest) -> ServerResult<SearchResponse> {
        let query = SearchQuery::new(request.query.clone(), Some(request.limit));
        let outcome = self.engine.search(&query).await.map_err(|e| {
            error!(error = %e, "Search request failed");
            e
        })?;

        Ok(SearchResponse {
            query: request.query,
            results_count: outcome.results.len(),
            results: outcome.results,
            timing: outcome.timing,
            context: SEARCH_CONTEXT.to_string(),
        })
    }
}
