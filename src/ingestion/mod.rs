//! Indexing pipeline module.
//!
//! Takes submitted paper metadata and turns it into searchable chunks: for
//! each paper the pipeline checks whether the paper is already indexed,
//! downloads and extracts its PDF, splits the text into overlapping chunks,
//! embeds the chunks in batches, and upserts them into the vector store.
//!
//! Papers are isolated from each other: a failure while processing one paper
//! is recorded in that paper's outcome and the batch continues. The
//! existence check treats a single stored chunk as proof the paper was fully
//! indexed, so a paper that failed mid-upsert stays incomplete until its
//! chunks are removed out of band.

use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chunker::{chunk_text, ChunkerConfig};
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::fetch::{DocumentFetcher, FetchError};
use crate::models::{ChunkPayload, ChunkPoint, Paper, PaperMetadata};
use crate::storage::{StorageError, VectorStore};

/// Default maximum number of papers processed per call.
pub const DEFAULT_PAPER_CAP: usize = 10;

/// Default number of chunks embedded and upserted per batch.
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 20;

/// Errors that can occur during indexing.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector store operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Document fetch or extraction failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Result type for indexing operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// What happened to a single paper during an indexing run.
#[derive(Debug, Clone, PartialEq)]
pub enum PaperStatus {
    /// At least one chunk for this paper was already stored
    AlreadyIndexed,

    /// The paper was fetched, chunked and upserted
    Indexed {
        /// Number of chunks written
        chunks: usize,
    },

    /// Processing failed; siblings were unaffected
    Failed {
        /// Human-readable failure description
        reason: String,
    },
}

/// Per-paper outcome record.
#[derive(Debug, Clone)]
pub struct PaperOutcome {
    /// The paper's source URL
    pub url: String,

    /// What happened
    pub status: PaperStatus,
}

/// Summary of an indexing run.
#[derive(Debug, Default)]
pub struct IngestionReport {
    /// One outcome per paper considered (after the cap)
    pub outcomes: Vec<PaperOutcome>,

    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: f64,
}

impl IngestionReport {
    /// Number of papers newly indexed in this run.
    pub fn processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, PaperStatus::Indexed { .. }))
            .count()
    }

    /// Number of papers skipped: already indexed or failed.
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    /// Number of papers whose processing failed.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, PaperStatus::Failed { .. }))
            .count()
    }

    /// Total chunks written across all papers in this run.
    pub fn indexed_chunks(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                PaperStatus::Indexed { chunks } => chunks,
                _ => 0,
            })
            .sum()
    }
}

/// Configuration for the indexing pipeline.
#[derive(Debug, Clone, Copy)]
pub struct IngestionConfig {
    /// Maximum papers processed per call; the rest are ignored
    pub paper_cap: usize,

    /// Chunks per embedding/upsert batch
    pub embed_batch_size: usize,

    /// Chunker geometry
    pub chunker: ChunkerConfig,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            paper_cap: DEFAULT_PAPER_CAP,
            embed_batch_size: DEFAULT_EMBED_BATCH_SIZE,
            chunker: ChunkerConfig::default(),
        }
    }
}

/// Indexing pipeline coordinator.
///
/// Generic over its collaborators so tests can substitute in-memory mocks
/// and binaries can wire up fastembed, Qdrant and the arXiv fetcher.
pub struct IngestionPipeline<E, S, F>
where
    E: EmbeddingProvider,
    S: VectorStore,
    F: DocumentFetcher,
{
    embedding_provider: E,
    store: S,
    fetcher: F,
    config: IngestionConfig,
}

impl<E, S, F> IngestionPipeline<E, S, F>
where
    E: EmbeddingProvider,
    S: VectorStore,
    F: DocumentFetcher,
{
    /// Create a pipeline from its collaborators.
    pub fn new(embedding_provider: E, store: S, fetcher: F, config: IngestionConfig) -> Self {
        Self {
            embedding_provider,
            store,
            fetcher,
            config,
        }
    }

    /// Index a batch of papers.
    ///
    /// At most `paper_cap` papers are considered; the rest are dropped
    /// silently. Each considered paper yields exactly one outcome. The
    /// collection is created lazily before the first paper.
    ///
    /// # Arguments
    /// * `papers` - Papers to index
    ///
    /// # Errors
    /// Returns `IngestionError::Storage` only if the collection itself
    /// cannot be ensured; per-paper failures are folded into outcomes
    pub async fn ingest(&self, papers: &[Paper]) -> IngestionResult<IngestionReport> {
        let started = Instant::now();
        self.store.ensure_collection().await?;

        let mut outcomes = Vec::new();
        for paper in papers.iter().take(self.config.paper_cap) {
            let status = match self.process_paper(paper).await {
                Ok(status) => status,
                Err(e) => {
                    warn!(url = %paper.id, error = %e, "Paper indexing failed");
                    PaperStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            outcomes.push(PaperOutcome {
                url: paper.id.clone(),
                status,
            });
        }

        let report = IngestionReport {
            outcomes,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            processed = report.processed(),
            skipped = report.skipped(),
            chunks = report.indexed_chunks(),
            "Indexing run complete"
        );
        Ok(report)
    }

    /// Process one paper end to end.
    async fn process_paper(&self, paper: &Paper) -> IngestionResult<PaperStatus> {
        if self.store.source_exists(&paper.id).await? {
            info!(url = %paper.id, "Paper already indexed, skipping");
            return Ok(PaperStatus::AlreadyIndexed);
        }

        let bytes = self.fetcher.fetch(&paper.id).await?;
        let text = self.fetcher.extract(bytes).await?;

        let chunks = chunk_text(&text, &self.config.chunker);
        let total_chunks = chunks.len();
        let metadata = PaperMetadata::from_paper(paper);

        for (batch_no, batch) in chunks.chunks(self.config.embed_batch_size).enumerate() {
            let refs: Vec<&str> = batch.iter().map(|s| s.as_str()).collect();
            let embeddings = self.embedding_provider.embed_batch(&refs).await?;

            let base_index = batch_no * self.config.embed_batch_size;
            let points: Vec<ChunkPoint> = batch
                .iter()
                .zip(embeddings)
                .enumerate()
                .map(|(offset, (chunk, vector))| ChunkPoint {
                    id: Uuid::new_v4().to_string(),
                    vector,
                    payload: ChunkPayload {
                        metadata: metadata.clone(),
                        chunk_index: base_index + offset,
                        total_chunks,
                        document: chunk.clone(),
                    },
                })
                .collect();

            self.store.upsert_chunks(points).await?;
        }

        info!(url = %paper.id, chunks = total_chunks, "Paper indexed");
        Ok(PaperStatus::Indexed {
            chunks: total_chunks,
        })
    }
}
