//! Vector storage abstraction and implementations.
//!
//! This module defines the interface for persisting chunk embeddings and
//! running similarity search over them. The abstraction keeps the ingestion
//! and query pipelines independent of the concrete vector database.

pub mod qdrant;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ChunkPoint, ScoredChunk};

/// Errors that can occur during vector store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection or client construction error
    #[error("Vector store connection failed: {0}")]
    ConnectionError(String),

    /// Collection creation or lookup error
    #[error("Collection error: {0}")]
    CollectionError(String),

    /// Upsert failure
    #[error("Upsert failed: {0}")]
    UpsertError(String),

    /// Search or scroll failure
    #[error("Search failed: {0}")]
    SearchError(String),

    /// Payload serialization/deserialization error
    #[error("Payload error: {0}")]
    PayloadError(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for vector store backends.
///
/// One collection holds all chunks; each point carries its embedding and a
/// `ChunkPayload`. The `metadata.url` payload field is the source identifier
/// used for the ingestion idempotency check.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Ensure the backing collection exists, creating it if necessary.
    ///
    /// Safe to call repeatedly; an existing collection is left untouched.
    ///
    /// # Errors
    /// Returns `StorageError` if the existence check or creation fails
    async fn ensure_collection(&self) -> StorageResult<()>;

    /// Check whether any chunk from the given source URL is already stored.
    ///
    /// Presence of a single chunk is treated as "source fully indexed".
    ///
    /// # Arguments
    /// * `url` - The source paper URL (`metadata.url` payload field)
    ///
    /// # Errors
    /// Returns `StorageError` if the lookup fails
    async fn source_exists(&self, url: &str) -> StorageResult<bool>;

    /// Upsert a batch of chunk points.
    ///
    /// # Arguments
    /// * `points` - Embedded chunks with ids and payloads
    ///
    /// # Errors
    /// Returns `StorageError` if the upsert fails
    async fn upsert_chunks(&self, points: Vec<ChunkPoint>) -> StorageResult<()>;

    /// Similarity search for the nearest chunks to a query vector.
    ///
    /// # Arguments
    /// * `vector` - The query embedding
    /// * `limit` - Maximum number of hits to return
    ///
    /// # Returns
    /// Hits ordered by descending similarity, with payloads
    ///
    /// # Errors
    /// Returns `StorageError` if the search fails
    async fn search(&self, vector: Vec<f32>, limit: usize) -> StorageResult<Vec<ScoredChunk>>;
}

// The indexing and query pipelines share one store handle.
#[async_trait]
impl<T: VectorStore + ?Sized> VectorStore for std::sync::Arc<T> {
    async fn ensure_collection(&self) -> StorageResult<()> {
        (**self).ensure_collection().await
    }

    async fn source_exists(&self, url: &str) -> StorageResult<bool> {
        (**self).source_exists(url).await
    }

    async fn upsert_chunks(&self, points: Vec<ChunkPoint>) -> StorageResult<()> {
        (**self).upsert_chunks(points).await
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> StorageResult<Vec<ScoredChunk>> {
        (**self).search(vector, limit).await
    }
}
