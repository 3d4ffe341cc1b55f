//! Embedding provider abstraction and implementations.
//!
//! This module defines the interface for text embedding generation used by
//! both the indexing pipeline (chunk batches) and the query pipeline (single
//! query strings). The abstraction allows swapping embedding models without
//! touching pipeline logic, and makes both pipelines testable with mocks.

pub mod fastembed;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Invalid input text (e.g., empty)
    #[error("Invalid input text: {0}")]
    InvalidInput(String),

    /// Model initialization or configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Inference failure
    #[error("Embedding generation failed: {0}")]
    InferenceError(String),
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Trait for text embedding providers.
///
/// Implementors generate dense vector representations of text. The trait is
/// async because local models run blocking inference behind a lock and
/// remote providers make network calls.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text.
    ///
    /// # Arguments
    /// * `text` - The input text to embed
    ///
    /// # Errors
    /// Returns `EmbeddingError` if the text is empty or inference fails
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Generate embeddings for multiple texts in a single batch.
    ///
    /// # Arguments
    /// * `texts` - Slice of text inputs to embed
    ///
    /// # Returns
    /// One embedding per input, in input order
    ///
    /// # Errors
    /// Returns `EmbeddingError` if any input is empty or inference fails
    async fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>>;

    /// Dimension of the vectors produced by this provider.
    fn dimension(&self) -> usize;

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}

// The indexing and query pipelines share one provider handle.
#[async_trait]
impl<T: EmbeddingProvider + ?Sized> EmbeddingProvider for std::sync::Arc<T> {
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        (**self).embed(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>> {
        (**self).embed_batch(texts).await
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
