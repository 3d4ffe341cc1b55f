//! Cross-encoder reranking abstraction and implementations.
//!
//! Bi-encoder retrieval scores are fast but coarse. After candidate passages
//! are merged and deduplicated, a cross-encoder scores each (query, passage)
//! pair jointly to produce the final ranking signal.

pub mod fastembed;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during reranking.
#[derive(Debug, Error)]
pub enum RerankError {
    /// Model initialization or configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Inference failure
    #[error("Reranking failed: {0}")]
    InferenceError(String),
}

/// Result type for reranking operations.
pub type RerankResult<T> = Result<T, RerankError>;

/// Trait for cross-encoder rerankers.
///
/// Scores are model-defined and unbounded; callers normalize them before
/// presenting anything to users.
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Score each document's relevance to the query.
    ///
    /// # Arguments
    /// * `query` - The search query
    /// * `documents` - Candidate passages
    ///
    /// # Returns
    /// One raw relevance score per document, aligned with the input order
    ///
    /// # Errors
    /// Returns `RerankError` if inference fails
    async fn rerank(&self, query: &str, documents: &[&str]) -> RerankResult<Vec<f32>>;

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}
