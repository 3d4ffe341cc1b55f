//! Document fetching and text extraction.
//!
//! The indexing pipeline needs the full text of each paper. This module
//! defines the interface for downloading a source document and extracting
//! plain text from it, plus the arXiv-specific implementation.

pub mod arxiv;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching or extracting a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or transport failure
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Non-success HTTP status
    #[error("Fetch returned status {status} for {url}")]
    HttpStatus {
        /// The HTTP status code
        status: u16,
        /// The requested URL
        url: String,
    },

    /// Text extraction failure
    #[error("Text extraction failed: {0}")]
    ExtractionError(String),
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Trait for document retrieval and text extraction.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Download the document behind a source URL.
    ///
    /// # Arguments
    /// * `url` - The source URL as submitted (implementations may rewrite it
    ///   to reach the document itself)
    ///
    /// # Errors
    /// Returns `FetchError` on transport failure or non-success status
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>>;

    /// Extract plain text from downloaded document bytes.
    ///
    /// # Errors
    /// Returns `FetchError::ExtractionError` if the document cannot be parsed
    async fn extract(&self, bytes: Vec<u8>) -> FetchResult<String>;
}
