//! arXiv PDF fetcher implementation.
//!
//! Papers are submitted with their abstract-page URL; the PDF lives at the
//! same path with the `/abs/` segment replaced by `/pdf/`. Extraction uses
//! pdf-extract on the downloaded bytes.

use super::{DocumentFetcher, FetchError, FetchResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Default timeout for PDF downloads.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Rewrite an arXiv abstract URL to its PDF URL.
///
/// Replaces the `/abs/` path segment with `/pdf/`. URLs without that segment
/// are returned unchanged, on the assumption they already point at the
/// document.
pub fn pdf_url(abs_url: &str) -> String {
    abs_url.replace("/abs/", "/pdf/")
}

/// Fetcher for arXiv papers: reqwest download + pdf-extract text extraction.
#[derive(Debug, Clone)]
pub struct ArxivPdfFetcher {
    client: reqwest::Client,
}

impl ArxivPdfFetcher {
    /// Create a fetcher with its own HTTP client.
    ///
    /// # Errors
    /// Returns `FetchError::RequestError` if client construction fails
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for ArxivPdfFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        let target = pdf_url(url);
        debug!(url = %target, "Fetching PDF");

        let response = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status().as_u16(),
                url: target,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn extract(&self, bytes: Vec<u8>) -> FetchResult<String> {
        // pdf-extract is CPU-bound; keep it off the async workers
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| FetchError::ExtractionError(e.to_string()))?
            .map_err(|e| FetchError::ExtractionError(e.to_string()))?;

        Ok(text)
    }
}
