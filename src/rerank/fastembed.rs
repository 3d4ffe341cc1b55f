//! FastEmbed cross-encoder reranker implementation.
//!
//! Runs a Jina reranker model locally via fastembed. fastembed returns its
//! results sorted by score; this implementation restores input order so the
//! trait's order-alignment contract holds.

use super::{RerankError, RerankResult, Reranker};
use async_trait::async_trait;
use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Local cross-encoder reranker backed by fastembed.
#[derive(Clone)]
pub struct FastEmbedReranker {
    /// The model handle; fastembed inference takes `&mut self`
    model: Arc<Mutex<TextRerank>>,

    /// Model identifier
    model_name: String,
}

impl FastEmbedReranker {
    /// Create a new fastembed reranker.
    ///
    /// # Arguments
    /// * `model` - Optional model to use (defaults to JINARerankerV1TurboEn)
    /// * `cache_dir` - Optional cache directory for downloaded model files
    ///
    /// # Errors
    /// Returns `RerankError::ConfigError` if model initialization fails
    pub fn new(model: Option<RerankerModel>, cache_dir: Option<String>) -> RerankResult<Self> {
        let model_type = model.unwrap_or(RerankerModel::JINARerankerV1TurboEn);
        let model_name = format!("{:?}", model_type);

        let mut init_options = RerankInitOptions::new(model_type);
        if let Some(dir) = cache_dir {
            init_options = init_options.with_cache_dir(PathBuf::from(dir));
        }

        let text_rerank = TextRerank::try_new(init_options).map_err(|e| {
            RerankError::ConfigError(format!("Failed to initialize reranker model: {}", e))
        })?;

        Ok(Self {
            model: Arc::new(Mutex::new(text_rerank)),
            model_name,
        })
    }

    /// Create a reranker with the default model and cache directory.
    ///
    /// # Errors
    /// Returns `RerankError::ConfigError` if model initialization fails
    pub fn try_default() -> RerankResult<Self> {
        Self::new(None, None)
    }
}

#[async_trait]
impl Reranker for FastEmbedReranker {
    async fn rerank(&self, query: &str, documents: &[&str]) -> RerankResult<Vec<f32>> {
        if documents.is_empty() {
            return Ok(vec![]);
        }

        let docs: Vec<String> = documents.iter().map(|&d| d.to_string()).collect();

        let mut model = self.model.lock().await;
        let results = model
            .rerank(query.to_string(), docs, false, None)
            .map_err(|e| RerankError::InferenceError(e.to_string()))?;

        // fastembed sorts by score descending; restore input order
        let mut scores = vec![0.0_f32; documents.len()];
        for result in results {
            if result.index >= scores.len() {
                return Err(RerankError::InferenceError(format!(
                    "Reranker returned out-of-range index {}",
                    result.index
                )));
            }
            scores[result.index] = result.score;
        }

        Ok(scores)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl std::fmt::Debug for FastEmbedReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedReranker")
            .field("model_name", &self.model_name)
            .finish()
    }
}
