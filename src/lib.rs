//! arXiv Paper Search - semantic search over academic papers.
//!
//! This library indexes arXiv papers into a vector store and serves semantic
//! search queries over them, returning ranked, merged passages suitable for
//! LLM consumption.
//!
//! # Architecture
//!
//! - **models**: Core data structures (Paper, ChunkPayload, FinalResult, ...)
//! - **chunker**: Overlapping fixed-window text chunker
//! - **embedding**: Embedding provider trait + local fastembed model
//! - **rerank**: Cross-encoder reranker trait + local fastembed model
//! - **storage**: Vector store trait + Qdrant implementation
//! - **fetch**: PDF download and text extraction for arXiv papers
//! - **ingestion**: Indexing pipeline (existence check, fetch, chunk, embed, upsert)
//! - **query**: Retrieval pipeline (oversampled search, merge, dedup, rerank)
//! - **server**: Request/response DTOs and the `Api` facade
//!
//! # Workflow
//!
//! ## Indexing
//!
//! 1. Receive a batch of paper metadata records
//! 2. Skip papers whose chunks are already stored
//! 3. Download each paper's PDF and extract its text
//! 4. Split the text into overlapping chunks
//! 5. Embed chunk batches and upsert them with payloads
//!
//! ## Search
//!
//! 1. Embed the query text
//! 2. Fetch an oversampled set of nearest chunks
//! 3. Merge adjacent chunks of each paper into passages
//! 4. Drop passages with duplicate leading text
//! 5. Rescore survivors with a cross-encoder
//! 6. Normalize scores, sort, truncate and format
//!
//! # Example
//!
//! ```ignore
//! use arxiv_paper_search::{
//!     embedding::fastembed::FastEmbedProvider,
//!     query::{RerankedSearchEngine, SearchEngine, SearchQuery},
//!     rerank::fastembed::FastEmbedReranker,
//!     storage::qdrant::QdrantStore,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let embedding = FastEmbedProvider::try_default()?;
//!     let store = Arc::new(QdrantStore::new(
//!         "http://localhost:6334",
//!         "arxiv_papers",
//!         embedding.dimension(),
//!     )?);
//!     let reranker = FastEmbedReranker::try_default()?;
//!     let engine = RerankedSearchEngine::new(embedding, store, reranker);
//!
//!     let query = SearchQuery::new("schwarzschild metric".to_string(), Some(5));
//!     let outcome = engine.search(&query).await?;
//!     for result in outcome.results {
//!         println!("{:.4}  {}", result.confidence, result.metadata.title);
//!     }
//!     Ok(())
//! }
//! ```

// Public modules
pub mod chunker;
pub mod embedding;
pub mod fetch;
pub mod ingestion;
pub mod models;
pub mod query;
pub mod rerank;
pub mod server;
pub mod storage;

// Re-export commonly used types at the crate root
pub use embedding::EmbeddingProvider;
pub use fetch::DocumentFetcher;
pub use models::{AuthorField, FinalResult, Paper};
pub use query::{SearchEngine, SearchQuery};
pub use rerank::Reranker;
pub use storage::VectorStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dimension of the default embedding model (all-MiniLM-L6-v2)
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;
