//! Query processing and ranking module.
//!
//! This module implements the retrieval pipeline: embed the query, pull an
//! oversampled set of nearest chunks from the vector store, merge adjacent
//! chunks from the same paper into longer passages, drop near-duplicate
//! passages, rescore the survivors with a cross-encoder, and return the
//! top results with normalized confidences and per-stage timing.
//!
//! The merge/dedup/normalize stages are plain functions so their behavior
//! is testable without any model or store in the loop.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::models::{FinalResult, PaperMetadata, ResultMetadata, ScoredChunk};
use crate::rerank::{RerankError, Reranker};
use crate::storage::{StorageError, VectorStore};

/// Candidate multiplier for the initial vector search.
///
/// Merging and deduplication shrink the candidate set, so the store is asked
/// for more hits than the caller wants back.
pub const OVERSAMPLE_FACTOR: usize = 3;

/// Number of leading characters used as a passage fingerprint for dedup.
pub const FINGERPRINT_LEN: usize = 100;

/// Default number of results returned.
pub const DEFAULT_LIMIT: usize = 10;

/// Errors that can occur during query processing.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Query embedding failed
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector store access failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cross-encoder scoring failed
    #[error("Rerank error: {0}")]
    Rerank(#[from] RerankError),
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Search query parameters.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// The search query text
    pub query: String,

    /// Maximum number of results to return
    pub limit: usize,
}

impl SearchQuery {
    /// Create a new search query.
    ///
    /// # Arguments
    /// * `query` - The search query text
    /// * `limit` - Maximum results to return (default: 10)
    pub fn new(query: String, limit: Option<usize>) -> Self {
        Self {
            query,
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}

/// Per-stage wall-clock timing for one search, in milliseconds.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct SearchTiming {
    /// Embed + vector search + merge + dedup
    pub retrieval_ms: f64,

    /// Rerank + normalize + sort + format
    pub reranking_ms: f64,

    /// Sum of the stages
    pub total_ms: f64,
}

/// The outcome of one search: ranked results plus timing.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Ranked results, best first
    pub results: Vec<FinalResult>,

    /// Stage timing
    pub timing: SearchTiming,
}

/// Trait for search engines.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Execute a search query and return ranked, merged passages.
    ///
    /// # Arguments
    /// * `query` - The search query parameters
    ///
    /// # Errors
    /// Returns `QueryError` if any pipeline stage fails; no partial results
    /// are produced
    async fn search(&self, query: &SearchQuery) -> QueryResult<SearchOutcome>;
}

/// A contiguous run of chunks from one paper, merged into a single passage.
#[derive(Debug, Clone)]
pub struct MergedResult {
    /// Concatenated passage text
    pub content: String,

    /// Best similarity score among the merged chunks
    pub score: f32,

    /// Metadata of the source paper
    pub metadata: PaperMetadata,

    /// Chunk index of the first merged chunk
    pub chunk_index: usize,

    /// Total chunks of the source paper
    pub total_chunks: usize,

    /// Chunk index of the last merged chunk, for adjacency tracking
    last_index: usize,
}

impl MergedResult {
    fn from_hit(hit: ScoredChunk) -> Self {
        let index = hit.payload.chunk_index;
        Self {
            content: hit.payload.document,
            score: hit.score,
            metadata: hit.payload.metadata,
            chunk_index: index,
            total_chunks: hit.payload.total_chunks,
            last_index: index,
        }
    }
}

/// Group hits by source paper, preserving the order in which papers first
/// appear in the hit list.
fn group_by_paper(hits: Vec<ScoredChunk>) -> Vec<Vec<ScoredChunk>> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ScoredChunk>> = HashMap::new();

    for hit in hits {
        let url = hit.payload.metadata.url.clone();
        if !groups.contains_key(&url) {
            order.push(url.clone());
        }
        groups.entry(url).or_default().push(hit);
    }

    order.into_iter().filter_map(|url| groups.remove(&url)).collect()
}

/// Merge adjacent chunks of each paper into longer passages.
///
/// Within a paper, hits are sorted by chunk index; runs of consecutive
/// indices are concatenated with a blank line and carry the maximum score of
/// their members. A hit with the same index as the previous one only bumps
/// the score; its text is not appended again.
pub fn merge_adjacent_chunks(hits: Vec<ScoredChunk>) -> Vec<MergedResult> {
    let mut merged = Vec::new();

    for mut group in group_by_paper(hits) {
        group.sort_by_key(|hit| hit.payload.chunk_index);

        let mut current: Option<MergedResult> = None;
        for hit in group {
            let index = hit.payload.chunk_index;
            match current.as_mut() {
                Some(run) if index == run.last_index => {
                    run.score = run.score.max(hit.score);
                }
                Some(run) if index == run.last_index + 1 => {
                    run.content.push_str("\n\n");
                    run.content.push_str(&hit.payload.document);
                    run.score = run.score.max(hit.score);
                    run.last_index = index;
                }
                _ => {
                    if let Some(run) = current.take() {
                        merged.push(run);
                    }
                    current = Some(MergedResult::from_hit(hit));
                }
            }
        }
        if let Some(run) = current.take() {
            merged.push(run);
        }
    }

    merged
}

/// Drop passages whose first `FINGERPRINT_LEN` characters (trimmed) have
/// been seen before. The first occurrence in encounter order wins.
pub fn dedup_by_fingerprint(results: Vec<MergedResult>) -> Vec<MergedResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|result| {
            let prefix: String = result.content.chars().take(FINGERPRINT_LEN).collect();
            seen.insert(prefix.trim().to_string())
        })
        .collect()
}

/// Min-max normalize raw rerank scores into `[0, 1]`.
///
/// When all scores are equal (including a single candidate) every score maps
/// to 1.0 rather than dividing by zero.
pub fn normalize_scores(scores: &[f32]) -> Vec<f64> {
    let Some(first) = scores.first() else {
        return Vec::new();
    };

    let (min, max) = scores.iter().fold((*first, *first), |(min, max), &s| {
        (min.min(s), max.max(s))
    });

    if max == min {
        return vec![1.0; scores.len()];
    }

    let range = (max - min) as f64;
    scores
        .iter()
        .map(|&s| (s - min) as f64 / range)
        .collect()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Reranked search engine.
///
/// Coordinates the embedding provider, vector store and cross-encoder to
/// run the full retrieval pipeline.
pub struct RerankedSearchEngine<E, S, R>
where
    E: EmbeddingProvider,
    S: VectorStore,
    R: Reranker,
{
    embedding_provider: E,
    store: S,
    reranker: R,
}

impl<E, S, R> RerankedSearchEngine<E, S, R>
where
    E: EmbeddingProvider,
    S: VectorStore,
    R: Reranker,
{
    /// Create a search engine from its collaborators.
    pub fn new(embedding_provider: E, store: S, reranker: R) -> Self {
        Self {
            embedding_provider,
            store,
            reranker,
        }
    }
}

#[async_trait]
impl<E, S, R> SearchEngine for RerankedSearchEngine<E, S, R>
where
    E: EmbeddingProvider,
    S: VectorStore,
    R: Reranker,
{
    async fn search(&self, query: &SearchQuery) -> QueryResult<SearchOutcome> {
        let retrieval_started = Instant::now();

        let vector = self.embedding_provider.embed(&query.query).await?;
        let hits = self
            .store
            .search(vector, OVERSAMPLE_FACTOR * query.limit)
            .await?;
        debug!(hits = hits.len(), "Vector search complete");

        let merged = merge_adjacent_chunks(hits);
        let candidates = dedup_by_fingerprint(merged);
        let retrieval_ms = retrieval_started.elapsed().as_secs_f64() * 1000.0;

        let reranking_started = Instant::now();

        if candidates.is_empty() {
            let reranking_ms = reranking_started.elapsed().as_secs_f64() * 1000.0;
            return Ok(SearchOutcome {
                results: Vec::new(),
                timing: SearchTiming {
                    retrieval_ms: round_to(retrieval_ms, 2),
                    reranking_ms: round_to(reranking_ms, 2),
                    total_ms: round_to(retrieval_ms + reranking_ms, 2),
                },
            });
        }

        let documents: Vec<&str> = candidates.iter().map(|c| c.content.as_str()).collect();
        let raw_scores = self.reranker.rerank(&query.query, &documents).await?;
        let confidences = normalize_scores(&raw_scores);

        let mut ranked: Vec<(MergedResult, f64)> =
            candidates.into_iter().zip(confidences).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(query.limit);

        let results = ranked
            .into_iter()
            .map(|(candidate, confidence)| FinalResult {
                content: candidate.content,
                confidence: round_to(confidence, 4),
                metadata: ResultMetadata {
                    title: candidate.metadata.title,
                    summary: candidate.metadata.summary,
                    published_date: candidate.metadata.published,
                    updated_date: candidate.metadata.updated,
                    source_url: candidate.metadata.url,
                    chunk_index: candidate.chunk_index,
                    total_chunks: candidate.total_chunks,
                },
            })
            .collect();

        let reranking_ms = reranking_started.elapsed().as_secs_f64() * 1000.0;
        Ok(SearchOutcome {
            results,
            timing: SearchTiming {
                retrieval_ms: round_to(retrieval_ms, 2),
                reranking_ms: round_to(reranking_ms, 2),
                total_ms: round_to(retrieval_ms + reranking_ms, 2),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorField, ChunkPayload};
    use std::sync::{Arc, Mutex};

    // ===== Mock Implementations =====

    #[derive(Clone)]
    struct MockEmbeddingProvider {
        should_fail: bool,
    }

    impl MockEmbeddingProvider {
        fn new() -> Self {
            Self { should_fail: false }
        }

        fn with_failure() -> Self {
            Self { should_fail: true }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            if self.should_fail {
                return Err(EmbeddingError::InferenceError(
                    "Mock embedding failure".to_string(),
                ));
            }
            Ok(vec![text.len() as f32, 1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            let mut out = Vec::new();
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimension(&self) -> usize {
            3
        }

        fn model_name(&self) -> &str {
            "mock-embedding"
        }
    }

    #[derive(Clone)]
    struct MockStore {
        hits: Vec<ScoredChunk>,
        requested_limits: Arc<Mutex<Vec<usize>>>,
        should_fail: bool,
    }

    impl MockStore {
        fn new(hits: Vec<ScoredChunk>) -> Self {
            Self {
                hits,
                requested_limits: Arc::new(Mutex::new(Vec::new())),
                should_fail: false,
            }
        }

        fn with_failure() -> Self {
            Self {
                hits: Vec::new(),
                requested_limits: Arc::new(Mutex::new(Vec::new())),
                should_fail: true,
            }
        }

        fn requested_limits(&self) -> Vec<usize> {
            self.requested_limits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorStore for MockStore {
        async fn ensure_collection(&self) -> Result<(), StorageError> {
            Ok(())
        }

        async fn source_exists(&self, _url: &str) -> Result<bool, StorageError> {
            Ok(false)
        }

        async fn upsert_chunks(
            &self,
            _points: Vec<crate::models::ChunkPoint>,
        ) -> Result<(), StorageError> {
            Ok(())
        }

        async fn search(
            &self,
            _vector: Vec<f32>,
            limit: usize,
        ) -> Result<Vec<ScoredChunk>, StorageError> {
            self.requested_limits.lock().unwrap().push(limit);
            if self.should_fail {
                return Err(StorageError::SearchError("Mock search failure".to_string()));
            }
            Ok(self.hits.iter().take(limit).cloned().collect())
        }
    }

    #[derive(Clone)]
    struct MockReranker {
        scores: Vec<f32>,
        calls: Arc<Mutex<usize>>,
        should_fail: bool,
    }

    impl MockReranker {
        fn new(scores: Vec<f32>) -> Self {
            Self {
                scores,
                calls: Arc::new(Mutex::new(0)),
                should_fail: false,
            }
        }

        fn with_failure() -> Self {
            Self {
                scores: Vec::new(),
                calls: Arc::new(Mutex::new(0)),
                should_fail: true,
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Reranker for MockReranker {
        async fn rerank(&self, _query: &str, documents: &[&str]) -> Result<Vec<f32>, RerankError> {
            *self.calls.lock().unwrap() += 1;
            if self.should_fail {
                return Err(RerankError::InferenceError(
                    "Mock rerank failure".to_string(),
                ));
            }
            Ok(self.scores.iter().take(documents.len()).copied().collect())
        }

        fn model_name(&self) -> &str {
            "mock-reranker"
        }
    }

    // ===== Test Helpers =====

    fn metadata_for(url: &str) -> PaperMetadata {
        PaperMetadata {
            title: format!("Paper {}", url),
            summary: "Abstract.".to_string(),
            published: "2024-01-01T00:00:00Z".to_string(),
            updated: "2024-01-02T00:00:00Z".to_string(),
            url: url.to_string(),
            author: AuthorField::Multiple(vec![]),
        }
    }

    fn hit(url: &str, chunk_index: usize, score: f32, document: &str) -> ScoredChunk {
        ScoredChunk {
            id: format!("{}-{}", url, chunk_index),
            score,
            payload: ChunkPayload {
                metadata: metadata_for(url),
                chunk_index,
                total_chunks: 10,
                document: document.to_string(),
            },
        }
    }

    fn engine_with(
        store: MockStore,
        reranker: MockReranker,
    ) -> RerankedSearchEngine<MockEmbeddingProvider, MockStore, MockReranker> {
        RerankedSearchEngine::new(MockEmbeddingProvider::new(), store, reranker)
    }

    // ===== Merge Tests =====

    #[test]
    fn test_merge_adjacent_runs() {
        // Indices 2,3 and 5,6 form runs; the duplicate 6 only bumps score
        let hits = vec![
            hit("u", 5, 0.5, "five"),
            hit("u", 2, 0.9, "two"),
            hit("u", 6, 0.4, "six"),
            hit("u", 3, 0.7, "three"),
            hit("u", 6, 0.8, "six again"),
        ];

        let merged = merge_adjacent_chunks(hits);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].content, "two\n\nthree");
        assert_eq!(merged[0].chunk_index, 2);
        assert!((merged[0].score - 0.9).abs() < 1e-6);
        assert_eq!(merged[1].content, "five\n\nsix");
        assert_eq!(merged[1].chunk_index, 5);
        assert!((merged[1].score - 0.8).abs() < 1e-6, "Duplicate bumps score");
    }

    #[test]
    fn test_merge_keeps_papers_separate() {
        // Chunk 2 of paper A and chunk 3 of paper B are not adjacent
        let hits = vec![hit("a", 2, 0.9, "a2"), hit("b", 3, 0.8, "b3")];
        let merged = merge_adjacent_chunks(hits);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_single_chunks_pass_through() {
        let hits = vec![hit("a", 0, 0.9, "alpha"), hit("a", 4, 0.3, "beta")];
        let merged = merge_adjacent_chunks(hits);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].content, "alpha");
        assert_eq!(merged[1].content, "beta");
    }

    #[test]
    fn test_merge_empty_input() {
        assert!(merge_adjacent_chunks(vec![]).is_empty());
    }

    // ===== Dedup Tests =====

    #[test]
    fn test_dedup_collapses_identical_prefixes() {
        let hits = vec![
            hit("a", 0, 0.9, "same text"),
            hit("b", 0, 0.8, "same text"),
        ];
        let deduped = dedup_by_fingerprint(merge_adjacent_chunks(hits));
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].metadata.url, "a", "First occurrence wins");
    }

    #[test]
    fn test_dedup_collapses_texts_differing_after_prefix() {
        let prefix = "p".repeat(FINGERPRINT_LEN);
        let hits = vec![
            hit("a", 0, 0.9, &format!("{}first tail", prefix)),
            hit("b", 0, 0.8, &format!("{}second tail", prefix)),
        ];
        let deduped = dedup_by_fingerprint(merge_adjacent_chunks(hits));
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn test_dedup_keeps_distinct_texts() {
        let hits = vec![
            hit("a", 0, 0.9, "one passage"),
            hit("b", 0, 0.8, "another passage"),
        ];
        let deduped = dedup_by_fingerprint(merge_adjacent_chunks(hits));
        assert_eq!(deduped.len(), 2);
    }

    // ===== Normalization Tests =====

    #[test]
    fn test_normalize_spreads_scores() {
        let normalized = normalize_scores(&[1.0, 3.0, 5.0]);
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_all_equal_maps_to_one() {
        let normalized = normalize_scores(&[0.2, 0.2, 0.2]);
        assert_eq!(normalized, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_normalize_singleton_maps_to_one() {
        assert_eq!(normalize_scores(&[7.5]), vec![1.0]);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize_scores(&[]).is_empty());
    }

    // ===== Engine Tests =====

    fn five_candidate_hits() -> Vec<ScoredChunk> {
        // Five distinct papers, one chunk each: no merging, no dedup
        (0..5)
            .map(|i| {
                hit(
                    &format!("http://x/abs/{}", i),
                    0,
                    0.9 - (i as f32) * 0.1,
                    &format!("passage number {}", i),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_search_end_to_end_ranking_and_confidence() {
        let store = MockStore::new(five_candidate_hits());
        let reranker = MockReranker::new(vec![4.0, 1.0, 3.0, 2.0, 0.5]);
        let engine = engine_with(store, reranker);

        let outcome = engine
            .search(&SearchQuery::new("query".to_string(), Some(2)))
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 2);
        // Raw 4.0 -> 1.0, raw 3.0 -> (3-0.5)/3.5 = 0.7143
        assert_eq!(outcome.results[0].confidence, 1.0);
        assert_eq!(outcome.results[0].content, "passage number 0");
        assert_eq!(outcome.results[1].confidence, 0.7143);
        assert_eq!(outcome.results[1].content, "passage number 2");
    }

    #[tokio::test]
    async fn test_search_oversamples_store() {
        let store = MockStore::new(five_candidate_hits());
        let engine = engine_with(store.clone(), MockReranker::new(vec![1.0; 5]));

        engine
            .search(&SearchQuery::new("query".to_string(), Some(4)))
            .await
            .unwrap();

        assert_eq!(store.requested_limits(), vec![12], "Store asked for 3x limit");
    }

    #[tokio::test]
    async fn test_search_empty_candidates_skips_reranker() {
        let store = MockStore::new(vec![]);
        let reranker = MockReranker::new(vec![]);
        let engine = engine_with(store, reranker.clone());

        let outcome = engine
            .search(&SearchQuery::new("query".to_string(), None))
            .await
            .unwrap();

        assert!(outcome.results.is_empty());
        assert_eq!(reranker.call_count(), 0);
        assert!(outcome.timing.total_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_search_equal_scores_all_confidence_one() {
        let store = MockStore::new(five_candidate_hits());
        let engine = engine_with(store, MockReranker::new(vec![0.2; 5]));

        let outcome = engine
            .search(&SearchQuery::new("query".to_string(), Some(3)))
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 3);
        assert!(outcome.results.iter().all(|r| r.confidence == 1.0));
        // Ties keep encounter order
        assert_eq!(outcome.results[0].content, "passage number 0");
        assert_eq!(outcome.results[1].content, "passage number 1");
    }

    #[tokio::test]
    async fn test_search_merges_before_reranking() {
        // Chunks 1 and 2 of one paper merge into a single candidate
        let store = MockStore::new(vec![
            hit("http://x/abs/a", 1, 0.9, "part one"),
            hit("http://x/abs/a", 2, 0.8, "part two"),
            hit("http://x/abs/b", 0, 0.7, "other paper"),
        ]);
        let engine = engine_with(store, MockReranker::new(vec![2.0, 1.0]));

        let outcome = engine
            .search(&SearchQuery::new("query".to_string(), Some(5)))
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].content, "part one\n\npart two");
        assert_eq!(outcome.results[0].metadata.chunk_index, 1);
    }

    #[tokio::test]
    async fn test_search_result_metadata_fields() {
        let store = MockStore::new(vec![hit("http://x/abs/a", 3, 0.9, "text")]);
        let engine = engine_with(store, MockReranker::new(vec![1.5]));

        let outcome = engine
            .search(&SearchQuery::new("query".to_string(), None))
            .await
            .unwrap();

        let metadata = &outcome.results[0].metadata;
        assert_eq!(metadata.source_url, "http://x/abs/a");
        assert_eq!(metadata.chunk_index, 3);
        assert_eq!(metadata.total_chunks, 10);
        assert_eq!(metadata.published_date, "2024-01-01T00:00:00Z");
        assert_eq!(metadata.updated_date, "2024-01-02T00:00:00Z");
    }

    #[tokio::test]
    async fn test_embedding_error_propagates() {
        let engine = RerankedSearchEngine::new(
            MockEmbeddingProvider::with_failure(),
            MockStore::new(vec![]),
            MockReranker::new(vec![]),
        );

        let result = engine
            .search(&SearchQuery::new("query".to_string(), None))
            .await;
        assert!(matches!(result, Err(QueryError::Embedding(_))));
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let engine = engine_with(MockStore::with_failure(), MockReranker::new(vec![]));
        let result = engine
            .search(&SearchQuery::new("query".to_string(), None))
            .await;
        assert!(matches!(result, Err(QueryError::Storage(_))));
    }

    #[tokio::test]
    async fn test_rerank_error_propagates() {
        let engine = engine_with(
            MockStore::new(five_candidate_hits()),
            MockReranker::with_failure(),
        );
        let result = engine
            .search(&SearchQuery::new("query".to_string(), None))
            .await;
        assert!(matches!(result, Err(QueryError::Rerank(_))));
    }

    #[test]
    fn test_search_query_default_limit() {
        let query = SearchQuery::new("q".to_string(), None);
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.71428, 4), 0.7143);
        assert_eq!(round_to(12.3456, 2), 12.35);
    }
}
