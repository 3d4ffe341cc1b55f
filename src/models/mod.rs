//! Core data models for the arXiv paper search system.
//!
//! This module contains the fundamental data structures used across the
//! application: submitted paper metadata, the chunk payloads stored in the
//! vector index, per-query hits, and the response-facing result types.

use serde::{Deserialize, Serialize};

/// Author information as submitted by the upstream metadata feed.
///
/// The feed is inconsistent: a single-author paper arrives as one mapping,
/// while multi-author papers arrive as a sequence of mappings. Both shapes
/// are accepted and carried through to the stored payload unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AuthorField {
    /// A single author mapping (e.g. `{"name": "..."}`)
    Single(serde_json::Map<String, serde_json::Value>),

    /// An ordered sequence of author mappings
    Multiple(Vec<serde_json::Value>),
}

/// Metadata for a paper submitted for indexing.
///
/// The `id` is the paper's arXiv abstract URL and doubles as the stable
/// source identifier stored with every chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// Stable identifier: the arXiv abstract URL
    pub id: String,

    /// Last-updated timestamp (RFC 3339 string, pass-through)
    pub updated: String,

    /// Publication timestamp (RFC 3339 string, pass-through)
    pub published: String,

    /// Paper title
    pub title: String,

    /// Abstract text
    pub summary: String,

    /// Author data in either upstream shape
    pub author: AuthorField,
}

/// Descriptive metadata copied into every chunk payload for a paper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaperMetadata {
    /// Paper title
    pub title: String,

    /// Abstract text
    pub summary: String,

    /// Publication timestamp
    pub published: String,

    /// Last-updated timestamp
    pub updated: String,

    /// Source URL (the paper's `id`)
    pub url: String,

    /// Author data, pass-through
    pub author: AuthorField,
}

impl PaperMetadata {
    /// Build the stored metadata envelope from a submitted paper.
    pub fn from_paper(paper: &Paper) -> Self {
        Self {
            title: paper.title.clone(),
            summary: paper.summary.clone(),
            published: paper.published.clone(),
            updated: paper.updated.clone(),
            url: paper.id.clone(),
            author: paper.author.clone(),
        }
    }
}

/// Payload stored alongside each vector in the index.
///
/// `chunk_index` is the chunk's zero-based position in the full ordered
/// chunk sequence produced for its paper (not a batch-local offset), so
/// positions survive batched upserts. Within a single indexing run the
/// indices for one paper cover `0..total_chunks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Descriptive metadata of the source paper
    pub metadata: PaperMetadata,

    /// Zero-based position in the paper's full chunk sequence
    pub chunk_index: usize,

    /// Number of chunks produced for the paper
    pub total_chunks: usize,

    /// The chunk's text
    pub document: String,
}

/// A chunk record ready for upsert into the vector store.
#[derive(Debug, Clone)]
pub struct ChunkPoint {
    /// Store-level identifier (UUID v4 string)
    pub id: String,

    /// Embedding vector
    pub vector: Vec<f32>,

    /// Stored payload
    pub payload: ChunkPayload,
}

/// A single similarity-search hit.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// Store-assigned point id
    pub id: String,

    /// Similarity score (higher is more similar)
    pub score: f32,

    /// The stored payload
    pub payload: ChunkPayload,
}

/// Metadata envelope attached to a final search result.
///
/// `chunk_index` and `total_chunks` describe the first chunk of the merged
/// passage, which stands in for the passage as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Paper title
    pub title: String,

    /// Abstract text
    pub summary: String,

    /// Publication timestamp
    pub published_date: String,

    /// Last-updated timestamp
    pub updated_date: String,

    /// Source URL of the paper
    pub source_url: String,

    /// Position of the representative chunk
    pub chunk_index: usize,

    /// Total chunks indexed for the paper
    pub total_chunks: usize,
}

/// A ranked, response-facing search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResult {
    /// Merged passage text
    pub content: String,

    /// Normalized rerank score, rounded to 4 decimal places
    pub confidence: f64,

    /// Source metadata envelope
    pub metadata: ResultMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_field_accepts_single_mapping() {
        let raw = r#"{"name": "A. Einstein"}"#;
        let parsed: AuthorField = serde_json::from_str(raw).unwrap();
        assert!(matches!(parsed, AuthorField::Single(_)));
    }

    #[test]
    fn test_author_field_accepts_sequence() {
        let raw = r#"[{"name": "K. Schwarzschild"}, {"name": "D. Hilbert"}]"#;
        let parsed: AuthorField = serde_json::from_str(raw).unwrap();
        match parsed {
            AuthorField::Multiple(authors) => assert_eq!(authors.len(), 2),
            other => panic!("Expected Multiple, got {:?}", other),
        }
    }

    #[test]
    fn test_author_field_round_trips() {
        let raw = r#"[{"name":"K. Schwarzschild"}]"#;
        let parsed: AuthorField = serde_json::from_str(raw).unwrap();
        let emitted = serde_json::to_string(&parsed).unwrap();
        assert_eq!(emitted, raw);
    }

    #[test]
    fn test_metadata_from_paper_copies_id_as_url() {
        let paper = Paper {
            id: "http://arxiv.org/abs/1234.5678".to_string(),
            updated: "2024-01-02T00:00:00Z".to_string(),
            published: "2024-01-01T00:00:00Z".to_string(),
            title: "A Title".to_string(),
            summary: "An abstract.".to_string(),
            author: AuthorField::Multiple(vec![]),
        };
        let metadata = PaperMetadata::from_paper(&paper);
        assert_eq!(metadata.url, paper.id);
        assert_eq!(metadata.title, "A Title");
    }
}
