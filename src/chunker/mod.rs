//! Overlapping fixed-window text chunker.
//!
//! Long document text is split into character-based windows so that each
//! piece fits comfortably within embedding-model input limits while adjacent
//! windows share enough text to preserve context across boundaries.

use thiserror::Error;

/// Default window size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive windows in characters.
pub const DEFAULT_OVERLAP: usize = 200;

/// Windows shorter than this are discarded.
pub const DEFAULT_MIN_CHUNK_LENGTH: usize = 200;

/// Errors that can occur during chunker configuration.
#[derive(Debug, Error)]
pub enum ChunkerError {
    /// The overlap leaves no forward progress between windows
    #[error("Overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    InvalidOverlap {
        /// Configured chunk size
        chunk_size: usize,
        /// Configured overlap
        overlap: usize,
    },
}

/// Result type for chunker operations.
pub type ChunkerResult<T> = Result<T, ChunkerError>;

/// Configuration for the text chunker.
///
/// The stride between window start offsets is `chunk_size - overlap`, so the
/// overlap must be strictly smaller than the chunk size.
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    /// Window size in characters
    chunk_size: usize,

    /// Characters shared between consecutive windows
    overlap: usize,

    /// Minimum length for an emitted window
    min_chunk_length: usize,
}

impl ChunkerConfig {
    /// Create a chunker configuration.
    ///
    /// # Arguments
    /// * `chunk_size` - Window size in characters
    /// * `overlap` - Characters shared between consecutive windows
    ///
    /// # Errors
    /// Returns `ChunkerError::InvalidOverlap` if `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> ChunkerResult<Self> {
        if overlap >= chunk_size {
            return Err(ChunkerError::InvalidOverlap {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
            min_chunk_length: DEFAULT_MIN_CHUNK_LENGTH,
        })
    }

    /// Override the minimum emitted window length.
    pub fn with_min_chunk_length(mut self, min_chunk_length: usize) -> Self {
        self.min_chunk_length = min_chunk_length;
        self
    }

    /// The stride between window start offsets.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Configured window size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured overlap.
    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
            min_chunk_length: DEFAULT_MIN_CHUNK_LENGTH,
        }
    }
}

/// Split text into overlapping character windows.
///
/// Windows start at offsets `0, stride, 2*stride, ...` for every offset
/// strictly less than the text length. The final window may be truncated;
/// truncated windows shorter than the configured minimum are discarded.
/// Offsets and lengths are measured in characters, not bytes, so multi-byte
/// input never splits inside a code point.
///
/// # Arguments
/// * `text` - The document text to split
/// * `config` - Window geometry
///
/// # Returns
/// The ordered list of chunk texts. Empty input yields an empty list.
pub fn chunk_text(text: &str, config: &ChunkerConfig) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let stride = config.stride();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + config.chunk_size).min(chars.len());
        if end - start >= config.min_chunk_length {
            chunks.push(chars[start..end].iter().collect());
        }
        start += stride;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(chunk_size: usize, overlap: usize, min: usize) -> ChunkerConfig {
        ChunkerConfig::new(chunk_size, overlap)
            .unwrap()
            .with_min_chunk_length(min)
    }

    #[test]
    fn test_rejects_overlap_equal_to_chunk_size() {
        assert!(matches!(
            ChunkerConfig::new(100, 100),
            Err(ChunkerError::InvalidOverlap { .. })
        ));
    }

    #[test]
    fn test_rejects_overlap_larger_than_chunk_size() {
        assert!(ChunkerConfig::new(100, 150).is_err());
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunks = chunk_text("", &ChunkerConfig::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_input_yields_single_chunk() {
        // 300 chars, one window, above the minimum
        let text = "a".repeat(300);
        let chunks = chunk_text(&text, &ChunkerConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 300);
    }

    #[test]
    fn test_input_below_minimum_is_discarded() {
        let text = "a".repeat(150);
        let chunks = chunk_text(&text, &ChunkerConfig::default());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_window_count_and_lengths() {
        // 2500 chars, size 1000, overlap 200 -> stride 800.
        // Starts: 0, 800, 1600, 2400. Last window is 100 chars, below the
        // minimum, so 3 chunks survive.
        let text = "x".repeat(2500);
        let chunks = chunk_text(&text, &ChunkerConfig::default());
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 900);
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text: String = (0..2000)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let cfg = ChunkerConfig::default();
        let chunks = chunk_text(&text, &cfg);
        assert!(chunks.len() >= 2);

        let tail_of_first: String = chunks[0]
            .chars()
            .skip(cfg.chunk_size() - cfg.overlap())
            .collect();
        let head_of_second: String = chunks[1].chars().take(cfg.overlap()).collect();
        assert_eq!(tail_of_first, head_of_second);
    }

    #[test]
    fn test_exact_multiple_of_stride() {
        // 1600 chars, stride 800: starts at 0 and 800, second window is 800
        // chars. No start offset at 1600 since it is not < len.
        let text = "y".repeat(1600);
        let chunks = chunk_text(&text, &ChunkerConfig::default());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].len(), 800);
    }

    #[test]
    fn test_multibyte_text_is_chunked_by_chars() {
        let text = "é".repeat(1200);
        let chunks = chunk_text(&text, &ChunkerConfig::default());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 1000);
        assert_eq!(chunks[1].chars().count(), 400);
    }

    #[test]
    fn test_custom_minimum_keeps_short_tail() {
        let text = "z".repeat(1100);
        let chunks = chunk_text(&text, &config(1000, 200, 1));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].len(), 300);
    }
}
