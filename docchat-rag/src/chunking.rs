//! Sliding-window word chunking.
//!
//! Splitting is deterministic: the same `(text, chunk_size, chunk_overlap)`
//! always yields the same chunk sequence.

use crate::error::{RagError, Result};

/// Splits text into overlapping windows of whitespace-delimited words.
///
/// Consecutive chunks overlap by `chunk_overlap` words; the window advances
/// by `chunk_size - chunk_overlap` each step. The final chunk covers the
/// tail of the text and may be shorter than `chunk_size`.
///
/// # Example
///
/// ```rust,ignore
/// use docchat_rag::WordChunker;
///
/// let chunker = WordChunker::new(200, 20)?;
/// let chunks = chunker.split(&text);
/// ```
#[derive(Debug, Clone)]
pub struct WordChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl WordChunker {
    /// Create a new `WordChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] when `chunk_overlap >= chunk_size` or
    /// `chunk_size == 0` — the window step would be non-positive and
    /// splitting could never terminate.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(RagError::Config(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// The configured window size in words.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The configured overlap between consecutive windows in words.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `text` into overlapping word chunks.
    ///
    /// Empty (or whitespace-only) input yields an empty `Vec`; callers that
    /// require content treat that as an error.
    pub fn split(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(words.len());
            chunks.push(words[start..end].join(" "));
            // The window that reaches the end of the text is the last one.
            if end == words.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn rejects_overlap_not_less_than_size() {
        assert!(WordChunker::new(10, 10).is_err());
        assert!(WordChunker::new(10, 15).is_err());
        assert!(WordChunker::new(0, 0).is_err());
        assert!(WordChunker::new(10, 9).is_ok());
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = WordChunker::new(200, 20).unwrap();
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n\t ").is_empty());
    }

    #[test]
    fn short_text_yields_single_chunk() {
        let chunker = WordChunker::new(200, 20).unwrap();
        let chunks = chunker.split("Hello world");
        assert_eq!(chunks, vec!["Hello world".to_string()]);
    }

    #[test]
    fn windows_overlap_by_configured_amount() {
        let chunker = WordChunker::new(5, 2).unwrap();
        let chunks = chunker.split(&numbered_words(11));
        // step = 3: windows start at 0, 3, 6, 9
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], "w0 w1 w2 w3 w4");
        assert_eq!(chunks[1], "w3 w4 w5 w6 w7");
        assert_eq!(chunks[2], "w6 w7 w8 w9 w10");
        // Tail chunk is shorter than chunk_size but still emitted.
        assert_eq!(chunks[3], "w9 w10");
    }

    #[test]
    fn exact_multiple_does_not_emit_empty_tail() {
        let chunker = WordChunker::new(4, 1).unwrap();
        // step = 3; windows at 0 and 3 cover words 0..7 exactly.
        let chunks = chunker.split(&numbered_words(7));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "w3 w4 w5 w6");
    }

    #[test]
    fn unique_spans_reconstruct_the_original_word_sequence() {
        let chunker = WordChunker::new(6, 2).unwrap();
        let text = numbered_words(37);
        let chunks = chunker.split(&text);

        // Dropping the overlapping prefix of every chunk after the first
        // must reproduce the original token stream exactly.
        let mut rebuilt: Vec<String> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let words: Vec<&str> = chunk.split_whitespace().collect();
            let skip = if i == 0 { 0 } else { chunker.chunk_overlap() };
            rebuilt.extend(words.into_iter().skip(skip).map(str::to_string));
        }
        let expected: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn splitting_is_deterministic() {
        let chunker = WordChunker::new(8, 3).unwrap();
        let text = numbered_words(50);
        assert_eq!(chunker.split(&text), chunker.split(&text));
    }
}
