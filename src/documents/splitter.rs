//! Recursive character text splitter
//!
//! Splits on the coarsest separator present in the text (paragraphs, then
//! lines, then words, then characters), merges the pieces back into chunks of
//! at most `chunk_size` characters and carries up to `chunk_overlap`
//! characters of trailing context into the next chunk. A separator stays
//! attached to the start of the piece that follows it.

use tracing::warn;

/// Default separators, coarsest first. The empty separator splits into chars.
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

#[derive(Debug, Clone)]
pub struct RecursiveTextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveTextSplitter {
    /// Create a splitter with the default separators
    ///
    /// An overlap not smaller than `chunk_size` is clamped to `chunk_size - 1`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self::with_separators(
            chunk_size,
            chunk_overlap,
            DEFAULT_SEPARATORS.iter().map(ToString::to_string).collect(),
        )
    }

    pub fn with_separators(chunk_size: usize, chunk_overlap: usize, separators: Vec<String>) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
            separators,
        }
    }

    pub fn from_config(config: &crate::config::ChunkingConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub const fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split text into trimmed, non-empty chunks
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        let (separator, remaining) = pick_separator(text, separators);
        let splits = split_keeping_separator(text, separator);

        let mut good_splits: Vec<&str> = Vec::new();
        for piece in splits {
            if char_len(piece) < self.chunk_size {
                good_splits.push(piece);
                continue;
            }

            if !good_splits.is_empty() {
                final_chunks.extend(self.merge_splits(&good_splits));
                good_splits.clear();
            }

            if remaining.is_empty() {
                if let Some(chunk) = join_pieces(&[piece]) {
                    final_chunks.push(chunk);
                }
            } else {
                final_chunks.extend(self.split_recursive(piece, remaining));
            }
        }

        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(&good_splits));
        }

        final_chunks
    }

    /// Greedily merge small pieces into chunks, keeping a window of trailing
    /// pieces as overlap for the next chunk
    fn merge_splits(&self, splits: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: std::collections::VecDeque<(&str, usize)> =
            std::collections::VecDeque::new();
        let mut total = 0usize;

        for &piece in splits {
            let len = char_len(piece);

            if total + len > self.chunk_size && !current.is_empty() {
                if total > self.chunk_size {
                    warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total, self.chunk_size
                    );
                }

                let pieces: Vec<&str> = current.iter().map(|(p, _)| *p).collect();
                if let Some(chunk) = join_pieces(&pieces) {
                    chunks.push(chunk);
                }

                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    match current.pop_front() {
                        Some((_, front_len)) => total -= front_len,
                        None => break,
                    }
                }
            }

            current.push_back((piece, len));
            total += len;
        }

        let pieces: Vec<&str> = current.iter().map(|(p, _)| *p).collect();
        if let Some(chunk) = join_pieces(&pieces) {
            chunks.push(chunk);
        }

        chunks
    }
}

impl Default for RecursiveTextSplitter {
    fn default() -> Self {
        let config = crate::config::ChunkingConfig::default();
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}

/// First separator present in `text`, plus the finer ones left to recurse on
fn pick_separator<'s>(text: &str, separators: &'s [String]) -> (&'s str, &'s [String]) {
    let none: &'s [String] = &[];
    for (idx, sep) in separators.iter().enumerate() {
        if sep.is_empty() {
            return (sep.as_str(), none);
        }
        if text.contains(sep.as_str()) {
            return (sep.as_str(), &separators[idx + 1..]);
        }
    }
    (separators.last().map_or("", String::as_str), none)
}

/// Split at every occurrence of `separator`, which stays at the start of the
/// following piece. Empty pieces are dropped.
fn split_keeping_separator<'t>(text: &'t str, separator: &str) -> Vec<&'t str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(idx, c)| &text[idx..idx + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(separator) {
        if idx > start {
            pieces.push(&text[start..idx]);
        }
        start = idx;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

fn join_pieces(pieces: &[&str]) -> Option<String> {
    let joined = pieces.concat();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let splitter = RecursiveTextSplitter::new(100, 10);
        assert_eq!(splitter.split_text("Hello world."), vec!["Hello world."]);
    }

    #[test]
    fn test_empty_and_blank_text() {
        let splitter = RecursiveTextSplitter::new(100, 10);
        assert!(splitter.split_text("").is_empty());
        assert!(splitter.split_text(" \n\n \n ").is_empty());
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let splitter = RecursiveTextSplitter::new(30, 0);
        let text = "First paragraph here.\n\nSecond paragraph here.";
        assert_eq!(
            splitter.split_text(text),
            vec!["First paragraph here.", "Second paragraph here."]
        );
    }

    #[test]
    fn test_word_split_with_overlap() {
        let splitter = RecursiveTextSplitter::new(10, 4);
        let chunks = splitter.split_text("one two three four five");
        assert_eq!(chunks, vec!["one two", "two three", "four five"]);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let splitter = RecursiveTextSplitter::new(50, 10);
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let chunks = splitter.split_text(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50, "chunk too long: {chunk:?}");
            assert_eq!(chunk.trim(), chunk);
        }
    }

    #[test]
    fn test_long_word_falls_back_to_characters() {
        let splitter = RecursiveTextSplitter::new(4, 0);
        let chunks = splitter.split_text("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_lengths_are_counted_in_characters() {
        let splitter = RecursiveTextSplitter::new(3, 0);
        let chunks = splitter.split_text("äöüß");
        assert_eq!(chunks, vec!["äöü", "ß"]);
    }

    #[test]
    fn test_overlap_is_clamped() {
        let splitter = RecursiveTextSplitter::new(10, 50);
        assert_eq!(splitter.chunk_overlap(), 9);
    }

    #[test]
    fn test_split_keeping_separator_attaches_to_next_piece() {
        assert_eq!(
            split_keeping_separator("a\n\nb\n\nc", "\n\n"),
            vec!["a", "\n\nb", "\n\nc"]
        );
        assert_eq!(split_keeping_separator("\n\nlead", "\n\n"), vec!["\n\nlead"]);
    }

    #[test]
    fn test_pick_separator_skips_absent_ones() {
        let separators: Vec<String> = DEFAULT_SEPARATORS.iter().map(ToString::to_string).collect();
        let (sep, rest) = pick_separator("no newlines here", &separators);
        assert_eq!(sep, " ");
        assert_eq!(rest, &separators[3..]);
    }
}
