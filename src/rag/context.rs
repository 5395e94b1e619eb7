//! Context assembly from retrieved chunks

use crate::vector_store::ScoredChunk;

/// Separator between chunks in the prompt context
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Assembler for creating context from search results
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    /// Create a new context assembler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Join every retrieved chunk's text with a blank line, best match first
    ///
    /// Nothing is dropped: the sources reported for an answer are exactly the
    /// chunks the model was shown.
    #[must_use]
    pub fn assemble(&self, results: &[ScoredChunk]) -> String {
        results
            .iter()
            .map(|result| result.text.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR)
    }
}
