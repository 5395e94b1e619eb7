//! Document ingestion: PDF text extraction and chunking
//!
//! Uploaded files go through two steps before they reach the embedding
//! service:
//! - text extraction with `pdf-extract`
//! - recursive character splitting into overlapping chunks

pub mod pdf;
pub mod splitter;

pub use pdf::extract_pdf_text;
pub use pdf::extract_pdf_texts;
pub use splitter::RecursiveTextSplitter;

use serde::Deserialize;
use serde::Serialize;

/// A file received from a client
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Extracted text of one uploaded file
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    /// Hex SHA-256 of the original file bytes
    pub content_hash: String,
    pub text: String,
}

/// A piece of a document small enough to embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub source: String,
    pub index: usize,
    pub text: String,
}

/// Split every document, keeping each chunk's source and ordinal
pub fn split_documents(splitter: &RecursiveTextSplitter, documents: &[Document]) -> Vec<Chunk> {
    documents
        .iter()
        .flat_map(|doc| {
            splitter
                .split_text(&doc.text)
                .into_iter()
                .enumerate()
                .map(|(index, text)| Chunk {
                    source: doc.source.clone(),
                    index,
                    text,
                })
        })
        .collect()
}
