//! DocRAG: retrieval-augmented question answering over uploaded PDF files.
//!
//! Uploaded PDFs go through text extraction, chunking and embedding into a
//! local vector index; questions retrieve the closest chunks and are answered
//! by an LLM grounded in that context.

pub mod api;
pub mod cli;
pub mod config;
pub mod documents;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod vector_store;

#[cfg(test)]
mod errors_tests;

pub use config::AppConfig;
pub use errors::*;
pub use rag::RagService;
