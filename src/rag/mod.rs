//! RAG (Retrieval-Augmented Generation) module
//!
//! This module provides end-to-end question answering over uploaded PDFs:
//! - Ingestion: text extraction, chunking, embedding and indexing
//! - Retrieval of the chunks most similar to a question
//! - Context assembly and prompt construction
//! - LLM-based answer generation
//!
//! # Examples
//!
//! ```rust,no_run
//! use docrag::rag::RagService;
//! use docrag::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::new(&config)?;
//!
//!     let response = service.query("What does the contract say about renewal?").await?;
//!     println!("Answer: {}", response.answer);
//!     println!("Sources: {} chunks", response.sources.len());
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod prompts;

pub use context::ContextAssembler;
pub use pipeline::IngestReport;
pub use pipeline::RagResponse;
pub use pipeline::RagService;
pub use prompts::build_prompt;
