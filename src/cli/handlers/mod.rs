//! CLI command handlers
//!
//! - serve: API server
//! - rag: ingestion and questions from the command line
//! - info: configuration display

pub mod info;
pub mod rag;
pub mod serve;

pub use info::*;
pub use rag::*;
pub use serve::*;
