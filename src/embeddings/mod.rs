//! Embeddings generation module
//!
//! This module provides functionality for generating text embeddings using various providers:
//! - HuggingFace text-embeddings-inference (sentence-transformers models)
//! - OpenAI (text-embedding-3-small, etc.)
//! - Ollama (local models)
//!
//! # Examples
//!
//! ```rust,no_run
//! use docrag::embeddings::EmbeddingService;
//! use docrag::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = EmbeddingService::new(&config)?;
//!
//!     let embedding = service.generate("Hello, world!").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod generator;

pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use generator::EmbeddingService;

use crate::errors::Result;

/// Dimension of sentence-transformers/all-MiniLM-L6-v2
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Ollama embeds one text per request; this caps the requests in flight
pub const OLLAMA_CONCURRENCY: usize = 8;

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub batch_size: usize,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Result<Self> {
        let embeddings = &config.embeddings;
        Ok(Self {
            provider: embeddings.provider.parse()?,
            model: embeddings.model.clone(),
            dimension: embeddings.dimension,
            endpoint: embeddings.endpoint.trim_end_matches('/').to_string(),
            api_key: embeddings.api_key.clone().filter(|k| !k.is_empty()),
            batch_size: embeddings.batch_size.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_from_default_app_config() {
        let config = EmbeddingConfig::from_app_config(&AppConfig::default()).unwrap();
        assert_eq!(config.provider, EmbeddingProvider::HuggingFace);
        assert_eq!(config.dimension, DEFAULT_EMBEDDING_DIM);
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_trailing_slash_and_empty_key_normalized() {
        let mut app = AppConfig::default();
        app.embeddings.provider = "openai".to_string();
        app.embeddings.endpoint = "https://api.openai.com/v1/".to_string();
        app.embeddings.api_key = Some(String::new());

        let config = EmbeddingConfig::from_app_config(&app).unwrap();
        assert_eq!(config.provider, EmbeddingProvider::OpenAI);
        assert_eq!(config.endpoint, "https://api.openai.com/v1");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut app = AppConfig::default();
        app.embeddings.provider = "word2vec".to_string();
        assert!(EmbeddingConfig::from_app_config(&app).is_err());
    }
}
