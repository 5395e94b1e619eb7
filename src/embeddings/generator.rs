//! Embedding generation service with batching and dimension checks

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use super::client::EmbeddingClient;
use super::client::EmbeddingProvider;
use super::EmbeddingConfig;
use crate::errors::DocRagError;
use crate::errors::Result;

/// Service for generating embeddings from configuration
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config)?)
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
        )?;

        info!(
            "Embedding service ready: {:?} model {} ({} dims)",
            config.provider, config.model, config.dimension
        );

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Generate embedding for a single text
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(DocRagError::EmbeddingError(
                "Empty text provided".to_string(),
            ));
        }

        let embedding = self.client.generate(text).await?;
        self.check_dimension(&embedding)?;
        Ok(embedding)
    }

    /// Generate embeddings for many texts, `batch_size` per request
    ///
    /// Output order matches input order.
    pub async fn generate_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut embeddings = Vec::with_capacity(texts.len());
        for (batch_idx, batch) in texts.chunks(self.config.batch_size).enumerate() {
            debug!(
                "Embedding batch {} ({} texts)",
                batch_idx + 1,
                batch.len()
            );
            let batch_embeddings = self
                .client
                .generate_batch(batch.iter().map(String::as_str).collect())
                .await?;

            for embedding in &batch_embeddings {
                self.check_dimension(embedding)?;
            }
            embeddings.extend(batch_embeddings);
        }

        Ok(embeddings)
    }

    fn check_dimension(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.config.dimension {
            return Err(DocRagError::EmbeddingError(format!(
                "Model {} returned {} dimensions, expected {}",
                self.config.model,
                embedding.len(),
                self.config.dimension
            )));
        }
        Ok(())
    }

    /// Get the embedding dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Get the model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the provider
    #[must_use]
    pub const fn provider(&self) -> EmbeddingProvider {
        self.config.provider
    }
}
