//! Embedding API clients for various providers

use std::str::FromStr;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::OLLAMA_CONCURRENCY;
use crate::errors::DocRagError;
use crate::errors::Result;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// HuggingFace text-embeddings-inference server
    HuggingFace,
    /// `OpenAI` embeddings API
    OpenAI,
    /// Ollama local embeddings
    Ollama,
}

impl FromStr for EmbeddingProvider {
    type Err = DocRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "huggingface" | "hf" | "tei" => Ok(Self::HuggingFace),
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(DocRagError::ConfigError(format!(
                "Unknown embedding provider: {other}"
            ))),
        }
    }
}

/// Client for generating embeddings from various providers
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    pub fn new(
        provider: EmbeddingProvider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            provider,
            model,
            endpoint,
            api_key,
            client,
        })
    }

    /// Generate embedding for a single text
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        match self.provider {
            EmbeddingProvider::HuggingFace => self
                .generate_batch_huggingface(vec![text])
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| DocRagError::EmbeddingError("No embedding in response".to_string())),
            EmbeddingProvider::OpenAI => self
                .generate_batch_openai(vec![text])
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| DocRagError::EmbeddingError("No embedding in response".to_string())),
            EmbeddingProvider::Ollama => self.generate_ollama(text).await,
        }
    }

    /// Generate embeddings for multiple texts in one round trip where the
    /// provider allows it. Output order matches input order.
    pub async fn generate_batch(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        let expected = texts.len();
        let embeddings = match self.provider {
            EmbeddingProvider::HuggingFace => self.generate_batch_huggingface(texts).await?,
            EmbeddingProvider::OpenAI => self.generate_batch_openai(texts).await?,
            EmbeddingProvider::Ollama => {
                // Ollama has no batch endpoint
                use futures::stream::StreamExt;
                use futures::stream::{
                    self,
                };

                // Owned inputs keep the stream future `Send` for axum handlers
                let owned: Vec<String> = texts.into_iter().map(str::to_owned).collect();
                let results: Vec<Result<Vec<f32>>> = stream::iter(owned)
                    .map(|text| async move { self.generate_ollama(&text).await })
                    .buffered(OLLAMA_CONCURRENCY)
                    .collect()
                    .await;

                results.into_iter().collect::<Result<Vec<_>>>()?
            }
        };

        if embeddings.len() != expected {
            return Err(DocRagError::EmbeddingError(format!(
                "Expected {expected} embeddings, provider returned {}",
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }

    /// Generate embeddings using a text-embeddings-inference server
    async fn generate_batch_huggingface(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        #[derive(Serialize)]
        struct TeiRequest<'a> {
            inputs: Vec<&'a str>,
            truncate: bool,
        }

        let url = format!("{}/embed", self.endpoint);
        debug!("Calling HuggingFace embeddings API: {} items", texts.len());

        let mut request = self.client.post(&url).json(&TeiRequest {
            inputs: texts,
            truncate: true,
        });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let response = check_status(response, "HuggingFace").await?;

        response
            .json::<Vec<Vec<f32>>>()
            .await
            .map_err(|e| DocRagError::EmbeddingError(format!("Failed to parse response: {e}")))
    }

    /// Generate embeddings in batch using `OpenAI` API
    async fn generate_batch_openai(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| DocRagError::ConfigError("OpenAI API key not provided".to_string()))?;

        #[derive(Serialize)]
        struct OpenAIBatchRequest<'a> {
            input: Vec<&'a str>,
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<EmbeddingData>,
        }

        #[derive(Deserialize)]
        struct EmbeddingData {
            index: usize,
            embedding: Vec<f32>,
        }

        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling OpenAI batch embeddings API: {} items", texts.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&OpenAIBatchRequest {
                input: texts,
                model: &self.model,
            })
            .send()
            .await?;
        let response = check_status(response, "OpenAI").await?;

        let mut result: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| DocRagError::EmbeddingError(format!("Failed to parse response: {e}")))?;

        result.data.sort_by_key(|d| d.index);
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    /// Generate embedding using Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&OllamaRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await?;
        let response = check_status(response, "Ollama").await?;

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| DocRagError::EmbeddingError(format!("Failed to parse response: {e}")))?;

        Ok(result.embedding)
    }

    pub const fn provider(&self) -> EmbeddingProvider {
        self.provider
    }
}

async fn check_status(response: reqwest::Response, provider: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(DocRagError::EmbeddingError(format!(
        "{provider} API error ({status}): {error_text}"
    )))
}
