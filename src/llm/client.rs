//! Text generation over HTTP

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use tracing::warn;

use super::LlmProvider;
use super::EMPTY_RESPONSE;
use crate::config::AppConfig;
use crate::errors::DocRagError;
use crate::errors::Result;

/// Client for a hosted language model
#[derive(Clone)]
pub struct LlmService {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: usize,
    client: Client,
}

impl LlmService {
    /// Create an LLM service from configuration
    ///
    /// A missing API key is only reported when a request is made, so the
    /// server can start and accept uploads without one.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(180))
            .build()?;

        Ok(Self {
            provider: config.llm.provider.parse()?,
            endpoint: config.llm.endpoint.trim_end_matches('/').to_string(),
            model: config.llm.model.clone(),
            api_key: config.llm.api_key.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            client,
        })
    }

    /// Generate a completion with the configured temperature and token limit
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_params(prompt, self.temperature, self.max_tokens)
            .await
    }

    /// Generate a completion
    ///
    /// An empty model answer becomes [`EMPTY_RESPONSE`].
    pub async fn generate_with_params(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        debug!(
            "Calling {:?} model {} ({} prompt chars)",
            self.provider,
            self.model,
            prompt.chars().count()
        );

        let text = match self.provider {
            LlmProvider::Gemini => self.generate_gemini(prompt, temperature, max_tokens).await?,
            LlmProvider::OpenAI => self.generate_openai(prompt, temperature, max_tokens).await?,
            LlmProvider::Ollama => self.generate_ollama(prompt, temperature, max_tokens).await?,
        };

        if text.trim().is_empty() {
            warn!("Model {} returned an empty answer", self.model);
            return Ok(EMPTY_RESPONSE.to_string());
        }
        Ok(text)
    }

    async fn generate_gemini(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        #[derive(Deserialize)]
        struct GeminiResponse {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        #[derive(Deserialize)]
        struct Candidate {
            content: Option<Content>,
        }

        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }

        #[derive(Deserialize)]
        struct Part {
            #[serde(default)]
            text: String,
        }

        let api_key = self.require_key("Gemini")?;
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_tokens,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response, "Gemini").await?;

        let result: GeminiResponse = response
            .json()
            .await
            .map_err(|e| DocRagError::LlmError(format!("Failed to parse Gemini response: {e}")))?;

        Ok(result
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }

    async fn generate_openai(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
            temperature: f32,
            max_tokens: usize,
        }

        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            #[serde(default)]
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            #[serde(default)]
            content: Option<String>,
        }

        let api_key = self.require_key("OpenAI")?;
        let url = format!("{}/chat/completions", self.endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                temperature,
                max_tokens,
            })
            .send()
            .await?;
        let response = check_status(response, "OpenAI").await?;

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| DocRagError::LlmError(format!("Failed to parse OpenAI response: {e}")))?;

        Ok(result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    async fn generate_ollama(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: usize,
    ) -> Result<String> {
        #[derive(Deserialize)]
        struct OllamaResponse {
            #[serde(default)]
            response: String,
        }

        let url = format!("{}/api/generate", self.endpoint);
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": temperature,
                "num_predict": max_tokens,
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let response = check_status(response, "Ollama").await?;

        let result: OllamaResponse = response
            .json()
            .await
            .map_err(|e| DocRagError::LlmError(format!("Failed to parse Ollama response: {e}")))?;

        Ok(result.response)
    }

    fn require_key(&self, provider: &str) -> Result<&str> {
        if self.api_key.is_empty() {
            return Err(DocRagError::ConfigError(format!(
                "{provider} API key not provided (set llm.api_key or GOOGLE_API_KEY)"
            )));
        }
        Ok(&self.api_key)
    }

    pub const fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
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
    Err(DocRagError::LlmError(format!(
        "{provider} API error ({status}): {error_text}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_from_default_config() {
        let service = LlmService::new(&AppConfig::default()).unwrap();
        assert_eq!(service.provider(), LlmProvider::Gemini);
        assert_eq!(service.model(), "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_missing_key_reported_on_call() {
        let service = LlmService::new(&AppConfig::default()).unwrap();
        let err = service.generate("hi").await.unwrap_err();
        assert!(matches!(err, DocRagError::ConfigError(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_unknown_provider_fails_fast() {
        let mut config = AppConfig::default();
        config.llm.provider = "bard".to_string();
        assert!(LlmService::new(&config).is_err());
    }
}
