//! Hosted language model access
//!
//! Gemini is the default; OpenAI-compatible chat endpoints and Ollama are
//! supported through the same [`LlmService`].

pub mod client;

use std::str::FromStr;

pub use client::LlmService;

use crate::errors::DocRagError;
use crate::errors::Result;

/// Answer returned when the model produces no text
pub const EMPTY_RESPONSE: &str = "No response generated.";

/// Supported generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Google Gemini `generateContent`
    Gemini,
    /// `OpenAI`-compatible `/chat/completions`
    OpenAI,
    /// Ollama `/api/generate`
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = DocRagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            "ollama" => Ok(Self::Ollama),
            other => Err(DocRagError::ConfigError(format!(
                "Unknown LLM provider: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("gemini".parse::<LlmProvider>().unwrap(), LlmProvider::Gemini);
        assert_eq!("Google".parse::<LlmProvider>().unwrap(), LlmProvider::Gemini);
        assert_eq!("openai".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert_eq!("ollama".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert!(matches!(
            "palm".parse::<LlmProvider>(),
            Err(DocRagError::ConfigError(_))
        ));
    }
}
