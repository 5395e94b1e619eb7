use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocRagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("PDF extraction failed: {0}")]
    PdfError(String),

    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    #[error("Vector store error: {0}")]
    VectorStoreError(String),

    #[error("No vector index found at {0}; process some PDF files first")]
    IndexNotFound(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Custom(String),
}

impl DocRagError {
    /// Errors caused by the caller's input rather than by the service
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::PdfError(_) | Self::IndexNotFound(_)
        )
    }
}

impl From<reqwest::Error> for DocRagError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocRagError>;
