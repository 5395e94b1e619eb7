//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::rag::IngestReport;
use crate::rag::RagResponse;

/// Error body returned with every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub indexed_chunks: usize,
}

/// Result of `POST /process_pdf`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessPdfResponse {
    pub message: String,
    pub files: usize,
    pub chunks: usize,
}

impl From<IngestReport> for ProcessPdfResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            message: "PDF processing completed successfully.".to_string(),
            files: report.files,
            chunks: report.chunks,
        }
    }
}

/// Body of `POST /query`
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// A retrieved chunk, without its text
#[derive(Debug, Serialize, Deserialize)]
pub struct SourceResponse {
    pub source: String,
    pub chunk_index: usize,
    pub score: f32,
}

/// Result of `POST /query`
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub question: String,
    pub response: String,
    pub sources: Vec<SourceResponse>,
}

impl From<RagResponse> for QueryResponse {
    fn from(rag: RagResponse) -> Self {
        Self {
            question: rag.question,
            response: rag.answer,
            sources: rag
                .sources
                .into_iter()
                .map(|s| SourceResponse {
                    source: s.source,
                    chunk_index: s.chunk_index,
                    score: s.score,
                })
                .collect(),
        }
    }
}
