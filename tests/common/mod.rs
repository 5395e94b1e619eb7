//! Shared fixtures: stand-in embedding/LLM providers and a tiny PDF builder

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use docrag::AppConfig;
use serde_json::json;
use serde_json::Value;

pub const EMBEDDING_DIM: usize = 4;
pub const MOCK_ANSWER: &str = "Hello RAG is the greeting in the document.";
pub const TEST_API_KEY: &str = "test-key";

/// Deterministic stand-in for a sentence embedding
pub fn mock_embedding(text: &str) -> Vec<f32> {
    vec![
        1.0,
        if text.contains("Hello") { 1.0 } else { 0.0 },
        if text.contains("RAG") { 1.0 } else { 0.0 },
        (text.chars().count() % 7) as f32 / 7.0,
    ]
}

async fn embed(Json(body): Json<Value>) -> Json<Vec<Vec<f32>>> {
    let inputs = body["inputs"].as_array().cloned().unwrap_or_default();
    Json(
        inputs
            .iter()
            .map(|v| mock_embedding(v.as_str().unwrap_or_default()))
            .collect(),
    )
}

fn has_bearer(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {TEST_API_KEY}").as_str())
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": { "message": "API key not valid" } })),
    )
}

/// OpenAI embeddings, answered in reverse order to exercise the `index` sort
async fn openai_embeddings(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    let inputs = body["input"].as_array().cloned().unwrap_or_default();
    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .rev()
        .map(|(index, v)| {
            json!({
                "object": "embedding",
                "index": index,
                "embedding": mock_embedding(v.as_str().unwrap_or_default()),
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "object": "list", "data": data })))
}

/// Ollama embeddings, one prompt per call; tracks concurrent calls
async fn ollama_embeddings(
    State(stats): State<Arc<ProviderStats>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let prompt = body["prompt"].as_str().unwrap_or_default().to_string();

    let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak_in_flight.fetch_max(now, Ordering::SeqCst);
    stats.ollama_calls.fetch_add(1, Ordering::SeqCst);

    // Shorter prompts finish later so completion order differs from input order
    let delay = 40_u64.saturating_sub(prompt.len() as u64);
    tokio::time::sleep(Duration::from_millis(delay)).await;

    stats.in_flight.fetch_sub(1, Ordering::SeqCst);
    Json(json!({ "embedding": mock_embedding(&prompt) }))
}

fn prompt_answer(prompt: &str) -> &'static str {
    if prompt.contains("silence") {
        ""
    } else {
        MOCK_ANSWER
    }
}

async fn gemini_generate(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(TEST_API_KEY) {
        return unauthorized();
    }

    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    let answer = prompt_answer(prompt);
    if answer.is_empty() {
        return (StatusCode::OK, Json(json!({ "candidates": [] })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": answer }] } }]
        })),
    )
}

async fn chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": prompt_answer(prompt) },
                "finish_reason": "stop"
            }]
        })),
    )
}

async fn ollama_generate(Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["prompt"].as_str().unwrap_or_default();
    Json(json!({
        "model": body["model"],
        "response": prompt_answer(prompt),
        "done": body["stream"] == json!(false),
    }))
}

/// Call counters kept by the mock provider
#[derive(Default)]
pub struct ProviderStats {
    pub ollama_calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

/// Start a local server speaking the TEI, OpenAI, Ollama and Gemini
/// protocols; returns its base URL and call counters
pub async fn spawn_mock_provider_with_stats() -> (String, Arc<ProviderStats>) {
    let stats = Arc::new(ProviderStats::default());
    let app = Router::new()
        .route("/embed", post(embed))
        .route("/embeddings", post(openai_embeddings))
        .route("/api/embeddings", post(ollama_embeddings))
        .route("/models/:call", post(gemini_generate))
        .route("/chat/completions", post(chat_completions))
        .route("/api/generate", post(ollama_generate))
        .with_state(Arc::clone(&stats));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), stats)
}

pub async fn spawn_mock_provider() -> String {
    spawn_mock_provider_with_stats().await.0
}

/// Configuration pointing both providers at the mock and the index into `dir`
pub fn test_config(provider_url: &str, dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.embeddings.provider = "huggingface".to_string();
    config.embeddings.endpoint = provider_url.to_string();
    config.embeddings.dimension = EMBEDDING_DIM;
    config.llm.provider = "gemini".to_string();
    config.llm.endpoint = provider_url.to_string();
    config.llm.api_key = TEST_API_KEY.to_string();
    config.vector_store.path = dir.join("index").display().to_string();
    config
}

/// A single-page PDF showing `text` in Helvetica
pub fn build_pdf(text: &str) -> Vec<u8> {
    let stream = format!("BT /F1 12 Tf 72 712 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}

pub const BOUNDARY: &str = "docrag-test-boundary";

/// Encode `(field, filename, bytes)` parts as a multipart/form-data body
pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, bytes) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
