//! CLI output formatting utilities

use crate::rag::IngestReport;
use crate::rag::RagResponse;
use crate::AppConfig;

/// Safely truncate a string at a character boundary
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print the effective configuration (keys masked)
pub fn print_config(config: &AppConfig) {
    let config = config.redacted();

    println!("📋 DocRAG Configuration:");
    println!();

    println!("🌐 Server:");
    println!("  Listen: {}", config.listen_addr());
    println!("  CORS: {}", config.server.enable_cors);
    println!("  Max upload: {} bytes", config.server.max_upload_bytes);
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("✂️  Chunking:");
    println!("  Chunk size: {} chars", config.chunking.chunk_size);
    println!("  Overlap: {} chars", config.chunking.chunk_overlap);
    println!();

    println!("🧮 Embeddings:");
    println!("  Provider: {}", config.embeddings.provider);
    println!("  Endpoint: {}", config.embeddings.endpoint);
    println!("  Model: {}", config.embedding_model());
    println!("  Dimension: {}", config.embedding_dimension());
    println!(
        "  API key: {}",
        config.embeddings.api_key.as_deref().unwrap_or("(none)")
    );
    println!("  Batch size: {}", config.embeddings.batch_size);
    println!();

    println!("🗂️  Vector store:");
    println!("  Path: {}", config.index_path());
    println!("  Top k: {}", config.vector_store.top_k);
    println!();

    println!("🤖 LLM:");
    println!("  Provider: {}", config.llm.provider);
    println!("  Endpoint: {}", config.llm.endpoint);
    println!("  Model: {}", config.llm_model());
    println!(
        "  API key: {}",
        if config.llm.api_key.is_empty() {
            "(none)"
        } else {
            config.llm.api_key.as_str()
        }
    );
    println!("  Temperature: {}", config.llm.temperature);
    println!("  Max tokens: {}", config.llm.max_tokens);
}

/// Print the outcome of an ingest run
pub fn print_ingest_report(report: &IngestReport) {
    print_success(&format!(
        "Indexed {} chunk(s) from {} file(s)",
        report.chunks, report.files
    ));
    for source in &report.sources {
        println!("  - {source}");
    }
}

/// Print an answer with its sources
pub fn print_rag_response(response: &RagResponse, show_context: bool) {
    if show_context {
        println!("📚 Context ({} chars):", response.context.chars().count());
        println!("{}", truncate_str(&response.context, 2000));
        println!();
    }
    println!("{}", response.format());
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_counts_chars() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 5), "hello...");
        assert_eq!(truncate_str("日本語テキスト", 3), "日本語...");
    }
}
