//! Ingestion and question handlers

use std::path::PathBuf;

use crate::cli::output::print_info;
use crate::cli::output::print_ingest_report;
use crate::cli::output::print_rag_response;
use crate::documents::UploadedFile;
use crate::rag::RagService;
use crate::AppConfig;
use crate::DocRagError;
use crate::Result;

pub async fn handle_ingest(config: &AppConfig, paths: Vec<PathBuf>) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DocRagError::InvalidInput(format!("{}: {e}", path.display())))?;
        let filename = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        files.push(UploadedFile::new(filename, bytes));
    }

    print_info(&format!("📄 Processing {} PDF file(s)...", files.len()));
    let rag = RagService::new(config)?;
    let report = rag.ingest(files).await?;
    print_ingest_report(&report);
    print_info(&format!("Index saved to {}", rag.index_path().display()));
    Ok(())
}

pub async fn handle_ask(config: &AppConfig, question: String, show_context: bool) -> Result<()> {
    print_info(&format!("🤖 Question: \"{question}\""));
    let rag = RagService::new(config)?;
    let response = rag.query(&question).await?;
    print_rag_response(&response, show_context);
    Ok(())
}
