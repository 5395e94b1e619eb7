//! PDF text extraction

use sha2::Digest;
use sha2::Sha256;
use tracing::debug;
use tracing::info;

use super::Document;
use super::UploadedFile;
use crate::errors::DocRagError;
use crate::errors::Result;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extract the text of every page, in page order
///
/// Parsing is CPU-bound and may panic on malformed input, so it runs on the
/// blocking pool and a panic is reported as a `PdfError`.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(DocRagError::PdfError(
            "file does not start with a PDF header".to_string(),
        ));
    }

    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| DocRagError::PdfError(format!("PDF parser aborted: {e}")))?
        .map_err(|e| DocRagError::PdfError(e.to_string()))
}

/// Extract every uploaded file
///
/// A file that cannot be parsed fails the whole batch; the error names it.
pub async fn extract_pdf_texts(files: Vec<UploadedFile>) -> Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(files.len());

    for file in files {
        let content_hash = hex::encode(Sha256::digest(&file.bytes));
        let size = file.bytes.len();

        let text = extract_pdf_text(file.bytes).await.map_err(|e| match e {
            DocRagError::PdfError(msg) => DocRagError::PdfError(format!("{}: {msg}", file.filename)),
            other => other,
        })?;

        debug!(
            "Extracted {} chars from {} ({} bytes, sha256 {})",
            text.chars().count(),
            file.filename,
            size,
            content_hash
        );

        documents.push(Document {
            source: file.filename,
            content_hash,
            text,
        });
    }

    info!("Extracted text from {} PDF file(s)", documents.len());
    Ok(documents)
}
