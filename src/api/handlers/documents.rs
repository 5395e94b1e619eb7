/// PDF upload handler
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::ProcessPdfResponse;
use crate::documents::UploadedFile;

/// Multipart field carrying the PDF files
pub const PDF_FIELD: &str = "pdf_files";

const NO_FILES: &str = "No PDF files provided";

/// Extract, chunk, embed and index the uploaded PDFs (POST /process_pdf)
pub async fn process_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessPdfResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Upload is not multipart: {}", e);
        ApiError::bad_request(NO_FILES)
    })?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, state.max_upload_bytes))?
    {
        if field.name() != Some(PDF_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let filename = field
            .file_name()
            .map_or_else(|| format!("upload-{}.pdf", files.len() + 1), ToString::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&e, state.max_upload_bytes))?;

        // Browsers send an empty part when no file was chosen
        if bytes.is_empty() {
            debug!("Skipping empty upload {}", filename);
            continue;
        }

        files.push(UploadedFile::new(filename, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(ApiError::bad_request(NO_FILES));
    }

    info!("POST /process_pdf: {} file(s)", files.len());
    let report = state.rag.ingest(files).await?;
    Ok(Json(report.into()))
}

/// Map a multipart read failure onto its own status
fn multipart_error(err: &MultipartError, max_upload_bytes: usize) -> ApiError {
    let status = err.status();
    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        format!("Upload exceeds the {max_upload_bytes} byte limit")
    } else {
        format!("Invalid multipart body: {}", err.body_text())
    };
    ApiError { status, message }
}
