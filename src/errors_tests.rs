//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::DocRagError;

    // ====== Error Type Tests ======

    #[test]
    fn test_invalid_input_displays_message_verbatim() {
        let error = DocRagError::InvalidInput("Question is required".to_string());
        assert_eq!(format!("{error}"), "Question is required");
    }

    #[test]
    fn test_config_error() {
        let error = DocRagError::ConfigError("chunk_size must be positive".to_string());
        assert!(matches!(error, DocRagError::ConfigError(_)));
        assert!(format!("{error}").contains("configuration"));
    }

    #[test]
    fn test_index_not_found_mentions_path() {
        let error = DocRagError::IndexNotFound("faiss_index".to_string());
        let display = format!("{error}");
        assert!(display.contains("faiss_index"));
        assert!(display.contains("process some PDF files"));
    }

    // ====== Classification Tests ======

    #[test]
    fn test_client_errors() {
        assert!(DocRagError::InvalidInput("x".into()).is_client_error());
        assert!(DocRagError::PdfError("bad header".into()).is_client_error());
        assert!(DocRagError::IndexNotFound("idx".into()).is_client_error());
    }

    #[test]
    fn test_server_errors() {
        assert!(!DocRagError::LlmError("quota".into()).is_client_error());
        assert!(!DocRagError::EmbeddingError("down".into()).is_client_error());
        assert!(!DocRagError::HttpError("timeout".into()).is_client_error());
        assert!(!DocRagError::Custom("boom".into()).is_client_error());
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: DocRagError = io_err.into();
        assert!(matches!(err, DocRagError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_result: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");
        let err: DocRagError = parse_result.unwrap_err().into();
        assert!(matches!(err, DocRagError::Json(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let parse_result: Result<toml::Value, _> = toml::from_str("server = [");
        let err: DocRagError = parse_result.unwrap_err().into();
        assert!(matches!(err, DocRagError::TomlParsing(_)));
    }
}
