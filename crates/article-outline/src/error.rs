//! Error types for outline extraction

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service-level errors (startup, configuration, request handling)
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sentence model could not be loaded
    #[error("Sentence model error: {0}")]
    ModelLoad(String),

    /// Upload request carried no files
    #[error("No files uploaded")]
    NoFiles,

    /// Multipart body could not be read
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// Malformed request payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parse error
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a model load error
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad(message.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::ModelLoad(_) => (StatusCode::SERVICE_UNAVAILABLE, "model_error"),
            Error::NoFiles => (StatusCode::BAD_REQUEST, "no_files"),
            Error::Multipart(_) => (StatusCode::BAD_REQUEST, "multipart_error"),
            Error::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            Error::Json(_) => (StatusCode::BAD_REQUEST, "json_error"),
            Error::Toml(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Per-document failure. Recorded in the batch result, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Upload bytes are not valid UTF-8
    #[error("File is not valid UTF-8 text: {0}")]
    Decode(String),

    /// Extraction succeeded but produced no sections
    #[error("Could not extract meaningful content from this file")]
    NoMeaningfulContent,

    /// Extraction exceeded the per-document deadline
    #[error("Processing timeout after {secs}s")]
    Timeout { secs: u64 },

    /// Unexpected failure inside the pipeline
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocumentError {
    /// Stable machine-readable kind used in JSON responses
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::Decode(_) => "decode_error",
            DocumentError::NoMeaningfulContent => "no_meaningful_content",
            DocumentError::Timeout { .. } => "timeout",
            DocumentError::Internal(_) => "internal_error",
        }
    }
}

impl From<std::str::Utf8Error> for DocumentError {
    fn from(err: std::str::Utf8Error) -> Self {
        DocumentError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_files_maps_to_bad_request() {
        let response = Error::NoFiles.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_model_error_is_unavailable() {
        let response = Error::model_load("missing").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_document_error_kinds() {
        assert_eq!(DocumentError::NoMeaningfulContent.kind(), "no_meaningful_content");
        assert_eq!(DocumentError::Timeout { secs: 3 }.kind(), "timeout");
        assert_eq!(
            DocumentError::NoMeaningfulContent.to_string(),
            "Could not extract meaningful content from this file"
        );
    }

    #[test]
    fn test_utf8_error_converts_to_decode() {
        let bytes = vec![0x66, 0xff, 0x6f];
        let err: DocumentError = std::str::from_utf8(&bytes).unwrap_err().into();
        assert_eq!(err.kind(), "decode_error");
    }
}
