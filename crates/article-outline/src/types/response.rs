//! Request/response types for batch outline generation and export

use serde::{Deserialize, Serialize};

use super::outline::Outline;
use crate::error::DocumentError;

/// Result for a single uploaded document
#[derive(Debug, Clone, Serialize)]
pub struct OutlineEntry {
    /// Uploaded filename
    pub filename: String,
    /// Filename without extension
    pub title: String,
    /// Outline or per-document error
    #[serde(flatten)]
    pub outcome: DocumentOutcome,
}

impl OutlineEntry {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, DocumentOutcome::Ok { .. })
    }

    /// The outline, if extraction succeeded
    pub fn outline(&self) -> Option<&Outline> {
        match &self.outcome {
            DocumentOutcome::Ok { outline, .. } => Some(outline),
            DocumentOutcome::Error { .. } => None,
        }
    }

    /// The error, if this document failed
    pub fn error(&self) -> Option<&DocumentError> {
        match &self.outcome {
            DocumentOutcome::Ok { .. } => None,
            DocumentOutcome::Error { error, .. } => Some(error),
        }
    }
}

/// Outcome of processing one document
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Ok {
        outline: Outline,
        /// Plain-text rendering of the outline
        outline_text: String,
    },
    Error {
        error_kind: &'static str,
        #[serde(rename = "error", serialize_with = "serialize_display")]
        error: DocumentError,
    },
}

impl DocumentOutcome {
    pub fn from_outline(outline: Outline) -> Self {
        let outline_text = outline.to_text();
        Self::Ok {
            outline,
            outline_text,
        }
    }

    pub fn from_error(error: DocumentError) -> Self {
        Self::Error {
            error_kind: error.kind(),
            error,
        }
    }
}

impl From<std::result::Result<Outline, DocumentError>> for DocumentOutcome {
    fn from(result: std::result::Result<Outline, DocumentError>) -> Self {
        match result {
            Ok(outline) => Self::from_outline(outline),
            Err(error) => Self::from_error(error),
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    error: &DocumentError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Body of `POST /download-outline`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Title used to build the download filename
    pub title: String,
    /// Outline text to return as the file body
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_entry_json_shape() {
        let entry = OutlineEntry {
            filename: "notes.txt".to_string(),
            title: "notes".to_string(),
            outcome: DocumentOutcome::from_error(DocumentError::NoMeaningfulContent),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["filename"], "notes.txt");
        assert_eq!(json["status"], "error");
        assert_eq!(json["error_kind"], "no_meaningful_content");
        assert_eq!(json["error"], "Could not extract meaningful content from this file");
    }

    #[test]
    fn test_ok_entry_json_shape() {
        let entry = OutlineEntry {
            filename: "a.txt".to_string(),
            title: "a".to_string(),
            outcome: DocumentOutcome::from_outline(Outline::new()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["outline"], serde_json::json!([]));
        assert_eq!(json["outline_text"], "");
        assert!(entry.is_ok());
        assert!(entry.error().is_none());
    }
}
