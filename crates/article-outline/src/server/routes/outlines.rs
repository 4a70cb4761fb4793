//! Outline generation endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::processing::UploadedFile;
use crate::server::state::AppState;
use crate::types::OutlineEntry;

/// Multipart field carrying the uploaded articles
pub const FILES_FIELD: &str = "files[]";

/// Generate one outline per uploaded `.txt` file.
///
/// Parts under other field names are ignored. Files with an empty name or a
/// disallowed extension are skipped without an entry.
pub async fn generate_outlines(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<OutlineEntry>>> {
    let mut files = Vec::new();
    let mut saw_files_field = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Multipart(e.to_string()))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        saw_files_field = true;

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() || !state.config().processing.accepts(&filename) {
            tracing::debug!("Skipping upload '{}'", filename);
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Multipart(format!("Failed to read '{}': {}", filename, e)))?;

        tracing::info!("Received '{}' ({} bytes)", filename, data.len());
        files.push(UploadedFile::new(filename, data.to_vec()));
    }

    if !saw_files_field {
        return Err(Error::NoFiles);
    }

    Ok(Json(state.batch().process(files).await))
}
