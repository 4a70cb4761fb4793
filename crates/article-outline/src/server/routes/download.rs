//! Outline download endpoint

use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{Error, Result};
use crate::export::outline_filename;
use crate::types::DownloadRequest;

/// Return `content` as an attachment named `{title}_outline.txt`
pub async fn download_outline(
    payload: std::result::Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|rejection| Error::invalid_request(rejection.body_text()))?;

    let filename = outline_filename(&request.title);
    tracing::debug!("Serving outline download '{}' ({} bytes)", filename, request.content.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        request.content,
    )
        .into_response())
}
