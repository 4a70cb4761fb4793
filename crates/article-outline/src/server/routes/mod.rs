//! API routes for the outline server

pub mod download;
pub mod outlines;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use crate::server::state::AppState;

/// Upload and export routes
pub fn outline_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/generate-outlines",
            post(outlines::generate_outlines).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/download-outline", post(download::download_outline))
}

/// Routes mounted under `/api`
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    outline_routes(max_upload_size).route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "article-outline",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Turns article text into header/key-point outlines",
        "endpoints": {
            "POST /api/generate-outlines": "Upload .txt files (multipart field files[]) and get one outline per file",
            "POST /api/download-outline": "Return {title, content} as {title}_outline.txt",
            "GET /health": "Liveness",
            "GET /ready": "Readiness"
        }
    }))
}
