//! Outline server binary
//!
//! Run with: cargo run -p article-outline --bin article-outline-server

use article_outline::{config::OutlineConfig, server::OutlineServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_outline=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                    Article Outline                        ║
║          Headers and key points from plain text           ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = OutlineConfig::load(None)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Sentence model: {}", config.sentence_model.model);
    tracing::info!(
        "  - Header: <= {} words, < {} chars",
        config.heuristics.max_header_words,
        config.heuristics.max_header_chars
    );
    tracing::info!("  - Min point words: > {}", config.heuristics.min_point_words);
    tracing::info!("  - Parallel documents: {}", config.processing.parallelism());

    // Model load failure is fatal
    let server = OutlineServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /generate-outlines - Upload .txt articles (field files[])");
    println!("  POST /download-outline  - Download an outline as text");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
