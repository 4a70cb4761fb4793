//! Article outline CLI
//!
//! Prints (or writes) an outline for each text file given on the command line.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use article_outline::export::outline_filename;
use article_outline::processing::{BatchProcessor, UploadedFile};
use article_outline::{OutlineConfig, OutlineEntry, OutlineExtractor};

/// Extract header/key-point outlines from article text files
#[derive(Parser)]
#[command(name = "article-outline")]
#[command(version)]
#[command(about = "Extract header/key-point outlines from article text files")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print entries as JSON
    #[arg(long)]
    json: bool,

    /// Write each outline to <DIR>/{title}_outline.txt
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Article files to outline
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("article_outline=info"),
        _ => EnvFilter::new("article_outline=debug"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether at least one file produced an outline
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = OutlineConfig::load(cli.config.as_deref())?;
    let extractor = OutlineExtractor::from_config(&config)?;
    let processor = BatchProcessor::new(Arc::new(extractor), &config.processing);

    let mut uploads = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match std::fs::read(path) {
            Ok(data) => uploads.push(UploadedFile::new(display_name(path), data)),
            Err(e) => eprintln!("{}: {}", path.display(), e),
        }
    }

    let entries = processor.process(uploads).await;

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        for entry in &entries {
            write_outline(dir, entry)?;
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_entries(&entries);
    }

    Ok(entries.iter().any(OutlineEntry::is_ok))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_outline(dir: &Path, entry: &OutlineEntry) -> anyhow::Result<()> {
    if let Some(outline) = entry.outline() {
        let path = dir.join(outline_filename(&entry.title));
        std::fs::write(&path, outline.to_text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_entries(entries: &[OutlineEntry]) {
    let mut first = true;
    for entry in entries {
        match (entry.outline(), entry.error()) {
            (Some(outline), _) => {
                if !first {
                    println!();
                }
                first = false;
                println!("# {}\n", entry.title);
                print!("{}", outline.to_text());
            }
            (None, Some(error)) => eprintln!("{}: {}", entry.filename, error),
            (None, None) => {}
        }
    }
}
