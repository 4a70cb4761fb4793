//! article-outline: heuristic outline extraction for article-like text
//!
//! This crate turns raw article text into an ordered list of sections, each a
//! header with the key points (sentences) that follow it. The extraction
//! pipeline strips boilerplate, segments lines into headers and body
//! paragraphs, splits paragraphs into sentences and normalizes each sentence
//! into a point. Original wording is preserved; only structure is changed.
//!
//! An axum server exposes batch outline generation over multipart uploads and
//! an export endpoint that returns an outline as a downloadable text file.

pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod processing;
pub mod server;
pub mod types;

pub use config::OutlineConfig;
pub use error::{DocumentError, Error, Result};
pub use extraction::{
    BlockSegmenter, NoiseFilter, OutlineExtractor, PointNormalizer, SentenceDetector,
    SentenceModel,
};
pub use types::{
    outline::{Block, BlockKind, Outline, OutlineSection, Point},
    response::{DocumentOutcome, DownloadRequest, OutlineEntry},
};
