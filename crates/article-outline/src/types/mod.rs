//! Core types for outline extraction

pub mod outline;
pub mod response;

pub use outline::{Block, BlockKind, Outline, OutlineSection, Point};
pub use response::{DocumentOutcome, DownloadRequest, OutlineEntry};
