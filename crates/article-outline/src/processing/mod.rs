//! Per-document processing with fault isolation, and batch execution

mod batch;

pub use batch::{decode_document, outline_document, process_document, BatchProcessor, UploadedFile};
