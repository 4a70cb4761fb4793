//! Batch outline generation
//!
//! Every uploaded document yields exactly one [`OutlineEntry`]. Decode errors,
//! empty extractions, panics inside the pipeline and timeouts are all recorded
//! on the entry; none of them stops the rest of the batch.

use futures::future::join_all;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::config::ProcessingConfig;
use crate::error::DocumentError;
use crate::export::document_title;
use crate::extraction::OutlineExtractor;
use crate::types::{DocumentOutcome, Outline, OutlineEntry};

/// An uploaded file awaiting processing
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Strict UTF-8 decode; a leading byte order mark is dropped
pub fn decode_document(data: &[u8]) -> Result<&str, DocumentError> {
    let text = std::str::from_utf8(data)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Decode and extract one document inside a panic boundary
pub fn outline_document(
    extractor: &OutlineExtractor,
    data: &[u8],
) -> Result<Outline, DocumentError> {
    let text = decode_document(data)?;
    panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(text)))
        .unwrap_or_else(|payload| Err(DocumentError::Internal(panic_message(payload.as_ref()))))
}

/// Process one document into its batch entry
pub fn process_document(extractor: &OutlineExtractor, filename: &str, data: &[u8]) -> OutlineEntry {
    let result = outline_document(extractor, data);
    match &result {
        Ok(outline) => tracing::info!(
            "Outlined '{}': {} sections, {} points",
            filename,
            outline.len(),
            outline.point_count()
        ),
        Err(e) => tracing::warn!("No outline for '{}': {}", filename, e),
    }

    entry(filename, DocumentOutcome::from(result))
}

fn entry(filename: &str, outcome: DocumentOutcome) -> OutlineEntry {
    OutlineEntry {
        filename: filename.to_string(),
        title: document_title(filename),
        outcome,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("extraction panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("extraction panicked: {}", msg)
    } else {
        "extraction panicked".to_string()
    }
}

/// Runs documents concurrently on the blocking pool, bounded and deadlined
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    extractor: Arc<OutlineExtractor>,
    parallelism: usize,
    document_timeout: Duration,
}

impl BatchProcessor {
    pub fn new(extractor: Arc<OutlineExtractor>, config: &ProcessingConfig) -> Self {
        Self {
            extractor,
            parallelism: config.parallelism(),
            document_timeout: Duration::from_secs(config.document_timeout_secs),
        }
    }

    /// Override the per-document deadline
    pub fn with_timeout(mut self, document_timeout: Duration) -> Self {
        self.document_timeout = document_timeout;
        self
    }

    pub fn extractor(&self) -> &Arc<OutlineExtractor> {
        &self.extractor
    }

    /// Process `files`; entries come back in the same order as the input.
    pub async fn process(&self, files: Vec<UploadedFile>) -> Vec<OutlineEntry> {
        let start = Instant::now();
        let total = files.len();
        let semaphore = Arc::new(Semaphore::new(self.parallelism));

        let tasks = files.into_iter().map(|file| {
            let extractor = self.extractor.clone();
            let sem = semaphore.clone();
            let document_timeout = self.document_timeout;

            async move {
                let permit = match sem.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return entry(
                            &file.filename,
                            DocumentOutcome::from_error(DocumentError::Internal(e.to_string())),
                        )
                    }
                };

                let filename = file.filename.clone();
                // The permit moves into the blocking closure: a timed-out
                // extraction keeps its slot until it actually returns.
                let task = tokio::task::spawn_blocking(move || {
                    let _permit = permit;
                    process_document(&extractor, &file.filename, &file.data)
                });

                match timeout(document_timeout, task).await {
                    Ok(Ok(entry)) => entry,
                    Ok(Err(join_error)) => {
                        tracing::error!("Worker for '{}' failed: {}", filename, join_error);
                        let error = DocumentError::Internal(join_error.to_string());
                        entry(&filename, DocumentOutcome::from_error(error))
                    }
                    Err(_) => {
                        tracing::error!(
                            "TIMEOUT outlining '{}' (limit: {:.1}s)",
                            filename,
                            document_timeout.as_secs_f64()
                        );
                        entry(
                            &filename,
                            DocumentOutcome::from_error(DocumentError::Timeout {
                                secs: document_timeout.as_secs(),
                            }),
                        )
                    }
                }
            }
        });

        let entries = join_all(tasks).await;

        tracing::info!(
            "Processed {} documents ({} ok) in {}ms",
            total,
            entries.iter().filter(|e| e.is_ok()).count(),
            start.elapsed().as_millis()
        );

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicsConfig;
    use crate::extraction::SentenceDetector;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ARTICLE: &str =
        "Overview\nThis is a simple test sentence with enough words to qualify as a point. Short.";

    struct PanickingDetector;

    impl SentenceDetector for PanickingDetector {
        fn sentences<'a>(&'a self, _paragraph: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
            panic!("detector exploded");
        }
    }

    struct SlowDetector;

    impl SentenceDetector for SlowDetector {
        fn sentences<'a>(&'a self, paragraph: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
            std::thread::sleep(Duration::from_millis(500));
            Box::new(std::iter::once(paragraph))
        }
    }

    /// Records the highest number of simultaneous calls
    #[derive(Default)]
    struct CountingDetector {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl SentenceDetector for CountingDetector {
        fn sentences<'a>(&'a self, paragraph: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(150));
            self.active.fetch_sub(1, Ordering::SeqCst);
            Box::new(std::iter::once(paragraph))
        }
    }

    fn processor() -> BatchProcessor {
        BatchProcessor::new(
            Arc::new(OutlineExtractor::default()),
            &ProcessingConfig::default(),
        )
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_document(b"\xef\xbb\xbfHello").unwrap(), "Hello");
        assert!(matches!(decode_document(b"\xff\xfe"), Err(DocumentError::Decode(_))));
    }

    #[test]
    fn test_process_document_success() {
        let entry = process_document(&OutlineExtractor::default(), "zion.txt", ARTICLE.as_bytes());
        assert_eq!(entry.title, "zion");
        let outline = entry.outline().unwrap();
        assert_eq!(outline.sections()[0].header(), "Overview");
    }

    #[test]
    fn test_process_document_empty_content() {
        let entry = process_document(&OutlineExtractor::default(), "title.txt", b"Title Only");
        assert_eq!(entry.error(), Some(&DocumentError::NoMeaningfulContent));
    }

    #[test]
    fn test_panic_becomes_internal_error() {
        let extractor =
            OutlineExtractor::new(&HeuristicsConfig::default(), Arc::new(PanickingDetector));
        let entry = process_document(&extractor, "boom.txt", ARTICLE.as_bytes());
        match entry.error() {
            Some(DocumentError::Internal(msg)) => assert!(msg.contains("detector exploded")),
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_isolates_failures() {
        let files = vec![
            UploadedFile::new("first.txt", ARTICLE),
            UploadedFile::new("broken.txt", vec![0x48u8, 0xff, 0x49]),
            UploadedFile::new("empty.txt", "Title Only"),
        ];

        let entries = processor().process(files).await;
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["first.txt", "broken.txt", "empty.txt"]);

        assert!(entries[0].is_ok());
        assert_eq!(entries[1].error().map(DocumentError::kind), Some("decode_error"));
        assert_eq!(
            entries[2].error().map(DocumentError::kind),
            Some("no_meaningful_content")
        );
    }

    #[tokio::test]
    async fn test_batch_timeout_is_per_document() {
        let extractor = OutlineExtractor::new(&HeuristicsConfig::default(), Arc::new(SlowDetector));
        let processor = BatchProcessor::new(Arc::new(extractor), &ProcessingConfig::default())
            .with_timeout(Duration::from_millis(50));

        let entries = processor
            .process(vec![
                UploadedFile::new("slow.txt", ARTICLE),
                UploadedFile::new("bad.txt", vec![0xffu8]),
            ])
            .await;

        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].error(), Some(DocumentError::Timeout { .. })));
        assert_eq!(entries[1].error().map(DocumentError::kind), Some("decode_error"));
    }

    #[tokio::test]
    async fn test_timed_out_documents_keep_their_slot() {
        let detector = Arc::new(CountingDetector::default());
        let extractor = OutlineExtractor::new(&HeuristicsConfig::default(), detector.clone());
        let config = ProcessingConfig {
            parallel_documents: Some(1),
            ..ProcessingConfig::default()
        };
        let processor = BatchProcessor::new(Arc::new(extractor), &config)
            .with_timeout(Duration::from_millis(20));

        let files = (0..3)
            .map(|i| UploadedFile::new(format!("doc{}.txt", i), ARTICLE))
            .collect();
        let entries = processor.process(files).await;

        assert_eq!(entries.len(), 3);
        assert!(entries
            .iter()
            .all(|e| matches!(e.error(), Some(DocumentError::Timeout { .. }))));
        assert_eq!(detector.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        assert!(processor().process(Vec::new()).await.is_empty());
    }
}
