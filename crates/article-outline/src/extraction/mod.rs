//! Outline extraction pipeline
//!
//! ```text
//! raw text ─► NoiseFilter ─► BlockSegmenter ─► SentenceDetector ─► PointNormalizer ─► Outline
//! ```
//!
//! Data only flows forward. The only shared state is the sentence model,
//! which is immutable once loaded and injected as `Arc<dyn SentenceDetector>`.

mod noise;
mod normalizer;
mod segmenter;
mod sentence;

pub use noise::{NoiseFilter, NoiseRule};
pub use normalizer::{PointNormalizer, FILLER_PREFIXES};
pub use segmenter::BlockSegmenter;
pub use sentence::{SentenceDetector, SentenceModel, Sentences};

use std::sync::Arc;

use crate::config::{HeuristicsConfig, OutlineConfig};
use crate::error::{DocumentError, Result};
use crate::types::{BlockKind, Outline, OutlineSection, Point};

/// Runs the full pipeline on one document
#[derive(Clone)]
pub struct OutlineExtractor {
    noise: NoiseFilter,
    segmenter: BlockSegmenter,
    normalizer: PointNormalizer,
    detector: Arc<dyn SentenceDetector>,
}

impl OutlineExtractor {
    /// Create an extractor around an already-loaded sentence detector
    pub fn new(heuristics: &HeuristicsConfig, detector: Arc<dyn SentenceDetector>) -> Self {
        Self {
            noise: NoiseFilter::new(),
            segmenter: BlockSegmenter::new(heuristics),
            normalizer: PointNormalizer::new(heuristics),
            detector,
        }
    }

    /// Create an extractor backed by the process-wide sentence model
    pub fn from_config(config: &OutlineConfig) -> Result<Self> {
        let model = SentenceModel::shared(&config.sentence_model)?;
        Ok(Self::new(&config.heuristics, model))
    }

    /// Extract the outline of `raw_text`. An empty outline means nothing in
    /// the document qualified.
    pub fn produce_outline(&self, raw_text: &str) -> Outline {
        let cleaned = self.noise.filter(raw_text);

        let mut builder = OutlineBuilder::default();
        for block in self.segmenter.segment(&cleaned) {
            match block.kind {
                BlockKind::Header => builder.start_section(block.text),
                BlockKind::Body => {
                    if !builder.has_section() {
                        tracing::trace!("dropping body line before first header");
                        continue;
                    }
                    for sentence in self.detector.sentences(block.text) {
                        if let Some(point) = self.normalizer.normalize(sentence) {
                            builder.push_point(point);
                        }
                    }
                }
            }
        }

        let outline = builder.finish();
        tracing::debug!(
            "Extracted {} sections, {} points",
            outline.len(),
            outline.point_count()
        );
        outline
    }

    /// Like [`produce_outline`](Self::produce_outline), but an empty outline
    /// is reported as [`DocumentError::NoMeaningfulContent`].
    pub fn extract(&self, raw_text: &str) -> std::result::Result<Outline, DocumentError> {
        let outline = self.produce_outline(raw_text);
        if outline.is_empty() {
            return Err(DocumentError::NoMeaningfulContent);
        }
        Ok(outline)
    }
}

impl Default for OutlineExtractor {
    /// Default thresholds with a private English model
    fn default() -> Self {
        Self::new(
            &HeuristicsConfig::default(),
            Arc::new(SentenceModel::english()),
        )
    }
}

impl std::fmt::Debug for OutlineExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineExtractor")
            .field("segmenter", &self.segmenter)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

/// Accumulates header/points pairs. A header is only emitted once it has at
/// least one point.
#[derive(Default)]
struct OutlineBuilder {
    outline: Outline,
    current: Option<(String, Vec<Point>)>,
}

impl OutlineBuilder {
    fn has_section(&self) -> bool {
        self.current.is_some()
    }

    fn start_section(&mut self, header: &str) {
        self.close_section();
        self.current = Some((header.to_string(), Vec::new()));
    }

    fn push_point(&mut self, point: Point) {
        if let Some((_, points)) = self.current.as_mut() {
            points.push(point);
        }
    }

    fn close_section(&mut self) {
        if let Some((header, points)) = self.current.take() {
            match OutlineSection::new(header, points) {
                Some(section) => self.outline.push(section),
                None => tracing::trace!("dropping header without points"),
            }
        }
    }

    fn finish(mut self) -> Outline {
        self.close_section();
        self.outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on " | " so tests control sentence boundaries exactly
    struct PipeDetector;

    impl SentenceDetector for PipeDetector {
        fn sentences<'a>(&'a self, paragraph: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
            Box::new(paragraph.split(" | "))
        }
    }

    fn stub_extractor() -> OutlineExtractor {
        OutlineExtractor::new(&HeuristicsConfig::default(), Arc::new(PipeDetector))
    }

    #[test]
    fn test_uses_injected_detector() {
        let outline = stub_extractor().produce_outline(
            "Overview\nfirst point has five words | second point also has five",
        );
        assert_eq!(outline.len(), 1);
        let points: Vec<_> = outline.sections()[0].points().iter().map(Point::as_str).collect();
        assert_eq!(
            points,
            vec!["first point has five words", "second point also has five"]
        );
    }

    #[test]
    fn test_body_before_header_dropped() {
        let outline = OutlineExtractor::default().produce_outline(
            "This opening paragraph has no header above it at all.\nIntro\nThe first real section starts right here with content.",
        );
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.sections()[0].header(), "Intro");
    }

    #[test]
    fn test_header_without_points_is_dropped() {
        let outline = OutlineExtractor::default().produce_outline(
            "Empty Section\nReal Section\nThe real section has a sentence with plenty of words.\nTrailing Header",
        );
        let headers: Vec<_> = outline.iter().map(OutlineSection::header).collect();
        assert_eq!(headers, vec!["Real Section"]);
    }

    #[test]
    fn test_body_with_only_fragments_yields_no_section() {
        let result = OutlineExtractor::default()
            .extract("Heading Here\nToo short. Also tiny. Nope, not this!");
        assert_eq!(result, Err(DocumentError::NoMeaningfulContent));
    }

    #[test]
    fn test_multiple_paragraphs_accumulate_under_header() {
        let outline = OutlineExtractor::default().produce_outline(
            "Getting There\nThe shuttle leaves the visitor center every ten minutes.\n\nParking fills up before eight in the morning. Arrive early.",
        );
        assert_eq!(outline.len(), 1);
        let points: Vec<_> = outline.sections()[0].points().iter().map(Point::as_str).collect();
        assert_eq!(
            points,
            vec![
                "The shuttle leaves the visitor center every ten minutes",
                "Parking fills up before eight in the morning",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(OutlineExtractor::default().produce_outline("").is_empty());
        assert_eq!(
            OutlineExtractor::default().extract("   \n\n"),
            Err(DocumentError::NoMeaningfulContent)
        );
    }
}
