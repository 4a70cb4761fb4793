//! Line segmentation into header and body blocks

use crate::config::HeuristicsConfig;
use crate::types::{Block, BlockKind};

/// Classifies trimmed lines as headers (short labels) or body paragraphs.
///
/// Classification looks only at word count and character length, so the same
/// line always gets the same kind wherever it appears.
#[derive(Debug, Clone)]
pub struct BlockSegmenter {
    max_header_words: usize,
    max_header_chars: usize,
    min_line_chars: usize,
}

impl BlockSegmenter {
    pub fn new(heuristics: &HeuristicsConfig) -> Self {
        Self {
            max_header_words: heuristics.max_header_words,
            max_header_chars: heuristics.max_header_chars,
            min_line_chars: heuristics.min_line_chars,
        }
    }

    /// Header iff at most `max_header_words` words AND strictly fewer than
    /// `max_header_chars` characters.
    pub fn is_header(&self, line: &str) -> bool {
        line.split_whitespace().count() <= self.max_header_words
            && line.chars().count() < self.max_header_chars
    }

    pub fn classify(&self, line: &str) -> BlockKind {
        if self.is_header(line) {
            BlockKind::Header
        } else {
            BlockKind::Body
        }
    }

    /// Classify one raw line; `None` for blank lines and residue.
    ///
    /// Headers are classified before the length check, so a short label such
    /// as "Overview" survives `min_line_chars`. With the default thresholds a
    /// body line has at least six words and therefore at least eleven
    /// characters, so the length check only bites when the header thresholds
    /// are tightened.
    pub fn block<'a>(&self, line: &'a str) -> Option<Block<'a>> {
        let line = line.trim();
        if line.is_empty() || !line.chars().any(char::is_alphanumeric) {
            return None;
        }

        match self.classify(line) {
            BlockKind::Header => Some(Block::header(line)),
            BlockKind::Body if line.chars().count() < self.min_line_chars => None,
            BlockKind::Body => Some(Block::body(line)),
        }
    }

    /// Lazily segment cleaned text, one block per retained line
    pub fn segment<'a>(&'a self, cleaned: &'a str) -> impl Iterator<Item = Block<'a>> + 'a {
        cleaned.lines().filter_map(move |line| self.block(line))
    }
}

impl Default for BlockSegmenter {
    fn default() -> Self {
        Self::new(&HeuristicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_is_header() {
        let seg = BlockSegmenter::default();
        assert!(seg.is_header("Overview"));
        assert!(seg.is_header("It's Dangerous"));
        assert!(!seg.is_header("The narrow paths have thousand-foot drop-offs on both sides."));
    }

    #[test]
    fn test_word_and_char_limits_both_apply() {
        let seg = BlockSegmenter::default();
        // 5 words, 49 characters
        let five_words = "Aaaaaaaaaa Bbbbbbbbbb Cccccccccc Dddddddddd Eeeee";
        assert_eq!(five_words.chars().count(), 49);
        assert!(seg.is_header(five_words));

        // 5 words, exactly 50 characters
        let fifty = "Aaaaaaaaaa Bbbbbbbbbb Cccccccccc Dddddddddd Eeeeee";
        assert_eq!(fifty.chars().count(), 50);
        assert!(!seg.is_header(fifty));

        // 6 short words
        assert!(!seg.is_header("one two three four five six"));
    }

    #[test]
    fn test_segment_skips_blank_and_symbol_lines() {
        let seg = BlockSegmenter::default();
        let text = "Overview\n\n   \n|\n---\nThis is a body paragraph with more than five words.\n";
        let blocks: Vec<_> = seg.segment(text).collect();
        assert_eq!(
            blocks,
            vec![
                Block::header("Overview"),
                Block::body("This is a body paragraph with more than five words."),
            ]
        );
    }

    #[test]
    fn test_short_body_lines_skipped_with_tight_header_limits() {
        let seg = BlockSegmenter::new(&HeuristicsConfig {
            max_header_words: 1,
            ..HeuristicsConfig::default()
        });
        assert_eq!(seg.block("Go up now"), None);
        assert_eq!(seg.block("Overview"), Some(Block::header("Overview")));
        assert_eq!(
            seg.block("Go up now and rest"),
            Some(Block::body("Go up now and rest"))
        );
    }

    #[test]
    fn test_lines_are_trimmed() {
        let seg = BlockSegmenter::default();
        let blocks: Vec<_> = seg.segment("   Getting There  \r\n").collect();
        assert_eq!(blocks, vec![Block::header("Getting There")]);
    }

    #[test]
    fn test_custom_thresholds() {
        let heuristics = HeuristicsConfig {
            max_header_words: 2,
            max_header_chars: 20,
            min_line_chars: 30,
            min_point_words: 3,
        };
        let seg = BlockSegmenter::new(&heuristics);
        assert_eq!(seg.classify("Two words"), BlockKind::Header);
        assert_eq!(seg.classify("Now three words"), BlockKind::Body);
        // body shorter than min_line_chars is dropped
        assert_eq!(seg.block("Now three words"), None);
    }
}
