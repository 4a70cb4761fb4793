//! Sentence to point normalization

use crate::config::HeuristicsConfig;
use crate::types::Point;

/// Filler openers stripped from the start of a sentence, tried in order
pub const FILLER_PREFIXES: &[&str] = &["There are", "There is", "It is", "This is"];

/// Turns a sentence into a [`Point`], or rejects it as a fragment
#[derive(Debug, Clone)]
pub struct PointNormalizer {
    min_point_words: usize,
}

impl PointNormalizer {
    pub fn new(heuristics: &HeuristicsConfig) -> Self {
        Self {
            min_point_words: heuristics.min_point_words,
        }
    }

    /// Trim, drop one leading filler phrase, drop trailing periods and keep
    /// the result only if it has more than `min_point_words` words.
    pub fn normalize(&self, sentence: &str) -> Option<Point> {
        let text = strip_filler(sentence.trim());
        let text = text.trim_end_matches('.').trim_end();

        if text.split_whitespace().count() <= self.min_point_words {
            return None;
        }
        Some(Point::new(text.to_string()))
    }
}

impl Default for PointNormalizer {
    fn default() -> Self {
        Self::new(&HeuristicsConfig::default())
    }
}

/// Case-sensitive, anchored at the start and only on a word boundary, so
/// "This isn't" and "Items" are left alone.
fn strip_filler(sentence: &str) -> &str {
    for prefix in FILLER_PREFIXES {
        if let Some(rest) = sentence.strip_prefix(prefix) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    sentence
}
