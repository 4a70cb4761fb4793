//! Sentence boundary detection
//!
//! Boundaries come from the Unicode sentence rules (UAX #29), which already
//! handle decimals, quotations and closing punctuation. A language table of
//! abbreviations then rejoins pieces that were split after "Dr.", "e.g.",
//! "U.S." or a single-letter initial.

use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::iter::Peekable;
use std::path::Path;
use std::sync::Arc;
use unicode_segmentation::{USentenceBoundIndices, UnicodeSegmentation};

use crate::config::SentenceModelConfig;
use crate::error::{Error, Result};

/// Splits a paragraph into sentences
pub trait SentenceDetector: Send + Sync {
    /// Lazily yield the trimmed sentences of `paragraph`, in order
    fn sentences<'a>(&'a self, paragraph: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// Matched case-insensitively
const ENGLISH_ABBREVIATIONS: &[&str] = &[
    // titles
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "gov.", "sen.", "capt.",
    "col.", "lt.", "sgt.", "pres.",
    // latin and reference
    "e.g.", "i.e.", "vs.", "cf.", "al.", "viz.", "approx.", "ca.", "pp.", "dept.",
    // organisations and places
    "inc.", "ltd.", "corp.", "mt.", "ft.", "blvd.", "rd.", "u.s.", "u.k.", "u.n.", "e.u.",
    // months
    "jan.", "feb.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.", "dec.",
];

/// Spelled like ordinary words when lowercase, so matched exactly
const CASED_ABBREVIATIONS: &[&str] = &[
    "Rev.", "Gen.", "Rep.", "Hon.", "Ed.", "Eds.", "Est.", "Co.", "Bros.", "Ave.", "Mar.",
    "Fig.", "Figs.", "Vol.",
];

/// Only abbreviations when a number follows ("No. 5")
const NUMERAL_ABBREVIATIONS: &[&str] = &["No.", "Nos."];

/// Nouns that take a letter label ("Stop A", "Plan B"); a capital letter
/// after one of these is a label, not an initial
const LETTER_DESIGNATORS: &[&str] = &[
    "appendix", "area", "block", "building", "camp", "class", "exhibit", "gate", "grade",
    "group", "level", "loop", "lot", "option", "part", "phase", "plan", "platform", "route",
    "row", "section", "site", "stop", "team", "terminal", "trail", "type", "unit", "wing",
    "zone",
];

static SHARED_MODEL: OnceCell<Arc<SentenceModel>> = OnceCell::new();

/// Sentence boundary model: UAX #29 segmentation plus an abbreviation table
#[derive(Debug, Clone)]
pub struct SentenceModel {
    name: String,
    abbreviations: HashSet<String>,
    cased: HashSet<String>,
}

impl SentenceModel {
    /// Identifier of the built-in English model
    pub const DEFAULT_MODEL: &'static str = "english";

    /// The built-in English model
    pub fn english() -> Self {
        Self {
            name: Self::DEFAULT_MODEL.to_string(),
            abbreviations: ENGLISH_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
            cased: CASED_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Load the model named by `config`, extended with the optional
    /// abbreviations file
    pub fn load(config: &SentenceModelConfig) -> Result<Self> {
        let mut model = match config.model.to_lowercase().as_str() {
            "english" | "en" | "punkt-english" => Self::english(),
            other => {
                return Err(Error::model_load(format!(
                    "Unknown sentence model '{}' (available: english)",
                    other
                )))
            }
        };

        if let Some(path) = &config.abbreviations_path {
            let added = model.extend_from_file(path)?;
            tracing::info!(
                "Loaded {} extra abbreviations from {}",
                added,
                path.display()
            );
        }

        Ok(model)
    }

    /// Process-wide model, loaded on first call and shared afterwards.
    ///
    /// Later calls return the first instance regardless of `config`.
    pub fn shared(config: &SentenceModelConfig) -> Result<Arc<Self>> {
        SHARED_MODEL
            .get_or_try_init(|| {
                let model = Self::load(config)?;
                tracing::info!(
                    "Sentence model '{}' initialized ({} abbreviations)",
                    model.name,
                    model.abbreviation_count()
                );
                Ok(Arc::new(model))
            })
            .cloned()
    }

    fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::model_load(format!(
                "Failed to read abbreviations '{}': {}",
                path.display(),
                e
            ))
        })?;

        let before = self.abbreviations.len();
        for line in raw.lines() {
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let mut entry = entry.to_lowercase();
            if !entry.ends_with('.') {
                entry.push('.');
            }
            self.abbreviations.insert(entry);
        }
        Ok(self.abbreviations.len() - before)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation_count(&self) -> usize {
        self.abbreviations.len() + self.cased.len() + NUMERAL_ABBREVIATIONS.len()
    }

    /// Whether `token` (including its trailing period) is a known abbreviation
    /// or a single-letter initial such as "J."
    pub fn is_abbreviation(&self, token: &str) -> bool {
        let token = token.trim_start_matches(|c: char| !c.is_alphanumeric());
        let Some(stem) = token.strip_suffix('.') else {
            return false;
        };

        is_initial(stem)
            || self.cased.contains(token)
            || NUMERAL_ABBREVIATIONS.contains(&token)
            || self.abbreviations.contains(&token.to_lowercase())
    }

    /// Whether the boundary between `piece` and `next` falls after an
    /// abbreviation and should be removed
    fn joins(&self, piece: &str, next: &str) -> bool {
        let mut tokens = piece.split_whitespace().rev();
        let Some(last) = tokens.next() else {
            return false;
        };
        if !self.is_abbreviation(last) {
            return false;
        }

        let token = last.trim_start_matches(|c: char| !c.is_alphanumeric());
        if NUMERAL_ABBREVIATIONS.contains(&token) {
            return next.trim_start().starts_with(|c: char| c.is_ascii_digit());
        }

        let stem = token.trim_end_matches('.');
        if is_initial(stem) && !self.abbreviations.contains(&token.to_lowercase()) {
            let labelled = tokens
                .next()
                .map(|prev| prev.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
                .map_or(false, |prev| LETTER_DESIGNATORS.contains(&prev.as_str()));
            return !labelled;
        }

        true
    }

    /// Iterate the sentences of `paragraph`
    pub fn split<'m, 't>(&'m self, paragraph: &'t str) -> Sentences<'m, 't> {
        Sentences {
            model: self,
            text: paragraph,
            bounds: paragraph.split_sentence_bound_indices().peekable(),
        }
    }
}

/// A single uppercase letter other than "I", which usually ends a sentence
fn is_initial(stem: &str) -> bool {
    let mut chars = stem.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase() && c != 'I')
}

impl Default for SentenceModel {
    fn default() -> Self {
        Self::english()
    }
}

impl SentenceDetector for SentenceModel {
    fn sentences<'a>(&'a self, paragraph: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(self.split(paragraph))
    }
}

/// Lazy sentence iterator over one paragraph
pub struct Sentences<'m, 't> {
    model: &'m SentenceModel,
    text: &'t str,
    bounds: Peekable<USentenceBoundIndices<'t>>,
}

impl<'m, 't> Iterator for Sentences<'m, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        loop {
            let (start, piece) = self.bounds.next()?;
            let mut end = start + piece.len();

            // Rejoin pieces split after an abbreviation
            while let Some(&(next_start, next)) = self.bounds.peek() {
                if !self.model.joins(&self.text[start..end], next) {
                    break;
                }
                end = next_start + next.len();
                self.bounds.next();
            }

            let sentence = self.text[start..end].trim();
            if !sentence.is_empty() {
                return Some(sentence);
            }
        }
    }
}
