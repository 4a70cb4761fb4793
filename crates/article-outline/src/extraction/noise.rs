//! Boilerplate removal
//!
//! A closed catalog of independent, case-insensitive rules for text that
//! pollutes scraped or pasted articles: ad markers, social calls-to-action,
//! newsletter prompts, navigation labels and legal footers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// A single denylist rule
#[derive(Debug)]
pub struct NoiseRule {
    /// Rule name, for logging
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl NoiseRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap_or_else(|e| panic!("noise rule '{}': {}", name, e)),
            replacement: "",
        }
    }

    /// A rule anchored at a sentence start; the preceding terminator, captured
    /// as group 1, is kept
    fn sentence(name: &'static str, body: &str) -> Self {
        Self {
            replacement: "${1}",
            ..Self::new(name, &format!(r"(?im)(^|[.!?])[ \t]*{}", body))
        }
    }

    /// Remove every match of this rule
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, self.replacement)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

const PLATFORMS: &str = r"(?:facebook|twitter|instagram|linkedin|pinterest)";

/// Standalone labels: ad markers, newsletter prompts and legal footers
const LABELS: &str = r"(?:advertisement|sponsored[ \t]+(?:content|post)|paid[ \t]+partnership|ad[ \t]*choices|newsletter[ \t]+sign[- ]?up|terms[ \t]+(?:of|and)[ \t]+(?:use|service|conditions)|privacy[ \t]+policy|cookie[ \t]+policy|all[ \t]+rights[ \t]+reserved)";

const SEPARATORS: &str = r"[ \t\r.:|/·•>\-]*";

// Every rule removes whole lines or whole trailing sentences, never a
// fragment of prose.
static RULES: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    vec![
        NoiseRule::sentence(
            "social",
            &format!(
                r"(?:follow|like|share|tweet|pin)\b(?:[ \t]+(?:us|me|them|this(?:[ \t]+\w+)?|(?:our|my)[ \t]+\w+))?[ \t]+(?:on|at|via|to)[ \t]+(?:(?:our|your)[ \t]+)?{}\b[^\n.!?]*[.!?]*",
                PLATFORMS
            ),
        ),
        NoiseRule::sentence(
            "newsletter",
            r"(?:sign[ \t]+up|subscribe)\b[^\n.!?]*?\bnewsletters?\b[^\n.!?]*[.!?]*",
        ),
        NoiseRule::sentence("labels", &format!(r"(?:{}\b{})+$", LABELS, SEPARATORS)),
        NoiseRule::new(
            "navigation",
            r"(?im)^[ \t]*(?:(?:menu|home|about(?:[ \t]+us)?|contact(?:[ \t]+us)?|search)\b[ \t\r|/·•>\-]*)+$",
        ),
        NoiseRule::new(
            "copyright_line",
            r"(?im)^[ \t]*(?:©|\(c\)|copyright\b)[^\n]*$",
        ),
        NoiseRule::sentence(
            "copyright",
            r"(?:©|\(c\)|\bcopyright\b)(?:[ \t]*(?:©|\(c\)))?[ \t]*\d{4}(?:[ \t]*[-–][ \t]*\d{4})?[^\n.]*\.?",
        ),
    ]
});

/// Removes boilerplate by applying the rule catalog to a fixed point
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseFilter;

impl NoiseFilter {
    pub fn new() -> Self {
        Self
    }

    /// The rule catalog
    pub fn rules(&self) -> &'static [NoiseRule] {
        &RULES
    }

    /// Strip all boilerplate from `raw`.
    ///
    /// Rules are reapplied until nothing matches, so a removal can never leave
    /// behind a new match and `filter(filter(x)) == filter(x)`.
    pub fn filter(&self, raw: &str) -> String {
        let mut current = raw.to_string();
        loop {
            let next = self.filter_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn filter_once(&self, text: &str) -> String {
        let mut text = text.to_string();
        for rule in self.rules() {
            let replaced = match rule.apply(&text) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            tracing::trace!("noise rule '{}' matched", rule.name);
            text = replaced;
        }
        text
    }
}
