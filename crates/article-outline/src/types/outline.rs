//! Outline types: points, sections and intermediate line blocks

use serde::Serialize;
use std::fmt;

/// A normalized sentence kept as a bullet under a section.
///
/// Points are only created by [`crate::PointNormalizer`], which guarantees the
/// word count exceeds the configured minimum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Point(String);

impl Point {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    /// The point text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Point {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Point {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A header with its key points. `points` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineSection {
    header: String,
    points: Vec<Point>,
}

impl OutlineSection {
    /// Create a section; returns `None` when there are no points
    pub fn new(header: impl Into<String>, points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            header: header.into(),
            points,
        })
    }

    /// Header text, verbatim from the source line
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Points in source order
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Ordered sections of one document. Empty means nothing was extractable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Outline {
    sections: Vec<OutlineSection>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, section: OutlineSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[OutlineSection] {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OutlineSection> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of points across all sections
    pub fn point_count(&self) -> usize {
        self.sections.iter().map(|s| s.points.len()).sum()
    }

    /// Render as plain text: the header line, then one `-- point` line per
    /// point, with a blank line between sections.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&section.header);
            out.push('\n');
            for point in &section.points {
                out.push_str("-- ");
                out.push_str(point.as_str());
                out.push('\n');
            }
        }
        out
    }
}

impl FromIterator<OutlineSection> for Outline {
    fn from_iter<I: IntoIterator<Item = OutlineSection>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Outline {
    type Item = OutlineSection;
    type IntoIter = std::vec::IntoIter<OutlineSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a OutlineSection;
    type IntoIter = std::slice::Iter<'a, OutlineSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Classification of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Short label starting a new section
    Header,
    /// Sentence-bearing paragraph
    Body,
}

/// A classified, trimmed line of the cleaned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub kind: BlockKind,
    pub text: &'a str,
}

impl<'a> Block<'a> {
    pub fn header(text: &'a str) -> Self {
        Self {
            kind: BlockKind::Header,
            text,
        }
    }

    pub fn body(text: &'a str) -> Self {
        Self {
            kind: BlockKind::Body,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(text: &str) -> Point {
        Point::new(text.to_string())
    }

    #[test]
    fn test_section_requires_points() {
        assert!(OutlineSection::new("Title", Vec::new()).is_none());
        let section = OutlineSection::new("Title", vec![point("one two three four")]).unwrap();
        assert_eq!(section.header(), "Title");
        assert_eq!(section.points().len(), 1);
    }

    #[test]
    fn test_to_text_format() {
        let outline: Outline = vec![
            OutlineSection::new(
                "It's Dangerous",
                vec![
                    point("Narrow razor-thin paths ahead"),
                    point("Thousand-foot drop-offs on both sides"),
                ],
            )
            .unwrap(),
            OutlineSection::new("Getting There", vec![point("Shuttles run every ten minutes")])
                .unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            outline.to_text(),
            "It's Dangerous\n-- Narrow razor-thin paths ahead\n-- Thousand-foot drop-offs on both sides\n\nGetting There\n-- Shuttles run every ten minutes\n"
        );
        assert_eq!(outline.point_count(), 3);
    }

    #[test]
    fn test_empty_outline_renders_empty() {
        let outline = Outline::new();
        assert!(outline.is_empty());
        assert_eq!(outline.to_text(), "");
    }

    #[test]
    fn test_serializes_as_header_points_list() {
        let outline: Outline = std::iter::once(
            OutlineSection::new("Overview", vec![point("a simple test sentence here")]).unwrap(),
        )
        .collect();
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "header": "Overview", "points": ["a simple test sentence here"] }])
        );
    }
}
