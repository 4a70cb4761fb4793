//! Outline export helpers: titles and safe download filenames

use std::path::Path;

/// Suffix appended to exported outline files
pub const OUTLINE_SUFFIX: &str = "_outline.txt";

const FALLBACK_NAME: &str = "outline";

/// Title of an uploaded document: the filename without its extension
pub fn document_title(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
        .to_string()
}

/// Reduce `title` to a safe ASCII filename.
///
/// Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are trimmed.
pub fn sanitize_filename(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_sep = false;

    for c in title.chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            pending_sep = !out.is_empty();
            continue;
        }
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            if pending_sep {
                out.push('_');
                pending_sep = false;
            }
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Download filename for an outline: `{sanitized title}_outline.txt`
pub fn outline_filename(title: &str) -> String {
    format!("{}{}", sanitize_filename(title), OUTLINE_SUFFIX)
}
