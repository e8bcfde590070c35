//! Text cleaning and normalization
//!
//! Regex-based cleanup applied to harvested documents before classification
//! and extraction: HTML stripping, whitespace collapse, and removal of
//! characters outside the word/space/basic-punctuation set.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::document::Document;

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("html tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static SPECIAL_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?-]").expect("special chars regex"));

/// Remove HTML tags from text
pub fn remove_html_tags(text: &str) -> String {
    HTML_TAG_RE.replace_all(text, "").into_owned()
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Normalize text: strip HTML, collapse whitespace, drop special characters
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = remove_html_tags(text);
    let text = collapse_whitespace(&text);
    SPECIAL_CHARS_RE.replace_all(&text, "").into_owned()
}

/// Normalize a document's content in place
pub fn clean_document(document: &mut Document) {
    document.content = normalize_text(&document.content);
    debug!("Cleaned document: {} chars", document.content.len());
}
