//! Rule-based entity extraction
//!
//! Pattern extraction over harvested text: emails, URLs, dates, money
//! amounts, and capitalized name spans. Overlapping matches are resolved
//! earliest-first, then longest.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entity categories recognized by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    /// Email addresses
    Email,
    /// http(s) URLs
    Url,
    /// Calendar dates (ISO and written forms)
    Date,
    /// Currency amounts
    Money,
    /// Capitalized multi-word spans (people, organizations, places)
    Name,
}

impl EntityLabel {
    /// Stable string form used in grouped output and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Email => "EMAIL",
            EntityLabel::Url => "URL",
            EntityLabel::Date => "DATE",
            EntityLabel::Money => "MONEY",
            EntityLabel::Name => "NAME",
        }
    }
}

/// One extracted entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Matched text
    pub text: String,
    /// Entity category
    pub label: EntityLabel,
    /// Byte offset of the match start
    pub start: usize,
}

static PATTERNS: Lazy<Vec<(EntityLabel, Regex)>> = Lazy::new(|| {
    vec![
        (
            EntityLabel::Email,
            Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex"),
        ),
        (
            EntityLabel::Url,
            Regex::new(r"https?://[^\s<>{}|\\^`]+").expect("url regex"),
        ),
        (
            EntityLabel::Date,
            Regex::new(
                r"\b(\d{4}-\d{2}-\d{2}|(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4})\b",
            )
            .expect("date regex"),
        ),
        (
            EntityLabel::Money,
            Regex::new(r"[$€£]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|billion|[mMbB]n?))?")
                .expect("money regex"),
        ),
        (
            EntityLabel::Name,
            Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").expect("name regex"),
        ),
    ]
});

/// Extract named entities from text.
#[derive(Debug, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    /// Create an extractor
    pub fn new() -> Self {
        Self
    }

    /// All entities in `text`, ordered by position. Spans claimed by an
    /// earlier pattern in the table are not re-reported by later ones, so
    /// the host of a URL never doubles as a NAME match.
    pub fn extract_entities(&self, text: &str) -> Vec<Entity> {
        let mut entities: Vec<Entity> = Vec::new();
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        for (label, pattern) in PATTERNS.iter() {
            for found in pattern.find_iter(text) {
                let span = (found.start(), found.end());
                if claimed
                    .iter()
                    .any(|&(start, end)| span.0 < end && start < span.1)
                {
                    continue;
                }
                claimed.push(span);
                entities.push(Entity {
                    text: found.as_str().to_string(),
                    label: *label,
                    start: found.start(),
                });
            }
        }

        entities.sort_by_key(|e| e.start);
        entities
    }

    /// Entities grouped by label string.
    pub fn extract_entities_grouped(&self, text: &str) -> HashMap<String, Vec<String>> {
        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for entity in self.extract_entities(text) {
            grouped
                .entry(entity.label.as_str().to_string())
                .or_default()
                .push(entity.text);
        }
        grouped
    }

    /// Extract entities for each text in a batch.
    pub fn process_batch(&self, texts: &[String]) -> Vec<Vec<Entity>> {
        texts.iter().map(|t| self.extract_entities(t)).collect()
    }
}
