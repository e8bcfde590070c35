//! Harvested document model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A harvested document flowing through cleaning, enrichment and
/// classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source URL the document was harvested from
    pub url: String,
    /// Document title, when known
    pub title: Option<String>,
    /// Text content
    pub content: String,
    /// Free-form metadata attached by pipeline stages
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// When the document entered the pipeline
    pub harvested_at: DateTime<Utc>,
}

impl Document {
    /// Create a document from a source URL and raw content
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            content: content.into(),
            metadata: HashMap::new(),
            harvested_at: Utc::now(),
        }
    }

    /// Attach a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
