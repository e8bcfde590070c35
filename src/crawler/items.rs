//! Scraped item model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scraped item produced by a spider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedItem {
    /// Item ID
    pub id: Uuid,
    /// Page the item came from
    pub url: String,
    /// Page title, when the spider found one
    pub title: Option<String>,
    /// Extracted content
    pub content: String,
    /// When the spider extracted the item
    pub extracted_at: DateTime<Utc>,
    /// When the item pipeline stamped it; `None` until processed
    pub processed_at: Option<DateTime<Utc>>,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ScrapedItem {
    /// Create an item from a source URL and content
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            title: None,
            content: content.into(),
            extracted_at: Utc::now(),
            processed_at: None,
            metadata: HashMap::new(),
        }
    }

    /// Attach a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
