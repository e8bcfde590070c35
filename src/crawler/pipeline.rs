//! Item pipelines
//!
//! Items flow through a pipeline after parsing; a pipeline may transform an
//! item or drop it by returning `None`.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::crawler::items::ScrapedItem;

/// Post-extraction processing stage for scraped items
pub trait ItemPipeline: Send {
    /// Called when a crawl starts
    fn open_spider(&mut self, spider_name: &str) {
        let _ = spider_name;
    }

    /// Called when a crawl finishes
    fn close_spider(&mut self, spider_name: &str) {
        let _ = spider_name;
    }

    /// Process one item; `None` drops it
    fn process_item(&mut self, item: ScrapedItem) -> Option<ScrapedItem>;
}

/// Default pipeline: stamps processing time, drops items missing a URL or
/// content, and keeps processed/dropped counts.
#[derive(Debug, Default)]
pub struct HarvestPipeline {
    items_processed: usize,
    items_dropped: usize,
}

impl HarvestPipeline {
    /// Create a pipeline with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Items that passed through this pipeline
    pub fn items_processed(&self) -> usize {
        self.items_processed
    }

    /// Items dropped for missing required fields
    pub fn items_dropped(&self) -> usize {
        self.items_dropped
    }
}

impl ItemPipeline for HarvestPipeline {
    fn open_spider(&mut self, spider_name: &str) {
        info!("Pipeline opened for spider: {}", spider_name);
        self.items_processed = 0;
        self.items_dropped = 0;
    }

    fn close_spider(&mut self, _spider_name: &str) {
        info!(
            "Pipeline closed: {} processed, {} dropped",
            self.items_processed, self.items_dropped
        );
    }

    fn process_item(&mut self, mut item: ScrapedItem) -> Option<ScrapedItem> {
        if item.url.is_empty() || item.content.is_empty() {
            self.items_dropped += 1;
            warn!("Dropped item missing required fields");
            return None;
        }

        item.processed_at = Some(Utc::now());
        self.items_processed += 1;
        debug!("Processed item from: {}", item.url);
        Some(item)
    }
}
