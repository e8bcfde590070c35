//! # dataharvest
//!
//! ETL utility toolkit for document-harvesting pipelines: a parallel batch
//! processor, text cleaning, S3 transfer, a thin classification pipeline,
//! rule-based entity extraction, a crawler skeleton, JSON aggregation and
//! delta detection.
//!
//! ## Batch processing
//!
//! ```rust
//! use dataharvest::core::processor::ParallelBatchProcessor;
//!
//! let processor = ParallelBatchProcessor::with_workers(2)?;
//! let results = processor.process_batch(|x: i64| x * 2, vec![1, 2, 3, 4, 5])?;
//! assert_eq!(results, vec![2, 4, 6, 8, 10]);
//! # Ok::<(), dataharvest::HarvestError>(())
//! ```
//!
//! ## Cleaning and extraction
//!
//! ```rust
//! use dataharvest::core::cleaner::normalize_text;
//! use dataharvest::core::extractor::EntityExtractor;
//!
//! let text = normalize_text("<p>Contact   us</p>");
//! assert_eq!(text, "Contact us");
//!
//! let extractor = EntityExtractor::new();
//! let entities = extractor.extract_entities("mail ops@example.com today");
//! assert_eq!(entities.len(), 1);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod crawler;
pub mod plugins;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::cleaner;
pub use core::document::Document;
pub use core::processor::ParallelBatchProcessor;
pub use core::{
    DataAggregator, DocumentClassifier, Enricher, EnrichmentPipeline, Entity, EntityExtractor,
    EntityLabel, TrainingPipeline,
};
pub use crawler::{CrawlEngine, HarvestPipeline, PageSpider, ScrapedItem, Spider};
pub use plugins::{Plugin, PluginManifest, PluginRegistry};
pub use storage::{DeltaDetector, DeltaReport, ListingCache, S3Manager};
pub use utils::error::{HarvestError, Result};
