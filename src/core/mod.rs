//! Core processing for dataharvest
//!
//! The parallel batch processor plus the document-processing stages it
//! fans work out to: cleaning, classification, extraction, enrichment and
//! aggregation.

pub mod aggregate;
pub mod classifier;
pub mod cleaner;
pub mod document;
pub mod enrich;
pub mod extractor;
pub mod processor;
pub mod training;

pub use aggregate::DataAggregator;
pub use classifier::DocumentClassifier;
pub use document::Document;
pub use enrich::{Enricher, EnrichmentPipeline};
pub use extractor::{Entity, EntityExtractor, EntityLabel};
pub use processor::ParallelBatchProcessor;
pub use training::{EvaluationReport, TrainingPipeline};
