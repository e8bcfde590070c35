//! Document enrichment pipeline
//!
//! Enrichers run in registration order, each receiving the previous stage's
//! output.

use crate::core::document::Document;
use crate::utils::error::Result;

/// One enrichment stage
pub trait Enricher: Send + Sync {
    /// Stage name for logs
    fn name(&self) -> &str;

    /// Transform the document
    fn process(&self, document: Document) -> Result<Document>;
}

/// Chains enrichers over a document
#[derive(Default)]
pub struct EnrichmentPipeline {
    enrichers: Vec<Box<dyn Enricher>>,
}

impl EnrichmentPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    pub fn add_enricher(&mut self, enricher: Box<dyn Enricher>) {
        self.enrichers.push(enricher);
    }

    /// Number of registered stages
    pub fn len(&self) -> usize {
        self.enrichers.len()
    }

    /// Whether any stages are registered
    pub fn is_empty(&self) -> bool {
        self.enrichers.is_empty()
    }

    /// Run the document through every stage in order. A failing stage stops
    /// the chain and surfaces its error.
    pub fn enrich(&self, mut document: Document) -> Result<Document> {
        for enricher in &self.enrichers {
            document = enricher.process(document)?;
        }
        Ok(document)
    }
}
