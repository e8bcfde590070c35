//! Error handling for dataharvest
//!
//! This module defines all error types used throughout the toolkit.

use thiserror::Error;

/// Result type alias for dataharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Main error type for the toolkit
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A worker-side failure during batch execution. Carries the index of the
    /// failing item and the original cause; no partial results accompany it.
    #[error("Batch execution failed at item {index}: {source}")]
    BatchExecution {
        /// Zero-based index of the item whose invocation failed
        index: usize,
        /// The original worker-side failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested object or file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Classifier and training pipeline errors
    #[error("Model error: {0}")]
    Model(String),

    /// Crawler errors
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Plugin loading errors
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl HarvestError {
    /// Whether this error is a worker-side batch failure
    pub fn is_batch_execution(&self) -> bool {
        matches!(self, HarvestError::BatchExecution { .. })
    }

    /// Failing item index for batch execution errors
    pub fn failing_index(&self) -> Option<usize> {
        match self {
            HarvestError::BatchExecution { index, .. } => Some(*index),
            _ => None,
        }
    }
}
