//! Configuration management for dataharvest
//!
//! Loads the harvest configuration from YAML, overlays AWS settings from the
//! environment (including a `.env` file), validates the result, and holds
//! any plugin configurations loaded alongside it.

pub mod models;

pub use models::{CacheConfig, CrawlerConfig, HarvestConfig, ProcessingConfig, S3Config};

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::utils::error::{HarvestError, Result};

const REQUIRED_ENV_VARS: &[&str] = &["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"];

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Harvest configuration sections
    pub harvest: HarvestConfig,
    plugins: HashMap<String, serde_yaml::Value>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            HarvestError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let harvest: HarvestConfig = serde_yaml::from_str(&content)
            .map_err(|e| HarvestError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self {
            harvest,
            plugins: HashMap::new(),
        };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from environment variables, loading `.env` first
    /// when present. Missing AWS credentials produce a warning, not an
    /// error, matching how harvest jobs run against instance roles.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let _ = dotenvy::dotenv();

        let missing: Vec<&str> = REQUIRED_ENV_VARS
            .iter()
            .filter(|var| std::env::var(var).is_err())
            .copied()
            .collect();
        if !missing.is_empty() {
            warn!("Missing environment variables: {:?}", missing);
        }

        let mut harvest = HarvestConfig::default();
        if let Ok(bucket) = std::env::var("AWS_S3_BUCKET") {
            harvest.s3.bucket = bucket;
        }
        if let Ok(region) = std::env::var("AWS_REGION") {
            harvest.s3.region = region;
        }

        let config = Self {
            harvest,
            plugins: HashMap::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a plugin configuration from YAML and register it by name
    pub fn load_plugin_config(&mut self, plugin_name: &str, config_path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            HarvestError::Plugin(format!(
                "Failed to read plugin config {}: {}",
                config_path.display(),
                e
            ))
        })?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| HarvestError::Plugin(format!("Invalid plugin config: {}", e)))?;

        self.plugins.insert(plugin_name.to_string(), value);
        Ok(())
    }

    /// Registered plugin configuration by name
    pub fn plugin_config(&self, plugin_name: &str) -> Option<&serde_yaml::Value> {
        self.plugins.get(plugin_name)
    }

    /// Batch processing settings
    pub fn processing(&self) -> &ProcessingConfig {
        &self.harvest.processing
    }

    /// S3 settings
    pub fn s3(&self) -> &S3Config {
        &self.harvest.s3
    }

    /// Cache settings
    pub fn cache(&self) -> &CacheConfig {
        &self.harvest.cache
    }

    /// Crawler settings
    pub fn crawler(&self) -> &CrawlerConfig {
        &self.harvest.crawler
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if let Some(workers) = self.harvest.processing.workers {
            if workers == 0 {
                return Err(HarvestError::Config(
                    "processing.workers must be at least 1".to_string(),
                ));
            }
        }
        if self.harvest.s3.bucket.trim().is_empty() {
            return Err(HarvestError::Config("s3.bucket cannot be empty".to_string()));
        }
        if self.harvest.crawler.concurrent_requests == 0 {
            return Err(HarvestError::Config(
                "crawler.concurrent_requests must be at least 1".to_string(),
            ));
        }
        if self.harvest.cache.ttl_secs == 0 {
            return Err(HarvestError::Config(
                "cache.ttl_secs must be at least 1".to_string(),
            ));
        }

        debug!("Configuration validation completed");
        Ok(())
    }
}
