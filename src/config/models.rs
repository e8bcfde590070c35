//! Configuration models
//!
//! Typed sections of the harvest configuration file. Every field carries a
//! serde default so a minimal YAML file stays minimal.

use serde::{Deserialize, Serialize};

/// Top-level configuration for a harvest job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Batch processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,
    /// S3 transfer settings
    #[serde(default)]
    pub s3: S3Config,
    /// Listing cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Crawler settings
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Batch processing settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Worker count override; defaults to the host's logical CPU count
    pub workers: Option<usize>,
}

/// S3 transfer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket name
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
        }
    }
}

/// Listing cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
        }
    }
}

/// Crawler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,
    /// Delay between requests in milliseconds; a non-zero delay makes
    /// fetches sequential
    #[serde(default = "default_download_delay")]
    pub download_delay_ms: u64,
    /// User-agent header for crawl requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whether to honor robots.txt disallow rules
    #[serde(default = "default_obey_robots")]
    pub obey_robots_txt: bool,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrent_requests: default_concurrent_requests(),
            download_delay_ms: default_download_delay(),
            user_agent: default_user_agent(),
            obey_robots_txt: default_obey_robots(),
            timeout_secs: default_request_timeout(),
        }
    }
}

fn default_bucket() -> String {
    "dataharvest-bucket".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_concurrent_requests() -> usize {
    16
}

fn default_download_delay() -> u64 {
    1000
}

fn default_user_agent() -> String {
    format!("dataharvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_obey_robots() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}
