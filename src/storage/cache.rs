//! TTL cache for object listings
//!
//! Listing a large bucket prefix is slow and harvest jobs re-list the same
//! prefixes constantly; entries expire after the configured TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

const DEFAULT_TTL_SECS: u64 = 3600;

/// TTL-bounded cache keyed by listing prefix
#[derive(Debug, Clone)]
pub struct ListingCache {
    cache: Cache<String, Arc<Vec<String>>>,
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

impl ListingCache {
    /// Create a cache whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder().time_to_live(ttl).build(),
        }
    }

    /// Cached listing for `key`, if present and not expired
    pub fn get(&self, key: &str) -> Option<Arc<Vec<String>>> {
        self.cache.get(key)
    }

    /// Store a listing under `key`
    pub fn set(&self, key: impl Into<String>, value: Vec<String>) {
        self.cache.insert(key.into(), Arc::new(value));
    }

    /// Drop a cached listing
    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
    }
}
