//! JSON record aggregation
//!
//! Combines harvested JSON artifacts from many files into flat record sets
//! and joins record sets on a shared key.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{error, info};

use crate::utils::error::{HarvestError, Result};
use crate::utils::files::list_files;

/// Aggregate and combine data from various sources.
#[derive(Debug, Default)]
pub struct DataAggregator;

impl DataAggregator {
    /// Create an aggregator
    pub fn new() -> Self {
        Self
    }

    /// Load records from multiple JSON files. Top-level arrays are
    /// flattened; any other top-level value becomes one record. Files that
    /// fail to read or parse are logged and skipped.
    pub fn load_json_files(&self, paths: &[impl AsRef<Path>]) -> Vec<Value> {
        let mut records = Vec::new();

        for path in paths {
            let path = path.as_ref();
            match std::fs::read_to_string(path)
                .map_err(HarvestError::from)
                .and_then(|content| Ok(serde_json::from_str::<Value>(&content)?))
            {
                Ok(Value::Array(items)) => records.extend(items),
                Ok(value) => records.push(value),
                Err(e) => error!("Error loading {}: {}", path.display(), e),
            }
        }

        info!("Loaded {} records from {} files", records.len(), paths.len());
        records
    }

    /// Aggregate every `.json` file under a directory, recursively.
    pub fn aggregate_directory(&self, directory: &Path) -> Vec<Value> {
        let paths = list_files(directory, Some("json"));
        self.load_json_files(&paths)
    }

    /// Join two record sets on a shared key: records from `right` are merged
    /// into records from `left` whose key value matches. Records without the
    /// key pass through untouched. Non-object records are rejected.
    pub fn merge_records(&self, left: Vec<Value>, right: Vec<Value>, key: &str) -> Result<Vec<Value>> {
        let mut right_by_key: HashMap<String, Value> = HashMap::new();
        for record in &right {
            let object = record.as_object().ok_or_else(|| {
                HarvestError::Validation("merge requires object records".to_string())
            })?;
            if let Some(value) = object.get(key) {
                right_by_key.insert(value.to_string(), record.clone());
            }
        }

        let mut merged = Vec::with_capacity(left.len());
        for record in left {
            let object = record.as_object().ok_or_else(|| {
                HarvestError::Validation("merge requires object records".to_string())
            })?;

            let matched = object
                .get(key)
                .and_then(|value| right_by_key.get(&value.to_string()));

            match matched {
                Some(Value::Object(extra)) => {
                    let mut combined = object.clone();
                    for (field, value) in extra {
                        combined.entry(field.clone()).or_insert_with(|| value.clone());
                    }
                    merged.push(Value::Object(combined));
                }
                _ => merged.push(record),
            }
        }

        info!("Merged {} records on key '{}'", merged.len(), key);
        Ok(merged)
    }
}
