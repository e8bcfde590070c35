//! Delta detection for identifying changed files
//!
//! Compares SHA-256 digests of files under a directory against a persisted
//! digest store, so harvest jobs only reprocess what changed since the last
//! run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::utils::error::Result;
use crate::utils::files::{file_digest, list_files};

/// Outcome of one directory scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeltaReport {
    /// Files not present in the digest store
    pub new: Vec<PathBuf>,
    /// Files whose digest changed
    pub modified: Vec<PathBuf>,
    /// Files whose digest matches the store
    pub unchanged: Vec<PathBuf>,
}

/// Detects changed files using a persisted digest store
#[derive(Debug)]
pub struct DeltaDetector {
    hash_file: PathBuf,
    hash_data: HashMap<String, String>,
}

impl DeltaDetector {
    /// Open a detector backed by `hash_file`. A missing store starts empty;
    /// an unreadable one is logged and starts empty too.
    pub fn new(hash_file: impl Into<PathBuf>) -> Self {
        let hash_file = hash_file.into();
        let hash_data = load_hash_data(&hash_file);
        Self {
            hash_file,
            hash_data,
        }
    }

    /// Scan a directory (optionally filtered by extension) and classify each
    /// file against the store, updating stored digests for new and modified
    /// files as it goes.
    pub fn scan_directory(&mut self, directory: &Path, extension: Option<&str>) -> DeltaReport {
        let mut report = DeltaReport::default();

        for path in list_files(directory, extension) {
            let key = path.to_string_lossy().into_owned();
            let digest = match file_digest(&path) {
                Ok(digest) => digest,
                Err(e) => {
                    error!("Error calculating digest for {}: {}", path.display(), e);
                    continue;
                }
            };

            match self.hash_data.get(&key) {
                None => {
                    self.hash_data.insert(key, digest);
                    report.new.push(path);
                }
                Some(previous) if *previous != digest => {
                    self.hash_data.insert(key, digest);
                    report.modified.push(path);
                }
                Some(_) => report.unchanged.push(path),
            }
        }

        info!(
            "Delta detection: {} new, {} modified, {} unchanged",
            report.new.len(),
            report.modified.len(),
            report.unchanged.len()
        );
        report
    }

    /// Persist the digest store, creating parent directories as needed.
    pub fn save_hashes(&self) -> Result<()> {
        if let Some(parent) = self.hash_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = std::fs::File::create(&self.hash_file)?;
        serde_json::to_writer_pretty(file, &self.hash_data)?;
        info!("Saved digests to {}", self.hash_file.display());
        Ok(())
    }

    /// Number of files tracked by the store
    pub fn tracked_files(&self) -> usize {
        self.hash_data.len()
    }
}

fn load_hash_data(hash_file: &Path) -> HashMap<String, String> {
    if !hash_file.exists() {
        return HashMap::new();
    }

    match std::fs::read_to_string(hash_file)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(data) => data,
        Err(e) => {
            error!("Invalid digest store {}: {}", hash_file.display(), e);
            HashMap::new()
        }
    }
}
