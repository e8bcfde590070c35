//! File helpers: content digests and directory walks
//!
//! Digests feed delta detection; the walk helper backs both delta scans and
//! JSON aggregation.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::error;

use crate::utils::error::Result;

const DIGEST_CHUNK_SIZE: usize = 4096;

/// Calculate the SHA-256 digest of a file, reading in fixed-size chunks so
/// large artifacts never load fully into memory.
pub fn file_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; DIGEST_CHUNK_SIZE];

    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Recursively list regular files under `dir` with the given extension
/// (without the leading dot); `None` matches every file.
///
/// Unreadable subdirectories are logged and skipped rather than failing the
/// whole walk.
pub fn list_files(dir: &Path, extension: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(dir, extension, &mut found);
    found.sort();
    found
}

fn walk(dir: &Path, extension: Option<&str>, found: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Cannot read directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, extension, found);
        } else if matches_extension(&path, extension) {
            found.push(path);
        }
    }
}

fn matches_extension(path: &Path, extension: Option<&str>) -> bool {
    match extension {
        None => true,
        Some(ext) => path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext)),
    }
}
