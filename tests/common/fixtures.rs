//! Test fixtures and data factories

use std::fs;
use std::path::Path;

/// Two-topic corpus for classifier tests; returns (texts, labels).
pub fn labeled_corpus(samples_per_class: usize) -> (Vec<String>, Vec<String>) {
    let mut texts = Vec::new();
    let mut labels = Vec::new();

    for i in 0..samples_per_class {
        texts.push(format!("rust compiler cargo crate borrow checker {}", i));
        labels.push("tech".to_string());
        texts.push(format!("flour yeast oven bake bread dough {}", i));
        labels.push("baking".to_string());
    }

    (texts, labels)
}

/// Write a set of (filename, content) pairs into `dir`.
pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}
