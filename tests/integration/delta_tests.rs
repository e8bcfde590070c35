//! Delta detection integration tests

use std::fs;

use dataharvest::storage::DeltaDetector;

use crate::common::fixtures::write_files;

#[test]
fn test_detects_changes_across_runs() {
    let data_dir = tempfile::tempdir().unwrap();
    let store_dir = tempfile::tempdir().unwrap();
    let store = store_dir.path().join("hashes.json");

    write_files(
        data_dir.path(),
        &[
            ("reports/january.txt", "q1 numbers"),
            ("reports/february.txt", "q1 numbers continued"),
            ("notes.txt", "scratch"),
        ],
    );

    // First run: everything is new.
    let mut detector = DeltaDetector::new(&store);
    let report = detector.scan_directory(data_dir.path(), Some("txt"));
    assert_eq!(report.new.len(), 3);
    detector.save_hashes().unwrap();
    assert!(store.exists());

    // Second run with one modification and one addition.
    fs::write(data_dir.path().join("notes.txt"), "rewritten scratch").unwrap();
    write_files(data_dir.path(), &[("reports/march.txt", "q2 kickoff")]);

    let mut detector = DeltaDetector::new(&store);
    let report = detector.scan_directory(data_dir.path(), Some("txt"));

    assert_eq!(report.new, vec![data_dir.path().join("reports/march.txt")]);
    assert_eq!(report.modified, vec![data_dir.path().join("notes.txt")]);
    assert_eq!(report.unchanged.len(), 2);
}

#[test]
fn test_unsaved_scan_does_not_persist() {
    let data_dir = tempfile::tempdir().unwrap();
    let store_dir = tempfile::tempdir().unwrap();
    let store = store_dir.path().join("hashes.json");
    write_files(data_dir.path(), &[("a.txt", "content")]);

    let mut detector = DeltaDetector::new(&store);
    detector.scan_directory(data_dir.path(), None);
    drop(detector);

    // Digests were never saved, so the next run sees the file as new again.
    let mut detector = DeltaDetector::new(&store);
    let report = detector.scan_directory(data_dir.path(), None);
    assert_eq!(report.new.len(), 1);
}

#[test]
fn test_extension_filter_limits_scan() {
    let data_dir = tempfile::tempdir().unwrap();
    let store = data_dir.path().join("store").join("hashes.json");
    write_files(
        data_dir.path(),
        &[("keep.json", "{}"), ("skip.csv", "a,b")],
    );

    let mut detector = DeltaDetector::new(&store);
    let report = detector.scan_directory(data_dir.path(), Some("json"));
    assert_eq!(report.new.len(), 1);
    assert_eq!(detector.tracked_files(), 1);
}
