//! Aggregation integration tests

use dataharvest::core::aggregate::DataAggregator;
use serde_json::json;

use crate::common::fixtures::write_files;

#[test]
fn test_directory_aggregation_is_recursive() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            ("batch1/items.json", r#"[{"id": 1}, {"id": 2}]"#),
            ("batch2/nested/single.json", r#"{"id": 3}"#),
            ("ignored.txt", "not json"),
        ],
    );

    let aggregator = DataAggregator::new();
    let records = aggregator.aggregate_directory(dir.path());
    assert_eq!(records.len(), 3);
}

#[test]
fn test_bad_files_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            ("good.json", r#"[{"id": 1}]"#),
            ("bad.json", "{{{{"),
        ],
    );

    let aggregator = DataAggregator::new();
    let records = aggregator.aggregate_directory(dir.path());
    assert_eq!(records.len(), 1);
}

#[test]
fn test_aggregate_then_merge() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[("docs.json", r#"[{"id": 1, "title": "a"}, {"id": 2, "title": "b"}]"#)],
    );

    let aggregator = DataAggregator::new();
    let docs = aggregator.aggregate_directory(dir.path());
    let scores = vec![json!({"id": 1, "score": 0.5})];

    let merged = aggregator.merge_records(docs, scores, "id").unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0]["score"], json!(0.5));
    assert!(merged[1].get("score").is_none());
}
