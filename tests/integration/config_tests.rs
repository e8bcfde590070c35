//! Configuration loading and validation tests

use dataharvest::config::Config;
use dataharvest::utils::error::HarvestError;

use crate::common::fixtures::write_files;

#[test]
fn test_full_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[(
            "harvest.yaml",
            r#"
processing:
  workers: 8
s3:
  bucket: harvest-staging
  region: eu-west-1
cache:
  ttl_secs: 600
crawler:
  concurrent_requests: 4
  download_delay_ms: 0
  obey_robots_txt: false
"#,
        )],
    );

    let config = Config::from_file(dir.path().join("harvest.yaml")).unwrap();
    assert_eq!(config.processing().workers, Some(8));
    assert_eq!(config.s3().bucket, "harvest-staging");
    assert_eq!(config.s3().region, "eu-west-1");
    assert_eq!(config.cache().ttl_secs, 600);
    assert_eq!(config.crawler().concurrent_requests, 4);
    assert!(!config.crawler().obey_robots_txt);
}

#[test]
fn test_empty_sections_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("harvest.yaml", "{}\n")]);

    let config = Config::from_file(dir.path().join("harvest.yaml")).unwrap();
    assert_eq!(config.processing().workers, None);
    assert_eq!(config.s3().bucket, "dataharvest-bucket");
    assert_eq!(config.crawler().download_delay_ms, 1000);
}

#[test]
fn test_invalid_yaml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("harvest.yaml", "processing: [broken\n")]);

    let err = Config::from_file(dir.path().join("harvest.yaml")).unwrap_err();
    assert!(matches!(err, HarvestError::Config(_)));
}

#[test]
fn test_empty_bucket_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[("harvest.yaml", "s3:\n  bucket: '  '\n")]);

    let err = Config::from_file(dir.path().join("harvest.yaml")).unwrap_err();
    assert!(matches!(err, HarvestError::Config(_)));
}

#[test]
fn test_zero_concurrent_requests_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[("harvest.yaml", "crawler:\n  concurrent_requests: 0\n")],
    );

    let err = Config::from_file(dir.path().join("harvest.yaml")).unwrap_err();
    assert!(matches!(err, HarvestError::Config(_)));
}
