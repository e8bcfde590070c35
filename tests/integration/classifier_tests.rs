//! Classifier and training pipeline integration tests

use dataharvest::core::classifier::DocumentClassifier;
use dataharvest::core::training::TrainingPipeline;
use dataharvest::utils::error::HarvestError;

use crate::common::fixtures::labeled_corpus;

#[test]
fn test_end_to_end_training_and_evaluation() {
    let (texts, labels) = labeled_corpus(20);
    let mut pipeline = TrainingPipeline::new();
    pipeline.load_data(texts, labels, 0.25).unwrap();
    pipeline.train().unwrap();

    let report = pipeline.evaluate().unwrap();
    assert!(report.accuracy > 0.8, "accuracy was {}", report.accuracy);
    assert!(report.per_label.contains_key("tech"));
    assert!(report.per_label.contains_key("baking"));
}

#[test]
fn test_cross_validation_scores_are_probabilities() {
    let (texts, labels) = labeled_corpus(15);
    let mut pipeline = TrainingPipeline::new();
    pipeline.load_data(texts, labels, 0.0).unwrap();

    let scores = pipeline.cross_validate(3).unwrap();
    assert_eq!(scores.len(), 3);
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
}

#[test]
fn test_saved_model_predicts_identically() {
    let (texts, labels) = labeled_corpus(10);
    let mut classifier = DocumentClassifier::new();
    classifier.train(&texts, &labels).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("classifier.json");
    classifier.save(&model_path).unwrap();

    let restored = DocumentClassifier::load(&model_path).unwrap();
    let inputs = vec![
        "cargo build pipeline".to_string(),
        "bread dough rising".to_string(),
    ];
    assert_eq!(
        classifier.predict(&inputs).unwrap(),
        restored.predict(&inputs).unwrap()
    );
}

#[test]
fn test_load_from_missing_path_fails() {
    let err = DocumentClassifier::load(std::path::Path::new("/nonexistent/model.json"))
        .unwrap_err();
    assert!(matches!(err, HarvestError::Io(_)));
}

#[test]
fn test_labels_are_sorted_and_deduplicated() {
    let (texts, labels) = labeled_corpus(5);
    let mut classifier = DocumentClassifier::new();
    classifier.train(&texts, &labels).unwrap();

    assert_eq!(classifier.labels().unwrap(), ["baking", "tech"]);
}
