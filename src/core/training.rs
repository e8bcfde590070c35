//! Training pipeline for the document classifier
//!
//! Wraps [`DocumentClassifier`] with a deterministic train/test split,
//! held-out evaluation and k-fold cross-validation.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::core::classifier::DocumentClassifier;
use crate::utils::error::{HarvestError, Result};

const SPLIT_SEED: u64 = 42;

/// Pipeline for training and evaluating classifiers.
#[derive(Debug, Default)]
pub struct TrainingPipeline {
    classifier: DocumentClassifier,
    train_texts: Vec<String>,
    train_labels: Vec<String>,
    test_texts: Vec<String>,
    test_labels: Vec<String>,
}

/// Held-out evaluation results.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    /// Overall accuracy on the held-out set
    pub accuracy: f64,
    /// Per-label (precision, recall)
    pub per_label: HashMap<String, (f64, f64)>,
    /// Predictions aligned with the held-out set
    pub predictions: Vec<String>,
}

impl TrainingPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuffle (seeded, so splits are reproducible) and split the data,
    /// holding out `test_fraction` of it for evaluation.
    pub fn load_data(
        &mut self,
        texts: Vec<String>,
        labels: Vec<String>,
        test_fraction: f64,
    ) -> Result<()> {
        if texts.len() != labels.len() {
            return Err(HarvestError::Validation(format!(
                "got {} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(HarvestError::Validation(format!(
                "test fraction must be in [0, 1), got {}",
                test_fraction
            )));
        }

        let total = texts.len();
        let mut paired: Vec<(String, String)> = texts.into_iter().zip(labels).collect();
        let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
        paired.shuffle(&mut rng);

        let test_size = (total as f64 * test_fraction).round() as usize;
        let train_size = total - test_size;

        let test_split = paired.split_off(train_size);
        let (train_texts, train_labels): (Vec<String>, Vec<String>) =
            paired.into_iter().unzip();
        let (test_texts, test_labels): (Vec<String>, Vec<String>) =
            test_split.into_iter().unzip();
        self.train_texts = train_texts;
        self.train_labels = train_labels;
        self.test_texts = test_texts;
        self.test_labels = test_labels;

        info!("Loaded {} samples", total);
        info!(
            "Train: {}, Test: {}",
            self.train_texts.len(),
            self.test_texts.len()
        );
        Ok(())
    }

    /// Train the classifier on the training split.
    pub fn train(&mut self) -> Result<()> {
        if self.train_texts.is_empty() {
            return Err(HarvestError::Validation(
                "data not loaded; call load_data first".to_string(),
            ));
        }
        self.classifier.train(&self.train_texts, &self.train_labels)
    }

    /// Evaluate on the held-out split.
    pub fn evaluate(&self) -> Result<EvaluationReport> {
        if !self.classifier.is_trained() {
            return Err(HarvestError::Model("model not trained".to_string()));
        }
        if self.test_texts.is_empty() {
            return Err(HarvestError::Validation(
                "no held-out data to evaluate on".to_string(),
            ));
        }

        let predictions = self.classifier.predict(&self.test_texts)?;
        let accuracy = accuracy(&predictions, &self.test_labels);
        let per_label = per_label_metrics(&predictions, &self.test_labels);

        info!("Evaluation accuracy: {:.3}", accuracy);
        for (label, (precision, recall)) in &per_label {
            info!(
                "  {}: precision {:.3}, recall {:.3}",
                label, precision, recall
            );
        }

        Ok(EvaluationReport {
            accuracy,
            per_label,
            predictions,
        })
    }

    /// K-fold cross-validation over the training split; returns per-fold
    /// accuracies. Each fold trains a fresh classifier.
    pub fn cross_validate(&self, folds: usize) -> Result<Vec<f64>> {
        if self.train_texts.is_empty() {
            return Err(HarvestError::Validation("data not loaded".to_string()));
        }
        if folds < 2 || folds > self.train_texts.len() {
            return Err(HarvestError::Validation(format!(
                "fold count must be between 2 and {}, got {}",
                self.train_texts.len(),
                folds
            )));
        }

        let total = self.train_texts.len();
        let mut scores = Vec::with_capacity(folds);

        for fold in 0..folds {
            let start = fold * total / folds;
            let end = (fold + 1) * total / folds;

            let mut fold_train_texts = Vec::with_capacity(total - (end - start));
            let mut fold_train_labels = Vec::with_capacity(total - (end - start));
            for i in (0..total).filter(|i| *i < start || *i >= end) {
                fold_train_texts.push(self.train_texts[i].clone());
                fold_train_labels.push(self.train_labels[i].clone());
            }

            let mut fold_classifier = DocumentClassifier::new();
            fold_classifier.train(&fold_train_texts, &fold_train_labels)?;

            let held_out = &self.train_texts[start..end];
            let predictions = fold_classifier.predict(held_out)?;
            scores.push(accuracy(&predictions, &self.train_labels[start..end]));
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        info!("Cross-validation scores: {:?}", scores);
        info!("Mean accuracy: {:.3}", mean);
        Ok(scores)
    }

    /// Access the trained classifier (e.g. to save it).
    pub fn classifier(&self) -> &DocumentClassifier {
        &self.classifier
    }
}

fn accuracy(predictions: &[String], actual: &[String]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(actual)
        .filter(|(p, a)| p == a)
        .count();
    correct as f64 / predictions.len() as f64
}

fn per_label_metrics(
    predictions: &[String],
    actual: &[String],
) -> HashMap<String, (f64, f64)> {
    let mut true_pos: HashMap<&str, usize> = HashMap::new();
    let mut pred_count: HashMap<&str, usize> = HashMap::new();
    let mut actual_count: HashMap<&str, usize> = HashMap::new();

    for (pred, act) in predictions.iter().zip(actual) {
        *pred_count.entry(pred).or_insert(0) += 1;
        *actual_count.entry(act).or_insert(0) += 1;
        if pred == act {
            *true_pos.entry(pred).or_insert(0) += 1;
        }
    }

    actual_count
        .keys()
        .map(|&label| {
            let tp = true_pos.get(label).copied().unwrap_or(0) as f64;
            let precision = match pred_count.get(label) {
                Some(&p) if p > 0 => tp / p as f64,
                _ => 0.0,
            };
            let recall = tp / actual_count[label] as f64;
            (label.to_string(), (precision, recall))
        })
        .collect()
}
