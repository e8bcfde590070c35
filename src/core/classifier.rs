//! Document classification
//!
//! A thin classification pipeline: TF-IDF features over a multinomial
//! naive-Bayes model with additive smoothing. Trained models serialize to
//! JSON so a classifier trained in one job can be reloaded in another.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::utils::error::{HarvestError, Result};

const MAX_FEATURES: usize = 5000;
const SMOOTHING_ALPHA: f64 = 0.1;

/// Classify documents into categories.
#[derive(Debug, Default)]
pub struct DocumentClassifier {
    model: Option<TrainedModel>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TrainedModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    labels: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl DocumentClassifier {
    /// Create an untrained classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`train`](Self::train) or [`load`](Self::load) has run
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Train on parallel slices of texts and labels.
    pub fn train(&mut self, texts: &[String], labels: &[String]) -> Result<()> {
        if texts.is_empty() {
            return Err(HarvestError::Validation(
                "training set is empty".to_string(),
            ));
        }
        if texts.len() != labels.len() {
            return Err(HarvestError::Validation(format!(
                "got {} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }

        info!("Training classifier on {} documents...", texts.len());

        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
        let (vocabulary, idf) = fit_tfidf(&tokenized);

        let mut labels_sorted: Vec<String> = labels.to_vec();
        labels_sorted.sort();
        labels_sorted.dedup();
        let class_index: HashMap<&str, usize> = labels_sorted
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), i))
            .collect();

        let num_classes = labels_sorted.len();
        let num_terms = vocabulary.len();
        let mut class_counts = vec![0usize; num_classes];
        let mut feature_counts = vec![vec![0.0f64; num_terms]; num_classes];

        for (tokens, label) in tokenized.iter().zip(labels) {
            let class = class_index[label.as_str()];
            class_counts[class] += 1;
            for (term, weight) in tfidf_vector(tokens, &vocabulary, &idf) {
                feature_counts[class][term] += weight;
            }
        }

        let total_docs = texts.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&c| (c as f64 / total_docs).ln())
            .collect();

        let feature_log_prob = feature_counts
            .iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum::<f64>() + SMOOTHING_ALPHA * num_terms as f64;
                counts
                    .iter()
                    .map(|&c| ((c + SMOOTHING_ALPHA) / total).ln())
                    .collect()
            })
            .collect();

        self.model = Some(TrainedModel {
            vocabulary,
            idf,
            labels: labels_sorted,
            class_log_prior,
            feature_log_prob,
        });

        info!("Classifier training complete");
        Ok(())
    }

    /// Predict a label for each text.
    pub fn predict(&self, texts: &[String]) -> Result<Vec<String>> {
        let model = self.trained_model()?;
        Ok(texts
            .iter()
            .map(|text| {
                let scores = model.scores(text);
                let best = argmax(&scores);
                model.labels[best].clone()
            })
            .collect())
    }

    /// Predict per-label probabilities for each text, in the order returned
    /// by [`labels`](Self::labels).
    pub fn predict_proba(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        let model = self.trained_model()?;
        Ok(texts.iter().map(|text| softmax(&model.scores(text))).collect())
    }

    /// Label set learned during training, sorted.
    pub fn labels(&self) -> Result<&[String]> {
        Ok(&self.trained_model()?.labels)
    }

    /// Persist the trained model as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let model = self.trained_model()?;
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(file, model)?;
        info!("Model saved to {}", path.display());
        Ok(())
    }

    /// Load a previously saved model.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let model: TrainedModel = serde_json::from_reader(file)?;
        info!("Model loaded from {}", path.display());
        Ok(Self { model: Some(model) })
    }

    fn trained_model(&self) -> Result<&TrainedModel> {
        self.model
            .as_ref()
            .ok_or_else(|| HarvestError::Model("classifier has not been trained".to_string()))
    }
}

impl TrainedModel {
    fn scores(&self, text: &str) -> Vec<f64> {
        let tokens = tokenize(text);
        let vector = tfidf_vector(&tokens, &self.vocabulary, &self.idf);

        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + vector
                        .iter()
                        .map(|&(term, weight)| weight * log_probs[term])
                        .sum::<f64>()
            })
            .collect()
    }
}

/// Lowercased unigrams and bigrams; tokens are alphanumeric runs of at
/// least two characters.
fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 2)
        .map(|w| w.to_lowercase())
        .collect();

    let mut tokens = words.clone();
    tokens.extend(words.windows(2).map(|pair| pair.join(" ")));
    tokens
}

/// Build the vocabulary (capped at `MAX_FEATURES` by corpus frequency) and
/// smoothed inverse document frequencies.
fn fit_tfidf(tokenized: &[Vec<String>]) -> (HashMap<String, usize>, Vec<f64>) {
    let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();

    for tokens in tokenized {
        let mut seen: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for token in tokens {
            *corpus_freq.entry(token.as_str()).or_insert(0) += 1;
            if seen.insert(token.as_str()) {
                *doc_freq.entry(token.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut terms: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
    // Highest corpus frequency first; alphabetical tie-break keeps the
    // vocabulary deterministic across runs.
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    terms.truncate(MAX_FEATURES);

    let total_docs = tokenized.len() as f64;
    let mut vocabulary = HashMap::with_capacity(terms.len());
    let mut idf = Vec::with_capacity(terms.len());

    for (column, (term, _)) in terms.into_iter().enumerate() {
        let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
        vocabulary.insert(term.to_string(), column);
        idf.push(((1.0 + total_docs) / (1.0 + df)).ln() + 1.0);
    }

    (vocabulary, idf)
}

/// Sparse L2-normalized TF-IDF vector as (column, weight) pairs.
fn tfidf_vector(
    tokens: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> Vec<(usize, f64)> {
    let mut term_counts: HashMap<usize, f64> = HashMap::new();
    for token in tokens {
        if let Some(&column) = vocabulary.get(token) {
            *term_counts.entry(column).or_insert(0.0) += 1.0;
        }
    }

    let mut vector: Vec<(usize, f64)> = term_counts
        .into_iter()
        .map(|(column, count)| (column, count * idf[column]))
        .collect();

    let norm = vector.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }

    vector.sort_by_key(|&(column, _)| column);
    vector
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = i;
        }
    }
    best
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
