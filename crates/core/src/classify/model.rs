//! Learned fallback classifier: bag-of-n-grams features into a
//! multinomial naive Bayes model.
//!
//! Everything here is deterministic. Class order is first-seen over the
//! training rows, vocabulary order is frequency-then-lexicographic, and
//! fitting involves no randomness, so retraining on unchanged data
//! reproduces identical predictions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::text::{CountVectorizer, SparseVector};

/// A predicted label with the winning class's posterior probability.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probability: f64,
}

/// Multinomial naive Bayes over sparse count features.
#[derive(Clone, Debug)]
pub struct MultinomialNb {
    classes: Vec<String>,
    class_log_priors: Vec<f64>,
    /// Laplace-smoothed log likelihoods, `[class][feature]`.
    feature_log_likelihoods: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Laplace smoothing constant.
    pub const ALPHA: f64 = 1.0;

    /// Fit priors and per-class feature likelihoods. `features` and
    /// `labels` are parallel; `n_features` is the vectorizer vocabulary
    /// size.
    pub fn fit(features: &[SparseVector], labels: &[String], n_features: usize) -> Self {
        let mut classes: Vec<String> = Vec::new();
        let mut class_index: HashMap<&str, usize> = HashMap::new();
        for label in labels {
            if !class_index.contains_key(label.as_str()) {
                class_index.insert(label.as_str(), classes.len());
                classes.push(label.clone());
            }
        }

        let n_classes = classes.len();
        let mut class_counts = vec![0usize; n_classes];
        let mut feature_counts = vec![vec![0.0f64; n_features]; n_classes];

        for (vector, label) in features.iter().zip(labels) {
            let class = class_index[label.as_str()];
            class_counts[class] += 1;
            for (feature, count) in vector.iter() {
                feature_counts[class][feature] += count;
            }
        }

        let total = labels.len() as f64;
        let class_log_priors =
            class_counts.iter().map(|&count| (count as f64 / total).ln()).collect();

        let feature_log_likelihoods = feature_counts
            .iter()
            .map(|counts| {
                let class_total: f64 = counts.iter().sum();
                let denominator = class_total + Self::ALPHA * n_features as f64;
                counts.iter().map(|&count| ((count + Self::ALPHA) / denominator).ln()).collect()
            })
            .collect();

        Self { classes, class_log_priors, feature_log_likelihoods }
    }

    /// Most probable class with its posterior. `None` only when the model
    /// was fit on zero rows.
    pub fn predict(&self, vector: &SparseVector) -> Option<Prediction> {
        if self.classes.is_empty() {
            return None;
        }

        let joint: Vec<f64> = (0..self.classes.len())
            .map(|class| {
                let mut log_prob = self.class_log_priors[class];
                for (feature, count) in vector.iter() {
                    log_prob += count * self.feature_log_likelihoods[class][feature];
                }
                log_prob
            })
            .collect();

        let mut best = 0;
        for class in 1..joint.len() {
            if joint[class] > joint[best] {
                best = class;
            }
        }

        // Posterior via log-sum-exp, anchored at the max for stability.
        let max = joint[best];
        let denominator: f64 = joint.iter().map(|&value| (value - max).exp()).sum();
        let probability = 1.0 / denominator;

        Some(Prediction { label: self.classes[best].clone(), probability })
    }
}

/// A fitted `(vectorizer, classifier)` pair over product-name text.
///
/// Built fresh per pipeline run from the currently labeled rows and
/// discarded afterwards; nothing is persisted.
#[derive(Clone, Debug)]
pub struct TextClassifier {
    vectorizer: CountVectorizer,
    model: MultinomialNb,
    pub trained_at: DateTime<Utc>,
    pub training_samples: usize,
}

impl TextClassifier {
    pub const NGRAM_MIN: usize = 1;
    pub const NGRAM_MAX: usize = 2;
    pub const MAX_FEATURES: usize = 1000;

    /// Fit the vocabulary and the model over parallel `texts`/`labels`.
    pub fn train(texts: &[String], labels: &[String]) -> Self {
        let mut vectorizer = CountVectorizer::new()
            .with_ngram_range(Self::NGRAM_MIN, Self::NGRAM_MAX)
            .with_max_features(Self::MAX_FEATURES);
        vectorizer.fit(texts);

        let features: Vec<SparseVector> =
            texts.iter().map(|text| vectorizer.transform(text)).collect();
        let model = MultinomialNb::fit(&features, labels, vectorizer.vocabulary_size());

        tracing::debug!(
            samples = texts.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "text classifier trained"
        );
        Self { vectorizer, model, trained_at: Utc::now(), training_samples: texts.len() }
    }

    pub fn predict(&self, text: &str) -> Option<Prediction> {
        self.model.predict(&self.vectorizer.transform(text))
    }
}
