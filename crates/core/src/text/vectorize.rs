use std::collections::{BTreeMap, HashMap, HashSet};

use super::{is_stop_word, tokenize};

/// Sparse feature vector: parallel index/value arrays, indices strictly
/// ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, f64>) -> Self {
        let mut indices = Vec::with_capacity(counts.len());
        let mut values = Vec::with_capacity(counts.len());
        for (index, value) in counts {
            indices.push(index as u32);
            values.push(value);
        }
        Self { indices, values }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().zip(self.values.iter()).map(|(&i, &v)| (i as usize, v))
    }

    /// Dot product over the index intersection (merge walk; both sides are
    /// sorted by construction).
    pub fn dot(&self, other: &Self) -> f64 {
        let mut sum = 0.0;
        let (mut a, mut b) = (0, 0);
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit length; a zero vector is left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.l2_norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }

    fn scale(&mut self, weights: &[f64]) {
        for (slot, &index) in self.values.iter_mut().zip(self.indices.iter()) {
            *slot *= weights[index as usize];
        }
    }
}

/// Deterministic bag-of-n-grams vectorizer.
///
/// `fit` builds the vocabulary from the corpus: n-grams are counted across
/// all documents, ordered by frequency descending then term ascending, and
/// truncated to `max_features`. The ordering makes vocabulary indices (and
/// everything downstream) reproducible across runs.
#[derive(Clone, Debug)]
pub struct CountVectorizer {
    ngram_range: (usize, usize),
    max_features: Option<usize>,
    remove_stop_words: bool,
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            ngram_range: (1, 1),
            max_features: None,
            remove_stop_words: false,
            vocabulary: HashMap::new(),
        }
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n.max(1), max_n.max(min_n.max(1)));
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    pub fn with_stop_words_english(mut self) -> Self {
        self.remove_stop_words = true;
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Learn the vocabulary from `documents`. An empty corpus (or one that
    /// tokenizes to nothing) leaves the vocabulary empty; callers decide
    /// whether that is an error.
    pub fn fit(&mut self, documents: &[String]) {
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            for term in self.terms(doc) {
                *term_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut sorted: Vec<(String, usize)> = term_freq.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max_features) = self.max_features {
            sorted.truncate(max_features);
        }

        self.vocabulary =
            sorted.into_iter().enumerate().map(|(index, (term, _))| (term, index)).collect();
    }

    /// Count known terms of `text` into a sparse vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.terms(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }
        SparseVector::from_counts(counts)
    }

    fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|token| !self.remove_stop_words || !is_stop_word(token))
            .collect();

        let mut terms = Vec::new();
        for n in self.ngram_range.0..=self.ngram_range.1 {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// TF-IDF vectorizer: [`CountVectorizer`] counts weighted by smoothed
/// inverse document frequency, rows L2-normalized.
///
/// `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    count: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self { count: CountVectorizer::new(), idf: Vec::new() }
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.count = self.count.with_ngram_range(min_n, max_n);
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.count = self.count.with_max_features(max_features);
        self
    }

    pub fn with_stop_words_english(mut self) -> Self {
        self.count = self.count.with_stop_words_english();
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.count.vocabulary_size()
    }

    pub fn fit(&mut self, documents: &[String]) {
        self.count.fit(documents);

        let mut doc_freq = vec![0usize; self.count.vocabulary_size()];
        for doc in documents {
            let mut seen: HashSet<usize> = HashSet::new();
            for (index, _) in self.count.transform(doc).iter() {
                seen.insert(index);
            }
            for index in seen {
                doc_freq[index] += 1;
            }
        }

        let n = documents.len() as f64;
        self.idf =
            doc_freq.iter().map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0).collect();
    }

    /// Transform one document into an L2-normalized TF-IDF vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut vector = self.count.transform(text);
        vector.scale(&self.idf);
        vector.l2_normalize();
        vector
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Vec<SparseVector> {
        self.fit(documents);
        documents.iter().map(|doc| self.transform(doc)).collect()
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
