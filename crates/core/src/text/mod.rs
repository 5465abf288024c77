//! Text primitives for the similarity index and the category classifier:
//! tokenization, stop words, and deterministic bag-of-n-grams / TF-IDF
//! vectorizers over sparse vectors.

mod stopwords;
mod vectorize;

pub use stopwords::is_stop_word;
pub use vectorize::{CountVectorizer, SparseVector, TfidfVectorizer};

/// Lowercase a text and split it into alphanumeric tokens of length >= 2.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}
