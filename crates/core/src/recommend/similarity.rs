use std::sync::OnceLock;

use crate::catalog::Catalog;
use crate::domain::{Product, ScoredProduct, SkinProfile};
use crate::errors::RecommendError;
use crate::text::{SparseVector, TfidfVectorizer};

use super::{build_keywords, contains_avoided_ingredient, passes_price_filter, popularity_bonus};

/// Weight of the cosine similarity in the final score.
const SIMILARITY_WEIGHT: f64 = 100.0;
const RATING_WEIGHT: f64 = 2.0;

/// Owned TF-IDF index over the catalog corpus.
///
/// One document per product (name + highlights + ingredients), fitted
/// with unigrams+bigrams, a 20k vocabulary cap, and English stop-word
/// removal. Rows are L2-normalized so cosine similarity is a plain dot
/// product. Row `i` corresponds to `catalog.products()[i]`.
#[derive(Clone, Debug)]
pub struct SimilarityIndex {
    vectorizer: TfidfVectorizer,
    matrix: Vec<SparseVector>,
}

impl SimilarityIndex {
    pub const MAX_FEATURES: usize = 20_000;

    /// Fit the index over the full catalog. Fails with
    /// [`RecommendError::IndexUnavailable`] when there is nothing to fit —
    /// the signal for callers to fall back to the rule-based path.
    pub fn build(catalog: &Catalog) -> Result<Self, RecommendError> {
        if catalog.is_empty() {
            return Err(RecommendError::IndexUnavailable("catalog is empty".to_string()));
        }

        let corpus: Vec<String> = catalog.products().iter().map(document_text).collect();
        let mut vectorizer = TfidfVectorizer::new()
            .with_ngram_range(1, 2)
            .with_max_features(Self::MAX_FEATURES)
            .with_stop_words_english();
        let matrix = vectorizer.fit_transform(&corpus);

        if vectorizer.vocabulary_size() == 0 {
            return Err(RecommendError::IndexUnavailable(
                "fitted vocabulary is empty".to_string(),
            ));
        }

        tracing::debug!(
            documents = matrix.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "similarity index built"
        );
        Ok(Self { vectorizer, matrix })
    }

    /// Cosine similarity of `query` against every catalog document.
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query_vector = self.vectorizer.transform(query);
        self.matrix.iter().map(|row| row.dot(&query_vector)).collect()
    }
}

/// TF-IDF similarity recommender over a shared catalog reference.
///
/// The index is built at most once per recommender through a `OnceLock`
/// barrier: a single writer wins and every reader observes the completed
/// index, never a partial one. Rebuilds require a new recommender (in
/// practice, a process restart).
#[derive(Debug)]
pub struct SimilarityRecommender<'a> {
    catalog: &'a Catalog,
    index: OnceLock<Result<SimilarityIndex, RecommendError>>,
}

impl<'a> SimilarityRecommender<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog, index: OnceLock::new() }
    }

    /// Eagerly build the index, surfacing any backend failure now instead
    /// of at the first `recommend` call.
    pub fn build_index(&self) -> Result<(), RecommendError> {
        self.index().map(|_| ())
    }

    fn index(&self) -> Result<&SimilarityIndex, RecommendError> {
        self.index
            .get_or_init(|| SimilarityIndex::build(self.catalog))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Rank products by query similarity plus the rating/popularity bumps.
    ///
    /// The query is the derived keyword set plus the raw concerns and
    /// preferred category; an empty query returns an empty list. Hard
    /// filters match the rule-based recommender.
    pub fn recommend(
        &self,
        profile: &SkinProfile,
        top_n: usize,
    ) -> Result<Vec<ScoredProduct>, RecommendError> {
        let index = self.index()?;

        let mut terms = build_keywords(profile);
        terms.extend(profile.concerns.iter().cloned());
        if let Some(category) = &profile.preferred_category {
            if !category.is_empty() {
                terms.push(category.clone());
            }
        }
        let query = terms.join(" ");
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let similarities = index.similarities(&query);
        let avoid: Vec<String> =
            profile.avoid_ingredients.iter().map(|term| term.to_lowercase()).collect();

        let mut candidates: Vec<(f64, &Product)> = Vec::new();
        for (product, similarity) in self.catalog.products().iter().zip(similarities) {
            if !passes_price_filter(product, profile) {
                continue;
            }
            if contains_avoided_ingredient(product, &avoid) {
                continue;
            }

            let score = similarity * SIMILARITY_WEIGHT
                + product.rating * RATING_WEIGHT
                + popularity_bonus(product.popularity);
            if score > 0.0 {
                candidates.push((score, product));
            }
        }

        candidates
            .sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(candidates
            .into_iter()
            .take(top_n)
            .map(|(score, product)| ScoredProduct::from_product(product, score))
            .collect())
    }
}

/// One corpus document: name, highlight strings, and ingredient tokens
/// joined into a single text.
fn document_text(product: &Product) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(1 + product.highlights.len() + product.ingredients.len());
    if !product.name.is_empty() {
        parts.push(&product.name);
    }
    parts.extend(product.highlights.iter().map(String::as_str).filter(|s| !s.is_empty()));
    parts.extend(product.ingredients.iter().map(String::as_str).filter(|s| !s.is_empty()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::domain::{PopularitySource, Product, ProductId, SkinProfile};
    use crate::errors::RecommendError;

    use super::{SimilarityIndex, SimilarityRecommender};

    fn product(id: &str, name: &str, highlights: &[&str], ingredients: &[&str]) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: name.to_string(),
            brand: "Dewlab".to_string(),
            rating: 4.0,
            popularity: 400,
            price: Some(30.0),
            primary_category: "Skincare".to_string(),
            secondary_category: String::new(),
            tertiary_category: String::new(),
            highlights: highlights.iter().map(|s| s.to_string()).collect(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn catalog(products: Vec<Product>) -> Catalog {
        Catalog::from_products(products, PopularitySource::Loves)
    }

    #[test]
    fn empty_catalog_makes_backend_unavailable() {
        let catalog = catalog(Vec::new());
        assert!(matches!(
            SimilarityIndex::build(&catalog),
            Err(RecommendError::IndexUnavailable(_))
        ));
    }

    #[test]
    fn relevant_document_ranks_above_unrelated_one() {
        let catalog = catalog(vec![
            product("P1", "Matte Lipstick", &["Long wear"], &["Wax"]),
            product(
                "P2",
                "Hydrating Night Cream",
                &["Good for: dry", "Hydrating"],
                &["Glycerin", "Squalane"],
            ),
        ]);
        let recommender = SimilarityRecommender::new(&catalog);

        let results = recommender
            .recommend(&SkinProfile::new("dry"), 10)
            .expect("index should build");
        assert_eq!(results[0].product_id, "P2");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn empty_query_returns_empty_result() {
        let catalog = catalog(vec![product("P1", "Toner", &[], &[])]);
        let recommender = SimilarityRecommender::new(&catalog);

        let results =
            recommender.recommend(&SkinProfile::default(), 10).expect("index should build");
        assert!(results.is_empty());
    }

    #[test]
    fn hard_filters_apply_to_similarity_results() {
        let mut pricey = product("P1", "Hydrating Cream", &["Good for: dry"], &[]);
        pricey.price = Some(90.0);
        let mut scented =
            product("P2", "Hydrating Lotion", &["Good for: dry"], &["Fragrance Oil"]);
        scented.price = Some(20.0);
        let clean = product("P3", "Hydrating Gel", &["Good for: dry"], &["Glycerin"]);

        let catalog = catalog(vec![pricey, scented, clean]);
        let recommender = SimilarityRecommender::new(&catalog);
        let profile = SkinProfile::new("dry")
            .with_price_range(None, Some(50.0))
            .with_avoid_ingredients(vec!["fragrance".to_string()]);

        let results = recommender.recommend(&profile, 10).expect("index should build");
        let ids: Vec<&str> = results.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["P3"]);
    }

    #[test]
    fn index_is_built_once_and_reused() {
        let catalog = catalog(vec![product("P1", "Cleansing Foam", &[], &["Water"])]);
        let recommender = SimilarityRecommender::new(&catalog);

        recommender.build_index().expect("first build should succeed");
        // Second call must hit the cached index, not rebuild.
        recommender.build_index().expect("cached index should be reused");
        let results = recommender
            .recommend(&SkinProfile::new("dry").with_concerns(vec!["cleansing".to_string()]), 5)
            .expect("recommend should use the cached index");
        assert_eq!(results.len(), 1);
    }
}
