//! Popularity/rating composite leaderboards.
//!
//! Unlike the recommenders, ranking is not gated by relevance filters, so
//! the popularity term weighs heavier here: divisor 100 and cap 20 versus
//! the recommenders' 200/8.

use crate::catalog::Catalog;
use crate::domain::{CategoryLevel, Product, RankedProduct};

const RATING_WEIGHT: f64 = 3.0;
const POPULARITY_DIVISOR: f64 = 100.0;
const POPULARITY_CAP: f64 = 20.0;

/// Global and category-filtered product leaderboards over a catalog.
#[derive(Clone, Debug)]
pub struct RankingEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> RankingEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Top `top_n` products across the whole catalog. Asking for more than
    /// the catalog holds returns everything.
    pub fn global_ranking(&self, top_n: usize) -> Vec<RankedProduct> {
        Self::rank_slice(self.catalog.products(), top_n)
    }

    /// Top `top_n` products whose category at `level` equals `category`
    /// (case-sensitive exact match; the determinism trade-off is recorded
    /// in DESIGN.md).
    pub fn category_ranking(
        &self,
        category: &str,
        level: CategoryLevel,
        top_n: usize,
    ) -> Vec<RankedProduct> {
        let filtered: Vec<Product> = self
            .catalog
            .products()
            .iter()
            .filter(|product| level.field(product) == category)
            .cloned()
            .collect();
        Self::rank_slice(&filtered, top_n)
    }

    /// Score and rank an externally-supplied product slice with the same
    /// formula, for records that never entered the catalog.
    pub fn rank_slice(products: &[Product], top_n: usize) -> Vec<RankedProduct> {
        let mut scored: Vec<(f64, &Product)> =
            products.iter().map(|product| (score(product), product)).collect();

        // Stable sort: equal scores keep catalog order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(top_n)
            .map(|(score, product)| RankedProduct::from_product(product, score))
            .collect()
    }
}

fn score(product: &Product) -> f64 {
    product.rating * RATING_WEIGHT
        + (product.popularity as f64 / POPULARITY_DIVISOR).min(POPULARITY_CAP)
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::domain::{CategoryLevel, PopularitySource, Product, ProductId};

    use super::RankingEngine;

    fn product(id: &str, rating: f64, popularity: u64, primary: &str) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: format!("Product {id}"),
            brand: "Dewlab".to_string(),
            rating,
            popularity,
            price: None,
            primary_category: primary.to_string(),
            secondary_category: String::new(),
            tertiary_category: String::new(),
            highlights: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    fn catalog(products: Vec<Product>) -> Catalog {
        Catalog::from_products(products, PopularitySource::Reviews)
    }

    #[test]
    fn scores_are_monotonically_non_increasing() {
        let catalog = catalog(vec![
            product("P1", 3.0, 500, "Skincare"),
            product("P2", 4.9, 9_000, "Makeup"),
            product("P3", 4.0, 10, "Skincare"),
        ]);

        let ranking = RankingEngine::new(&catalog).global_ranking(10);
        for pair in ranking.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(ranking[0].product_id, "P2");
    }

    #[test]
    fn top_n_larger_than_catalog_returns_everything() {
        let catalog = catalog(vec![
            product("P1", 3.0, 100, "Skincare"),
            product("P2", 4.0, 100, "Skincare"),
            product("P3", 2.0, 100, "Skincare"),
        ]);

        assert_eq!(RankingEngine::new(&catalog).global_ranking(5).len(), 3);
    }

    #[test]
    fn popularity_bonus_caps_at_twenty() {
        let catalog = catalog(vec![product("P1", 0.0, 1_000_000, "Skincare")]);
        let ranking = RankingEngine::new(&catalog).global_ranking(1);
        assert_eq!(ranking[0].score, 20.0);
    }

    #[test]
    fn category_ranking_matches_level_exactly() {
        let mut secondary = product("P1", 4.0, 100, "Skincare");
        secondary.secondary_category = "Moisturizers".to_string();
        let catalog = catalog(vec![
            secondary,
            product("P2", 5.0, 100, "Skincare"),
            product("P3", 5.0, 100, "skincare"),
        ]);
        let engine = RankingEngine::new(&catalog);

        let by_primary = engine.category_ranking("Skincare", CategoryLevel::Primary, 10);
        let ids: Vec<&str> = by_primary.iter().map(|r| r.product_id.as_str()).collect();
        // Case-sensitive exact match: the lowercase variant is excluded.
        assert_eq!(ids, vec!["P2", "P1"]);

        let by_secondary =
            engine.category_ranking("Moisturizers", CategoryLevel::Secondary, 10);
        assert_eq!(by_secondary.len(), 1);
        assert_eq!(by_secondary[0].product_id, "P1");
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let catalog = catalog(vec![
            product("P1", 4.0, 100, "Skincare"),
            product("P2", 4.0, 100, "Skincare"),
        ]);
        let ranking = RankingEngine::new(&catalog).global_ranking(2);
        assert_eq!(ranking[0].product_id, "P1");
        assert_eq!(ranking[1].product_id, "P2");
    }
}
