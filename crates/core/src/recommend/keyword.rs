use crate::catalog::Catalog;
use crate::domain::{Product, ScoredProduct, SkinProfile};

use super::{build_keywords, contains_avoided_ingredient, passes_price_filter, popularity_bonus};

/// Rule-based multi-signal recommender.
///
/// Scores every surviving catalog product by summing weighted keyword
/// signals over highlights, name/category, and ingredients, then adds the
/// rating and popularity bumps. Weights are part of the scoring contract.
#[derive(Clone, Debug)]
pub struct KeywordRecommender<'a> {
    catalog: &'a Catalog,
}

/// Literal `"Good for: <keyword>"` marker in highlights.
const GOOD_FOR_WEIGHT: f64 = 25.0;
/// Keyword anywhere in the joined highlights text.
const HIGHLIGHT_WEIGHT: f64 = 15.0;
/// Keyword in the product name or primary category.
const NAME_OR_CATEGORY_WEIGHT: f64 = 7.0;
/// Keyword substring-matching an ingredient token.
const INGREDIENT_WEIGHT: f64 = 3.0;
/// One-time bump when the preferred category matches.
const PREFERRED_CATEGORY_WEIGHT: f64 = 8.0;
const RATING_WEIGHT: f64 = 2.0;

impl<'a> KeywordRecommender<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Rank products for `profile`. Returns at most `top_n` entries,
    /// descending by `(score, popularity, rating)`; an empty catalog or a
    /// profile matching nothing yields an empty list.
    pub fn recommend(&self, profile: &SkinProfile, top_n: usize) -> Vec<ScoredProduct> {
        if self.catalog.is_empty() {
            return Vec::new();
        }

        let keywords = build_keywords(profile);
        let avoid: Vec<String> =
            profile.avoid_ingredients.iter().map(|term| term.to_lowercase()).collect();
        let preferred = profile
            .preferred_category
            .as_deref()
            .map(str::to_lowercase)
            .filter(|category| !category.is_empty());

        let mut results: Vec<(f64, &Product)> = Vec::new();
        for product in self.catalog.products() {
            if !passes_price_filter(product, profile) {
                continue;
            }
            if contains_avoided_ingredient(product, &avoid) {
                continue;
            }

            let score = score_product(product, &keywords, preferred.as_deref());
            if score > 0.0 {
                results.push((score, product));
            }
        }

        results.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.1.popularity.cmp(&a.1.popularity))
                .then_with(|| {
                    b.1.rating.partial_cmp(&a.1.rating).unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        results
            .into_iter()
            .take(top_n)
            .map(|(score, product)| ScoredProduct::from_product(product, score))
            .collect()
    }
}

fn score_product(product: &Product, keywords: &[String], preferred: Option<&str>) -> f64 {
    let highlights = product.highlights.join(" ").to_lowercase();
    let name = product.name.to_lowercase();
    let category = product.primary_category.to_lowercase();
    let ingredients: Vec<String> =
        product.ingredients.iter().map(|token| token.to_lowercase()).collect();

    let mut score = 0.0;
    for keyword in keywords {
        if highlights.contains(&format!("good for: {keyword}")) {
            score += GOOD_FOR_WEIGHT;
        }
        if highlights.contains(keyword.as_str()) {
            score += HIGHLIGHT_WEIGHT;
        }
        if name.contains(keyword.as_str()) || category.contains(keyword.as_str()) {
            score += NAME_OR_CATEGORY_WEIGHT;
        }
        if ingredients.iter().any(|token| token.contains(keyword.as_str())) {
            score += INGREDIENT_WEIGHT;
        }
    }

    if let Some(preferred) = preferred {
        if category.contains(preferred) {
            score += PREFERRED_CATEGORY_WEIGHT;
        }
    }

    score + product.rating * RATING_WEIGHT + popularity_bonus(product.popularity)
}
