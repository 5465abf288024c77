//! Skin-profile driven product recommendation.
//!
//! Two cooperating paths share the catalog, the derived keyword set, and
//! the hard filters: the rule-based [`KeywordRecommender`] and the
//! TF-IDF [`SimilarityRecommender`]. When the similarity backend cannot
//! serve, [`recommend_products`] degrades to the rule-based path.

mod keyword;
mod similarity;

pub use keyword::KeywordRecommender;
pub use similarity::{SimilarityIndex, SimilarityRecommender};

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::ConfigError;
use crate::domain::{Product, ScoredProduct, SkinProfile};

/// Recommendation method selector. `tfidf` is the default; it falls back
/// to `rule` when the similarity backend is unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Tfidf,
    Rule,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tfidf => "tfidf",
            Self::Rule => "rule",
        }
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tfidf" => Ok(Self::Tfidf),
            "rule" => Ok(Self::Rule),
            other => Err(ConfigError::Validation(format!(
                "unsupported recommendation method `{other}` (expected tfidf|rule)"
            ))),
        }
    }
}

/// Run the selected recommender over the catalog.
///
/// The tfidf path falls back to the rule-based path on
/// `RecommendError::IndexUnavailable`; the rule-based path itself never
/// fails (an empty catalog simply yields no results).
pub fn recommend_products(
    catalog: &Catalog,
    similarity: &SimilarityRecommender<'_>,
    profile: &SkinProfile,
    top_n: usize,
    method: Method,
) -> Vec<ScoredProduct> {
    match method {
        Method::Rule => KeywordRecommender::new(catalog).recommend(profile, top_n),
        Method::Tfidf => match similarity.recommend(profile, top_n) {
            Ok(results) => results,
            Err(error) => {
                tracing::warn!(
                    %error,
                    "similarity backend unavailable, falling back to rule-based recommender"
                );
                KeywordRecommender::new(catalog).recommend(profile, top_n)
            }
        },
    }
}

/// Derive the match keyword set from a profile: lowercased skin type plus
/// its canonical expansions, then the lowercased concerns; de-duplicated,
/// order preserved.
pub(crate) fn build_keywords(profile: &SkinProfile) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    let skin_type = profile.skin_type.trim().to_lowercase();
    if !skin_type.is_empty() {
        keywords.push(skin_type.clone());
        match skin_type.as_str() {
            "dry" => keywords.extend(["dryness", "hydrating"].map(String::from)),
            "oily" => keywords.extend(["oil", "oily"].map(String::from)),
            "sensitive" => keywords.extend(["sensitive", "soothing"].map(String::from)),
            _ => {}
        }
    }

    for concern in &profile.concerns {
        let concern = concern.trim().to_lowercase();
        if !concern.is_empty() {
            keywords.push(concern);
        }
    }

    let mut seen = HashSet::new();
    keywords.retain(|keyword| seen.insert(keyword.clone()));
    keywords
}

/// Inclusive price-range filter; applies only when the product has a
/// price and the respective bound was supplied.
pub(crate) fn passes_price_filter(product: &Product, profile: &SkinProfile) -> bool {
    let Some(price) = product.price else { return true };
    if let Some(min) = profile.price_min {
        if price < min {
            return false;
        }
    }
    if let Some(max) = profile.price_max {
        if price > max {
            return false;
        }
    }
    true
}

/// Whether any avoided term (already lowercased) substring-matches any
/// ingredient token.
pub(crate) fn contains_avoided_ingredient(product: &Product, avoid: &[String]) -> bool {
    if avoid.is_empty() {
        return false;
    }
    product.ingredients.iter().any(|ingredient| {
        let ingredient = ingredient.to_lowercase();
        avoid.iter().any(|term| ingredient.contains(term.as_str()))
    })
}

/// Diminishing-returns popularity bonus shared by both recommenders.
pub(crate) fn popularity_bonus(popularity: u64) -> f64 {
    (popularity as f64 / 200.0).min(8.0)
}
