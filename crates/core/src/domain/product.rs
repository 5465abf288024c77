use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which counter populated `Product::popularity` for a catalog snapshot.
///
/// The `product_info` dataset carries a "loves" counter, the `product_item`
/// dataset a "reviews" counter. The two are different units and are never
/// mixed within one snapshot; the ambiguity between them is documented in
/// DESIGN.md rather than reconciled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularitySource {
    Loves,
    Reviews,
}

/// One normalized row of the product catalog.
///
/// Numeric fields zero-fill when absent or unparseable; list fields are
/// always exploded into sequences by the tolerant parser in the catalog
/// loader. Empty category strings mean "unassigned".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub rating: f64,
    pub popularity: u64,
    pub price: Option<f64>,
    pub primary_category: String,
    pub secondary_category: String,
    pub tertiary_category: String,
    pub highlights: Vec<String>,
    pub ingredients: Vec<String>,
}

/// Recommendation output row: the product summary plus its match score,
/// rounded to two decimals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product_id: String,
    pub product_name: String,
    pub brand_name: String,
    pub rating: f64,
    pub popularity: u64,
    pub primary_category: String,
    pub highlights: Vec<String>,
    pub ingredients: Vec<String>,
    pub price: Option<f64>,
    pub score: f64,
}

/// Ranking output row. Leaner than [`ScoredProduct`]: leaderboards do not
/// carry the text fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    pub product_id: String,
    pub product_name: String,
    pub brand_name: String,
    pub rating: f64,
    pub popularity: u64,
    pub primary_category: String,
    pub price: Option<f64>,
    pub score: f64,
}

impl ScoredProduct {
    pub fn from_product(product: &Product, score: f64) -> Self {
        Self {
            product_id: product.id.0.clone(),
            product_name: product.name.clone(),
            brand_name: product.brand.clone(),
            rating: product.rating,
            popularity: product.popularity,
            primary_category: product.primary_category.clone(),
            highlights: product.highlights.clone(),
            ingredients: product.ingredients.clone(),
            price: product.price,
            score: round2(score),
        }
    }
}

impl RankedProduct {
    pub fn from_product(product: &Product, score: f64) -> Self {
        Self {
            product_id: product.id.0.clone(),
            product_name: product.name.clone(),
            brand_name: product.brand.clone(),
            rating: product.rating,
            popularity: product.popularity,
            primary_category: product.primary_category.clone(),
            price: product.price,
            score: round2(score),
        }
    }
}

/// Round to two decimal places for presentation-stable scores.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
