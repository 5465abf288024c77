pub mod product;
pub mod profile;

pub use product::{PopularitySource, Product, ProductId, RankedProduct, ScoredProduct};
pub use profile::SkinProfile;

use serde::{Deserialize, Serialize};

/// Which of the three taxonomy levels an operation addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLevel {
    Primary,
    Secondary,
    Tertiary,
}

impl CategoryLevel {
    /// The matched category field of a product at this level.
    pub fn field<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            Self::Primary => &product.primary_category,
            Self::Secondary => &product.secondary_category,
            Self::Tertiary => &product.tertiary_category,
        }
    }

    /// Parse a level name; unknown values fall back to `Primary`, matching
    /// the ranking contract.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "secondary" => Self::Secondary,
            "tertiary" => Self::Tertiary,
            _ => Self::Primary,
        }
    }
}
