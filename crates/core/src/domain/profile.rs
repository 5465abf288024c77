use serde::{Deserialize, Serialize};

/// Caller-supplied skin preferences driving one recommendation call.
///
/// Ephemeral: the core never stores a profile beyond the scoring call that
/// received it. All fields are optional; an empty profile produces an empty
/// keyword set and therefore (for the similarity path) an empty result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinProfile {
    #[serde(default)]
    pub skin_type: String,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub avoid_ingredients: Vec<String>,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    /// Soft preference for a primary category; accepted from callers under
    /// the wire name `primary_category`.
    #[serde(default, alias = "primary_category")]
    pub preferred_category: Option<String>,
}

impl SkinProfile {
    pub fn new(skin_type: impl Into<String>) -> Self {
        Self { skin_type: skin_type.into(), ..Self::default() }
    }

    pub fn with_concerns(mut self, concerns: Vec<String>) -> Self {
        self.concerns = concerns;
        self
    }

    pub fn with_avoid_ingredients(mut self, avoid: Vec<String>) -> Self {
        self.avoid_ingredients = avoid;
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_preferred_category(mut self, category: impl Into<String>) -> Self {
        self.preferred_category = Some(category.into());
        self
    }
}
