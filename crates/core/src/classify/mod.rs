//! Hybrid category assignment: keyword rules first, a learned fallback
//! for whatever the rules cannot place.

mod model;
mod pipeline;
mod rules;

pub use model::{MultinomialNb, Prediction, TextClassifier};
pub use pipeline::{
    AssignmentMethod, AssignmentPipeline, CategoryAssignment, PipelineReport,
    PRODUCT_INFO_FILE, PRODUCT_ITEM_FILE,
};
pub use rules::{match_keywords, RuleMatch};
