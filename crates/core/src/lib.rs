pub mod catalog;
pub mod classify;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod recommend;
pub mod taxonomy;
pub mod text;

pub use catalog::{Catalog, CategoryCount};
pub use classify::{
    AssignmentMethod, AssignmentPipeline, CategoryAssignment, PipelineReport, TextClassifier,
};
pub use domain::{
    CategoryLevel, PopularitySource, Product, ProductId, RankedProduct, ScoredProduct,
    SkinProfile,
};
pub use errors::{CatalogError, PipelineError, RecommendError};
pub use ranking::RankingEngine;
pub use recommend::{
    recommend_products, KeywordRecommender, Method, SimilarityIndex, SimilarityRecommender,
};
