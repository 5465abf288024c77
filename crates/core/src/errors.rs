use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or normalizing a catalog file.
///
/// `Missing` and `MalformedRow` are distinct on purpose: callers that want
/// the original degrade-to-empty behavior use `Catalog::load_or_empty`,
/// which only swallows `Missing`.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: `{path}`")]
    Missing { path: PathBuf },
    #[error("could not read catalog file `{path}`: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed record in `{path}`: {message}")]
    MalformedRow { path: PathBuf, message: String },
    #[error("catalog file `{path}` is missing required column `{column}`")]
    MissingColumn { path: PathBuf, column: &'static str },
}

/// Failures in the recommendation paths.
///
/// `IndexUnavailable` is the documented cross-component contract: callers
/// are expected to fall back to the rule-based recommender when the
/// similarity backend cannot serve.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("similarity backend unavailable: {0}")]
    IndexUnavailable(String),
}

/// Failures in the batch category-assignment pipeline.
///
/// Too few labeled training rows is NOT an error: Stage 2 is skipped and
/// the report records the skip.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("could not write assignments to `{path}`: {message}")]
    Output { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{CatalogError, PipelineError, RecommendError};

    #[test]
    fn missing_file_is_distinct_from_malformed_row() {
        let missing = CatalogError::Missing { path: PathBuf::from("dataset/product_info.csv") };
        let malformed = CatalogError::MalformedRow {
            path: PathBuf::from("dataset/product_info.csv"),
            message: "unequal lengths".to_string(),
        };

        assert!(missing.to_string().contains("not found"));
        assert!(malformed.to_string().contains("malformed record"));
    }

    #[test]
    fn catalog_error_converts_into_pipeline_error() {
        let error: PipelineError =
            CatalogError::Missing { path: PathBuf::from("dataset/product_item.csv") }.into();
        assert!(matches!(error, PipelineError::Catalog(CatalogError::Missing { .. })));
    }

    #[test]
    fn index_unavailable_carries_reason() {
        let error = RecommendError::IndexUnavailable("empty vocabulary".to_string());
        assert_eq!(error.to_string(), "similarity backend unavailable: empty vocabulary");
    }
}
