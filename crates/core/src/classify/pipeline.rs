use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::Product;
use crate::errors::PipelineError;

use super::model::TextClassifier;
use super::rules::match_keywords;

pub const PRODUCT_INFO_FILE: &str = "product_info.csv";
pub const PRODUCT_ITEM_FILE: &str = "product_item.csv";

/// Which stage produced an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMethod {
    Keyword,
    Ml,
}

impl AssignmentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Ml => "ml",
        }
    }
}

/// One output row of the assignment CSV.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryAssignment {
    pub product_id: String,
    pub product_name: String,
    pub brand_name: String,
    pub primary_category: String,
    pub secondary_category: String,
    pub tertiary_category: String,
    pub confidence: f64,
    pub method: AssignmentMethod,
}

/// Summary of one pipeline run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PipelineReport {
    pub keyword_assigned: usize,
    pub ml_assigned: usize,
    /// True when fewer than the minimum labeled rows existed and the
    /// learned fallback was skipped. A documented skip, not an error.
    pub ml_skipped: bool,
    pub by_primary: BTreeMap<String, usize>,
}

impl PipelineReport {
    pub fn total(&self) -> usize {
        self.keyword_assigned + self.ml_assigned
    }
}

/// Two-stage batch classifier over a dataset directory.
///
/// Stage 1 applies the taxonomy keyword rules, Stage 2 a classifier
/// trained on the already-labeled rows. Items covered by Stage 1 are
/// never revisited. Reruns over unchanged inputs produce byte-identical
/// output: both stages iterate in input file order and fitting is
/// deterministic.
#[derive(Clone, Debug)]
pub struct AssignmentPipeline {
    dataset_dir: PathBuf,
}

impl AssignmentPipeline {
    /// Below this many labeled rows Stage 2 is skipped entirely.
    pub const MIN_TRAINING_ROWS: usize = 10;

    pub fn new(dataset_dir: impl Into<PathBuf>) -> Self {
        Self { dataset_dir: dataset_dir.into() }
    }

    /// Run both stages and write the merged assignments to `output_path`.
    pub fn run(&self, output_path: &Path) -> Result<PipelineReport, PipelineError> {
        let info = Catalog::load_or_empty(self.dataset_dir.join(PRODUCT_INFO_FILE))?;
        let items = Catalog::load_items_or_empty(self.dataset_dir.join(PRODUCT_ITEM_FILE))?;

        let existing: HashSet<&str> =
            info.products().iter().map(|product| product.id.as_str()).collect();

        // Stage 1: keyword rules over items the labeled set does not cover.
        let mut assignments: Vec<CategoryAssignment> = Vec::new();
        let mut assigned_ids: HashSet<String> = HashSet::new();
        for item in items.products() {
            let id = item.id.as_str();
            if id.is_empty() || existing.contains(id) {
                continue;
            }
            if let Some(matched) = match_keywords(&item.name) {
                assignments.push(CategoryAssignment {
                    product_id: id.to_string(),
                    product_name: item.name.clone(),
                    brand_name: item.brand.clone(),
                    primary_category: matched.primary.to_string(),
                    secondary_category: matched.secondary.unwrap_or_default().to_string(),
                    tertiary_category: matched.tertiary.unwrap_or_default().to_string(),
                    confidence: matched.confidence,
                    method: AssignmentMethod::Keyword,
                });
                assigned_ids.insert(id.to_string());
            }
        }
        let keyword_assigned = assignments.len();
        tracing::info!(assigned = keyword_assigned, "keyword stage complete");

        // Stage 2: learned fallback for everything the rules left behind.
        let labeled: Vec<&Product> = info
            .products()
            .iter()
            .filter(|product| !product.name.is_empty() && !product.primary_category.is_empty())
            .collect();

        let mut ml_assigned = 0;
        let mut ml_skipped = false;
        if labeled.len() < Self::MIN_TRAINING_ROWS {
            ml_skipped = true;
            tracing::info!(
                labeled = labeled.len(),
                minimum = Self::MIN_TRAINING_ROWS,
                "skipping learned fallback, not enough labeled rows"
            );
        } else {
            let texts: Vec<String> = labeled.iter().map(|product| product.name.clone()).collect();
            let primary_labels: Vec<String> =
                labeled.iter().map(|product| product.primary_category.clone()).collect();
            let primary_clf = TextClassifier::train(&texts, &primary_labels);

            let with_secondary: Vec<&Product> = labeled
                .iter()
                .copied()
                .filter(|product| !product.secondary_category.is_empty())
                .collect();
            let secondary_clf = (with_secondary.len() > Self::MIN_TRAINING_ROWS).then(|| {
                let texts: Vec<String> =
                    with_secondary.iter().map(|product| product.name.clone()).collect();
                let labels: Vec<String> = with_secondary
                    .iter()
                    .map(|product| product.secondary_category.clone())
                    .collect();
                TextClassifier::train(&texts, &labels)
            });

            for item in items.products() {
                let id = item.id.as_str();
                if id.is_empty()
                    || existing.contains(id)
                    || assigned_ids.contains(id)
                    || item.name.is_empty()
                {
                    continue;
                }
                let Some(prediction) = primary_clf.predict(&item.name) else { continue };
                let secondary = secondary_clf
                    .as_ref()
                    .and_then(|classifier| classifier.predict(&item.name))
                    .map(|prediction| prediction.label)
                    .unwrap_or_default();

                assignments.push(CategoryAssignment {
                    product_id: id.to_string(),
                    product_name: item.name.clone(),
                    brand_name: item.brand.clone(),
                    primary_category: prediction.label,
                    secondary_category: secondary,
                    // Stage 2 never predicts a tertiary label.
                    tertiary_category: String::new(),
                    confidence: prediction.probability,
                    method: AssignmentMethod::Ml,
                });
                ml_assigned += 1;
            }
            tracing::info!(assigned = ml_assigned, "learned fallback stage complete");
        }

        write_assignments(output_path, &assignments)?;

        let mut by_primary: BTreeMap<String, usize> = BTreeMap::new();
        for assignment in &assignments {
            *by_primary.entry(assignment.primary_category.clone()).or_insert(0) += 1;
        }
        let report = PipelineReport { keyword_assigned, ml_assigned, ml_skipped, by_primary };
        tracing::info!(
            total = report.total(),
            keyword = report.keyword_assigned,
            ml = report.ml_assigned,
            output = %output_path.display(),
            "categorization complete"
        );
        Ok(report)
    }
}

fn write_assignments(
    path: &Path,
    assignments: &[CategoryAssignment],
) -> Result<(), PipelineError> {
    let to_output_error = |message: String| PipelineError::Output {
        path: path.to_path_buf(),
        message,
    };

    let mut writer =
        csv::Writer::from_path(path).map_err(|error| to_output_error(error.to_string()))?;
    for assignment in assignments {
        writer.serialize(assignment).map_err(|error| to_output_error(error.to_string()))?;
    }
    writer.flush().map_err(|error| to_output_error(error.to_string()))
}
