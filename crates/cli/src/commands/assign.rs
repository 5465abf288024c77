use std::path::PathBuf;

use glowmatch_core::config::{AppConfig, LoadOptions};
use glowmatch_core::{AssignmentPipeline, PipelineError};

use crate::commands::{CommandResult, EXIT_CONFIG, EXIT_DATASET, EXIT_OUTPUT};

const DEFAULT_OUTPUT_FILE: &str = "product_categories_assigned.csv";

pub fn run(dataset: Option<PathBuf>, output: Option<PathBuf>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "assign",
                "config_validation",
                format!("configuration issue: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let dataset_dir = dataset.unwrap_or(config.dataset.dir);
    let output_path = output.unwrap_or_else(|| dataset_dir.join(DEFAULT_OUTPUT_FILE));

    match AssignmentPipeline::new(&dataset_dir).run(&output_path) {
        Ok(report) => {
            let message = format!(
                "assigned {} items ({} keyword, {} ml{}) to {}",
                report.total(),
                report.keyword_assigned,
                report.ml_assigned,
                if report.ml_skipped { ", learned fallback skipped" } else { "" },
                output_path.display()
            );
            let data = serde_json::to_value(&report).unwrap_or(serde_json::Value::Null);
            CommandResult::success_with_data("assign", message, data)
        }
        Err(PipelineError::Catalog(error)) => CommandResult::failure(
            "assign",
            "dataset",
            format!("dataset read failed: {error}"),
            EXIT_DATASET,
        ),
        Err(error @ PipelineError::Output { .. }) => {
            CommandResult::failure("assign", "output", error.to_string(), EXIT_OUTPUT)
        }
    }
}
