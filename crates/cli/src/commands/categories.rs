use glowmatch_core::classify::PRODUCT_INFO_FILE;
use glowmatch_core::config::{AppConfig, LoadOptions};
use glowmatch_core::{Catalog, CategoryLevel};

use crate::commands::{CommandResult, EXIT_CONFIG, EXIT_DATASET};

pub fn run(level: Option<&str>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "categories",
                "config_validation",
                format!("configuration issue: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let level = CategoryLevel::parse_lossy(level.unwrap_or("primary"));
    let catalog = match Catalog::load_or_empty(config.dataset.dir.join(PRODUCT_INFO_FILE)) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "categories",
                "dataset",
                format!("dataset read failed: {error}"),
                EXIT_DATASET,
            );
        }
    };

    let counts = catalog.categories(level);
    let message = format!("{} categories", counts.len());
    let data = serde_json::to_value(&counts).unwrap_or(serde_json::Value::Null);
    CommandResult::success_with_data("categories", message, data)
}
