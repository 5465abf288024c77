use glowmatch_core::classify::{PRODUCT_INFO_FILE, PRODUCT_ITEM_FILE};
use glowmatch_core::config::{AppConfig, LoadOptions};
use glowmatch_core::{Catalog, CategoryLevel, RankingEngine};

use crate::commands::{CommandResult, EXIT_CONFIG, EXIT_DATASET};

const DEFAULT_TOP_N: usize = 20;

pub fn run(category: Option<&str>, level: Option<&str>, top_n: Option<usize>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "rank",
                "config_validation",
                format!("configuration issue: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let top_n = top_n.unwrap_or(DEFAULT_TOP_N);
    let level = CategoryLevel::parse_lossy(level.unwrap_or("primary"));

    // The item file carries the richer reviews counter and is preferred
    // for the global board; category boards need the categorized dataset.
    let item_path = config.dataset.dir.join(PRODUCT_ITEM_FILE);
    let catalog = if category.is_none() && item_path.exists() {
        Catalog::load_items(&item_path)
    } else {
        Catalog::load_or_empty(config.dataset.dir.join(PRODUCT_INFO_FILE))
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "rank",
                "dataset",
                format!("dataset read failed: {error}"),
                EXIT_DATASET,
            );
        }
    };

    let engine = RankingEngine::new(&catalog);
    let ranking = match category {
        Some(category) => engine.category_ranking(category, level, top_n),
        None => engine.global_ranking(top_n),
    };

    let message = match category {
        Some(category) => format!("top {} in {category}", ranking.len()),
        None => format!("top {} overall", ranking.len()),
    };
    let data = serde_json::to_value(&ranking).unwrap_or(serde_json::Value::Null);
    CommandResult::success_with_data("rank", message, data)
}
