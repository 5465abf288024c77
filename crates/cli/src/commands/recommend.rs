use std::fs;
use std::path::Path;

use glowmatch_core::classify::PRODUCT_INFO_FILE;
use glowmatch_core::config::{AppConfig, LoadOptions};
use glowmatch_core::{recommend_products, Catalog, SimilarityRecommender, SkinProfile};

use crate::commands::{CommandResult, EXIT_CONFIG, EXIT_DATASET, EXIT_INVALID_ARGUMENT};

pub fn run(profile_arg: &str, top_n: Option<usize>, method: Option<&str>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                format!("configuration issue: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let method = match method {
        None => config.recommend.default_method,
        Some(raw) => match raw.parse() {
            Ok(method) => method,
            Err(error) => {
                return CommandResult::failure(
                    "recommend",
                    "invalid_argument",
                    format!("{error}"),
                    EXIT_INVALID_ARGUMENT,
                );
            }
        },
    };
    let top_n = top_n.unwrap_or(config.recommend.default_top_n);

    let profile = match load_profile(profile_arg) {
        Ok(profile) => profile,
        Err(message) => {
            return CommandResult::failure(
                "recommend",
                "invalid_argument",
                message,
                EXIT_INVALID_ARGUMENT,
            );
        }
    };

    let catalog = match Catalog::load_or_empty(config.dataset.dir.join(PRODUCT_INFO_FILE)) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "dataset",
                format!("dataset read failed: {error}"),
                EXIT_DATASET,
            );
        }
    };

    let similarity = SimilarityRecommender::new(&catalog);
    let results = recommend_products(&catalog, &similarity, &profile, top_n, method);

    let message = format!("{} recommendations ({})", results.len(), method.as_str());
    let data = serde_json::to_value(&results).unwrap_or(serde_json::Value::Null);
    CommandResult::success_with_data("recommend", message, data)
}

/// The profile argument is either inline JSON or a path to a JSON file.
fn load_profile(profile_arg: &str) -> Result<SkinProfile, String> {
    let raw = if Path::new(profile_arg).exists() {
        fs::read_to_string(profile_arg)
            .map_err(|error| format!("could not read profile file `{profile_arg}`: {error}"))?
    } else {
        profile_arg.to_string()
    };

    serde_json::from_str(&raw).map_err(|error| format!("invalid skin profile JSON: {error}"))
}
