use glowmatch_core::config::{AppConfig, LoadOptions};

use crate::commands::{CommandResult, EXIT_CONFIG};

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let data = serde_json::json!({
        "dataset": { "dir": config.dataset.dir },
        "recommend": {
            "default_top_n": config.recommend.default_top_n,
            "default_method": config.recommend.default_method.as_str(),
        },
        "logging": {
            "level": config.logging.level,
            "format": config.logging.format,
        },
    });
    CommandResult::success_with_data("config", "effective configuration", data)
}
