use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommend::Method;

/// Effective application configuration.
///
/// Precedence, lowest to highest: built-in defaults, optional
/// `glowmatch.toml` patch, `GLOWMATCH_*` environment overrides,
/// programmatic overrides. Validation runs last over the merged result.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub recommend: RecommendConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatasetConfig {
    /// Directory holding `product_info.csv` / `product_item.csv`.
    pub dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct RecommendConfig {
    pub default_top_n: usize,
    pub default_method: Method,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub dataset_dir: Option<PathBuf>,
    pub default_top_n: Option<usize>,
    pub default_method: Option<Method>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig { dir: PathBuf::from("dataset") },
            recommend: RecommendConfig { default_top_n: 10, default_method: Method::Tfidf },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("glowmatch.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(dataset) = patch.dataset {
            if let Some(dir) = dataset.dir {
                self.dataset.dir = dir;
            }
        }

        if let Some(recommend) = patch.recommend {
            if let Some(default_top_n) = recommend.default_top_n {
                self.recommend.default_top_n = default_top_n;
            }
            if let Some(default_method) = recommend.default_method {
                self.recommend.default_method = default_method;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("GLOWMATCH_DATASET_DIR") {
            self.dataset.dir = PathBuf::from(value);
        }
        if let Some(value) = read_env("GLOWMATCH_DEFAULT_TOP_N") {
            self.recommend.default_top_n = parse_usize("GLOWMATCH_DEFAULT_TOP_N", &value)?;
        }
        if let Some(value) = read_env("GLOWMATCH_DEFAULT_METHOD") {
            self.recommend.default_method = value.parse()?;
        }

        let log_level =
            read_env("GLOWMATCH_LOGGING_LEVEL").or_else(|| read_env("GLOWMATCH_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("GLOWMATCH_LOGGING_FORMAT").or_else(|| read_env("GLOWMATCH_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(dataset_dir) = overrides.dataset_dir {
            self.dataset.dir = dataset_dir;
        }
        if let Some(default_top_n) = overrides.default_top_n {
            self.recommend.default_top_n = default_top_n;
        }
        if let Some(default_method) = overrides.default_method {
            self.recommend.default_method = default_method;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("dataset.dir must not be empty".to_string()));
        }

        if self.recommend.default_top_n == 0 || self.recommend.default_top_n > 500 {
            return Err(ConfigError::Validation(
                "recommend.default_top_n must be in range 1..=500".to_string(),
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Validation(
                "logging.level must be one of trace|debug|info|warn|error".to_string(),
            )),
        }
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("glowmatch.toml"), PathBuf::from("config/glowmatch.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    dataset: Option<DatasetPatch>,
    recommend: Option<RecommendPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatasetPatch {
    dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendPatch {
    default_top_n: Option<usize>,
    default_method: Option<Method>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use crate::recommend::Method;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    #[test]
    fn defaults_validate() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(&[
            "GLOWMATCH_DATASET_DIR",
            "GLOWMATCH_DEFAULT_TOP_N",
            "GLOWMATCH_DEFAULT_METHOD",
            "GLOWMATCH_LOG_LEVEL",
            "GLOWMATCH_LOG_FORMAT",
        ]);

        let config = AppConfig::load(LoadOptions::default()).expect("defaults should load");
        assert_eq!(config.recommend.default_top_n, 10);
        assert_eq!(config.recommend.default_method, Method::Tfidf);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_patch_and_env_precedence() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("GLOWMATCH_DEFAULT_TOP_N", "25");

        let result = (|| {
            let dir = TempDir::new().expect("tempdir");
            let path = dir.path().join("glowmatch.toml");
            fs::write(
                &path,
                r#"
[dataset]
dir = "fixtures/dataset"

[recommend]
default_top_n = 15
default_method = "rule"

[logging]
level = "warn"
"#,
            )
            .expect("config fixture");

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .expect("config should load");

            // Env wins over the file; the file wins over defaults.
            assert_eq!(config.recommend.default_top_n, 25);
            assert_eq!(config.recommend.default_method, Method::Rule);
            assert_eq!(config.logging.level, "warn");
            assert_eq!(config.dataset.dir, std::path::PathBuf::from("fixtures/dataset"));
        })();

        clear_vars(&["GLOWMATCH_DEFAULT_TOP_N"]);
        result
    }

    #[test]
    fn programmatic_overrides_win_over_env() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("GLOWMATCH_LOG_LEVEL", "warn");

        let result = (|| {
            let config = AppConfig::load(LoadOptions {
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .expect("config should load");

            assert_eq!(config.logging.level, "debug");
        })();

        clear_vars(&["GLOWMATCH_LOG_LEVEL"]);
        result
    }

    #[test]
    fn invalid_top_n_fails_validation() {
        let _guard = env_lock().lock().expect("env lock");
        clear_vars(&["GLOWMATCH_DEFAULT_TOP_N"]);

        let error = AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                default_top_n: Some(0),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect_err("zero top_n should fail");

        assert!(matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("default_top_n")
        ));
    }

    #[test]
    fn unparsable_env_override_is_reported_with_key_and_value() {
        let _guard = env_lock().lock().expect("env lock");

        env::set_var("GLOWMATCH_DEFAULT_TOP_N", "lots");

        let result = (|| {
            let error = AppConfig::load(LoadOptions::default())
                .expect_err("non-numeric top_n should fail");
            assert!(matches!(
                error,
                ConfigError::InvalidEnvOverride { ref key, ref value }
                    if key == "GLOWMATCH_DEFAULT_TOP_N" && value == "lots"
            ));
        })();

        clear_vars(&["GLOWMATCH_DEFAULT_TOP_N"]);
        result
    }

    #[test]
    fn require_file_without_file_is_an_error() {
        let _guard = env_lock().lock().expect("env lock");

        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("glowmatch.toml");
        let error = AppConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect_err("missing required file should fail");

        assert!(matches!(error, ConfigError::MissingConfigFile(path) if path == missing));
    }
}
