//! Layered configuration loading (defaults → TOML file → environment).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use secrecy::SecretString;

use super::ServiceConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STORYWEAVE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config/storyweave.toml";
const ENV_PREFIX: &str = "STORYWEAVE";
const ENV_SEPARATOR: &str = "__";
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
const REDIS_URL_ENV: &str = "REDIS_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("config file not found: {path}")]
    MissingFile { path: PathBuf },
}

impl ServiceConfig {
    /// Load configuration from `.env`, the config file and the environment.
    ///
    /// An explicit `$STORYWEAVE_CONFIG` path must exist; the default path is
    /// optional.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(?path, "Loaded .env file");
        }
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from(explicit.as_deref())
    }

    /// Load configuration using `path` as the config file (or the default
    /// location when `None`), then apply environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::MissingFile {
                        path: path.to_path_buf(),
                    });
                }
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(true)
            }
            None => File::new(DEFAULT_CONFIG_PATH, FileFormat::Toml).required(false),
        };

        let mut loaded: ServiceConfig = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?
            .try_deserialize()?;

        loaded.apply_legacy_env();
        tracing::debug!(config = ?loaded, "Resolved service configuration");
        Ok(loaded)
    }

    /// Fill unset values from the un-namespaced variables older deployments use.
    fn apply_legacy_env(&mut self) {
        if self.model.api_key.is_none() {
            self.model.api_key = non_empty_env(OPENAI_API_KEY_ENV).map(SecretString::from);
        }
        if self.cache.redis_url.is_none() {
            self.cache.redis_url = non_empty_env(REDIS_URL_ENV).map(SecretString::from);
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
