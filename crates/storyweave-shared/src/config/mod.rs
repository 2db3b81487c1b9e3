//! # Service Configuration
//!
//! Configuration for the StoryWeave HTTP service and its collaborators.
//!
//! ## Loading
//!
//! Values are layered, later sources overriding earlier ones:
//! 1. Built-in defaults (the `Default` impls below)
//! 2. A TOML file: `$STORYWEAVE_CONFIG`, or `config/storyweave.toml` if present
//! 3. Environment variables: `STORYWEAVE__<SECTION>__<KEY>`
//!
//! `OPENAI_API_KEY` and `REDIS_URL` are honoured when the namespaced values are
//! absent. A `.env` file in the working directory is loaded first.
//!
//! The API key and redis URL (which may carry a password) are held as
//! [`SecretString`]s, so every `Debug` rendering of the configuration is safe
//! to log.
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! cors_origins = ["http://localhost:3000"]
//!
//! [model]
//! model = "gpt-3.5-turbo"
//! timeout_seconds = 60
//!
//! [cache]
//! backend = "moka"
//! ttl_seconds = 3600
//! ```

mod loader;

pub use loader::{ConfigError, CONFIG_PATH_ENV};

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub cache: CacheConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single request, model call included.
    pub request_timeout_seconds: u64,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_seconds: 120,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "https://storyweave-ai.vercel.app".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Chat-completions model settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// API root, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub model: String,
    /// Blank values count as unset.
    #[serde(deserialize_with = "optional_secret")]
    pub api_key: Option<SecretString>,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
    pub generate_temperature: f32,
    pub edit_temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            timeout_seconds: 60,
            max_tokens: 2000,
            generate_temperature: 0.7,
            edit_temperature: 0.5,
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Which cache backend stores generated widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process TTL cache.
    #[default]
    Moka,
    /// Shared redis instance; falls back to `moka` when unreachable.
    Redis,
    /// Caching disabled.
    None,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moka => write!(f, "moka"),
            Self::Redis => write!(f, "redis"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Generated-widget cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub ttl_seconds: u64,
    /// Entry bound for the in-process cache.
    pub max_capacity: u64,
    #[serde(deserialize_with = "optional_secret")]
    pub redis_url: Option<SecretString>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            ttl_seconds: 3600,
            max_capacity: 10_000,
            redis_url: None,
        }
    }
}

impl CacheConfig {
    pub const DEFAULT_REDIS_URL: &'static str = "redis://localhost:6379";

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// The configured redis URL, or [`Self::DEFAULT_REDIS_URL`].
    pub fn redis_url(&self) -> SecretString {
        self.redis_url
            .clone()
            .unwrap_or_else(|| SecretString::from(Self::DEFAULT_REDIS_URL))
    }
}

/// Renderer settings that are not part of the widget description.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base URL the embed loader fetches `widgets/<id>.js` from.
    pub cdn_base_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cdn_base_url: "https://cdn.storyweave.ai".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: "info".to_string(),
        }
    }
}

/// Read an optional secret, treating blank strings as absent.
fn optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from))
}
