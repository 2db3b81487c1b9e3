//! CLI preferences loaded from `.storyweave-ctl.toml`.
//!
//! Separate from the server's `ServiceConfig`: this only supplies defaults for
//! command-line flags.

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use serde::Deserialize;

/// Server used by `generate`, `edit` and `health` when `--server` is absent.
pub(crate) const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// CDN root for `render`. Falls back to the renderer's default.
    pub cdn_base_url: Option<String>,

    /// Directory `render` writes into when `--output-dir` is absent.
    pub default_output_dir: Option<String>,

    /// HTTP timeout for server calls. Generation can take a while.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            cdn_base_url: None,
            default_output_dir: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
