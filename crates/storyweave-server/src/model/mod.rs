//! # Widget Model
//!
//! The language model seam. [`WidgetModel`] turns a plain-English request into
//! a [`WidgetDescription`], or applies an edit instruction to an existing one.
//!
//! - [`OpenAiModel`]: chat-completions client (`POST {base_url}/chat/completions`)
//! - [`fallback_widget`]: the built-in widget used when the model is unavailable

mod fallback;
mod openai;
mod prompts;

pub use fallback::fallback_widget;
pub use openai::OpenAiModel;

use std::fmt;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use storyweave_shared::models::WidgetDescription;

/// Matches the outermost `{ ... }` span of a response, across lines.
static EMBEDDED_JSON: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").ok());

/// Produces and edits widget descriptions.
#[async_trait]
pub trait WidgetModel: Send + Sync + fmt::Debug {
    /// Generate a description from a plain-English request.
    async fn generate(&self, prompt: &str) -> Result<WidgetDescription, ModelError>;

    /// Apply a natural-language edit to `current`.
    async fn edit(
        &self,
        current: &WidgetDescription,
        instruction: &str,
    ) -> Result<WidgetDescription, ModelError>;
}

/// Model call failures. Callers treat all of them as "use the fallback".
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model API key is not configured")]
    NotConfigured,

    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model response is not a valid widget description: {0}")]
    InvalidJson(String),

    #[error("prompt rendering failed: {0}")]
    Prompt(String),
}

impl ModelError {
    /// Create an API error from an HTTP status and response body
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if the same call might succeed on retry. Results produced after a
    /// recoverable failure are not cached.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ModelError::Http(e) => e.is_timeout() || e.is_connect(),
            ModelError::Api { status, .. } => *status == 429 || *status >= 500,
            ModelError::EmptyResponse => true,
            _ => false,
        }
    }
}

/// How strictly to parse model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseParsing {
    /// The whole (trimmed) content must be a JSON document.
    Strict,
    /// Fall back to the first `{ ... }` span when the content has prose around it.
    AllowEmbedded,
}

/// Parse chat-completion content into a widget description.
pub fn parse_widget_content(
    content: &str,
    parsing: ResponseParsing,
) -> Result<WidgetDescription, ModelError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    let direct_err = match serde_json::from_str::<WidgetDescription>(content) {
        Ok(doc) => return Ok(doc),
        Err(e) => e,
    };
    if parsing == ResponseParsing::Strict {
        return Err(ModelError::InvalidJson(direct_err.to_string()));
    }

    let embedded = EMBEDDED_JSON
        .as_ref()
        .and_then(|pattern| pattern.find(content))
        .ok_or_else(|| ModelError::InvalidJson(direct_err.to_string()))?;

    tracing::debug!(
        offset = embedded.start(),
        len = embedded.len(),
        "Extracting embedded JSON from model response"
    );
    serde_json::from_str(embedded.as_str()).map_err(|e| ModelError::InvalidJson(e.to_string()))
}
