//! OpenAI-compatible chat-completions client.

use std::fmt;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use storyweave_shared::config::ModelConfig;
use storyweave_shared::models::WidgetDescription;
use tracing::debug;

use super::prompts::{self, EDIT_SYSTEM_PROMPT, GENERATE_SYSTEM_PROMPT};
use super::{parse_widget_content, ModelError, ResponseParsing, WidgetModel};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Widget model backed by an OpenAI-compatible `/chat/completions` endpoint.
///
/// Without an API key every call fails with [`ModelError::NotConfigured`],
/// which the service answers with the fallback widget.
pub struct OpenAiModel {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    max_tokens: u32,
    generate_temperature: f32,
    edit_temperature: f32,
}

impl OpenAiModel {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.expose_secret().trim().is_empty()),
            max_tokens: config.max_tokens,
            generate_temperature: config.generate_temperature,
            edit_temperature: config.edit_temperature,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send one system + user exchange and return the assistant content.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, ModelError> {
        let api_key = self.api_key.as_ref().ok_or(ModelError::NotConfigured)?;
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            max_tokens: self.max_tokens,
        };

        debug!(url = %url, model = %self.model, temperature, "Sending chat completion request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::api_error(status.as_u16(), body));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)?;

        debug!(chars = content.len(), "Received chat completion");
        Ok(content)
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[async_trait]
impl WidgetModel for OpenAiModel {
    async fn generate(&self, prompt: &str) -> Result<WidgetDescription, ModelError> {
        let user = prompts::generation_prompt(prompt)?;
        let content = self
            .complete(GENERATE_SYSTEM_PROMPT, &user, self.generate_temperature)
            .await?;
        parse_widget_content(&content, ResponseParsing::AllowEmbedded)
    }

    async fn edit(
        &self,
        current: &WidgetDescription,
        instruction: &str,
    ) -> Result<WidgetDescription, ModelError> {
        let user = prompts::edit_prompt(current, instruction)?;
        let content = self
            .complete(EDIT_SYSTEM_PROMPT, &user, self.edit_temperature)
            .await?;
        parse_widget_content(&content, ResponseParsing::Strict)
    }
}
