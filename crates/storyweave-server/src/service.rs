//! # Widget Service
//!
//! Orchestrates one request end to end: cache lookup, model call (with the
//! built-in fallback on any model failure), duplicate-id repair, rendering of
//! both artifacts, and cache store. A fallback produced after a transient
//! model failure is not cached, so the next identical prompt retries the model.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use heck::ToKebabCase;
use storyweave_sdk::{emit_component, emit_embed_with_cdn, CodegenError};
use storyweave_shared::config::{RenderConfig, ServiceConfig};
use storyweave_shared::models::api::EXAMPLE_PROMPTS;
use storyweave_shared::models::{WidgetDescription, WidgetExport, WidgetResponse};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::{self, WidgetCache};
use crate::model::{fallback_widget, ModelError, OpenAiModel, WidgetModel};

/// Rendering inputs that are not part of the widget description.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub cdn_base_url: String,
}

impl From<&RenderConfig> for RenderSettings {
    fn from(config: &RenderConfig) -> Self {
        Self {
            cdn_base_url: config.cdn_base_url.clone(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

#[derive(Debug)]
pub struct WidgetService {
    model: Arc<dyn WidgetModel>,
    cache: Arc<dyn WidgetCache>,
    render: RenderSettings,
    cache_ttl: Duration,
}

impl WidgetService {
    pub fn new(
        model: Arc<dyn WidgetModel>,
        cache: Arc<dyn WidgetCache>,
        render: RenderSettings,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            model,
            cache,
            render,
            cache_ttl,
        }
    }

    /// Wire the OpenAI model and configured cache from service configuration.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, ModelError> {
        let model = OpenAiModel::new(&config.model)?;
        if model.is_configured() {
            info!(model = model.model_name(), "Model client ready");
        } else {
            warn!("No model API key configured, every request will use the fallback widget");
        }

        let cache = cache::build_cache(&config.cache).await;
        Ok(Self::new(
            Arc::new(model),
            cache,
            RenderSettings::from(&config.render),
            config.cache.ttl(),
        ))
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend_name()
    }

    /// Example prompts offered to new users.
    pub fn examples(&self) -> &'static [&'static str] {
        &EXAMPLE_PROMPTS
    }

    /// Generate (or serve from cache) a widget for `prompt`.
    pub async fn generate(&self, prompt: &str) -> Result<WidgetResponse, CodegenError> {
        let key = cache::cache_key(prompt);
        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                debug!(widget_id = %cached.widget_id, "Serving widget from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache lookup failed"),
        }

        let (widget, cacheable) = match self.model.generate(prompt).await {
            Ok(widget) => (widget, true),
            Err(e) => {
                warn!(error = %e, "Widget generation failed, using fallback widget");
                (fallback_widget(), !e.is_recoverable())
            }
        };

        let response = self.render(widget, Uuid::new_v4().to_string())?;

        if !cacheable {
            debug!(widget_id = %response.widget_id, "Skipping cache for transient model failure");
        } else if let Err(e) = self.cache.put(&key, &response, self.cache_ttl).await {
            warn!(error = %e, "Failed to cache generated widget");
        }

        info!(
            widget_id = %response.widget_id,
            widget_type = %response.widget_data.widget_type,
            elements = response.widget_data.elements.len(),
            "Generated widget"
        );
        Ok(response)
    }

    /// Apply `instruction` to `current` and re-render under `widget_id`.
    ///
    /// A failed model call keeps `current` unchanged. Edits are not cached.
    pub async fn edit(
        &self,
        widget_id: &str,
        instruction: &str,
        current: WidgetDescription,
    ) -> Result<WidgetResponse, CodegenError> {
        let widget = match self.model.edit(&current, instruction).await {
            Ok(updated) => updated,
            Err(e) => {
                warn!(widget_id, error = %e, "Widget edit failed, keeping current widget");
                current
            }
        };

        let response = self.render(widget, widget_id.to_string())?;
        info!(widget_id, "Edited widget");
        Ok(response)
    }

    /// Package a rendered widget for download.
    pub fn export(&self, response: WidgetResponse) -> WidgetExport {
        WidgetExport {
            download_url: format!("/api/download/{}", response.widget_id),
            filename: export_filename(&response.widget_data.title),
            react_code: response.react_code,
            embed_code: response.embed_code,
            widget_data: response.widget_data,
        }
    }

    fn render(
        &self,
        mut widget: WidgetDescription,
        widget_id: String,
    ) -> Result<WidgetResponse, CodegenError> {
        let renamed = widget.dedupe_element_ids();
        if renamed > 0 {
            warn!(%widget_id, renamed, "Repaired duplicate element ids");
        }

        let component = emit_component(&widget)?;
        let embed = emit_embed_with_cdn(&widget, &widget_id, &self.render.cdn_base_url)?;

        Ok(WidgetResponse {
            widget_id,
            widget_data: widget,
            react_code: component.code,
            embed_code: embed.code,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

/// `bmi-calculator.jsx` for "BMI Calculator"; `widget.jsx` when the title
/// has no usable characters.
fn export_filename(title: &str) -> String {
    let stem = title.to_kebab_case();
    if stem.is_empty() {
        "widget.jsx".to_string()
    } else {
        format!("{stem}.jsx")
    }
}
