//! Thin HTTP client for a running `storyweave-server`.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use storyweave_shared::models::{WidgetDescription, WidgetResponse};

use crate::error::{CtlError, CtlResult};

#[derive(Debug, Clone)]
pub(crate) struct ServerClient {
    http: Client,
    base_url: String,
}

impl ServerClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> CtlResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| CtlError::Http {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) async fn health(&self) -> CtlResult<Value> {
        let url = self.url("/health");
        self.send(self.http.get(&url), url).await
    }

    pub(crate) async fn generate(&self, prompt: &str) -> CtlResult<WidgetResponse> {
        let url = self.url("/api/generate-widget");
        let body = json!({ "prompt": prompt });
        self.send(self.http.post(&url).json(&body), url).await
    }

    pub(crate) async fn edit(
        &self,
        widget_id: &str,
        instruction: &str,
        current: &WidgetDescription,
    ) -> CtlResult<WidgetResponse> {
        let url = self.url("/api/edit-widget");
        let body = json!({
            "widget_id": widget_id,
            "edit_prompt": instruction,
            "current_widget": current,
        });
        self.send(self.http.post(&url).json(&body), url).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: String) -> CtlResult<T> {
        tracing::debug!(%url, "Sending request");
        let response = request.send().await.map_err(|source| CtlError::Http {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CtlError::Server {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| CtlError::Http { url, source })
    }
}

/// The server's `{"detail": ...}` message, or the raw body when it has none.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
