//! Commands that call a running server: `generate`, `edit` and `health`.
//!
//! Responses are printed as pretty JSON on stdout so they can be saved and
//! fed back into `edit` or `render`.

use std::path::Path;

use storyweave_shared::models::WidgetResponse;

use crate::client::ServerClient;
use crate::commands::render::{load_widget, DEFAULT_WIDGET_ID};
use crate::error::CtlResult;
use crate::output;

pub(crate) async fn handle_generate_command(prompt: &str, client: &ServerClient) -> CtlResult<()> {
    output::dim(format!("Generating widget via {}...", client.base_url()));
    let response = client.generate(prompt).await?;
    print_response(&response)
}

pub(crate) async fn handle_edit_command(
    widget: &Path,
    instruction: &str,
    widget_id: Option<String>,
    client: &ServerClient,
) -> CtlResult<()> {
    let loaded = load_widget(widget)?;
    let widget_id = widget_id
        .or(loaded.widget_id)
        .unwrap_or_else(|| DEFAULT_WIDGET_ID.to_string());

    output::dim(format!("Editing widget {widget_id} via {}...", client.base_url()));
    let response = client.edit(&widget_id, instruction, &loaded.widget).await?;
    print_response(&response)
}

pub(crate) async fn handle_health_command(client: &ServerClient) -> CtlResult<()> {
    output::header(format!("StoryWeave server at {}", client.base_url()));
    match client.health().await {
        Ok(health) => {
            let status = health
                .get("status")
                .and_then(|s| s.as_str())
                .unwrap_or("unknown");
            output::status_icon(status == "healthy", format!("Status: {status}"));
            if let Some(cache) = health.get("cache").and_then(|c| c.as_str()) {
                output::label("Cache", cache);
            }
            Ok(())
        }
        Err(e) => {
            output::status_icon(false, "Unreachable");
            Err(e)
        }
    }
}

fn print_response(response: &WidgetResponse) -> CtlResult<()> {
    output::plain(serde_json::to_string_pretty(response)?);
    Ok(())
}
