//! Embed snippet emission.

use serde::Serialize;
use storyweave_shared::models::WidgetDescription;

use super::escape::{comment_text, JsLiteral};
use super::{templates, CodegenError};

/// CDN root the loader script is fetched from by default.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.storyweave.ai";

/// Prefix of the DOM id the widget mounts into.
pub const CONTAINER_ID_PREFIX: &str = "storyweave-widget-";

/// Generated HTML embed snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedSource {
    /// Unescaped DOM id of the mount point.
    pub container_id: String,
    /// Absolute URL of the widget bundle.
    pub script_url: String,
    /// Snippet text: mount point plus loader script.
    pub code: String,
}

/// Generate the embed snippet for a widget served from [`DEFAULT_CDN_BASE`].
pub fn emit_embed(doc: &WidgetDescription, widget_id: &str) -> Result<EmbedSource, CodegenError> {
    emit_embed_with_cdn(doc, widget_id, DEFAULT_CDN_BASE)
}

/// Generate the embed snippet with an explicit CDN root.
///
/// Trailing slashes on `cdn_base` are ignored. The widget id is HTML-escaped
/// in the container and JS-escaped in the script URL; the title only appears
/// inside a comment.
pub fn emit_embed_with_cdn(
    doc: &WidgetDescription,
    widget_id: &str,
    cdn_base: &str,
) -> Result<EmbedSource, CodegenError> {
    let container_id = format!("{CONTAINER_ID_PREFIX}{widget_id}");
    let script_url = format!("{}/widgets/{widget_id}.js", cdn_base.trim_end_matches('/'));

    let code = templates::render_embed(
        &container_id,
        &comment_text(&doc.title),
        &JsLiteral::new(&script_url),
    )?;

    Ok(EmbedSource {
        container_id,
        script_url,
        code,
    })
}
