//! Widget code generation.
//!
//! A [`WidgetDescription`](storyweave_shared::models::WidgetDescription) is
//! lowered into an intermediate element tree ([`ComponentDef`]) whose every
//! string is already escaped for its output position, then rendered through
//! Askama templates into:
//!
//! - a self-contained React function component ([`emit_component`])
//! - an HTML embed snippet that loads the hosted bundle ([`emit_embed`])

pub mod component;
pub mod embed;
pub mod escape;
mod naming;
mod styles;
mod templates;

pub use component::{emit_component, ComponentDef, ComponentSource, Fragment};
pub use embed::{emit_embed, emit_embed_with_cdn, EmbedSource, DEFAULT_CDN_BASE};
pub use naming::{component_name, FALLBACK_COMPONENT_NAME};

/// Errors that can occur during code generation.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("element id '{id}' is used more than once")]
    DuplicateElementId { id: String },

    #[error("template rendering failed: {0}")]
    Rendering(String),
}
