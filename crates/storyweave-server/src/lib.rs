//! # StoryWeave Server
//!
//! HTTP service that turns plain-English widget requests into React
//! components and embed snippets.
//!
//! ## Modules
//!
//! - [`model`]: language model seam and the OpenAI-compatible client
//! - [`cache`]: generated-widget cache backends
//! - [`service`]: request orchestration (cache → model → render)
//! - [`web`]: axum router, handlers and error mapping

pub mod cache;
pub mod model;
pub mod service;
pub mod web;

pub use service::{RenderSettings, WidgetService};
pub use web::{router, AppState};
