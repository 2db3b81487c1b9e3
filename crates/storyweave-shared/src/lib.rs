//! Shared components for StoryWeave.
//!
//! - [`models`]: widget description document and HTTP payloads
//! - [`config`]: layered service configuration
//! - [`logging`]: tracing subscriber bootstrap
//! - [`errors`]: document validation issues

pub mod config;
pub mod errors;
pub mod logging;
pub mod models;

pub use errors::ValidationIssue;
