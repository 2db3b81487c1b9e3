//! # HTTP API
//!
//! axum router exposing the widget service:
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`handlers::root`] |
//! | GET | `/health` | [`handlers::health`] |
//! | GET | `/api/examples` | [`handlers::examples`] |
//! | POST | `/api/generate-widget` | [`handlers::generate_widget`] |
//! | POST | `/api/edit-widget` | [`handlers::edit_widget`] |
//! | POST | `/api/export-widget` | [`handlers::export_widget`] |

pub mod error;
pub mod handlers;
pub mod requests;

pub use error::ApiError;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use storyweave_shared::config::ServerConfig;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::service::WidgetService;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<WidgetService>,
}

impl AppState {
    pub fn new(service: WidgetService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the application router with tracing, timeout and CORS layers.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/examples", get(handlers::examples))
        .route("/api/generate-widget", post(handlers::generate_widget))
        .route("/api/edit-widget", post(handlers::edit_widget))
        .route("/api/export-widget", post(handlers::export_widget))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(server.request_timeout()))
                .layer(cors_layer(&server.cors_origins)),
        )
        .with_state(state)
}

/// Credentialed CORS for the configured origins.
///
/// A `*` entry allows any origin, which browsers only accept without
/// credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    if origins.iter().any(|origin| origin.trim() == "*") {
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}
