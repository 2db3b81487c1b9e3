//! Route handlers.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use storyweave_shared::models::{WidgetExport, WidgetResponse};
use validator::Validate;

use super::error::ApiError;
use super::requests::{validate_widget_id, EditWidgetRequest, GenerateWidgetRequest};
use super::AppState;

/// Version reported by `GET /`.
pub const API_VERSION: &str = "1.0.0";

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "StoryWeave AI API",
        "version": API_VERSION,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "cache": state.service.cache_backend(),
    }))
}

pub async fn examples(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "examples": state.service.examples() }))
}

pub async fn generate_widget(
    State(state): State<AppState>,
    Json(request): Json<GenerateWidgetRequest>,
) -> Result<Json<WidgetResponse>, ApiError> {
    request.validate()?;
    let response = state
        .service
        .generate(&request.prompt)
        .await
        .map_err(ApiError::Generate)?;
    Ok(Json(response))
}

pub async fn edit_widget(
    State(state): State<AppState>,
    Json(request): Json<EditWidgetRequest>,
) -> Result<Json<WidgetResponse>, ApiError> {
    request.validate()?;
    let response = state
        .service
        .edit(&request.widget_id, &request.edit_prompt, request.current_widget)
        .await
        .map_err(ApiError::Edit)?;
    Ok(Json(response))
}

pub async fn export_widget(
    State(state): State<AppState>,
    Json(widget): Json<WidgetResponse>,
) -> Result<Json<WidgetExport>, ApiError> {
    validate_widget_id(&widget.widget_id)?;
    Ok(Json(state.service.export(widget)))
}
