//! Integration tests for the HTTP API.
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against a scripted
//! model, so no network access or API key is required.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use storyweave_server::cache::{MokaWidgetCache, NoopWidgetCache, WidgetCache};
use storyweave_server::model::{ModelError, WidgetModel};
use storyweave_server::{router, AppState, RenderSettings, WidgetService};
use storyweave_shared::config::ServerConfig;
use storyweave_shared::models::{WidgetDescription, WidgetResponse};

/// Answers generation with a fixed BMI calculator and edits with a retitle;
/// fails everything when `broken`.
#[derive(Debug)]
struct StubModel {
    broken: bool,
}

fn bmi_calculator() -> WidgetDescription {
    serde_json::from_value(json!({
        "widgetType": "calculator",
        "title": "BMI Calculator",
        "elements": [
            {"type": "input", "id": "height", "label": "Height"},
            {"type": "input", "id": "weight", "label": "Weight"},
            {"type": "button", "id": "calc", "label": "Calculate"}
        ]
    }))
    .unwrap()
}

#[async_trait]
impl WidgetModel for StubModel {
    async fn generate(&self, _prompt: &str) -> Result<WidgetDescription, ModelError> {
        if self.broken {
            return Err(ModelError::api_error(503, "unavailable"));
        }
        Ok(bmi_calculator())
    }

    async fn edit(
        &self,
        current: &WidgetDescription,
        instruction: &str,
    ) -> Result<WidgetDescription, ModelError> {
        if self.broken {
            return Err(ModelError::EmptyResponse);
        }
        let mut updated = current.clone();
        updated.title = format!("{} ({instruction})", current.title);
        Ok(updated)
    }
}

fn app_with(broken: bool, cache: Arc<dyn WidgetCache>) -> Router {
    let service = WidgetService::new(
        Arc::new(StubModel { broken }),
        cache,
        RenderSettings {
            cdn_base_url: "https://cdn.example.test/".to_string(),
        },
        Duration::from_secs(60),
    );
    router(AppState::new(service), &ServerConfig::default())
}

fn app() -> Router {
    app_with(false, Arc::new(NoopWidgetCache))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_root() {
    let (status, body) = send(app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "StoryWeave AI API", "version": "1.0.0"}));
}

#[tokio::test]
async fn test_health_reports_cache_backend() {
    let (status, body) = send(app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cache"], "none");
}

#[tokio::test]
async fn test_examples() {
    let (status, body) = send(app(), Method::GET, "/api/examples", None).await;
    assert_eq!(status, StatusCode::OK);
    let examples = body["examples"].as_array().unwrap();
    assert_eq!(examples.len(), 8);
    assert_eq!(examples[1], "A BMI calculator");
}

#[tokio::test]
async fn test_generate_widget() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/api/generate-widget",
        Some(json!({"prompt": "A BMI calculator", "user_id": "u-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response: WidgetResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.widget_data, bmi_calculator());
    assert!(response.react_code.contains("const BMICalculatorWidget"));
    assert!(response.react_code.contains("export default BMICalculatorWidget;"));
    assert!(response.embed_code.contains(&format!(
        "https://cdn.example.test/widgets/{}.js",
        response.widget_id
    )));
}

#[tokio::test]
async fn test_generate_empty_prompt_uses_fallback_when_model_fails() {
    let (status, body) = send(
        app_with(true, Arc::new(NoopWidgetCache)),
        Method::POST,
        "/api/generate-widget",
        Some(json!({"prompt": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget_data"]["title"], "Generated Widget");
    assert_eq!(body["widget_data"]["widgetType"], "custom");
    assert_eq!(body["widget_data"]["elements"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_generate_is_cached_per_prompt() {
    let app = app_with(false, Arc::new(MokaWidgetCache::new(16)));
    let request = json!({"prompt": "A BMI calculator"});

    let (_, first) = send(app.clone(), Method::POST, "/api/generate-widget", Some(request.clone())).await;
    let (_, second) = send(app.clone(), Method::POST, "/api/generate-widget", Some(request)).await;
    let (_, other) = send(
        app,
        Method::POST,
        "/api/generate-widget",
        Some(json!({"prompt": "A contact form"})),
    )
    .await;

    assert_eq!(first, second);
    assert_ne!(first["widget_id"], other["widget_id"]);
}

#[tokio::test]
async fn test_generate_rejects_oversized_prompt() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/api/generate-widget",
        Some(json!({"prompt": "x".repeat(4001)})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("prompt"));
}

#[tokio::test]
async fn test_generate_rejects_malformed_body() {
    let (status, _) = send(
        app(),
        Method::POST,
        "/api/generate-widget",
        Some(json!({"text": "missing prompt field"})),
    )
    .await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_edit_widget() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/api/edit-widget",
        Some(json!({
            "widget_id": "abc123",
            "edit_prompt": "v2",
            "current_widget": bmi_calculator()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget_id"], "abc123");
    assert_eq!(body["widget_data"]["title"], "BMI Calculator (v2)");
    let react_code = body["react_code"].as_str().unwrap();
    assert!(react_code.contains("const BMICalculatorV2Widget"));
    let embed_code = body["embed_code"].as_str().unwrap();
    assert!(embed_code.contains("storyweave-widget-abc123"));
    assert!(embed_code.contains("widgets/abc123.js"));
}

#[tokio::test]
async fn test_edit_accepts_numeric_fields_in_current_widget() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/api/edit-widget",
        Some(json!({
            "widget_id": "abc123",
            "edit_prompt": "v2",
            "current_widget": {
                "widgetType": "quiz",
                "title": "Count",
                "elements": [
                    {"type": "question", "id": 1, "label": 2, "options": [3, 4, 5]},
                    {"id": "footer", "label": "Thanks"}
                ]
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let element = &body["widget_data"]["elements"][0];
    assert_eq!(element["id"], "1");
    assert_eq!(element["label"], "2");
    assert_eq!(element["options"], json!(["3", "4", "5"]));
    assert_eq!(body["widget_data"]["elements"][1]["type"], "text");
    let react_code = body["react_code"].as_str().unwrap();
    assert!(react_code.contains("value={\"5\"}"));
}

#[tokio::test]
async fn test_edit_keeps_widget_when_model_fails() {
    let (status, body) = send(
        app_with(true, Arc::new(NoopWidgetCache)),
        Method::POST,
        "/api/edit-widget",
        Some(json!({
            "widget_id": "abc123",
            "edit_prompt": "make it red",
            "current_widget": bmi_calculator()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["widget_data"]["title"], "BMI Calculator");
}

#[tokio::test]
async fn test_edit_validation_errors() {
    for (widget_id, edit_prompt) in [("abc123", ""), ("not a valid id", "x"), ("", "x")] {
        let (status, body) = send(
            app(),
            Method::POST,
            "/api/edit-widget",
            Some(json!({
                "widget_id": widget_id,
                "edit_prompt": edit_prompt,
                "current_widget": bmi_calculator()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{widget_id:?} {edit_prompt:?}");
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn test_export_widget() {
    let (_, generated) = send(
        app(),
        Method::POST,
        "/api/generate-widget",
        Some(json!({"prompt": "A BMI calculator"})),
    )
    .await;

    let (status, body) = send(app(), Method::POST, "/api/export-widget", Some(generated.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["react_code"], generated["react_code"]);
    assert_eq!(body["embed_code"], generated["embed_code"]);
    assert_eq!(body["widget_data"], generated["widget_data"]);
    assert_eq!(
        body["download_url"],
        format!("/api/download/{}", generated["widget_id"].as_str().unwrap())
    );
    assert_eq!(body["filename"], "bmi-calculator.jsx");
}

#[tokio::test]
async fn test_export_rejects_unsafe_widget_id() {
    let (status, _) = send(
        app(),
        Method::POST,
        "/api/export-widget",
        Some(json!({
            "widget_id": "../../etc/passwd",
            "widget_data": bmi_calculator(),
            "react_code": "",
            "embed_code": "",
            "timestamp": "2024-01-01T00:00:00+00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/generate-widget")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}
