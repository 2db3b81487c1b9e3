//! Request bodies and their validation rules.

use serde::Deserialize;
use storyweave_shared::models::WidgetDescription;
use validator::{Validate, ValidationError};

/// Longest accepted prompt or edit instruction, in characters.
pub const MAX_PROMPT_CHARS: u64 = 4000;
/// Longest accepted widget id.
pub const MAX_WIDGET_ID_CHARS: u64 = 128;

/// Body of `POST /api/generate-widget`.
///
/// An empty prompt is accepted and passed to the model as is.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateWidgetRequest {
    #[validate(length(max = 4000, message = "prompt must be at most 4000 characters"))]
    pub prompt: String,

    /// Accepted for compatibility; not used.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body of `POST /api/edit-widget`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditWidgetRequest {
    #[validate(custom(function = "validate_widget_id"))]
    pub widget_id: String,

    #[validate(length(
        min = 1,
        max = 4000,
        message = "edit_prompt must be between 1 and 4000 characters"
    ))]
    pub edit_prompt: String,

    pub current_widget: WidgetDescription,
}

/// Widget ids are 1-128 characters of `[A-Za-z0-9_-]`, so they can be used
/// verbatim in DOM ids and URL paths.
pub fn validate_widget_id(widget_id: &str) -> Result<(), ValidationError> {
    let len = widget_id.chars().count() as u64;
    if len == 0 || len > MAX_WIDGET_ID_CHARS {
        return Err(ValidationError::new("widget_id_length")
            .with_message("widget_id must be between 1 and 128 characters".into()));
    }
    if !widget_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::new("widget_id_charset")
            .with_message("widget_id may only contain letters, digits, '-' and '_'".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edit_request(widget_id: &str, edit_prompt: &str) -> EditWidgetRequest {
        serde_json::from_value(json!({
            "widget_id": widget_id,
            "edit_prompt": edit_prompt,
            "current_widget": {"widgetType": "quiz", "title": "Quiz", "elements": []}
        }))
        .unwrap()
    }

    #[test]
    fn test_generate_request_limits() {
        let ok: GenerateWidgetRequest = serde_json::from_value(json!({"prompt": ""})).unwrap();
        assert!(ok.validate().is_ok());
        assert!(ok.user_id.is_none());

        let long = GenerateWidgetRequest {
            prompt: "x".repeat(MAX_PROMPT_CHARS as usize + 1),
            user_id: None,
        };
        assert!(long.validate().is_err());

        let at_limit = GenerateWidgetRequest {
            prompt: "é".repeat(MAX_PROMPT_CHARS as usize),
            user_id: Some("u1".to_string()),
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_edit_request_limits() {
        assert!(edit_request("abc-123_X", "make it blue").validate().is_ok());
        assert!(edit_request("abc123", "").validate().is_err());
        assert!(edit_request("", "make it blue").validate().is_err());
        assert!(edit_request("bad id!", "make it blue").validate().is_err());
        assert!(edit_request(&"a".repeat(129), "make it blue")
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_widget_id() {
        assert!(validate_widget_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_widget_id(&"a".repeat(128)).is_ok());
        assert!(validate_widget_id("<script>").is_err());
        assert!(validate_widget_id("a/b").is_err());
    }

    #[test]
    fn test_validation_error_names_field() {
        let errors = edit_request("bad id!", "x").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("widget_id"));
    }
}
