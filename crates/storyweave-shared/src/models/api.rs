//! HTTP payloads shared between the server and its clients.

use serde::{Deserialize, Serialize};

use super::widget::WidgetDescription;

/// Example prompts offered to new users.
pub const EXAMPLE_PROMPTS: [&str; 8] = [
    "Make me a quiz for my friends",
    "A BMI calculator",
    "A feedback form with branching logic",
    "A countdown timer",
    "A todo list with categories",
    "A contact form",
    "A simple calculator",
    "A survey with multiple choice questions",
];

/// A rendered widget: the description plus both generated artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetResponse {
    pub widget_id: String,
    pub widget_data: WidgetDescription,
    pub react_code: String,
    pub embed_code: String,
    /// RFC 3339 generation timestamp.
    pub timestamp: String,
}

/// Export bundle returned by `/api/export-widget`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetExport {
    pub react_code: String,
    pub embed_code: String,
    pub widget_data: WidgetDescription,
    pub download_url: String,
    /// Suggested file name for `react_code`.
    pub filename: String,
}
