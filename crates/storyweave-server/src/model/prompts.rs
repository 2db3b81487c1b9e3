//! Askama prompt templates for widget generation and editing.

use askama::Template;
use storyweave_shared::models::WidgetDescription;

use super::ModelError;

pub(crate) const GENERATE_SYSTEM_PROMPT: &str = "You are an expert web developer and UI designer.";
pub(crate) const EDIT_SYSTEM_PROMPT: &str = "You are an expert web developer.";

#[derive(Template, Debug)]
#[template(path = "prompts/generate_widget.txt", escape = "none")]
struct GenerateWidgetPrompt<'a> {
    request: &'a str,
}

#[derive(Template, Debug)]
#[template(path = "prompts/edit_widget.txt", escape = "none")]
struct EditWidgetPrompt<'a> {
    current_widget: &'a str,
    instruction: &'a str,
}

/// The user message asking for a new widget description.
pub(crate) fn generation_prompt(request: &str) -> Result<String, ModelError> {
    GenerateWidgetPrompt { request }
        .render()
        .map_err(|e| ModelError::Prompt(e.to_string()))
}

/// The user message asking for `instruction` to be applied to `current`.
pub(crate) fn edit_prompt(
    current: &WidgetDescription,
    instruction: &str,
) -> Result<String, ModelError> {
    let current_widget =
        serde_json::to_string_pretty(current).map_err(|e| ModelError::Prompt(e.to_string()))?;
    EditWidgetPrompt {
        current_widget: &current_widget,
        instruction,
    }
    .render()
    .map_err(|e| ModelError::Prompt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyweave_shared::models::{ElementKind, WidgetElement, WidgetType};

    #[test]
    fn test_generation_prompt_embeds_request_and_schema() {
        let prompt = generation_prompt("A BMI calculator").unwrap();
        assert!(prompt.contains("User request: A BMI calculator"));
        assert!(prompt.contains("\"widgetType\": \"quiz|calculator|form|timer|todo|custom\""));
        assert!(prompt.contains("ONLY valid JSON"));
    }

    #[test]
    fn test_generation_prompt_is_not_html_escaped() {
        let prompt = generation_prompt("a <b>bold</b> \"quiz\" & more").unwrap();
        assert!(prompt.contains("a <b>bold</b> \"quiz\" & more"));
    }

    #[test]
    fn test_edit_prompt_embeds_pretty_widget() {
        let current = WidgetDescription::new(WidgetType::Form, "Contact")
            .with_element(WidgetElement::new(ElementKind::Input, "email", "Email"));
        let prompt = edit_prompt(&current, "make the button red").unwrap();
        assert!(prompt.contains("\"title\": \"Contact\""));
        assert!(prompt.contains("\n  \"elements\": ["));
        assert!(prompt.contains("User's edit request: make the button red"));
    }
}
