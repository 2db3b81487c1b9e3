//! React component emission.
//!
//! Lowering maps each [`WidgetElement`] to a [`Fragment`] through an
//! exhaustive match on [`ElementKind`]: the four renderable kinds get their
//! dedicated fragment, every other kind becomes a visible placeholder.

use serde::Serialize;
use storyweave_shared::models::{ElementKind, WidgetDescription, WidgetElement};

use super::escape::{JsLiteral, StyleObject};
use super::{component_name, styles, templates, CodegenError};

/// Generated React component source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSource {
    /// Component identifier, also the default export.
    pub name: String,
    /// Complete ES module text.
    pub code: String,
}

impl ComponentSource {
    /// Conventional file name for the component, e.g. `QuizWidget.jsx`.
    pub fn file_name(&self) -> String {
        format!("{}.jsx", self.name)
    }
}

/// A widget lowered for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDef {
    pub name: String,
    pub title: JsLiteral,
    pub container_style: StyleObject,
    /// One fragment per element, in document order.
    pub fragments: Vec<Fragment>,
}

/// Rendering unit for a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Static text block.
    Text {
        id: JsLiteral,
        content: JsLiteral,
        style: StyleObject,
    },
    /// Labelled text field bound to `formData[id]`.
    Input {
        id: JsLiteral,
        label: JsLiteral,
        placeholder: JsLiteral,
    },
    /// Submit button.
    Button {
        id: JsLiteral,
        label: JsLiteral,
        style: StyleObject,
    },
    /// Radio group named by the element id.
    Question {
        id: JsLiteral,
        label: JsLiteral,
        options: Vec<JsLiteral>,
    },
    /// Element kind without a dedicated rendering.
    Placeholder {
        id: JsLiteral,
        kind: JsLiteral,
        message: JsLiteral,
    },
}

impl ComponentDef {
    /// Lower a widget description.
    ///
    /// Fails with [`CodegenError::DuplicateElementId`] when two elements
    /// share an id, since both would bind to the same `formData` key.
    pub fn lower(doc: &WidgetDescription) -> Result<Self, CodegenError> {
        if let Some(id) = doc.duplicate_element_ids().into_iter().next() {
            return Err(CodegenError::DuplicateElementId { id });
        }

        Ok(Self {
            name: component_name(&doc.title),
            title: JsLiteral::new(&doc.title),
            container_style: styles::container(&doc.effective_styling()),
            fragments: doc.elements.iter().map(Fragment::lower).collect(),
        })
    }
}

impl Fragment {
    pub fn lower(element: &WidgetElement) -> Self {
        let id = JsLiteral::new(&element.id);
        let label = JsLiteral::new(&element.label);

        match &element.kind {
            ElementKind::Text => Self::Text {
                id,
                content: label,
                style: styles::text(element),
            },
            ElementKind::Input => Self::Input {
                id,
                label,
                placeholder: JsLiteral::new(element.placeholder.as_deref().unwrap_or_default()),
            },
            ElementKind::Button => Self::Button {
                id,
                label,
                style: styles::button(element),
            },
            ElementKind::Question => Self::Question {
                id,
                label,
                options: element.options.iter().map(|o| JsLiteral::new(o)).collect(),
            },
            ElementKind::Timer
            | ElementKind::TodoItem
            | ElementKind::Calculation
            | ElementKind::Other(_) => Self::Placeholder {
                id,
                kind: JsLiteral::new(element.kind.as_str()),
                message: JsLiteral::new(&placeholder_message(element)),
            },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

fn placeholder_message(element: &WidgetElement) -> String {
    if element.label.trim().is_empty() {
        format!("Unsupported element: {}", element.kind)
    } else {
        format!("Unsupported element ({}): {}", element.kind, element.label)
    }
}

/// Generate the React component source for a widget description.
///
/// Output is a pure function of `doc`: identical input yields byte-identical
/// source.
pub fn emit_component(doc: &WidgetDescription) -> Result<ComponentSource, CodegenError> {
    let def = ComponentDef::lower(doc)?;
    let placeholders = def.fragments.iter().filter(|f| f.is_placeholder()).count();
    if placeholders > 0 {
        tracing::debug!(
            component = %def.name,
            placeholders,
            "Rendering unsupported elements as placeholders"
        );
    }

    let code = templates::render_component(&def)?;
    tracing::debug!(
        component = %def.name,
        fragments = def.fragments.len(),
        bytes = code.len(),
        "Rendered widget component"
    );

    Ok(ComponentSource {
        name: def.name,
        code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyweave_shared::models::{WidgetStyling, WidgetType};

    fn bmi_calculator() -> WidgetDescription {
        WidgetDescription::new(WidgetType::Calculator, "BMI Calculator")
            .with_element(WidgetElement::new(ElementKind::Input, "height", "Height"))
            .with_element(WidgetElement::new(ElementKind::Input, "weight", "Weight"))
            .with_element(WidgetElement::new(ElementKind::Button, "calc", "Calculate"))
    }

    fn favourite_color_quiz() -> WidgetDescription {
        let mut question = WidgetElement::new(ElementKind::Question, "color", "Favourite color?");
        question.options = vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()];
        WidgetDescription::new(WidgetType::Quiz, "My Cool Quiz!").with_element(question)
    }

    #[test]
    fn test_bmi_calculator_component() {
        let source = emit_component(&bmi_calculator()).unwrap();
        let code = &source.code;

        assert_eq!(source.name, "BMICalculatorWidget");
        assert_eq!(source.file_name(), "BMICalculatorWidget.jsx");
        assert!(code.starts_with("import React, { useState } from 'react';"));
        assert!(code.contains("const BMICalculatorWidget = () => {"));
        assert!(code.contains("useState({})"));
        assert!(code.contains("useState(null)"));
        assert!(code.contains("const handleInputChange = (id, value) => {"));
        assert!(code.contains("setResults(formData);"));
        assert!(code.contains("{\"BMI Calculator\"}</h2>"));
        for id in ["height", "weight"] {
            assert!(code.contains(&format!("data-element-id={{\"{id}\"}}")));
            assert!(code.contains(&format!("value={{formData[\"{id}\"] || ''}}")));
            assert!(code.contains(&format!("handleInputChange(\"{id}\", e.target.value)")));
        }
        assert!(code.contains("data-element-id={\"calc\"}"));
        assert!(code.contains("onClick={handleSubmit}"));
        assert!(code.contains("{\"Calculate\"}"));
        assert!(code.contains("{results && ("));
        assert!(code.contains("JSON.stringify(results, null, 2)"));
        assert!(code.trim_end().ends_with("export default BMICalculatorWidget;"));
    }

    #[test]
    fn test_elements_render_in_document_order() {
        let code = emit_component(&bmi_calculator()).unwrap().code;
        let height = code.find("data-element-id={\"height\"}").unwrap();
        let weight = code.find("data-element-id={\"weight\"}").unwrap();
        let calc = code.find("data-element-id={\"calc\"}").unwrap();
        let results = code.find("{results && (").unwrap();
        assert!(height < weight && weight < calc && calc < results);
    }

    #[test]
    fn test_emission_is_deterministic() {
        let doc = favourite_color_quiz();
        let first = emit_component(&doc).unwrap();
        let second = emit_component(&doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_question_renders_one_radio_per_option() {
        let source = emit_component(&favourite_color_quiz()).unwrap();
        let code = &source.code;

        assert_eq!(source.name, "MyCoolQuizWidget");
        assert!(code.contains("export default MyCoolQuizWidget;"));
        assert_eq!(code.matches("type=\"radio\"").count(), 3);
        assert_eq!(code.matches("name={\"color\"}").count(), 3);
        for (index, option) in ["Red", "Green", "Blue"].iter().enumerate() {
            assert!(code.contains(&format!("key={{{index}}}")));
            assert!(code.contains(&format!("value={{\"{option}\"}}")));
        }
    }

    #[test]
    fn test_question_without_options_renders_prompt_only() {
        let doc = WidgetDescription::new(WidgetType::Quiz, "Quiz").with_element(
            WidgetElement::new(ElementKind::Question, "q1", "Anything?"),
        );
        let code = emit_component(&doc).unwrap().code;
        assert!(code.contains("{\"Anything?\"}</p>"));
        assert!(!code.contains("type=\"radio\""));
    }

    #[test]
    fn test_empty_widget_still_renders_shell() {
        let doc = WidgetDescription::new(WidgetType::Custom, "Empty");
        let code = emit_component(&doc).unwrap().code;
        assert!(code.contains("const EmptyWidget = () => {"));
        assert!(code.contains("{results && ("));
        assert!(!code.contains("data-element-id"));
    }

    #[test]
    fn test_input_placeholder_defaults_to_empty() {
        let mut with_placeholder = WidgetElement::new(ElementKind::Input, "name", "Name");
        with_placeholder.placeholder = Some("Jane Doe".to_string());
        let doc = WidgetDescription::new(WidgetType::Form, "Form")
            .with_element(with_placeholder)
            .with_element(WidgetElement::new(ElementKind::Input, "email", "Email"));
        let code = emit_component(&doc).unwrap().code;
        assert!(code.contains("placeholder={\"Jane Doe\"}"));
        assert!(code.contains("placeholder={\"\"}"));
    }

    #[test]
    fn test_text_and_button_styles() {
        let mut text = WidgetElement::new(ElementKind::Text, "intro", "Welcome");
        text.style.insert("fontWeight".into(), "bold".into());
        let mut button = WidgetElement::new(ElementKind::Button, "go", "Go");
        button.style.insert("backgroundColor".into(), "#10b981".into());
        let doc = WidgetDescription::new(WidgetType::Custom, "Styled")
            .with_element(text)
            .with_element(button);

        let code = emit_component(&doc).unwrap().code;
        assert!(code.contains("fontSize: \"16px\", fontWeight: \"bold\""));
        assert!(code.contains("backgroundColor: \"#10b981\", color: \"white\""));
    }

    #[test]
    fn test_container_uses_styling() {
        let mut doc = bmi_calculator();
        doc.styling = Some(WidgetStyling {
            primary_color: "#ff0000".to_string(),
            font_family: "Georgia, serif".to_string(),
            ..WidgetStyling::default()
        });
        let code = emit_component(&doc).unwrap().code;
        assert!(code.contains("backgroundColor: \"#ff0000\", fontFamily: \"Georgia, serif\""));
    }

    #[test]
    fn test_unsupported_elements_render_placeholders() {
        let doc = WidgetDescription::new(WidgetType::Timer, "Countdown")
            .with_element(WidgetElement::new(ElementKind::Timer, "clock", "Time left"))
            .with_element(WidgetElement::new(
                ElementKind::Other("slider".to_string()),
                "volume",
                "",
            ));
        let code = emit_component(&doc).unwrap().code;

        assert!(code.contains("data-element-id={\"clock\"} data-placeholder-for={\"timer\"}"));
        assert!(code.contains("{\"Unsupported element (timer): Time left\"}"));
        assert!(code.contains("data-element-id={\"volume\"} data-placeholder-for={\"slider\"}"));
        assert!(code.contains("{\"Unsupported element: slider\"}"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let doc = bmi_calculator().with_element(WidgetElement::new(
            ElementKind::Input,
            "height",
            "Height again",
        ));
        let err = emit_component(&doc).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateElementId { ref id } if id == "height"));
    }

    #[test]
    fn test_hostile_text_is_escaped() {
        let mut question = WidgetElement::new(ElementKind::Question, "x\"}", "</div><script>");
        question.options = vec!["{alert(1)}".to_string()];
        let doc = WidgetDescription::new(WidgetType::Quiz, "Title \"quoted\"").with_element(question);

        let code = emit_component(&doc).unwrap().code;
        assert!(!code.contains("</div><script>"));
        assert!(code.contains("\\u003c/div\\u003e\\u003cscript\\u003e"));
        assert!(code.contains("name={\"x\\\"}\"}"));
        assert!(code.contains("value={\"{alert(1)}\"}"));
        assert!(code.contains("{\"Title \\\"quoted\\\"\"}"));
    }

    #[test]
    fn test_fragment_lowering_marks_placeholders() {
        let button = Fragment::lower(&WidgetElement::new(ElementKind::Button, "go", "Go"));
        assert!(!button.is_placeholder());
        let timer = Fragment::lower(&WidgetElement::new(ElementKind::Timer, "t", "Countdown"));
        assert!(timer.is_placeholder());
    }
}
