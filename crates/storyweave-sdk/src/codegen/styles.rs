//! Fixed inline styles of the generated component.

use storyweave_shared::models::{WidgetElement, WidgetStyling};

use super::escape::StyleObject;

const DEFAULT_TEXT_FONT_SIZE: &str = "16px";
const DEFAULT_TEXT_FONT_WEIGHT: &str = "normal";
const DEFAULT_BUTTON_BACKGROUND: &str = "#3b82f6";
const DEFAULT_BUTTON_COLOR: &str = "white";

pub(crate) fn container(styling: &WidgetStyling) -> StyleObject {
    StyleObject::new()
        .with("padding", "20px")
        .with("borderRadius", "8px")
        .with("backgroundColor", &styling.primary_color)
        .with("fontFamily", &styling.font_family)
        .with("maxWidth", "500px")
        .with("margin", "0 auto")
}

pub(crate) fn heading() -> StyleObject {
    StyleObject::new()
        .with("marginBottom", "20px")
        .with("color", "#333")
}

pub(crate) fn results_panel() -> StyleObject {
    StyleObject::new()
        .with("marginTop", "20px")
        .with("padding", "15px")
        .with("backgroundColor", "#f0f0f0")
        .with("borderRadius", "4px")
}

/// `fontSize`/`fontWeight` from the element (or defaults), then every other
/// element style key verbatim.
pub(crate) fn text(element: &WidgetElement) -> StyleObject {
    let mut style = StyleObject::new()
        .with(
            "fontSize",
            element.style_value("fontSize").unwrap_or(DEFAULT_TEXT_FONT_SIZE),
        )
        .with(
            "fontWeight",
            element
                .style_value("fontWeight")
                .unwrap_or(DEFAULT_TEXT_FONT_WEIGHT),
        )
        .with("marginBottom", "10px");
    apply_overrides(&mut style, element);
    style
}

/// `backgroundColor`/`color` from the element (or defaults), the fixed
/// button shape, then every other element style key verbatim.
pub(crate) fn button(element: &WidgetElement) -> StyleObject {
    let mut style = StyleObject::new()
        .with(
            "backgroundColor",
            element
                .style_value("backgroundColor")
                .unwrap_or(DEFAULT_BUTTON_BACKGROUND),
        )
        .with(
            "color",
            element.style_value("color").unwrap_or(DEFAULT_BUTTON_COLOR),
        )
        .with("padding", "10px 20px")
        .with("border", "none")
        .with("borderRadius", "4px")
        .with("cursor", "pointer")
        .with("fontSize", "16px");
    apply_overrides(&mut style, element);
    style
}

pub(crate) fn field_wrapper() -> StyleObject {
    StyleObject::new().with("marginBottom", "15px")
}

pub(crate) fn field_label() -> StyleObject {
    StyleObject::new()
        .with("display", "block")
        .with("marginBottom", "5px")
}

pub(crate) fn text_input() -> StyleObject {
    StyleObject::new()
        .with("width", "100%")
        .with("padding", "8px")
        .with("border", "1px solid #ddd")
        .with("borderRadius", "4px")
        .with("fontSize", "14px")
}

pub(crate) fn question_prompt() -> StyleObject {
    StyleObject::new().with("marginBottom", "10px")
}

pub(crate) fn radio_input() -> StyleObject {
    StyleObject::new().with("marginRight", "8px")
}

pub(crate) fn placeholder() -> StyleObject {
    StyleObject::new()
        .with("padding", "10px")
        .with("marginBottom", "10px")
        .with("border", "1px dashed #9ca3af")
        .with("borderRadius", "4px")
        .with("color", "#6b7280")
        .with("fontStyle", "italic")
}

// BTreeMap iteration keeps override order stable.
fn apply_overrides(style: &mut StyleObject, element: &WidgetElement) {
    for (key, value) in &element.style {
        style.set(key, value);
    }
}
