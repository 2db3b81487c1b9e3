use storyweave_shared::models::{
    ElementKind, ValidationRule, WidgetDescription, WidgetElement, WidgetLogic, WidgetStyling,
    WidgetType,
};

/// The widget served when the model cannot produce one.
///
/// A heading, one free-text input and a submit button.
pub fn fallback_widget() -> WidgetDescription {
    let mut heading = WidgetElement::new(ElementKind::Text, "title", "Your Widget");
    heading.style.insert("fontSize".to_string(), "24px".to_string());
    heading.style.insert("fontWeight".to_string(), "bold".to_string());

    let mut input = WidgetElement::new(ElementKind::Input, "input1", "Input Field");
    input.placeholder = Some("Enter something...".to_string());
    input.validation = ValidationRule::Optional;

    let mut submit = WidgetElement::new(ElementKind::Button, "submit", "Submit");
    submit
        .style
        .insert("backgroundColor".to_string(), "#3b82f6".to_string());
    submit
        .style
        .insert("color".to_string(), "white".to_string());

    let mut widget = WidgetDescription::new(WidgetType::Custom, "Generated Widget")
        .with_element(heading)
        .with_element(input)
        .with_element(submit);
    widget.description = Some("A widget based on your request".to_string());
    widget.logic = Some(WidgetLogic {
        on_submit: Some("Process the input".to_string()),
        ..WidgetLogic::default()
    });
    widget.styling = Some(WidgetStyling::default());
    widget
}
