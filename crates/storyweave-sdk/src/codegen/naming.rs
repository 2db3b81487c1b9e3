//! Component identifier derivation.

/// Name used when a title yields no identifier characters.
pub const FALLBACK_COMPONENT_NAME: &str = "Widget";

/// Derive a React component identifier from a widget title.
///
/// The title is split on every character outside `[A-Za-z0-9_]`, each piece
/// has its first character upper-cased, and the pieces are joined with a
/// `Widget` suffix. A result starting with a digit gets a `W` prefix.
///
/// ```
/// use storyweave_sdk::component_name;
///
/// assert_eq!(component_name("BMI Calculator"), "BMICalculatorWidget");
/// assert_eq!(component_name("My Cool Quiz!"), "MyCoolQuizWidget");
/// assert_eq!(component_name("!!!"), "Widget");
/// ```
pub fn component_name(title: &str) -> String {
    let mut base = String::with_capacity(title.len());
    for word in title.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            base.push(first.to_ascii_uppercase());
            base.push_str(chars.as_str());
        }
    }

    if base.is_empty() {
        return FALLBACK_COMPONENT_NAME.to_string();
    }
    if base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert(0, 'W');
    }
    format!("{base}Widget")
}
