//! Widget description model.
//!
//! A [`WidgetDescription`] is the structured document produced by the language
//! model (or supplied by a caller) that fully specifies a renderable widget.
//! JSON field names follow the model's camelCase schema (`widgetType`,
//! `defaultValue`, `primaryColor`, ...).
//!
//! Deserialization is deliberately lenient: model output routinely contains
//! `null` where a list is expected, numbers where text is expected, or enum
//! tags outside the documented set. Such values are defaulted rather than
//! rejected, and unknown element types are preserved verbatim so they survive
//! being echoed back to the caller.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ValidationIssue;

/// Default primary color for widget containers and buttons.
pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
/// Default secondary color.
pub const DEFAULT_SECONDARY_COLOR: &str = "#6b7280";
/// Default container font stack.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Declares a closed string enum that maps unknown tags to a default variant.
macro_rules! lenient_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $($variant:ident => $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(into = "String")]
        pub enum $name {
            $(
                #[doc = concat!("`", $tag, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Wire tag for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($tag => Self::$variant,)+
                    _ => Self::$default,
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(value_to_text(Value::deserialize(deserializer)?)
                    .map(Self::from)
                    .unwrap_or_default())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

lenient_enum! {
    /// Broad category of a widget. Unknown categories become `custom`.
    pub enum WidgetType (default Custom) {
        Quiz => "quiz",
        Calculator => "calculator",
        Form => "form",
        Timer => "timer",
        Todo => "todo",
        Custom => "custom",
    }
}

lenient_enum! {
    /// Validation hint attached to an element. Stored, not enforced.
    pub enum ValidationRule (default Optional) {
        Required => "required",
        Email => "email",
        Number => "number",
        Optional => "optional",
    }
}

lenient_enum! {
    /// Color theme hint. Not used by the renderer.
    pub enum Theme (default Light) {
        Light => "light",
        Dark => "dark",
        Colorful => "colorful",
    }
}

/// Element type tag.
///
/// Only `text`, `input`, `button` and `question` have dedicated renderings.
/// The reserved tags and any unrecognized tag ([`ElementKind::Other`]) are
/// rendered as visible placeholders. A missing or `null` tag means `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum ElementKind {
    #[default]
    Text,
    Input,
    Button,
    Question,
    Timer,
    TodoItem,
    Calculation,
    /// A tag outside the documented set, kept verbatim.
    Other(String),
}

impl ElementKind {
    /// Wire tag for this element kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Input => "input",
            Self::Button => "button",
            Self::Question => "question",
            Self::Timer => "timer",
            Self::TodoItem => "todo_item",
            Self::Calculation => "calculation",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ElementKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "input" => Self::Input,
            "button" => Self::Button,
            "question" => Self::Question,
            "timer" => Self::Timer,
            "todo_item" => Self::TodoItem,
            "calculation" => Self::Calculation,
            _ => Self::Other(value),
        }
    }
}

impl From<ElementKind> for String {
    fn from(value: ElementKind) -> Self {
        match value {
            ElementKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ElementKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(value_to_text(Value::deserialize(deserializer)?)
            .map(Self::from)
            .unwrap_or_default())
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interactive or display unit within a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetElement {
    #[serde(rename = "type", default)]
    pub kind: ElementKind,

    /// Identifier used as the `formData` key and radio group name.
    /// Numeric ids are accepted as text; a missing id is an error.
    #[serde(deserialize_with = "text_or_empty")]
    pub id: String,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub label: String,

    /// Placeholder text, used by `input` only.
    #[serde(
        default,
        deserialize_with = "scalar_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<String>,

    /// Choices, used by `question` only.
    #[serde(
        default,
        deserialize_with = "text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub options: Vec<String>,

    #[serde(default)]
    pub validation: ValidationRule,

    #[serde(
        default,
        deserialize_with = "scalar_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    /// Style property name to value. Sorted so rendering is deterministic.
    #[serde(
        default,
        deserialize_with = "style_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub style: BTreeMap<String, String>,
}

impl WidgetElement {
    /// Create an element with only the required fields set.
    pub fn new(kind: ElementKind, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            label: label.into(),
            placeholder: None,
            options: Vec::new(),
            validation: ValidationRule::default(),
            default_value: None,
            style: BTreeMap::new(),
        }
    }

    /// Look up a style property.
    pub fn style_value(&self, key: &str) -> Option<&str> {
        self.style.get(key).map(String::as_str)
    }
}

/// A conditional behavior hint (`{"if": ..., "then": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicCondition {
    #[serde(rename = "if", default, deserialize_with = "text_or_empty")]
    pub condition: String,
    #[serde(rename = "then", default, deserialize_with = "text_or_empty")]
    pub action: String,
}

/// Free-text behavioral hints. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLogic {
    #[serde(
        default,
        deserialize_with = "scalar_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub on_submit: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub on_change: Option<String>,
    #[serde(
        default,
        deserialize_with = "text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub calculations: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub conditions: Vec<LogicCondition>,
}

/// Widget-wide styling. Every field is individually defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetStyling {
    pub theme: Theme,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
}

impl Default for WidgetStyling {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// The structured document that fully specifies a renderable widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDescription {
    #[serde(default)]
    pub widget_type: WidgetType,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub title: String,

    #[serde(
        default,
        deserialize_with = "scalar_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Rendering order is document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub elements: Vec<WidgetElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<WidgetLogic>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<WidgetStyling>,
}

impl WidgetDescription {
    /// Create an empty description of the given type.
    pub fn new(widget_type: WidgetType, title: impl Into<String>) -> Self {
        Self {
            widget_type,
            title: title.into(),
            description: None,
            elements: Vec::new(),
            logic: None,
            styling: None,
        }
    }

    /// Builder-style element append.
    #[must_use]
    pub fn with_element(mut self, element: WidgetElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Styling with defaults applied when the document carries none.
    pub fn effective_styling(&self) -> WidgetStyling {
        self.styling.clone().unwrap_or_default()
    }

    /// Element ids that occur more than once, in order of first repetition.
    pub fn duplicate_element_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) && reported.insert(element.id.as_str()) {
                duplicates.push(element.id.clone());
            }
        }
        duplicates
    }

    /// Check the document invariants, returning every violation found.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push(ValidationIssue::EmptyTitle);
        }
        for (index, element) in self.elements.iter().enumerate() {
            if element.id.trim().is_empty() {
                issues.push(ValidationIssue::EmptyElementId { index });
            }
        }
        issues.extend(
            self.duplicate_element_ids()
                .into_iter()
                .map(|id| ValidationIssue::DuplicateElementId { id }),
        );
        issues
    }

    /// Rename repeated element ids so every id is unique.
    ///
    /// The first occurrence keeps its id; later ones get the smallest `_N`
    /// suffix (starting at 2) that collides with no other id in the document.
    /// Returns the number of elements renamed.
    pub fn dedupe_element_ids(&mut self) -> usize {
        let original: HashSet<String> = self.elements.iter().map(|e| e.id.clone()).collect();
        let mut taken: HashSet<String> = HashSet::new();
        let mut renamed = 0;

        for element in &mut self.elements {
            if taken.insert(element.id.clone()) {
                continue;
            }
            let mut suffix = 2;
            let replacement = loop {
                let candidate = format!("{}_{}", element.id, suffix);
                if !original.contains(&candidate) && !taken.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            };
            tracing::debug!(from = %element.id, to = %replacement, "Renamed duplicate element id");
            taken.insert(replacement.clone());
            element.id = replacement;
            renamed += 1;
        }

        renamed
    }
}

// =========================================================================
// Lenient field deserializers
// =========================================================================

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any JSON scalar as text; `null` becomes `None`.
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

/// Any JSON scalar as text; `null` becomes the empty string.
fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// A list of scalars as text. `null` entries are dropped.
fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(value_to_text)
        .collect())
}

fn style_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value_to_text(value).map(|text| (key, text)))
        .collect())
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
