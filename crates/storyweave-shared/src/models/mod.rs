//! Data model shared by the renderer, the HTTP service and the CLI.
//!
//! - [`widget`]: the widget description document and its parts
//! - [`api`]: request/response payloads exchanged over HTTP

pub mod api;
pub mod widget;

pub use api::{WidgetExport, WidgetResponse};
pub use widget::{
    ElementKind, LogicCondition, Theme, ValidationRule, WidgetDescription, WidgetElement,
    WidgetLogic, WidgetStyling, WidgetType,
};
