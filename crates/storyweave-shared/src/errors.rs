//! # Shared Error Types
//!
//! Document-level validation issues reported by
//! [`WidgetDescription::validate`](crate::models::WidgetDescription::validate).

use thiserror::Error;

/// A violated widget description invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("widget title is empty")]
    EmptyTitle,

    #[error("element at index {index} has an empty id")]
    EmptyElementId { index: usize },

    #[error("element id '{id}' is used more than once")]
    DuplicateElementId { id: String },
}
