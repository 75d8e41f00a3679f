//! Custom error types for Budget Planner
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Budget Planner operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// A category with the derived key already exists
    #[error("Category already exists: {key}")]
    DuplicateCategory { key: String },

    /// A month with this identifier already exists
    #[error("Month already exists: {0}")]
    DuplicateMonth(String),

    /// The category key has no metadata in the document
    #[error("Category not found: {0}")]
    UnknownCategory(String),

    /// The month is not in the registry
    #[error("Month not found: {0}")]
    UnknownMonth(String),

    /// Item index is not valid for the category's current list
    #[error("Item index {index} out of range for category '{category}' ({len} items)")]
    IndexOutOfRange {
        category: String,
        index: usize,
        len: usize,
    },

    /// The registry must always keep at least one month
    #[error("Cannot delete the last month")]
    LastMonthUndeletable,

    /// Import file could not be parsed as a budget backup
    #[error("Malformed import file: {0}")]
    MalformedImportFile(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BudgetError {
    /// Create a duplicate category error
    pub fn duplicate_category(key: impl Into<String>) -> Self {
        Self::DuplicateCategory { key: key.into() }
    }

    /// Create an out-of-range error for an item position
    pub fn index_out_of_range(category: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            category: category.into(),
            index,
            len,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownCategory(_) | Self::UnknownMonth(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Budget Planner operations
pub type BudgetResult<T> = Result<T, BudgetError>;
