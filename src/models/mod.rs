//! Core data models for Budget Planner
//!
//! This module contains the data structures that make up one month of
//! budget data: money amounts, category keys and metadata, line items,
//! the per-month document, and month identifiers.

pub mod category;
pub mod document;
pub mod migrate;
pub mod money;
pub mod month;

pub use category::{CategoryKey, CategoryKind, CategoryMeta};
pub use document::{BudgetDocument, LineItem};
pub use money::Money;
pub use month::{MonthId, MonthOrder};
