//! Export and import for Budget Planner
//!
//! - JSON: every month keyed by month id (the backup format)
//! - YAML: the same content, human-readable
//! - CSV: one month's line items, spreadsheet-compatible

pub mod csv;
pub mod import;
pub mod json;
pub mod yaml;

pub use self::csv::export_items_csv;
pub use import::{import_archive, read_archive, ImportResult};
pub use json::{default_export_filename, export_full_json, BudgetArchive};
pub use yaml::{export_full_yaml, import_from_yaml};
