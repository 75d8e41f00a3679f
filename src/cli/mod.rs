//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session.

pub mod backup;
pub mod budget;
pub mod category;
pub mod export;
pub mod item;
pub mod log;
pub mod month;

pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{set_balance, show_average, show_budget, show_totals, Section};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export, handle_export_csv, handle_import, ExportFormat};
pub use item::{handle_item_command, ItemCommands};
pub use log::show_audit_log;
pub use month::{handle_month_command, MonthCommands};
