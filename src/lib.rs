//! Budget Planner - local monthly budget tracking
//!
//! Each month is one budget document: a starting balance, user-defined
//! income and expense categories, and line items in each category. The
//! library computes category and section totals and the projected ending
//! balance, carries a month forward as the template for the next one, and
//! keeps everything in local JSON files.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, categories, line items, budget documents, month ids
//! - `storage`: One JSON file per month plus the active-month state
//! - `services`: Totals, category and item operations, months, averages
//! - `session`: The active month and every change made to it
//! - `audit`: Append-only change log
//! - `backup`: Rolling backups
//! - `export`: JSON, YAML and CSV export, and import
//! - `cli` / `display`: Command handlers and text output
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_planner::config::paths::BudgetPaths;
//! use budget_planner::models::{CategoryKind, Money};
//! use budget_planner::session::Session;
//!
//! let mut session = Session::open(BudgetPaths::new()?)?;
//! let key = session.add_category("Side Gigs", CategoryKind::Income)?;
//! session.add_item(key.as_str(), "Tutoring", Money::parse_lenient("300"))?;
//! println!("{}", session.totals().ending_balance);
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::BudgetError;
