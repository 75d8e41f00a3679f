//! Audit logging for budget changes
//!
//! Every change to a month (categories, items, starting balance) and every
//! month create, delete or import is appended to a line-delimited JSON log
//! with before and after values.
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_planner::audit::{AuditEntry, AuditLogger, EntityType, generate_diff};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::update(
//!     EntityType::LineItem,
//!     "1.5.25/monthly#1",
//!     Some("Coffee".to_string()),
//!     &before,
//!     &after,
//!     generate_diff(&before, &after),
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
