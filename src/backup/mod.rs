//! Rolling backups of all budget data
//!
//! Backups use the same format as a full JSON export, so restoring one is
//! an ordinary import (see [`crate::export::import_archive`]).
//!
//! ```rust,ignore
//! use budget_planner::backup::BackupManager;
//!
//! let manager = BackupManager::new(paths.backup_dir(), settings.backup_retention.clone());
//! let (path, pruned) = manager.create_backup_with_retention(&storage)?;
//! ```

mod manager;

pub use manager::{BackupInfo, BackupManager};
