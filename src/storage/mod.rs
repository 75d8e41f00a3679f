//! Storage layer for Budget Planner
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation: one record per month, a small state record, and the audit log.

pub mod file_io;
pub mod init;
pub mod months;
pub mod state;

pub use file_io::{read_json, read_json_optional, write_json_atomic};
pub use init::seed_document;
pub use months::{record_key, MonthRepository, RECORD_PREFIX};
pub use state::{AppState, StateRepository};

use serde::Serialize;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    pub months: MonthRepository,
    pub state: StateRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            months: MonthRepository::new(paths.months_dir()),
            state: StateRepository::new(paths.state_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Check if any month has been stored yet
    pub fn is_initialized(&self) -> Result<bool, BudgetError> {
        Ok(!self.months.list()?.is_empty())
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity));
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) {
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            summary,
        ));
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity));
    }

    // The change itself is already saved; a failed audit write must not undo it
    fn write_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            warn!(error = %e, "failed to write audit entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetDocument, MonthId};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").join("months").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.is_initialized().unwrap());
    }

    #[test]
    fn test_audit_helpers_append_entries() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let month = MonthId::parse("1.5.25").unwrap();
        let doc = BudgetDocument::default();
        storage.months.save(&month, &doc).unwrap();
        storage.log_create(EntityType::Month, month.as_str(), None, &doc);
        storage.log_delete(EntityType::Month, month.as_str(), None, &doc);

        assert!(storage.is_initialized().unwrap());
        assert_eq!(storage.audit().entry_count().unwrap(), 2);
    }
}
