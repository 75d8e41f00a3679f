//! Month document repository
//!
//! Each month is one record keyed `budget:<month id>`, stored as its own
//! JSON file so that saving a month rewrites only that month.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetDocument, MonthId};

use super::file_io::{read_json_optional, remove_if_exists, write_json_atomic};

/// Prefix of every month record key
pub const RECORD_PREFIX: &str = "budget:";

/// The record key for a month ("budget:1.5.25")
pub fn record_key(month: &MonthId) -> String {
    format!("{}{}", RECORD_PREFIX, month)
}

/// Repository for per-month document persistence
pub struct MonthRepository {
    dir: PathBuf,
}

impl MonthRepository {
    /// Create a repository rooted at the months directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File backing a month record (the record key with ':' made filesystem-safe)
    fn record_file(&self, month: &MonthId) -> PathBuf {
        self.dir
            .join(format!("{}.json", record_key(month).replace(':', "_")))
    }

    /// List every month that has a stored record, in no particular order
    pub fn list(&self) -> BudgetResult<Vec<MonthId>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = RECORD_PREFIX.replace(':', "_");
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            BudgetError::Storage(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut months = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                BudgetError::Storage(format!("Failed to read directory entry: {}", e))
            })?;
            let name = entry.file_name().to_string_lossy().to_string();

            let Some(id) = name
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_suffix(".json"))
            else {
                continue;
            };

            match MonthId::parse(id) {
                Ok(month) => months.push(month),
                Err(e) => debug!(file = %name, error = %e, "skipping unrecognized record"),
            }
        }

        Ok(months)
    }

    /// Check whether a month has a stored record
    pub fn exists(&self, month: &MonthId) -> bool {
        self.record_file(month).exists()
    }

    /// Load a month's document, if stored
    pub fn load(&self, month: &MonthId) -> BudgetResult<Option<BudgetDocument>> {
        read_json_optional(self.record_file(month))
    }

    /// Load a month's document, failing if it is not stored
    pub fn get(&self, month: &MonthId) -> BudgetResult<BudgetDocument> {
        self.load(month)?
            .ok_or_else(|| BudgetError::UnknownMonth(month.to_string()))
    }

    /// Replace a month's stored document
    pub fn save(&self, month: &MonthId, document: &BudgetDocument) -> BudgetResult<()> {
        debug!(month = %month, "saving budget document");
        write_json_atomic(self.record_file(month), document)
    }

    /// Delete a month's record, returning whether it existed
    pub fn delete(&self, month: &MonthId) -> BudgetResult<bool> {
        remove_if_exists(self.record_file(month))
    }

    /// Load every stored month
    pub fn load_all(&self) -> BudgetResult<BTreeMap<MonthId, BudgetDocument>> {
        let mut all = BTreeMap::new();
        for month in self.list()? {
            let document = self.get(&month)?;
            all.insert(month, document);
        }
        Ok(all)
    }

    /// Delete every month record
    pub fn clear(&self) -> BudgetResult<usize> {
        let mut removed = 0;
        for month in self.list()? {
            if self.delete(&month)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MonthRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MonthRepository::new(temp_dir.path().join("months"));
        (temp_dir, repo)
    }

    fn month(s: &str) -> MonthId {
        MonthId::parse(s).unwrap()
    }

    #[test]
    fn test_empty_list() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let id = month("1.5.25");
        let doc = BudgetDocument::new(Money::from_cents(1000));

        repo.save(&id, &doc).unwrap();
        assert!(repo.exists(&id));
        assert_eq!(repo.get(&id).unwrap(), doc);
        assert_eq!(repo.list().unwrap(), vec![id.clone()]);

        assert!(repo.delete(&id).unwrap());
        assert!(!repo.exists(&id));
        assert!(matches!(repo.get(&id), Err(BudgetError::UnknownMonth(_))));
    }

    #[test]
    fn test_record_file_name() {
        let (temp_dir, repo) = create_test_repo();
        repo.save(&month("12.31.24"), &BudgetDocument::default()).unwrap();
        assert!(temp_dir
            .path()
            .join("months")
            .join("budget_12.31.24.json")
            .exists());
        assert_eq!(record_key(&month("12.31.24")), "budget:12.31.24");
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let (temp_dir, repo) = create_test_repo();
        repo.save(&month("2.1.25"), &BudgetDocument::default()).unwrap();
        std::fs::write(temp_dir.path().join("months").join("notes.txt"), "hi").unwrap();
        std::fs::write(temp_dir.path().join("months").join("budget_junk.json"), "{}").unwrap();

        assert_eq!(repo.list().unwrap(), vec![month("2.1.25")]);
    }

    #[test]
    fn test_load_all_and_clear() {
        let (_temp_dir, repo) = create_test_repo();
        repo.save(&month("1.1.25"), &BudgetDocument::default()).unwrap();
        repo.save(&month("2.1.25"), &BudgetDocument::default()).unwrap();

        assert_eq!(repo.load_all().unwrap().len(), 2);
        assert_eq!(repo.clear().unwrap(), 2);
        assert!(repo.list().unwrap().is_empty());
    }
}
