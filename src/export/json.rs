//! JSON export
//!
//! The export is one object mapping every month id to its full document,
//! the same shape backups use, so any export can be imported again.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetDocument, MonthId};
use crate::storage::Storage;

/// Every stored month, keyed by month id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetArchive {
    pub months: BTreeMap<MonthId, BudgetDocument>,
}

impl BudgetArchive {
    /// Snapshot every month in storage
    pub fn from_storage(storage: &Storage) -> BudgetResult<Self> {
        Ok(Self {
            months: storage.months.load_all()?,
        })
    }

    /// Parse an archive from JSON text
    ///
    /// Fails with `MalformedImportFile` for anything that is not an object of
    /// valid month ids, and for an empty object.
    pub fn from_json_str(json: &str) -> BudgetResult<Self> {
        let archive: Self = serde_json::from_str(json)
            .map_err(|e| BudgetError::MalformedImportFile(e.to_string()))?;
        archive.ensure_not_empty()
    }

    pub(crate) fn ensure_not_empty(self) -> BudgetResult<Self> {
        if self.months.is_empty() {
            return Err(BudgetError::MalformedImportFile(
                "file contains no months".into(),
            ));
        }
        Ok(self)
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    pub fn item_count(&self) -> usize {
        self.months.values().map(BudgetDocument::item_count).sum()
    }
}

/// Write every month as pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W) -> BudgetResult<usize> {
    let archive = BudgetArchive::from_storage(storage)?;
    serde_json::to_writer_pretty(&mut *writer, &archive)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(archive.month_count())
}

/// Default export file name for a day ("budget-backup-2025-01-05.json")
pub fn default_export_filename(date: NaiveDate, extension: &str) -> String {
    format!("budget-backup-{}.{}", date.format("%Y-%m-%d"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::storage::seed_document;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_is_keyed_by_month() {
        let (_temp, storage) = create_test_storage();
        let month = MonthId::parse("1.5.25").unwrap();
        storage.months.save(&month, &seed_document()).unwrap();

        let mut output = Vec::new();
        assert_eq!(export_full_json(&storage, &mut output).unwrap(), 1);

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["1.5.25"]["startingBalance"], 18000);
        assert_eq!(value["1.5.25"]["credit"][0]["amount"], 1411.28);
        assert_eq!(value["1.5.25"]["oneTime"][0]["name"], "House Insurance");

        let archive = BudgetArchive::from_json_str(std::str::from_utf8(&output).unwrap()).unwrap();
        assert_eq!(archive.months[&month], seed_document());
    }

    #[test]
    fn test_malformed_archives() {
        for bad in ["not json", "[]", "{}", r#"{"January": {}}"#, r#"{"1.5.25": 7}"#] {
            assert!(
                matches!(
                    BudgetArchive::from_json_str(bad),
                    Err(BudgetError::MalformedImportFile(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_legacy_months_are_upgraded_on_parse() {
        let json = r#"{
            "12.1.24": {
                "startingBalance": 100,
                "sideIncome": [{ "name": "Etsy", "amount": 40 }]
            }
        }"#;
        let archive = BudgetArchive::from_json_str(json).unwrap();

        let doc = &archive.months[&MonthId::parse("12.1.24").unwrap()];
        assert_eq!(doc.categories.len(), 5);
        assert!(doc.category("sideIncome").unwrap().kind.is_income());
    }

    #[test]
    fn test_default_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(default_export_filename(date, "json"), "budget-backup-2025-01-05.json");
    }
}
