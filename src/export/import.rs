//! Import of a full export or backup
//!
//! The file is parsed completely before anything on disk changes. Then the
//! current data is backed up, every stored month is replaced by the
//! imported ones, and the most recent imported month becomes active.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::audit::EntityType;
use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::MonthId;
use crate::storage::Storage;

use super::json::BudgetArchive;
use super::yaml::import_from_yaml;

/// Outcome of an import
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub months_imported: usize,
    pub months_removed: usize,
    pub active_month: MonthId,
    /// Snapshot of the data that was replaced, if there was any
    pub safety_backup: Option<PathBuf>,
}

impl ImportResult {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Imported {} month(s), replaced {}. Active month: {}",
            self.months_imported, self.months_removed, self.active_month
        );
        if let Some(path) = &self.safety_backup {
            summary.push_str(&format!("\nPrevious data saved to {}", path.display()));
        }
        summary
    }
}

/// Read and parse an export file
///
/// `.yaml` and `.yml` files are read as YAML, everything else as JSON.
pub fn read_archive(path: &Path) -> BudgetResult<BudgetArchive> {
    let contents = fs::read_to_string(path)
        .map_err(|e| BudgetError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        import_from_yaml(&contents)
    } else {
        BudgetArchive::from_json_str(&contents)
    }
}

/// Replace all stored months with the contents of `archive`
pub fn import_archive(
    storage: &Storage,
    settings: &Settings,
    archive: BudgetArchive,
) -> BudgetResult<ImportResult> {
    let mut imported: Vec<MonthId> = archive.months.keys().cloned().collect();
    settings.month_order.sort(&mut imported);
    let active_month = imported
        .first()
        .cloned()
        .ok_or_else(|| BudgetError::MalformedImportFile("file contains no months".into()))?;

    let safety_backup = if storage.is_initialized()? {
        let manager = BackupManager::new(
            storage.paths().backup_dir(),
            settings.backup_retention.clone(),
        );
        Some(manager.create_backup(storage)?)
    } else {
        None
    };

    let months_removed = storage.months.clear()?;
    for (month, document) in &archive.months {
        storage.months.save(month, document)?;
    }

    let mut state = storage.state.load()?;
    state.active_month = Some(active_month.clone());
    storage.state.save(&state)?;

    storage.log_create(
        EntityType::Import,
        active_month.as_str(),
        Some(format!("{} months", archive.month_count())),
        &imported,
    );
    info!(months = archive.month_count(), removed = months_removed, "imported budget data");

    Ok(ImportResult {
        months_imported: archive.month_count(),
        months_removed,
        active_month,
        safety_backup,
    })
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

    fn id(s: &str) -> MonthId {
        MonthId::parse(s).unwrap()
    }

    #[test]
    fn test_import_replaces_all_months() {
        let (temp, storage) = create_test_storage();
        storage.months.save(&id("1.5.25"), &seed_document()).unwrap();

        let file = temp.path().join("in.json");
        fs::write(
            &file,
            r#"{
                "11.1.24": { "startingBalance": 10, "customCategories": {} },
                "12.1.24": { "startingBalance": 20, "customCategories": {} }
            }"#,
        )
        .unwrap();

        let archive = read_archive(&file).unwrap();
        let result = import_archive(&storage, &Settings::default(), archive).unwrap();

        assert_eq!(result.months_imported, 2);
        assert_eq!(result.months_removed, 1);
        assert_eq!(result.active_month, id("12.1.24"));
        assert!(result.safety_backup.as_ref().unwrap().exists());

        let mut months = storage.months.list().unwrap();
        months.sort();
        assert_eq!(months, vec![id("11.1.24"), id("12.1.24")]);
        assert_eq!(storage.state.load().unwrap().active_month, Some(id("12.1.24")));
    }

    #[test]
    fn test_malformed_file_changes_nothing() {
        let (temp, storage) = create_test_storage();
        storage.months.save(&id("1.5.25"), &seed_document()).unwrap();

        let file = temp.path().join("bad.json");
        fs::write(&file, "{ this is not json").unwrap();

        assert!(matches!(
            read_archive(&file),
            Err(BudgetError::MalformedImportFile(_))
        ));
        assert_eq!(storage.months.list().unwrap(), vec![id("1.5.25")]);
        assert!(fs::read_dir(storage.paths().backup_dir()).unwrap().next().is_none());
    }

    #[test]
    fn test_import_into_empty_store_skips_backup() {
        let (temp, storage) = create_test_storage();
        let file = temp.path().join("in.yml");
        fs::write(&file, "\"3.1.25\":\n  startingBalance: 5\n  customCategories: {}\n").unwrap();

        let archive = read_archive(&file).unwrap();
        let result = import_archive(&storage, &Settings::default(), archive).unwrap();
        assert!(result.safety_backup.is_none());
        assert_eq!(result.active_month, id("3.1.25"));
    }
}
