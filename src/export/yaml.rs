//! YAML export
//!
//! Same content as the JSON export, for reading by eye.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::BudgetArchive;
use crate::storage::Storage;

/// Write every month as YAML, returning the number of months written
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> BudgetResult<usize> {
    let archive = BudgetArchive::from_storage(storage)?;

    writeln!(writer, "# Budget Planner export")
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &archive).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(archive.month_count())
}

/// Parse an archive written by [`export_full_yaml`]
pub fn import_from_yaml(yaml: &str) -> BudgetResult<BudgetArchive> {
    let archive: BudgetArchive = serde_yaml::from_str(yaml)
        .map_err(|e| BudgetError::MalformedImportFile(e.to_string()))?;
    archive.ensure_not_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::MonthId;
    use crate::storage::seed_document;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let month = MonthId::parse("2.1.25").unwrap();
        storage.months.save(&month, &seed_document()).unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Budget Planner export"));
        assert!(yaml.contains("House Insurance"));

        let archive = import_from_yaml(&yaml).unwrap();
        assert_eq!(archive.months[&month], seed_document());
    }

    #[test]
    fn test_empty_yaml_is_malformed() {
        assert!(matches!(
            import_from_yaml("{}"),
            Err(BudgetError::MalformedImportFile(_))
        ));
    }
}
