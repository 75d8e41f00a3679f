//! Backup manager
//!
//! A backup is a full JSON export written to the backup directory as
//! `backup-YYYYMMDD-HHMMSS-mmm.json`. Only the newest backups are kept.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::config::settings::BackupRetention;
use crate::error::{BudgetError, BudgetResult};
use crate::export::BudgetArchive;
use crate::storage::{write_json_atomic, Storage};

const BACKUP_PREFIX: &str = "backup-";
const BACKUP_SUFFIX: &str = ".json";

/// Metadata about a backup file
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Parsed from the file name
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Creates, lists and prunes backups
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(backup_dir: PathBuf, retention: BackupRetention) -> Self {
        Self {
            backup_dir,
            retention,
        }
    }

    /// Snapshot every stored month, returning the backup path
    pub fn create_backup(&self, storage: &Storage) -> BudgetResult<PathBuf> {
        let archive = BudgetArchive::from_storage(storage)?;
        self.write_backup(&archive, Utc::now())
    }

    fn write_backup(&self, archive: &BudgetArchive, now: DateTime<Utc>) -> BudgetResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create backup directory: {}", e)))?;

        let filename = format!(
            "{}{}-{:03}{}",
            BACKUP_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis(),
            BACKUP_SUFFIX
        );
        let path = self.backup_dir.join(filename);
        write_json_atomic(&path, archive)?;

        debug!(path = %path.display(), months = archive.month_count(), "wrote backup");
        Ok(path)
    }

    /// Create a backup, then prune old ones
    pub fn create_backup_with_retention(
        &self,
        storage: &Storage,
    ) -> BudgetResult<(PathBuf, Vec<PathBuf>)> {
        let path = self.create_backup(storage)?;
        let deleted = self.enforce_retention()?;
        Ok((path, deleted))
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> BudgetResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to read backup directory: {}", e)))?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| BudgetError::Io(format!("Failed to read directory entry: {}", e)))?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });
        Ok(backups)
    }

    /// Delete all but the newest `retention.keep` backups
    pub fn enforce_retention(&self) -> BudgetResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        for backup in self.list_backups()?.into_iter().skip(self.retention.keep as usize) {
            fs::remove_file(&backup.path)
                .map_err(|e| BudgetError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }
        Ok(deleted)
    }

    /// Find a backup by file name
    pub fn get_backup(&self, filename: &str) -> Option<BackupInfo> {
        parse_backup_info(&self.backup_dir.join(filename))
    }

    pub fn get_latest_backup(&self) -> BudgetResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_str()?.to_string();
    let stamp = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_SUFFIX)?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS-mmm` (milliseconds optional)
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y%m%d").ok()?;
    let time_part = parts.next()?;
    let millis = match parts.next() {
        Some(ms) if ms.len() == 3 => ms.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    if parts.next().is_some()
        || time_part.len() != 6
        || !time_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let hour = time_part[0..2].parse().ok()?;
    let minute = time_part[2..4].parse().ok()?;
    let second = time_part[4..6].parse().ok()?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(DateTime::from_naive_utc_and_offset(NaiveDateTime::new(date, time), Utc))
}
