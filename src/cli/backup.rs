//! Backup CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::error::{BudgetError, BudgetResult};
use crate::session::Session;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Delete old backups beyond the retention limit
    Prune {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Replace all data with a backup
    Restore {
        /// Backup file name or path ('latest' for the most recent)
        backup: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(session: &mut Session, cmd: BackupCommands) -> BudgetResult<()> {
    let retention = session.settings().backup_retention.clone();
    let keep = retention.keep as usize;
    let manager = BackupManager::new(session.storage().paths().backup_dir(), retention);

    match cmd {
        BackupCommands::Create => {
            let (path, pruned) = manager.create_backup_with_retention(session.storage())?;
            println!("Backup created: {}", path.display());
            if !pruned.is_empty() {
                println!("Removed {} old backup(s)", pruned.len());
            }
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: budget backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            for (i, backup) in backups.iter().enumerate() {
                let age = format_age(chrono::Utc::now().signed_duration_since(backup.created_at));
                if verbose {
                    println!(
                        "{}. {}\n   Created: {}\n   Size: {}\n   Age: {}",
                        i + 1,
                        backup.filename,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        age
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {})",
                        i + 1,
                        backup.filename,
                        age,
                        format_size(backup.size_bytes)
                    );
                }
            }
            println!();
            println!("Total: {} backup(s), keeping {}", backups.len(), keep);
        }

        BackupCommands::Prune { force } => {
            let excess = manager.list_backups()?.len().saturating_sub(keep);
            if excess == 0 {
                println!("No backups to prune (keeping {}).", keep);
                return Ok(());
            }
            if !force {
                println!("{} backup(s) would be deleted (keeping {}).", excess, keep);
                println!("To delete them, run again with --force:");
                println!("  budget backup prune --force");
                return Ok(());
            }
            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }

        BackupCommands::Restore { backup, force } => {
            let path = resolve_backup_path(&manager, &backup)?;
            if !force {
                println!("WARNING: This will replace ALL current months with {}", path.display());
                println!("To proceed, run again with --force:");
                println!("  budget backup restore {} --force", backup);
                return Ok(());
            }

            let result = session.import_file(&path)?;
            println!("Restored from {}", path.display());
            println!("{}", result.summary());
        }
    }

    Ok(())
}

/// Resolve 'latest', a file name in the backup directory, or a path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> BudgetResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| BudgetError::Storage("No backups found".into()));
    }

    if let Some(info) = manager.get_backup(backup) {
        return Ok(info.path);
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    Err(BudgetError::Storage(format!("Backup not found: {}", backup)))
}

fn format_age(age: chrono::Duration) -> String {
    if age.num_days() > 0 {
        format!("{}d", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m", age.num_minutes())
    } else {
        "just now".to_string()
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
