//! Audit log CLI command

use crate::error::BudgetResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn show_audit_log(storage: &Storage, count: usize) -> BudgetResult<()> {
    let entries = storage.audit().read_recent(count)?;
    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!();
    println!(
        "Showing {} of {} entries ({})",
        entries.len(),
        storage.audit().entry_count()?,
        storage.audit().path().display()
    );
    Ok(())
}
