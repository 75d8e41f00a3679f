//! Category CLI commands

use clap::Subcommand;

use crate::error::BudgetResult;
use crate::models::CategoryKind;
use crate::session::Session;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category to the active month
    Add {
        /// Display name (the key is derived from it)
        name: String,

        /// Income category
        #[arg(long, conflicts_with = "expense", required_unless_present = "expense")]
        income: bool,

        /// Expense category
        #[arg(long)]
        expense: bool,
    },

    /// Change a category's display name
    Rename {
        /// Category key
        key: String,
        /// New display name
        name: String,
    },

    /// Delete a category and all of its items
    Delete {
        /// Category key
        key: String,
    },
}

/// Handle a category command
pub fn handle_category_command(session: &mut Session, cmd: CategoryCommands) -> BudgetResult<()> {
    match cmd {
        CategoryCommands::Add { name, income, .. } => {
            let kind = if income {
                CategoryKind::Income
            } else {
                CategoryKind::Expense
            };
            let key = session.add_category(&name, kind)?;
            println!("Added {} category '{}' [{}]", kind, name.trim(), key);
        }

        CategoryCommands::Rename { key, name } => {
            session.rename_category(&key, &name)?;
            println!("Renamed [{}] to '{}'", key, name.trim());
        }

        CategoryCommands::Delete { key } => {
            if session.delete_category(&key)? {
                println!("Deleted category [{}]", key);
            } else {
                println!("No category [{}] in {}", key, session.active_month());
            }
        }
    }

    Ok(())
}
