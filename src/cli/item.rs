//! Line item CLI commands
//!
//! Items are addressed by category key and stored index, as shown by
//! `budget show`.

use clap::Subcommand;

use crate::error::BudgetResult;
use crate::models::Money;
use crate::session::Session;

/// Item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an item to a category
    Add {
        /// Category key
        category: String,
        /// Item name
        name: String,
        /// Amount (commas and $ allowed; anything unreadable is 0)
        #[arg(default_value = "0", allow_hyphen_values = true)]
        amount: String,
    },

    /// Rename an item
    Rename {
        category: String,
        index: usize,
        name: String,
    },

    /// Delete an item
    Delete { category: String, index: usize },

    /// Set an item's amount
    Amount {
        category: String,
        index: usize,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Set an item's date, or clear it when no date is given
    Date {
        category: String,
        index: usize,
        date: Option<String>,
    },
}

/// Handle an item command
pub fn handle_item_command(session: &mut Session, cmd: ItemCommands) -> BudgetResult<()> {
    let symbol = session.settings().currency_symbol.clone();

    match cmd {
        ItemCommands::Add {
            category,
            name,
            amount,
        } => {
            let amount = Money::parse_lenient(&amount);
            let index = session.add_item(&category, &name, amount)?;
            println!(
                "Added '{}' ({}) to [{}] at index {}",
                name.trim(),
                amount.format_grouped(&symbol),
                category,
                index
            );
        }

        ItemCommands::Rename {
            category,
            index,
            name,
        } => {
            session.rename_item(&category, index, &name)?;
            println!("Renamed [{}] #{} to '{}'", category, index, name.trim());
        }

        ItemCommands::Delete { category, index } => {
            session.delete_item(&category, index)?;
            println!("Deleted [{}] #{}", category, index);
        }

        ItemCommands::Amount {
            category,
            index,
            amount,
        } => {
            let amount = Money::parse_lenient(&amount);
            session.update_item_amount(&category, index, amount)?;
            println!("Set [{}] #{} to {}", category, index, amount.format_grouped(&symbol));
        }

        ItemCommands::Date {
            category,
            index,
            date,
        } => {
            session.set_item_date(&category, index, date.as_deref())?;
            match date {
                Some(date) => println!("Set date of [{}] #{} to {}", category, index, date.trim()),
                None => println!("Cleared date of [{}] #{}", category, index),
            }
        }
    }

    Ok(())
}
