//! Month CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::display::format_month_list;
use crate::error::BudgetResult;
use crate::models::MonthId;
use crate::session::Session;

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// List all months (most recent first, * marks the active one)
    List,

    /// Create a month from the active one and switch to it
    New {
        /// Date the month is for (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete a month
    Delete {
        /// Month identifier (M.D.YY)
        month: MonthId,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Make a month the active one
    Select {
        /// Month identifier (M.D.YY)
        month: MonthId,
    },
}

/// Handle a month command
pub fn handle_month_command(session: &mut Session, cmd: MonthCommands) -> BudgetResult<()> {
    match cmd {
        MonthCommands::List => {
            print!("{}", format_month_list(session.registry()));
        }

        MonthCommands::New { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let template = session.active_month().clone();
            let month = session.new_month(date)?;
            println!("Created month {} from {}", month, template);
            let symbol = &session.settings().currency_symbol;
            println!(
                "Starting balance reset to {}",
                session.document().starting_balance.format_grouped(symbol)
            );
        }

        MonthCommands::Delete { month, force } => {
            if !force {
                println!("This will permanently delete month {} ({}).", month, month.long_name());
                println!("To proceed, run again with --force:");
                println!("  budget month delete {} --force", month);
                return Ok(());
            }
            session.delete_month(&month)?;
            println!("Deleted month {}", month);
            println!("Active month: {}", session.active_month());
        }

        MonthCommands::Select { month } => {
            session.select_month(&month)?;
            println!("Active month: {} ({})", month, month.long_name());
        }
    }

    Ok(())
}
