use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_planner::cli::{
    handle_backup_command, handle_category_command, handle_export, handle_export_csv,
    handle_import, handle_item_command, handle_month_command, set_balance, show_audit_log,
    show_average, show_budget, show_totals, BackupCommands, CategoryCommands, ExportFormat,
    ItemCommands, MonthCommands, Section,
};
use budget_planner::config::paths::{BudgetPaths, DATA_DIR_ENV};
use budget_planner::config::settings::Settings;
use budget_planner::models::MonthId;
use budget_planner::session::Session;

/// Environment variable holding the diagnostics filter (e.g. `debug`)
const LOG_ENV: &str = "BUDGET_LOG";

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Monthly budget planner",
    long_about = "Budget Planner keeps one budget per month: income and expense \
                  categories with line items, running totals and a projected \
                  ending balance. Start a new month from the current one with \
                  'budget month new'."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month's budget
    Show {
        /// Month to show (default: the active month)
        #[arg(short, long)]
        month: Option<MonthId>,

        /// Leave out zero amounts
        #[arg(long)]
        hide_zeros: bool,

        /// Show only the income or the expense section
        #[arg(short, long, value_enum)]
        section: Option<Section>,
    },

    /// Show the active month's totals
    Totals,

    /// Month management commands
    #[command(subcommand)]
    Month(MonthCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Line item commands
    #[command(subcommand)]
    Item(ItemCommands),

    /// Set the active month's starting balance
    Balance {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Average of an item across the other months
    Average {
        /// Category key
        category: String,
        /// Item name (exact match)
        name: String,
    },

    /// Export every month as JSON or YAML
    Export {
        /// Output file ('-' for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },

    /// Export one month's items as CSV
    ExportCsv {
        /// Month to export (default: the active month)
        #[arg(short, long)]
        month: Option<MonthId>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with an export file
    Import {
        file: PathBuf,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent changes
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = BudgetPaths::new()?;

    let Some(command) = cli.command else {
        println!("Budget Planner - monthly budgets from the command line");
        println!();
        println!("Run 'budget show' to see the active month.");
        println!("Run 'budget --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config = command {
        let settings = Settings::load_or_create(&paths)?;
        println!("Budget Planner Configuration");
        println!("============================");
        println!("Base directory:   {}", paths.base_dir().display());
        println!("Months directory: {}", paths.months_dir().display());
        println!("Backup directory: {}", paths.backup_dir().display());
        println!("Settings file:    {}", paths.settings_file().display());
        println!("Audit log:        {}", paths.audit_log().display());
        println!("(override with {})", DATA_DIR_ENV);
        println!();
        println!("Settings:");
        println!("  Currency symbol: {}", settings.currency_symbol);
        println!("  Month order:     {:?}", settings.month_order);
        println!("  Backups kept:    {}", settings.backup_retention.keep);
        return Ok(());
    }

    let mut session = Session::open(paths)?;
    if let Some(welcome) = session.take_welcome()? {
        eprintln!("{}", welcome);
        eprintln!();
    }

    match command {
        Commands::Show {
            month,
            hide_zeros,
            section,
        } => show_budget(&session, month, hide_zeros, section)?,
        Commands::Totals => show_totals(&session)?,
        Commands::Month(cmd) => handle_month_command(&mut session, cmd)?,
        Commands::Category(cmd) => handle_category_command(&mut session, cmd)?,
        Commands::Item(cmd) => handle_item_command(&mut session, cmd)?,
        Commands::Balance { amount } => set_balance(&mut session, &amount)?,
        Commands::Average { category, name } => show_average(&session, &category, &name)?,
        Commands::Export { output, format } => handle_export(&session, output, format)?,
        Commands::ExportCsv { month, output } => handle_export_csv(&session, month, output)?,
        Commands::Import { file, force } => handle_import(&mut session, &file, force)?,
        Commands::Backup(cmd) => handle_backup_command(&mut session, cmd)?,
        Commands::Log { count } => show_audit_log(session.storage(), count)?,
        Commands::Config => {}
    }

    Ok(())
}
