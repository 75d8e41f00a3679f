//! Export and import CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;

use crate::error::{BudgetError, BudgetResult};
use crate::export::{default_export_filename, export_full_json, export_full_yaml, export_items_csv};
use crate::models::MonthId;
use crate::session::Session;

/// Full export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Export every month
///
/// Without `--output` the file is named after today's date in the current
/// directory. `-` writes to stdout.
pub fn handle_export(
    session: &Session,
    output: Option<PathBuf>,
    format: ExportFormat,
) -> BudgetResult<()> {
    let output = output.unwrap_or_else(|| {
        PathBuf::from(default_export_filename(Local::now().date_naive(), format.extension()))
    });

    if output == Path::new("-") {
        let mut handle = io::stdout().lock();
        write_archive(session, format, &mut handle)?;
        return Ok(());
    }

    let mut writer = BufWriter::new(create_file(&output)?);
    let months = write_archive(session, format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    println!("Exported {} month(s) to {}", months, output.display());
    Ok(())
}

/// Export one month's items as CSV (stdout unless `--output` is given)
pub fn handle_export_csv(
    session: &Session,
    month: Option<MonthId>,
    output: Option<PathBuf>,
) -> BudgetResult<()> {
    let month = month.unwrap_or_else(|| session.active_month().clone());
    let document = session.month_document(&month)?;

    match output {
        Some(path) => {
            let rows = export_items_csv(&document, BufWriter::new(create_file(&path)?))?;
            println!("Exported {} item(s) from {} to {}", rows, month, path.display());
        }
        None => {
            export_items_csv(&document, io::stdout().lock())?;
        }
    }
    Ok(())
}

/// Replace all data with an export file
pub fn handle_import(session: &mut Session, file: &Path, force: bool) -> BudgetResult<()> {
    if !force {
        println!("WARNING: Importing replaces ALL current months with the contents of");
        println!("  {}", file.display());
        println!("A backup of the current data is made first.");
        println!("To proceed, run again with --force:");
        println!("  budget import {} --force", file.display());
        return Ok(());
    }

    let result = session.import_file(file)?;
    println!("{}", result.summary());
    Ok(())
}

fn write_archive<W: Write>(
    session: &Session,
    format: ExportFormat,
    writer: &mut W,
) -> BudgetResult<usize> {
    match format {
        ExportFormat::Json => export_full_json(session.storage(), writer),
        ExportFormat::Yaml => export_full_yaml(session.storage(), writer),
    }
}

fn create_file(path: &Path) -> BudgetResult<File> {
    File::create(path)
        .map_err(|e| BudgetError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
