//! Command-line driver for the CDR parsing pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use cdr_ingest::config::AppConfig;
use cdr_ingest::export::{self, ExportFormat};
use cdr_ingest::logging::init_logging;
use cdr_ingest::merge::merge_results;
use cdr_ingest::models::{FileOutcome, NamedFile};
use cdr_ingest::service::ParserService;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse workbooks and export per-file results
    Parse {
        /// Workbook files (.xlsx or .xls)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (json or csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Also write the cross-file merged aggregate view
        #[arg(long)]
        merge: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show how a workbook would be classified, without extracting records
    Inspect {
        /// Workbook file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let _guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(Path::new),
    )?;

    info!("Starting cdr-ingest");

    // Parse command line arguments
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parse {
            files,
            format,
            output_dir,
            merge,
            pretty,
        } => parse_files(&config, files, format.as_deref(), output_dir.as_deref(), *merge, *pretty).await?,
        Commands::Inspect { file } => inspect_file(&config, file)?,
    }

    Ok(())
}

/// Parse a batch of workbook files and write results to the output directory
async fn parse_files(
    config: &AppConfig,
    files: &[PathBuf],
    format: Option<&str>,
    output_dir: Option<&str>,
    merge: bool,
    pretty: bool,
) -> Result<()> {
    let format = ExportFormat::from_name(format.unwrap_or(&config.export.default_format));
    let pretty = pretty || config.export.pretty_json;
    let output_dir = output_dir
        .map(str::to_string)
        .unwrap_or_else(|| config.get_output_directory());
    let output_dir = Path::new(&output_dir);
    std::fs::create_dir_all(output_dir)?;

    let service = ParserService::new(config.parser.clone());

    // Read every file up front; a file that cannot be read gets a failure
    // outcome and must not abort its siblings.
    let mut slots: Vec<Option<FileOutcome>> = vec![None; files.len()];
    let mut batch = Vec::new();
    for (idx, path) in files.iter().enumerate() {
        let name = file_name_of(path);
        match std::fs::read(path) {
            Ok(bytes) => batch.push((idx, NamedFile { name, bytes })),
            Err(e) => {
                slots[idx] = Some(FileOutcome::failed(name, format!("Failed to read file: {e}")));
            }
        }
    }

    let indices: Vec<usize> = batch.iter().map(|(idx, _)| *idx).collect();
    let parsed = service
        .parse_batch(batch.into_iter().map(|(_, f)| f).collect())
        .await;
    for (idx, outcome) in indices.into_iter().zip(parsed) {
        slots[idx] = Some(outcome);
    }
    let outcomes: Vec<FileOutcome> = slots.into_iter().flatten().collect();

    // Write each successful result and report failures
    let mut succeeded = 0usize;
    for outcome in &outcomes {
        match &outcome.data {
            Some(result) => {
                let path = export::write_result(result, format, output_dir, pretty)?;
                info!(file = %outcome.file_name, output = %path.display(), "result written");
                succeeded += 1;
            }
            None => {
                error!(
                    file = %outcome.file_name,
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "file failed"
                );
            }
        }
    }

    // Batch summary, one entry per input file
    let outcomes_path = output_dir.join("outcomes.json");
    export::write_outcomes(&outcomes, &outcomes_path, pretty)?;

    if merge {
        let results: Vec<_> = outcomes.iter().filter_map(|o| o.data.clone()).collect();
        let merged = merge_results(&results);
        let merged_path = output_dir.join("merged.json");
        export::write_merged_aggregates(&merged, &merged_path, pretty)?;
        info!(
            numbers = merged.len(),
            output = %merged_path.display(),
            "merged aggregate view written"
        );
    }

    info!(
        total = outcomes.len(),
        succeeded,
        failed = outcomes.len() - succeeded,
        "batch complete"
    );
    Ok(())
}

/// Print the classification a workbook would get
fn inspect_file(config: &AppConfig, file: &PathBuf) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let service = ParserService::new(config.parser.clone());
    let inspection = service.inspect_workbook(&bytes, &file_name_of(file))?;

    println!("File type: {}", inspection.file_type);
    println!("Calls sheet: {}", inspection.plan.calls_sheet.as_deref().unwrap_or("-"));
    println!("SMS sheet: {}", inspection.plan.sms_sheet.as_deref().unwrap_or("-"));
    println!(
        "Identification sheet: {}",
        inspection.plan.subscriber_sheet.as_deref().unwrap_or("-")
    );
    for (sheet, columns) in &inspection.columns {
        println!("Columns for '{sheet}': {columns:#?}");
    }
    Ok(())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}
