//! File export utilities for parse results.
//!
//! This module provides functions for writing parse results, batch outcomes
//! and merged aggregates to files in JSON or CSV form. Dates always render
//! as ISO-8601 strings and the aggregate map is already flattened to a
//! number-ordered list, so the JSON output is directly consumable across a
//! process boundary.

use crate::error::Result;
use crate::models::{CallRecord, FileOutcome, ParsedFileResult, PhoneAggregate};
use csv::Writer;
use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Output format for exported results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format
    Json,
    /// Comma-separated values format (flat record list only)
    Csv,
}

impl ExportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Parse a format name, defaulting to JSON for unknown values
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "csv" => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Write one parse result under `output_dir`, named after the source file.
///
/// JSON gets the full result; CSV gets the flat record list.
pub fn write_result(
    result: &ParsedFileResult,
    format: ExportFormat,
    output_dir: &Path,
    pretty: bool,
) -> Result<PathBuf> {
    create_dir_all(output_dir)?;
    let stem = Path::new(&result.file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("result");
    let path = output_dir.join(format!("{stem}.{}", format.extension()));

    match format {
        ExportFormat::Json => write_json(result, &path, pretty)?,
        ExportFormat::Csv => write_records_csv(&result.records, &path)?,
    }
    Ok(path)
}

/// Write the per-file outcome list of a batch parse as JSON
pub fn write_outcomes(outcomes: &[FileOutcome], path: &Path, pretty: bool) -> Result<()> {
    write_json(outcomes, path, pretty)
}

/// Write merged aggregates as JSON
pub fn write_merged_aggregates(
    aggregates: &[PhoneAggregate],
    path: &Path,
    pretty: bool,
) -> Result<()> {
    write_json(aggregates, path, pretty)
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T, path: &Path, pretty: bool) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

/// Write records to a CSV file.
///
/// Includes header row: `ID, Caller, Callee, IMEI, Datetime, Duration, Site, Longitude, Latitude`
pub fn write_records_csv(records: &[CallRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    writer.write_record([
        "ID",
        "Caller",
        "Callee",
        "IMEI",
        "Datetime",
        "Duration",
        "Site",
        "Longitude",
        "Latitude",
    ])?;

    for record in records {
        let datetime = record
            .date_time
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_default();
        let (site, longitude, latitude) = record.location.as_ref().map_or_else(
            || (String::new(), String::new(), String::new()),
            |loc| {
                (
                    loc.site_name.clone(),
                    loc.longitude.to_string(),
                    loc.latitude.to_string(),
                )
            },
        );

        writer.write_record([
            record.id.as_str(),
            record.caller.as_str(),
            record.callee.as_str(),
            record.imei.as_str(),
            datetime.as_str(),
            record.duration.as_str(),
            site.as_str(),
            longitude.as_str(),
            latitude.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
