//! Pipeline orchestration: bytes in, aggregates out.
//!
//! One workbook is parsed synchronously and fully in memory; batches fan out
//! one blocking task per file and fan back in preserving input order. The
//! only shared state between concurrent parses is the metrics facade.

use std::io::Cursor;
use std::time::Instant;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::aggregate::aggregate_records;
use crate::columns::{infer_columns, ColumnMap};
use crate::config::ParserConfig;
use crate::error::{CdrError, Result};
use crate::extract::{extract_records, extract_subscribers};
use crate::logging::OperationTimer;
use crate::metrics::PipelineMetrics;
use crate::models::{FileOutcome, FileType, NamedFile, ParsedFileResult};
use crate::sheets::{classify_file_type, plan_sheets, SheetPlan};
use crate::validation::InputValidator;

/// Classification summary for troubleshooting a new carrier layout
#[derive(Debug)]
pub struct WorkbookInspection {
    /// Detected workbook type
    pub file_type: FileType,
    /// Which sheets would feed which extractor
    pub plan: SheetPlan,
    /// Inferred column mapping per listing sheet
    pub columns: Vec<(String, ColumnMap)>,
}

/// Parses workbooks into per-file results
#[derive(Debug, Clone)]
pub struct ParserService {
    config: ParserConfig,
    metrics: PipelineMetrics,
}

impl ParserService {
    /// Create a service with the given parser limits
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            metrics: PipelineMetrics::default(),
        }
    }

    /// Parse one workbook from raw bytes into a [`ParsedFileResult`].
    ///
    /// The file name is used for reporting only, never for parsing
    /// decisions. Missing listing or identification sheets degrade to empty
    /// record/subscriber lists; only an unreadable workbook fails the file.
    pub fn parse_workbook(&self, bytes: &[u8], file_name: &str) -> Result<ParsedFileResult> {
        let start = Instant::now();
        let result = self.parse_workbook_inner(bytes, file_name);
        self.metrics.record_file_parse(start.elapsed(), result.is_ok());
        if let Err(e) = &result {
            self.metrics.record_error("parse");
            warn!(file = %file_name, error = %e, "workbook parse failed");
        }
        result
    }

    fn parse_workbook_inner(&self, bytes: &[u8], file_name: &str) -> Result<ParsedFileResult> {
        let timer = OperationTimer::new("parse_workbook");
        let file_name = InputValidator::sanitize_text(file_name);

        let size = bytes.len() as u64;
        let max_mb = self.config.max_workbook_size_mb;
        if InputValidator::validate_workbook_size(size, max_mb).is_err() {
            return Err(if size == 0 {
                CdrError::Workbook {
                    file_name,
                    source: calamine::Error::Msg("empty workbook"),
                }
            } else {
                CdrError::FileTooLarge {
                    file_name,
                    size,
                    max: max_mb * 1024 * 1024,
                }
            });
        }

        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|source| CdrError::Workbook {
                file_name: file_name.clone(),
                source,
            })?;

        let sheet_names = workbook.sheet_names();
        let file_type = classify_file_type(&sheet_names);
        let plan = plan_sheets(&sheet_names);
        info!(file = %file_name, %file_type, ?plan, "classified workbook");

        let mut records = Vec::new();
        if let Some(sheet) = &plan.calls_sheet {
            match workbook.worksheet_range(sheet) {
                Ok(range) => records.extend(extract_records(&range, false)),
                Err(e) => warn!(file = %file_name, sheet = %sheet, error = %e, "calls sheet unreadable"),
            }
        }
        if let Some(sheet) = &plan.sms_sheet {
            match workbook.worksheet_range(sheet) {
                Ok(range) => records.extend(extract_records(&range, true)),
                Err(e) => warn!(file = %file_name, sheet = %sheet, error = %e, "sms sheet unreadable"),
            }
        }

        let subscribers = match &plan.subscriber_sheet {
            Some(sheet) => match workbook.worksheet_range(sheet) {
                Ok(range) => extract_subscribers(&range),
                Err(e) => {
                    warn!(file = %file_name, sheet = %sheet, error = %e, "identification sheet unreadable");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let aggregates = aggregate_records(&records, &subscribers);
        self.metrics
            .record_extraction(records.len(), subscribers.len(), aggregates.len());
        info!(
            file = %file_name,
            records = records.len(),
            subscribers = subscribers.len(),
            aggregates = aggregates.len(),
            "workbook parsed"
        );

        let result = ParsedFileResult {
            file_name,
            file_type,
            aggregates: aggregates.into_values().collect(),
            records,
            subscribers,
        };
        timer.finish();
        Ok(result)
    }

    /// Classify a workbook without extracting records: file type, sheet
    /// plan, and the column mapping each listing sheet would get.
    pub fn inspect_workbook(&self, bytes: &[u8], file_name: &str) -> Result<WorkbookInspection> {
        let file_name = InputValidator::sanitize_text(file_name);
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|source| CdrError::Workbook {
                file_name: file_name.clone(),
                source,
            })?;

        let sheet_names = workbook.sheet_names();
        let file_type = classify_file_type(&sheet_names);
        let plan = plan_sheets(&sheet_names);

        let mut columns = Vec::new();
        for sheet in [&plan.calls_sheet, &plan.sms_sheet].into_iter().flatten() {
            if let Ok(range) = workbook.worksheet_range(sheet) {
                columns.push((sheet.clone(), infer_columns(&header_row(&range))));
            }
        }

        Ok(WorkbookInspection {
            file_type,
            plan,
            columns,
        })
    }

    /// Parse a batch of named files concurrently, one blocking task per
    /// file, returning one outcome per input in the same order.
    ///
    /// Files failing the name/extension checks are rejected before their
    /// bytes reach the pipeline. A failure in one file never aborts its
    /// siblings.
    pub async fn parse_batch(&self, files: Vec<NamedFile>) -> Vec<FileOutcome> {
        enum Slot {
            Ready(Box<FileOutcome>),
            Pending(String, JoinHandle<Result<ParsedFileResult>>),
        }

        let mut slots = Vec::with_capacity(files.len());
        for file in files {
            let checked = InputValidator::validate_file_name(&file.name)
                .and_then(|()| InputValidator::validate_extension(&file.name));
            if let Err(e) = checked {
                self.metrics.record_error("rejected");
                slots.push(Slot::Ready(Box::new(FileOutcome::failed(
                    file.name,
                    e.to_string(),
                ))));
                continue;
            }

            let service = self.clone();
            let name = file.name.clone();
            let handle =
                tokio::task::spawn_blocking(move || service.parse_workbook(&file.bytes, &file.name));
            slots.push(Slot::Pending(name, handle));
        }

        let mut outcomes = Vec::with_capacity(slots.len());
        for slot in slots {
            let outcome = match slot {
                Slot::Ready(outcome) => *outcome,
                Slot::Pending(name, handle) => match handle.await {
                    Ok(Ok(data)) => FileOutcome::ok(data),
                    Ok(Err(e)) => FileOutcome::failed(name, e.to_string()),
                    Err(join_err) => {
                        FileOutcome::failed(name, format!("parse task failed: {join_err}"))
                    }
                },
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

fn header_row(range: &Range<Data>) -> Vec<String> {
    range.rows().next().map_or_else(Vec::new, |row| {
        row.iter().map(crate::normalize::cell_to_string).collect()
    })
}
