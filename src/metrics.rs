use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Metrics collection and management
///
/// Metric names are fixed; emission goes through the `metrics` facade, so a
/// host application decides where they land by installing a recorder.
#[derive(Debug, Clone)]
pub struct PipelineMetrics {
    /// Files parsed, labeled by status
    pub files_parsed_total: &'static str,
    /// Whole-file parse duration
    pub parse_duration: &'static str,
    /// Records extracted from listing sheets
    pub records_extracted_total: &'static str,
    /// Subscribers extracted from identification sheets
    pub subscribers_extracted_total: &'static str,
    /// Aggregates produced per file
    pub aggregates_per_file: &'static str,
    /// Errors, labeled by type
    pub errors_total: &'static str,
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self {
            files_parsed_total: "cdr_ingest_files_parsed_total",
            parse_duration: "cdr_ingest_parse_duration_seconds",
            records_extracted_total: "cdr_ingest_records_extracted_total",
            subscribers_extracted_total: "cdr_ingest_subscribers_extracted_total",
            aggregates_per_file: "cdr_ingest_aggregates_per_file",
            errors_total: "cdr_ingest_errors_total",
        }
    }
}

impl PipelineMetrics {
    /// Record a whole-file parse: status, duration, extracted volume
    pub fn record_file_parse(&self, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };
        counter!(self.files_parsed_total, "status" => status).increment(1);
        histogram!(self.parse_duration, "status" => status).record(duration.as_secs_f64());
    }

    /// Record extraction volume for one file
    pub fn record_extraction(&self, records: usize, subscribers: usize, aggregates: usize) {
        counter!(self.records_extracted_total).increment(records as u64);
        counter!(self.subscribers_extracted_total).increment(subscribers as u64);
        gauge!(self.aggregates_per_file).set(aggregates as f64);
    }

    /// Record an error by type
    pub fn record_error(&self, error_type: &'static str) {
        counter!(self.errors_total, "type" => error_type).increment(1);
    }
}
