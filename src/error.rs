//! Error types for the cdr-ingest library.
//!
//! This module provides custom error types using `thiserror` for better error
//! handling and more specific error messages throughout the pipeline.
//!
//! Only whole-file failures are represented here. Field-level problems (a bad
//! date, an unreadable location string, a missing sheet) never raise: they
//! degrade to null/empty values and extraction continues.

use thiserror::Error;

/// Errors that can occur in the cdr-ingest pipeline.
#[derive(Error, Debug)]
pub enum CdrError {
    /// The workbook bytes could not be opened or decoded
    #[error("Unreadable workbook '{file_name}': {source}")]
    Workbook {
        /// Original file name, for reporting
        file_name: String,
        /// Underlying calamine error
        #[source]
        source: calamine::Error,
    },

    /// The file extension is not an accepted spreadsheet format
    #[error("Unsupported file extension for '{0}': expected .xlsx or .xls")]
    UnsupportedExtension(String),

    /// The workbook exceeds the configured size limit
    #[error("Workbook '{file_name}' is too large: {size} bytes (max {max})")]
    FileTooLarge {
        /// Original file name
        file_name: String,
        /// Actual size in bytes
        size: u64,
        /// Configured maximum in bytes
        max: u64,
    },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with `CdrError`
pub type Result<T> = std::result::Result<T, CdrError>;

impl From<anyhow::Error> for CdrError {
    fn from(err: anyhow::Error) -> Self {
        CdrError::Other(err.to_string())
    }
}
