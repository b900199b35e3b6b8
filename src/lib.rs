//! CDR Ingest - Carrier Spreadsheet Parsing and Aggregation
//!
//! A Rust library for ingesting call/SMS detail record spreadsheets exported
//! by telecom carriers, normalizing them across heterogeneous layouts, and
//! aggregating per-subscriber activity.
//!
//! # Features
//!
//! - XLSX/XLS workbook classification by sheet names (NUMERO/IMEI/CC)
//! - Column-role inference over hand-authored header rows
//! - Cell-site location decoding from free-text descriptions
//! - Phone-number and date normalization across source formats
//! - Per-number aggregation: counts, activity window, visited locations
//! - Cross-file merging of independent parse results
//! - Concurrent batch parsing with per-file failure isolation

/// Per-number aggregation
pub mod aggregate;
/// Column role inference
pub mod columns;
/// Configuration management
pub mod config;
/// Error types
pub mod error;
/// Result and record export
pub mod export;
/// Record and subscriber extraction
pub mod extract;
/// Cell-site location decoding
pub mod location;
/// Logging setup and utilities
pub mod logging;
/// Cross-file merging
pub mod merge;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Phone and date normalization
pub mod normalize;
/// Pipeline orchestration
pub mod service;
/// Workbook sheet classification
pub mod sheets;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use error::{CdrError, Result};
pub use models::{
    CallRecord, FileOutcome, FileType, LocationData, NamedFile, ParsedFileResult, PhoneAggregate,
    SubscriberInfo,
};
pub use service::ParserService;
