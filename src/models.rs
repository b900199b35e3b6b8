//! Data models for the CDR parsing pipeline
//!
//! This module contains all data structures handed across the pipeline
//! boundary: call/SMS records, decoded cell-site locations, subscriber
//! identities, and the per-number aggregates built from them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One call or SMS detail record extracted from a listing sheet
///
/// Immutable once produced by the extractor. The duration text `"SMS"`
/// (case-insensitive) marks a record as an SMS; anything else is a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Identifier unique within one parse run
    pub id: String,
    /// Normalized caller number (digits only, `237` prefix stripped)
    pub caller: String,
    /// Normalized called number
    pub callee: String,
    /// Device IMEI as found on the row, trimmed
    pub imei: String,
    /// Event timestamp; `None` when the source cell could not be parsed
    pub date_time: Option<NaiveDateTime>,
    /// Duration text, or the literal `"SMS"` for SMS records
    pub duration: String,
    /// Decoded cell-site location, when the raw text yielded one
    pub location: Option<LocationData>,
    /// Raw location text exactly as found on the row, trimmed
    pub location_raw: String,
}

impl CallRecord {
    /// True if this record is an SMS per the duration-marker rule
    #[must_use]
    pub fn is_sms(&self) -> bool {
        self.duration.eq_ignore_ascii_case("SMS")
    }
}

/// A cell-site location decoded from free-text
///
/// Coordinates are WGS84 and validated to lie inside [-180,180]/[-90,90].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    /// Human-readable site label; `"Site inconnu"` when no name was found
    pub site_name: String,
    /// Cell identifier; empty string if absent
    pub cell_id: String,
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Antenna azimuth as text; `"-"` when absent or empty
    pub azimuth: String,
}

/// Subscriber identity parsed from an identification sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberInfo {
    /// Normalized phone number (the join key)
    pub number: String,
    /// Full name
    pub full_name: String,
    /// Birth date as a `DD/MM/YYYY` display string, empty if absent
    pub birth_date: String,
    /// National-ID number
    pub id_number: String,
    /// National-ID expiration as a display string
    pub id_expiration: String,
    /// Postal address
    pub address: String,
}

/// Per-phone-number rollup of counts, activity window, locations and records
///
/// Created lazily the first time a number is seen during aggregation and
/// mutated incrementally as records are folded in. Immutable once returned
/// across the parse boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneAggregate {
    /// Normalized phone number, unique across one pipeline run
    pub number: String,
    /// Identity joined from the identification sheet, when present
    pub subscriber: Option<SubscriberInfo>,
    /// Number of call records folded in
    pub call_count: u64,
    /// Number of SMS records folded in
    pub sms_count: u64,
    /// Earliest record timestamp, `None` if no record carried one
    pub first_activity: Option<NaiveDateTime>,
    /// Latest record timestamp
    pub last_activity: Option<NaiveDateTime>,
    /// Deduplicated visited locations (epsilon-box rule)
    pub locations: Vec<LocationData>,
    /// All records for this number, sorted ascending by timestamp
    pub records: Vec<CallRecord>,
}

impl PhoneAggregate {
    /// Create an empty aggregate for a number
    #[must_use]
    pub fn new(number: String) -> Self {
        Self {
            number,
            subscriber: None,
            call_count: 0,
            sms_count: 0,
            first_activity: None,
            last_activity: None,
            locations: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Total folded records
    #[must_use]
    pub const fn record_count(&self) -> u64 {
        self.call_count + self.sms_count
    }
}

/// Detected workbook type, inferred from sheet names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    /// A per-number listing export (calls and/or SMS sheets)
    #[serde(rename = "NUMERO")]
    Numero,
    /// An IMEI-sharing export
    #[serde(rename = "IMEI")]
    Imei,
    /// Default type when no known sheet name matches
    #[serde(rename = "CC")]
    Cc,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Numero => "NUMERO",
            Self::Imei => "IMEI",
            Self::Cc => "CC",
        };
        write!(f, "{tag}")
    }
}

/// Everything extracted from one workbook
///
/// The aggregate map is flattened to a list ordered by number so the
/// structure serializes the same way it merges: entry by entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedFileResult {
    /// Original file name (used for reporting only)
    pub file_name: String,
    /// Detected workbook type
    pub file_type: FileType,
    /// One aggregate per caller number, ordered by number
    pub aggregates: Vec<PhoneAggregate>,
    /// Flat list of every extracted record, in sheet order
    pub records: Vec<CallRecord>,
    /// Subscribers found on the identification sheet
    pub subscribers: Vec<SubscriberInfo>,
}

/// Per-file outcome reported to the caller of a batch parse
///
/// A failure in one file never aborts its siblings; each file gets exactly
/// one outcome entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Original file name
    pub file_name: String,
    /// True if the whole-file parse succeeded
    pub success: bool,
    /// Parse result, present iff `success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ParsedFileResult>,
    /// Error message, present iff not `success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    /// Build a success outcome
    #[must_use]
    pub fn ok(data: ParsedFileResult) -> Self {
        Self {
            file_name: data.file_name.clone(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Build a failure outcome
    #[must_use]
    pub fn failed(file_name: String, error: String) -> Self {
        Self {
            file_name,
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// A named in-memory workbook handed to the batch service
#[derive(Debug, Clone)]
pub struct NamedFile {
    /// Original file name, extension included
    pub name: String,
    /// Whole workbook contents
    pub bytes: Vec<u8>,
}
