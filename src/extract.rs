//! Row extraction: classified sheet ranges into normalized records.
//!
//! The extractors own the row loop and nothing else; column meaning comes
//! from [`crate::columns`], value cleanup from [`crate::normalize`], and
//! location decoding from [`crate::location`]. A bad field never aborts a
//! row and a bad row never aborts a sheet.

use calamine::{Data, Range};
use chrono::NaiveDateTime;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::columns::{infer_columns, normalize_header};
use crate::location::decode_location;
use crate::models::{CallRecord, SubscriberInfo};
use crate::normalize::{cell_to_string, normalize_date_cell, normalize_phone};

/// Duration marker distinguishing SMS records from calls
pub const SMS_MARKER: &str = "SMS";

/// Generate a record identifier unique within one parse run: the 1-based
/// data-row index plus an opaque random suffix.
fn record_id(row_idx: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{row_idx}-{suffix}")
}

fn cell_at<'a>(row: &'a [Data], idx: Option<usize>) -> Option<&'a Data> {
    idx.and_then(|i| row.get(i))
}

fn text_at(row: &[Data], idx: Option<usize>) -> String {
    cell_at(row, idx).map(cell_to_string).unwrap_or_default()
}

/// Extract call/SMS records from one listing sheet.
///
/// The first row is the header row; every following row yields a record iff
/// at least one of caller/called number is non-empty after normalization.
/// On an SMS sheet, rows with an empty duration are stamped `"SMS"`.
#[must_use]
pub fn extract_records(range: &Range<Data>, sms_sheet: bool) -> Vec<CallRecord> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();
    let columns = infer_columns(&headers);
    debug!(?columns, "inferred column mapping");

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        let caller = normalize_phone(&text_at(row, columns.caller));
        let callee = normalize_phone(&text_at(row, columns.called));
        if caller.is_empty() && callee.is_empty() {
            continue;
        }

        let date_time: Option<NaiveDateTime> =
            cell_at(row, columns.date).and_then(normalize_date_cell);
        let mut duration = text_at(row, columns.duration);
        if sms_sheet && duration.is_empty() {
            duration = SMS_MARKER.to_string();
        }
        let location_raw = text_at(row, columns.location);

        records.push(CallRecord {
            id: record_id(i + 1),
            caller,
            callee,
            imei: text_at(row, columns.imei),
            date_time,
            duration,
            location: decode_location(&location_raw),
            location_raw,
        });
    }
    records
}

/// Render a cell as a `DD/MM/YYYY` display date, falling back to the raw
/// trimmed text when it does not parse as a date.
fn display_date(cell: &Data) -> String {
    normalize_date_cell(cell).map_or_else(
        || cell_to_string(cell),
        |dt| dt.format("%d/%m/%Y").to_string(),
    )
}

/// Extract subscriber identities from an identification sheet.
///
/// Every header/value pair of a row is scanned against the identification
/// header rules; a subscriber is emitted only when a phone number was found.
#[must_use]
pub fn extract_subscribers(range: &Range<Data>) -> Vec<SubscriberInfo> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|c| normalize_header(&cell_to_string(c)))
        .collect();

    let mut subscribers = Vec::new();
    for row in rows {
        let mut sub = SubscriberInfo {
            number: String::new(),
            full_name: String::new(),
            birth_date: String::new(),
            id_number: String::new(),
            id_expiration: String::new(),
            address: String::new(),
        };

        for (header, cell) in headers.iter().zip(row.iter()) {
            let header = header.as_str();
            let is_phone_header =
                header == "numero" || (header.starts_with("numero") && !header.contains("cni"));
            if sub.number.is_empty() && is_phone_header {
                sub.number = normalize_phone(&cell_to_string(cell));
            } else if header.contains("nom") && header.contains("prenom") {
                sub.full_name = cell_to_string(cell);
            } else if header.contains("date") && header.contains("naissance") {
                sub.birth_date = display_date(cell);
            } else if header.contains("numero") && header.contains("cni") {
                sub.id_number = cell_to_string(cell);
            } else if header.contains("expiration") {
                sub.id_expiration = display_date(cell);
            } else if header == "adresse" {
                sub.address = cell_to_string(cell);
            }
        }

        if !sub.number.is_empty() {
            subscribers.push(sub);
        }
    }
    subscribers
}
