//! Field normalization: phone numbers and timestamps.
//!
//! Carrier exports disagree on almost everything: numbers arrive with the
//! country prefix, separators, or as raw spreadsheet floats; dates arrive as
//! native spreadsheet serials, `DD/MM/YYYY` strings, dashed variants, or
//! ISO-8601. Everything funnels through here so the rest of the pipeline
//! only ever sees digits-only numbers and `NaiveDateTime` values.

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Country-code prefix stripped from the front of phone numbers
const COUNTRY_PREFIX: &str = "237";

/// Normalize a phone number: trim, strip one leading `"237"` country prefix,
/// then drop every non-digit character. Empty input yields an empty string.
///
/// Intentionally lossy: leading zeros and other country prefixes survive
/// as-is, matching how the listing sheets key their numbers.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    let rest = trimmed.strip_prefix(COUNTRY_PREFIX).unwrap_or(trimmed);
    rest.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parse a date string, trying formats in strict order: `DD/MM/YYYY HH:MM:SS`,
/// `DD-MM-YYYY HH:MM:SS`, then generic ISO-8601. Returns `None` for anything
/// else; callers must treat that as "unknown", never as epoch.
#[must_use]
pub fn parse_date_str(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%d-%m-%Y %H:%M:%S") {
        return Some(dt);
    }
    parse_iso(s)
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

/// Convert a spreadsheet date serial to a calendar timestamp.
///
/// Serial day 0 is 1899-12-30 (the 1900 date system with its Lotus leap-year
/// quirk baked in); the fractional part carries the time of day.
#[must_use]
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let secs = (serial.fract() * 86_400.0).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    epoch
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(secs))
}

/// Normalize a spreadsheet cell to a timestamp, trying in strict order:
/// native date value, numeric date serial, then the string formats of
/// [`parse_date_str`]. Unparseable cells yield `None`.
#[must_use]
pub fn normalize_date_cell(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => from_excel_serial(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => parse_date_str(s),
        Data::Float(f) => from_excel_serial(*f),
        Data::Int(i) => from_excel_serial(*i as f64),
        Data::String(s) => parse_date_str(s),
        Data::Bool(_) | Data::Error(_) | Data::Empty => None,
    }
}

/// Coerce any cell to trimmed display text; empty string for blank cells.
///
/// Integral floats print without a fractional part, which is how phone
/// numbers and IMEIs stored as numbers come back out.
#[must_use]
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => from_excel_serial(dt.as_f64())
            .map(|d| d.format("%d/%m/%Y %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}
