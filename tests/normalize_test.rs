//! Comprehensive unit tests for field normalization

use calamine::Data;
use cdr_ingest::normalize::{
    cell_to_string, from_excel_serial, normalize_date_cell, normalize_phone, parse_date_str,
};
use chrono::{Datelike, NaiveDate, Timelike};
use proptest::prelude::*;

// -------------------------------------------------------------------------
// Phone normalization
// -------------------------------------------------------------------------

#[test]
fn test_normalize_phone_strips_country_prefix() {
    assert_eq!(normalize_phone("237699123456"), "699123456");
}

#[test]
fn test_normalize_phone_strips_separators() {
    assert_eq!(normalize_phone("699-123-456"), "699123456");
    assert_eq!(normalize_phone("699 123 456"), "699123456");
    assert_eq!(normalize_phone("(699) 123.456"), "699123456");
}

#[test]
fn test_normalize_phone_trims_whitespace() {
    assert_eq!(normalize_phone("  699123456  "), "699123456");
}

#[test]
fn test_normalize_phone_empty_input() {
    assert_eq!(normalize_phone(""), "");
    assert_eq!(normalize_phone("   "), "");
}

#[test]
fn test_normalize_phone_prefix_only_stripped_at_start() {
    // "237" inside the number survives
    assert_eq!(normalize_phone("699237123"), "699237123");
}

#[test]
fn test_normalize_phone_prefix_with_plus_not_stripped() {
    // The prefix check is literal: "+237..." does not start with "237"
    assert_eq!(normalize_phone("+237699123456"), "237699123456");
}

proptest! {
    /// Normalization is idempotent over realistic subscriber numbers
    #[test]
    fn prop_normalize_phone_idempotent(raw in "(237)?6[0-9]{8}") {
        let once = normalize_phone(&raw);
        prop_assert_eq!(normalize_phone(&once), once.clone());
    }

    /// Separators never change the digits that come out
    #[test]
    fn prop_separators_are_ignored(digits in "6[0-9]{8}") {
        let spaced: String = digits
            .chars()
            .flat_map(|c| [c, ' '])
            .collect();
        prop_assert_eq!(normalize_phone(&spaced), digits);
    }
}

// -------------------------------------------------------------------------
// Date parsing
// -------------------------------------------------------------------------

#[test]
fn test_parse_date_slash_format() {
    let dt = parse_date_str("15/03/2024 14:30:00").expect("should parse");
    assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"));
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 30, 0));
}

#[test]
fn test_parse_date_dash_format_same_instant() {
    let slash = parse_date_str("15/03/2024 14:30:00").expect("should parse");
    let dash = parse_date_str("15-03-2024 14:30:00").expect("should parse");
    assert_eq!(slash, dash);
}

#[test]
fn test_parse_date_iso_fallback() {
    let dt = parse_date_str("2024-03-15T09:00:00").expect("should parse");
    assert_eq!(dt.year(), 2024);
    assert_eq!(dt.hour(), 9);
}

#[test]
fn test_parse_date_rfc3339() {
    let dt = parse_date_str("2024-03-15T09:00:00Z").expect("should parse");
    assert_eq!(dt.day(), 15);
}

#[test]
fn test_parse_date_bare_iso_date() {
    let dt = parse_date_str("2024-03-15").expect("should parse");
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
}

#[test]
fn test_parse_date_invalid_calendar_date_rejected() {
    assert!(parse_date_str("32/03/2024 14:30:00").is_none());
    assert!(parse_date_str("15/13/2024 14:30:00").is_none());
    assert!(parse_date_str("2024-02-30").is_none());
}

#[test]
fn test_parse_date_garbage_rejected() {
    assert!(parse_date_str("not a date").is_none());
    assert!(parse_date_str("").is_none());
}

#[test]
fn test_excel_serial_conversion() {
    // 45366 is 2024-03-15 in the 1900 date system; .375 is 09:00:00
    let dt = from_excel_serial(45366.375).expect("should convert");
    assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid"));
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (9, 0, 0));
}

#[test]
fn test_excel_serial_integer_day_is_midnight() {
    let dt = from_excel_serial(45366.0).expect("should convert");
    assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
}

#[test]
fn test_excel_serial_rejects_non_positive() {
    assert!(from_excel_serial(0.0).is_none());
    assert!(from_excel_serial(-1.0).is_none());
    assert!(from_excel_serial(f64::NAN).is_none());
}

#[test]
fn test_normalize_date_cell_variants() {
    let from_string = normalize_date_cell(&Data::String("15/03/2024 09:00:00".to_string()))
        .expect("should parse");
    let from_serial = normalize_date_cell(&Data::Float(45366.375)).expect("should parse");
    assert_eq!(from_string, from_serial);

    assert!(normalize_date_cell(&Data::Empty).is_none());
    assert!(normalize_date_cell(&Data::Bool(true)).is_none());
    assert!(normalize_date_cell(&Data::String("--".to_string())).is_none());
}

// -------------------------------------------------------------------------
// Cell coercion
// -------------------------------------------------------------------------

#[test]
fn test_cell_to_string_trims() {
    assert_eq!(cell_to_string(&Data::String("  699111222 ".to_string())), "699111222");
}

#[test]
fn test_cell_to_string_integral_float_has_no_fraction() {
    // Numbers stored as floats are how phone numbers usually arrive
    assert_eq!(cell_to_string(&Data::Float(699111222.0)), "699111222");
}

#[test]
fn test_cell_to_string_empty_cell() {
    assert_eq!(cell_to_string(&Data::Empty), "");
}
