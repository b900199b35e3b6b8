//! Comprehensive unit tests for validation.rs module

use cdr_ingest::validation::InputValidator;

#[test]
fn test_validate_file_name_valid() {
    assert!(InputValidator::validate_file_name("listing_appels_mars.xlsx").is_ok());
}

#[test]
fn test_validate_file_name_empty() {
    assert!(InputValidator::validate_file_name("").is_err());
}

#[test]
fn test_validate_file_name_whitespace_only() {
    assert!(InputValidator::validate_file_name("   ").is_err());
}

#[test]
fn test_validate_file_name_too_long() {
    let long_name = format!("{}.xlsx", "a".repeat(300));
    assert!(InputValidator::validate_file_name(&long_name).is_err());
}

#[test]
fn test_validate_file_name_with_null_byte() {
    assert!(InputValidator::validate_file_name("listing\0.xlsx").is_err());
}

#[test]
fn test_validate_file_name_with_newline() {
    assert!(InputValidator::validate_file_name("listing\n.xlsx").is_err());
}

#[test]
fn test_validate_file_name_unicode() {
    assert!(InputValidator::validate_file_name("écoutes_février.xlsx").is_ok());
}

#[test]
fn test_validate_extension_xlsx() {
    assert!(InputValidator::validate_extension("listing.xlsx").is_ok());
}

#[test]
fn test_validate_extension_xls() {
    assert!(InputValidator::validate_extension("listing.xls").is_ok());
}

#[test]
fn test_validate_extension_case_insensitive() {
    assert!(InputValidator::validate_extension("LISTING.XLSX").is_ok());
}

#[test]
fn test_validate_extension_csv_rejected() {
    assert!(InputValidator::validate_extension("listing.csv").is_err());
}

#[test]
fn test_validate_extension_missing_rejected() {
    assert!(InputValidator::validate_extension("listing").is_err());
}

#[test]
fn test_validate_extension_xlsx_suffix_in_stem_rejected() {
    assert!(InputValidator::validate_extension("listing.xlsx.exe").is_err());
}

#[test]
fn test_validate_workbook_size_ok() {
    assert!(InputValidator::validate_workbook_size(1024, 50).is_ok());
}

#[test]
fn test_validate_workbook_size_empty() {
    assert!(InputValidator::validate_workbook_size(0, 50).is_err());
}

#[test]
fn test_validate_workbook_size_over_limit() {
    assert!(InputValidator::validate_workbook_size(51 * 1024 * 1024, 50).is_err());
}

#[test]
fn test_validate_workbook_size_at_limit() {
    assert!(InputValidator::validate_workbook_size(50 * 1024 * 1024, 50).is_ok());
}

#[test]
fn test_coordinates_in_range() {
    assert!(InputValidator::coordinates_in_range(11.5, 3.9));
    assert!(InputValidator::coordinates_in_range(-180.0, -90.0));
    assert!(InputValidator::coordinates_in_range(180.0, 90.0));
}

#[test]
fn test_coordinates_out_of_range() {
    assert!(!InputValidator::coordinates_in_range(180.1, 0.0));
    assert!(!InputValidator::coordinates_in_range(0.0, 90.1));
    assert!(!InputValidator::coordinates_in_range(-181.0, 0.0));
    assert!(!InputValidator::coordinates_in_range(0.0, -91.0));
}

#[test]
fn test_sanitize_text_removes_control_chars() {
    assert_eq!(InputValidator::sanitize_text("abc\u{0}def"), "abcdef");
}

#[test]
fn test_sanitize_text_keeps_whitespace_chars() {
    assert_eq!(InputValidator::sanitize_text("a\tb\nc"), "a\tb\nc");
}

#[test]
fn test_sanitize_text_trims() {
    assert_eq!(InputValidator::sanitize_text("  listing.xlsx  "), "listing.xlsx");
}
