//! Tests for cross-file aggregate merging

use cdr_ingest::aggregate::aggregate_records;
use cdr_ingest::merge::merge_results;
use cdr_ingest::models::{CallRecord, FileType, LocationData, ParsedFileResult};

fn one_record_file(file_name: &str, caller: &str, date: &str, latitude: f64) -> ParsedFileResult {
    let record = CallRecord {
        id: format!("{file_name}-1"),
        caller: caller.to_string(),
        callee: String::new(),
        imei: String::new(),
        date_time: cdr_ingest::normalize::parse_date_str(date),
        duration: "00:00:30".to_string(),
        location: Some(LocationData {
            site_name: "Bastos".to_string(),
            cell_id: "A1".to_string(),
            longitude: 11.5,
            latitude,
            azimuth: "45".to_string(),
        }),
        location_raw: String::new(),
    };
    let records = vec![record];
    let aggregates = aggregate_records(&records, &[]).into_values().collect();
    ParsedFileResult {
        file_name: file_name.to_string(),
        file_type: FileType::Numero,
        aggregates,
        records,
        subscribers: Vec::new(),
    }
}

#[test]
fn test_merge_same_number_across_files() {
    // Two files, one record each for the same number at the same site
    // (within epsilon): one aggregate, callCount 2, one location.
    let a = one_record_file("a.xlsx", "699111222", "15/03/2024 09:00:00", 3.9);
    let b = one_record_file("b.xlsx", "699111222", "16/03/2024 10:00:00", 3.90003);

    let merged = merge_results(&[a, b]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].number, "699111222");
    assert_eq!(merged[0].call_count, 2);
    assert_eq!(merged[0].locations.len(), 1);
    assert_eq!(merged[0].records.len(), 2);
}

#[test]
fn test_merge_re_sorts_concatenated_records() {
    let a = one_record_file("a.xlsx", "699111222", "16/03/2024 10:00:00", 3.9);
    let b = one_record_file("b.xlsx", "699111222", "15/03/2024 09:00:00", 5.0);

    let merged = merge_results(&[a, b]);
    let records = &merged[0].records;
    assert_eq!(records[0].id, "b.xlsx-1");
    assert_eq!(records[1].id, "a.xlsx-1");
}

#[test]
fn test_merge_widens_activity_window() {
    let a = one_record_file("a.xlsx", "699111222", "15/03/2024 09:00:00", 3.9);
    let b = one_record_file("b.xlsx", "699111222", "20/03/2024 18:00:00", 3.9);

    let merged = merge_results(&[a, b]);
    let expected_first = cdr_ingest::normalize::parse_date_str("15/03/2024 09:00:00");
    let expected_last = cdr_ingest::normalize::parse_date_str("20/03/2024 18:00:00");
    assert_eq!(merged[0].first_activity, expected_first);
    assert_eq!(merged[0].last_activity, expected_last);
}

#[test]
fn test_merge_distinct_numbers_stay_separate() {
    let a = one_record_file("a.xlsx", "699111222", "15/03/2024 09:00:00", 3.9);
    let b = one_record_file("b.xlsx", "677000111", "15/03/2024 09:00:00", 4.8);

    let merged = merge_results(&[a, b]);
    assert_eq!(merged.len(), 2);
    // Ordered by number
    assert_eq!(merged[0].number, "677000111");
    assert_eq!(merged[1].number, "699111222");
}

#[test]
fn test_merge_distant_locations_unioned() {
    let a = one_record_file("a.xlsx", "699111222", "15/03/2024 09:00:00", 3.9);
    let b = one_record_file("b.xlsx", "699111222", "15/03/2024 10:00:00", 4.8);

    let merged = merge_results(&[a, b]);
    assert_eq!(merged[0].locations.len(), 2);
}

#[test]
fn test_merge_empty_input() {
    assert!(merge_results(&[]).is_empty());
}
