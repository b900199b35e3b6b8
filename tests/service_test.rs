//! Tests for the parse service boundary: size limits, extension checks,
//! and per-file failure isolation in batch parses

use cdr_ingest::config::ParserConfig;
use cdr_ingest::error::CdrError;
use cdr_ingest::models::NamedFile;
use cdr_ingest::service::ParserService;

fn service() -> ParserService {
    ParserService::new(ParserConfig {
        max_workbook_size_mb: 1,
    })
}

#[test]
fn test_garbage_bytes_fail_as_workbook_error() {
    let err = service()
        .parse_workbook(&[0u8; 128], "garbage.xlsx")
        .expect_err("garbage cannot be a workbook");
    assert!(matches!(err, CdrError::Workbook { .. }));
}

#[test]
fn test_empty_bytes_fail_as_workbook_error() {
    let err = service()
        .parse_workbook(&[], "empty.xlsx")
        .expect_err("empty file cannot be a workbook");
    assert!(matches!(err, CdrError::Workbook { .. }));
}

#[test]
fn test_oversized_workbook_rejected() {
    let bytes = vec![0u8; 2 * 1024 * 1024];
    let err = service()
        .parse_workbook(&bytes, "big.xlsx")
        .expect_err("over the configured limit");
    assert!(matches!(err, CdrError::FileTooLarge { .. }));
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let files = vec![
        NamedFile {
            name: "first.xlsx".to_string(),
            bytes: vec![0u8; 64],
        },
        NamedFile {
            name: "second.xls".to_string(),
            bytes: vec![1, 2, 3, 4],
        },
    ];
    let outcomes = service().parse_batch(files).await;

    // One outcome per input, same order, every failure isolated
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].file_name, "first.xlsx");
    assert_eq!(outcomes[1].file_name, "second.xls");
    for outcome in &outcomes {
        assert!(!outcome.success);
        assert!(outcome.data.is_none());
        assert!(outcome.error.is_some());
    }
}

#[tokio::test]
async fn test_batch_rejects_bad_extension_before_parsing() {
    let files = vec![NamedFile {
        name: "notes.txt".to_string(),
        bytes: b"not a workbook".to_vec(),
    }];
    let outcomes = service().parse_batch(files).await;
    assert!(!outcomes[0].success);
    let error = outcomes[0].error.as_deref().expect("error message");
    assert!(error.contains("extension"));
}

#[tokio::test]
async fn test_batch_rejects_invalid_file_name() {
    let files = vec![NamedFile {
        name: "bad\nname.xlsx".to_string(),
        bytes: vec![0u8; 8],
    }];
    let outcomes = service().parse_batch(files).await;
    assert!(!outcomes[0].success);
}

#[tokio::test]
async fn test_empty_batch() {
    let outcomes = service().parse_batch(Vec::new()).await;
    assert!(outcomes.is_empty());
}
