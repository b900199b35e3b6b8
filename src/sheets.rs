//! Workbook sheet classification.
//!
//! Sheet names decide both the file type (NUMERO/IMEI/CC) and which sheets
//! feed the record and subscriber extractors. Names are compared on the same
//! normalized form the column inferencer uses.

use crate::columns::normalize_header;
use crate::models::FileType;

/// Which sheets of a workbook feed which extractor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetPlan {
    /// Sheet holding call records, if any
    pub calls_sheet: Option<String>,
    /// Sheet holding SMS records, if any
    pub sms_sheet: Option<String>,
    /// Identification sheet holding subscriber rows, if any
    pub subscriber_sheet: Option<String>,
}

/// Infer the workbook type from its sheet names.
///
/// NUMERO wins over IMEI when both kinds of names appear; CC is the default
/// when nothing matches.
#[must_use]
pub fn classify_file_type(sheet_names: &[String]) -> FileType {
    let normalized: Vec<String> = sheet_names.iter().map(|n| normalize_header(n)).collect();
    if normalized
        .iter()
        .any(|n| n.contains("listing appel") || n.contains("listing sms"))
    {
        FileType::Numero
    } else if normalized.iter().any(|n| n.contains("imei partage")) {
        FileType::Imei
    } else {
        FileType::Cc
    }
}

/// Locate the listing and identification sheets in one scan.
///
/// The first sheet containing "listing appel" becomes the calls sheet and
/// the first containing "listing sms" the SMS sheet. A sheet named exactly
/// "listing" is a fallback calls sheet for single-sheet IMEI/CC layouts,
/// only used when no calls sheet was found before it.
#[must_use]
pub fn plan_sheets(sheet_names: &[String]) -> SheetPlan {
    let mut plan = SheetPlan::default();
    for name in sheet_names {
        let normalized = normalize_header(name);
        if plan.calls_sheet.is_none() && normalized.contains("listing appel") {
            plan.calls_sheet = Some(name.clone());
        }
        if plan.sms_sheet.is_none() && normalized.contains("listing sms") {
            plan.sms_sheet = Some(name.clone());
        }
        if plan.calls_sheet.is_none() && normalized == "listing" {
            plan.calls_sheet = Some(name.clone());
        }
        if plan.subscriber_sheet.is_none() && normalized.contains("identification") {
            plan.subscriber_sheet = Some(name.clone());
        }
    }
    plan
}
