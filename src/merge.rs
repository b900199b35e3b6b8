//! Cross-file aggregate merging.
//!
//! Runs after all per-file parses have completed: a pure fold over the
//! already-immutable per-file results. Counts sum, record lists concatenate
//! and re-sort, locations union under the same epsilon rule the per-file
//! aggregator uses, and the first identity seen for a number wins.

use std::collections::BTreeMap;

use crate::aggregate::{push_location, sort_records};
use crate::models::{ParsedFileResult, PhoneAggregate};

fn merge_into(target: &mut PhoneAggregate, source: &PhoneAggregate) {
    target.call_count += source.call_count;
    target.sms_count += source.sms_count;
    target.first_activity = match (target.first_activity, source.first_activity) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    target.last_activity = match (target.last_activity, source.last_activity) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };
    for location in &source.locations {
        push_location(&mut target.locations, location);
    }
    target.records.extend(source.records.iter().cloned());
    if target.subscriber.is_none() {
        target.subscriber = source.subscriber.clone();
    }
}

/// Merge several per-file parse results into one unified aggregate list,
/// ordered by number.
#[must_use]
pub fn merge_results(results: &[ParsedFileResult]) -> Vec<PhoneAggregate> {
    let mut merged: BTreeMap<String, PhoneAggregate> = BTreeMap::new();

    for result in results {
        for agg in &result.aggregates {
            match merged.get_mut(&agg.number) {
                Some(existing) => merge_into(existing, agg),
                None => {
                    merged.insert(agg.number.clone(), agg.clone());
                }
            }
        }
    }

    let mut aggregates: Vec<PhoneAggregate> = merged.into_values().collect();
    for agg in &mut aggregates {
        sort_records(&mut agg.records);
    }
    aggregates
}
