//! Per-number aggregation of extracted records.
//!
//! Builds one [`PhoneAggregate`] per distinct caller number and folds every
//! record into it: counters, activity window, deduplicated location set and
//! the chronological record list. A `BTreeMap` keeps iteration (and thus
//! serialization) order deterministic.

use std::collections::BTreeMap;

use crate::models::{CallRecord, LocationData, PhoneAggregate, SubscriberInfo};

/// Minimum normalized digits for a caller number to key an aggregate;
/// anything shorter is switch noise, not a subscriber number.
const MIN_NUMBER_DIGITS: usize = 6;

/// Per-axis threshold under which two coordinates are the same site.
/// A planar epsilon box, not a geodesic distance: site coordinates are
/// cell-tower coarse.
pub(crate) const LOCATION_EPSILON: f64 = 1e-4;

/// Epsilon-box location equality
pub(crate) fn same_location(a: &LocationData, b: &LocationData) -> bool {
    (a.latitude - b.latitude).abs() < LOCATION_EPSILON
        && (a.longitude - b.longitude).abs() < LOCATION_EPSILON
}

/// Append a location unless a near-duplicate is already present
pub(crate) fn push_location(locations: &mut Vec<LocationData>, location: &LocationData) {
    if !locations.iter().any(|l| same_location(l, location)) {
        locations.push(location.clone());
    }
}

/// Sort records ascending by timestamp; missing timestamps sort as epoch 0
pub(crate) fn sort_records(records: &mut [CallRecord]) {
    records.sort_by_key(|r| r.date_time.map_or(0, |d| d.and_utc().timestamp()));
}

/// Fold one record into an aggregate: bump the SMS or call counter, widen
/// the activity window, dedup-append the location, append the record.
fn fold_record(agg: &mut PhoneAggregate, record: &CallRecord) {
    if record.is_sms() {
        agg.sms_count += 1;
    } else {
        agg.call_count += 1;
    }
    if let Some(ts) = record.date_time {
        agg.first_activity = Some(agg.first_activity.map_or(ts, |cur| cur.min(ts)));
        agg.last_activity = Some(agg.last_activity.map_or(ts, |cur| cur.max(ts)));
    }
    if let Some(location) = &record.location {
        push_location(&mut agg.locations, location);
    }
    agg.records.push(record.clone());
}

/// Build one aggregate per distinct caller number from a file's records,
/// then join subscriber identities by exact normalized-number match.
///
/// Records are attributed by caller number only; a record carrying just a
/// called number contributes no aggregate entry.
#[must_use]
pub fn aggregate_records(
    records: &[CallRecord],
    subscribers: &[SubscriberInfo],
) -> BTreeMap<String, PhoneAggregate> {
    let mut aggregates: BTreeMap<String, PhoneAggregate> = BTreeMap::new();

    for record in records {
        if record.caller.len() < MIN_NUMBER_DIGITS {
            continue;
        }
        let agg = aggregates
            .entry(record.caller.clone())
            .or_insert_with(|| PhoneAggregate::new(record.caller.clone()));
        fold_record(agg, record);
    }

    for agg in aggregates.values_mut() {
        sort_records(&mut agg.records);
        agg.subscriber = subscribers.iter().find(|s| s.number == agg.number).cloned();
    }

    aggregates
}
