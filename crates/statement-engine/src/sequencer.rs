//! Chronological ordering of raw records
//!
//! Records carry partial timing information. The sort key is the first
//! usable value of:
//!
//! 1. `occurredAt` (epoch millis or date string)
//! 2. `date` + `time` combined
//! 3. `timestamp`, then `createdAt`
//! 4. the Unix epoch
//!
//! Naive date-times are read as UTC so ordering does not depend on the host.

use crate::temporal::parse_date_time;
use chrono::{DateTime, NaiveDate, Utc};
use shared_types::{IncidentRecord, TimeValue};

/// Comparable instant for a record
pub fn sort_key(record: &IncidentRecord) -> DateTime<Utc> {
    if let Some(instant) = record.occurred_at.as_ref().and_then(parse_time_value) {
        return instant;
    }

    let combined = format!("{} {}", record.date.trim(), record.time.trim());
    if let Some(naive) = parse_date_time(&combined) {
        return naive.and_utc();
    }

    [record.timestamp.as_ref(), record.created_at.as_ref()]
        .into_iter()
        .flatten()
        .find_map(parse_time_value)
        .unwrap_or_default()
}

/// Stable ascending order by `sort_key`; ties keep input order
pub fn sequence(records: &[IncidentRecord]) -> Vec<(DateTime<Utc>, &IncidentRecord)> {
    let mut keyed: Vec<_> = records.iter().map(|r| (sort_key(r), r)).collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed
}

fn parse_time_value(value: &TimeValue) -> Option<DateTime<Utc>> {
    match value {
        TimeValue::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        TimeValue::FractionalMillis(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(ms.round() as i64)
        }
        TimeValue::FractionalMillis(_) => None,
        TimeValue::Text(text) => parse_time_text(text),
    }
}

fn parse_time_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = parse_date_time(text) {
        return Some(naive.and_utc());
    }
    // ISO form with fractional seconds but no offset, e.g. 2025-01-10T19:30:00.000
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
