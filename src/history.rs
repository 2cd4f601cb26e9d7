//! Metric history helpers
//!
//! Day counting, latest-entry selection, and weekday/weekend partitioning over
//! a slice of validated entries.

use crate::schema::{RawMetricEntry, ValidationError};
use crate::types::MetricEntry;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// Count distinct calendar dates in a history
pub fn count_days(metrics: &[MetricEntry]) -> usize {
    metrics
        .iter()
        .map(|m| m.date)
        .collect::<HashSet<NaiveDate>>()
        .len()
}

/// Count distinct calendar dates in unvalidated entries
///
/// Dates are normalized first, so `"2024-01-01"` and `{year: 2024, month: 1, day: 1}`
/// count once.
pub fn count_raw_days(metrics: &[RawMetricEntry]) -> Result<usize, ValidationError> {
    let mut dates = HashSet::new();
    for (idx, entry) in metrics.iter().enumerate() {
        dates.insert(entry.date.normalize(idx)?);
    }
    Ok(dates.len())
}

/// The entry with the maximum date.
///
/// Among entries sharing the maximum date, the last-listed one wins.
pub fn latest_entry(metrics: &[MetricEntry]) -> Option<&MetricEntry> {
    // max_by_key returns the last maximum element
    metrics.iter().max_by_key(|m| m.date)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Mean sleep over weekend and weekday entries, `None` for an empty side
pub fn weekend_weekday_sleep(metrics: &[MetricEntry]) -> (Option<f64>, Option<f64>) {
    let (weekend, weekday): (Vec<&MetricEntry>, Vec<&MetricEntry>) =
        metrics.iter().partition(|m| is_weekend(m.date));

    (mean_sleep(&weekend), mean_sleep(&weekday))
}

fn mean_sleep(entries: &[&MetricEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: f64 = entries.iter().map(|m| m.sleep_duration).sum();
    Some(sum / entries.len() as f64)
}
