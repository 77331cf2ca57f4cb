//! Feature aggregation over windows of events.
//!
//! Both the offline label generator and the online forecast go through
//! [`compute_features`], so a model always sees features built the same way.

use std::ops::{Bound, RangeBounds};

use quake_spi::{magnitudes, Event, FeatureVector, QuakeError, Result};

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Compute the feature vector of a window of events.
///
/// `events` must be ascending by timestamp; the last element is taken as the
/// most recent event. `reference_ms` is "now" for live scoring or the labeled
/// instant when generating training samples.
///
/// Windows with fewer than `min_events` events (and always empty windows) are
/// rejected with [`QuakeError::InsufficientData`].
pub fn compute_features(events: &[Event], reference_ms: i64, min_events: usize) -> Result<FeatureVector> {
    let required = min_events.max(1);
    let last = match events.last() {
        Some(last) if events.len() >= required => last,
        _ => {
            return Err(QuakeError::InsufficientData {
                required,
                actual: events.len(),
            })
        }
    };

    let mags = magnitudes(events);
    let sum: f64 = mags.iter().sum();
    let max = mags.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(FeatureVector {
        num_quakes: mags.len(),
        avg_mag: sum / mags.len() as f64,
        max_mag: max,
        time_since_last: hours_between(last.timestamp_ms, reference_ms),
    })
}

/// Hours from `from_ms` to `to_ms`, clamped at zero.
pub fn hours_between(from_ms: i64, to_ms: i64) -> f64 {
    ((to_ms - from_ms) as f64 / MS_PER_HOUR as f64).max(0.0)
}

/// Slice of a sorted event sequence whose timestamps fall in `range`.
///
/// Uses binary search, so `events` must be ascending by timestamp.
pub fn time_window<R: RangeBounds<i64>>(events: &[Event], range: R) -> &[Event] {
    let lo = match range.start_bound() {
        Bound::Included(&start) => events.partition_point(|e| e.timestamp_ms < start),
        Bound::Excluded(&start) => events.partition_point(|e| e.timestamp_ms <= start),
        Bound::Unbounded => 0,
    };
    let hi = match range.end_bound() {
        Bound::Included(&end) => events.partition_point(|e| e.timestamp_ms <= end),
        Bound::Excluded(&end) => events.partition_point(|e| e.timestamp_ms < end),
        Bound::Unbounded => events.len(),
    };

    if lo >= hi {
        &[]
    } else {
        &events[lo..hi]
    }
}

/// The last `count` events of a sorted sequence, or all of them.
pub fn most_recent(events: &[Event], count: Option<usize>) -> &[Event] {
    match count {
        Some(n) => &events[events.len().saturating_sub(n)..],
        None => events,
    }
}
