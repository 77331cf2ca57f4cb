//! Seismic event type and helpers for working with event sequences.

use serde::{Deserialize, Serialize};

/// A single recorded earthquake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Origin time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// Reported magnitude
    pub magnitude: f64,
    /// Epicentre latitude in degrees
    pub latitude: f64,
    /// Epicentre longitude in degrees
    pub longitude: f64,
    /// Free-text place label, usually "<distance> of <region>"
    pub place: String,
}

impl Event {
    /// Create a new Event.
    pub fn new(
        timestamp_ms: i64,
        magnitude: f64,
        latitude: f64,
        longitude: f64,
        place: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_ms,
            magnitude,
            latitude,
            longitude,
            place: place.into(),
        }
    }
}

/// Extract magnitudes from events.
pub fn magnitudes(events: &[Event]) -> Vec<f64> {
    events.iter().map(|e| e.magnitude).collect()
}

/// Sort events ascending by origin time.
///
/// The sort is stable, so events sharing a timestamp keep their fetch order.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(|e| e.timestamp_ms);
}

/// Check whether events are ascending by origin time.
pub fn is_chronological(events: &[Event]) -> bool {
    events
        .windows(2)
        .all(|w| w[0].timestamp_ms <= w[1].timestamp_ms)
}
