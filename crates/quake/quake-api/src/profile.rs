//! Forecast and labeling profiles.
//!
//! Each profile fixes the catalog query and the aggregation thresholds used by
//! one forecast flavour, so the server and the offline tools agree on them.

use chrono::{DateTime, Duration, Utc};
use quake_spi::{BoundingBox, EventQuery};
use serde::{Deserialize, Serialize};

/// Regional forecast over a bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalProfile {
    /// Days of history to fetch
    pub lookback_days: i64,
    /// Catalog magnitude floor
    pub min_magnitude: f64,
    /// Area to query
    pub bounding_box: BoundingBox,
    /// Minimum events required to compute features
    pub min_events: usize,
    /// Number of most recent events ranked by region
    pub region_window: usize,
    /// Area reported when no region can be ranked
    pub fallback_area: String,
}

impl Default for RegionalProfile {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            min_magnitude: 4.0,
            bounding_box: BoundingBox::ASIA,
            min_events: 10,
            region_window: 20,
            fallback_area: "Asia".to_string(),
        }
    }
}

impl RegionalProfile {
    /// Catalog query ending at `now`.
    pub fn query(&self, now: DateTime<Utc>) -> EventQuery {
        EventQuery {
            start: now - Duration::days(self.lookback_days),
            end: now,
            min_magnitude: Some(self.min_magnitude),
            bounding_box: Some(self.bounding_box),
            order_by: None,
        }
    }
}

/// Country forecast over the global catalog filtered by place label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    /// Days of history to fetch
    pub lookback_days: i64,
    /// Catalog magnitude floor
    pub min_magnitude: f64,
    /// Minimum matching events required to compute features
    pub min_events: usize,
}

impl Default for CountryProfile {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            min_magnitude: 2.5,
            min_events: 3,
        }
    }
}

impl CountryProfile {
    /// Global catalog query ending at `now`.
    pub fn query(&self, now: DateTime<Utc>) -> EventQuery {
        EventQuery {
            start: now - Duration::days(self.lookback_days),
            end: now,
            min_magnitude: Some(self.min_magnitude),
            bounding_box: None,
            order_by: None,
        }
    }
}

/// Window lengths for historical training-label generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Length of the trailing feature window in days
    pub past_window_days: i64,
    /// Length of the forward label window in days
    pub future_window_days: i64,
    /// Minimum past events for a sample to be emitted
    pub min_past_events: usize,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            past_window_days: 30,
            future_window_days: 7,
            min_past_events: 10,
        }
    }
}

impl LabelingConfig {
    /// Past window length in milliseconds.
    pub fn past_window_ms(&self) -> i64 {
        Duration::days(self.past_window_days).num_milliseconds()
    }

    /// Future window length in milliseconds.
    pub fn future_window_ms(&self) -> i64 {
        Duration::days(self.future_window_days).num_milliseconds()
    }
}
