//! Catalog query parameters.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Geographic rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Box covering Asia and the western Pacific rim.
    pub const ASIA: BoundingBox = BoundingBox {
        min_lat: -11.0,
        max_lat: 81.0,
        min_lon: 26.0,
        max_lon: 180.0,
    };
}

/// Result ordering supported by FDSN event services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBy {
    /// Newest first
    Time,
    /// Oldest first
    TimeAsc,
    /// Largest first
    Magnitude,
}

impl OrderBy {
    /// Value of the `orderby` query parameter.
    pub fn as_fdsn_str(&self) -> &'static str {
        match self {
            OrderBy::Time => "time",
            OrderBy::TimeAsc => "time-asc",
            OrderBy::Magnitude => "magnitude",
        }
    }
}

/// A time-bounded catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub min_magnitude: Option<f64>,
    pub bounding_box: Option<BoundingBox>,
    pub order_by: Option<OrderBy>,
}

impl EventQuery {
    /// Query for every event between `start` and `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            min_magnitude: None,
            bounding_box: None,
            order_by: None,
        }
    }

    /// FDSN query parameters, `format=geojson` first.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("format", "geojson".to_string()),
            ("starttime", self.start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("endtime", self.end.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];

        if let Some(bbox) = self.bounding_box {
            pairs.push(("minlatitude", bbox.min_lat.to_string()));
            pairs.push(("maxlatitude", bbox.max_lat.to_string()));
            pairs.push(("minlongitude", bbox.min_lon.to_string()));
            pairs.push(("maxlongitude", bbox.max_lon.to_string()));
        }

        if let Some(min_mag) = self.min_magnitude {
            pairs.push(("minmagnitude", min_mag.to_string()));
        }

        if let Some(order) = self.order_by {
            pairs.push(("orderby", order.as_fdsn_str().to_string()));
        }

        pairs
    }
}
