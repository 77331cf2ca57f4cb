//! GeoJSON wire types returned by FDSN event services.
//!
//! Only the fields the aggregator reads are typed; everything else is kept in
//! `extra` so a collection can be handed to clients unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::Event;

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

fn feature_type() -> String {
    "Feature".to_string()
}

/// A single GeoJSON `Feature` describing one earthquake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub properties: EventProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

/// Event properties. `mag`, `place` and `time` may be null upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProperties {
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
    /// Origin time in ms since the epoch
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Point geometry, coordinates are `[longitude, latitude, depth]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl FeatureCollection {
    /// Wrap features in a collection.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: feature_collection_type(),
            metadata: None,
            features,
            bbox: None,
            extra: Map::new(),
        }
    }

    /// Convert every usable feature into an [`Event`], in feed order.
    pub fn events(&self) -> Vec<Event> {
        self.features
            .iter()
            .filter_map(|feature| {
                let event = feature.to_event();
                if event.is_none() {
                    warn!(id = ?feature.id, "Skipping feature without magnitude or time");
                }
                event
            })
            .collect()
    }
}

impl Feature {
    /// Build a point feature, mainly useful for fixtures.
    pub fn point(time_ms: i64, mag: f64, latitude: f64, longitude: f64, place: &str) -> Self {
        Self {
            kind: feature_type(),
            id: None,
            properties: EventProperties {
                mag: Some(mag),
                place: Some(place.to_string()),
                time: Some(time_ms),
                extra: Map::new(),
            },
            geometry: Some(Geometry {
                kind: "Point".to_string(),
                coordinates: vec![longitude, latitude, 10.0],
            }),
        }
    }

    /// Convert into an [`Event`].
    ///
    /// Returns `None` when magnitude or time is missing. A missing place
    /// becomes an empty label and missing coordinates become `0.0`.
    pub fn to_event(&self) -> Option<Event> {
        let magnitude = self.properties.mag?;
        let timestamp_ms = self.properties.time?;
        let coords = self
            .geometry
            .as_ref()
            .map(|g| g.coordinates.as_slice())
            .unwrap_or(&[]);

        Some(Event {
            timestamp_ms,
            magnitude,
            latitude: coords.get(1).copied().unwrap_or(0.0),
            longitude: coords.first().copied().unwrap_or(0.0),
            place: self.properties.place.clone().unwrap_or_default(),
        })
    }
}
