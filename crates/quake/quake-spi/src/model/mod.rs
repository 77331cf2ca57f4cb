//! Data models for seismic events and derived features.

mod event;
mod features;
mod geojson;
mod query;
mod risk;

pub use event::{is_chronological, magnitudes, sort_chronologically, Event};
pub use features::{FeatureVector, FEATURE_NAMES};
pub use geojson::{EventProperties, Feature, FeatureCollection, Geometry};
pub use query::{BoundingBox, EventQuery, OrderBy};
pub use risk::RiskLevel;
