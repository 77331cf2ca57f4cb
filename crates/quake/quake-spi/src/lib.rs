//! Seismic Data Service Provider Interface
//!
//! Defines the event and feature types, the error type, and the contracts for
//! the two external collaborators: the event catalog and the magnitude model.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{EventSource, MagnitudeModel};
pub use error::{QuakeError, Result};
pub use model::{
    is_chronological, magnitudes, sort_chronologically, BoundingBox, Event, EventProperties,
    EventQuery, Feature, FeatureCollection, FeatureVector, Geometry, OrderBy, RiskLevel,
    FEATURE_NAMES,
};
