//! Quake Forecast API
//!
//! Configuration types, forecast profiles and query builders.

pub mod config;
pub mod profile;
pub mod query;

pub use config::{ServiceConfig, DEFAULT_MODEL_PATH, DEFAULT_USGS_API_URL};
pub use profile::{CountryProfile, LabelingConfig, RegionalProfile};
pub use query::EventQueryBuilder;
