//! Quake Forecast Facade
//!
//! Unified re-exports for the quake forecast crates:
//! - `quake_spi` - event and feature types, errors, collaborator traits
//! - `quake_api` - service configuration, forecast profiles, query builder
//! - `quake_core` - aggregation, labeling, forecasts, USGS client, model
//!
//! # Example
//!
//! ```rust,ignore
//! use quake_facade::{compute_features, Event};
//!
//! let events = vec![Event::new(0, 4.5, 35.0, 139.0, "Honshu, Japan")];
//! let features = compute_features(&events, 3_600_000, 1)?;
//! assert_eq!(features.time_since_last, 1.0);
//! ```

pub use quake_spi::*;

pub use quake_api::*;

pub use quake_core::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_reexports() {
        let events = vec![Event::new(0, 4.5, 35.0, 139.0, "Honshu, Japan")];
        let features = compute_features(&events, 3_600_000, 1).unwrap();
        assert_eq!(features.time_since_last, 1.0);
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_feature_exposes_client() {
        let client = UsgsClient::new(std::time::Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), DEFAULT_USGS_API_URL);
    }
}
