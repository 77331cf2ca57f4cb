//! Feature vector fed to the magnitude model.

use serde::{Deserialize, Serialize};

/// Canonical column order of a [`FeatureVector`].
///
/// Model artifacts name their inputs with these identifiers.
pub const FEATURE_NAMES: [&str; 4] = ["num_quakes", "avg_mag", "max_mag", "time_since_last"];

/// Summary statistics over a window of events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Number of events in the window
    pub num_quakes: usize,
    /// Arithmetic mean magnitude
    pub avg_mag: f64,
    /// Largest magnitude
    pub max_mag: f64,
    /// Hours between the last event and the reference time, never negative
    pub time_since_last: f64,
}

impl FeatureVector {
    /// Look up a column by its canonical name.
    pub fn value(&self, name: &str) -> Option<f64> {
        match name {
            "num_quakes" => Some(self.num_quakes as f64),
            "avg_mag" => Some(self.avg_mag),
            "max_mag" => Some(self.max_mag),
            "time_since_last" => Some(self.time_since_last),
            _ => None,
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.num_quakes as f64,
            self.avg_mag,
            self.max_mag,
            self.time_since_last,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureVector {
        FeatureVector {
            num_quakes: 12,
            avg_mag: 4.4,
            max_mag: 6.1,
            time_since_last: 3.5,
        }
    }

    #[test]
    fn test_value_by_name() {
        let fv = sample();
        assert_eq!(fv.value("num_quakes"), Some(12.0));
        assert_eq!(fv.value("avg_mag"), Some(4.4));
        assert_eq!(fv.value("max_mag"), Some(6.1));
        assert_eq!(fv.value("time_since_last"), Some(3.5));
        assert_eq!(fv.value("depth"), None);
    }

    #[test]
    fn test_to_array_follows_feature_names() {
        let fv = sample();
        let values = fv.to_array();
        for (name, value) in FEATURE_NAMES.iter().zip(values.iter()) {
            assert_eq!(fv.value(name), Some(*value));
        }
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_value(sample()).unwrap();
        for name in FEATURE_NAMES {
            assert!(json.get(name).is_some(), "missing {}", name);
        }
    }
}
