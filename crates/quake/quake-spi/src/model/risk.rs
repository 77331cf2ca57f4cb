//! Coarse risk banding of a predicted magnitude.

use serde::{Deserialize, Serialize};

/// Risk band shown next to a country forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    /// Band a predicted magnitude: above 6.0 is high, above 5.0 moderate.
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude > 6.0 {
            RiskLevel::High
        } else if magnitude > 5.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Display color used by the map frontend.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::High => "red",
            RiskLevel::Moderate => "orange",
            RiskLevel::Low => "yellow",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::High => "High risk",
            RiskLevel::Moderate => "Moderate risk",
            RiskLevel::Low => "Low risk",
        };
        write!(f, "{}", s)
    }
}
