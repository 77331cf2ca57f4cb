//! Forecast assembly for the regional and country endpoints.
//!
//! Both flavours sort the fetched events, aggregate them with
//! [`compute_features`], score the vector and attach a region summary.

use quake_api::{CountryProfile, RegionalProfile};
use quake_spi::{sort_chronologically, Event, MagnitudeModel, QuakeError, Result, RiskLevel};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{compute_features, most_recent};
use crate::region::{matches_country, RegionTally};

/// Days ahead the model's label covers.
pub const FORECAST_HORIZON_DAYS: i64 = 7;

const REGIONAL_DISCLAIMER: &str = "This is a simplified forecast built for educational purposes only.";
const COUNTRY_DISCLAIMER: &str = "For educational purposes only. This is not a real forecast.";

/// Response of the regional forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalForecast {
    pub prediction: String,
    pub predicted_magnitude: f64,
    pub predicted_area: String,
    pub area_activity: String,
    pub disclaimer: String,
    pub data_points_used: usize,
}

/// Response of the country forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryForecast {
    pub country: String,
    pub prediction: String,
    pub predicted_magnitude: f64,
    pub predicted_area: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub risk_level: String,
    pub risk_color: String,
    pub recent_activity: String,
    pub avg_magnitude: f64,
    pub max_magnitude: f64,
    pub disclaimer: String,
    pub data_points_used: usize,
}

/// Forecast for the profile's bounding box.
///
/// The area is the most frequent region among the last
/// `profile.region_window` events, or `profile.fallback_area` when none
/// can be ranked.
pub fn regional_forecast(
    events: &[Event],
    now_ms: i64,
    model: &dyn MagnitudeModel,
    profile: &RegionalProfile,
) -> Result<RegionalForecast> {
    let mut events = events.to_vec();
    sort_chronologically(&mut events);

    let features = compute_features(&events, now_ms, profile.min_events)?;
    let predicted = model.predict(&features)?;

    let tally = RegionTally::from_events(most_recent(&events, Some(profile.region_window)));
    let (area, area_count) = match tally.most_active() {
        Some(region) => (region.name.clone(), region.count),
        None => (profile.fallback_area.clone(), 0),
    };

    debug!(
        model = model.name(),
        events = features.num_quakes,
        predicted,
        area = %area,
        "Regional forecast"
    );

    Ok(RegionalForecast {
        prediction: format!(
            "Maximum likely magnitude in the next {} days: {:.1}",
            FORECAST_HORIZON_DAYS, predicted
        ),
        predicted_magnitude: predicted,
        predicted_area: area,
        area_activity: format!("{} recent earthquakes occurred in this area", area_count),
        disclaimer: REGIONAL_DISCLAIMER.to_string(),
        data_points_used: features.num_quakes,
    })
}

/// Forecast for one country, matched against place labels.
///
/// Fewer than `profile.min_events` matches is [`QuakeError::InsufficientData`];
/// callers attach the country name when reporting it.
pub fn country_forecast(
    events: &[Event],
    country: &str,
    now_ms: i64,
    model: &dyn MagnitudeModel,
    profile: &CountryProfile,
) -> Result<CountryForecast> {
    let mut matches: Vec<Event> = events
        .iter()
        .filter(|e| matches_country(&e.place, country))
        .cloned()
        .collect();
    sort_chronologically(&mut matches);

    let features = compute_features(&matches, now_ms, profile.min_events)?;
    let predicted = model.predict(&features)?;

    let tally = RegionTally::from_events(&matches);
    let Some(region) = tally.most_active() else {
        return Err(QuakeError::InsufficientData {
            required: profile.min_events.max(1),
            actual: 0,
        });
    };
    let (center_lat, center_lon) = region.centroid();
    let risk = RiskLevel::from_magnitude(predicted);

    debug!(
        country,
        events = features.num_quakes,
        predicted,
        region = %region.name,
        "Country forecast"
    );

    Ok(CountryForecast {
        country: country.to_string(),
        prediction: format!(
            "Maximum likely magnitude in the next {} days: {:.1}",
            FORECAST_HORIZON_DAYS, predicted
        ),
        predicted_magnitude: predicted,
        predicted_area: region.name.clone(),
        center_lat,
        center_lon,
        risk_level: risk.to_string(),
        risk_color: risk.color().to_string(),
        recent_activity: format!(
            "{} earthquakes recorded in the last {} days",
            features.num_quakes, profile.lookback_days
        ),
        avg_magnitude: round1(features.avg_mag),
        max_magnitude: round1(features.max_mag),
        disclaimer: COUNTRY_DISCLAIMER.to_string(),
        data_points_used: features.num_quakes,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
