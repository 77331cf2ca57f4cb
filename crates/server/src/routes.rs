//! API route handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use quake_facade::{
    country_forecast, regional_forecast, CountryForecast, EventQueryBuilder, FeatureCollection,
    MagnitudeModel, RegionalForecast,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Longest lookback accepted by the recent-events route.
const MAX_RECENT_DAYS: i64 = 3650;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Earthquake forecast API" }))
}

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - can forecasts be served?
pub async fn readiness(State(state): State<AppState>) -> Json<Value> {
    let model_loaded = state.model.is_some();
    Json(json!({
        "status": if model_loaded { "ready" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "source": state.source.name(),
        "model_loaded": model_loaded,
        "model": state.model.as_ref().map(|m| m.name().to_string()),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: f64,
}

fn default_days() -> i64 {
    30
}

fn default_min_magnitude() -> f64 {
    4.0
}

/// Recent events inside the regional bounding box, as the catalog returned them.
pub async fn recent_earthquakes(
    State(state): State<AppState>,
    params: Result<Query<RecentParams>, QueryRejection>,
) -> ApiResult<FeatureCollection> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if !(1..=MAX_RECENT_DAYS).contains(&params.days) {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_RECENT_DAYS
        )));
    }
    if !params.min_magnitude.is_finite() {
        return Err(ApiError::BadRequest("min_magnitude must be a number".to_string()));
    }

    let query = EventQueryBuilder::new()
        .end(Utc::now())
        .lookback_days(params.days)
        .min_magnitude(params.min_magnitude)
        .bounding_box(state.regional.bounding_box)
        .build()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let collection = state.source.fetch_collection(&query).await?;
    info!(days = params.days, features = collection.features.len(), "Served recent earthquakes");
    Ok(Json(collection))
}

/// Regional forecast over the configured bounding box.
pub async fn predict(State(state): State<AppState>) -> ApiResult<RegionalForecast> {
    let model = loaded_model(&state)?;
    let now = Utc::now();

    let events = state.source.fetch_events(&state.regional.query(now)).await?;
    let forecast = regional_forecast(&events, now.timestamp_millis(), model.as_ref(), &state.regional)?;

    info!(
        area = %forecast.predicted_area,
        magnitude = forecast.predicted_magnitude,
        "Served regional forecast"
    );
    Ok(Json(forecast))
}

#[derive(Debug, Deserialize)]
pub struct CountryParams {
    pub country: String,
}

/// Forecast for the country named in the query string.
pub async fn predict_country(
    State(state): State<AppState>,
    params: Result<Query<CountryParams>, QueryRejection>,
) -> ApiResult<CountryForecast> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let country = params.country.trim();
    if country.is_empty() {
        return Err(ApiError::BadRequest("country must not be empty".to_string()));
    }

    let model = loaded_model(&state)?;
    let now = Utc::now();

    let events = state.source.fetch_events(&state.country.query(now)).await?;
    let forecast = country_forecast(
        &events,
        country,
        now.timestamp_millis(),
        model.as_ref(),
        &state.country,
    )
    .map_err(|e| ApiError::from(e).for_country(country))?;

    info!(
        country,
        area = %forecast.predicted_area,
        risk = %forecast.risk_level,
        "Served country forecast"
    );
    Ok(Json(forecast))
}

fn loaded_model(state: &AppState) -> Result<Arc<dyn MagnitudeModel>, ApiError> {
    state.model.clone().ok_or(ApiError::ModelUnavailable)
}
