//! # quake-server
//!
//! JSON HTTP API serving recent catalog events and magnitude forecasts.
//! [`app`] builds the router so it can be driven in-process by tests.

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use quake_facade::{CountryProfile, EventSource, MagnitudeModel, RegionalProfile};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod routes;

pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn EventSource>,
    /// `None` when no model could be loaded at startup
    pub model: Option<Arc<dyn MagnitudeModel>>,
    pub regional: RegionalProfile,
    pub country: CountryProfile,
}

impl AppState {
    /// State with the default forecast profiles.
    pub fn new(source: Arc<dyn EventSource>, model: Option<Arc<dyn MagnitudeModel>>) -> Self {
        Self {
            source,
            model,
            regional: RegionalProfile::default(),
            country: CountryProfile::default(),
        }
    }
}

/// Router with every route and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .route("/health", get(routes::liveness))
        // API endpoints
        .route("/api/earthquakes/recent", get(routes::recent_earthquakes))
        .route("/api/predict", get(routes::predict))
        .route("/api/predict/country", get(routes::predict_country))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for a single allowed origin, any method and header.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods(Any)
        .allow_headers(Any))
}
