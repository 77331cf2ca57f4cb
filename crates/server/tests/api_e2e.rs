//! End-to-end tests for the HTTP API
//!
//! Drives the router in-process against a stub catalog.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use quake_facade::{
    BoundingBox, EventQuery, EventSource, Feature, FeatureCollection, MagnitudeModel, QuakeError,
    Result, TreeEnsemble,
};
use quake_server::{app, cors_layer, AppState};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

const HOUR_MS: i64 = 3_600_000;

/// Predicts 5.5 below max_mag 6.0 and 6.5 above.
const MODEL: &str = r#"{
    "name": "stub-gbr",
    "feature_names": ["num_quakes", "avg_mag", "max_mag", "time_since_last"],
    "base_score": 6.0,
    "learning_rate": 1.0,
    "trees": [{"nodes": [
        {"feature": 2, "threshold": 6.0, "left": 1, "right": 2},
        {"value": -0.5},
        {"value": 0.5}
    ]}]
}"#;

struct StubSource {
    result: std::result::Result<FeatureCollection, QuakeError>,
    queries: Mutex<Vec<EventQuery>>,
}

impl StubSource {
    fn with(features: Vec<Feature>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(FeatureCollection::new(features)),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn failing(err: QuakeError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn last_query(&self) -> EventQuery {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl EventSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_collection(&self, query: &EventQuery) -> Result<FeatureCollection> {
        self.queries.lock().unwrap().push(query.clone());
        self.result.clone()
    }
}

/// `n` events one hour apart ending an hour ago.
fn features(n: usize, mag: f64, place: &str) -> Vec<Feature> {
    let now = Utc::now().timestamp_millis();
    (0..n)
        .map(|i| {
            let ts = now - (n - i) as i64 * HOUR_MS;
            Feature::point(ts, mag, 36.0, 140.0, place)
        })
        .collect()
}

fn model() -> Option<Arc<dyn MagnitudeModel>> {
    Some(Arc::new(TreeEnsemble::from_json(MODEL).unwrap()))
}

fn router(source: Arc<StubSource>, model: Option<Arc<dyn MagnitudeModel>>) -> Router {
    app(AppState::new(source, model))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn e2e_root_and_health() {
    let source = StubSource::with(Vec::new());

    let (status, body) = get(router(source.clone(), None), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    for uri in ["/health", "/health/live"] {
        let (status, body) = get(router(source.clone(), None), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "alive");
    }
}

#[tokio::test]
async fn e2e_readiness_reports_model() {
    let source = StubSource::with(Vec::new());

    let (_, body) = get(router(source.clone(), None), "/health/ready").await;
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["status"], "degraded");

    let (_, body) = get(router(source, model()), "/health/ready").await;
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model"], "stub-gbr");
    assert_eq!(body["source"], "stub");
}

#[tokio::test]
async fn e2e_predict_without_model_is_unavailable() {
    let source = StubSource::with(features(20, 4.5, "A"));
    let (status, body) = get(router(source.clone(), None), "/api/predict").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
    assert!(source.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn e2e_predict_regional() {
    let mut events = features(15, 4.5, "10 km N of Honshu, Japan");
    events.extend(features(5, 6.2, "Luzon, Philippines"));
    let source = StubSource::with(events);

    let (status, body) = get(router(source.clone(), model()), "/api/predict").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_points_used"], 20);
    assert_eq!(body["predicted_area"], "Honshu, Japan");
    assert_eq!(body["predicted_magnitude"], 6.5);
    assert!(body["prediction"].as_str().unwrap().ends_with("6.5"));
    assert!(body["area_activity"].is_string());
    assert!(body["disclaimer"].is_string());

    let query = source.last_query();
    assert_eq!(query.bounding_box, Some(BoundingBox::ASIA));
    assert_eq!(query.min_magnitude, Some(4.0));
}

#[tokio::test]
async fn e2e_predict_regional_insufficient_data() {
    let source = StubSource::with(features(9, 4.5, "A"));
    let (status, body) = get(router(source, model()), "/api/predict").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["quakes_found"], 9);
    assert_eq!(body["required"], 10);
    assert!(body.get("country").is_none());
}

#[tokio::test]
async fn e2e_predict_upstream_failure() {
    let source = StubSource::failing(QuakeError::Upstream {
        status: 503,
        body: "maintenance".to_string(),
    });
    let (status, body) = get(router(source, model()), "/api/predict").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("503"));
    assert!(!message.contains("maintenance"));
}

#[tokio::test]
async fn e2e_predict_country() {
    let mut events = features(4, 5.8, "30 km W of Pokhara, Nepal");
    events.extend(features(2, 4.0, "Kathmandu, Nepal"));
    events.extend(features(3, 7.0, "Tibet, China"));
    let source = StubSource::with(events);

    let (status, body) = get(router(source.clone(), model()), "/api/predict/country?country=nepal").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country"], "nepal");
    assert_eq!(body["data_points_used"], 6);
    assert_eq!(body["predicted_area"], "Pokhara, Nepal");
    assert_eq!(body["center_lat"], 36.0);
    assert_eq!(body["max_magnitude"], 5.8);
    assert_eq!(body["avg_magnitude"], 5.2);
    assert_eq!(body["predicted_magnitude"], 5.5);
    assert_eq!(body["risk_level"], "Moderate risk");
    assert_eq!(body["risk_color"], "orange");

    let query = source.last_query();
    assert!(query.bounding_box.is_none());
    assert_eq!(query.min_magnitude, Some(2.5));
}

#[tokio::test]
async fn e2e_predict_country_insufficient_data_names_country() {
    let source = StubSource::with(features(2, 4.0, "Reykjanes Ridge, Iceland"));
    let (status, body) = get(router(source, model()), "/api/predict/country?country=Iceland").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["country"], "Iceland");
    assert_eq!(body["quakes_found"], 2);
    assert!(body["error"].as_str().unwrap().contains("Iceland"));
}

#[tokio::test]
async fn e2e_predict_country_requires_name() {
    let source = StubSource::with(Vec::new());

    let (status, _) = get(router(source.clone(), model()), "/api/predict/country").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(router(source, model()), "/api/predict/country?country=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn e2e_recent_earthquakes_pass_through() {
    let source = StubSource::with(features(3, 4.7, "Sumatra, Indonesia"));
    let (status, body) = get(
        router(source.clone(), None),
        "/api/earthquakes/recent?days=7&min_magnitude=5.0",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 3);
    assert_eq!(body["features"][0]["properties"]["place"], "Sumatra, Indonesia");

    let query = source.last_query();
    assert_eq!((query.end - query.start).num_days(), 7);
    assert_eq!(query.min_magnitude, Some(5.0));
    assert_eq!(query.bounding_box, Some(BoundingBox::ASIA));
}

#[tokio::test]
async fn e2e_recent_earthquakes_rejects_bad_params() {
    let source = StubSource::with(Vec::new());

    let (status, body) = get(router(source.clone(), None), "/api/earthquakes/recent?days=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = get(router(source.clone(), None), "/api/earthquakes/recent?days=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(source.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn e2e_cors_allows_configured_origin() {
    let source = StubSource::with(Vec::new());
    let router = router(source, None).layer(cors_layer("http://localhost:3000").unwrap());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}
