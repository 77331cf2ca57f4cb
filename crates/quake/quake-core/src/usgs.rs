//! USGS FDSN event catalog client.
//!
//! Queries `https://earthquake.usgs.gov/fdsnws/event/1/query` with
//! `format=geojson` and returns the feed as a [`FeatureCollection`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use quake_api::DEFAULT_USGS_API_URL;
use quake_spi::{
    sort_chronologically, BoundingBox, Event, EventQuery, EventSource, FeatureCollection,
    OrderBy, QuakeError, Result,
};
use tracing::{debug, info};

/// USGS catalog client
#[derive(Debug, Clone)]
pub struct UsgsClient {
    client: reqwest::Client,
    base_url: String,
}

impl UsgsClient {
    /// Client against the public USGS endpoint.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_USGS_API_URL, timeout)
    }

    /// Client against another FDSN-compatible endpoint.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quake-forecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuakeError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pull a multi-year history one calendar year per request.
    ///
    /// Requests run oldest first with `orderby=time-asc` and `pause` between
    /// them. The merged result is sorted ascending by timestamp.
    pub async fn fetch_history(
        &self,
        start_year: i32,
        end_year: i32,
        min_magnitude: f64,
        bounding_box: Option<BoundingBox>,
        pause: Duration,
    ) -> Result<Vec<Event>> {
        if start_year > end_year {
            return Err(QuakeError::InvalidParameter {
                name: "start_year".to_string(),
                reason: format!("{} is after end year {}", start_year, end_year),
            });
        }

        let mut events = Vec::new();
        for year in start_year..=end_year {
            let (start, end) = match (
                Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single(),
                Utc.with_ymd_and_hms(year, 12, 31, 23, 59, 59).single(),
            ) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(QuakeError::InvalidParameter {
                        name: "year".to_string(),
                        reason: format!("{} is out of range", year),
                    })
                }
            };

            let query = EventQuery {
                start,
                end,
                min_magnitude: Some(min_magnitude),
                bounding_box,
                order_by: Some(OrderBy::TimeAsc),
            };
            let chunk = self.fetch_events(&query).await?;
            info!(year, events = chunk.len(), "Fetched catalog year");
            events.extend(chunk);

            if year < end_year && !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        sort_chronologically(&mut events);
        Ok(events)
    }
}

#[async_trait]
impl EventSource for UsgsClient {
    fn name(&self) -> &str {
        "usgs"
    }

    async fn fetch_collection(&self, query: &EventQuery) -> Result<FeatureCollection> {
        debug!(url = %self.base_url, start = %query.start, end = %query.end, "Querying catalog");

        let response = self
            .client
            .get(&self.base_url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| QuakeError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| QuakeError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(QuakeError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        // FDSN services answer "no matching events" with 204 and no body.
        if status == reqwest::StatusCode::NO_CONTENT || text.trim().is_empty() {
            debug!(status = status.as_u16(), "Catalog returned no events");
            return Ok(FeatureCollection::new(Vec::new()));
        }

        let collection: FeatureCollection =
            serde_json::from_str(&text).map_err(|e| QuakeError::ParseError(e.to_string()))?;
        debug!(features = collection.features.len(), "Catalog responded");
        Ok(collection)
    }
}
