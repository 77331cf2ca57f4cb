//! Event source trait definition.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Event, EventQuery, FeatureCollection};

/// Trait for catalogs that can answer a time-bounded event query.
///
/// Implementations return the raw GeoJSON collection; typed events are
/// derived from it with [`EventSource::fetch_events`].
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Source name.
    fn name(&self) -> &str;

    /// Fetch the GeoJSON collection matching `query`.
    async fn fetch_collection(&self, query: &EventQuery) -> Result<FeatureCollection>;

    /// Fetch and convert to events, in feed order.
    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        Ok(self.fetch_collection(query).await?.events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Feature;
    use chrono::Utc;

    struct FixedSource(FeatureCollection);

    #[async_trait]
    impl EventSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_collection(&self, _query: &EventQuery) -> Result<FeatureCollection> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_events_default_converts_features() {
        let mut missing_mag = Feature::point(2, 4.0, 0.0, 0.0, "b");
        missing_mag.properties.mag = None;
        let source = FixedSource(FeatureCollection::new(vec![
            Feature::point(1, 4.5, 1.0, 2.0, "a"),
            missing_mag,
        ]));

        let now = Utc::now();
        let events = source.fetch_events(&EventQuery::new(now, now)).await.unwrap();

        assert_eq!(source.name(), "fixed");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].place, "a");
    }
}
