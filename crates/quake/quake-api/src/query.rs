//! Builder for catalog queries.

use chrono::{DateTime, Duration, Utc};
use quake_spi::{BoundingBox, EventQuery, OrderBy};

/// Builder for [`EventQuery`].
#[derive(Debug, Default)]
pub struct EventQueryBuilder {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    lookback_days: Option<i64>,
    min_magnitude: Option<f64>,
    bounding_box: Option<BoundingBox>,
    order_by: Option<OrderBy>,
}

impl EventQueryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start time.
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time.
    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Start `days` before the end time. Ignored when a start is set.
    pub fn lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = Some(days);
        self
    }

    /// Set the magnitude floor.
    pub fn min_magnitude(mut self, min_magnitude: f64) -> Self {
        self.min_magnitude = Some(min_magnitude);
        self
    }

    /// Restrict to a bounding box.
    pub fn bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    /// Set result ordering.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Build the query.
    pub fn build(self) -> Result<EventQuery, &'static str> {
        let end = self.end.ok_or("end is required")?;
        let start = match (self.start, self.lookback_days) {
            (Some(start), _) => start,
            (None, Some(days)) if days > 0 => end - Duration::days(days),
            (None, Some(_)) => return Err("lookback_days must be positive"),
            (None, None) => return Err("start or lookback_days is required"),
        };

        if start > end {
            return Err("start must not be after end");
        }

        Ok(EventQuery {
            start,
            end,
            min_magnitude: self.min_magnitude,
            bounding_box: self.bounding_box,
            order_by: self.order_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_builder_with_lookback() {
        let query = EventQueryBuilder::new()
            .end(end())
            .lookback_days(30)
            .min_magnitude(4.0)
            .bounding_box(BoundingBox::ASIA)
            .build()
            .unwrap();

        assert_eq!(query.start, Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap());
        assert_eq!(query.min_magnitude, Some(4.0));
        assert_eq!(query.bounding_box, Some(BoundingBox::ASIA));
        assert_eq!(query.order_by, None);
    }

    #[test]
    fn test_builder_explicit_start_wins() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = EventQueryBuilder::new()
            .start(start)
            .end(end())
            .lookback_days(3)
            .order_by(OrderBy::TimeAsc)
            .build()
            .unwrap();

        assert_eq!(query.start, start);
        assert_eq!(query.order_by, Some(OrderBy::TimeAsc));
    }

    #[test]
    fn test_builder_missing_end() {
        assert!(EventQueryBuilder::new().lookback_days(1).build().is_err());
    }

    #[test]
    fn test_builder_missing_start() {
        assert!(EventQueryBuilder::new().end(end()).build().is_err());
    }

    #[test]
    fn test_builder_rejects_non_positive_lookback() {
        assert!(EventQueryBuilder::new().end(end()).lookback_days(0).build().is_err());
        assert!(EventQueryBuilder::new().end(end()).lookback_days(-2).build().is_err());
    }

    #[test]
    fn test_builder_rejects_inverted_range() {
        let result = EventQueryBuilder::new()
            .start(end())
            .end(end() - Duration::days(1))
            .build();
        assert!(result.is_err());
    }
}
