//! Region heuristics over free-text place labels.
//!
//! Catalog place labels look like `"45 km SSW of Hualien City, Taiwan"`.
//! [`extract_region`] is the only place that interprets them; everything else
//! works on the region names it returns.

use std::collections::HashMap;

use quake_spi::Event;

use crate::aggregate::most_recent;

/// Region named by a place label.
///
/// Text after the last `" of "` when present, otherwise the whole label,
/// trimmed either way. The parse is lossy: labels such as
/// `"Gulf of Aden"` come back as `"Aden"`.
pub fn extract_region(place: &str) -> &str {
    match place.rfind(" of ") {
        Some(idx) => place[idx + 4..].trim(),
        None => place.trim(),
    }
}

/// Case-insensitive substring match of a country name against a place label.
pub fn matches_country(place: &str, country: &str) -> bool {
    place.to_lowercase().contains(&country.to_lowercase())
}

/// Accumulated events of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStats {
    pub name: String,
    pub count: usize,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
}

impl RegionStats {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            count: 0,
            latitudes: Vec::new(),
            longitudes: Vec::new(),
        }
    }

    fn push(&mut self, event: &Event) {
        self.count += 1;
        self.latitudes.push(event.latitude);
        self.longitudes.push(event.longitude);
    }

    /// Mean `(latitude, longitude)`.
    pub fn centroid(&self) -> (f64, f64) {
        (mean(&self.latitudes), mean(&self.longitudes))
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Per-region tally that remembers first-seen order.
///
/// Ranking ties are broken by that order, so the result does not depend on
/// hashing.
#[derive(Debug, Clone, Default)]
pub struct RegionTally {
    regions: Vec<RegionStats>,
    index: HashMap<String, usize>,
}

impl RegionTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally events by [`extract_region`] of their place.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut tally = Self::new();
        for event in events {
            tally.add(event);
        }
        tally
    }

    /// Add one event.
    pub fn add(&mut self, event: &Event) {
        let name = extract_region(&event.place);
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.regions.push(RegionStats::new(name));
                self.index.insert(name.to_string(), self.regions.len() - 1);
                self.regions.len() - 1
            }
        };
        self.regions[idx].push(event);
    }

    /// Region with the most events; the first seen wins a tie.
    pub fn most_active(&self) -> Option<&RegionStats> {
        self.regions.iter().fold(None, |best: Option<&RegionStats>, r| match best {
            Some(b) if b.count >= r.count => Some(b),
            _ => Some(r),
        })
    }

    /// Stats of a region by name.
    pub fn get(&self, name: &str) -> Option<&RegionStats> {
        self.index.get(name).map(|&idx| &self.regions[idx])
    }

    /// Count for a region, zero when unseen.
    pub fn count(&self, name: &str) -> usize {
        self.get(name).map_or(0, |r| r.count)
    }

    /// Regions in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &RegionStats> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Most frequent region among `events`, optionally only the last `window`.
///
/// `events` should be ascending by timestamp when a window is given. Returns
/// `None` for an empty selection.
pub fn most_active_region(events: &[Event], window: Option<usize>) -> Option<String> {
    RegionTally::from_events(most_recent(events, window))
        .most_active()
        .map(|r| r.name.clone())
}

/// Mean position of the events placed in `region`, `None` if there are none.
pub fn region_centroid(events: &[Event], region: &str) -> Option<(f64, f64)> {
    let (n, lat, lon) = events
        .iter()
        .filter(|e| extract_region(&e.place) == region)
        .fold((0usize, 0.0, 0.0), |(n, lat, lon), e| {
            (n + 1, lat + e.latitude, lon + e.longitude)
        });

    (n > 0).then(|| (lat / n as f64, lon / n as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(ts: i64, place: &str, lat: f64, lon: f64) -> Event {
        Event::new(ts, 4.5, lat, lon, place)
    }

    #[test]
    fn test_extract_region_with_distance_prefix() {
        assert_eq!(extract_region("50km SE of Tokyo, Japan"), "Tokyo, Japan");
    }

    #[test]
    fn test_extract_region_without_of() {
        assert_eq!(extract_region("Tokyo, Japan"), "Tokyo, Japan");
        assert_eq!(extract_region("  Kuril Islands  "), "Kuril Islands");
    }

    #[test]
    fn test_extract_region_uses_last_of() {
        assert_eq!(extract_region("10 km N of Gulf of Aden"), "Aden");
    }

    #[test]
    fn test_extract_region_edge_labels() {
        assert_eq!(extract_region(""), "");
        assert_eq!(extract_region("south of"), "south of");
        assert_eq!(extract_region("Bay of "), "");
    }

    #[test]
    fn test_matches_country_case_insensitive() {
        assert!(matches_country("45 km SSW of Hualien City, Taiwan", "taiwan"));
        assert!(matches_country("Honshu, JAPAN", "Japan"));
        assert!(!matches_country("Luzon, Philippines", "Japan"));
    }

    #[test]
    fn test_most_active_region_majority() {
        let events = vec![
            event(1, "5 km N of A", 0.0, 0.0),
            event(2, "7 km S of A", 0.0, 0.0),
            event(3, "B", 0.0, 0.0),
        ];
        assert_eq!(most_active_region(&events, None), Some("A".to_string()));
    }

    #[test]
    fn test_most_active_region_tie_goes_to_first_seen() {
        let events = vec![
            event(1, "B", 0.0, 0.0),
            event(2, "A", 0.0, 0.0),
            event(3, "A", 0.0, 0.0),
            event(4, "B", 0.0, 0.0),
        ];
        assert_eq!(most_active_region(&events, None), Some("B".to_string()));

        let reversed: Vec<Event> = events.into_iter().rev().collect();
        assert_eq!(most_active_region(&reversed, None), Some("B".to_string()));

        let a_first = vec![
            event(1, "A", 0.0, 0.0),
            event(2, "B", 0.0, 0.0),
            event(3, "B", 0.0, 0.0),
            event(4, "A", 0.0, 0.0),
        ];
        assert_eq!(most_active_region(&a_first, None), Some("A".to_string()));
    }

    #[test]
    fn test_most_active_region_window_uses_latest_events() {
        let events = vec![
            event(1, "A", 0.0, 0.0),
            event(2, "A", 0.0, 0.0),
            event(3, "A", 0.0, 0.0),
            event(4, "B", 0.0, 0.0),
            event(5, "B", 0.0, 0.0),
        ];
        assert_eq!(most_active_region(&events, None), Some("A".to_string()));
        assert_eq!(most_active_region(&events, Some(2)), Some("B".to_string()));
    }

    #[test]
    fn test_most_active_region_empty() {
        assert_eq!(most_active_region(&[], None), None);
        assert_eq!(most_active_region(&[event(1, "A", 0.0, 0.0)], Some(0)), None);
    }

    #[test]
    fn test_region_centroid() {
        let events = vec![
            event(1, "10 km E of Sendai, Japan", 38.0, 141.0),
            event(2, "Sendai, Japan", 40.0, 143.0),
            event(3, "Luzon, Philippines", 15.0, 121.0),
        ];
        let (lat, lon) = region_centroid(&events, "Sendai, Japan").unwrap();
        assert!((lat - 39.0).abs() < 1e-12);
        assert!((lon - 142.0).abs() < 1e-12);
        assert_eq!(region_centroid(&events, "Hokkaido, Japan"), None);
    }

    #[test]
    fn test_tally_stats() {
        let events = vec![
            Event::new(1, 4.0, 10.0, 100.0, "1 km N of X"),
            Event::new(2, 6.0, 20.0, 110.0, "X"),
            Event::new(3, 5.0, 0.0, 0.0, "Y"),
        ];
        let tally = RegionTally::from_events(&events);

        assert_eq!(tally.len(), 2);
        assert_eq!(tally.count("X"), 2);
        assert_eq!(tally.count("Z"), 0);

        let x = tally.get("X").unwrap();
        assert_eq!(x.centroid(), (15.0, 105.0));
        assert_eq!(x.latitudes, vec![10.0, 20.0]);

        let names: Vec<&str> = tally.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y"]);
    }

    #[test]
    fn test_empty_tally() {
        let tally = RegionTally::new();
        assert!(tally.is_empty());
        assert!(tally.most_active().is_none());
    }
}
