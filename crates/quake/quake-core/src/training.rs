//! Training-label generation over a historical catalog.
//!
//! Every event E at time T yields one sample when the trailing window
//! `[T - past, T]` holds enough events and the forward window `(T, T + future]`
//! holds at least one. Features come from the trailing window with T as the
//! reference time; the label is the largest magnitude in the forward window.

use std::ops::Bound;

use quake_api::LabelingConfig;
use quake_spi::{is_chronological, Event, FeatureVector, QuakeError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{compute_features, time_window};

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Time of the event the sample is anchored on
    pub timestamp_ms: i64,
    pub features: FeatureVector,
    /// Largest magnitude in the forward window
    pub target_max_mag: f64,
}

/// Flat CSV row of a [`TrainingSample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub timestamp_ms: i64,
    pub num_quakes: usize,
    pub avg_mag: f64,
    pub max_mag: f64,
    pub time_since_last: f64,
    pub target_max_mag: f64,
}

impl From<&TrainingSample> for TrainingRow {
    fn from(sample: &TrainingSample) -> Self {
        Self {
            timestamp_ms: sample.timestamp_ms,
            num_quakes: sample.features.num_quakes,
            avg_mag: sample.features.avg_mag,
            max_mag: sample.features.max_mag,
            time_since_last: sample.features.time_since_last,
            target_max_mag: sample.target_max_mag,
        }
    }
}

/// Counts describing a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub events_scanned: usize,
    pub samples: usize,
    /// Skipped because the trailing window was below the minimum
    pub sparse_past: usize,
    /// Skipped because nothing followed within the forward window
    pub empty_future: usize,
}

/// Samples plus their summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledSet {
    pub samples: Vec<TrainingSample>,
    pub summary: SampleSummary,
}

enum Outcome {
    Sample(TrainingSample),
    SparsePast,
    EmptyFuture,
}

/// Generate one sample per qualifying event, in input order.
///
/// `events` must be ascending by timestamp.
pub fn generate_samples(events: &[Event], config: &LabelingConfig) -> Result<LabeledSet> {
    if !is_chronological(events) {
        return Err(QuakeError::InvalidParameter {
            name: "events".to_string(),
            reason: "must be sorted ascending by timestamp".to_string(),
        });
    }

    let past_ms = config.past_window_ms();
    let future_ms = config.future_window_ms();

    let outcomes: Vec<Outcome> = events
        .par_iter()
        .map(|event| {
            label_event(
                events,
                event.timestamp_ms,
                past_ms,
                future_ms,
                config.min_past_events,
            )
        })
        .collect();

    let mut set = LabeledSet {
        samples: Vec::new(),
        summary: SampleSummary {
            events_scanned: events.len(),
            ..SampleSummary::default()
        },
    };

    for outcome in outcomes {
        match outcome {
            Outcome::Sample(sample) => set.samples.push(sample),
            Outcome::SparsePast => set.summary.sparse_past += 1,
            Outcome::EmptyFuture => set.summary.empty_future += 1,
        }
    }
    set.summary.samples = set.samples.len();

    info!(
        events = set.summary.events_scanned,
        samples = set.summary.samples,
        sparse_past = set.summary.sparse_past,
        empty_future = set.summary.empty_future,
        "Generated training samples"
    );

    Ok(set)
}

fn label_event(events: &[Event], t: i64, past_ms: i64, future_ms: i64, min_past: usize) -> Outcome {
    let past = time_window(events, t - past_ms..=t);
    let future = time_window(events, (Bound::Excluded(t), Bound::Included(t + future_ms)));

    let features = match compute_features(past, t, min_past) {
        Ok(features) => features,
        Err(_) => return Outcome::SparsePast,
    };

    if future.is_empty() {
        return Outcome::EmptyFuture;
    }
    let target = future
        .iter()
        .map(|e| e.magnitude)
        .fold(f64::NEG_INFINITY, f64::max);

    Outcome::Sample(TrainingSample {
        timestamp_ms: t,
        features,
        target_max_mag: target,
    })
}
