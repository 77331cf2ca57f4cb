//! Quake Forecast Core
//!
//! Feature aggregation, region ranking, training-label generation, forecast
//! assembly, and the USGS catalog and tree-ensemble model implementations.

pub mod aggregate;
pub mod ensemble;
pub mod forecast;
pub mod region;
pub mod training;

#[cfg(feature = "fetch")]
pub mod usgs;

pub use aggregate::{compute_features, hours_between, most_recent, time_window, MS_PER_DAY, MS_PER_HOUR};
pub use ensemble::{RegressionTree, TreeEnsemble, TreeNode};
pub use forecast::{country_forecast, regional_forecast, CountryForecast, RegionalForecast, FORECAST_HORIZON_DAYS};
pub use region::{extract_region, matches_country, most_active_region, region_centroid, RegionStats, RegionTally};
pub use training::{generate_samples, LabeledSet, SampleSummary, TrainingRow, TrainingSample};

#[cfg(feature = "fetch")]
pub use usgs::UsgsClient;
