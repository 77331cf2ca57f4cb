//! Magnitude model trait definition.

use crate::error::Result;
use crate::model::FeatureVector;

/// A pre-trained regressor mapping a feature vector to the largest
/// magnitude expected over the forecast horizon.
///
/// Models are loaded once and shared read-only, hence `Send + Sync`.
pub trait MagnitudeModel: Send + Sync {
    /// Model name for logs and health reports.
    fn name(&self) -> &str;

    /// Input columns in the order the model was trained on.
    fn feature_names(&self) -> &[String];

    /// Predict the maximum magnitude.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}
