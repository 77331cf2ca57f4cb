//! Gradient-boosted tree ensemble loaded from a JSON artifact.
//!
//! Only inference lives here. The artifact is exported by the offline
//! training job and has the shape
//!
//! ```json
//! {
//!   "name": "asia-gbr",
//!   "feature_names": ["num_quakes", "avg_mag", "max_mag", "time_since_last"],
//!   "base_score": 4.6,
//!   "learning_rate": 0.05,
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 2, "threshold": 5.5, "left": 1, "right": 2 },
//!         { "value": -0.2 },
//!         { "value": 0.4 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A split sends a row left when `x <= threshold`. Node 0 is the root.

use std::path::Path;

use quake_spi::{FeatureVector, MagnitudeModel, QuakeError, Result, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A regression tree stored as a flat node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Children must point forward, which rules out cycles.
    fn validate(&self, tree_idx: usize, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(QuakeError::Model(format!("tree {} has no nodes", tree_idx)));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(QuakeError::Model(format!(
                        "tree {} node {} uses feature {} of {}",
                        tree_idx, idx, feature, n_features
                    )));
                }
                for &child in [left, right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(QuakeError::Model(format!(
                            "tree {} node {} has invalid child {}",
                            tree_idx, idx, child
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Additive ensemble: `base_score + learning_rate * sum(tree outputs)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default = "default_name")]
    name: String,
    feature_names: Vec<String>,
    base_score: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
}

fn default_name() -> String {
    "tree-ensemble".to_string()
}

impl TreeEnsemble {
    /// Parse and validate an artifact.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: TreeEnsemble =
            serde_json::from_str(json).map_err(|e| QuakeError::ParseError(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate an artifact from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let load_err = |reason: String| QuakeError::ModelLoad {
            path: path.display().to_string(),
            reason,
        };

        let json = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let model = Self::from_json(&json).map_err(|e| load_err(e.to_string()))?;

        info!(
            path = %path.display(),
            name = %model.name,
            trees = model.trees.len(),
            "Loaded magnitude model"
        );
        Ok(model)
    }

    /// Number of trees.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(QuakeError::Model("model declares no features".to_string()));
        }

        if let Some(unknown) = self
            .feature_names
            .iter()
            .find(|n| !FEATURE_NAMES.contains(&n.as_str()))
        {
            return Err(QuakeError::Model(format!("unknown feature '{}'", unknown)));
        }

        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx, self.feature_names.len())?;
        }
        Ok(())
    }

    fn row(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        if self.feature_names.iter().map(String::as_str).eq(FEATURE_NAMES) {
            return Ok(features.to_array().to_vec());
        }

        self.feature_names
            .iter()
            .map(|name| {
                features
                    .value(name)
                    .ok_or_else(|| QuakeError::Model(format!("unknown feature '{}'", name)))
            })
            .collect()
    }
}

impl MagnitudeModel for TreeEnsemble {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let row = self.row(features)?;
        let boost: f64 = self.trees.iter().map(|t| t.evaluate(&row)).sum();
        let prediction = self.base_score + self.learning_rate * boost;

        if !prediction.is_finite() {
            return Err(QuakeError::Model(format!(
                "non-finite prediction {}",
                prediction
            )));
        }
        Ok(prediction)
    }
}
