//! Trained model: a map together with the bounds its inputs were scaled by.

use crate::config::SomConfig;
use crate::error::{check_dimension, Result};
use crate::normalize::{compute_bounds, normalize, normalize_one, Bounds};
use crate::som::{count_clusters, Som};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A trained SOM paired with its normalization bounds.
///
/// Raw query vectors are scaled with the stored bounds before they reach the
/// map, so classification stays consistent with training.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    som: Som,
    bounds: Bounds,
}

/// Per-record results of fitting a model.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSummary {
    /// Cluster id of each training record, in input order.
    pub assignments: Vec<usize>,
    /// Number of training records per cluster id.
    pub cluster_counts: HashMap<usize, usize>,
    /// Mean distance from each normalized record to its cluster's weights.
    pub quantization_error: f64,
}

/// Everything needed to rebuild a predictor: weights, bounds and the
/// training parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Grid side length.
    pub grid_size: usize,
    /// Initial learning rate used for training.
    pub learning_rate: f64,
    /// Number of training epochs.
    pub iterations: usize,
    /// Weight tensor, indexed `[row][col][feature]`.
    pub weights: Vec<Vec<Vec<f64>>>,
    /// Normalization bounds of the training set.
    pub bounds: Bounds,
}

impl TrainedModel {
    /// Normalizes `raw`, trains a new map on it and assigns every record.
    ///
    /// `config.input_dim` must match the width of the records.
    pub fn fit<V: AsRef<[f64]>>(raw: &[V], config: &SomConfig) -> Result<(Self, TrainingSummary)> {
        let bounds = compute_bounds(raw)?;
        check_dimension(config.input_dim, bounds.dim())?;

        let normalized = normalize(raw, &bounds)?;

        let mut som = Som::new(config)?;
        som.train(&normalized)?;

        let assignments = som.assign_all(&normalized)?;
        let cluster_counts = count_clusters(&assignments);
        let quantization_error = som.quantization_error(&normalized)?;

        info!(
            "Fitted model: {} records in {} of {} clusters, quantization error {:.4}",
            assignments.len(),
            cluster_counts.len(),
            som.total_nodes(),
            quantization_error
        );

        let summary = TrainingSummary {
            assignments,
            cluster_counts,
            quantization_error,
        };

        Ok((Self { som, bounds }, summary))
    }

    /// Pairs an existing map with bounds. Both must cover the same features.
    pub fn from_parts(som: Som, bounds: Bounds) -> Result<Self> {
        check_dimension(som.input_dim(), bounds.dim())?;
        Ok(Self { som, bounds })
    }

    /// Rebuilds a model from a snapshot.
    pub fn from_snapshot(snapshot: &ModelSnapshot) -> Result<Self> {
        let bounds = snapshot.bounds.clone();

        let config = SomConfig {
            grid_size: snapshot.grid_size,
            input_dim: bounds.dim(),
            learning_rate: snapshot.learning_rate,
            iterations: snapshot.iterations,
            seed: None,
        };
        let som = Som::from_weights(&config, &snapshot.weights)?;

        Ok(Self { som, bounds })
    }

    /// Captures weights, bounds and training parameters.
    pub fn snapshot(&self) -> ModelSnapshot {
        let config = self.som.config();
        ModelSnapshot {
            grid_size: config.grid_size,
            learning_rate: config.learning_rate,
            iterations: config.iterations,
            weights: self.som.weights(),
            bounds: self.bounds.clone(),
        }
    }

    /// Classifies a raw (unnormalized) record.
    pub fn classify(&self, raw: &[f64]) -> Result<usize> {
        let normalized = normalize_one(raw, &self.bounds)?;
        self.som.predict(&normalized)
    }

    /// The underlying map.
    #[inline]
    pub fn som(&self) -> &Som {
        &self.som
    }

    /// The training set's normalization bounds.
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}
