//! Configuration for the SOM clustering kernel.

use crate::error::{Result, SomError};
use serde::{Deserialize, Serialize};

/// Self-Organizing Map configuration.
///
/// The decay schedules are defined relative to `iterations`, so a config is
/// bound to one engine for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SomConfig {
    /// Grid side length (grid is grid_size x grid_size).
    /// Default: 5.
    pub grid_size: usize,

    /// Dimensionality of the feature vectors.
    /// Default: 7.
    pub input_dim: usize,

    /// Initial learning rate, in (0, 1].
    /// Default: 0.5.
    pub learning_rate: f64,

    /// Number of training epochs.
    /// Default: 100.
    pub iterations: usize,

    /// Random seed for weight initialization.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            grid_size: crate::DEFAULT_GRID_SIZE,
            input_dim: crate::DEFAULT_INPUT_DIM,
            learning_rate: crate::DEFAULT_LEARNING_RATE,
            iterations: crate::DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl SomConfig {
    /// Creates a configuration with the given grid size and input dimension.
    pub fn new(grid_size: usize, input_dim: usize) -> Self {
        Self {
            grid_size,
            input_dim,
            ..Default::default()
        }
    }

    /// Returns the total number of nodes in the grid.
    ///
    /// Cannot overflow once [`SomConfig::validate`] has passed.
    #[inline]
    pub fn total_nodes(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Rejects configurations the engine cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(SomError::Config("grid_size must be at least 1".to_string()));
        }
        if self.input_dim == 0 {
            return Err(SomError::Config("input_dim must be at least 1".to_string()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(SomError::Config(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if self.iterations == 0 {
            return Err(SomError::Config("iterations must be at least 1".to_string()));
        }
        self.grid_size
            .checked_mul(self.grid_size)
            .and_then(|nodes| nodes.checked_mul(self.input_dim))
            .ok_or_else(|| {
                SomError::Config(format!(
                    "{0}x{0} grid of {1}-dim weights is too large",
                    self.grid_size, self.input_dim
                ))
            })?;
        Ok(())
    }
}
