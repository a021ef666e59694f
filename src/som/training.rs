//! SOM training: decay schedules and the competitive update loop.
//!
//! Each epoch sweeps the whole input sequence in order. For every input the
//! best-matching unit is found against the current weights, and every node
//! within the epoch's neighborhood radius is pulled towards the input with a
//! Gaussian-weighted, annealed influence.

use crate::config::SomConfig;
use crate::error::{check_dimension, Result, SomError};
use crate::som::node::pull_towards;
use crate::som::{Node, Som};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};

/// Neighborhood-radius and learning-rate schedules for one training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecaySchedule {
    initial_radius: f64,
    learning_rate: f64,
    iterations: f64,
    time_constant: f64,
}

impl DecaySchedule {
    /// Builds the schedule for a configuration.
    ///
    /// The radius time constant is `iterations / ln(grid_size / 2)`. For
    /// `grid_size <= 2` that logarithm is not positive, and the time constant
    /// is taken as infinite: the radius then stays at `grid_size / 2`.
    pub fn new(config: &SomConfig) -> Self {
        let initial_radius = config.grid_size as f64 / 2.0;
        let iterations = config.iterations as f64;
        let log_radius = initial_radius.ln();

        let time_constant = if log_radius > 0.0 {
            iterations / log_radius
        } else {
            f64::INFINITY
        };

        Self {
            initial_radius,
            learning_rate: config.learning_rate,
            iterations,
            time_constant,
        }
    }

    /// Radius time constant (lambda).
    #[inline]
    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    /// True when the radius does not shrink (`grid_size <= 2`).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.time_constant.is_infinite()
    }

    /// Neighborhood radius at `epoch`.
    #[inline]
    pub fn radius(&self, epoch: usize) -> f64 {
        self.initial_radius * (-(epoch as f64) / self.time_constant).exp()
    }

    /// Annealed learning rate at `epoch`, independent of grid distance.
    #[inline]
    pub fn learning_rate(&self, epoch: usize) -> f64 {
        self.learning_rate * (-(epoch as f64) / self.iterations).exp()
    }

    /// Update strength for a node at `grid_dist` from the BMU.
    ///
    /// Callers apply the hard cutoff at `radius` themselves.
    #[inline]
    pub fn influence(&self, epoch: usize, grid_dist: f64, radius: f64) -> f64 {
        self.learning_rate(epoch) * (-(grid_dist * grid_dist) / (2.0 * radius * radius)).exp()
    }
}

/// How a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingOutcome {
    /// Number of epochs fully applied.
    pub epochs_completed: usize,
    /// Whether the run stopped early on a cancellation request.
    pub cancelled: bool,
}

impl Som {
    /// Trains the map on normalized input vectors.
    ///
    /// Runs `iterations` epochs over `data` in order. Every vector must have
    /// length `input_dim`; a mismatch rejects the call before any weight
    /// changes. An empty `data` leaves the weights untouched.
    ///
    /// A map can be trained once; call [`Som::reset`] or build a new map to
    /// train again.
    pub fn train<V: AsRef<[f64]>>(&mut self, data: &[V]) -> Result<()> {
        self.run_training(data, None).map(|_| ())
    }

    /// Trains like [`Som::train`], checking `cancel` before each epoch.
    ///
    /// Cancellation is coarse: an epoch in progress always finishes. A
    /// cancelled run keeps the updates applied so far and still counts as
    /// the map's one training run.
    pub fn train_cancellable<V: AsRef<[f64]>>(
        &mut self,
        data: &[V],
        cancel: &AtomicBool,
    ) -> Result<TrainingOutcome> {
        self.run_training(data, Some(cancel))
    }

    fn run_training<V: AsRef<[f64]>>(
        &mut self,
        data: &[V],
        cancel: Option<&AtomicBool>,
    ) -> Result<TrainingOutcome> {
        if self.trained {
            return Err(SomError::Training(
                "map is already trained; reset it or build a new one".to_string(),
            ));
        }

        for input in data {
            check_dimension(self.input_dim(), input.as_ref().len())?;
        }

        let schedule = DecaySchedule::new(&self.config);
        let iterations = self.config.iterations;

        info!(
            "Training SOM: {} samples, {} nodes, {} dim, {} epochs",
            data.len(),
            self.total_nodes(),
            self.input_dim(),
            iterations
        );
        if schedule.is_degenerate() {
            warn!(
                "Grid size {} too small for radius decay; radius fixed at {:.2}",
                self.grid_size(),
                schedule.radius(0)
            );
        }

        let log_every = (iterations / 10).max(1);
        let mut outcome = TrainingOutcome {
            epochs_completed: 0,
            cancelled: false,
        };

        for epoch in 0..iterations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!("Training cancelled after {}/{} epochs", epoch, iterations);
                outcome.cancelled = true;
                break;
            }

            let radius = schedule.radius(epoch);
            for input in data {
                self.adapt(input.as_ref(), &schedule, epoch, radius);
            }
            outcome.epochs_completed += 1;

            if epoch % log_every == 0 || epoch == iterations - 1 {
                debug!(
                    "Epoch {}/{}: lr={:.4}, radius={:.2}",
                    epoch,
                    iterations,
                    schedule.learning_rate(epoch),
                    radius
                );
            }
        }

        self.trained = true;
        info!("SOM training completed ({} epochs)", outcome.epochs_completed);
        Ok(outcome)
    }

    /// One competitive step: find the BMU, then update its neighborhood.
    fn adapt(&mut self, input: &[f64], schedule: &DecaySchedule, epoch: usize, radius: f64) {
        let grid = self.grid_size();
        let (bmu_idx, _) = self.bmu(input);
        let bmu = Node::from_index(bmu_idx, grid);

        // Only nodes inside the radius's bounding box can be within reach.
        let reach = radius.floor() as usize;
        let row_end = (bmu.row + reach).min(grid - 1);
        let col_end = (bmu.col + reach).min(grid - 1);

        for row in bmu.row.saturating_sub(reach)..=row_end {
            for col in bmu.col.saturating_sub(reach)..=col_end {
                let node = Node::new(row, col);
                let grid_dist = bmu.grid_distance(&node);
                if grid_dist > radius {
                    continue;
                }

                let influence = schedule.influence(epoch, grid_dist, radius);
                pull_towards(self.slice_mut(node.index(grid)), input, influence);
            }
        }
    }
}
