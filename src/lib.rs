//! # somap - Self-Organizing Map clustering kernel
//!
//! somap clusters fixed-length numeric records with a Self-Organizing Map
//! (SOM): a square grid of nodes whose weight vectors learn the topology of
//! the input space through competitive, neighborhood-weighted updates.
//!
//! ## Overview
//!
//! Raw features usually live on very different scales, so every record is
//! first min-max normalized into `[0, 1]`. The per-feature bounds computed
//! from the training set are kept with the model and reused for every later
//! query, which keeps query distances comparable to training distances.
//!
//! ## Key Features
//!
//! - **Min-max normalization** with a zero-range fallback for constant features
//! - **Online SOM training** with a shrinking Gaussian neighborhood and an
//!   annealed learning rate
//! - **Deterministic initialization** from a seed or any injected [`rand::Rng`]
//! - **Epoch-boundary cancellation** for long training runs
//! - **Cluster assignment and quality measures** (quantization and topographic error)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use somap::{SomConfig, TrainedModel};
//!
//! let records = vec![
//!     vec![2100.0, 60.0, 12.0],
//!     vec![1600.0, 45.0, 8.0],
//!     vec![2600.0, 90.0, 18.0],
//! ];
//!
//! let config = SomConfig { grid_size: 5, input_dim: 3, seed: Some(42), ..Default::default() };
//! let (model, summary) = TrainedModel::fit(&records, &config)?;
//!
//! println!("cluster counts: {:?}", summary.cluster_counts);
//! let cluster = model.classify(&[1900.0, 55.0, 10.0])?;
//! ```
//!
//! ## Using the pieces directly
//!
//! ```rust,ignore
//! use somap::{compute_bounds, normalize, normalize_one, Som, SomConfig};
//!
//! let bounds = compute_bounds(&records)?;
//! let normalized = normalize(&records, &bounds)?;
//!
//! let mut som = Som::new(&config)?;
//! som.train(&normalized)?;
//!
//! let id = som.predict(&normalize_one(&query, &bounds)?)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod som;

// Re-export commonly used types
pub use config::SomConfig;
pub use error::{Result, SomError};
pub use model::{ModelSnapshot, TrainedModel, TrainingSummary};
pub use normalize::{compute_bounds, denormalize, denormalize_one, normalize, normalize_one, Bounds};
pub use som::{count_clusters, DecaySchedule, Node, Som, TrainingOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default grid side length.
pub const DEFAULT_GRID_SIZE: usize = 5;

/// Default feature count (calories, protein, iron, calcium, vitamins,
/// fatigue level, energy level).
pub const DEFAULT_INPUT_DIM: usize = 7;

/// Default initial learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;

/// Default number of training epochs.
pub const DEFAULT_ITERATIONS: usize = 100;
