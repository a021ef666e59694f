//! Self-Organizing Map (SOM) module.
//!
//! - **Grid and weights**: node coordinates and the weight buffer (node.rs, map.rs)
//! - **Online training**: shrinking Gaussian neighborhood with annealed learning rate (training.rs)
//! - **Evaluation**: batch assignment, cluster counts and map quality (quality.rs)

mod map;
mod node;
pub mod quality;
pub mod training;

pub use map::Som;
pub use node::Node;
pub use quality::count_clusters;
pub use training::{DecaySchedule, TrainingOutcome};
