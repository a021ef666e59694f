//! Feature normalization module.
//!
//! Min-max scaling puts every feature on a comparable `[0, 1]` scale before
//! any Euclidean distance is taken. The [`Bounds`] computed from the training
//! set must be reused for every later query vector.

mod bounds;
mod minmax;

pub use bounds::{compute_bounds, Bounds};
pub use minmax::{denormalize, denormalize_one, normalize, normalize_one};
