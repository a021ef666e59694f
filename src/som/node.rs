//! Grid coordinates and per-node weight kernels.

use serde::{Deserialize, Serialize};

/// A node position on the square grid.
///
/// Nodes are stored in row-major order, so a node is addressable either by
/// `(row, col)` or by its flattened index `row * grid_size + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Row position on the grid.
    pub row: usize,
    /// Column position on the grid.
    pub col: usize,
}

impl Node {
    /// Creates a node at the given position.
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the node for a flattened index in a grid of the given size.
    #[inline]
    pub fn from_index(index: usize, grid_size: usize) -> Self {
        Self {
            row: index / grid_size,
            col: index % grid_size,
        }
    }

    /// Returns the flattened index for this node in a grid of the given size.
    #[inline]
    pub fn index(&self, grid_size: usize) -> usize {
        self.row * grid_size + self.col
    }

    /// Squared Euclidean distance between grid coordinates. No wrapping.
    #[inline]
    pub fn grid_distance_squared(&self, other: &Node) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        dr * dr + dc * dc
    }

    /// Euclidean distance between grid coordinates.
    #[inline]
    pub fn grid_distance(&self, other: &Node) -> f64 {
        self.grid_distance_squared(other).sqrt()
    }
}

/// Squared Euclidean distance between a weight vector and an input.
#[inline]
pub(crate) fn distance_squared(weights: &[f64], input: &[f64]) -> f64 {
    debug_assert_eq!(
        weights.len(),
        input.len(),
        "Weight and input dimensions must match"
    );

    weights
        .iter()
        .zip(input.iter())
        .map(|(w, i)| (w - i).powi(2))
        .sum()
}

/// Moves `weights` towards `input` by `influence`, per dimension.
#[inline]
pub(crate) fn pull_towards(weights: &mut [f64], input: &[f64], influence: f64) {
    for (w, i) in weights.iter_mut().zip(input.iter()) {
        *w += influence * (i - *w);
    }
}
