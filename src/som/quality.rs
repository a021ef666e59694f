//! Cluster assignment and map quality measures.
//!
//! Everything here only reads the weights, so whole data sets are scanned in
//! parallel. None of it may run while the same map is training.

use crate::error::{check_dimension, Result, SomError};
use crate::som::node::distance_squared;
use crate::som::{Node, Som};
use rayon::prelude::*;
use std::collections::HashMap;

/// Counts how many records landed in each cluster.
///
/// Clusters with no records are absent from the map.
pub fn count_clusters(assignments: &[usize]) -> HashMap<usize, usize> {
    let mut counts = HashMap::new();
    for &cluster in assignments {
        *counts.entry(cluster).or_insert(0) += 1;
    }
    counts
}

impl Som {
    /// Assigns every vector in `data` to its cluster id, in input order.
    pub fn assign_all<V: AsRef<[f64]> + Sync>(&self, data: &[V]) -> Result<Vec<usize>> {
        self.check_all(data)?;

        Ok(data.par_iter().map(|v| self.bmu(v.as_ref()).0).collect())
    }

    /// Number of records per cluster id.
    pub fn cluster_counts<V: AsRef<[f64]> + Sync>(&self, data: &[V]) -> Result<HashMap<usize, usize>> {
        Ok(count_clusters(&self.assign_all(data)?))
    }

    /// Mean Euclidean distance from each vector to its BMU's weights.
    pub fn quantization_error<V: AsRef<[f64]> + Sync>(&self, data: &[V]) -> Result<f64> {
        self.check_non_empty(data)?;

        let total: f64 = data
            .par_iter()
            .map(|v| self.bmu(v.as_ref()).1.sqrt())
            .sum();

        Ok(total / data.len() as f64)
    }

    /// Fraction of vectors whose two nearest nodes are not grid neighbors.
    ///
    /// Neighbors are the (up to) eight surrounding nodes. A single-node map
    /// has no second-best node and scores 0.
    pub fn topographic_error<V: AsRef<[f64]> + Sync>(&self, data: &[V]) -> Result<f64> {
        self.check_non_empty(data)?;

        if self.total_nodes() < 2 {
            return Ok(0.0);
        }

        let grid = self.grid_size();
        let errors = data
            .par_iter()
            .filter(|v| {
                let input: &[f64] = v.as_ref();
                let (bmu, _) = self.bmu(input);
                let second = self.second_bmu(input, bmu);
                !are_neighbors(Node::from_index(bmu, grid), Node::from_index(second, grid))
            })
            .count();

        Ok(errors as f64 / data.len() as f64)
    }

    fn second_bmu(&self, input: &[f64], bmu: usize) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for i in (0..self.total_nodes()).filter(|&i| i != bmu) {
            let dist = distance_squared(self.slice(i), input);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }

    fn check_all<V: AsRef<[f64]>>(&self, data: &[V]) -> Result<()> {
        data.iter()
            .try_for_each(|v| check_dimension(self.input_dim(), v.as_ref().len()))
    }

    fn check_non_empty<V: AsRef<[f64]>>(&self, data: &[V]) -> Result<()> {
        if data.is_empty() {
            return Err(SomError::EmptyInput("no vectors to evaluate".to_string()));
        }
        self.check_all(data)
    }
}

fn are_neighbors(a: Node, b: Node) -> bool {
    a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1
}
