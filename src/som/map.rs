//! Self-Organizing Map (SOM) implementation.

use crate::config::SomConfig;
use crate::error::{check_dimension, Result, SomError};
use crate::som::node::distance_squared;
use crate::som::Node;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};

/// A Self-Organizing Map over fixed-length feature vectors.
///
/// The SOM is a square grid of nodes, each owning a weight vector of length
/// `input_dim`. All weights live in one flat row-major buffer owned by the
/// map; callers only ever see borrowed slices or copies of it.
#[derive(Debug, Clone)]
pub struct Som {
    pub(super) config: SomConfig,
    /// Node weights, `input_dim` values per node, nodes in row-major order.
    pub(super) weights: Vec<f64>,
    pub(super) trained: bool,
}

impl Som {
    /// Creates a new SOM with weights drawn uniformly from `[0, 1)`.
    ///
    /// Uses `config.seed` when set, otherwise seeds from entropy.
    pub fn new(config: &SomConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    /// Creates a new SOM drawing its initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: &SomConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let weights = random_weights(config.total_nodes() * config.input_dim, rng);

        Ok(Self {
            config: config.clone(),
            weights,
            trained: false,
        })
    }

    /// Restores a SOM from a `grid_size x grid_size x input_dim` weight tensor.
    ///
    /// The restored map counts as trained.
    pub fn from_weights(config: &SomConfig, tensor: &[Vec<Vec<f64>>]) -> Result<Self> {
        config.validate()?;

        let grid = config.grid_size;
        if tensor.len() != grid || tensor.iter().any(|row| row.len() != grid) {
            return Err(SomError::Snapshot(format!(
                "weight tensor is not {grid}x{grid}"
            )));
        }

        let mut weights = Vec::with_capacity(config.total_nodes() * config.input_dim);
        for node in tensor.iter().flatten() {
            check_dimension(config.input_dim, node.len())?;
            weights.extend_from_slice(node);
        }

        Ok(Self {
            config: config.clone(),
            weights,
            trained: true,
        })
    }

    /// Re-randomizes every weight and returns the map to the untrained state.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.weights = random_weights(self.weights.len(), rng);
        self.trained = false;
    }

    /// Returns the configuration this map was built with.
    #[inline]
    pub fn config(&self) -> &SomConfig {
        &self.config
    }

    /// Grid side length.
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    /// Weight vector dimensionality.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.config.input_dim
    }

    /// Returns the total number of nodes.
    #[inline]
    pub fn total_nodes(&self) -> usize {
        self.config.total_nodes()
    }

    /// Whether `train` has already run on this map.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Gets a node's weights by its flattened index.
    #[inline]
    pub fn node_weights(&self, index: usize) -> Option<&[f64]> {
        if index < self.total_nodes() {
            Some(self.slice(index))
        } else {
            None
        }
    }

    /// Gets a node's weights by its 2D position.
    #[inline]
    pub fn node_weights_at(&self, row: usize, col: usize) -> Option<&[f64]> {
        let grid = self.grid_size();
        if row < grid && col < grid {
            Some(self.slice(Node::new(row, col).index(grid)))
        } else {
            None
        }
    }

    /// Returns a copy of the full weight tensor, indexed `[row][col][feature]`.
    pub fn weights(&self) -> Vec<Vec<Vec<f64>>> {
        let grid = self.grid_size();
        let dim = self.input_dim();

        self.weights
            .chunks(grid * dim)
            .map(|row| row.chunks(dim).map(|node| node.to_vec()).collect())
            .collect()
    }

    /// Finds the Best Matching Unit (BMU) for an input vector.
    ///
    /// Returns the flattened index of the node nearest to `input`. On ties
    /// the first node in row-major order wins.
    pub fn find_bmu(&self, input: &[f64]) -> Result<usize> {
        check_dimension(self.input_dim(), input.len())?;
        Ok(self.bmu(input).0)
    }

    /// Classifies a normalized vector to its cluster id.
    #[inline]
    pub fn predict(&self, input: &[f64]) -> Result<usize> {
        self.find_bmu(input)
    }

    /// Returns the BMU index and its squared distance. Input length is
    /// assumed to be checked by the caller.
    pub(crate) fn bmu(&self, input: &[f64]) -> (usize, f64) {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (i, node) in self.weights.chunks(self.input_dim()).enumerate() {
            let dist = distance_squared(node, input);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    #[inline]
    pub(crate) fn slice(&self, index: usize) -> &[f64] {
        let dim = self.input_dim();
        &self.weights[index * dim..(index + 1) * dim]
    }

    #[inline]
    pub(super) fn slice_mut(&mut self, index: usize) -> &mut [f64] {
        let dim = self.input_dim();
        &mut self.weights[index * dim..(index + 1) * dim]
    }
}

fn random_weights<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    let unit = Uniform::new(0.0, 1.0);
    (0..len).map(|_| unit.sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SomConfig {
        SomConfig {
            grid_size: 4,
            input_dim: 3,
            seed: Some(42),
            ..Default::default()
        }
    }

    fn uniform_tensor(grid: usize, value: Vec<f64>) -> Vec<Vec<Vec<f64>>> {
        vec![vec![value; grid]; grid]
    }

    #[test]
    fn test_som_creation() {
        let som = Som::new(&test_config()).unwrap();

        assert_eq!(som.grid_size(), 4);
        assert_eq!(som.total_nodes(), 16);
        assert_eq!(som.input_dim(), 3);
        assert!(!som.is_trained());
        assert!(som
            .weights()
            .iter()
            .flatten()
            .flatten()
            .all(|&w| (0.0..1.0).contains(&w)));
    }

    #[test]
    fn test_seeded_creation_is_deterministic() {
        let a = Som::new(&test_config()).unwrap();
        let b = Som::new(&test_config()).unwrap();
        assert_eq!(a.weights(), b.weights());

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let c = Som::with_rng(&test_config(), &mut rng).unwrap();
        assert_ne!(a.weights(), c.weights());
    }

    #[test]
    fn test_invalid_config() {
        for config in [
            SomConfig { grid_size: 0, ..test_config() },
            SomConfig { learning_rate: 0.0, ..test_config() },
            SomConfig { iterations: 0, ..test_config() },
            SomConfig { grid_size: usize::MAX / 2, ..test_config() },
        ] {
            assert!(matches!(Som::new(&config), Err(SomError::Config(_))));
        }
    }

    #[test]
    fn test_weights_shape() {
        let som = Som::new(&test_config()).unwrap();
        let tensor = som.weights();

        assert_eq!(tensor.len(), 4);
        assert!(tensor.iter().all(|row| row.len() == 4));
        assert!(tensor.iter().flatten().all(|node| node.len() == 3));
        assert_eq!(tensor[1][2].as_slice(), som.node_weights(6).unwrap());
        assert_eq!(som.node_weights_at(1, 2), som.node_weights(6));
        assert!(som.node_weights(16).is_none());
        assert!(som.node_weights_at(0, 4).is_none());
    }

    #[test]
    fn test_weights_snapshot_does_not_alias() {
        let som = Som::new(&test_config()).unwrap();
        let mut tensor = som.weights();
        tensor[0][0][0] = 99.0;

        assert_ne!(som.node_weights(0).unwrap()[0], 99.0);
    }

    #[test]
    fn test_find_bmu() {
        let mut tensor = uniform_tensor(4, vec![0.0, 0.0, 0.0]);
        tensor[1][1] = vec![1.0, 0.0, 0.0];
        let som = Som::from_weights(&test_config(), &tensor).unwrap();

        let bmu = som.find_bmu(&[0.9, 0.1, 0.0]).unwrap();
        assert_eq!(bmu, 5);
        assert_eq!(som.predict(&[0.9, 0.1, 0.0]).unwrap(), 5);
    }

    #[test]
    fn test_bmu_tie_break_prefers_lowest_index() {
        let mut tensor = uniform_tensor(4, vec![5.0, 5.0, 5.0]);
        tensor[0][3] = vec![0.5, 0.5, 0.5];
        tensor[2][1] = vec![0.5, 0.5, 0.5];
        let som = Som::from_weights(&test_config(), &tensor).unwrap();

        assert_eq!(som.predict(&[0.5, 0.5, 0.5]).unwrap(), 3);

        let flat = Som::from_weights(&test_config(), &uniform_tensor(4, vec![0.2; 3])).unwrap();
        assert_eq!(flat.predict(&[0.9, 0.0, 0.3]).unwrap(), 0);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let som = Som::new(&test_config()).unwrap();
        assert_eq!(
            som.predict(&[0.1, 0.2]),
            Err(SomError::DimensionMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_predict_is_pure() {
        let som = Som::new(&test_config()).unwrap();
        let before = som.weights();

        let first = som.predict(&[0.3, 0.6, 0.9]).unwrap();
        let second = som.predict(&[0.3, 0.6, 0.9]).unwrap();

        assert_eq!(first, second);
        assert!(first < som.total_nodes());
        assert_eq!(som.weights(), before);
    }

    #[test]
    fn test_from_weights_rejects_bad_shape() {
        let config = test_config();

        let short = uniform_tensor(3, vec![0.0; 3]);
        assert!(matches!(Som::from_weights(&config, &short), Err(SomError::Snapshot(_))));

        let narrow = uniform_tensor(4, vec![0.0; 2]);
        assert!(matches!(
            Som::from_weights(&config, &narrow),
            Err(SomError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_reset() {
        let tensor = uniform_tensor(4, vec![2.0; 3]);
        let mut som = Som::from_weights(&test_config(), &tensor).unwrap();
        assert!(som.is_trained());

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        som.reset(&mut rng);

        assert!(!som.is_trained());
        assert!(som.weights().iter().flatten().flatten().all(|&w| w < 1.0));
    }
}
