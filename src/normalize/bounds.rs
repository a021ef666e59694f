//! Per-feature min/max bounds.

use crate::error::{check_dimension, Result, SomError};
use serde::{Deserialize, Serialize};

/// Per-feature minimum and maximum observed over a training set.
///
/// Bounds are computed once per training session and must be kept alongside
/// the trained map: query vectors are only comparable to the map when scaled
/// with the same bounds. Deserialization goes through [`Bounds::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

/// Unchecked wire shape of [`Bounds`].
#[derive(Deserialize)]
struct RawBounds {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = SomError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Bounds::new(raw.mins, raw.maxs)
    }
}

impl Bounds {
    /// Creates bounds from explicit per-feature minimums and maximums.
    ///
    /// Fails if the two vectors differ in length, are empty, hold a
    /// non-finite value, or if any `maxs[i] < mins[i]`.
    pub fn new(mins: Vec<f64>, maxs: Vec<f64>) -> Result<Self> {
        if mins.is_empty() {
            return Err(SomError::EmptyInput("bounds need at least one feature".to_string()));
        }
        check_dimension(mins.len(), maxs.len())?;

        for i in 0..mins.len() {
            if !mins[i].is_finite() || !maxs[i].is_finite() {
                return Err(SomError::Config(format!(
                    "feature {}: bounds must be finite, got [{}, {}]",
                    i, mins[i], maxs[i]
                )));
            }
            if maxs[i] < mins[i] {
                return Err(SomError::Config(format!(
                    "feature {}: max {} is below min {}",
                    i, maxs[i], mins[i]
                )));
            }
        }

        Ok(Self { mins, maxs })
    }

    /// Per-feature minimums.
    #[inline]
    pub fn mins(&self) -> &[f64] {
        &self.mins
    }

    /// Per-feature maximums.
    #[inline]
    pub fn maxs(&self) -> &[f64] {
        &self.maxs
    }

    /// Number of features covered.
    #[inline]
    pub fn dim(&self) -> usize {
        self.mins.len()
    }

    /// Width of feature `i`. Zero for a constant feature.
    #[inline]
    pub fn range(&self, i: usize) -> f64 {
        self.maxs[i] - self.mins[i]
    }
}

/// Computes per-feature bounds over a non-empty set of equal-length vectors.
///
/// Every value must be finite; the first NaN or infinity is reported with
/// its record and feature position.
pub fn compute_bounds<V: AsRef<[f64]>>(vectors: &[V]) -> Result<Bounds> {
    let first = vectors
        .first()
        .ok_or_else(|| SomError::EmptyInput("cannot compute bounds of zero vectors".to_string()))?
        .as_ref();

    let dim = first.len();
    let mut mins = vec![f64::INFINITY; dim];
    let mut maxs = vec![f64::NEG_INFINITY; dim];

    for (record, vector) in vectors.iter().enumerate() {
        let vector = vector.as_ref();
        check_dimension(dim, vector.len())?;

        for (feature, &value) in vector.iter().enumerate() {
            if !value.is_finite() {
                return Err(SomError::NonFinite { record, feature, value });
            }
            mins[feature] = mins[feature].min(value);
            maxs[feature] = maxs[feature].max(value);
        }
    }

    Bounds::new(mins, maxs)
}
