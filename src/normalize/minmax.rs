//! Min-max scaling to and from the unit interval.

use super::Bounds;
use crate::error::{check_dimension, Result};

/// Scales a single value of feature `i`.
///
/// Constant features map to 0 instead of NaN.
#[inline]
fn scale(val: f64, bounds: &Bounds, i: usize) -> f64 {
    let range = bounds.range(i);
    if range > 0.0 {
        (val - bounds.mins()[i]) / range
    } else {
        0.0
    }
}

/// Maps a normalized value of feature `i` back to its raw scale.
#[inline]
fn unscale(val: f64, bounds: &Bounds, i: usize) -> f64 {
    bounds.mins()[i] + val * bounds.range(i)
}

/// Normalizes one raw vector with previously computed bounds.
///
/// Values outside the bounds are not clamped: they land outside `[0, 1]`.
pub fn normalize_one(vector: &[f64], bounds: &Bounds) -> Result<Vec<f64>> {
    check_dimension(bounds.dim(), vector.len())?;

    Ok(vector
        .iter()
        .enumerate()
        .map(|(i, &val)| scale(val, bounds, i))
        .collect())
}

/// Normalizes every vector in `vectors`.
///
/// All vectors are checked before any is scaled.
pub fn normalize<V: AsRef<[f64]>>(vectors: &[V], bounds: &Bounds) -> Result<Vec<Vec<f64>>> {
    for vector in vectors {
        check_dimension(bounds.dim(), vector.as_ref().len())?;
    }

    vectors
        .iter()
        .map(|v| normalize_one(v.as_ref(), bounds))
        .collect()
}

/// Maps a normalized vector back to raw feature scale.
///
/// Constant features come back as their single observed value.
pub fn denormalize_one(vector: &[f64], bounds: &Bounds) -> Result<Vec<f64>> {
    check_dimension(bounds.dim(), vector.len())?;

    Ok(vector
        .iter()
        .enumerate()
        .map(|(i, &val)| unscale(val, bounds, i))
        .collect())
}

/// Maps a set of normalized vectors back to raw feature scale.
pub fn denormalize<V: AsRef<[f64]>>(vectors: &[V], bounds: &Bounds) -> Result<Vec<Vec<f64>>> {
    for vector in vectors {
        check_dimension(bounds.dim(), vector.as_ref().len())?;
    }

    vectors
        .iter()
        .map(|v| denormalize_one(v.as_ref(), bounds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SomError;
    use crate::normalize::compute_bounds;

    fn nutrition_rows() -> Vec<Vec<f64>> {
        vec![
            vec![2100.0, 60.0, 12.0, 900.0, 70.0, 3.0, 7.0],
            vec![1600.0, 45.0, 8.0, 650.0, 40.0, 7.0, 3.0],
            vec![2600.0, 90.0, 18.0, 1200.0, 85.0, 2.0, 9.0],
            vec![1900.0, 55.0, 10.0, 800.0, 60.0, 5.0, 5.0],
        ]
    }

    #[test]
    fn test_normalize_in_unit_interval() {
        let rows = nutrition_rows();
        let bounds = compute_bounds(&rows).unwrap();
        let normalized = normalize(&rows, &bounds).unwrap();

        assert_eq!(normalized.len(), rows.len());
        for row in &normalized {
            assert_eq!(row.len(), 7);
            assert!(row.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
        assert_eq!(normalized[1][0], 0.0);
        assert_eq!(normalized[2][0], 1.0);
    }

    #[test]
    fn test_zero_range_feature() {
        let rows = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let bounds = compute_bounds(&rows).unwrap();
        let normalized = normalize(&rows, &bounds).unwrap();

        for row in &normalized {
            assert_eq!(row[1], 0.0);
        }

        let query = normalize_one(&[2.0, 100.0], &bounds).unwrap();
        assert_eq!(query[1], 0.0);
        assert!(query.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_bounds_vectors_map_to_extremes() {
        let rows = nutrition_rows();
        let bounds = compute_bounds(&rows).unwrap();

        let lo = normalize_one(bounds.mins(), &bounds).unwrap();
        let hi = normalize_one(bounds.maxs(), &bounds).unwrap();

        assert!(lo.iter().all(|&v| v == 0.0));
        assert!(hi.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_bounds_idempotent_after_normalization() {
        let rows = nutrition_rows();
        let bounds = compute_bounds(&rows).unwrap();
        let normalized = normalize(&rows, &bounds).unwrap();
        let again = compute_bounds(&normalized).unwrap();

        assert!(again.mins().iter().all(|&v| v == 0.0));
        assert!(again.maxs().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_out_of_bounds_not_clamped() {
        let bounds = Bounds::new(vec![0.0, 10.0], vec![10.0, 20.0]).unwrap();
        let query = normalize_one(&[15.0, 5.0], &bounds).unwrap();

        assert!((query[0] - 1.5).abs() < 1e-10);
        assert!((query[1] + 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_denormalize_inverts() {
        let rows = nutrition_rows();
        let bounds = compute_bounds(&rows).unwrap();
        let normalized = normalize(&rows, &bounds).unwrap();
        let restored = denormalize(&normalized, &bounds).unwrap();

        for (orig, back) in rows.iter().zip(restored.iter()) {
            for (a, b) in orig.iter().zip(back.iter()) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_denormalize_constant_feature() {
        let bounds = Bounds::new(vec![0.0, 4.0], vec![2.0, 4.0]).unwrap();
        let raw = denormalize_one(&[0.5, 0.0], &bounds).unwrap();
        assert_eq!(raw, vec![1.0, 4.0]);
    }

    #[test]
    fn test_dimension_mismatch_rejects_whole_call() {
        let bounds = Bounds::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let rows = vec![vec![0.5, 0.5], vec![0.5]];

        assert_eq!(
            normalize(&rows, &bounds),
            Err(SomError::DimensionMismatch { expected: 2, actual: 1 })
        );
        assert!(normalize_one(&[1.0, 2.0, 3.0], &bounds).is_err());
        assert!(denormalize_one(&[1.0], &bounds).is_err());
    }
}
