//! Common utilities for interpolation algorithms.
//!
//! This module provides shared functionality used by the interpolation
//! methods: index arithmetic, coordinate lookup and the separable Gaussian
//! smoother applied to fields before contouring.

use ndarray::Array2;

use crate::error::{GeoplotError, Result};

/// Clamp an index to valid bounds
pub fn clamp_index(index: f64, size: usize) -> f64 {
    index.max(0.0).min((size - 1) as f64)
}

/// Get the weights for linear interpolation
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}

/// Flatten multi-dimensional indices into a row-major offset
pub fn flat_index(indices: &[usize], shape: &[usize]) -> Result<usize> {
    if indices.len() != shape.len() {
        return Err(GeoplotError::InvalidParameter {
            param: "indices".to_string(),
            message: format!(
                "Dimension mismatch: {} indices for {} dimensions",
                indices.len(),
                shape.len()
            ),
        });
    }
    let mut offset = 0;
    for (i, (&idx, &dim)) in indices.iter().zip(shape.iter()).enumerate() {
        if idx >= dim {
            return Err(GeoplotError::InvalidParameter {
                param: "indices".to_string(),
                message: format!("Index {} out of bounds for axis {} (size {})", idx, i, dim),
            });
        }
        offset = offset * dim + idx;
    }
    Ok(offset)
}

/// Map a coordinate value to a fractional index into a strictly monotonic
/// coordinate array. Values outside the array range return `None`.
pub fn coord_to_index(coord: f64, coord_values: &[f64]) -> Option<f64> {
    if coord_values.len() < 2 {
        return None;
    }
    let ascending = coord_values[1] > coord_values[0];
    let (lo, hi) = if ascending {
        (coord_values[0], *coord_values.last().unwrap())
    } else {
        (*coord_values.last().unwrap(), coord_values[0])
    };
    if coord < lo || coord > hi {
        return None;
    }
    // Coordinate arrays are small; a linear scan of interval bounds is fine
    for i in 0..coord_values.len() - 1 {
        let (a, b) = (coord_values[i], coord_values[i + 1]);
        let inside = if ascending {
            coord >= a && coord <= b
        } else {
            coord <= a && coord >= b
        };
        if inside {
            let span = b - a;
            let frac = if span.abs() < 1e-12 {
                0.0
            } else {
                (coord - a) / span
            };
            return Some(i as f64 + frac);
        }
    }
    None
}

/// Apply a separable Gaussian smoother with the given sigma (in grid
/// cells). A non-positive sigma returns the input unchanged.
pub fn gaussian_smooth(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    if sigma <= 0.0 {
        return data.clone();
    }
    let radius = (3.0 * sigma).ceil() as i64;
    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    let mut sum = 0.0f32;
    for k in -radius..=radius {
        let w = (-(k as f32).powi(2) / (2.0 * sigma * sigma)).exp();
        kernel.push(w);
        sum += w;
    }
    for w in &mut kernel {
        *w /= sum;
    }

    let (ny, nx) = data.dim();
    let mut rows = Array2::<f32>::zeros((ny, nx));
    for j in 0..ny {
        for i in 0..nx {
            let mut acc = 0.0f32;
            let mut weight = 0.0f32;
            for (ki, w) in kernel.iter().enumerate() {
                let src = i as i64 + ki as i64 - radius;
                if src >= 0 && (src as usize) < nx {
                    let v = data[(j, src as usize)];
                    if v.is_finite() {
                        acc += v * w;
                        weight += w;
                    }
                }
            }
            rows[(j, i)] = if weight > 0.0 {
                acc / weight
            } else {
                f32::NAN
            };
        }
    }

    let mut out = Array2::<f32>::zeros((ny, nx));
    for j in 0..ny {
        for i in 0..nx {
            let mut acc = 0.0f32;
            let mut weight = 0.0f32;
            for (ki, w) in kernel.iter().enumerate() {
                let src = j as i64 + ki as i64 - radius;
                if src >= 0 && (src as usize) < ny {
                    let v = rows[(src as usize, i)];
                    if v.is_finite() {
                        acc += v * w;
                        weight += w;
                    }
                }
            }
            out[(j, i)] = if weight > 0.0 {
                acc / weight
            } else {
                f32::NAN
            };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-1.0, 10), 0.0);
        assert_eq!(clamp_index(5.5, 10), 5.5);
        assert_eq!(clamp_index(15.0, 10), 9.0);
    }

    #[test]
    fn test_linear_weight() {
        let (w0, w1) = linear_weight(0.3);
        assert!((w0 - 0.7).abs() < 1e-10);
        assert!((w1 - 0.3).abs() < 1e-10);
        assert!((w0 + w1 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_flat_index() {
        assert_eq!(flat_index(&[0, 0], &[3, 4]).unwrap(), 0);
        assert_eq!(flat_index(&[1, 2], &[3, 4]).unwrap(), 6);
        assert_eq!(flat_index(&[2, 3], &[3, 4]).unwrap(), 11);
        assert!(flat_index(&[3, 0], &[3, 4]).is_err());
        assert!(flat_index(&[0], &[3, 4]).is_err());
    }

    #[test]
    fn test_coord_to_index_ascending() {
        let coords = [0.0, 10.0, 20.0, 30.0];
        assert_eq!(coord_to_index(0.0, &coords), Some(0.0));
        assert_eq!(coord_to_index(15.0, &coords), Some(1.5));
        assert_eq!(coord_to_index(30.0, &coords), Some(3.0));
        assert_eq!(coord_to_index(-1.0, &coords), None);
        assert_eq!(coord_to_index(31.0, &coords), None);
    }

    #[test]
    fn test_coord_to_index_descending() {
        let coords = [90.0, 60.0, 30.0, 0.0];
        assert_eq!(coord_to_index(90.0, &coords), Some(0.0));
        assert_eq!(coord_to_index(45.0, &coords), Some(1.5));
        assert_eq!(coord_to_index(0.0, &coords), Some(3.0));
    }

    #[test]
    fn test_gaussian_smooth_preserves_constant_field() {
        let data = Array2::<f32>::from_elem((5, 5), 3.0);
        let smoothed = gaussian_smooth(&data, 1.0);
        for &v in smoothed.iter() {
            assert!((v - 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gaussian_smooth_reduces_peak() {
        let mut data = Array2::<f32>::zeros((7, 7));
        data[(3, 3)] = 10.0;
        let smoothed = gaussian_smooth(&data, 1.0);
        assert!(smoothed[(3, 3)] < 10.0);
        assert!(smoothed[(3, 3)] > 0.0);
        assert!(smoothed[(2, 3)] > 0.0);
    }

    #[test]
    fn test_gaussian_smooth_zero_sigma_is_identity() {
        let data = array![[1.0f32, 2.0], [3.0, 4.0]];
        let smoothed = gaussian_smooth(&data, 0.0);
        assert_eq!(smoothed, data);
    }
}
