//! Nearest neighbor interpolation.
//!
//! This method selects the value of the nearest grid point. It is the
//! simplest method, used for deterministic raster upscaling and anywhere
//! smooth results are not required.

use super::Interpolator;
use crate::error::{GeoplotError, Result};
use crate::interpolation::common;

/// Nearest neighbor interpolator
pub struct NearestInterpolator;

impl Interpolator for NearestInterpolator {
    fn interpolate(&self, data: &[f32], shape: &[usize], indices: &[f64]) -> Result<f32> {
        if indices.len() != shape.len() {
            return Err(GeoplotError::InvalidParameter {
                param: "indices".to_string(),
                message: format!(
                    "Dimension mismatch: indices has {} dimensions but shape has {}",
                    indices.len(),
                    shape.len()
                ),
            });
        }

        let mut nearest = Vec::with_capacity(indices.len());
        for (&index, &dim) in indices.iter().zip(shape.iter()) {
            nearest.push(common::clamp_index(index.round(), dim) as usize);
        }

        let flat = common::flat_index(&nearest, shape)?;
        Ok(data[flat])
    }

    fn name(&self) -> &str {
        "nearest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_interpolation_1d() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let shape = vec![5];
        let interpolator = NearestInterpolator;

        assert_eq!(
            interpolator.interpolate(&data, &shape, &[0.0]).unwrap(),
            1.0
        );
        assert_eq!(
            interpolator.interpolate(&data, &shape, &[2.2]).unwrap(),
            3.0
        );
        assert_eq!(
            interpolator.interpolate(&data, &shape, &[2.7]).unwrap(),
            4.0
        );

        // Out of bounds clamps to the edges
        assert_eq!(
            interpolator.interpolate(&data, &shape, &[-1.0]).unwrap(),
            1.0
        );
        assert_eq!(
            interpolator.interpolate(&data, &shape, &[5.5]).unwrap(),
            5.0
        );
    }

    #[test]
    fn test_nearest_interpolation_2d() {
        let data = vec![
            1.0, 2.0, 3.0, // row 0
            4.0, 5.0, 6.0, // row 1
            7.0, 8.0, 9.0, // row 2
        ];
        let shape = vec![3, 3];
        let interpolator = NearestInterpolator;

        assert_eq!(
            interpolator
                .interpolate(&data, &shape, &[0.0, 0.0])
                .unwrap(),
            1.0
        );
        assert_eq!(
            interpolator
                .interpolate(&data, &shape, &[2.0, 2.0])
                .unwrap(),
            9.0
        );
        assert_eq!(
            interpolator
                .interpolate(&data, &shape, &[0.7, 1.3])
                .unwrap(),
            5.0
        );
    }

    #[test]
    fn test_nearest_dimension_mismatch() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let shape = vec![2, 2];
        let interpolator = NearestInterpolator;

        assert!(interpolator.interpolate(&data, &shape, &[1.0]).is_err());
        assert!(interpolator
            .interpolate(&data, &shape, &[1.0, 1.0, 1.0])
            .is_err());
    }
}
