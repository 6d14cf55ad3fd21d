//! Bilinear interpolation.
//!
//! This method performs linear interpolation in two dimensions using the
//! four nearest grid points. It is the default sampler for rendering
//! gridded fields onto the map canvas.

use super::Interpolator;
use crate::error::{GeoplotError, Result};
use crate::interpolation::common;

/// Bilinear interpolator
pub struct BilinearInterpolator;

impl Interpolator for BilinearInterpolator {
    fn interpolate(&self, data: &[f32], shape: &[usize], indices: &[f64]) -> Result<f32> {
        if shape.len() != 2 || indices.len() != 2 {
            return Err(GeoplotError::InvalidParameter {
                param: "indices".to_string(),
                message: format!(
                    "Bilinear interpolation requires 2 dimensions, got shape {:?} and {} indices",
                    shape,
                    indices.len()
                ),
            });
        }
        let (ny, nx) = (shape[0], shape[1]);
        let y = common::clamp_index(indices[0], ny);
        let x = common::clamp_index(indices[1], nx);

        let y0 = y.floor() as usize;
        let x0 = x.floor() as usize;
        let y1 = (y0 + 1).min(ny - 1);
        let x1 = (x0 + 1).min(nx - 1);

        let (wy0, wy1) = common::linear_weight(y - y0 as f64);
        let (wx0, wx1) = common::linear_weight(x - x0 as f64);

        let v00 = data[y0 * nx + x0];
        let v01 = data[y0 * nx + x1];
        let v10 = data[y1 * nx + x0];
        let v11 = data[y1 * nx + x1];

        // NaN corners poison the result, matching missing-data semantics
        let value = (v00 as f64 * wy0 * wx0)
            + (v01 as f64 * wy0 * wx1)
            + (v10 as f64 * wy1 * wx0)
            + (v11 as f64 * wy1 * wx1);
        Ok(value as f32)
    }

    fn name(&self) -> &str {
        "bilinear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilinear_exact_points() {
        let data = vec![
            1.0, 2.0, //
            3.0, 4.0,
        ];
        let shape = vec![2, 2];
        let interpolator = BilinearInterpolator;

        assert_eq!(
            interpolator
                .interpolate(&data, &shape, &[0.0, 0.0])
                .unwrap(),
            1.0
        );
        assert_eq!(
            interpolator
                .interpolate(&data, &shape, &[1.0, 1.0])
                .unwrap(),
            4.0
        );
    }

    #[test]
    fn test_bilinear_midpoint() {
        let data = vec![
            0.0, 2.0, //
            2.0, 4.0,
        ];
        let shape = vec![2, 2];
        let interpolator = BilinearInterpolator;

        let value = interpolator
            .interpolate(&data, &shape, &[0.5, 0.5])
            .unwrap();
        assert!((value - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_bilinear_clamps_out_of_range() {
        let data = vec![
            1.0, 2.0, //
            3.0, 4.0,
        ];
        let shape = vec![2, 2];
        let interpolator = BilinearInterpolator;

        assert_eq!(
            interpolator
                .interpolate(&data, &shape, &[-0.5, -0.5])
                .unwrap(),
            1.0
        );
        assert_eq!(
            interpolator
                .interpolate(&data, &shape, &[5.0, 5.0])
                .unwrap(),
            4.0
        );
    }

    #[test]
    fn test_bilinear_rejects_1d() {
        let interpolator = BilinearInterpolator;
        assert!(interpolator.interpolate(&[1.0, 2.0], &[2], &[0.5]).is_err());
    }
}
