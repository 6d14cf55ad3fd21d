//! Bicubic interpolation.
//!
//! Catmull-Rom interpolation over a 4x4 neighborhood. Used when upsampling
//! coarse grids onto large canvases, where bilinear sampling leaves visible
//! facets.

use super::Interpolator;
use crate::error::{GeoplotError, Result};
use crate::interpolation::common;

/// Bicubic (Catmull-Rom) interpolator
pub struct BicubicInterpolator;

/// One-dimensional Catmull-Rom spline through four samples
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

impl Interpolator for BicubicInterpolator {
    fn interpolate(&self, data: &[f32], shape: &[usize], indices: &[f64]) -> Result<f32> {
        if shape.len() != 2 || indices.len() != 2 {
            return Err(GeoplotError::InvalidParameter {
                param: "indices".to_string(),
                message: format!(
                    "Bicubic interpolation requires 2 dimensions, got shape {:?} and {} indices",
                    shape,
                    indices.len()
                ),
            });
        }
        let (ny, nx) = (shape[0], shape[1]);
        let y = common::clamp_index(indices[0], ny);
        let x = common::clamp_index(indices[1], nx);

        let y1 = y.floor() as i64;
        let x1 = x.floor() as i64;
        let ty = y - y1 as f64;
        let tx = x - x1 as f64;

        let sample = |j: i64, i: i64| -> f64 {
            let j = j.clamp(0, ny as i64 - 1) as usize;
            let i = i.clamp(0, nx as i64 - 1) as usize;
            data[j * nx + i] as f64
        };

        let mut cols = [0.0f64; 4];
        for (k, col) in cols.iter_mut().enumerate() {
            let j = y1 - 1 + k as i64;
            *col = catmull_rom(
                sample(j, x1 - 1),
                sample(j, x1),
                sample(j, x1 + 1),
                sample(j, x1 + 2),
                tx,
            );
        }
        Ok(catmull_rom(cols[0], cols[1], cols[2], cols[3], ty) as f32)
    }

    fn name(&self) -> &str {
        "bicubic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bicubic_exact_points() {
        let data = vec![
            1.0, 2.0, 3.0, //
            4.0, 5.0, 6.0, //
            7.0, 8.0, 9.0,
        ];
        let shape = vec![3, 3];
        let interpolator = BicubicInterpolator;

        let value = interpolator
            .interpolate(&data, &shape, &[1.0, 1.0])
            .unwrap();
        assert!((value - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_bicubic_reproduces_linear_ramp() {
        // Catmull-Rom is exact for linear data
        let data = vec![
            0.0, 1.0, 2.0, 3.0, //
            0.0, 1.0, 2.0, 3.0, //
            0.0, 1.0, 2.0, 3.0, //
            0.0, 1.0, 2.0, 3.0,
        ];
        let shape = vec![4, 4];
        let interpolator = BicubicInterpolator;

        let value = interpolator
            .interpolate(&data, &shape, &[1.5, 1.5])
            .unwrap();
        assert!((value - 1.5).abs() < 1e-6, "value = {}", value);
    }

    #[test]
    fn test_bicubic_rejects_1d() {
        let interpolator = BicubicInterpolator;
        assert!(interpolator.interpolate(&[1.0, 2.0], &[2], &[0.5]).is_err());
    }
}
