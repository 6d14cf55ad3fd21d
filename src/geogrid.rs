//! Geographic grid definitions.
//!
//! A [`GeoGrid`] supplies the ordered latitude/longitude coordinate arrays
//! and dimensions that tie a flat data array to positions on the Earth.
//! Fields carry a grid; maps query it when sampling data for rendering.

use crate::error::{GeoplotError, Result};

/// An ordered, regular or irregular latitude/longitude grid.
///
/// Coordinates must be strictly monotonic. Latitudes are in degrees north,
/// longitudes in degrees east (either -180..180 or 0..360 conventions work;
/// the map transform normalizes longitudes into its own frame).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl GeoGrid {
    /// Create a grid from explicit coordinate arrays.
    pub fn new(lats: Vec<f64>, lons: Vec<f64>) -> Result<Self> {
        if lats.len() < 2 || lons.len() < 2 {
            return Err(GeoplotError::InvalidParameter {
                param: "geogrid".to_string(),
                message: format!(
                    "Grid must have at least 2 points per axis, got {} lats and {} lons",
                    lats.len(),
                    lons.len()
                ),
            });
        }
        if !is_strictly_monotonic(&lats) {
            return Err(GeoplotError::InvalidParameter {
                param: "geogrid".to_string(),
                message: "Latitude coordinates must be strictly monotonic".to_string(),
            });
        }
        if !is_strictly_monotonic(&lons) {
            return Err(GeoplotError::InvalidParameter {
                param: "geogrid".to_string(),
                message: "Longitude coordinates must be strictly monotonic".to_string(),
            });
        }
        Ok(Self { lats, lons })
    }

    /// Create a regular grid covering `[lat1, lat2] x [lon1, lon2]` at the
    /// given resolution in degrees, endpoints included.
    pub fn regular(lat1: f64, lat2: f64, lon1: f64, lon2: f64, resolution: f64) -> Result<Self> {
        if resolution <= 0.0 {
            return Err(GeoplotError::InvalidParameter {
                param: "resolution".to_string(),
                message: format!("Grid resolution must be positive, got {}", resolution),
            });
        }
        let lats = coord_steps(lat1, lat2, resolution);
        let lons = coord_steps(lon1, lon2, resolution);
        Self::new(lats, lons)
    }

    /// The global grid at the given resolution in degrees, with latitudes
    /// from -90 to 90 and longitudes from 0 east of Greenwich.
    pub fn global(resolution: f64) -> Result<Self> {
        Self::regular(-90.0, 90.0, 0.0, 360.0 - resolution, resolution)
    }

    /// Latitude coordinates, south-to-north or north-to-south as constructed.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Number of points along the longitude axis.
    pub fn num_x(&self) -> usize {
        self.lons.len()
    }

    /// Number of points along the latitude axis.
    pub fn num_y(&self) -> usize {
        self.lats.len()
    }

    /// `(min, max)` latitude covered by the grid.
    pub fn lat_bounds(&self) -> (f64, f64) {
        min_max(&self.lats)
    }

    /// `(min, max)` longitude covered by the grid.
    pub fn lon_bounds(&self) -> (f64, f64) {
        min_max(&self.lons)
    }
}

fn coord_steps(start: f64, end: f64, step: f64) -> Vec<f64> {
    let n = ((end - start) / step).round() as i64;
    (0..=n.max(0)).map(|i| start + i as f64 * step).collect()
}

fn is_strictly_monotonic(values: &[f64]) -> bool {
    let ascending = values.windows(2).all(|w| w[1] > w[0]);
    let descending = values.windows(2).all(|w| w[1] < w[0]);
    ascending || descending
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_grid_dimensions() {
        let grid = GeoGrid::global(1.0).unwrap();
        assert_eq!(grid.num_y(), 181);
        assert_eq!(grid.num_x(), 360);
        assert_eq!(grid.lat_bounds(), (-90.0, 90.0));
    }

    #[test]
    fn test_regular_grid() {
        let grid = GeoGrid::regular(20.0, 60.0, 230.0, 300.0, 2.5).unwrap();
        assert_eq!(grid.num_y(), 17);
        assert_eq!(grid.num_x(), 29);
        assert_eq!(grid.lats()[0], 20.0);
        assert_eq!(*grid.lats().last().unwrap(), 60.0);
    }

    #[test]
    fn test_rejects_non_monotonic() {
        let result = GeoGrid::new(vec![0.0, 10.0, 5.0], vec![0.0, 1.0, 2.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_resolution() {
        assert!(GeoGrid::regular(0.0, 10.0, 0.0, 10.0, 0.0).is_err());
    }
}
