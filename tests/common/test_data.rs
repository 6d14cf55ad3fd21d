//! Test data generation utilities.
//!
//! Synthetic fields with known patterns, in the flavor of mid-tropospheric
//! height analyses: a meridional gradient with a zonal wave superimposed.

use geoplot::{Field, GeoGrid};
use ndarray::Array1;
use std::f64::consts::PI;

/// A smooth 500 hPa-height-like field on the given grid: values fall off
/// toward the poles and undulate with the given zonal wavenumber.
pub fn wave_field(grid: &GeoGrid, wavenumber: f64) -> Field {
    let mut values = Vec::with_capacity(grid.num_x() * grid.num_y());
    for &lat in grid.lats() {
        for &lon in grid.lons() {
            let lat_rad = lat * PI / 180.0;
            let lon_rad = lon * PI / 180.0;
            let value = 5600.0 - 400.0 * lat_rad.sin().powi(2)
                + 80.0 * (wavenumber * lon_rad).sin() * lat_rad.cos();
            values.push(value as f32);
        }
    }
    Field::from_1d(Array1::from(values), grid.clone())
}

/// A simple linear gradient from the grid's southwest to northeast corner.
pub fn gradient_field(grid: &GeoGrid) -> Field {
    let num_x = grid.num_x();
    let num_y = grid.num_y();
    let mut values = Vec::with_capacity(num_x * num_y);
    for j in 0..num_y {
        for i in 0..num_x {
            let normalized_x = i as f32 / (num_x - 1) as f32;
            let normalized_y = j as f32 / (num_y - 1) as f32;
            values.push((normalized_x + normalized_y) / 2.0);
        }
    }
    Field::from_1d(Array1::from(values), grid.clone())
}
