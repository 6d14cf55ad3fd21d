//! Raw grid data loading.
//!
//! Fields are commonly stored as flat binary files of little-endian 32-bit
//! floats, one value per grid point. This module reads those into `ndarray`
//! arrays, optionally reshaping against a grid definition.

use std::path::Path;

use ndarray::{Array1, Array2};
use tracing::{debug, info};

use crate::error::{GeoplotError, Result};
use crate::geogrid::GeoGrid;

/// Load a flat binary file of little-endian f32 values.
pub fn load_f32_bin(path: &Path) -> Result<Array1<f32>> {
    if !path.exists() {
        return Err(GeoplotError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let bytes = std::fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(GeoplotError::InvalidParameter {
            param: "data_file".to_string(),
            message: format!(
                "{} is {} bytes, not a whole number of f32 values",
                path.display(),
                bytes.len()
            ),
        });
    }

    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    info!(
        path = %path.display(),
        values = values.len(),
        "Loaded binary grid data"
    );
    Ok(Array1::from(values))
}

/// Load a flat binary file and reshape it against a grid definition.
pub fn load_f32_grid(path: &Path, geogrid: &GeoGrid) -> Result<Array2<f32>> {
    let flat = load_f32_bin(path)?;
    let (num_y, num_x) = (geogrid.num_y(), geogrid.num_x());
    if flat.len() != num_y * num_x {
        return Err(GeoplotError::InvalidFieldDimension {
            message: format!(
                "{} holds {} values but the grid is {}x{} ({} points)",
                path.display(),
                flat.len(),
                num_y,
                num_x,
                num_y * num_x
            ),
        });
    }
    debug!(num_y = num_y, num_x = num_x, "Reshaped grid data");
    let values = flat.to_vec();
    Array2::from_shape_vec((num_y, num_x), values).map_err(|e| {
        GeoplotError::InvalidFieldDimension {
            message: format!("Cannot reshape data to {}x{}: {}", num_y, num_x, e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_f32s(values: &[f32]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for v in values {
            file.write_all(&v.to_le_bytes()).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_f32_bin_roundtrip() {
        let file = write_f32s(&[1.5, -2.25, 1013.25]);
        let data = load_f32_bin(file.path()).unwrap();
        assert_eq!(data.to_vec(), vec![1.5, -2.25, 1013.25]);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_f32_bin(Path::new("/nonexistent/file.bin")).is_err());
    }

    #[test]
    fn test_load_rejects_ragged_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8, 1, 2]).unwrap();
        file.flush().unwrap();
        assert!(load_f32_bin(file.path()).is_err());
    }

    #[test]
    fn test_load_f32_grid_checks_size() {
        let grid = GeoGrid::regular(0.0, 10.0, 0.0, 10.0, 5.0).unwrap();
        // 3x3 grid needs 9 values
        let file = write_f32s(&[0.0; 9]);
        let data = load_f32_grid(file.path(), &grid).unwrap();
        assert_eq!(data.dim(), (3, 3));

        let short = write_f32s(&[0.0; 5]);
        assert!(load_f32_grid(short.path(), &grid).is_err());
    }
}
