//! Field objects.
//!
//! A [`Field`] couples a gridded data array with the display hints used
//! when it is plotted on a map: contour levels, contour colors and labels,
//! smoothing, and fill options. It is a plain value object; dimensionality
//! is validated when the field is plotted, not at construction.

use std::fmt;

use ndarray::{Array1, Array2, ArrayD};

use crate::geogrid::GeoGrid;

/// Contour levels for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Levels {
    /// Derive levels from the finite data range
    Auto,
    /// Use exactly these levels, in ascending order
    Explicit(Vec<f32>),
}

/// Line-contour color selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContourColors {
    /// Black lines
    Auto,
    /// A single fixed RGBA color for every level
    Fixed([u8; 4]),
}

/// Filled-contour color selection.
#[derive(Debug, Clone, PartialEq)]
pub enum FillColors {
    /// Derive a discrete palette from a named colormap
    Auto { colormap: String },
    /// One RGBA color per level bin (`levels + 1` entries expected)
    Palette(Vec<[u8; 4]>),
}

impl FillColors {
    /// The default automatic fill palette.
    pub fn auto() -> Self {
        FillColors::Auto {
            colormap: "viridis".to_string(),
        }
    }
}

/// Gridded data plus rendering hints.
#[derive(Debug, Clone)]
pub struct Field {
    /// 1-D (flattened, `num_y * num_x`) or 2-D (`num_y x num_x`) data
    pub data: ArrayD<f32>,
    /// The grid locating the data on the Earth
    pub geogrid: GeoGrid,
    /// Contour levels
    pub levels: Levels,
    /// Line-contour colors
    pub contour_colors: ContourColors,
    /// Whether contour lines are labelled with their level values
    pub contour_labels: bool,
    /// Gaussian smoothing sigma in grid cells; 0 disables smoothing
    pub smoothing_factor: f32,
    /// Fill colors; `None` selects line contours instead of filled ones
    pub fill_colors: Option<FillColors>,
    /// Fill opacity in `[0, 1]`
    pub fill_alpha: f32,
}

impl Field {
    /// Create a field with default rendering hints (auto levels, auto
    /// colors, no labels, no smoothing, filled with the default colormap).
    pub fn new(data: ArrayD<f32>, geogrid: GeoGrid) -> Self {
        Self {
            data,
            geogrid,
            levels: Levels::Auto,
            contour_colors: ContourColors::Auto,
            contour_labels: false,
            smoothing_factor: 0.0,
            fill_colors: Some(FillColors::auto()),
            fill_alpha: 1.0,
        }
    }

    /// Create a field from a flattened 1-D array.
    pub fn from_1d(data: Array1<f32>, geogrid: GeoGrid) -> Self {
        Self::new(data.into_dyn(), geogrid)
    }

    /// Create a field from a 2-D array.
    pub fn from_2d(data: Array2<f32>, geogrid: GeoGrid) -> Self {
        Self::new(data.into_dyn(), geogrid)
    }

    pub fn with_levels(mut self, levels: Vec<f32>) -> Self {
        self.levels = Levels::Explicit(levels);
        self
    }

    pub fn with_contour_colors(mut self, colors: ContourColors) -> Self {
        self.contour_colors = colors;
        self
    }

    pub fn with_contour_labels(mut self, labels: bool) -> Self {
        self.contour_labels = labels;
        self
    }

    pub fn with_smoothing(mut self, sigma: f32) -> Self {
        self.smoothing_factor = sigma;
        self
    }

    pub fn with_fill_colors(mut self, fill: Option<FillColors>) -> Self {
        self.fill_colors = fill;
        self
    }

    pub fn with_fill_alpha(mut self, alpha: f32) -> Self {
        self.fill_alpha = alpha;
        self
    }

    /// The finite `(min, max)` of the data, if any values are finite.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in self.data.iter() {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min <= max {
            Some((min, max))
        } else {
            None
        }
    }
}

/// Number of leading values shown in the `Display` summary.
const DISPLAY_VALUES: usize = 4;

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field: shape {:?}, data [", self.data.shape())?;
        for (i, v) in self.data.iter().take(DISPLAY_VALUES).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        if self.data.len() > DISPLAY_VALUES {
            write!(f, ", ...")?;
        }
        write!(
            f,
            "], grid {}x{}, smoothing {}",
            self.geogrid.num_y(),
            self.geogrid.num_x(),
            self.smoothing_factor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn small_grid() -> GeoGrid {
        GeoGrid::regular(0.0, 10.0, 0.0, 10.0, 5.0).unwrap()
    }

    #[test]
    fn test_defaults_match_original_signature() {
        let field = Field::from_1d(Array1::zeros(9), small_grid());
        assert_eq!(field.levels, Levels::Auto);
        assert_eq!(field.contour_colors, ContourColors::Auto);
        assert!(!field.contour_labels);
        assert_eq!(field.smoothing_factor, 0.0);
        assert_eq!(field.fill_colors, Some(FillColors::auto()));
        assert_eq!(field.fill_alpha, 1.0);
    }

    #[test]
    fn test_no_validation_at_construction() {
        // A length mismatch is accepted here; Map::plot rejects it
        let field = Field::from_1d(Array1::zeros(7), small_grid());
        assert_eq!(field.data.len(), 7);
    }

    #[test]
    fn test_finite_range_ignores_nan() {
        let data = Array1::from(vec![f32::NAN, 1.0, 3.0, f32::NAN]);
        let field = Field::from_1d(data, small_grid());
        assert_eq!(field.finite_range(), Some((1.0, 3.0)));

        let all_nan = Array1::from(vec![f32::NAN; 4]);
        let field = Field::from_1d(all_nan, small_grid());
        assert_eq!(field.finite_range(), None);
    }

    #[test]
    fn test_display_truncates_values() {
        let data = Array1::from((0..100).map(|i| i as f32).collect::<Vec<_>>());
        let field = Field::from_1d(data, small_grid());
        let summary = field.to_string();
        assert!(summary.contains("..."));
        assert!(summary.len() < 200);
    }
}
