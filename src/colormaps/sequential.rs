//! Sequential colormaps (single-direction progression).
//!
//! These colormaps are suitable for data that progresses from low to high.

use super::colormap::GradientColormap;

/// Viridis colormap - perceptually uniform, colorblind-friendly
pub fn viridis() -> GradientColormap {
    GradientColormap::new("viridis", colorgrad::viridis())
}

/// Plasma colormap
pub fn plasma() -> GradientColormap {
    GradientColormap::new("plasma", colorgrad::plasma())
}

/// Inferno colormap
pub fn inferno() -> GradientColormap {
    GradientColormap::new("inferno", colorgrad::inferno())
}

/// Magma colormap
pub fn magma() -> GradientColormap {
    GradientColormap::new("magma", colorgrad::magma())
}

/// Cividis colormap - colorblind-friendly alternative to viridis
pub fn cividis() -> GradientColormap {
    GradientColormap::new("cividis", colorgrad::cividis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::Colormap;

    #[test]
    fn test_viridis_endpoints_are_opaque() {
        let cmap = viridis();
        assert_eq!(cmap.map_normalized(0.0)[3], 255);
        assert_eq!(cmap.map_normalized(1.0)[3], 255);
    }

    #[test]
    fn test_values_clamp_outside_unit_range() {
        let cmap = plasma();
        assert_eq!(cmap.map_normalized(-0.5), cmap.map_normalized(0.0));
        assert_eq!(cmap.map_normalized(1.5), cmap.map_normalized(1.0));
    }
}
