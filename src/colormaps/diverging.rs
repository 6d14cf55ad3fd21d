//! Diverging colormaps (two-direction progression around a midpoint).
//!
//! These colormaps are suitable for anomaly-style data with a meaningful
//! center, such as temperature departures from normal.

use super::colormap::GradientColormap;
use crate::error::{GeoplotError, Result};

/// Coolwarm colormap - smooth blue-to-red through a neutral gray
pub fn coolwarm() -> Result<GradientColormap> {
    let gradient = colorgrad::CustomGradient::new()
        .html_colors(&["#3b4cc0", "#dddddd", "#b40426"])
        .build()
        .map_err(|e| GeoplotError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Failed to build coolwarm gradient: {}", e),
        })?;
    Ok(GradientColormap::new("coolwarm", gradient))
}

/// RdBu colormap - red-to-blue brewer palette
pub fn rdbu() -> GradientColormap {
    GradientColormap::new("rdbu", colorgrad::rd_bu())
}

/// Seismic colormap - dark blue through white to dark red
pub fn seismic() -> Result<GradientColormap> {
    let gradient = colorgrad::CustomGradient::new()
        .html_colors(&["#00004c", "#0000ff", "#ffffff", "#ff0000", "#7f0000"])
        .build()
        .map_err(|e| GeoplotError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Failed to build seismic gradient: {}", e),
        })?;
    Ok(GradientColormap::new("seismic", gradient))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::Colormap;

    #[test]
    fn test_seismic_midpoint_is_white() {
        let cmap = seismic().unwrap();
        let [r, g, b, _] = cmap.map_normalized(0.5);
        assert!(r > 240 && g > 240 && b > 240, "got [{}, {}, {}]", r, g, b);
    }

    #[test]
    fn test_coolwarm_ends_diverge() {
        let cmap = coolwarm().unwrap();
        let low = cmap.map_normalized(0.0);
        let high = cmap.map_normalized(1.0);
        // Blue end vs red end
        assert!(low[2] > low[0]);
        assert!(high[0] > high[2]);
    }
}
