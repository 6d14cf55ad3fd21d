//! Colormap trait and registry.
//!
//! This module defines the common interface for all colormaps.

use crate::error::{GeoplotError, Result};

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f32, min: f32, max: f32) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// A colormap backed by a `colorgrad` gradient
pub struct GradientColormap {
    name: &'static str,
    gradient: colorgrad::Gradient,
}

impl GradientColormap {
    pub fn new(name: &'static str, gradient: colorgrad::Gradient) -> Self {
        Self { name, gradient }
    }
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        self.gradient.at(value.clamp(0.0, 1.0) as f64).to_rgba8()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    use super::{diverging, sequential};

    match name.to_lowercase().as_str() {
        "viridis" => Ok(Box::new(sequential::viridis())),
        "plasma" => Ok(Box::new(sequential::plasma())),
        "inferno" => Ok(Box::new(sequential::inferno())),
        "magma" => Ok(Box::new(sequential::magma())),
        "cividis" => Ok(Box::new(sequential::cividis())),
        "coolwarm" => Ok(Box::new(diverging::coolwarm()?)),
        "rdbu" => Ok(Box::new(diverging::rdbu())),
        "seismic" => Ok(Box::new(diverging::seismic()?)),
        _ => Err(GeoplotError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}
