//! Colormap implementations for filled-contour rendering.
//!
//! This module provides matplotlib-inspired colormaps, backed by the
//! `colorgrad` gradient library, plus discrete palette derivation for
//! level-binned fills and colorbars.

pub mod colormap;
pub mod diverging;
pub mod palette;
pub mod sequential;

pub use colormap::{get_colormap, Colormap, GradientColormap};
pub use palette::{discrete_palette, ColorSpacing};
