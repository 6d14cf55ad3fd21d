//! Discrete palette derivation for level-binned fills.
//!
//! A filled-contour plot with N levels paints N+1 bins (below the first
//! level, between each pair, above the last). This module samples a
//! continuous colormap into one color per bin, honoring the colorbar
//! color-spacing setting.

use super::colormap::Colormap;

/// How bin colors are positioned along the colormap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpacing {
    /// Colors positioned by the level values themselves, so uneven level
    /// spacing shows as uneven color steps
    Natural,
    /// Colors positioned by bin index, evenly spaced regardless of the
    /// level values
    Equal,
}

/// Sample one color per level bin from a continuous colormap.
///
/// Returns `levels.len() + 1` colors. Empty level lists yield a single
/// mid-colormap color.
pub fn discrete_palette(
    colormap: &dyn Colormap,
    levels: &[f32],
    spacing: ColorSpacing,
) -> Vec<[u8; 4]> {
    let bins = levels.len() + 1;
    if levels.is_empty() {
        return vec![colormap.map_normalized(0.5)];
    }

    match spacing {
        ColorSpacing::Equal => (0..bins)
            .map(|i| colormap.map_normalized((i as f32 + 0.5) / bins as f32))
            .collect(),
        ColorSpacing::Natural => {
            let first = levels[0];
            let last = levels[levels.len() - 1];
            // Extend the range by one mean interval on each end so the
            // open-ended bins get positions too
            let step = if levels.len() > 1 {
                (last - first) / (levels.len() - 1) as f32
            } else {
                1.0
            };
            let lo = first - step;
            let hi = last + step;
            let span = hi - lo;
            (0..bins)
                .map(|i| {
                    let bin_lo = if i == 0 { lo } else { levels[i - 1] };
                    let bin_hi = if i == levels.len() { hi } else { levels[i] };
                    let mid = (bin_lo + bin_hi) / 2.0;
                    colormap.map_normalized((mid - lo) / span)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::get_colormap;

    #[test]
    fn test_palette_has_one_more_color_than_levels() {
        let cmap = get_colormap("viridis").unwrap();
        let levels = [0.0, 1.0, 2.0, 3.0];
        let palette = discrete_palette(cmap.as_ref(), &levels, ColorSpacing::Equal);
        assert_eq!(palette.len(), 5);
    }

    #[test]
    fn test_equal_spacing_spans_colormap() {
        let cmap = get_colormap("viridis").unwrap();
        let palette = discrete_palette(cmap.as_ref(), &[0.0, 10.0], ColorSpacing::Equal);
        assert_eq!(palette[0], cmap.map_normalized(0.5 / 3.0));
        assert_eq!(palette[2], cmap.map_normalized(2.5 / 3.0));
    }

    #[test]
    fn test_natural_spacing_follows_level_values() {
        let cmap = get_colormap("viridis").unwrap();
        // Levels crowded at the low end: natural spacing pushes the last
        // bin's color far along the map
        let palette = discrete_palette(cmap.as_ref(), &[0.0, 1.0, 10.0], ColorSpacing::Natural);
        assert_eq!(palette.len(), 4);
        assert_ne!(
            palette,
            discrete_palette(cmap.as_ref(), &[0.0, 1.0, 10.0], ColorSpacing::Equal)
        );
    }

    #[test]
    fn test_empty_levels_yield_single_color() {
        let cmap = get_colormap("viridis").unwrap();
        let palette = discrete_palette(cmap.as_ref(), &[], ColorSpacing::Natural);
        assert_eq!(palette.len(), 1);
    }
}
