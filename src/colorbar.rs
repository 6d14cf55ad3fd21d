//! Colorbar rendering.
//!
//! Draws a horizontal colorbar under the map area: one swatch per level
//! bin, tick labels at level boundaries, optional triangular ends for the
//! open-ended bins, and tercile-style section labels.

use crate::canvas::Canvas;
use crate::text;

/// Shape of the first and last colorbar cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbarEnds {
    /// Pointed end cells, signalling open-ended bins
    Triangular,
    /// Plain rectangular end cells
    Rectangular,
}

/// Colorbar labelling style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbarType {
    /// Numeric tick labels at level boundaries
    Normal,
    /// Below / near / above section labels for tercile products
    Tercile,
}

/// Everything needed to draw one colorbar.
pub struct ColorbarSpec<'a> {
    /// One color per level bin (`levels.len() + 1` entries)
    pub palette: &'a [[u8; 4]],
    /// Level boundaries between bins
    pub levels: &'a [f32],
    pub ends: CbarEnds,
    pub kind: CbarType,
    /// Axis label under the ticks; empty string for none
    pub label: &'a str,
    /// Caller-supplied tick labels; must match `levels` in length to be used
    pub tick_labels: Option<&'a [String]>,
    /// Tercile flavor appended to the label in tercile mode
    pub tercile_type: Option<&'a str>,
}

const BAR_HEIGHT: f32 = 14.0;
const TICK_FONT: f32 = 8.0;
const LABEL_FONT: f32 = 9.0;
const FRAME_COLOR: [u8; 4] = [60, 60, 60, 255];

/// Draw a colorbar into `rect` = `(x, y, w, h)` on the canvas.
pub fn draw_colorbar(canvas: &mut Canvas, rect: (f32, f32, f32, f32), spec: &ColorbarSpec) {
    let (x, y, w, _h) = rect;
    let n = spec.palette.len();
    if n == 0 || w <= 0.0 {
        return;
    }

    let cell_w = w / n as f32;
    // A single-bin bar has no interior, so pointed ends degenerate
    let pointed = spec.ends == CbarEnds::Triangular && n > 2;

    for (i, &color) in spec.palette.iter().enumerate() {
        let cx = x + i as f32 * cell_w;
        let pointed_left = pointed && i == 0;
        let pointed_right = pointed && i == n - 1;

        if pointed_left {
            canvas.fill_polygon(
                &[
                    (cx + cell_w, y),
                    (cx + cell_w, y + BAR_HEIGHT),
                    (cx, y + BAR_HEIGHT / 2.0),
                ],
                color,
            );
        } else if pointed_right {
            canvas.fill_polygon(
                &[
                    (cx, y),
                    (cx, y + BAR_HEIGHT),
                    (cx + cell_w, y + BAR_HEIGHT / 2.0),
                ],
                color,
            );
        } else {
            canvas.fill_rect(cx, y, cell_w, BAR_HEIGHT, color);
        }
    }

    // Frame around the rectangular body of the bar
    let body_x = if pointed { x + cell_w } else { x };
    let body_w = if pointed { w - 2.0 * cell_w } else { w };
    canvas.stroke_rect(body_x, y, body_w, BAR_HEIGHT, 0.75, FRAME_COLOR);

    match spec.kind {
        CbarType::Normal => draw_ticks(canvas, x, y, cell_w, spec),
        CbarType::Tercile => draw_tercile_sections(canvas, x, y, w),
    }

    let label = match (spec.kind, spec.tercile_type) {
        (CbarType::Tercile, Some(tercile)) if !spec.label.is_empty() => {
            format!("{} ({})", spec.label, tercile)
        }
        (CbarType::Tercile, Some(tercile)) if spec.label.is_empty() => tercile.to_string(),
        _ => spec.label.to_string(),
    };
    if !label.is_empty() {
        text::draw_text(
            canvas.pixmap_mut(),
            x + w / 2.0,
            y + BAR_HEIGHT + TICK_FONT + LABEL_FONT + 6.0,
            &label,
            LABEL_FONT,
            FRAME_COLOR,
        );
    }
}

fn draw_ticks(canvas: &mut Canvas, x: f32, y: f32, cell_w: f32, spec: &ColorbarSpec) {
    let custom = spec
        .tick_labels
        .filter(|labels| labels.len() == spec.levels.len());

    for (i, &level) in spec.levels.iter().enumerate() {
        let tx = x + (i + 1) as f32 * cell_w;
        canvas.stroke_polyline(
            &[(tx, y + BAR_HEIGHT), (tx, y + BAR_HEIGHT + 3.0)],
            0.75,
            FRAME_COLOR,
        );
        let label = match custom {
            Some(labels) => labels[i].clone(),
            None => format_level(level),
        };
        text::draw_text(
            canvas.pixmap_mut(),
            tx,
            y + BAR_HEIGHT + 4.0 + TICK_FONT / 2.0,
            &label,
            TICK_FONT,
            FRAME_COLOR,
        );
    }
}

fn draw_tercile_sections(canvas: &mut Canvas, x: f32, y: f32, w: f32) {
    let third = w / 3.0;
    for (i, section) in ["BELOW", "NEAR", "ABOVE"].iter().enumerate() {
        text::draw_text(
            canvas.pixmap_mut(),
            x + third * (i as f32 + 0.5),
            y + BAR_HEIGHT + 4.0 + TICK_FONT / 2.0,
            section,
            TICK_FONT,
            FRAME_COLOR,
        );
    }
}

/// Format a level value compactly (no trailing `.0` on integral values).
pub fn format_level(level: f32) -> String {
    if level.fract().abs() < 1e-4 {
        format!("{:.0}", level)
    } else {
        format!("{}", level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn spec<'a>(palette: &'a [[u8; 4]], levels: &'a [f32]) -> ColorbarSpec<'a> {
        ColorbarSpec {
            palette,
            levels,
            ends: CbarEnds::Triangular,
            kind: CbarType::Normal,
            label: "",
            tick_labels: None,
            tercile_type: None,
        }
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(5460.0), "5460");
        assert_eq!(format_level(0.5), "0.5");
        assert_eq!(format_level(-10.0), "-10");
    }

    #[test]
    fn test_colorbar_paints_swatches() {
        let mut canvas = Canvas::new(200, 60).unwrap();
        let palette = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]];
        let levels = [1.0, 2.0];
        draw_colorbar(&mut canvas, (10.0, 10.0, 180.0, 40.0), &spec(&palette, &levels));

        let img = canvas.to_image();
        // Middle swatch is a plain rect; sample its center
        let px = img.get_pixel(100, 17).0;
        assert_eq!(px, [0, 255, 0, 255]);
    }

    #[test]
    fn test_empty_palette_is_noop() {
        let mut canvas = Canvas::new(50, 20).unwrap();
        draw_colorbar(&mut canvas, (0.0, 0.0, 50.0, 20.0), &spec(&[], &[]));
        let img = canvas.to_image();
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
