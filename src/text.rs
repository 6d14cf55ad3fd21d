//! Vector text rendering.
//!
//! Titles, gridline labels, contour labels and colorbar ticks are drawn
//! with a small stroke font: each glyph is a set of line segments in a
//! normalized box, scaled and rotated at draw time. No font files.
//!
//! Glyph coverage is digits, uppercase letters and basic punctuation;
//! lowercase input is mapped to uppercase, unknown characters advance the
//! cursor without ink.

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// A glyph segment in a box spanning x, y in [-0.5, 0.5], y increasing
/// downward (so -0.5 is the top of the glyph).
type Seg = ((f32, f32), (f32, f32));

fn glyph_segments(ch: char) -> &'static [Seg] {
    match ch {
        '0' | 'O' => &[
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.5)),
            ((0.5, 0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (-0.5, -0.5)),
        ],
        '1' => &[((0.0, -0.5), (0.0, 0.5)), ((-0.25, -0.25), (0.0, -0.5))],
        '2' => &[
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.0)),
            ((0.5, 0.0), (-0.5, 0.0)),
            ((-0.5, 0.0), (-0.5, 0.5)),
            ((-0.5, 0.5), (0.5, 0.5)),
        ],
        '3' => &[
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.5)),
            ((0.5, 0.5), (-0.5, 0.5)),
            ((-0.5, 0.0), (0.5, 0.0)),
        ],
        '4' => &[
            ((-0.5, -0.5), (-0.5, 0.0)),
            ((-0.5, 0.0), (0.5, 0.0)),
            ((0.5, -0.5), (0.5, 0.5)),
        ],
        '5' | 'S' => &[
            ((0.5, -0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (-0.5, 0.0)),
            ((-0.5, 0.0), (0.5, 0.0)),
            ((0.5, 0.0), (0.5, 0.5)),
            ((0.5, 0.5), (-0.5, 0.5)),
        ],
        '6' => &[
            ((0.5, -0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (0.5, 0.5)),
            ((0.5, 0.5), (0.5, 0.0)),
            ((0.5, 0.0), (-0.5, 0.0)),
        ],
        '7' => &[((-0.5, -0.5), (0.5, -0.5)), ((0.5, -0.5), (0.0, 0.5))],
        '8' | 'B' => &[
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.5)),
            ((0.5, 0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (-0.5, -0.5)),
            ((-0.5, 0.0), (0.5, 0.0)),
        ],
        '9' => &[
            ((-0.5, 0.0), (0.5, 0.0)),
            ((0.5, 0.0), (0.5, -0.5)),
            ((0.5, -0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (-0.5, 0.0)),
            ((0.5, 0.0), (0.5, 0.5)),
        ],
        'A' => &[
            ((-0.5, 0.5), (0.0, -0.5)),
            ((0.0, -0.5), (0.5, 0.5)),
            ((-0.25, 0.1), (0.25, 0.1)),
        ],
        'C' => &[
            ((0.5, -0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (0.5, 0.5)),
        ],
        'D' => &[
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, -0.5), (0.25, -0.5)),
            ((0.25, -0.5), (0.5, -0.25)),
            ((0.5, -0.25), (0.5, 0.25)),
            ((0.5, 0.25), (0.25, 0.5)),
            ((0.25, 0.5), (-0.5, 0.5)),
        ],
        'E' => &[
            ((0.5, -0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (0.5, 0.5)),
            ((-0.5, 0.0), (0.25, 0.0)),
        ],
        'F' => &[
            ((0.5, -0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.0), (0.25, 0.0)),
        ],
        'G' => &[
            ((0.5, -0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (0.5, 0.5)),
            ((0.5, 0.5), (0.5, 0.0)),
            ((0.5, 0.0), (0.1, 0.0)),
        ],
        'H' => &[
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((0.5, -0.5), (0.5, 0.5)),
            ((-0.5, 0.0), (0.5, 0.0)),
        ],
        'I' => &[
            ((0.0, -0.5), (0.0, 0.5)),
            ((-0.25, -0.5), (0.25, -0.5)),
            ((-0.25, 0.5), (0.25, 0.5)),
        ],
        'J' => &[
            ((0.5, -0.5), (0.5, 0.25)),
            ((0.5, 0.25), (0.25, 0.5)),
            ((0.25, 0.5), (-0.25, 0.5)),
            ((-0.25, 0.5), (-0.5, 0.25)),
        ],
        'K' => &[
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.0), (0.5, -0.5)),
            ((-0.5, 0.0), (0.5, 0.5)),
        ],
        'L' => &[((-0.5, -0.5), (-0.5, 0.5)), ((-0.5, 0.5), (0.5, 0.5))],
        'M' => &[
            ((-0.5, 0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (0.0, 0.0)),
            ((0.0, 0.0), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.5)),
        ],
        'N' => &[
            ((-0.5, 0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (0.5, 0.5)),
            ((0.5, 0.5), (0.5, -0.5)),
        ],
        'P' => &[
            ((-0.5, 0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.0)),
            ((0.5, 0.0), (-0.5, 0.0)),
        ],
        'Q' => &[
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.5)),
            ((0.5, 0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (-0.5, -0.5)),
            ((0.1, 0.1), (0.5, 0.5)),
        ],
        'R' => &[
            ((-0.5, 0.5), (-0.5, -0.5)),
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (0.5, 0.0)),
            ((0.5, 0.0), (-0.5, 0.0)),
            ((0.0, 0.0), (0.5, 0.5)),
        ],
        'T' => &[((-0.5, -0.5), (0.5, -0.5)), ((0.0, -0.5), (0.0, 0.5))],
        'U' => &[
            ((-0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (0.5, 0.5)),
            ((0.5, 0.5), (0.5, -0.5)),
        ],
        'V' => &[((-0.5, -0.5), (0.0, 0.5)), ((0.0, 0.5), (0.5, -0.5))],
        'W' => &[
            ((-0.5, -0.5), (-0.25, 0.5)),
            ((-0.25, 0.5), (0.0, 0.0)),
            ((0.0, 0.0), (0.25, 0.5)),
            ((0.25, 0.5), (0.5, -0.5)),
        ],
        'X' => &[((-0.5, -0.5), (0.5, 0.5)), ((-0.5, 0.5), (0.5, -0.5))],
        'Y' => &[
            ((-0.5, -0.5), (0.0, 0.0)),
            ((0.5, -0.5), (0.0, 0.0)),
            ((0.0, 0.0), (0.0, 0.5)),
        ],
        'Z' => &[
            ((-0.5, -0.5), (0.5, -0.5)),
            ((0.5, -0.5), (-0.5, 0.5)),
            ((-0.5, 0.5), (0.5, 0.5)),
        ],
        '-' => &[((-0.4, 0.0), (0.4, 0.0))],
        '+' => &[((-0.4, 0.0), (0.4, 0.0)), ((0.0, -0.4), (0.0, 0.4))],
        '.' => &[((0.0, 0.4), (0.0, 0.5))],
        ',' => &[((0.05, 0.35), (-0.05, 0.55))],
        ':' => &[((0.0, -0.25), (0.0, -0.15)), ((0.0, 0.15), (0.0, 0.25))],
        '/' => &[((-0.4, 0.5), (0.4, -0.5))],
        '%' => &[
            ((-0.4, 0.5), (0.4, -0.5)),
            ((-0.45, -0.45), (-0.2, -0.2)),
            ((0.2, 0.2), (0.45, 0.45)),
        ],
        '(' => &[
            ((0.2, -0.5), (-0.1, -0.2)),
            ((-0.1, -0.2), (-0.1, 0.2)),
            ((-0.1, 0.2), (0.2, 0.5)),
        ],
        ')' => &[
            ((-0.2, -0.5), (0.1, -0.2)),
            ((0.1, -0.2), (0.1, 0.2)),
            ((0.1, 0.2), (-0.2, 0.5)),
        ],
        _ => &[],
    }
}

/// Horizontal advance per character, as a fraction of the font size.
const CHAR_ADVANCE: f32 = 0.7;
/// Glyph box width as a fraction of the font size.
const CHAR_WIDTH: f32 = 0.55;

/// Width in pixels of a rendered string.
pub fn text_width(text: &str, size: f32) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    text.chars().count() as f32 * CHAR_ADVANCE * size - (CHAR_ADVANCE - CHAR_WIDTH) * size
}

/// Draw a string centered at `(x, y)` and rotated by `angle` radians.
pub fn draw_text_rotated(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    angle: f32,
    text: &str,
    size: f32,
    color: [u8; 4],
) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: (size * 0.12).max(1.0),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let rotate = |px: f32, py: f32| -> (f32, f32) {
        (px * cos_a - py * sin_a + x, px * sin_a + py * cos_a + y)
    };

    let total = text_width(text, size);
    let mut pen = -total / 2.0 + CHAR_WIDTH * size / 2.0;

    for ch in text.chars() {
        let glyph = glyph_segments(ch.to_ascii_uppercase());
        for &((x1, y1), (x2, y2)) in glyph {
            let (sx, sy) = (pen + x1 * CHAR_WIDTH * size, y1 * size);
            let (ex, ey) = (pen + x2 * CHAR_WIDTH * size, y2 * size);
            let (rx1, ry1) = rotate(sx, sy);
            let (rx2, ry2) = rotate(ex, ey);

            let mut pb = PathBuilder::new();
            pb.move_to(rx1, ry1);
            pb.line_to(rx2, ry2);
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        pen += CHAR_ADVANCE * size;
    }
}

/// Draw a string centered at `(x, y)`.
pub fn draw_text(pixmap: &mut Pixmap, x: f32, y: f32, text: &str, size: f32, color: [u8; 4]) {
    draw_text_rotated(pixmap, x, y, 0.0, text, size, color);
}

/// Draw a label with a translucent white backing box, for text placed over
/// line work (contour labels).
pub fn draw_label(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    angle: f32,
    text: &str,
    size: f32,
    color: [u8; 4],
) {
    use tiny_skia::FillRule;

    let pad = size * 0.25;
    let half_w = text_width(text, size) / 2.0 + pad;
    let half_h = size / 2.0 + pad;

    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let corners = [
        (-half_w, -half_h),
        (half_w, -half_h),
        (half_w, half_h),
        (-half_w, half_h),
    ];

    let mut pb = PathBuilder::new();
    for (i, (cx, cy)) in corners.iter().enumerate() {
        let rx = cx * cos_a - cy * sin_a + x;
        let ry = cx * sin_a + cy * cos_a + y;
        if i == 0 {
            pb.move_to(rx, ry);
        } else {
            pb.line_to(rx, ry);
        }
    }
    pb.close();

    let mut bg_paint = Paint::default();
    bg_paint.set_color_rgba8(255, 255, 255, 220);
    bg_paint.anti_alias = true;

    if let Some(path) = pb.finish() {
        pixmap.fill_path(&path, &bg_paint, FillRule::Winding, Transform::identity(), None);
    }

    draw_text_rotated(pixmap, x, y, angle, text, size, color);
}
