//! Per-map rendering surface.
//!
//! Each map owns its own canvas layers; nothing is shared between map
//! instances. A canvas wraps a `tiny-skia` pixmap for antialiased path
//! work and converts to an `image` buffer for raster export.

use image::RgbaImage;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Rect, Stroke, Transform,
};

use crate::error::{GeoplotError, Result};

/// An RGBA drawing surface.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// A canvas filled with opaque white.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut canvas = Self::transparent(width, height)?;
        canvas.pixmap.fill(Color::WHITE);
        Ok(canvas)
    }

    /// A fully transparent canvas, for overlay layers.
    pub fn transparent(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| GeoplotError::Render {
            message: format!("Cannot allocate a {}x{} canvas", width, height),
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Access the underlying pixmap, for text rendering.
    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
        let rect = match Rect::from_xywh(x, y, w, h) {
            Some(r) => r,
            None => return,
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Stroke the outline of an axis-aligned rectangle.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: [u8; 4]) {
        let points = [
            (x, y),
            (x + w, y),
            (x + w, y + h),
            (x, y + h),
            (x, y),
        ];
        self.stroke_polyline(&points, width, color);
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, color: [u8; 4]) {
        if points.len() < 2 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            pb.line_to(x, y);
        }
        let path = match pb.finish() {
            Some(p) => p,
            None => return,
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = true;

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Fill a closed polygon.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: [u8; 4]) {
        if points.len() < 3 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            pb.line_to(x, y);
        }
        pb.close();
        let path = match pb.finish() {
            Some(p) => p,
            None => return,
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Source-over blend a single pixel. Used by the filled-contour
    /// renderer, where per-pixel path operations would be far too slow.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }
        let idx = (y * self.pixmap.width() + x) as usize;
        let dst = self.pixmap.pixels()[idx];

        let sa = color[3] as u32;
        let inv = 255 - sa;
        // Premultiply the source, then source-over composite
        let blend = |sc: u8, dc: u8| -> u8 {
            ((sc as u32 * sa + dc as u32 * inv + 127) / 255) as u8
        };
        let r = blend(color[0], dst.red());
        let g = blend(color[1], dst.green());
        let b = blend(color[2], dst.blue());
        let a = (sa + (dst.alpha() as u32 * inv + 127) / 255).min(255) as u8;

        if let Some(px) = PremultipliedColorU8::from_rgba(r.min(a), g.min(a), b.min(a), a) {
            self.pixmap.pixels_mut()[idx] = px;
        }
    }

    /// Composite another canvas over this one.
    pub fn composite(&mut self, other: &Canvas) {
        self.pixmap.draw_pixmap(
            0,
            0,
            other.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Convert to a straight-alpha `image` buffer.
    pub fn to_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let pixels = self.pixmap.pixels();
        RgbaImage::from_fn(width, height, |x, y| {
            let px = pixels[(y * width + x) as usize].demultiply();
            image::Rgba([px.red(), px.green(), px.blue(), px.alpha()])
        })
    }
}
