//! Map objects.
//!
//! A [`Map`] resolves a `(projection, domain)` pair into concrete
//! geographic bounds, owns its rendering surface, and draws fields on it.
//! Construction is eager: if it returns `Ok`, the basemap decorations are
//! already drawn and the map is ready to plot and save. Each map owns its
//! own canvas layers, so multiple maps can coexist without shared state.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::RgbaImage;
use ndarray::Array2;
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::colorbar::{self, CbarEnds, CbarType, ColorbarSpec};
use crate::colormaps::{self, discrete_palette, ColorSpacing};
use crate::contour;
use crate::domain::{resolve_extent, Domain, MapExtent};
use crate::error::{GeoplotError, Result};
use crate::field::{ContourColors, Field, FillColors, Levels};
use crate::interpolation::common::{coord_to_index, gaussian_smooth};
use crate::interpolation::get_interpolator;
use crate::overlay::{self, Polyline};
use crate::projection::{MapTransform, Projection};
use crate::text;

/// Base map-area width in pixels at the reference dpi.
const BASE_MAP_WIDTH: f64 = 720.0;
/// Reference dpi the canvas is rendered at; `save_with_dpi` scales from it.
const BASE_DPI: u32 = 100;

const MARGIN_LEFT: f64 = 55.0;
const MARGIN_RIGHT: f64 = 55.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 45.0;
const CBAR_SPACE: f64 = 55.0;

const MAP_BACKGROUND: [u8; 4] = [221, 221, 221, 255]; // #DDDDDD
const COASTLINE_COLOR: [u8; 4] = [40, 40, 40, 255];
const BORDER_COLOR: [u8; 4] = [90, 90, 90, 255];
const STATE_COLOR: [u8; 4] = [0, 0, 0, 255];
const GRIDLINE_COLOR: [u8; 4] = [130, 130, 130, 160];
const FRAME_COLOR: [u8; 4] = [0, 0, 0, 255];
const LABEL_COLOR: [u8; 4] = [40, 40, 40, 255];

const GRIDLINE_FONT: f32 = 9.0;
const TITLE_FONT: f32 = 13.0;
const CONTOUR_LABEL_FONT: f32 = 8.0;

/// Pixel step of the lattice contours are marched on.
const CONTOUR_LATTICE_STEP: f64 = 2.0;

/// Options controlling map construction.
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub projection: Projection,
    pub domain: Domain,
    /// Whether a colorbar is drawn under filled plots
    pub cbar: bool,
    pub cbar_ends: CbarEnds,
    pub cbar_type: CbarType,
    pub cbar_color_spacing: ColorSpacing,
    pub cbar_label: String,
    /// Caller-supplied tick labels; used when the count matches the levels
    pub cbar_tick_labels: Option<Vec<String>>,
    /// Tercile flavor shown with tercile colorbars
    pub tercile_type: Option<String>,
    pub title: String,
    /// Explicit state-boundary GeoJSON path; falls back to `GEOPLOT_STATES`
    pub states_file: Option<PathBuf>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            projection: Projection::EqualArea,
            domain: Domain::Us,
            cbar: true,
            cbar_ends: CbarEnds::Triangular,
            cbar_type: CbarType::Normal,
            cbar_color_spacing: ColorSpacing::Natural,
            cbar_label: String::new(),
            cbar_tick_labels: None,
            tercile_type: None,
            title: String::new(),
            states_file: None,
        }
    }
}

/// Pixel layout of the canvas: the map area plus label margins and the
/// optional colorbar strip.
#[derive(Debug, Clone)]
struct Layout {
    width: u32,
    height: u32,
    map_x: f64,
    map_y: f64,
    map_w: f64,
    map_h: f64,
    cbar_rect: Option<(f32, f32, f32, f32)>,
}

impl Layout {
    fn new(aspect: f64, with_cbar: bool) -> Self {
        let map_w = BASE_MAP_WIDTH;
        let map_h = (map_w * aspect.clamp(0.25, 2.5)).round();
        let cbar_space = if with_cbar { CBAR_SPACE } else { 0.0 };
        let width = (MARGIN_LEFT + map_w + MARGIN_RIGHT) as u32;
        let height = (MARGIN_TOP + map_h + MARGIN_BOTTOM + cbar_space) as u32;
        let cbar_rect = if with_cbar {
            Some((
                (MARGIN_LEFT + map_w * 0.1) as f32,
                (MARGIN_TOP + map_h + MARGIN_BOTTOM - 5.0) as f32,
                (map_w * 0.8) as f32,
                CBAR_SPACE as f32,
            ))
        } else {
            None
        };
        Self {
            width,
            height,
            map_x: MARGIN_LEFT,
            map_y: MARGIN_TOP,
            map_w,
            map_h,
            cbar_rect,
        }
    }
}

/// A geographic basemap that fields can be plotted on.
pub struct Map {
    options: MapOptions,
    extent: MapExtent,
    transform: MapTransform,
    layout: Layout,
    /// Background, filled contours and colorbar
    data_layer: Canvas,
    /// Coastlines, borders, gridlines, frame and title; composited on top
    /// at save time so line work stays above fills
    decoration_layer: Canvas,
}

impl Map {
    /// Construct a map with default colorbar and title settings.
    pub fn new(projection: Projection, domain: Domain) -> Result<Self> {
        Self::with_options(MapOptions {
            projection,
            domain,
            ..MapOptions::default()
        })
    }

    /// Construct a map from full options. Resolution and decoration drawing
    /// happen here; on success the map is fully initialized.
    pub fn with_options(options: MapOptions) -> Result<Self> {
        let extent = resolve_extent(options.projection, &options.domain)?;
        let mut transform = MapTransform::new(options.projection, &extent)?;
        let layout = Layout::new(transform.aspect(), options.cbar);
        transform.bind_pixels(layout.map_x, layout.map_y, layout.map_w, layout.map_h);

        let mut data_layer = Canvas::new(layout.width, layout.height)?;
        data_layer.fill_rect(
            layout.map_x as f32,
            layout.map_y as f32,
            layout.map_w as f32,
            layout.map_h as f32,
            MAP_BACKGROUND,
        );

        let mut decoration_layer = Canvas::transparent(layout.width, layout.height)?;
        let mut map = Self {
            options,
            extent,
            transform,
            layout,
            data_layer,
            decoration_layer,
        };
        map.draw_decorations()?;

        info!(
            projection = map.options.projection.as_str(),
            domain = %map.options.domain,
            width = map.layout.width,
            height = map.layout.height,
            "Constructed map"
        );
        Ok(map)
    }

    pub fn projection(&self) -> Projection {
        self.options.projection
    }

    pub fn domain(&self) -> &Domain {
        &self.options.domain
    }

    pub fn extent(&self) -> &MapExtent {
        &self.extent
    }

    /// Canvas size in pixels at the base dpi.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.layout.width, self.layout.height)
    }

    // ----- decorations -------------------------------------------------

    fn draw_decorations(&mut self) -> Result<()> {
        let coast_width = match self.extent {
            MapExtent::Cylindrical(_) => 1.0,
            MapExtent::Conic(_) => 0.5,
        };
        for line in overlay::builtin_coastlines() {
            self.stroke_geo_polyline(line, coast_width, COASTLINE_COLOR);
        }
        for line in overlay::builtin_borders() {
            self.stroke_geo_polyline(line, 0.5, BORDER_COLOR);
        }

        match self.extent {
            MapExtent::Cylindrical(bounds) => self.draw_gridlines(&bounds),
            MapExtent::Conic(_) => {
                if let Some(states) = overlay::load_states(self.options.states_file.as_deref())? {
                    for line in &states {
                        self.stroke_geo_polyline(line, 0.75, STATE_COLOR);
                    }
                }
            }
        }

        self.decoration_layer.stroke_rect(
            self.layout.map_x as f32,
            self.layout.map_y as f32,
            self.layout.map_w as f32,
            self.layout.map_h as f32,
            1.0,
            FRAME_COLOR,
        );

        if !self.options.title.is_empty() {
            text::draw_text(
                self.decoration_layer.pixmap_mut(),
                (self.layout.map_x + self.layout.map_w / 2.0) as f32,
                (self.layout.map_y / 2.0) as f32,
                &self.options.title,
                TITLE_FONT,
                FRAME_COLOR,
            );
        }
        Ok(())
    }

    fn draw_gridlines(&mut self, bounds: &crate::domain::CylindricalBounds) {
        let interval = bounds.gridline_interval;
        let (lat0, lat1) = bounds.lat_range;
        let (lon0, lon1) = bounds.lon_range;

        // Parallels, labelled on the left and right edges
        let mut lat = (lat0 / interval).ceil() * interval;
        while lat <= lat1 {
            let mut points = Vec::new();
            let mut lon = lon0;
            while lon <= lon1 {
                points.push(self.pixel_of(lat, lon));
                lon += 1.0;
            }
            self.decoration_layer
                .stroke_polyline(&points, 0.5, GRIDLINE_COLOR);

            let (_, py) = self.transform.geo_to_pixel(lat, lon0);
            let label = lat_label(lat);
            let half = text::text_width(&label, GRIDLINE_FONT) / 2.0;
            text::draw_text(
                self.decoration_layer.pixmap_mut(),
                self.layout.map_x as f32 - half - 4.0,
                py as f32,
                &label,
                GRIDLINE_FONT,
                LABEL_COLOR,
            );
            text::draw_text(
                self.decoration_layer.pixmap_mut(),
                (self.layout.map_x + self.layout.map_w) as f32 + half + 4.0,
                py as f32,
                &label,
                GRIDLINE_FONT,
                LABEL_COLOR,
            );
            lat += interval;
        }

        // Meridians, labelled along the bottom edge
        let mut lon = (lon0 / interval).ceil() * interval;
        while lon <= lon1 {
            let mut points = Vec::new();
            let mut lat = lat0;
            while lat <= lat1 {
                points.push(self.pixel_of(lat, lon));
                lat += 1.0;
            }
            points.push(self.pixel_of(lat1, lon));
            self.decoration_layer
                .stroke_polyline(&points, 0.5, GRIDLINE_COLOR);

            let (px, _) = self.transform.geo_to_pixel(lat0, lon);
            text::draw_text(
                self.decoration_layer.pixmap_mut(),
                px as f32,
                (self.layout.map_y + self.layout.map_h) as f32 + GRIDLINE_FONT,
                &lon_label(lon),
                GRIDLINE_FONT,
                LABEL_COLOR,
            );
            lon += interval;
        }
    }

    fn pixel_of(&self, lat: f64, lon: f64) -> (f32, f32) {
        let (px, py) = self.transform.geo_to_pixel(lat, lon);
        (px as f32, py as f32)
    }

    /// Project a geographic polyline and stroke the runs that stay inside
    /// the map frame. Runs are broken at the frame edge and at the map
    /// seam (recognized by implausibly long pixel jumps).
    fn stroke_geo_polyline(&mut self, line: &Polyline, width: f32, color: [u8; 4]) {
        let pad = 2.0;
        let x0 = self.layout.map_x - pad;
        let x1 = self.layout.map_x + self.layout.map_w + pad;
        let y0 = self.layout.map_y - pad;
        let y1 = self.layout.map_y + self.layout.map_h + pad;
        let seam_jump = self.layout.map_w / 2.0;

        let mut run: Vec<(f32, f32)> = Vec::new();
        let mut prev: Option<(f64, f64)> = None;
        for &(lon, lat) in &line.points {
            let (px, py) = self.transform.geo_to_pixel(lat, lon);
            let inside = px >= x0 && px <= x1 && py >= y0 && py <= y1;
            let jumps = prev
                .map(|(ppx, ppy)| (px - ppx).abs() > seam_jump || (py - ppy).abs() > seam_jump)
                .unwrap_or(false);
            if inside && !jumps {
                run.push((px as f32, py as f32));
            } else {
                if run.len() >= 2 {
                    self.decoration_layer.stroke_polyline(&run, width, color);
                }
                run.clear();
                if inside {
                    run.push((px as f32, py as f32));
                }
            }
            prev = Some((px, py));
        }
        if run.len() >= 2 {
            self.decoration_layer.stroke_polyline(&run, width, color);
        }
    }

    // ----- plotting ----------------------------------------------------

    /// Plot a field on this map.
    ///
    /// 1-D data is reshaped to the grid's `(num_y, num_x)` shape; a filled
    /// or line contour render is issued depending on whether the field has
    /// fill colors. Fails with [`GeoplotError::InvalidFieldDimension`] if
    /// the data is not 1-D or 2-D or does not match the grid.
    pub fn plot(&mut self, field: &Field) -> Result<()> {
        let grid = field_to_grid(field)?;
        let data = if field.smoothing_factor > 0.0 {
            gaussian_smooth(&grid, field.smoothing_factor)
        } else {
            grid
        };

        let (min, max) = match field.finite_range() {
            Some(range) => range,
            None => {
                debug!("Field has no finite values; nothing to plot");
                return Ok(());
            }
        };
        let levels = match &field.levels {
            Levels::Explicit(levels) if !levels.is_empty() => levels.clone(),
            _ => contour::auto_levels(min, max),
        };

        debug!(
            data_min = min,
            data_max = max,
            num_levels = levels.len(),
            filled = field.fill_colors.is_some(),
            grid_lat = ?field.geogrid.lat_bounds(),
            grid_lon = ?field.geogrid.lon_bounds(),
            "Plotting field"
        );

        match &field.fill_colors {
            Some(fill) => {
                let palette = self.resolve_palette(fill, &levels)?;
                self.render_fill(&data, field, &levels, &palette)?;
                if self.options.cbar {
                    self.draw_colorbar(&levels, &palette);
                }
            }
            None => self.render_contours(&data, field, &levels)?,
        }
        Ok(())
    }

    fn resolve_palette(&self, fill: &FillColors, levels: &[f32]) -> Result<Vec<[u8; 4]>> {
        match fill {
            FillColors::Auto { colormap } => {
                let cmap = colormaps::get_colormap(colormap)?;
                Ok(discrete_palette(
                    cmap.as_ref(),
                    levels,
                    self.options.cbar_color_spacing,
                ))
            }
            FillColors::Palette(palette) => {
                if palette.len() != levels.len() + 1 {
                    return Err(GeoplotError::InvalidParameter {
                        param: "fill_colors".to_string(),
                        message: format!(
                            "Palette has {} colors but {} levels need {}",
                            palette.len(),
                            levels.len(),
                            levels.len() + 1
                        ),
                    });
                }
                Ok(palette.clone())
            }
        }
    }

    /// Filled-contour render: every map pixel is inverted to a geographic
    /// point, sampled from the grid, binned by level and blended in.
    fn render_fill(
        &mut self,
        data: &Array2<f32>,
        field: &Field,
        levels: &[f32],
        palette: &[[u8; 4]],
    ) -> Result<()> {
        // Coarse grids on large canvases get bicubic sampling to avoid
        // visible facets; otherwise bilinear is enough
        let scale = (self.layout.map_w / data.ncols() as f64)
            .max(self.layout.map_h / data.nrows() as f64);
        let method = if scale > 2.0 { "bicubic" } else { "bilinear" };
        debug!(scale = scale, method = method, "Selected fill sampler");
        let interpolator = get_interpolator(method)?;
        let flat: Vec<f32> = data.iter().cloned().collect();
        let shape = vec![data.nrows(), data.ncols()];
        let lats = field.geogrid.lats();
        let lons = field.geogrid.lons();
        let alpha = (field.fill_alpha.clamp(0.0, 1.0) * 255.0).round() as u32;

        let px0 = self.layout.map_x as u32;
        let px1 = (self.layout.map_x + self.layout.map_w) as u32;
        let py0 = self.layout.map_y as u32;
        let py1 = (self.layout.map_y + self.layout.map_h) as u32;

        for py in py0..py1 {
            for px in px0..px1 {
                let (lat, lon) =
                    match self.transform.pixel_to_geo(px as f64 + 0.5, py as f64 + 0.5) {
                        Some(geo) => geo,
                        None => continue,
                    };
                let j = match coord_to_index(lat, lats) {
                    Some(j) => j,
                    None => continue,
                };
                let i = match lon_index(lon, lons) {
                    Some(i) => i,
                    None => continue,
                };
                let value = interpolator.interpolate(&flat, &shape, &[j, i])?;
                if !value.is_finite() {
                    continue;
                }
                let bin = levels.iter().take_while(|&&l| value >= l).count();
                let color = palette[bin];
                let a = ((color[3] as u32 * alpha + 127) / 255) as u8;
                self.data_layer
                    .blend_pixel(px, py, [color[0], color[1], color[2], a]);
            }
        }
        Ok(())
    }

    /// Line-contour render: the field is resampled onto a canvas-space
    /// lattice and marched at each level.
    fn render_contours(&mut self, data: &Array2<f32>, field: &Field, levels: &[f32]) -> Result<()> {
        let interpolator = get_interpolator("bilinear")?;
        let flat: Vec<f32> = data.iter().cloned().collect();
        let shape = vec![data.nrows(), data.ncols()];
        let lats = field.geogrid.lats();
        let lons = field.geogrid.lons();

        let nx = (self.layout.map_w / CONTOUR_LATTICE_STEP) as usize + 1;
        let ny = (self.layout.map_h / CONTOUR_LATTICE_STEP) as usize + 1;
        let mut lattice = vec![f32::NAN; nx * ny];
        for iy in 0..ny {
            for ix in 0..nx {
                let px = self.layout.map_x + ix as f64 * CONTOUR_LATTICE_STEP;
                let py = self.layout.map_y + iy as f64 * CONTOUR_LATTICE_STEP;
                let (lat, lon) = match self.transform.pixel_to_geo(px, py) {
                    Some(geo) => geo,
                    None => continue,
                };
                let (j, i) = match (coord_to_index(lat, lats), lon_index(lon, lons)) {
                    (Some(j), Some(i)) => (j, i),
                    _ => continue,
                };
                lattice[iy * nx + ix] = interpolator.interpolate(&flat, &shape, &[j, i])?;
            }
        }

        let contours = contour::generate_all_contours(&lattice, nx, ny, levels, 1);
        debug!(num_contours = contours.len(), "Generated contours");

        let color = match field.contour_colors {
            ContourColors::Auto => [0, 0, 0, 255],
            ContourColors::Fixed(c) => c,
        };

        let mut label_spots: Vec<(f32, f32)> = Vec::new();
        for c in &contours {
            let points: Vec<(f32, f32)> = c
                .points
                .iter()
                .map(|p| {
                    (
                        (self.layout.map_x + p.x as f64 * CONTOUR_LATTICE_STEP) as f32,
                        (self.layout.map_y + p.y as f64 * CONTOUR_LATTICE_STEP) as f32,
                    )
                })
                .collect();
            self.data_layer.stroke_polyline(&points, 1.0, color);

            if field.contour_labels && contour::contour_length(c) * CONTOUR_LATTICE_STEP as f32 > 60.0
            {
                self.place_contour_label(&points, c.level, color, &mut label_spots);
            }
        }
        Ok(())
    }

    fn place_contour_label(
        &mut self,
        points: &[(f32, f32)],
        level: f32,
        color: [u8; 4],
        placed: &mut Vec<(f32, f32)>,
    ) {
        let mid = points.len() / 2;
        if mid == 0 || mid + 1 >= points.len() {
            return;
        }
        let (x, y) = points[mid];
        let min_spacing = 40.0f32;
        if placed
            .iter()
            .any(|&(px, py)| (px - x).hypot(py - y) < min_spacing)
        {
            return;
        }
        let (nx, ny) = points[mid + 1];
        let mut angle = (ny - y).atan2(nx - x);
        if angle.abs() > std::f32::consts::FRAC_PI_2 {
            angle += std::f32::consts::PI;
        }
        text::draw_label(
            self.data_layer.pixmap_mut(),
            x,
            y,
            angle,
            &colorbar::format_level(level),
            CONTOUR_LABEL_FONT,
            color,
        );
        placed.push((x, y));
    }

    fn draw_colorbar(&mut self, levels: &[f32], palette: &[[u8; 4]]) {
        let rect = match self.layout.cbar_rect {
            Some(rect) => rect,
            None => return,
        };
        let spec = ColorbarSpec {
            palette,
            levels,
            ends: self.options.cbar_ends,
            kind: self.options.cbar_type,
            label: &self.options.cbar_label,
            tick_labels: self.options.cbar_tick_labels.as_deref(),
            tercile_type: self.options.tercile_type.as_deref(),
        };
        colorbar::draw_colorbar(&mut self.data_layer, rect, &spec);
    }

    // ----- output ------------------------------------------------------

    /// Composite the data and decoration layers into a raster image at the
    /// base dpi.
    pub fn to_image(&self) -> Result<RgbaImage> {
        let mut composed = Canvas::new(self.layout.width, self.layout.height)?;
        composed.composite(&self.data_layer);
        composed.composite(&self.decoration_layer);
        Ok(composed.to_image())
    }

    /// Save the map at the base dpi. The raster format follows the file
    /// extension (PNG, JPEG, ...), as supported by the image library.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with_dpi(path, BASE_DPI)
    }

    /// Save the map, scaling the base-resolution canvas to the given dpi.
    /// The scaling is deterministic, so identical inputs produce identical
    /// files.
    pub fn save_with_dpi<P: AsRef<Path>>(&self, path: P, dpi: u32) -> Result<()> {
        if dpi == 0 {
            return Err(GeoplotError::InvalidParameter {
                param: "dpi".to_string(),
                message: "dpi must be positive".to_string(),
            });
        }
        let mut img = self.to_image()?;
        if dpi != BASE_DPI {
            let w = (self.layout.width as u64 * dpi as u64 / BASE_DPI as u64) as u32;
            let h = (self.layout.height as u64 * dpi as u64 / BASE_DPI as u64) as u32;
            img = image::imageops::resize(&img, w.max(1), h.max(1), FilterType::Triangle);
        }
        let path = path.as_ref();
        img.save(path).map_err(|e| GeoplotError::ImageEncoding {
            message: format!("Failed to write {}: {}", path.display(), e),
        })?;
        info!(path = %path.display(), dpi = dpi, "Saved map");
        Ok(())
    }

    /// Save to a temporary file and open it with the platform image viewer.
    pub fn show(&self) -> Result<()> {
        let path = std::env::temp_dir().join(format!("geoplot-{}.png", std::process::id()));
        self.save(&path)?;
        let opener = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        std::process::Command::new(opener).arg(&path).spawn()?;
        Ok(())
    }
}

/// Validate and reshape field data into the grid's 2-D shape.
fn field_to_grid(field: &Field) -> Result<Array2<f32>> {
    let num_x = field.geogrid.num_x();
    let num_y = field.geogrid.num_y();
    match field.data.ndim() {
        1 => {
            if field.data.len() != num_x * num_y {
                return Err(GeoplotError::InvalidFieldDimension {
                    message: format!(
                        "1-D data has {} values but the grid is {}x{} ({} points)",
                        field.data.len(),
                        num_y,
                        num_x,
                        num_x * num_y
                    ),
                });
            }
            let values: Vec<f32> = field.data.iter().cloned().collect();
            Array2::from_shape_vec((num_y, num_x), values).map_err(|e| {
                GeoplotError::InvalidFieldDimension {
                    message: format!("Cannot reshape data to {}x{}: {}", num_y, num_x, e),
                }
            })
        }
        2 => {
            let shape = field.data.shape();
            if shape != [num_y, num_x] {
                return Err(GeoplotError::InvalidFieldDimension {
                    message: format!(
                        "2-D data is {}x{} but the grid is {}x{}",
                        shape[0], shape[1], num_y, num_x
                    ),
                });
            }
            let values: Vec<f32> = field.data.iter().cloned().collect();
            Array2::from_shape_vec((num_y, num_x), values).map_err(|e| {
                GeoplotError::InvalidFieldDimension {
                    message: format!("Cannot view data as {}x{}: {}", num_y, num_x, e),
                }
            })
        }
        n => Err(GeoplotError::InvalidFieldDimension {
            message: format!("Field data must be 1-D or 2-D, got {}-D", n),
        }),
    }
}

/// Fractional longitude index, trying the +-360 aliases so grids stored in
/// either longitude convention resolve.
fn lon_index(lon: f64, lons: &[f64]) -> Option<f64> {
    for candidate in [lon, lon - 360.0, lon + 360.0] {
        if let Some(i) = coord_to_index(candidate, lons) {
            return Some(i);
        }
    }
    None
}

fn lat_label(lat: f64) -> String {
    if lat > 0.0 {
        format!("{}N", lat.abs() as i64)
    } else if lat < 0.0 {
        format!("{}S", lat.abs() as i64)
    } else {
        "0".to_string()
    }
}

fn lon_label(lon: f64) -> String {
    let mut l = lon;
    while l > 180.0 {
        l -= 360.0;
    }
    while l < -180.0 {
        l += 360.0;
    }
    if l == 0.0 || l.abs() == 180.0 {
        format!("{}", l.abs() as i64)
    } else if l > 0.0 {
        format!("{}E", l as i64)
    } else {
        format!("{}W", l.abs() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geogrid::GeoGrid;
    use ndarray::Array1;

    fn test_field() -> Field {
        let grid = GeoGrid::global(10.0).unwrap();
        let n = grid.num_x() * grid.num_y();
        let data = Array1::from((0..n).map(|i| (i % 50) as f32).collect::<Vec<_>>());
        Field::from_1d(data, grid)
    }

    #[test]
    fn test_construct_all_supported_pairs() {
        use std::str::FromStr;
        for proj_name in crate::domain::supported_projections() {
            let projection = Projection::from_str(proj_name).unwrap();
            for domain_name in crate::domain::supported_domains() {
                let domain: Domain = domain_name.parse().unwrap();
                match Map::new(projection, domain) {
                    Ok(map) => {
                        let (w, h) = map.dimensions();
                        assert!(w > 0 && h > 0);
                    }
                    Err(GeoplotError::InvalidDomain { .. }) => {
                        // The conic family rejects "global"; anything else
                        // failing here is a bug
                        assert_ne!(projection, Projection::Mercator);
                        assert_eq!(domain, Domain::Global);
                    }
                    Err(other) => panic!("unexpected error: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_plot_filled_field() {
        let mut map = Map::new(Projection::Mercator, Domain::Global).unwrap();
        map.plot(&test_field()).unwrap();
    }

    #[test]
    fn test_plot_line_contours() {
        let mut map = Map::new(Projection::Mercator, Domain::Conus).unwrap();
        let field = test_field().with_fill_colors(None).with_contour_labels(true);
        map.plot(&field).unwrap();
    }

    #[test]
    fn test_plot_rejects_bad_1d_length() {
        let mut map = Map::new(Projection::Mercator, Domain::Global).unwrap();
        let grid = GeoGrid::global(10.0).unwrap();
        let field = Field::from_1d(Array1::zeros(7), grid);
        match map.plot(&field) {
            Err(GeoplotError::InvalidFieldDimension { .. }) => {}
            other => panic!("expected InvalidFieldDimension, got {:?}", other),
        }
    }

    #[test]
    fn test_plot_rejects_3d_data() {
        let mut map = Map::new(Projection::Mercator, Domain::Global).unwrap();
        let grid = GeoGrid::global(10.0).unwrap();
        let data = ndarray::ArrayD::<f32>::zeros(ndarray::IxDyn(&[2, 3, 4]));
        let field = Field::new(data, grid);
        match map.plot(&field) {
            Err(GeoplotError::InvalidFieldDimension { .. }) => {}
            other => panic!("expected InvalidFieldDimension, got {:?}", other),
        }
    }

    #[test]
    fn test_palette_length_validation() {
        let mut map = Map::new(Projection::Mercator, Domain::Global).unwrap();
        let field = test_field()
            .with_levels(vec![10.0, 20.0, 30.0])
            .with_fill_colors(Some(FillColors::Palette(vec![[0, 0, 0, 255]; 2])));
        assert!(map.plot(&field).is_err());
    }

    #[test]
    fn test_save_rejects_zero_dpi() {
        let map = Map::new(Projection::Mercator, Domain::Conus).unwrap();
        assert!(map.save_with_dpi("/tmp/never-written.png", 0).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(lat_label(50.0), "50N");
        assert_eq!(lat_label(-30.0), "30S");
        assert_eq!(lat_label(0.0), "0");
        assert_eq!(lon_label(250.0), "110W");
        assert_eq!(lon_label(90.0), "90E");
        assert_eq!(lon_label(180.0), "180");
    }
}
