//! Map projections.
//!
//! The mercator family renders through a Miller cylindrical transform; the
//! conic family through Lambert conformal (tangent cone) or Lambert
//! azimuthal equal-area transforms. Each transform maps geographic
//! coordinates to a plane rectangle in meters (or pseudo-meters), which a
//! [`MapTransform`] then binds to a pixel rectangle on the canvas.

use std::f64::consts::{FRAC_PI_4, PI};
use std::str::FromStr;

use crate::domain::{CylindricalBounds, MapExtent, SUPPORTED_PROJECTIONS};
use crate::error::{GeoplotError, Result};

/// Earth radius in meters (WGS84 mean radius).
const EARTH_RADIUS: f64 = 6_371_229.0;

const TO_RAD: f64 = PI / 180.0;
const TO_DEG: f64 = 180.0 / PI;

/// A supported map projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Cylindrical projection for box domains
    Mercator,
    /// Lambert conformal conic
    LambertConformal,
    /// Lambert azimuthal equal-area
    EqualArea,
}

impl Projection {
    /// The canonical projection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Mercator => "mercator",
            Projection::LambertConformal => "lcc",
            Projection::EqualArea => "equal-area",
        }
    }
}

impl FromStr for Projection {
    type Err = GeoplotError;

    /// Exact, case-sensitive match on the supported projection names.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mercator" => Ok(Projection::Mercator),
            "lcc" => Ok(Projection::LambertConformal),
            "equal-area" => Ok(Projection::EqualArea),
            _ => Err(GeoplotError::UnsupportedProjection {
                given: s.to_string(),
                valid: SUPPORTED_PROJECTIONS.join(", "),
            }),
        }
    }
}

/// Plane transform for the cylindrical family (Miller projection).
#[derive(Debug, Clone)]
struct MillerTransform {
    /// Western edge of the map frame in degrees; longitudes are unwrapped
    /// into `[lon0, lon0 + 360)` before projecting.
    lon0: f64,
}

impl MillerTransform {
    fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let dlon = unwrap_lon(lon, self.lon0);
        let x = EARTH_RADIUS * (dlon - self.lon0) * TO_RAD;
        let y = EARTH_RADIUS * 1.25 * (FRAC_PI_4 + 0.4 * lat * TO_RAD).tan().ln();
        (x, y)
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = self.lon0 + x / EARTH_RADIUS * TO_DEG;
        let lat = 2.5 * ((y / (1.25 * EARTH_RADIUS)).exp().atan() - FRAC_PI_4) * TO_DEG;
        (lat, lon)
    }
}

/// Plane transform for a Lambert conformal conic, tangent at the domain
/// center. The center maps to the plane origin.
#[derive(Debug, Clone)]
struct LambertTransform {
    lon0: f64,
    n: f64,
    f: f64,
    rho0: f64,
}

impl LambertTransform {
    fn new(center_lat: f64, center_lon: f64) -> Self {
        let lat0 = center_lat * TO_RAD;
        // Tangent cone (single standard parallel at the center latitude)
        let n = lat0.sin();
        let f = lat0.cos() * (FRAC_PI_4 + lat0 / 2.0).tan().powf(n) / n;
        let rho0 = EARTH_RADIUS * f / (FRAC_PI_4 + lat0 / 2.0).tan().powf(n);
        Self {
            lon0: center_lon,
            n,
            f,
            rho0,
        }
    }

    fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let lat = lat * TO_RAD;
        let dlon = wrap_half(lon - self.lon0) * TO_RAD;
        let rho = EARTH_RADIUS * self.f / (FRAC_PI_4 + lat / 2.0).tan().powf(self.n);
        let theta = self.n * dlon;
        (rho * theta.sin(), self.rho0 - rho * theta.cos())
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let rho = (x * x + (self.rho0 - y) * (self.rho0 - y)).sqrt();
        let rho = if self.n < 0.0 { -rho } else { rho };
        let theta = x.atan2(self.rho0 - y);
        let lat = 2.0 * ((EARTH_RADIUS * self.f / rho).powf(1.0 / self.n)).atan() - PI / 2.0;
        let lon = self.lon0 + theta / self.n * TO_DEG;
        (lat * TO_DEG, lon)
    }
}

/// Plane transform for a Lambert azimuthal equal-area projection centered on
/// the domain center.
#[derive(Debug, Clone)]
struct AzimuthalTransform {
    lon0: f64,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl AzimuthalTransform {
    fn new(center_lat: f64, center_lon: f64) -> Self {
        let lat0 = center_lat * TO_RAD;
        Self {
            lon0: center_lon,
            sin_lat0: lat0.sin(),
            cos_lat0: lat0.cos(),
        }
    }

    fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let lat = lat * TO_RAD;
        let dlon = wrap_half(lon - self.lon0) * TO_RAD;
        let denom = 1.0 + self.sin_lat0 * lat.sin() + self.cos_lat0 * lat.cos() * dlon.cos();
        // The antipode projects to infinity; clamp to a large finite radius
        let k = if denom > 1e-12 {
            (2.0 / denom).sqrt()
        } else {
            2.0 / 1e-6
        };
        let x = EARTH_RADIUS * k * lat.cos() * dlon.sin();
        let y = EARTH_RADIUS * k * (self.cos_lat0 * lat.sin() - self.sin_lat0 * lat.cos() * dlon.cos());
        (x, y)
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let rho = (x * x + y * y).sqrt();
        if rho < 1e-9 {
            return Some((self.sin_lat0.asin() * TO_DEG, self.lon0));
        }
        let arg = rho / (2.0 * EARTH_RADIUS);
        if arg > 1.0 {
            return None;
        }
        let c = 2.0 * arg.asin();
        let lat = (c.cos() * self.sin_lat0 + y * c.sin() * self.cos_lat0 / rho).asin();
        let lon = self.lon0
            + (x * c.sin()).atan2(rho * self.cos_lat0 * c.cos() - y * self.sin_lat0 * c.sin())
                * TO_DEG;
        Some((lat * TO_DEG, lon))
    }
}

#[derive(Debug, Clone)]
enum PlaneTransform {
    Miller(MillerTransform),
    Lambert(LambertTransform),
    Azimuthal(AzimuthalTransform),
}

/// Binds a resolved map extent to a pixel rectangle, providing forward
/// (geographic to pixel) and inverse (pixel to geographic) mappings.
#[derive(Debug, Clone)]
pub struct MapTransform {
    plane: PlaneTransform,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    px_x: f64,
    px_y: f64,
    px_w: f64,
    px_h: f64,
}

impl MapTransform {
    /// Build the plane transform for an extent; pixel binding comes later
    /// via [`MapTransform::bind_pixels`].
    pub fn new(projection: Projection, extent: &MapExtent) -> Result<Self> {
        let (plane, x_min, x_max, y_min, y_max) = match (projection, extent) {
            (Projection::Mercator, MapExtent::Cylindrical(bounds)) => {
                let CylindricalBounds {
                    lat_range,
                    lon_range,
                    ..
                } = bounds;
                let miller = MillerTransform { lon0: lon_range.0 };
                let (x0, y0) = miller.forward(lat_range.0, lon_range.0);
                let (x1, y1) = miller.forward(lat_range.1, lon_range.1);
                // A full-circle domain unwraps to x = 0 at both edges
                let x1 = if (lon_range.1 - lon_range.0 - 360.0).abs() < 1e-9 {
                    EARTH_RADIUS * 2.0 * PI
                } else {
                    x1
                };
                if x1 <= x0 || y1 <= y0 {
                    return Err(GeoplotError::InvalidParameter {
                        param: "domain".to_string(),
                        message: format!(
                            "Degenerate map extent: lat {:?}, lon {:?}",
                            lat_range, lon_range
                        ),
                    });
                }
                (PlaneTransform::Miller(miller), x0, x1, y0, y1)
            }
            (Projection::LambertConformal, MapExtent::Conic(extent)) => {
                let lambert = LambertTransform::new(extent.center_lat, extent.center_lon);
                (
                    PlaneTransform::Lambert(lambert),
                    -extent.width / 2.0,
                    extent.width / 2.0,
                    -extent.height / 2.0,
                    extent.height / 2.0,
                )
            }
            (Projection::EqualArea, MapExtent::Conic(extent)) => {
                let azimuthal = AzimuthalTransform::new(extent.center_lat, extent.center_lon);
                (
                    PlaneTransform::Azimuthal(azimuthal),
                    -extent.width / 2.0,
                    extent.width / 2.0,
                    -extent.height / 2.0,
                    extent.height / 2.0,
                )
            }
            (projection, _) => {
                return Err(GeoplotError::Render {
                    message: format!(
                        "Extent family does not match projection {}",
                        projection.as_str()
                    ),
                });
            }
        };
        Ok(Self {
            plane,
            x_min,
            x_max,
            y_min,
            y_max,
            px_x: 0.0,
            px_y: 0.0,
            px_w: 1.0,
            px_h: 1.0,
        })
    }

    /// Bind the plane rectangle to a pixel rectangle on the canvas.
    pub fn bind_pixels(&mut self, px_x: f64, px_y: f64, px_w: f64, px_h: f64) {
        self.px_x = px_x;
        self.px_y = px_y;
        self.px_w = px_w;
        self.px_h = px_h;
    }

    /// Aspect ratio (height over width) of the plane rectangle.
    pub fn aspect(&self) -> f64 {
        (self.y_max - self.y_min) / (self.x_max - self.x_min)
    }

    /// Project a geographic point to canvas pixel coordinates. Points
    /// outside the map frame land outside the bound rectangle; callers cull.
    pub fn geo_to_pixel(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (x, y) = match &self.plane {
            PlaneTransform::Miller(t) => t.forward(lat, lon),
            PlaneTransform::Lambert(t) => t.forward(lat, lon),
            PlaneTransform::Azimuthal(t) => t.forward(lat, lon),
        };
        let u = (x - self.x_min) / (self.x_max - self.x_min);
        let v = (y - self.y_min) / (self.y_max - self.y_min);
        (self.px_x + u * self.px_w, self.px_y + (1.0 - v) * self.px_h)
    }

    /// Invert a canvas pixel back to a geographic point, or `None` where
    /// the pixel has no geographic preimage.
    pub fn pixel_to_geo(&self, px: f64, py: f64) -> Option<(f64, f64)> {
        let u = (px - self.px_x) / self.px_w;
        let v = 1.0 - (py - self.px_y) / self.px_h;
        let x = self.x_min + u * (self.x_max - self.x_min);
        let y = self.y_min + v * (self.y_max - self.y_min);
        match &self.plane {
            PlaneTransform::Miller(t) => Some(t.inverse(x, y)),
            PlaneTransform::Lambert(t) => Some(t.inverse(x, y)),
            PlaneTransform::Azimuthal(t) => t.inverse(x, y),
        }
    }

    /// Whether a pixel lies inside the bound map rectangle.
    pub fn contains_pixel(&self, px: f64, py: f64) -> bool {
        px >= self.px_x
            && px < self.px_x + self.px_w
            && py >= self.px_y
            && py < self.px_y + self.px_h
    }
}

/// Unwrap a longitude into `[lon0, lon0 + 360)`.
fn unwrap_lon(lon: f64, lon0: f64) -> f64 {
    let mut l = lon;
    while l < lon0 {
        l += 360.0;
    }
    while l >= lon0 + 360.0 {
        l -= 360.0;
    }
    l
}

/// Wrap a longitude difference into `[-180, 180)`.
fn wrap_half(dlon: f64) -> f64 {
    let mut d = dlon;
    while d < -180.0 {
        d += 360.0;
    }
    while d >= 180.0 {
        d -= 360.0;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{resolve_extent, Domain};

    fn bound(projection: Projection, domain: Domain) -> MapTransform {
        let extent = resolve_extent(projection, &domain).unwrap();
        let mut transform = MapTransform::new(projection, &extent).unwrap();
        transform.bind_pixels(0.0, 0.0, 800.0, 600.0);
        transform
    }

    #[test]
    fn test_projection_parsing_is_exact() {
        assert_eq!(
            "mercator".parse::<Projection>().unwrap(),
            Projection::Mercator
        );
        assert_eq!(
            "lcc".parse::<Projection>().unwrap(),
            Projection::LambertConformal
        );
        assert_eq!(
            "equal-area".parse::<Projection>().unwrap(),
            Projection::EqualArea
        );
        assert!("robinson".parse::<Projection>().is_err());
        assert!("Mercator".parse::<Projection>().is_err());
    }

    #[test]
    fn test_miller_corners() {
        let transform = bound(Projection::Mercator, Domain::Conus);
        // Southwest corner maps to the bottom-left pixel corner
        let (px, py) = transform.geo_to_pixel(24.0, 230.0);
        assert!(px.abs() < 1e-6, "px = {}", px);
        assert!((py - 600.0).abs() < 1e-6, "py = {}", py);
        // Northeast corner maps to the top-right pixel corner
        let (px, py) = transform.geo_to_pixel(50.0, 295.0);
        assert!((px - 800.0).abs() < 1e-6, "px = {}", px);
        assert!(py.abs() < 1e-6, "py = {}", py);
    }

    #[test]
    fn test_miller_roundtrip() {
        let transform = bound(Projection::Mercator, Domain::Global);
        for &(lat, lon) in &[(0.0, 180.0), (45.0, 10.0), (-60.0, 300.0), (85.0, 359.0)] {
            let (px, py) = transform.geo_to_pixel(lat, lon);
            let (rlat, rlon) = transform.pixel_to_geo(px, py).unwrap();
            assert!((rlat - lat).abs() < 1e-6, "lat {} vs {}", lat, rlat);
            assert!((rlon - lon).abs() < 1e-6, "lon {} vs {}", lon, rlon);
        }
    }

    #[test]
    fn test_lambert_center_maps_to_middle() {
        let transform = bound(Projection::LambertConformal, Domain::Conus);
        let (px, py) = transform.geo_to_pixel(39.0, 262.0);
        assert!((px - 400.0).abs() < 1e-6, "px = {}", px);
        assert!((py - 300.0).abs() < 1e-6, "py = {}", py);
    }

    #[test]
    fn test_lambert_roundtrip() {
        let transform = bound(Projection::LambertConformal, Domain::Us);
        for &(lat, lon) in &[(53.0, 260.0), (40.0, 250.0), (60.0, 280.0)] {
            let (px, py) = transform.geo_to_pixel(lat, lon);
            let (rlat, rlon) = transform.pixel_to_geo(px, py).unwrap();
            assert!((rlat - lat).abs() < 1e-6, "lat {} vs {}", lat, rlat);
            let dlon = wrap_half(rlon - lon);
            assert!(dlon.abs() < 1e-6, "lon {} vs {}", lon, rlon);
        }
    }

    #[test]
    fn test_equal_area_roundtrip() {
        let transform = bound(Projection::EqualArea, Domain::NorthAmerica);
        for &(lat, lon) in &[(48.0, 260.0), (30.0, 240.0), (65.0, 290.0)] {
            let (px, py) = transform.geo_to_pixel(lat, lon);
            let (rlat, rlon) = transform.pixel_to_geo(px, py).unwrap();
            assert!((rlat - lat).abs() < 1e-5, "lat {} vs {}", lat, rlat);
            let dlon = wrap_half(rlon - lon);
            assert!(dlon.abs() < 1e-5, "lon {} vs {}", lon, rlon);
        }
    }

    #[test]
    fn test_equal_area_antipode_has_no_preimage() {
        let transform = bound(Projection::EqualArea, Domain::Us);
        // A pixel far outside the mapped disc inverts to None rather than
        // a bogus coordinate
        assert!(transform.pixel_to_geo(1e9, 1e9).is_none());
    }
}
