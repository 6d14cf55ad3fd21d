//! Basemap overlay geometry: coastlines, country borders and state
//! boundaries.
//!
//! A compact built-in coastline/border set (heavily generalized, suitable
//! for continental-scale maps) is compiled in. Higher-detail overlays and
//! the US state boundary set load from GeoJSON files at runtime; the state
//! file is located through [`MapOptions::states_file`] or the
//! `GEOPLOT_STATES` environment variable and skipped silently when absent,
//! matching how the boundary data used to come from an external package.
//!
//! [`MapOptions::states_file`]: crate::map::MapOptions

use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GeoplotError, Result};

/// A geographic polyline in `(lon, lat)` degree pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }
}

/// Environment variable naming the state-boundary GeoJSON file.
pub const STATES_ENV_VAR: &str = "GEOPLOT_STATES";

/// The built-in coastline set.
pub fn builtin_coastlines() -> &'static [Polyline] {
    static COASTLINES: Lazy<Vec<Polyline>> =
        Lazy::new(|| builtin::COASTLINES.iter().map(|line| to_polyline(line)).collect());
    &COASTLINES
}

/// The built-in country-border set.
pub fn builtin_borders() -> &'static [Polyline] {
    static BORDERS: Lazy<Vec<Polyline>> =
        Lazy::new(|| builtin::BORDERS.iter().map(|line| to_polyline(line)).collect());
    &BORDERS
}

fn to_polyline(line: &[(f32, f32)]) -> Polyline {
    Polyline::new(
        line.iter()
            .map(|&(lon, lat)| (lon as f64, lat as f64))
            .collect(),
    )
}

/// Load the state-boundary overlay, if a boundary file is available.
///
/// Checks the explicit path first, then the `GEOPLOT_STATES` environment
/// variable. A missing file is not an error; malformed geometry is.
pub fn load_states(explicit: Option<&Path>) -> Result<Option<Vec<Polyline>>> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => std::env::var_os(STATES_ENV_VAR).map(std::path::PathBuf::from),
    };
    let path = match path {
        Some(p) => p,
        None => {
            debug!("No state boundary file configured; skipping state overlay");
            return Ok(None);
        }
    };
    if !path.exists() {
        debug!(path = %path.display(), "State boundary file not found; skipping state overlay");
        return Ok(None);
    }
    load_geojson(&path).map(Some)
}

/// Parse a GeoJSON file into polylines.
///
/// Supports the geometry subset needed for boundary overlays: LineString,
/// MultiLineString, Polygon and MultiPolygon (polygon rings become closed
/// polylines). Extra coordinate components beyond lon/lat are ignored.
pub fn load_geojson(path: &Path) -> Result<Vec<Polyline>> {
    let content = std::fs::read_to_string(path)?;
    let collection: FeatureCollection = serde_json::from_str(&content)?;
    if collection.type_ != "FeatureCollection" {
        return Err(GeoplotError::Overlay {
            message: format!(
                "Expected a FeatureCollection in {}, got {}",
                path.display(),
                collection.type_
            ),
        });
    }

    let mut polylines = Vec::new();
    for feature in collection.features {
        let geometry = match feature.geometry {
            Some(g) => g,
            None => continue,
        };
        match geometry {
            Geometry::LineString { coordinates } => {
                polylines.push(coords_to_polyline(&coordinates)?);
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                for line in &coordinates {
                    polylines.push(coords_to_polyline(line)?);
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in &coordinates {
                    for ring in polygon {
                        polylines.push(coords_to_polyline(ring)?);
                    }
                }
            }
        }
    }

    debug!(
        path = %path.display(),
        count = polylines.len(),
        "Loaded overlay geometry"
    );
    Ok(polylines)
}

fn coords_to_polyline(coords: &[Vec<f64>]) -> Result<Polyline> {
    let mut points = Vec::with_capacity(coords.len());
    for position in coords {
        if position.len() < 2 {
            return Err(GeoplotError::Overlay {
                message: format!("Position with {} components; need lon and lat", position.len()),
            });
        }
        points.push((position[0], position[1]));
    }
    Ok(Polyline::new(points))
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    type_: String,
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

/// Built-in generalized geometry, `(lon, lat)` in degrees with longitudes
/// in -180..180. Fidelity is intentionally coarse; pass a GeoJSON overlay
/// for anything better than continental scale.
mod builtin {
    type Line = &'static [(f32, f32)];

    const NORTH_AMERICA: Line = &[
        (-168.0, 65.5),
        (-164.0, 66.5),
        (-161.0, 70.3),
        (-156.0, 71.3),
        (-148.0, 70.4),
        (-141.0, 69.6),
        (-133.0, 69.4),
        (-127.0, 70.0),
        (-123.0, 69.5),
        (-115.0, 68.5),
        (-108.0, 68.5),
        (-101.0, 68.0),
        (-95.0, 67.0),
        (-90.0, 63.5),
        (-94.0, 58.8),
        (-92.0, 57.0),
        (-88.0, 56.5),
        (-85.0, 55.3),
        (-82.0, 55.2),
        (-82.5, 52.2),
        (-79.5, 51.5),
        (-79.0, 54.5),
        (-77.0, 55.5),
        (-78.0, 58.5),
        (-77.5, 62.4),
        (-72.0, 61.5),
        (-70.0, 59.0),
        (-65.0, 59.5),
        (-64.0, 56.0),
        (-58.5, 54.0),
        (-56.0, 51.5),
        (-60.0, 49.8),
        (-66.0, 48.2),
        (-65.0, 45.5),
        (-70.0, 43.5),
        (-74.0, 40.5),
        (-76.0, 38.0),
        (-75.5, 35.2),
        (-81.0, 31.5),
        (-80.0, 26.5),
        (-81.5, 25.2),
        (-83.0, 29.0),
        (-86.0, 30.3),
        (-89.5, 29.2),
        (-94.0, 29.5),
        (-97.3, 26.0),
        (-97.8, 22.5),
        (-95.5, 18.8),
        (-91.0, 18.6),
        (-90.5, 21.3),
        (-87.5, 21.5),
        (-86.8, 16.0),
        (-83.5, 15.0),
        (-83.0, 9.5),
        (-79.5, 9.0),
        (-80.5, 8.2),
        (-83.0, 8.5),
        (-85.5, 11.0),
        (-87.5, 13.0),
        (-91.5, 14.0),
        (-94.5, 16.2),
        (-97.5, 15.9),
        (-102.0, 17.8),
        (-105.5, 19.5),
        (-105.2, 22.5),
        (-107.5, 25.0),
        (-110.0, 27.2),
        (-112.8, 29.8),
        (-114.6, 31.6),
        (-117.2, 32.5),
        (-120.5, 34.5),
        (-124.0, 40.0),
        (-124.5, 44.0),
        (-124.6, 48.3),
        (-125.5, 50.2),
        (-128.0, 52.3),
        (-130.3, 54.5),
        (-134.0, 58.0),
        (-137.5, 59.0),
        (-141.5, 60.0),
        (-146.0, 61.0),
        (-150.0, 59.5),
        (-154.0, 58.3),
        (-158.5, 56.5),
        (-161.5, 55.5),
        (-158.0, 58.0),
        (-162.0, 59.8),
        (-165.5, 60.5),
        (-166.0, 62.5),
        (-168.0, 65.5),
    ];

    const GREENLAND: Line = &[
        (-45.0, 59.8),
        (-52.5, 63.5),
        (-53.5, 67.0),
        (-54.5, 70.5),
        (-58.0, 75.0),
        (-68.0, 76.0),
        (-61.0, 81.5),
        (-45.0, 83.0),
        (-30.0, 83.3),
        (-20.0, 81.5),
        (-17.0, 75.0),
        (-22.0, 70.5),
        (-26.0, 68.5),
        (-33.0, 67.3),
        (-40.0, 65.0),
        (-43.0, 60.5),
        (-45.0, 59.8),
    ];

    const SOUTH_AMERICA: Line = &[
        (-77.5, 8.5),
        (-75.5, 10.5),
        (-71.5, 12.2),
        (-64.0, 10.5),
        (-60.0, 8.5),
        (-56.0, 5.8),
        (-52.0, 4.5),
        (-50.0, 0.0),
        (-44.5, -2.8),
        (-35.2, -5.5),
        (-37.0, -11.0),
        (-39.0, -13.5),
        (-41.0, -22.0),
        (-48.0, -25.5),
        (-51.5, -31.0),
        (-56.5, -34.5),
        (-58.0, -38.5),
        (-62.0, -38.8),
        (-65.3, -45.0),
        (-68.5, -50.0),
        (-69.0, -52.0),
        (-68.5, -54.9),
        (-73.5, -50.0),
        (-73.0, -45.5),
        (-73.7, -41.8),
        (-71.5, -33.0),
        (-70.5, -25.0),
        (-70.3, -18.3),
        (-75.5, -14.5),
        (-81.3, -6.0),
        (-80.0, -3.5),
        (-77.8, 3.5),
        (-77.5, 8.5),
    ];

    const AFRICA: Line = &[
        (-5.8, 35.8),
        (-9.5, 31.5),
        (-13.0, 27.5),
        (-16.5, 21.0),
        (-17.5, 14.7),
        (-13.0, 9.5),
        (-8.0, 4.5),
        (-4.0, 5.2),
        (1.0, 5.8),
        (8.5, 4.3),
        (9.5, -1.0),
        (13.5, -12.0),
        (11.8, -17.0),
        (14.5, -22.5),
        (15.5, -28.0),
        (18.3, -33.9),
        (20.0, -34.8),
        (27.0, -33.7),
        (32.5, -28.5),
        (35.5, -23.5),
        (40.5, -15.0),
        (39.5, -8.0),
        (40.2, -3.0),
        (44.5, 1.5),
        (51.0, 10.4),
        (43.5, 11.5),
        (39.0, 15.5),
        (37.0, 21.0),
        (33.5, 27.8),
        (32.3, 31.2),
        (25.0, 31.8),
        (19.0, 30.5),
        (15.5, 32.4),
        (10.2, 37.2),
        (5.5, 36.8),
        (0.0, 36.8),
        (-3.0, 35.3),
        (-5.8, 35.8),
    ];

    const EUROPE: Line = &[
        (-9.5, 36.0),
        (-9.0, 38.7),
        (-9.5, 43.0),
        (-2.0, 43.5),
        (-1.2, 46.0),
        (-4.5, 48.5),
        (1.5, 50.9),
        (4.0, 52.0),
        (8.0, 54.0),
        (8.5, 57.0),
        (10.5, 57.8),
        (12.0, 56.0),
        (10.0, 59.0),
        (5.5, 58.5),
        (5.0, 62.0),
        (12.0, 65.5),
        (14.5, 68.0),
        (18.0, 69.5),
        (25.0, 71.0),
        (31.0, 70.5),
        (40.0, 67.5),
        (44.0, 68.0),
        (54.0, 69.0),
        (60.0, 69.5),
    ];

    const MEDITERRANEAN_EUROPE: Line = &[
        (-5.5, 36.0),
        (-0.5, 37.5),
        (0.2, 39.5),
        (3.2, 42.3),
        (6.5, 43.3),
        (9.0, 44.3),
        (10.3, 42.8),
        (14.0, 40.7),
        (15.6, 38.0),
        (16.5, 38.9),
        (18.5, 40.1),
        (16.0, 41.9),
        (13.8, 45.6),
        (15.0, 44.0),
        (19.0, 42.0),
        (21.0, 39.0),
        (22.5, 36.5),
        (24.0, 38.0),
        (26.0, 40.0),
        (29.0, 41.2),
    ];

    const ASIA: Line = &[
        (60.0, 69.5),
        (68.0, 68.5),
        (72.5, 67.0),
        (80.0, 73.0),
        (104.0, 77.5),
        (113.0, 74.0),
        (130.0, 71.5),
        (142.0, 72.0),
        (160.0, 69.5),
        (170.0, 70.0),
        (178.5, 68.5),
        (178.0, 66.5),
        (170.0, 60.0),
        (162.5, 56.3),
        (156.7, 50.9),
        (155.5, 57.0),
        (147.0, 59.3),
        (135.0, 55.0),
        (140.5, 50.0),
        (133.0, 43.0),
        (130.5, 42.3),
        (129.5, 37.0),
        (126.5, 34.5),
        (126.0, 37.5),
        (124.5, 39.5),
        (121.5, 38.8),
        (117.8, 38.8),
        (120.0, 35.0),
        (121.8, 31.5),
        (119.5, 26.0),
        (113.5, 22.5),
        (108.5, 21.5),
        (106.5, 18.5),
        (109.0, 13.0),
        (105.0, 9.0),
        (100.5, 12.5),
        (99.0, 7.5),
        (103.5, 1.5),
        (100.0, 5.5),
        (98.5, 10.0),
        (94.5, 16.0),
        (90.5, 22.0),
        (86.0, 20.5),
        (80.0, 15.5),
        (77.5, 8.2),
        (73.0, 15.5),
        (72.5, 21.5),
        (67.0, 24.5),
        (61.5, 25.0),
        (57.0, 26.0),
        (59.5, 22.5),
        (55.0, 17.0),
        (45.0, 12.8),
        (43.0, 16.0),
        (39.0, 21.5),
        (34.8, 28.0),
        (32.5, 31.0),
        (34.0, 36.5),
        (30.0, 36.3),
        (27.0, 37.0),
        (26.0, 40.0),
    ];

    const AUSTRALIA: Line = &[
        (113.5, -22.0),
        (114.0, -26.5),
        (115.5, -33.5),
        (119.0, -35.0),
        (124.0, -33.0),
        (129.5, -31.5),
        (132.5, -32.0),
        (137.5, -35.0),
        (139.5, -37.5),
        (144.0, -38.2),
        (147.0, -38.0),
        (150.0, -37.0),
        (153.0, -32.5),
        (153.5, -28.0),
        (152.5, -25.0),
        (149.5, -22.0),
        (146.5, -19.0),
        (145.5, -16.5),
        (142.5, -10.8),
        (141.5, -15.0),
        (139.5, -17.5),
        (136.5, -15.5),
        (135.5, -12.0),
        (131.0, -12.2),
        (129.5, -14.8),
        (126.5, -14.0),
        (122.0, -17.0),
        (119.0, -20.0),
        (113.5, -22.0),
    ];

    const ANTARCTICA: Line = &[
        (-180.0, -78.0),
        (-150.0, -77.0),
        (-120.0, -74.0),
        (-100.0, -73.0),
        (-75.0, -72.0),
        (-60.0, -64.0),
        (-55.0, -63.5),
        (-58.0, -64.5),
        (-45.0, -78.0),
        (-20.0, -71.0),
        (0.0, -70.0),
        (20.0, -70.0),
        (45.0, -67.0),
        (70.0, -68.0),
        (90.0, -66.0),
        (110.0, -66.0),
        (135.0, -66.0),
        (160.0, -71.0),
        (180.0, -78.0),
    ];

    const GREAT_BRITAIN: Line = &[
        (-5.5, 50.0),
        (-3.0, 50.6),
        (1.3, 51.2),
        (1.5, 52.8),
        (0.0, 53.5),
        (-1.5, 55.0),
        (-2.5, 56.5),
        (-4.0, 57.8),
        (-5.0, 58.5),
        (-6.0, 57.0),
        (-5.0, 55.5),
        (-3.0, 54.0),
        (-4.5, 53.3),
        (-5.0, 51.8),
        (-5.5, 50.0),
    ];

    const IRELAND: Line = &[
        (-6.0, 52.2),
        (-10.0, 51.6),
        (-10.0, 53.5),
        (-8.0, 55.2),
        (-6.0, 54.5),
        (-6.0, 52.2),
    ];

    const JAPAN: Line = &[
        (130.5, 31.5),
        (131.5, 33.5),
        (135.0, 34.5),
        (137.0, 34.7),
        (140.0, 35.5),
        (141.5, 38.5),
        (141.0, 41.5),
        (140.5, 42.0),
        (141.5, 45.3),
        (145.5, 44.0),
        (143.0, 42.0),
    ];

    const CUBA: Line = &[
        (-84.5, 22.0),
        (-80.0, 23.2),
        (-74.5, 20.2),
        (-77.5, 20.0),
        (-84.5, 22.0),
    ];

    const ICELAND: Line = &[
        (-24.0, 65.5),
        (-18.0, 66.5),
        (-14.0, 65.0),
        (-18.0, 63.5),
        (-22.5, 64.0),
        (-24.0, 65.5),
    ];

    const MADAGASCAR: Line = &[
        (44.0, -25.0),
        (43.5, -21.0),
        (44.5, -16.0),
        (49.0, -12.3),
        (50.0, -15.5),
        (47.0, -24.0),
        (44.0, -25.0),
    ];

    const NEW_ZEALAND: Line = &[
        (172.5, -34.5),
        (178.0, -37.5),
        (176.5, -41.0),
        (174.0, -41.0),
        (171.0, -44.0),
        (166.5, -46.0),
        (169.0, -46.5),
        (174.0, -41.5),
    ];

    pub const COASTLINES: &[Line] = &[
        NORTH_AMERICA,
        GREENLAND,
        SOUTH_AMERICA,
        AFRICA,
        EUROPE,
        MEDITERRANEAN_EUROPE,
        ASIA,
        AUSTRALIA,
        ANTARCTICA,
        GREAT_BRITAIN,
        IRELAND,
        JAPAN,
        CUBA,
        ICELAND,
        MADAGASCAR,
        NEW_ZEALAND,
    ];

    const US_CANADA: Line = &[
        (-123.0, 49.0),
        (-95.2, 49.0),
        (-92.0, 48.0),
        (-88.5, 48.0),
        (-84.0, 46.5),
        (-82.5, 45.3),
        (-82.0, 43.0),
        (-79.0, 43.3),
        (-76.5, 44.0),
        (-71.5, 45.0),
        (-69.2, 47.5),
        (-67.8, 47.1),
        (-67.1, 45.2),
    ];

    const ALASKA_CANADA: Line = &[(-141.0, 69.5), (-141.0, 60.3)];

    const US_MEXICO: Line = &[
        (-117.1, 32.5),
        (-114.8, 32.5),
        (-111.0, 31.3),
        (-106.5, 31.8),
        (-104.0, 29.5),
        (-102.0, 29.8),
        (-99.0, 27.5),
        (-97.1, 25.9),
    ];

    const MEXICO_GUATEMALA: Line = &[(-92.2, 14.5), (-91.0, 16.1), (-89.2, 17.8)];

    pub const BORDERS: &[Line] = &[US_CANADA, ALASKA_CANADA, US_MEXICO, MEXICO_GUATEMALA];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_geometry_is_sane() {
        let coastlines = builtin_coastlines();
        assert!(!coastlines.is_empty());
        for line in coastlines {
            assert!(line.points.len() >= 2);
            for &(lon, lat) in &line.points {
                assert!((-180.0..=180.0).contains(&lon), "lon {}", lon);
                assert!((-90.0..=90.0).contains(&lat), "lat {}", lat);
            }
        }
        assert!(!builtin_borders().is_empty());
    }

    #[test]
    fn test_load_geojson_linestring_and_polygon() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "type": "FeatureCollection",
                "features": [
                    {{"type": "Feature", "properties": {{}}, "geometry":
                        {{"type": "LineString", "coordinates": [[-100.0, 40.0], [-96.0, 42.0]]}}}},
                    {{"type": "Feature", "properties": {{}}, "geometry":
                        {{"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}}}}
                ]
            }}"#
        )
        .unwrap();

        let polylines = load_geojson(file.path()).unwrap();
        assert_eq!(polylines.len(), 2);
        assert_eq!(polylines[0].points, vec![(-100.0, 40.0), (-96.0, 42.0)]);
        assert_eq!(polylines[1].points.len(), 4);
    }

    #[test]
    fn test_load_geojson_rejects_short_positions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "type": "FeatureCollection",
                "features": [
                    {{"type": "Feature", "geometry":
                        {{"type": "LineString", "coordinates": [[1.0], [2.0, 3.0]]}}}}
                ]
            }}"#
        )
        .unwrap();

        assert!(load_geojson(file.path()).is_err());
    }

    #[test]
    fn test_missing_states_file_is_skipped() {
        let result = load_states(Some(Path::new("/nonexistent/states.geojson"))).unwrap();
        assert!(result.is_none());
    }
}
