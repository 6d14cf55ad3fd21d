//! Domain resolution for map construction.
//!
//! A domain is either one of a small set of named regions or an explicit
//! `(lat1, lat2, lon1, lon2)` box. This module owns the lookup tables that
//! translate a `(projection, domain)` pair into the concrete geographic
//! extent a map is built from.
//!
//! Named domains are matched exactly and case-sensitively; there is no
//! normalization or fuzzy matching.

use std::fmt;
use std::str::FromStr;

use crate::error::{GeoplotError, Result};
use crate::projection::Projection;

/// Supported projection names, as accepted by [`Projection::from_str`].
pub const SUPPORTED_PROJECTIONS: [&str; 3] = ["mercator", "lcc", "equal-area"];

/// Supported named domains across all projections.
pub const SUPPORTED_DOMAINS: [&str; 4] = ["US", "NA", "CONUS", "global"];

/// Named domains accepted by the conic family (lcc / equal-area).
const CONIC_DOMAIN_NAMES: [&str; 3] = ["US", "NA", "CONUS"];

/// A geographic domain: a named region or a custom box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// United States including Alaska
    Us,
    /// North America
    NorthAmerica,
    /// Contiguous United States
    Conus,
    /// The whole globe
    Global,
    /// Custom box in degrees: `(lat1, lat2, lon1, lon2)`
    Custom {
        lat1: f64,
        lat2: f64,
        lon1: f64,
        lon2: f64,
    },
}

impl Domain {
    /// The canonical name of a named domain, or `"custom"` for a box.
    pub fn name(&self) -> &'static str {
        match self {
            Domain::Us => "US",
            Domain::NorthAmerica => "NA",
            Domain::Conus => "CONUS",
            Domain::Global => "global",
            Domain::Custom { .. } => "custom",
        }
    }
}

impl FromStr for Domain {
    type Err = GeoplotError;

    /// Exact, case-sensitive match on the named domains.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "US" => Ok(Domain::Us),
            "NA" => Ok(Domain::NorthAmerica),
            "CONUS" => Ok(Domain::Conus),
            "global" => Ok(Domain::Global),
            _ => Err(GeoplotError::InvalidParameter {
                param: "domain".to_string(),
                message: format!(
                    "Unknown domain: {} (named domains are {})",
                    s,
                    SUPPORTED_DOMAINS.join(", ")
                ),
            }),
        }
    }
}

impl From<(f64, f64, f64, f64)> for Domain {
    fn from((lat1, lat2, lon1, lon2): (f64, f64, f64, f64)) -> Self {
        Domain::Custom {
            lat1,
            lat2,
            lon1,
            lon2,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Custom {
                lat1,
                lat2,
                lon1,
                lon2,
            } => write!(f, "({}, {}, {}, {})", lat1, lat2, lon1, lon2),
            named => write!(f, "{}", named.name()),
        }
    }
}

/// Extent of a cylindrical-family map: a lat/lon box plus the interval at
/// which parallels and meridians are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalBounds {
    pub lat_range: (f64, f64),
    pub lon_range: (f64, f64),
    pub gridline_interval: f64,
}

/// Extent of a conic/azimuthal-family map: a plane rectangle in meters
/// centered on a geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicExtent {
    pub width: f64,
    pub height: f64,
    pub center_lat: f64,
    pub center_lon: f64,
}

/// The resolved geographic extent of a map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapExtent {
    Cylindrical(CylindricalBounds),
    Conic(ConicExtent),
}

/// Gridline interval applied to custom cylindrical boxes.
const CUSTOM_BOX_GRIDLINE_INTERVAL: f64 = 10.0;

/// Named-domain extents for the cylindrical (mercator) family.
const CYLINDRICAL_DOMAINS: [(Domain, CylindricalBounds); 4] = [
    (
        Domain::Us,
        CylindricalBounds {
            lat_range: (25.0, 72.0),
            lon_range: (190.0, 300.0),
            gridline_interval: 10.0,
        },
    ),
    (
        Domain::NorthAmerica,
        CylindricalBounds {
            lat_range: (14.0, 72.0),
            lon_range: (190.0, 300.0),
            gridline_interval: 10.0,
        },
    ),
    (
        Domain::Conus,
        CylindricalBounds {
            lat_range: (24.0, 50.0),
            lon_range: (230.0, 295.0),
            gridline_interval: 5.0,
        },
    ),
    (
        Domain::Global,
        CylindricalBounds {
            lat_range: (-90.0, 90.0),
            lon_range: (0.0, 360.0),
            gridline_interval: 30.0,
        },
    ),
];

/// Named-domain extents for the conic family (lcc / equal-area).
const CONIC_DOMAINS: [(Domain, ConicExtent); 3] = [
    (
        Domain::Us,
        ConicExtent {
            width: 8_000_000.0,
            height: 6_600_000.0,
            center_lat: 53.0,
            center_lon: 260.0,
        },
    ),
    (
        Domain::NorthAmerica,
        ConicExtent {
            width: 8_000_000.0,
            height: 7_500_000.0,
            center_lat: 48.0,
            center_lon: 260.0,
        },
    ),
    (
        Domain::Conus,
        ConicExtent {
            width: 5_000_000.0,
            height: 3_200_000.0,
            center_lat: 39.0,
            center_lon: 262.0,
        },
    ),
];

/// Resolve a `(projection, domain)` pair into a concrete map extent.
///
/// The mercator family accepts the four named domains or a custom box; the
/// conic family accepts `US`, `NA` and `CONUS` only. The asymmetry (no
/// `global` or custom box for lcc / equal-area) is long-standing behavior
/// and is kept as-is.
pub fn resolve_extent(projection: Projection, domain: &Domain) -> Result<MapExtent> {
    match projection {
        Projection::Mercator => {
            if let Domain::Custom {
                lat1,
                lat2,
                lon1,
                lon2,
            } = *domain
            {
                return Ok(MapExtent::Cylindrical(CylindricalBounds {
                    lat_range: (lat1, lat2),
                    lon_range: (lon1, lon2),
                    gridline_interval: CUSTOM_BOX_GRIDLINE_INTERVAL,
                }));
            }
            CYLINDRICAL_DOMAINS
                .iter()
                .find(|(d, _)| d == domain)
                .map(|(_, bounds)| MapExtent::Cylindrical(*bounds))
                .ok_or_else(|| GeoplotError::InvalidDomain {
                    given: domain.to_string(),
                    projection: projection.as_str().to_string(),
                    valid: format!(
                        "one of {}, or a custom (lat1, lat2, lon1, lon2) box",
                        SUPPORTED_DOMAINS.join(", ")
                    ),
                })
        }
        Projection::LambertConformal | Projection::EqualArea => CONIC_DOMAINS
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, extent)| MapExtent::Conic(*extent))
            .ok_or_else(|| GeoplotError::InvalidDomain {
                given: domain.to_string(),
                projection: projection.as_str().to_string(),
                valid: format!("one of {}", CONIC_DOMAIN_NAMES.join(", ")),
            }),
    }
}

/// Names of all supported projections.
pub fn supported_projections() -> &'static [&'static str] {
    &SUPPORTED_PROJECTIONS
}

/// Names of all supported named domains.
pub fn supported_domains() -> &'static [&'static str] {
    &SUPPORTED_DOMAINS
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_domain_parsing_is_exact() {
        assert_eq!("US".parse::<Domain>().unwrap(), Domain::Us);
        assert_eq!("NA".parse::<Domain>().unwrap(), Domain::NorthAmerica);
        assert_eq!("CONUS".parse::<Domain>().unwrap(), Domain::Conus);
        assert_eq!("global".parse::<Domain>().unwrap(), Domain::Global);

        // No case normalization
        assert!("us".parse::<Domain>().is_err());
        assert!("Global".parse::<Domain>().is_err());
        assert!("conus ".parse::<Domain>().is_err());
    }

    #[test]
    fn test_mercator_named_domains() {
        let extent = resolve_extent(Projection::Mercator, &Domain::Us).unwrap();
        assert_eq!(
            extent,
            MapExtent::Cylindrical(CylindricalBounds {
                lat_range: (25.0, 72.0),
                lon_range: (190.0, 300.0),
                gridline_interval: 10.0,
            })
        );

        let extent = resolve_extent(Projection::Mercator, &Domain::Global).unwrap();
        match extent {
            MapExtent::Cylindrical(b) => {
                assert_eq!(b.lat_range, (-90.0, 90.0));
                assert_eq!(b.lon_range, (0.0, 360.0));
                assert_eq!(b.gridline_interval, 30.0);
            }
            MapExtent::Conic(_) => panic!("global must resolve to a cylindrical extent"),
        }
    }

    #[test]
    fn test_mercator_custom_box() {
        let domain = Domain::from((10.0, 20.0, 30.0, 40.0));
        let extent = resolve_extent(Projection::Mercator, &domain).unwrap();
        assert_eq!(
            extent,
            MapExtent::Cylindrical(CylindricalBounds {
                lat_range: (10.0, 20.0),
                lon_range: (30.0, 40.0),
                gridline_interval: 10.0,
            })
        );
    }

    #[test]
    fn test_conic_named_domains() {
        for projection in [Projection::LambertConformal, Projection::EqualArea] {
            let extent = resolve_extent(projection, &Domain::Conus).unwrap();
            assert_eq!(
                extent,
                MapExtent::Conic(ConicExtent {
                    width: 5_000_000.0,
                    height: 3_200_000.0,
                    center_lat: 39.0,
                    center_lon: 262.0,
                })
            );
        }
    }

    #[test]
    fn test_conic_rejects_global_and_custom() {
        let err = resolve_extent(Projection::LambertConformal, &Domain::Global).unwrap_err();
        match err {
            GeoplotError::InvalidDomain { projection, .. } => assert_eq!(projection, "lcc"),
            other => panic!("expected InvalidDomain, got {:?}", other),
        }

        let custom = Domain::from((10.0, 20.0, 30.0, 40.0));
        assert!(resolve_extent(Projection::EqualArea, &custom).is_err());
    }
}
