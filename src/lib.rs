//! # geoplot
//!
//! Geographic contour-map plotting for gridded meteorological data.
//!
//! Two small objects compose into one plotting call: a [`Field`] holds a
//! gridded data array plus rendering hints (contour levels, colors,
//! smoothing, fill options), and a [`Map`] resolves a named projection and
//! domain into a basemap with coastlines, borders and gridlines, ready to
//! plot fields on and save as a raster image.
//!
//! ```no_run
//! use geoplot::{Domain, Field, GeoGrid, Map, Projection};
//! use ndarray::Array1;
//!
//! # fn main() -> geoplot::Result<()> {
//! let grid = GeoGrid::global(1.0)?;
//! let data = Array1::zeros(grid.num_x() * grid.num_y());
//! let field = Field::from_1d(data, grid);
//!
//! let mut map = Map::new(Projection::Mercator, Domain::Global)?;
//! map.plot(&field)?;
//! map.save("map.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Resolution**: named `(projection, domain)` pairs translate to fixed
//!   geographic extents through lookup tables
//! - **Rendering**: each map owns its canvas layers; fills render through
//!   the projection inverse, line work through marching squares
//! - **Output**: PNG or any raster format the image library supports

pub mod canvas;
pub mod colorbar;
pub mod colormaps;
pub mod config;
pub mod contour;
pub mod domain;
pub mod error;
pub mod field;
pub mod geogrid;
pub mod interpolation;
pub mod loader;
pub mod logging;
pub mod map;
pub mod overlay;
pub mod projection;
pub mod text;

pub use colorbar::{CbarEnds, CbarType};
pub use colormaps::ColorSpacing;
pub use config::Config;
pub use domain::{resolve_extent, supported_domains, supported_projections, Domain, MapExtent};
pub use error::{GeoplotError, Result};
pub use field::{ContourColors, Field, FillColors, Levels};
pub use geogrid::GeoGrid;
pub use logging::{init_tracing, log_error, log_timed_operation};
pub use map::{Map, MapOptions};
pub use projection::Projection;
