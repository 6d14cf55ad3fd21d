//! Configuration management for the geoplot CLI.
//!
//! This module handles the layered configuration system with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::Domain;
use crate::error::{GeoplotError, Result};
use crate::projection::Projection;

/// Command-line arguments for the geoplot renderer
#[derive(Parser, Debug)]
#[command(name = "geoplot")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a flat binary file of little-endian f32 grid values
    pub data_file: PathBuf,

    /// Output image path
    #[arg(short, long, env = "GEOPLOT_OUTPUT", default_value = "map.png")]
    pub output: PathBuf,

    /// Grid spec: "global:RES" or "LAT1,LAT2,LON1,LON2:RES" in degrees
    #[arg(short, long, env = "GEOPLOT_GRID", default_value = "global:1")]
    pub grid: String,

    /// Map projection (mercator, lcc, equal-area)
    #[arg(short, long, env = "GEOPLOT_PROJECTION")]
    pub projection: Option<String>,

    /// Map domain (US, NA, CONUS, global)
    #[arg(short, long, env = "GEOPLOT_DOMAIN")]
    pub domain: Option<String>,

    /// Colormap for filled contours
    #[arg(long, env = "GEOPLOT_COLORMAP")]
    pub colormap: Option<String>,

    /// Explicit contour levels, comma separated
    #[arg(long)]
    pub levels: Option<String>,

    /// Map title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Output dpi
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Draw line contours instead of filled contours
    #[arg(long)]
    pub no_fill: bool,

    /// Path to JSON configuration file
    #[arg(short, long, env = "GEOPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEOPLOT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Plot defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Map projection name
    #[serde(default = "default_projection")]
    pub projection: String,

    /// Map domain name
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Colormap for filled contours
    #[serde(default = "default_colormap")]
    pub colormap: String,

    /// Output dpi
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Plot defaults
    #[serde(default)]
    pub plot: PlotConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    pub fn load() -> Result<(Self, Args)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args))
    }

    /// Build the configuration for already-parsed arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(projection) = &args.projection {
            config.plot.projection = projection.clone();
        }
        if let Some(domain) = &args.domain {
            config.plot.domain = domain.clone();
        }
        if let Some(colormap) = &args.colormap {
            config.plot.colormap = colormap.clone();
        }
        if let Some(dpi) = args.dpi {
            config.plot.dpi = dpi;
        }
        config.log_level = args.log_level.clone();

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.plot = other.plot;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Projection and domain must resolve
        Projection::from_str(&self.plot.projection)?;
        Domain::from_str(&self.plot.domain)?;

        // Colormap must be registered
        crate::colormaps::get_colormap(&self.plot.colormap)?;

        if self.plot.dpi == 0 {
            return Err(GeoplotError::Config {
                message: "dpi cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(GeoplotError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plot: PlotConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            projection: default_projection(),
            domain: default_domain(),
            colormap: default_colormap(),
            dpi: default_dpi(),
        }
    }
}

// Default value functions for serde
fn default_projection() -> String {
    "equal-area".to_string()
}

fn default_domain() -> String {
    "US".to_string()
}

fn default_colormap() -> String {
    "viridis".to_string()
}

fn default_dpi() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Parse a CLI grid spec: `global:RES` or `LAT1,LAT2,LON1,LON2:RES`.
pub fn parse_grid_spec(spec: &str) -> Result<crate::geogrid::GeoGrid> {
    let (range, res) = spec.rsplit_once(':').ok_or_else(|| GeoplotError::Config {
        message: format!("Grid spec '{}' is missing a ':RES' suffix", spec),
    })?;
    let resolution: f64 = res.parse().map_err(|_| GeoplotError::Config {
        message: format!("Invalid grid resolution: {}", res),
    })?;
    if range == "global" {
        return crate::geogrid::GeoGrid::global(resolution);
    }
    let parts: Vec<&str> = range.split(',').collect();
    if parts.len() != 4 {
        return Err(GeoplotError::Config {
            message: format!(
                "Grid spec '{}' must be 'global:RES' or 'LAT1,LAT2,LON1,LON2:RES'",
                spec
            ),
        });
    }
    let mut bounds = [0.0f64; 4];
    for (slot, part) in bounds.iter_mut().zip(parts.iter()) {
        *slot = part.parse().map_err(|_| GeoplotError::Config {
            message: format!("Invalid grid bound: {}", part),
        })?;
    }
    crate::geogrid::GeoGrid::regular(bounds[0], bounds[1], bounds[2], bounds[3], resolution)
}

/// Parse a comma-separated level list.
pub fn parse_levels(spec: &str) -> Result<Vec<f32>> {
    spec.split(',')
        .map(|part| {
            part.trim().parse::<f32>().map_err(|_| GeoplotError::Config {
                message: format!("Invalid contour level: {}", part),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.plot.projection, "equal-area");
        assert_eq!(config.plot.domain, "US");
        assert_eq!(config.plot.colormap, "viridis");
        assert_eq!(config.plot.dpi, 100);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.plot.projection = "robinson".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.plot.domain = "europe".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.plot.colormap = "jet".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.plot.dpi = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_grid_spec() {
        let grid = parse_grid_spec("global:1").unwrap();
        assert_eq!(grid.num_y(), 181);

        let grid = parse_grid_spec("20,60,230,300:2.5").unwrap();
        assert_eq!(grid.num_y(), 17);

        assert!(parse_grid_spec("global").is_err());
        assert!(parse_grid_spec("20,60,230:2.5").is_err());
        assert!(parse_grid_spec("a,b,c,d:1").is_err());
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!(
            parse_levels("5400, 5460, 5520").unwrap(),
            vec![5400.0, 5460.0, 5520.0]
        );
        assert!(parse_levels("5400,x").is_err());
    }
}
