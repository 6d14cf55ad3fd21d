//! geoplot - render gridded meteorological data to a map image.
//!
//! This is the main entry point for the geoplot command-line renderer.

use std::str::FromStr;

use tracing::{error, info};

use geoplot::config::{parse_grid_spec, parse_levels};
use geoplot::{
    log_error, log_timed_operation, Config, Domain, Field, FillColors, Map, MapOptions,
    Projection, Result,
};

fn main() -> Result<()> {
    // Initialize tracing with a default level first
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Starting geoplot v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let (config, args) = Config::load().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    // Re-initialize tracing with the configured level
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }

    let projection = Projection::from_str(&config.plot.projection)?;
    let domain = Domain::from_str(&config.plot.domain)?;

    info!("Loading grid data: {:?}", args.data_file);
    let geogrid = parse_grid_spec(&args.grid)?;
    let data = geoplot::loader::load_f32_grid(&args.data_file, &geogrid)?;

    let mut field = Field::from_2d(data, geogrid);
    if let Some(levels) = &args.levels {
        field = field.with_levels(parse_levels(levels)?);
    }
    field = if args.no_fill {
        field.with_fill_colors(None)
    } else {
        field.with_fill_colors(Some(FillColors::Auto {
            colormap: config.plot.colormap.clone(),
        }))
    };

    let mut map = Map::with_options(MapOptions {
        projection,
        domain,
        title: args.title.clone(),
        ..MapOptions::default()
    })
    .map_err(|e| {
        log_error(&e, "map construction");
        e
    })?;

    log_timed_operation("plot", || map.plot(&field)).map_err(|e| {
        log_error(&e, "field plotting");
        e
    })?;

    map.save_with_dpi(&args.output, config.plot.dpi)?;
    info!("Wrote {}", args.output.display());
    Ok(())
}
