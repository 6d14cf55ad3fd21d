//! Render a blank map for every supported (projection, domain) pair.
//!
//! Unsupported combinations (the conic family rejects the global domain)
//! are skipped silently, so the output directory ends up with one image
//! per valid pair. Useful for generating reference images for tests and
//! documentation.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use geoplot::{supported_domains, supported_projections, Domain, Map, Projection};

#[derive(Parser, Debug)]
#[command(name = "render-domains")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the images are written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Output dpi
    #[arg(long, default_value = "100")]
    dpi: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEOPLOT_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    geoplot::init_tracing(&args.log_level);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Cannot create output directory {}", args.out_dir.display()))?;

    let mut written = 0;
    for proj_name in supported_projections() {
        let projection = Projection::from_str(proj_name)?;
        for domain_name in supported_domains() {
            let domain = Domain::from_str(domain_name)?;
            let map = match Map::new(projection, domain) {
                Ok(map) => map,
                Err(e) => {
                    debug!(
                        projection = proj_name,
                        domain = domain_name,
                        error = %e,
                        "Skipping unsupported combination"
                    );
                    continue;
                }
            };
            let path = args
                .out_dir
                .join(format!("empty-map-{}-{}.png", proj_name, domain_name));
            map.save_with_dpi(&path, args.dpi)?;
            written += 1;
        }
    }

    info!(count = written, dir = %args.out_dir.display(), "Wrote domain images");
    Ok(())
}
