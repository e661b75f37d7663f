use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use graticule::config::{FileConfig, defaults};
use graticule::layers::GraticuleGeometry;
use graticule::{Graticule, GraticuleConfig, Location, MapView, ProjectionKind, Viewport};

/// Compute a latitude/longitude grid overlay for a map view
///
/// Prints the grid lines and labels in viewport pixel coordinates as JSON.
///
/// Examples:
///   # World view in Web Mercator
///   graticule --zoom 0 --width 512 --height 512
///
///   # London at city scale, rotated 30 degrees
///   graticule --lat 51.5 --lon -0.12 --zoom 11 --heading 30
///
///   # Polar stereographic view written to a file
///   graticule -p stereographic --lat 90 --zoom 3 -o polar.json
///
///   # Use a config file
///   graticule --config my-view.toml
#[derive(Parser, Debug)]
#[command(name = "graticule")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches graticule.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map projection
    #[arg(short = 'p', long)]
    projection: Option<ProjectionKind>,

    /// Override the projection's CRS identifier
    #[arg(long)]
    crs_id: Option<String>,

    /// Latitude of the view center in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the view center in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Zoom level (0 shows the whole world in one 256px tile)
    #[arg(short = 'z', long, allow_hyphen_values = true)]
    zoom: Option<f64>,

    /// Map heading in degrees clockwise
    #[arg(long, allow_hyphen_values = true)]
    heading: Option<f64>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Minimum distance between grid lines in pixels
    #[arg(long)]
    min_line_distance: Option<f64>,

    /// Leave out the intersection labels
    #[arg(long)]
    no_labels: bool,

    /// Output JSON file path (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// The document written for one run
#[derive(Debug, Serialize)]
struct Output<'a> {
    projection: ProjectionKind,
    crs: String,
    center: Location,
    zoom: f64,
    heading: f64,
    width: f64,
    height: f64,
    graticule: &'a GraticuleGeometry,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {}", config_path.display());
        }
        Some(FileConfig::from_path(config_path)?)
    } else {
        FileConfig::load()
    };
    let file_config = file_config.unwrap_or_else(|| FileConfig {
        zoom: defaults::ZOOM,
        heading: defaults::HEADING,
        width: defaults::WIDTH,
        height: defaults::HEIGHT,
        ..FileConfig::default()
    });

    let projection_kind = args.projection.unwrap_or(file_config.projection);
    let crs_id = args.crs_id.clone().or_else(|| file_config.crs_id.clone());
    let lat = args.lat.or(file_config.lat).unwrap_or(defaults::LAT);
    let lon = args.lon.or(file_config.lon).unwrap_or(defaults::LON);
    let zoom = args.zoom.unwrap_or(file_config.zoom);
    let heading = args.heading.unwrap_or(file_config.heading);
    let width = args.width.unwrap_or(file_config.width);
    let height = args.height.unwrap_or(file_config.height);
    let output = args.output.clone().or_else(|| file_config.output.clone());

    let graticule_config = GraticuleConfig {
        min_line_distance: args
            .min_line_distance
            .unwrap_or(file_config.graticule.min_line_distance),
        show_labels: file_config.graticule.show_labels && !args.no_labels,
    };

    if !(-90.0..=90.0).contains(&lat) {
        bail!("Latitude must be between -90 and 90 degrees, got {}", lat);
    }
    if !lon.is_finite() {
        bail!("Longitude must be a finite number");
    }
    if !zoom.is_finite() || !heading.is_finite() {
        bail!("Zoom and heading must be finite numbers");
    }
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        bail!("Viewport size must be positive, got {}x{}", width, height);
    }
    if !(graticule_config.min_line_distance.is_finite()
        && graticule_config.min_line_distance > 0.0)
    {
        bail!(
            "Minimum line distance must be positive, got {}",
            graticule_config.min_line_distance
        );
    }

    let center = Location::new(lat, lon);
    let projection = projection_kind.build(center, crs_id.as_deref());
    info!("Projection: {} ({})", projection_kind, projection.crs_id());
    debug!("CRS value: {}", projection.crs_value());

    let map = MapView::new(projection, center, Viewport::new(width, height))
        .with_context(|| {
            format!(
                "Cannot center the {} projection at {}",
                projection_kind, center
            )
        })?
        .with_zoom_level(zoom)
        .with_heading(heading);
    debug!(
        "View: center={} zoom={} heading={} viewport={}x{}",
        map.center(),
        map.zoom_level(),
        map.heading(),
        width,
        height
    );

    let mut graticule = Graticule::new(graticule_config);
    graticule
        .on_viewport_or_style_changed(Some(&map))
        .context("Failed to compute graticule")?;

    let Some(geometry) = graticule.geometry() else {
        bail!("Graticule produced no geometry");
    };
    info!(
        "Spacing {}°: {} lines, {} labels",
        geometry.spacing,
        geometry.lines.len(),
        geometry.labels.len()
    );

    let document = Output {
        projection: projection_kind,
        crs: map.projection().crs_value(),
        center: map.center(),
        zoom: map.zoom_level(),
        heading: map.heading(),
        width,
        height,
        graticule: geometry,
    };
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize graticule")?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
