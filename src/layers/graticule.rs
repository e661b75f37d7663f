use geo::Coord;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{BoundingBox, Location};
use crate::error::GraticuleError;
use crate::geometry::bounds::viewport_bounding_box;
use crate::layers::labels::{LabelFormat, latitude_label, longitude_label};
use crate::layers::spacing::line_distance;
use crate::map::{MapView, TILE_SIZE};

fn default_min_line_distance() -> f64 {
    150.0
}

fn default_show_labels() -> bool {
    true
}

/// Settings that change the graticule geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraticuleConfig {
    /// Minimum distance between grid lines in pixels
    #[serde(default = "default_min_line_distance")]
    pub min_line_distance: f64,
    /// Emit labels at grid intersections, or lines only
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
}

impl Default for GraticuleConfig {
    fn default() -> Self {
        Self {
            min_line_distance: default_min_line_distance(),
            show_labels: default_show_labels(),
        }
    }
}

/// A grid line segment in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraticuleLine {
    pub start: Coord<f64>,
    pub end: Coord<f64>,
}

/// A label at a grid intersection in viewport coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraticuleLabel {
    pub anchor: Coord<f64>,
    /// Rotation about the anchor in degrees, equal to the map heading
    pub rotation: f64,
    pub latitude_text: String,
    pub longitude_text: String,
}

impl GraticuleLabel {
    /// Two-line label text, latitude first
    pub fn text(&self) -> String {
        format!("{}\n{}", self.latitude_text, self.longitude_text)
    }
}

/// One complete set of grid lines and labels for a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraticuleGeometry {
    /// Grid spacing in degrees
    pub spacing: f64,
    pub format: LabelFormat,
    pub bounds: BoundingBox,
    pub lines: Vec<GraticuleLine>,
    pub labels: Vec<GraticuleLabel>,
}

/// Latitude/longitude grid overlay
///
/// The host calls [`Graticule::on_viewport_or_style_changed`] whenever the
/// view or the configuration changes; the geometry is then rebuilt from
/// scratch. A failed rebuild keeps the previous geometry.
#[derive(Debug, Clone, Default)]
pub struct Graticule {
    config: GraticuleConfig,
    geometry: Option<GraticuleGeometry>,
}

impl Graticule {
    pub fn new(config: GraticuleConfig) -> Self {
        Self {
            config,
            geometry: None,
        }
    }

    pub fn config(&self) -> &GraticuleConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next change notification.
    pub fn set_config(&mut self, config: GraticuleConfig) {
        self.config = config;
    }

    pub fn geometry(&self) -> Option<&GraticuleGeometry> {
        self.geometry.as_ref()
    }

    pub fn lines(&self) -> &[GraticuleLine] {
        self.geometry.as_ref().map_or(&[], |g| g.lines.as_slice())
    }

    pub fn labels(&self) -> &[GraticuleLabel] {
        self.geometry.as_ref().map_or(&[], |g| g.labels.as_slice())
    }

    /// Rebuild the grid for the current state of `map`
    ///
    /// Without a map this is a no-op. On error the previous geometry stays
    /// in place and the error is returned for the host to report.
    pub fn on_viewport_or_style_changed(
        &mut self,
        map: Option<&MapView>,
    ) -> Result<(), GraticuleError> {
        let Some(map) = map else {
            return Ok(());
        };

        match build_graticule(map, &self.config) {
            Ok(geometry) => {
                self.geometry = Some(geometry);
                Ok(())
            }
            Err(e) => {
                warn!("Graticule update skipped: {}", e);
                Err(e)
            }
        }
    }
}

/// Grid values `ceil(start / spacing) * spacing, ... <= end`
fn grid_values(start: f64, end: f64, spacing: f64) -> Vec<f64> {
    let first = (start / spacing).ceil() * spacing;
    let mut values = Vec::new();
    let mut i = 0;

    loop {
        let value = first + i as f64 * spacing;
        if value > end {
            break;
        }
        values.push(value);
        i += 1;
    }

    values
}

/// Compute grid lines and labels for a map view
///
/// # Algorithm
/// 1. Geographic bounds of the viewport (four-corner approximation)
/// 2. Spacing from the zoom level and minimum pixel distance
/// 3. One line per parallel and meridian inside the bounds, endpoints
///    projected to viewport space
/// 4. One label per intersection, rotated by the map heading
///
/// Lines and labels touching a location the projection cannot represent
/// are left out.
pub fn build_graticule(
    map: &MapView,
    config: &GraticuleConfig,
) -> Result<GraticuleGeometry, GraticuleError> {
    let bounds = viewport_bounding_box(
        &map.viewport_transform(),
        &map.viewport(),
        map.projection(),
    )?;

    let spacing = line_distance(config.min_line_distance, map.zoom_level(), TILE_SIZE);
    let format = LabelFormat::for_spacing(spacing);
    let latitudes = grid_values(bounds.south, bounds.north, spacing);
    let longitudes = grid_values(bounds.west, bounds.east, spacing);

    debug!(
        spacing,
        south = bounds.south,
        west = bounds.west,
        north = bounds.north,
        east = bounds.east,
        "Computing graticule"
    );

    let mut lines = Vec::with_capacity(latitudes.len() + longitudes.len());
    let mut skipped = 0usize;

    let parallels = latitudes.iter().map(|&lat| {
        (
            Location::new(lat, bounds.west),
            Location::new(lat, bounds.east),
        )
    });
    let meridians = longitudes.iter().map(|&lon| {
        (
            Location::new(bounds.south, lon),
            Location::new(bounds.north, lon),
        )
    });

    for (from, to) in parallels.chain(meridians) {
        match (
            map.location_to_viewport_point(&from),
            map.location_to_viewport_point(&to),
        ) {
            (Ok(start), Ok(end)) => lines.push(GraticuleLine { start, end }),
            _ => skipped += 1,
        }
    }

    let mut labels = Vec::new();

    if config.show_labels {
        let rotation = map.heading();

        for &lat in &latitudes {
            for &lon in &longitudes {
                let Ok(anchor) = map.location_to_viewport_point(&Location::new(lat, lon)) else {
                    skipped += 1;
                    continue;
                };

                labels.push(GraticuleLabel {
                    anchor,
                    rotation,
                    latitude_text: latitude_label(lat, format),
                    longitude_text: longitude_label(lon, format),
                });
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unrepresentable lines/labels", skipped);
    }

    Ok(GraticuleGeometry {
        spacing,
        format,
        bounds,
        lines,
        labels,
    })
}
