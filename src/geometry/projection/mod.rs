pub mod azimuthal;
pub mod cylindrical;

use std::fmt;

use clap::ValueEnum;
use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

use crate::domain::{BoundingBox, Location};
use crate::error::ProjectionError;
use crate::geometry::bounds::rect_from_points;
use crate::geometry::ellipsoid::METERS_PER_DEGREE;

pub use azimuthal::{Azimuthal, AzimuthalProjection};
pub use cylindrical::{Equirectangular, WebMercator};

/// Local scale distortion at a location (Snyder's notation).
///
/// `h` is the scale along the meridian (radial direction for azimuthal
/// projections), `k` the scale perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub h: f64,
    pub k: f64,
}

/// Trait for map projections supporting forward and inverse transforms.
///
/// Locations are in degrees; map points are in projection units (metres
/// for every projection here).
pub trait MapProjection: fmt::Debug + Send + Sync {
    /// Forward: location -> map point
    fn location_to_map(&self, location: &Location) -> Result<Coord<f64>, ProjectionError>;

    /// Inverse: map point -> location
    fn map_to_location(&self, point: Coord<f64>) -> Result<Location, ProjectionError>;

    /// Reference system identifier, e.g. "EPSG:3857" or "AUTO2:97001"
    fn crs_id(&self) -> &str;

    /// CRS parameter value for map service requests.
    fn crs_value(&self) -> String {
        self.crs_id().to_string()
    }

    /// Map units per degree of arc at the projection's true-scale line.
    fn true_scale(&self) -> f64 {
        METERS_PER_DEGREE
    }

    fn scale_factors(&self, location: &Location) -> Result<ScaleFactors, ProjectionError>;

    /// Projection center for projections that have one.
    fn center(&self) -> Option<Location> {
        None
    }

    /// Move the projection center. No-op for projections without one.
    fn set_center(&mut self, _center: Location) {}

    fn is_azimuthal(&self) -> bool {
        false
    }

    /// Geographic extent of a projection whose map plane is bounded, `None`
    /// when every map point has a location.
    fn domain_bounds(&self) -> Option<BoundingBox> {
        None
    }

    /// Map-space rectangle enclosing the projected corners of `bbox`.
    fn bounding_box_to_bounds(&self, bbox: &BoundingBox) -> Result<Rect<f64>, ProjectionError> {
        let points = bbox
            .corners()
            .iter()
            .map(|corner| self.location_to_map(corner))
            .collect::<Result<Vec<_>, _>>()?;

        // four corners, never empty
        rect_from_points(&points).ok_or(ProjectionError::Unrepresentable {
            latitude: bbox.south,
            longitude: bbox.west,
        })
    }

    /// Bounds formatted as a BBOX request parameter.
    fn bbox_value(&self, bounds: &Rect<f64>) -> String {
        let (min, max) = (bounds.min(), bounds.max());
        format!("{:.6},{:.6},{:.6},{:.6}", min.x, min.y, max.x, max.y)
    }
}

/// Selectable projection families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectionKind {
    #[default]
    WebMercator,
    Equirectangular,
    AzimuthalEquidistant,
    Gnomonic,
    Stereographic,
    Orthographic,
}

impl ProjectionKind {
    /// Build a projection centered at `center`, optionally overriding the
    /// default CRS identifier.
    pub fn build(self, center: Location, crs_id: Option<&str>) -> Box<dyn MapProjection> {
        match self {
            ProjectionKind::WebMercator => {
                let mut proj = WebMercator::new();
                if let Some(id) = crs_id {
                    proj = proj.with_crs_id(id);
                }
                Box::new(proj)
            }
            ProjectionKind::Equirectangular => {
                let mut proj = Equirectangular::new();
                if let Some(id) = crs_id {
                    proj = proj.with_crs_id(id);
                }
                Box::new(proj)
            }
            ProjectionKind::AzimuthalEquidistant
            | ProjectionKind::Gnomonic
            | ProjectionKind::Stereographic
            | ProjectionKind::Orthographic => {
                let mut proj = match self {
                    ProjectionKind::Gnomonic => AzimuthalProjection::gnomonic(center),
                    ProjectionKind::Stereographic => AzimuthalProjection::stereographic(center),
                    ProjectionKind::Orthographic => AzimuthalProjection::orthographic(center),
                    _ => AzimuthalProjection::equidistant(center),
                };
                if let Some(id) = crs_id {
                    proj = proj.with_crs_id(id);
                }
                Box::new(proj)
            }
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectionKind::WebMercator => "web-mercator",
            ProjectionKind::Equirectangular => "equirectangular",
            ProjectionKind::AzimuthalEquidistant => "azimuthal-equidistant",
            ProjectionKind::Gnomonic => "gnomonic",
            ProjectionKind::Stereographic => "stereographic",
            ProjectionKind::Orthographic => "orthographic",
        };
        f.write_str(name)
    }
}
