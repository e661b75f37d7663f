use geo::{Coord, coord};
use tracing::debug;

use crate::domain::{Location, Viewport};
use crate::error::{GraticuleError, ProjectionError};
use crate::geometry::projection::MapProjection;
use crate::geometry::transform::ViewTransform;

/// Pixel size of a map tile; zoom level 0 shows the world in one tile
pub const TILE_SIZE: f64 = 256.0;

/// The state of an interactive map display
///
/// Holds everything a graticule needs from its host: the active projection,
/// the view center, zoom level, heading and viewport size.
#[derive(Debug)]
pub struct MapView {
    projection: Box<dyn MapProjection>,
    center: Location,
    center_map: Coord<f64>,
    zoom_level: f64,
    heading: f64,
    viewport: Viewport,
}

impl MapView {
    /// Create a view centered at `center`
    ///
    /// Azimuthal projections are re-centered on the view center. Fails if the
    /// projection cannot represent the center.
    pub fn new(
        projection: Box<dyn MapProjection>,
        center: Location,
        viewport: Viewport,
    ) -> Result<Self, ProjectionError> {
        let mut view = Self {
            projection,
            center,
            center_map: coord! { x: 0.0, y: 0.0 },
            zoom_level: 0.0,
            heading: 0.0,
            viewport,
        };
        view.set_center(center)?;
        Ok(view)
    }

    pub fn with_zoom_level(mut self, zoom_level: f64) -> Self {
        self.set_zoom_level(zoom_level);
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.set_heading(heading);
        self
    }

    pub fn projection(&self) -> &dyn MapProjection {
        self.projection.as_ref()
    }

    pub fn center(&self) -> Location {
        self.center
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    /// Map rotation in degrees, in [0, 360)
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_center(&mut self, center: Location) -> Result<(), ProjectionError> {
        if self.projection.is_azimuthal() {
            self.projection.set_center(center);
        }
        self.center_map = self.projection.location_to_map(&center)?;
        self.center = center;
        debug!(
            latitude = center.latitude,
            longitude = center.longitude,
            "map center changed"
        );
        Ok(())
    }

    pub fn set_zoom_level(&mut self, zoom_level: f64) {
        self.zoom_level = zoom_level;
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading.rem_euclid(360.0);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Viewport pixels per map unit at the current zoom level
    pub fn view_scale(&self) -> f64 {
        2f64.powf(self.zoom_level) * TILE_SIZE / (360.0 * self.projection.true_scale())
    }

    /// Map space -> viewport space
    ///
    /// Centers the view, flips y (map y points north, viewport y points
    /// down), rotates by the heading and moves the origin to the middle of
    /// the viewport.
    pub fn viewport_transform(&self) -> ViewTransform {
        let scale = self.view_scale();
        let (cx, cy) = self.viewport.center();

        ViewTransform::translation(-self.center_map.x, -self.center_map.y)
            .then(&ViewTransform::scaling(scale, -scale))
            .then(&ViewTransform::rotation(self.heading))
            .then(&ViewTransform::translation(cx, cy))
    }

    pub fn location_to_viewport_point(
        &self,
        location: &Location,
    ) -> Result<Coord<f64>, ProjectionError> {
        let map_point = self.projection.location_to_map(location)?;
        Ok(self.viewport_transform().apply(map_point))
    }

    pub fn viewport_point_to_location(&self, point: Coord<f64>) -> Result<Location, GraticuleError> {
        let map_point = self.viewport_transform().inverse()?.apply(point);
        Ok(self.projection.map_to_location(map_point)?)
    }
}
