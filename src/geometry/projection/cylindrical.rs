//! Equirectangular and Web Mercator projections.
//!
//! Neither wraps longitude on the inverse transform, so map points east of
//! the anti-meridian come back as longitudes above 180.

use std::f64::consts::FRAC_PI_4;

use geo::{Coord, Rect, coord};

use super::{MapProjection, ScaleFactors};
use crate::domain::Location;
use crate::error::ProjectionError;
use crate::geometry::ellipsoid::METERS_PER_DEGREE;

/// Plate carrée scaled to metres at the equator.
#[derive(Debug, Clone, PartialEq)]
pub struct Equirectangular {
    crs_id: String,
}

impl Default for Equirectangular {
    fn default() -> Self {
        Self::new()
    }
}

impl Equirectangular {
    pub fn new() -> Self {
        Self {
            crs_id: "EPSG:4326".to_string(),
        }
    }

    pub fn with_crs_id(mut self, crs_id: impl Into<String>) -> Self {
        self.crs_id = crs_id.into();
        self
    }
}

impl MapProjection for Equirectangular {
    fn location_to_map(&self, location: &Location) -> Result<Coord<f64>, ProjectionError> {
        Ok(coord! {
            x: METERS_PER_DEGREE * location.longitude,
            y: METERS_PER_DEGREE * location.latitude,
        })
    }

    fn map_to_location(&self, point: Coord<f64>) -> Result<Location, ProjectionError> {
        Ok(Location::new(
            point.y / METERS_PER_DEGREE,
            point.x / METERS_PER_DEGREE,
        ))
    }

    fn crs_id(&self) -> &str {
        &self.crs_id
    }

    fn scale_factors(&self, location: &Location) -> Result<ScaleFactors, ProjectionError> {
        Ok(ScaleFactors {
            h: 1.0,
            k: 1.0 / location.latitude.to_radians().cos(),
        })
    }

    /// EPSG:4326 uses latitude/longitude axis order in degrees.
    fn bbox_value(&self, bounds: &Rect<f64>) -> String {
        let (min, max) = (bounds.min(), bounds.max());
        if self.crs_id != "EPSG:4326" {
            return format!("{:.6},{:.6},{:.6},{:.6}", min.x, min.y, max.x, max.y);
        }
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            min.y / METERS_PER_DEGREE,
            min.x / METERS_PER_DEGREE,
            max.y / METERS_PER_DEGREE,
            max.x / METERS_PER_DEGREE
        )
    }
}

/// Spherical Mercator as used by web map tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMercator {
    crs_id: String,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebMercator {
    /// Latitude at which the square world map ends
    pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

    pub fn new() -> Self {
        Self {
            crs_id: "EPSG:3857".to_string(),
        }
    }

    pub fn with_crs_id(mut self, crs_id: impl Into<String>) -> Self {
        self.crs_id = crs_id.into();
        self
    }

    /// Mercator y in degrees for a latitude in degrees
    pub fn latitude_to_y(latitude: f64) -> f64 {
        (FRAC_PI_4 + latitude.to_radians() / 2.0).tan().ln().to_degrees()
    }

    pub fn y_to_latitude(y: f64) -> f64 {
        y.to_radians().sinh().atan().to_degrees()
    }
}

impl MapProjection for WebMercator {
    fn location_to_map(&self, location: &Location) -> Result<Coord<f64>, ProjectionError> {
        if location.latitude.abs() >= 90.0 {
            return Err(ProjectionError::Unrepresentable {
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }

        Ok(coord! {
            x: METERS_PER_DEGREE * location.longitude,
            y: METERS_PER_DEGREE * Self::latitude_to_y(location.latitude),
        })
    }

    fn map_to_location(&self, point: Coord<f64>) -> Result<Location, ProjectionError> {
        Ok(Location::new(
            Self::y_to_latitude(point.y / METERS_PER_DEGREE),
            point.x / METERS_PER_DEGREE,
        ))
    }

    fn crs_id(&self) -> &str {
        &self.crs_id
    }

    fn scale_factors(&self, location: &Location) -> Result<ScaleFactors, ProjectionError> {
        if location.latitude.abs() >= 90.0 {
            return Err(ProjectionError::Unrepresentable {
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }
        let k = 1.0 / location.latitude.to_radians().cos();
        Ok(ScaleFactors { h: k, k })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equirectangular_roundtrip() {
        let proj = Equirectangular::new();
        for (lat, lon) in [(0.0, 0.0), (45.0, -120.0), (-80.0, 179.0), (10.0, 185.0)] {
            let loc = Location::new(lat, lon);
            let back = proj.map_to_location(proj.location_to_map(&loc).unwrap()).unwrap();
            assert_relative_eq!(back.latitude, lat, epsilon = 1e-9);
            assert_relative_eq!(back.longitude, lon, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_equirectangular_bbox_value_axis_order() {
        let proj = Equirectangular::new();
        let bounds = Rect::new(
            coord! { x: 10.0 * METERS_PER_DEGREE, y: 50.0 * METERS_PER_DEGREE },
            coord! { x: 12.0 * METERS_PER_DEGREE, y: 52.0 * METERS_PER_DEGREE },
        );
        assert_eq!(
            proj.bbox_value(&bounds),
            "50.000000,10.000000,52.000000,12.000000"
        );
    }

    #[test]
    fn test_web_mercator_known_values() {
        let proj = WebMercator::new();
        let p = proj.location_to_map(&Location::new(0.0, 180.0)).unwrap();
        assert_relative_eq!(p.x, 20_037_508.342_789_244, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);

        let edge = proj
            .location_to_map(&Location::new(WebMercator::MAX_LATITUDE, 0.0))
            .unwrap();
        assert_relative_eq!(edge.y, 20_037_508.342_789_244, epsilon = 1e-1);
    }

    #[test]
    fn test_web_mercator_roundtrip() {
        let proj = WebMercator::new();
        for (lat, lon) in [(51.5041, -0.1), (-33.9, 151.2), (84.0, 190.0)] {
            let loc = Location::new(lat, lon);
            let back = proj.map_to_location(proj.location_to_map(&loc).unwrap()).unwrap();
            assert_relative_eq!(back.latitude, lat, epsilon = 1e-9);
            assert_relative_eq!(back.longitude, lon, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_web_mercator_poles_unrepresentable() {
        let proj = WebMercator::new();
        assert!(proj.location_to_map(&Location::new(90.0, 0.0)).is_err());
        assert!(proj.location_to_map(&Location::new(-90.0, 0.0)).is_err());
    }

    #[test]
    fn test_default_bbox_value() {
        let proj = WebMercator::new();
        let bounds = Rect::new(coord! { x: 1.0, y: 2.0 }, coord! { x: -3.0, y: 4.5 });
        assert_eq!(proj.bbox_value(&bounds), "-3.000000,2.000000,1.000000,4.500000");
    }
}
