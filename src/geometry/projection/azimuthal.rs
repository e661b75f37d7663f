//! Azimuthal projections: Equidistant, Gnomonic, Orthographic, Stereographic.
//!
//! All variants share the same structure. A location is reduced to the
//! great-circle azimuth and angular distance from the projection center,
//! and only the radial function mapping angular distance to map distance
//! differs between variants.

use std::f64::consts::{FRAC_PI_2, PI};

use geo::{Coord, coord};

use super::{MapProjection, ScaleFactors};
use crate::domain::{BoundingBox, Location};
use crate::error::ProjectionError;
use crate::geometry::ellipsoid::{WGS84, WGS84_EQUATORIAL_RADIUS};
use crate::geometry::geodesy::{azimuth_distance, destination};

/// Radial function of an azimuthal projection together with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Azimuthal {
    /// `r = R * d`
    Equidistant { radius: f64 },
    /// `r = R_center * tan(d)`, near hemisphere only
    Gnomonic { center_radius: f64 },
    /// `r = R * sin(d)`, near hemisphere only
    Orthographic { radius: f64 },
    /// `r = 2R * tan(d / 2)`, everything but the antipode
    Stereographic { radius: f64 },
}

impl Azimuthal {
    /// Map distance for an angular distance in radians, `None` where the
    /// projection cannot represent it.
    pub fn map_distance(&self, distance: f64) -> Option<f64> {
        match *self {
            Azimuthal::Equidistant { radius } => Some(radius * distance),
            Azimuthal::Gnomonic { center_radius } => {
                (distance < FRAC_PI_2).then(|| center_radius * distance.tan())
            }
            Azimuthal::Orthographic { radius } => {
                (distance <= FRAC_PI_2).then(|| radius * distance.sin())
            }
            Azimuthal::Stereographic { radius } => {
                (PI - distance > 1e-10).then(|| 2.0 * radius * (distance / 2.0).tan())
            }
        }
    }

    /// Angular distance in radians for a map distance, `None` outside the
    /// projection's domain.
    pub fn angular_distance(&self, map_distance: f64) -> Option<f64> {
        match *self {
            Azimuthal::Equidistant { radius } => Some(map_distance / radius),
            Azimuthal::Gnomonic { center_radius } => Some((map_distance / center_radius).atan()),
            Azimuthal::Orthographic { radius } => {
                let ratio = map_distance / radius;
                // tolerate rounding at the rim of the disc
                (ratio <= 1.0 + 1e-12).then(|| ratio.min(1.0).asin())
            }
            Azimuthal::Stereographic { radius } => {
                Some(2.0 * (map_distance / (2.0 * radius)).atan())
            }
        }
    }

    fn scale_factors(&self, distance: f64) -> Option<ScaleFactors> {
        match *self {
            Azimuthal::Equidistant { .. } => {
                let sin_d = distance.sin();
                if distance == 0.0 {
                    Some(ScaleFactors { h: 1.0, k: 1.0 })
                } else if sin_d.abs() < 1e-12 {
                    None
                } else {
                    Some(ScaleFactors {
                        h: 1.0,
                        k: distance / sin_d,
                    })
                }
            }
            Azimuthal::Gnomonic { .. } => (distance < FRAC_PI_2).then(|| {
                let cos_d = distance.cos();
                ScaleFactors {
                    h: 1.0 / (cos_d * cos_d),
                    k: 1.0 / cos_d,
                }
            }),
            Azimuthal::Orthographic { .. } => (distance <= FRAC_PI_2).then(|| ScaleFactors {
                h: distance.cos(),
                k: 1.0,
            }),
            Azimuthal::Stereographic { .. } => (PI - distance > 1e-10).then(|| {
                let s = 2.0 / (1.0 + distance.cos());
                ScaleFactors { h: s, k: s }
            }),
        }
    }
}

/// An azimuthal projection around a movable center
#[derive(Debug, Clone, PartialEq)]
pub struct AzimuthalProjection {
    variant: Azimuthal,
    center: Location,
    crs_id: String,
}

impl AzimuthalProjection {
    pub fn new(variant: Azimuthal, center: Location, crs_id: impl Into<String>) -> Self {
        let mut proj = Self {
            variant,
            center,
            crs_id: crs_id.into(),
        };
        proj.set_center(center);
        proj
    }

    pub fn equidistant(center: Location) -> Self {
        Self::new(
            Azimuthal::Equidistant {
                radius: WGS84_EQUATORIAL_RADIUS,
            },
            center,
            "AUTO2:97003",
        )
    }

    /// Gnomonic projection using the Gaussian radius at the center latitude
    pub fn gnomonic(center: Location) -> Self {
        Self::new(
            Azimuthal::Gnomonic {
                center_radius: WGS84.gaussian_radius(center.latitude),
            },
            center,
            "AUTO2:97001",
        )
    }

    pub fn orthographic(center: Location) -> Self {
        Self::new(
            Azimuthal::Orthographic {
                radius: WGS84_EQUATORIAL_RADIUS,
            },
            center,
            "AUTO2:42003",
        )
    }

    pub fn stereographic(center: Location) -> Self {
        Self::new(
            Azimuthal::Stereographic {
                radius: WGS84_EQUATORIAL_RADIUS,
            },
            center,
            "AUTO2:97002",
        )
    }

    pub fn with_crs_id(mut self, crs_id: impl Into<String>) -> Self {
        self.crs_id = crs_id.into();
        self
    }

    pub fn variant(&self) -> Azimuthal {
        self.variant
    }
}

impl MapProjection for AzimuthalProjection {
    fn location_to_map(&self, location: &Location) -> Result<Coord<f64>, ProjectionError> {
        if *location == self.center {
            return Ok(coord! { x: 0.0, y: 0.0 });
        }

        let (azimuth, distance) = azimuth_distance(&self.center, location);
        let map_distance =
            self.variant
                .map_distance(distance)
                .ok_or(ProjectionError::Unrepresentable {
                    latitude: location.latitude,
                    longitude: location.longitude,
                })?;

        Ok(coord! {
            x: map_distance * azimuth.sin(),
            y: map_distance * azimuth.cos(),
        })
    }

    fn map_to_location(&self, point: Coord<f64>) -> Result<Location, ProjectionError> {
        if point.x == 0.0 && point.y == 0.0 {
            return Ok(self.center);
        }

        let azimuth = point.x.atan2(point.y);
        let distance = self
            .variant
            .angular_distance(point.x.hypot(point.y))
            .ok_or(ProjectionError::OutsideProjection {
                x: point.x,
                y: point.y,
            })?;

        Ok(destination(&self.center, azimuth, distance))
    }

    fn crs_id(&self) -> &str {
        &self.crs_id
    }

    /// AUTO2 identifiers carry the center: "AUTO2:97001,1,<lon>,<lat>"
    fn crs_value(&self) -> String {
        if self.crs_id.starts_with("AUTO2:") {
            format!(
                "{},1,{},{}",
                self.crs_id, self.center.longitude, self.center.latitude
            )
        } else {
            self.crs_id.clone()
        }
    }

    fn scale_factors(&self, location: &Location) -> Result<ScaleFactors, ProjectionError> {
        let distance = if *location == self.center {
            0.0
        } else {
            azimuth_distance(&self.center, location).1
        };

        self.variant
            .scale_factors(distance)
            .ok_or(ProjectionError::Unrepresentable {
                latitude: location.latitude,
                longitude: location.longitude,
            })
    }

    fn center(&self) -> Option<Location> {
        Some(self.center)
    }

    fn set_center(&mut self, center: Location) {
        self.center = center;
        if let Azimuthal::Gnomonic { center_radius } = &mut self.variant {
            *center_radius = WGS84.gaussian_radius(center.latitude);
        }
    }

    fn is_azimuthal(&self) -> bool {
        true
    }

    /// The visible hemisphere of an orthographic projection
    fn domain_bounds(&self) -> Option<BoundingBox> {
        let Azimuthal::Orthographic { .. } = self.variant else {
            return None;
        };

        let Location {
            latitude,
            longitude,
        } = self.center;
        let bbox = if latitude > 0.0 {
            BoundingBox::new(latitude - 90.0, longitude - 180.0, 90.0, longitude + 180.0)
        } else if latitude < 0.0 {
            BoundingBox::new(-90.0, longitude - 180.0, latitude + 90.0, longitude + 180.0)
        } else {
            BoundingBox::new(-90.0, longitude - 90.0, 90.0, longitude + 90.0)
        };
        Some(bbox)
    }
}
