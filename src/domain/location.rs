use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic position in WGS84 degrees
///
/// Latitude lies in [-90, 90]. Longitude is stored as given and compared
/// after normalization into (-180, 180], so `(0, 180)` and `(0, -180)` are
/// the same location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Same position with the longitude folded into (-180, 180]
    pub fn normalized(&self) -> Self {
        Self::new(self.latitude, normalize_longitude(self.longitude))
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude == other.latitude
            && normalize_longitude(self.longitude) == normalize_longitude(other.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Fold a longitude in degrees into (-180, 180]
///
/// Values already inside the range are returned untouched so that no
/// rounding noise is introduced.
pub fn normalize_longitude(longitude: f64) -> f64 {
    if longitude > -180.0 && longitude <= 180.0 {
        return longitude;
    }

    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}
