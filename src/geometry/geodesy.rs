//! Great-circle azimuth and distance on the sphere.
//!
//! Shared by every azimuthal projection. Angles going in and out are
//! radians; locations are degrees.

use crate::domain::{Location, normalize_longitude};

/// Azimuth (clockwise from north) and angular distance from `from` to `to`,
/// both in radians.
///
/// The azimuth is meaningless when the two locations coincide; callers
/// short-circuit that case before calling.
pub fn azimuth_distance(from: &Location, to: &Location) -> (f64, f64) {
    let (sin_lat1, cos_lat1) = from.latitude.to_radians().sin_cos();
    let (sin_lat2, cos_lat2) = to.latitude.to_radians().sin_cos();
    let (sin_dlon, cos_dlon) = (to.longitude - from.longitude).to_radians().sin_cos();

    let east = cos_lat2 * sin_dlon;
    let north = cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon;
    let cos_distance = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

    let azimuth = east.atan2(north);
    // atan2 keeps full precision for both tiny and near-antipodal distances
    let distance = east.hypot(north).atan2(cos_distance);

    (azimuth, distance)
}

/// Location reached by travelling `distance` radians along the great circle
/// leaving `from` at `azimuth` radians.
///
/// Distances beyond a hemisphere wrap over the far side of the sphere.
/// The resulting longitude is normalized into (-180, 180].
pub fn destination(from: &Location, azimuth: f64, distance: f64) -> Location {
    let (sin_lat1, cos_lat1) = from.latitude.to_radians().sin_cos();
    let (sin_d, cos_d) = distance.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();

    let sin_lat2 = sin_lat1 * cos_d + cos_lat1 * sin_d * cos_az;
    let east = sin_d * sin_az;
    let north = cos_lat1 * cos_d - sin_lat1 * sin_d * cos_az;

    let latitude = sin_lat2.atan2(east.hypot(north)).to_degrees().clamp(-90.0, 90.0);
    let longitude = normalize_longitude(from.longitude + east.atan2(north).to_degrees());

    Location::new(latitude, longitude)
}
