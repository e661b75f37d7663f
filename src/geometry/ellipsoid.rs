/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening
    pub f: f64,
    /// First eccentricity squared: 2f - f^2
    pub e2: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, f: f64) -> Self {
        Self {
            a,
            f,
            e2: 2.0 * f - f * f,
        }
    }

    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// Semi-minor axis (metres)
    pub fn semi_minor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Gaussian mean radius of curvature, sqrt(M * N), at a latitude in degrees.
    pub fn gaussian_radius(&self, latitude: f64) -> f64 {
        let sin_lat = latitude.to_radians().sin();
        self.a * (1.0 - self.e2).sqrt() / (1.0 - self.e2 * sin_lat * sin_lat)
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);

/// WGS84 equatorial radius in metres, used as the sphere radius for
/// azimuthal projections.
pub const WGS84_EQUATORIAL_RADIUS: f64 = WGS84.a;

/// Length of one degree of arc on the equator (metres).
pub const METERS_PER_DEGREE: f64 = WGS84_EQUATORIAL_RADIUS * std::f64::consts::PI / 180.0;
