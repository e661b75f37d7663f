pub mod bounds;
pub mod ellipsoid;
pub mod geodesy;
pub mod projection;
pub mod transform;

pub use bounds::{rect_from_points, viewport_bounding_box, viewport_map_rect};
pub use projection::{
    Azimuthal, AzimuthalProjection, Equirectangular, MapProjection, ProjectionKind, ScaleFactors,
    WebMercator,
};
pub use transform::ViewTransform;
