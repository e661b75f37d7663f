//! graticule - Map projections and adaptive latitude/longitude grid overlays

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod map;

pub use domain::{BoundingBox, Location, Viewport};
pub use error::{GraticuleError, ProjectionError};
pub use geometry::{MapProjection, ProjectionKind, ViewTransform};
pub use layers::{Graticule, GraticuleConfig};
pub use map::MapView;
