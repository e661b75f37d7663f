pub mod bounding_box;
pub mod location;
pub mod viewport;

pub use bounding_box::BoundingBox;
pub use location::{Location, normalize_longitude};
pub use viewport::Viewport;
