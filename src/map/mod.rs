pub mod view;

pub use view::{MapView, TILE_SIZE};
