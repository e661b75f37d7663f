pub mod graticule;
pub mod labels;
pub mod spacing;

pub use graticule::{
    Graticule, GraticuleConfig, GraticuleGeometry, GraticuleLabel, GraticuleLine, build_graticule,
};
pub use labels::{LabelFormat, latitude_label, longitude_label};
pub use spacing::{LINE_DISTANCES, line_distance};
