use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Location ({latitude}, {longitude}) cannot be represented by this projection")]
    Unrepresentable { latitude: f64, longitude: f64 },

    #[error("Map point ({x}, {y}) lies outside the projection domain")]
    OutsideProjection { x: f64, y: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraticuleError {
    #[error("Viewport transform is not invertible")]
    NonInvertibleViewport,

    #[error("Projection error during bounds extraction: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Viewport bounds are not finite")]
    InvalidBounds,
}
