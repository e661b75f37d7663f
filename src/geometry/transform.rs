use geo::{Coord, coord};

use crate::error::GraticuleError;

/// A 2D affine transform between map space and viewport (pixel) space.
///
/// Maps (x, y) to:
///   x' = a * x + b * y + c
///   y' = d * x + e * y + f
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, dx, 0.0, 1.0, dy)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Rotation about the origin by `degrees`.
    ///
    /// In a y-down viewport a positive angle turns clockwise on screen.
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, -sin, 0.0, sin, cos, 0.0)
    }

    /// Transform that applies `self` first and then `next`.
    pub fn then(&self, next: &ViewTransform) -> ViewTransform {
        ViewTransform {
            a: next.a * self.a + next.b * self.d,
            b: next.a * self.b + next.b * self.e,
            c: next.a * self.c + next.b * self.f + next.c,
            d: next.d * self.a + next.e * self.d,
            e: next.d * self.b + next.e * self.e,
            f: next.d * self.c + next.e * self.f + next.f,
        }
    }

    pub fn apply(&self, point: Coord<f64>) -> Coord<f64> {
        coord! {
            x: self.a * point.x + self.b * point.y + self.c,
            y: self.d * point.x + self.e * point.y + self.f,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Compute the inverse transform.
    pub fn inverse(&self) -> Result<ViewTransform, GraticuleError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(GraticuleError::NonInvertibleViewport);
        }
        let inv_det = 1.0 / det;
        Ok(ViewTransform {
            a: self.e * inv_det,
            b: -self.b * inv_det,
            c: (self.b * self.f - self.e * self.c) * inv_det,
            d: -self.d * inv_det,
            e: self.a * inv_det,
            f: (self.d * self.c - self.a * self.f) * inv_det,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_apply_identity() {
        let p = ViewTransform::identity().apply(coord! { x: 5.0, y: 10.0 });
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 10.0);
    }

    #[test]
    fn test_then_applies_in_order() {
        // scale first, then translate
        let t = ViewTransform::scaling(2.0, 3.0).then(&ViewTransform::translation(10.0, 20.0));
        let p = t.apply(coord! { x: 1.0, y: 1.0 });
        assert_relative_eq!(p.x, 12.0);
        assert_relative_eq!(p.y, 23.0);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let p = ViewTransform::rotation(90.0).apply(coord! { x: 1.0, y: 0.0 });
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let t = ViewTransform::translation(-500.0, 42.0)
            .then(&ViewTransform::scaling(0.01, -0.01))
            .then(&ViewTransform::rotation(33.0))
            .then(&ViewTransform::translation(400.0, 300.0));
        let inv = t.inverse().unwrap();
        let p = inv.apply(t.apply(coord! { x: 1234.5, y: -987.25 }));
        assert_relative_eq!(p.x, 1234.5, epsilon = 1e-8);
        assert_relative_eq!(p.y, -987.25, epsilon = 1e-8);
    }

    #[test]
    fn test_singular_transform() {
        let t = ViewTransform::scaling(0.0, 1.0);
        assert_eq!(t.inverse(), Err(GraticuleError::NonInvertibleViewport));
    }
}
