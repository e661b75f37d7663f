use geo::{Coord, Rect, coord};
use tracing::debug;

use crate::domain::{BoundingBox, Viewport};
use crate::error::{GraticuleError, ProjectionError};
use crate::geometry::projection::MapProjection;
use crate::geometry::transform::ViewTransform;

/// Axis-aligned rectangle enclosing a set of points
pub fn rect_from_points(points: &[Coord<f64>]) -> Option<Rect<f64>> {
    if points.is_empty() {
        return None;
    }

    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;

    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    Some(Rect::new(
        coord! { x: min_x, y: min_y },
        coord! { x: max_x, y: max_y },
    ))
}

/// Map-space rectangle covering the viewport
///
/// The four pixel corners are sent through `inverse` (viewport -> map) and
/// the per-axis extremes kept. Exact for an unrotated view; under rotation
/// the rectangle over-covers the visible area.
pub fn viewport_map_rect(inverse: &ViewTransform, viewport: &Viewport) -> Rect<f64> {
    let corners = viewport
        .corners()
        .map(|(x, y)| inverse.apply(coord! { x: x, y: y }));

    // four corners, never empty
    rect_from_points(&corners).unwrap_or_else(|| Rect::new(corners[0], corners[3]))
}

/// Geographic box covering the viewport
///
/// # Arguments
/// * `viewport_transform` - map -> viewport transform of the host
/// * `viewport` - pixel size of the visible area
/// * `projection` - converts the map-space corners back to locations
///
/// The result is clamped to latitudes in [-90, 90] and to at most 360
/// degrees of longitude.
///
/// # Errors
/// * `NonInvertibleViewport` when the transform has no inverse
/// * `Projection` when a corner lies outside the projection's domain and
///   the projection has no finite extent to fall back to
/// * `InvalidBounds` when the result is not finite
pub fn viewport_bounding_box(
    viewport_transform: &ViewTransform,
    viewport: &Viewport,
    projection: &dyn MapProjection,
) -> Result<BoundingBox, GraticuleError> {
    let inverse = viewport_transform.inverse()?;
    let rect = viewport_map_rect(&inverse, viewport);
    let (min, max) = (rect.min(), rect.max());

    let corners = [
        min,
        coord! { x: max.x, y: min.y },
        coord! { x: min.x, y: max.y },
        max,
    ]
    .into_iter()
    .map(|p| projection.map_to_location(p))
    .collect::<Result<Vec<_>, _>>();

    let bbox = match corners {
        Ok(locations) => BoundingBox::from_locations(&locations),
        // the view reaches past the rim of a bounded projection
        Err(e @ ProjectionError::OutsideProjection { .. }) => {
            let domain = projection.domain_bounds().ok_or(e)?;
            debug!("Viewport exceeds the projection domain, using its full extent");
            Some(domain)
        }
        Err(e) => return Err(e.into()),
    };

    bbox.filter(BoundingBox::is_finite)
        .map(clamp_to_globe)
        .ok_or(GraticuleError::InvalidBounds)
}

/// Limit a box to valid latitudes and to one turn of longitude around its
/// middle meridian.
fn clamp_to_globe(bbox: BoundingBox) -> BoundingBox {
    let (mut west, mut east) = (bbox.west, bbox.east);
    if east - west > 360.0 {
        let middle = west / 2.0 + east / 2.0;
        west = middle - 180.0;
        east = middle + 180.0;
    }

    BoundingBox::new(
        bbox.south.clamp(-90.0, 90.0),
        west,
        bbox.north.clamp(-90.0, 90.0),
        east,
    )
}
