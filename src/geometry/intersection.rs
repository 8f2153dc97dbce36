use super::{Point, TangentParams};
use crate::config::SLOPE_EPSILON;

/// Crossing point of two tangent lines.
///
/// Returns `None` when the slopes differ by less than [`SLOPE_EPSILON`]
/// (parallel or coincident lines have no meaningful transition point).
pub fn intersect(first: &TangentParams, second: &TangentParams) -> Option<Point> {
    let (m1, x1, y1) = (first.slope, first.anchor_x, first.anchor_y);
    let (m2, x2, y2) = (second.slope, second.anchor_x, second.anchor_y);

    let denominator = m1 - m2;
    if denominator.abs() < SLOPE_EPSILON {
        log::info!("Tangents are parallel, no intersection");
        return None;
    }

    let x = (m1 * x1 - m2 * x2 + y2 - y1) / denominator;
    let y = m1 * (x - x1) + y1;

    log::info!("Tangents intersect at ({:.3}, {:.3})", x, y);
    Some(Point::new(x, y))
}
