use serde::{Deserialize, Serialize};

use super::{Point, TangentParams, Viewport};
use crate::config::{DEDUP_EPSILON, SLOPE_EPSILON};

/// How a tangent segment was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Clipping {
    /// Slope is effectively zero; the segment spans the padded width at the anchor height
    Horizontal,
    /// Endpoints are crossings with the padded viewport edges
    Edges,
    /// The line misses the padded viewport; endpoints are clamped to its Y range
    Fallback,
}

/// A renderable two-point tangent segment, ordered by x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentSegment {
    /// Left endpoint
    pub start: Point,
    /// Right endpoint
    pub end: Point,
    /// How the endpoints were found
    pub clipping: Clipping,
}

impl TangentSegment {
    /// Both endpoints.
    pub fn points(&self) -> [Point; 2] {
        [self.start, self.end]
    }
}

/// Clip a tangent line to the viewport widened by `span_percent` of its width
/// on both sides.
///
/// Always returns two points. When the line crosses the padded rectangle the
/// outermost crossings are used, so the segment covers the whole visible span.
pub fn clip_tangent(
    params: &TangentParams,
    viewport: &Viewport,
    span_percent: f64,
) -> TangentSegment {
    let Viewport {
        x_min,
        x_max,
        y_min,
        y_max,
    } = viewport.normalized();

    let padding = (x_max - x_min) * span_percent;
    let left = x_min - padding;
    let right = x_max + padding;

    if params.slope.abs() < SLOPE_EPSILON {
        return TangentSegment {
            start: Point::new(left, params.anchor_y),
            end: Point::new(right, params.anchor_y),
            clipping: Clipping::Horizontal,
        };
    }

    let within_y = |y: f64| y >= y_min && y <= y_max;
    let within_x = |x: f64| x >= left && x <= right;

    let mut candidates: Vec<Point> = Vec::with_capacity(4);

    let y_left = params.y_at(left);
    if within_y(y_left) {
        candidates.push(Point::new(left, y_left));
    }

    let y_right = params.y_at(right);
    if within_y(y_right) {
        candidates.push(Point::new(right, y_right));
    }

    let x_top = params.x_at(y_max);
    if within_x(x_top) {
        candidates.push(Point::new(x_top, y_max));
    }

    let x_bottom = params.x_at(y_min);
    if within_x(x_bottom) {
        candidates.push(Point::new(x_bottom, y_min));
    }

    let mut unique: Vec<Point> = Vec::with_capacity(candidates.len());
    for point in candidates {
        let duplicate = unique.iter().any(|p| {
            (p.x - point.x).abs() < DEDUP_EPSILON && (p.y - point.y).abs() < DEDUP_EPSILON
        });
        if !duplicate {
            unique.push(point);
        }
    }
    unique.sort_by(|a, b| a.x.total_cmp(&b.x));

    if unique.len() >= 2 {
        return TangentSegment {
            start: unique[0],
            end: unique[unique.len() - 1],
            clipping: Clipping::Edges,
        };
    }

    log::info!(
        "Tangent (slope {:.6}) misses the viewport, clamping endpoints",
        params.slope
    );

    let clamp = |x: f64| -> Point {
        let y = params.y_at(x);
        if y < y_min {
            Point::new(params.x_at(y_min), y_min)
        } else if y > y_max {
            Point::new(params.x_at(y_max), y_max)
        } else {
            Point::new(x, y)
        }
    };

    TangentSegment {
        start: clamp(left),
        end: clamp(right),
        clipping: Clipping::Fallback,
    }
}
