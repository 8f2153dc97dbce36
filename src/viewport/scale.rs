use crate::geometry::Viewport;

/// Pixel/value conversion supplied by whatever renders a chart.
///
/// The analysis never draws; it only needs a way to compare click positions
/// with data points in pixels.
pub trait ChartScale {
    /// Horizontal pixel position of data value `x`.
    fn pixel_for_x(&self, x: f64) -> f64;

    /// Data value at horizontal pixel position `pixel`.
    fn x_for_pixel(&self, pixel: f64) -> f64;

    /// Vertical pixel position of data value `y` (pixels grow downwards).
    fn pixel_for_y(&self, y: f64) -> f64;

    /// Data value at vertical pixel position `pixel`.
    fn y_for_pixel(&self, pixel: f64) -> f64;
}

/// Linear mapping of a viewport onto a `width` x `height` pixel area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    viewport: Viewport,
    width: f64,
    height: f64,
}

const MIN_SPAN: f64 = 1e-12;

impl LinearScale {
    /// Create a scale for a chart area of `width` x `height` pixels.
    pub fn new(viewport: Viewport, width: f64, height: f64) -> Self {
        Self {
            viewport,
            width,
            height,
        }
    }

    fn x_span(&self) -> f64 {
        self.viewport.width().abs().max(MIN_SPAN)
    }

    fn y_span(&self) -> f64 {
        self.viewport.height().abs().max(MIN_SPAN)
    }
}

impl ChartScale for LinearScale {
    fn pixel_for_x(&self, x: f64) -> f64 {
        (x - self.viewport.x_min) / self.x_span() * self.width
    }

    fn x_for_pixel(&self, pixel: f64) -> f64 {
        self.viewport.x_min + pixel / self.width * self.x_span()
    }

    fn pixel_for_y(&self, y: f64) -> f64 {
        (self.viewport.y_max - y) / self.y_span() * self.height
    }

    fn y_for_pixel(&self, pixel: f64) -> f64 {
        self.viewport.y_max - pixel / self.height * self.y_span()
    }
}
