//! Window-pixel to model-space transforms for orthographic panels.

use tileview_core::geometry::Rect;

/// Orthographic extent of the model shown in a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl OrthoBounds {
    #[must_use]
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }
}

/// Maps window pixels inside a viewport to model coordinates and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelToModelTransform {
    viewport: Rect,
    bounds: OrthoBounds,
}

impl PixelToModelTransform {
    #[must_use]
    pub const fn new(viewport: Rect, bounds: OrthoBounds) -> Self {
        Self { viewport, bounds }
    }

    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    #[must_use]
    pub const fn bounds(&self) -> OrthoBounds {
        self.bounds
    }

    /// Model coordinates of window pixel `(x, y)`; `None` for an empty viewport.
    #[must_use]
    pub fn pixel_to_model(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.viewport.is_empty() {
            return None;
        }
        let u = (x - f64::from(self.viewport.x)) / f64::from(self.viewport.width);
        let v = (y - f64::from(self.viewport.y)) / f64::from(self.viewport.height);
        let b = self.bounds;
        Some((
            b.left + u * (b.right - b.left),
            b.bottom + v * (b.top - b.bottom),
        ))
    }

    /// Window pixel of model point `(mx, my)`; `None` for degenerate bounds.
    #[must_use]
    pub fn model_to_pixel(&self, mx: f64, my: f64) -> Option<(f64, f64)> {
        let b = self.bounds;
        let span_x = b.right - b.left;
        let span_y = b.top - b.bottom;
        if span_x == 0.0 || span_y == 0.0 || !span_x.is_finite() || !span_y.is_finite() {
            return None;
        }
        Some((
            f64::from(self.viewport.x) + (mx - b.left) / span_x * f64::from(self.viewport.width),
            f64::from(self.viewport.y) + (my - b.bottom) / span_y * f64::from(self.viewport.height),
        ))
    }
}
