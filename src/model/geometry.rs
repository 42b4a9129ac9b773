//! Geometry primitives.

use serde::{Deserialize, Serialize};

/// An absolute box on the page, in points, relative to the top-left corner.
///
/// Position and size travel together: a node either has a frame or it
/// has neither a position nor a size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl Frame {
    /// Create a frame from position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a frame at the origin with the given size.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// The `(x, y)` pair.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// The `(width, height)` pair.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same frame moved to a new origin.
    pub fn at(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    /// Same frame with a different height.
    pub fn with_height(self, height: f64) -> Self {
        Self { height, ..self }
    }

    /// Same frame with a different width.
    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }
}
