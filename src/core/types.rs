use serde::{Deserialize, Serialize};

/// Outer drawing extent of a chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Vertex in chart-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn lerp(self, other: Self, position: f64) -> Self {
        Self {
            x: lerp(self.x, other.x, position),
            y: lerp(self.y, other.y, position),
        }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Left/top pair used for screen positions and translations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub left: f64,
    pub top: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    #[must_use]
    pub fn lerp(self, other: Self, position: f64) -> Self {
        Self {
            left: lerp(self.left, other.left, position),
            top: lerp(self.top, other.top, position),
        }
    }

    #[must_use]
    pub fn offset_by(self, other: Self) -> Self {
        Self {
            left: self.left + other.left,
            top: self.top + other.top,
        }
    }

    #[must_use]
    pub fn relative_to(self, origin: Self) -> Self {
        Self {
            left: self.left - origin.left,
            top: self.top - origin.top,
        }
    }
}

/// Screen-space box reported by a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn origin(self) -> Coordinates {
        Coordinates::new(self.left, self.top)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Linear interpolation; positions outside `[0, 1]` extrapolate.
#[must_use]
pub fn lerp(from: f64, to: f64, position: f64) -> f64 {
    from + (to - from) * position
}
