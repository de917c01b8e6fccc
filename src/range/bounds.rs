//! Rectangle in the global plane.

use crate::core::GlobalPoint;

/// Axis-aligned rectangle in global metres.
///
/// Plain value type. Validity is only checked when a
/// [`CoordinateRange`](super::CoordinateRange) adopts it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeBounds {
    /// Left edge (m), inclusive
    pub left: f64,
    /// Right edge (m), exclusive
    pub right: f64,
    /// Bottom edge (m), inclusive
    pub bottom: f64,
    /// Top edge (m), exclusive
    pub top: f64,
}

impl RangeBounds {
    /// Create bounds from edges
    #[inline]
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Square of side `side` centred on `center`
    pub fn centered(center: GlobalPoint, side: f64) -> Self {
        let half = side / 2.0;
        Self::new(
            center.x - half,
            center.x + half,
            center.y - half,
            center.y + half,
        )
    }

    /// Width (m)
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height (m)
    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Finite and non-empty on both axes
    pub fn is_valid(&self) -> bool {
        [self.left, self.right, self.bottom, self.top]
            .iter()
            .all(|v| v.is_finite())
            && self.right > self.left
            && self.top > self.bottom
    }

    /// Same rectangle moved by (dx, dy)
    #[inline]
    pub fn shifted(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.left + dx,
            self.right + dx,
            self.bottom + dy,
            self.top + dy,
        )
    }

    /// Half-open containment test
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.bottom && y < self.top
    }
}
