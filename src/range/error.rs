//! Coordinate range errors.

use thiserror::Error;

/// Range construction or lookup error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// Point lies outside `[left, right) × [bottom, top)`
    #[error("point ({x:.3}, {y:.3}) is outside the range")]
    OutOfRange {
        /// Global x (m)
        x: f64,
        /// Global y (m)
        y: f64,
    },

    /// Rectangle is empty or not finite
    #[error("invalid bounds: x {left}..{right}, y {bottom}..{top}")]
    InvalidBounds {
        /// Left edge (m)
        left: f64,
        /// Right edge (m)
        right: f64,
        /// Bottom edge (m)
        bottom: f64,
        /// Top edge (m)
        top: f64,
    },

    /// Cell size is not a positive finite number
    #[error("invalid grid resolution: {0}")]
    InvalidResolution(f64),

    /// Cell counts do not fit the 16-bit grid index
    #[error("range needs {width:.0} x {height:.0} cells, limit is 65535 per axis")]
    TooLarge {
        /// Cells along x
        width: f64,
        /// Cells along y
        height: f64,
    },
}
