//! Vehicle pose in the global frame.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::point::GlobalPoint;

/// Vehicle position and heading.
///
/// - Position: (x, y) in metres relative to the differential-GPS station
/// - Heading: radians in [-π, π), CCW positive from the global +X axis
///
/// The vehicle frame is X-forward, Y-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X position in metres
    pub x: f64,
    /// Y position in metres
    pub y: f64,
    /// Heading in radians
    pub heading: f32,
}

impl Pose {
    /// Create a new pose. The heading is normalized to [-π, π).
    #[inline]
    pub fn new(x: f64, y: f64, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_angle(heading),
        }
    }

    /// Position as a global point
    #[inline]
    pub fn position(self) -> GlobalPoint {
        GlobalPoint::new(self.x, self.y)
    }

    /// Transform a point from the vehicle frame to the global frame.
    #[inline]
    pub fn transform_point(self, forward: f64, left: f64) -> GlobalPoint {
        let (sin, cos) = (self.heading as f64).sin_cos();
        GlobalPoint::new(
            self.x + forward * cos - left * sin,
            self.y + forward * sin + left * cos,
        )
    }
}

/// Normalize an angle to [-π, π).
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped >= PI { wrapped - 2.0 * PI } else { wrapped }
}
