//! Point and coordinate types.

use serde::{Deserialize, Serialize};

/// Grid coordinates (integer cell indices, origin at the bottom-left cell).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index
    pub x: u16,
    /// Row index
    pub y: u16,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Global coordinates (metres, f64).
///
/// The global frame is large (kilometres from the GPS station), so f64 is
/// used to keep centimetre precision.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalPoint {
    /// Easting in metres
    pub x: f64,
    /// Northing in metres
    pub y: f64,
}

impl GlobalPoint {
    /// Create a new global point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single LIDAR return placed in the global frame.
///
/// Only `x`, `y` and `z` are interpreted by the map. The remaining fields are
/// carried through untouched for downstream classifiers.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct InputPoint {
    /// Global x in metres
    pub x: f64,
    /// Global y in metres
    pub y: f64,
    /// Height in millimetres relative to the sensor
    pub z: i16,
    /// Return intensity
    pub intensity: u8,
    /// Laser beam index
    pub beam_id: u8,
    /// Rotation angle in hundredths of a degree (0..36000)
    pub rot_angle: u16,
}

impl InputPoint {
    /// Create a point with only position and height set
    #[inline]
    pub fn new(x: f64, y: f64, z: i16) -> Self {
        Self {
            x,
            y,
            z,
            ..Default::default()
        }
    }
}
