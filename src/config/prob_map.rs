//! Occupancy probability section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Occupancy accumulation and classification thresholds.
///
/// Heights are millimetres relative to the LIDAR. Angles are hundredths of
/// a degree, matching the sensor's rotation counter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProbMapSection {
    /// Left edge of the forward detection sector
    #[serde(default = "defaults::left_detect_angle_boundary")]
    pub left_detect_angle_boundary: u16,

    /// Right edge of the forward detection sector
    #[serde(default = "defaults::right_detect_angle_boundary")]
    pub right_detect_angle_boundary: u16,

    /// Height quantum used by raster rendering
    #[serde(default = "defaults::unit_height")]
    pub unit_height: i16,

    /// Vertical extent inside one cell that counts as an obstacle
    #[serde(default = "defaults::height_threshold")]
    pub height_threshold: i16,

    /// Probability step per frame of evidence
    #[serde(default = "defaults::increment_unit")]
    pub increment_unit: f32,

    /// At or below this probability a cell is clear (see
    /// [`THRESHOLD_TOLERANCE`](Self::THRESHOLD_TOLERANCE))
    #[serde(default = "defaults::clear_threshold")]
    pub clear_threshold: f32,

    /// At or above this probability a cell is occupied (see
    /// [`THRESHOLD_TOLERANCE`](Self::THRESHOLD_TOLERANCE))
    #[serde(default = "defaults::occupied_threshold")]
    pub occupied_threshold: f32,

    /// Highest height a ground return may have
    #[serde(default = "defaults::max_ground_height")]
    pub max_ground_height: i16,

    /// Largest allowed |average - midpoint| as a fraction of vertical extent
    #[serde(default = "defaults::max_avg_mid_diff")]
    pub max_avg_mid_diff: f32,

    /// Hits required before the occupancy layer commits to a type
    #[serde(default = "defaults::min_hit_count")]
    pub min_hit_count: u8,
}

impl Default for ProbMapSection {
    fn default() -> Self {
        Self {
            left_detect_angle_boundary: defaults::left_detect_angle_boundary(),
            right_detect_angle_boundary: defaults::right_detect_angle_boundary(),
            unit_height: defaults::unit_height(),
            height_threshold: defaults::height_threshold(),
            increment_unit: defaults::increment_unit(),
            clear_threshold: defaults::clear_threshold(),
            occupied_threshold: defaults::occupied_threshold(),
            max_ground_height: defaults::max_ground_height(),
            max_avg_mid_diff: defaults::max_avg_mid_diff(),
            min_hit_count: defaults::min_hit_count(),
        }
    }
}

impl ProbMapSection {
    /// Distance within which a probability counts as having reached a threshold.
    ///
    /// Both thresholds are inclusive by this much. Repeated f32 increments
    /// land a few ulps short of the exact sum, e.g. four 0.05 steps from 0.5
    /// give 0.69999999, which must still count as 0.7.
    pub const THRESHOLD_TOLERANCE: f32 = 1e-5;

    /// Has `p` reached the occupied threshold?
    #[inline]
    pub fn is_occupied(&self, p: f32) -> bool {
        p + Self::THRESHOLD_TOLERANCE >= self.occupied_threshold
    }

    /// Has `p` reached the clear threshold?
    #[inline]
    pub fn is_clear(&self, p: f32) -> bool {
        p - Self::THRESHOLD_TOLERANCE <= self.clear_threshold
    }

    /// Is a rotation angle inside the forward detection sector?
    ///
    /// The sector wraps through 0: it covers `[left, 36000)` and `[0, right]`.
    pub fn in_detect_sector(&self, rot_angle: u16) -> bool {
        rot_angle >= self.left_detect_angle_boundary
            || rot_angle <= self.right_detect_angle_boundary
    }
}
