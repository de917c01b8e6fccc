//! Vehicle and track-segmentation sections.
//!
//! These knobs are consumed by the lane/track segmentation stage, which
//! lives outside this crate. They are loaded and validated here so a single
//! parameter file configures the whole pipeline.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Vehicle settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UgvSection {
    /// LIDAR beam calibration file
    #[serde(default = "defaults::correction_file")]
    pub correction_file: String,
}

impl Default for UgvSection {
    fn default() -> Self {
        Self {
            correction_file: defaults::correction_file(),
        }
    }
}

/// Splitting a recorded vehicle track into straight segments
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DivideCarTrackSection {
    /// Heading change (rad) that starts a new segment
    #[serde(default = "defaults::eulr_change_threshold")]
    pub eulr_change_threshold: f64,

    /// Poses examined when looking for a heading change
    #[serde(default = "defaults::detect_points")]
    pub detect_points: u32,

    /// Distance (m) examined when looking for a heading change
    #[serde(default = "defaults::detect_distance")]
    pub detect_distance: f64,

    /// Minimum poses for a segment to be kept
    #[serde(default = "defaults::valid_segment_points_num")]
    pub valid_segment_points_num: u32,
}

impl Default for DivideCarTrackSection {
    fn default() -> Self {
        Self {
            eulr_change_threshold: defaults::eulr_change_threshold(),
            detect_points: defaults::detect_points(),
            detect_distance: defaults::detect_distance(),
            valid_segment_points_num: defaults::valid_segment_points_num(),
        }
    }
}

/// Line parallelism test
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LineParallelSection {
    /// Heading difference (rad) under which two lines count as parallel
    #[serde(default = "defaults::similar_eulr_threshold")]
    pub similar_eulr_threshold: f64,
}

impl Default for LineParallelSection {
    fn default() -> Self {
        Self {
            similar_eulr_threshold: defaults::similar_eulr_threshold(),
        }
    }
}

/// "Same segment" clustering
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SameSegSection {
    /// Lateral offset (m) under which two segments may merge
    #[serde(default = "defaults::lateral_distance_threshold")]
    pub lateral_distance_threshold: f64,

    /// Heading difference (rad) under which two segments may merge
    #[serde(default = "defaults::same_direction_threshold")]
    pub same_direction_threshold: f64,
}

impl Default for SameSegSection {
    fn default() -> Self {
        Self {
            lateral_distance_threshold: defaults::lateral_distance_threshold(),
            same_direction_threshold: defaults::same_direction_threshold(),
        }
    }
}
