//! Default value functions for serde deserialization.

use crate::core::{PointType, TypePriority};

pub fn correction_file() -> String {
    "new_xml.txt".to_string()
}

pub fn eulr_change_threshold() -> f64 {
    0.005
}

pub fn detect_points() -> u32 {
    10
}

pub fn detect_distance() -> f64 {
    5.0
}

pub fn valid_segment_points_num() -> u32 {
    80
}

pub fn similar_eulr_threshold() -> f64 {
    0.01
}

pub fn lateral_distance_threshold() -> f64 {
    20.0
}

pub fn same_direction_threshold() -> f64 {
    0.01
}

pub fn x_max() -> f64 {
    5.0
}

pub fn x_min() -> f64 {
    -5.0
}

pub fn y_max() -> f64 {
    10.0
}

pub fn y_min() -> f64 {
    0.0
}

pub fn grid_size() -> f64 {
    0.08
}

pub fn pixel_per_grid() -> u32 {
    4
}

pub fn left_detect_angle_boundary() -> u16 {
    34000
}

pub fn right_detect_angle_boundary() -> u16 {
    2000
}

pub fn unit_height() -> i16 {
    100
}

pub fn height_threshold() -> i16 {
    250
}

pub fn increment_unit() -> f32 {
    0.05
}

pub fn clear_threshold() -> f32 {
    0.3
}

pub fn occupied_threshold() -> f32 {
    0.7
}

pub fn max_ground_height() -> i16 {
    -1600
}

pub fn max_avg_mid_diff() -> f32 {
    0.25
}

pub fn min_hit_count() -> u8 {
    2
}

pub fn priority() -> Vec<PointType> {
    TypePriority::DEFAULT_ORDER.to_vec()
}

pub fn enabled() -> bool {
    true
}

pub fn output_dir() -> String {
    "./output".to_string()
}
