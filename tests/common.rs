//! Test utilities for MargaMap integration tests.
//!
//! Synthetic road scenes: flat ground ahead of the vehicle plus vertical
//! posts at fixed global positions.

#![allow(dead_code)]

use marga_map::{GlobalPoint, InputPoint, Pose};

/// Ground height below the sensor (mm)
pub const GROUND_Z: i16 = -1700;

/// Poses along the +X axis, `spacing` metres apart.
pub fn straight_trajectory(n: usize, spacing: f64) -> Vec<Pose> {
    (0..n)
        .map(|i| Pose::new(i as f64 * spacing, 0.0, 0.0))
        .collect()
}

/// Flat ground patch in the vehicle frame, `forward` × `left` metres,
/// sampled every `step` metres.
pub fn ground_points(pose: &Pose, forward: (f64, f64), left: (f64, f64), step: f64) -> Vec<InputPoint> {
    let mut points = Vec::new();
    let mut f = forward.0;
    while f < forward.1 {
        let mut l = left.0;
        while l < left.1 {
            let p = pose.transform_point(f, l);
            points.push(InputPoint::new(p.x, p.y, GROUND_Z));
            l += step;
        }
        f += step;
    }
    points
}

/// A vertical post: returns from ground level up to `top` mm at one spot.
pub fn post_points(at: GlobalPoint, top: i16) -> Vec<InputPoint> {
    let mut points = Vec::new();
    let mut z = GROUND_Z;
    while z <= top {
        points.push(InputPoint::new(at.x, at.y, z));
        z += 100;
    }
    points
}

/// Ground ahead of the vehicle plus every post within `reach` metres.
pub fn road_scene(pose: &Pose, posts: &[GlobalPoint], reach: f64) -> Vec<InputPoint> {
    let mut points = ground_points(pose, (2.0, 8.0), (-3.0, 3.0), 0.2);
    for post in posts {
        if (post.x - pose.x).hypot(post.y - pose.y) <= reach {
            points.extend(post_points(*post, 0));
        }
    }
    points
}
