//! Per-frame occupancy evidence.

use crate::config::ProbMapSection;
use crate::core::{Cell, Evidence};

use super::storage::ReanchorStats;

/// Points needed before the mean/midpoint spread test is trusted
const MIN_POINTS_FOR_SPREAD: u16 = 3;

/// Evidence one frame's cell contributes to the accumulated map.
///
/// 1. Vertical extent above `height_threshold` means something stands in
///    the cell, unless the mean sits far from the envelope midpoint, which
///    marks a lone outlier over flat ground (neutral).
/// 2. Otherwise a return above `max_ground_height` is a low obstacle.
/// 3. Otherwise the cell is ground.
///
/// Cells without points carry no evidence.
pub fn evidence_for(cell: &Cell, params: &ProbMapSection) -> Evidence {
    if !cell.has_points() {
        return Evidence::Neutral;
    }

    let extent = cell.height_extent();
    if extent > params.height_threshold as i32 {
        let mid = (cell.highest() as f32 + cell.lowest() as f32) / 2.0;
        let spread = (cell.average() - mid).abs();
        if cell.point_num() >= MIN_POINTS_FOR_SPREAD
            && spread > params.max_avg_mid_diff * extent as f32
        {
            return Evidence::Neutral;
        }
        return Evidence::Occupied;
    }

    if cell.highest() > params.max_ground_height {
        Evidence::Occupied
    } else {
        Evidence::Clear
    }
}

/// Counters for one integrated frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Points received
    pub points: usize,
    /// Points that landed inside the window
    pub inserted: usize,
    /// Points outside the window
    pub dropped: usize,
    /// Points inside the forward detection sector
    pub forward: usize,
    /// Cells that received at least one point
    pub cells_touched: usize,
    /// Cells given occupied evidence
    pub occupied: usize,
    /// Cells given clear evidence
    pub clear: usize,
    /// Cells with inconclusive evidence
    pub neutral: usize,
    /// Set when the window moved before this frame
    pub reanchor: Option<ReanchorStats>,
}

impl FrameStats {
    pub(crate) fn count(&mut self, evidence: Evidence) {
        match evidence {
            Evidence::Occupied => self.occupied += 1,
            Evidence::Clear => self.clear += 1,
            Evidence::Neutral => self.neutral += 1,
        }
    }
}
