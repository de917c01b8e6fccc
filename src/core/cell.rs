//! Grid cell state and the fusion operator.
//!
//! A cell accumulates three independent things:
//! - an occupancy probability, nudged by one increment per frame of evidence
//! - a height envelope (highest, lowest, mean) over every point that fell in it
//! - a semantic type, merged through a [`TypePriority`] table
//!
//! Cells are only changed through [`Cell::fuse`] and [`Cell::apply_evidence`]
//! (plus [`Cell::resolve_type`], which re-derives the occupancy layer).

use crate::config::ProbMapSection;

use super::point_type::PointType;
use super::priority::TypePriority;

/// Direction one frame pushes a cell's occupancy probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Evidence {
    /// Towards 1
    Occupied,
    /// Towards 0
    Clear,
    /// No change (not enough or inconsistent data)
    Neutral,
}

impl Evidence {
    /// Signed probability change for one unit of evidence
    #[inline]
    pub fn delta(self, increment: f32) -> f32 {
        match self {
            Evidence::Occupied => increment,
            Evidence::Clear => -increment,
            Evidence::Neutral => 0.0,
        }
    }
}

/// A single grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Occupancy probability in [0, 1]
    p: f32,
    /// Highest point height (mm)
    highest: i16,
    /// Lowest point height (mm)
    lowest: i16,
    /// Mean point height (mm)
    average: f32,
    /// Points that fell in this cell (saturating)
    point_num: u16,
    /// Frames of evidence (saturating)
    hit_count: u8,
    /// Resolved semantic type
    cell_type: PointType,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            p: Self::UNKNOWN_PROBABILITY,
            highest: 0,
            lowest: 0,
            average: 0.0,
            point_num: 0,
            hit_count: 0,
            cell_type: PointType::Unknown,
        }
    }
}

impl Cell {
    /// Probability of a cell nothing is known about
    pub const UNKNOWN_PROBABILITY: f32 = 0.5;

    /// Create a new unknown cell
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observation of a single point at height `z` (mm).
    #[inline]
    pub fn from_point(z: i16) -> Self {
        Self {
            highest: z,
            lowest: z,
            average: z as f32,
            point_num: 1,
            ..Self::default()
        }
    }

    /// Observation carrying one frame of occupancy evidence.
    pub fn observation(evidence: Evidence, increment: f32) -> Self {
        let mut cell = Self::default();
        cell.apply_evidence(evidence, increment);
        cell
    }

    /// Observation carrying a semantic label from an external classifier.
    #[inline]
    pub fn labeled(cell_type: PointType) -> Self {
        Self {
            hit_count: u8::from(cell_type.is_known()),
            cell_type,
            ..Self::default()
        }
    }

    /// Occupancy probability
    #[inline]
    pub fn probability(&self) -> f32 {
        self.p
    }

    /// Highest height (mm), meaningful when `has_points()`
    #[inline]
    pub fn highest(&self) -> i16 {
        self.highest
    }

    /// Lowest height (mm), meaningful when `has_points()`
    #[inline]
    pub fn lowest(&self) -> i16 {
        self.lowest
    }

    /// Mean height (mm), meaningful when `has_points()`
    #[inline]
    pub fn average(&self) -> f32 {
        self.average
    }

    /// Number of points fused into this cell
    #[inline]
    pub fn point_num(&self) -> u16 {
        self.point_num
    }

    /// Frames of evidence fused into this cell
    #[inline]
    pub fn hit_count(&self) -> u8 {
        self.hit_count
    }

    /// Current semantic type
    #[inline]
    pub fn cell_type(&self) -> PointType {
        self.cell_type
    }

    /// Has any point landed here?
    #[inline]
    pub fn has_points(&self) -> bool {
        self.point_num > 0
    }

    /// Vertical extent of the height envelope (mm)
    #[inline]
    pub fn height_extent(&self) -> i32 {
        self.highest as i32 - self.lowest as i32
    }

    /// Fuse another cell (or observation) into this one.
    ///
    /// - heights: envelope max/min, count-weighted incremental mean
    /// - probability: deviations from 0.5 add, result clamped to [0, 1]
    /// - counters: saturating sums
    /// - type: resolved by `priority`
    pub fn fuse(&mut self, other: &Cell, priority: &TypePriority) {
        match (self.point_num, other.point_num) {
            (_, 0) => {}
            (0, _) => {
                self.highest = other.highest;
                self.lowest = other.lowest;
                self.average = other.average;
                self.point_num = other.point_num;
            }
            (n_self, n_other) => {
                self.highest = self.highest.max(other.highest);
                self.lowest = self.lowest.min(other.lowest);
                let weight = n_other as f32 / (n_self as f32 + n_other as f32);
                self.average += (other.average - self.average) * weight;
                self.point_num = n_self.saturating_add(n_other);
            }
        }

        self.p = (self.p + other.p - Self::UNKNOWN_PROBABILITY).clamp(0.0, 1.0);
        self.hit_count = self.hit_count.saturating_add(other.hit_count);
        self.cell_type = priority.resolve(self.cell_type, other.cell_type);
    }

    /// Apply one frame of evidence in place.
    pub fn apply_evidence(&mut self, evidence: Evidence, increment: f32) {
        if evidence == Evidence::Neutral {
            return;
        }
        self.p = (self.p + evidence.delta(increment)).clamp(0.0, 1.0);
        self.hit_count = self.hit_count.saturating_add(1);
    }

    /// Classify this cell.
    ///
    /// The occupancy layer reports `Unknown` until `min_hit_count` frames
    /// have contributed, then compares the probability against the
    /// configured thresholds. A semantic label is kept unless that verdict
    /// outranks it in `priority`.
    pub fn classify(&self, params: &ProbMapSection, priority: &TypePriority) -> PointType {
        let verdict = if self.hit_count < params.min_hit_count {
            PointType::Unknown
        } else if params.is_occupied(self.p) {
            PointType::Occupied
        } else if params.is_clear(self.p) {
            PointType::Clear
        } else {
            PointType::Unknown
        };

        if self.cell_type.is_occupancy() {
            verdict
        } else {
            priority.resolve(self.cell_type, verdict)
        }
    }

    /// Store the result of [`classify`](Self::classify).
    ///
    /// Returns true if the type changed.
    pub fn resolve_type(&mut self, params: &ProbMapSection, priority: &TypePriority) -> bool {
        let resolved = self.classify(params, priority);
        let changed = resolved != self.cell_type;
        self.cell_type = resolved;
        changed
    }
}
