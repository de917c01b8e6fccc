//! Vehicle-following local map.

use crate::config::MargaConfig;
use crate::core::{Cell, GridCoord, InputPoint, MapKind, PointType, Pose};
use crate::range::{CoordinateRange, RangeError};

use super::frame::{FrameStats, evidence_for};
use super::storage::{CellGrid, ReanchorStats};

/// Re-centre once the vehicle is closer than `expand_unit / RECENTER_DIVISOR`
/// to an edge of the window
const RECENTER_DIVISOR: f64 = 3.0;

/// Accumulated occupancy around a moving vehicle.
///
/// Each frame goes through three steps:
/// 1. follow the pose, re-anchoring the window if the vehicle nears an edge
/// 2. reduce the frame's points into a fresh dynamic grid
/// 3. derive one unit of evidence per touched cell and fuse it into the
///    accumulated grid
///
/// Step 1 always completes before any point of the frame is inserted.
#[derive(Clone, Debug)]
pub struct LocalMap<'p> {
    params: &'p MargaConfig,
    accumulated: CellGrid<'p>,
    last_frame: CellGrid<'p>,
    frame_count: u64,
}

impl<'p> LocalMap<'p> {
    /// Create an empty window centred on `pose`
    pub fn new(params: &'p MargaConfig, pose: &Pose) -> Result<Self, RangeError> {
        let range = CoordinateRange::around_pose(params, pose)?;
        log::info!(
            "Local map {}x{} cells around ({:.2}, {:.2})",
            range.width(),
            range.height(),
            pose.x,
            pose.y
        );
        Ok(Self {
            params,
            last_frame: CellGrid::new(MapKind::Dynamic, range.clone()),
            accumulated: CellGrid::new(MapKind::Accumulated, range),
            frame_count: 0,
        })
    }

    /// Shared parameter store
    #[inline]
    pub fn params(&self) -> &'p MargaConfig {
        self.params
    }

    /// Current window
    #[inline]
    pub fn range(&self) -> &CoordinateRange<'p> {
        self.accumulated.range()
    }

    /// Fused map of every frame so far
    #[inline]
    pub fn accumulated(&self) -> &CellGrid<'p> {
        &self.accumulated
    }

    /// Points of the most recent frame only
    #[inline]
    pub fn last_frame(&self) -> &CellGrid<'p> {
        &self.last_frame
    }

    /// Frames integrated so far
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Re-centre the window on `pose` if it has come too close to an edge.
    ///
    /// Returns the carry-over statistics when the window moved.
    pub fn follow(&mut self, pose: &Pose) -> Result<Option<ReanchorStats>, RangeError> {
        let margin = self.range().margin_to_edge(pose.x, pose.y);
        if margin >= self.params.expand_unit() / RECENTER_DIVISOR {
            return Ok(None);
        }

        let new_range = CoordinateRange::around_pose(self.params, pose)?;
        let stats = self.accumulated.reanchor(new_range);
        log::info!(
            "Re-anchored local map at ({:.2}, {:.2}): kept {} cells, dropped {}",
            pose.x,
            pose.y,
            stats.kept,
            stats.dropped
        );
        Ok(Some(stats))
    }

    /// Integrate one LIDAR frame taken at `pose`.
    pub fn integrate_frame(
        &mut self,
        pose: &Pose,
        points: &[InputPoint],
    ) -> Result<FrameStats, RangeError> {
        let mut stats = FrameStats {
            reanchor: self.follow(pose)?,
            ..FrameStats::default()
        };

        let prob_map = &self.params.prob_map;
        let mut frame = CellGrid::new(MapKind::Dynamic, self.range().clone());
        for point in points {
            stats.points += 1;
            if prob_map.in_detect_sector(point.rot_angle) {
                stats.forward += 1;
            }
            match frame.insert_point(point) {
                Ok(_) => stats.inserted += 1,
                Err(e) => {
                    log::trace!("Dropped point: {e}");
                    stats.dropped += 1;
                }
            }
        }

        for (coord, cell) in frame.iter().filter(|(_, cell)| cell.has_points()) {
            let evidence = evidence_for(cell, prob_map);
            stats.cells_touched += 1;
            stats.count(evidence);
            self.accumulated.observe(coord, cell, evidence);
        }

        self.last_frame = frame;
        self.frame_count += 1;
        log::debug!(
            "Frame {}: {} points, {} dropped, {} cells ({} occupied, {} clear)",
            self.frame_count,
            stats.points,
            stats.dropped,
            stats.cells_touched,
            stats.occupied,
            stats.clear
        );
        Ok(stats)
    }

    /// Attach a semantic label from an external classifier to a point.
    pub fn annotate(
        &mut self,
        x: f64,
        y: f64,
        point_type: PointType,
    ) -> Result<GridCoord, RangeError> {
        self.accumulated.fuse_world(x, y, &Cell::labeled(point_type))
    }

    /// Re-classify every accumulated cell
    pub fn resolve_types(&mut self) -> usize {
        self.accumulated.resolve_types()
    }
}
