//! Dense cell storage bound to one coordinate range.

use std::collections::BTreeMap;

use crate::config::MargaConfig;
use crate::core::{Cell, Evidence, GridCoord, InputPoint, MapKind, PointType, TypePriority};
use crate::range::{CoordinateRange, RangeError};

/// Outcome of moving a grid onto a new range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReanchorStats {
    /// Non-empty cells carried into the new range
    pub kept: usize,
    /// Non-empty cells that fell outside the new range
    pub dropped: usize,
}

/// Row-major grid of [`Cell`]s.
///
/// Cell (x, y) lives at index `y * width + x`, row 0 at the bottom of the
/// range. Cells are stored as plain structs; fusion touches every field of
/// one cell at a time, so keeping them together beats splitting per field.
#[derive(Clone, Debug)]
pub struct CellGrid<'p> {
    kind: MapKind,
    range: CoordinateRange<'p>,
    cells: Vec<Cell>,
    priority: TypePriority,
}

impl<'p> CellGrid<'p> {
    /// Create an all-unknown grid covering `range`
    pub fn new(kind: MapKind, range: CoordinateRange<'p>) -> Self {
        let priority = range.params().type_priority();
        Self {
            kind,
            cells: vec![Cell::default(); range.cell_count()],
            range,
            priority,
        }
    }

    /// Which pipeline stage this grid holds
    #[inline]
    pub fn kind(&self) -> MapKind {
        self.kind
    }

    /// Coordinate range the cells are laid out in
    #[inline]
    pub fn range(&self) -> &CoordinateRange<'p> {
        &self.range
    }

    /// Shared parameter store
    #[inline]
    pub fn params(&self) -> &'p MargaConfig {
        self.range.params()
    }

    /// Merge table used by [`fuse_at`](Self::fuse_at)
    #[inline]
    pub fn priority(&self) -> &TypePriority {
        &self.priority
    }

    /// Cells along x
    #[inline]
    pub fn width(&self) -> u16 {
        self.range.width()
    }

    /// Cells along y
    #[inline]
    pub fn height(&self) -> u16 {
        self.range.height()
    }

    /// All cells, row-major from the bottom row
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at grid coordinates
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<&Cell> {
        self.range.index(coord).map(|i| &self.cells[i])
    }

    /// Cell containing a global point
    pub fn get_world(&self, x: f64, y: f64) -> Option<&Cell> {
        let coord = self.range.to_local(x, y).ok()?;
        self.get(coord)
    }

    /// Iterate over all cells with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Cell)> + '_ {
        self.range.coords().zip(self.cells.iter())
    }

    /// Iterate over cells that hold any state
    pub fn iter_touched(&self) -> impl Iterator<Item = (GridCoord, &Cell)> + '_ {
        self.iter().filter(|(_, cell)| **cell != Cell::default())
    }

    /// Fuse an observation into the cell at `coord`.
    ///
    /// Returns false if the coordinate is outside the grid.
    pub fn fuse_at(&mut self, coord: GridCoord, observation: &Cell) -> bool {
        match self.range.index(coord) {
            Some(i) => {
                self.cells[i].fuse(observation, &self.priority);
                true
            }
            None => false,
        }
    }

    /// Fuse an observation into the cell containing a global point
    pub fn fuse_world(&mut self, x: f64, y: f64, observation: &Cell) -> Result<GridCoord, RangeError> {
        let coord = self.range.to_local(x, y)?;
        self.fuse_at(coord, observation);
        Ok(coord)
    }

    /// Add one LIDAR return to the height statistics of its cell
    #[inline]
    pub fn insert_point(&mut self, point: &InputPoint) -> Result<GridCoord, RangeError> {
        self.fuse_world(point.x, point.y, &Cell::from_point(point.z))
    }

    /// Fuse a frame's cell and one unit of evidence, then re-classify.
    ///
    /// Returns the resolved type, or `None` if `coord` is outside the grid.
    pub fn observe(
        &mut self,
        coord: GridCoord,
        frame_cell: &Cell,
        evidence: Evidence,
    ) -> Option<PointType> {
        let i = self.range.index(coord)?;
        let prob_map = &self.range.params().prob_map;
        let cell = &mut self.cells[i];
        cell.fuse(frame_cell, &self.priority);
        cell.apply_evidence(evidence, prob_map.increment_unit);
        cell.resolve_type(prob_map, &self.priority);
        Some(cell.cell_type())
    }

    /// Re-classify the occupancy layer of every cell.
    ///
    /// Returns the number of cells whose type changed.
    pub fn resolve_types(&mut self) -> usize {
        let prob_map = &self.range.params().prob_map;
        let priority = &self.priority;
        self.cells
            .iter_mut()
            .map(|cell| cell.resolve_type(prob_map, priority))
            .filter(|&changed| changed)
            .count()
    }

    /// Move onto a new range, carrying every cell that is still covered.
    ///
    /// Each non-empty cell is re-addressed through its global centre and
    /// fused into a fresh grid laid out for `new_range`.
    pub fn reanchor(&mut self, new_range: CoordinateRange<'p>) -> ReanchorStats {
        let mut stats = ReanchorStats::default();
        let mut cells = vec![Cell::default(); new_range.cell_count()];

        for (coord, cell) in self.range.coords().zip(self.cells.iter()) {
            if *cell == Cell::default() {
                continue;
            }
            let target = self
                .range
                .translate(coord, &new_range)
                .ok()
                .and_then(|moved| new_range.index(moved));
            match target {
                Some(i) => {
                    cells[i].fuse(cell, &self.priority);
                    stats.kept += 1;
                }
                None => stats.dropped += 1,
            }
        }

        self.range = new_range;
        self.cells = cells;
        stats
    }

    /// Reset every cell to unknown
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Number of cells per resolved type
    pub fn count_by_type(&self) -> BTreeMap<PointType, usize> {
        let mut counts = BTreeMap::new();
        for cell in &self.cells {
            *counts.entry(cell.cell_type()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::RangeBounds;
    use approx::assert_relative_eq;

    fn grid(params: &MargaConfig) -> CellGrid<'_> {
        let range = CoordinateRange::from_params(params).unwrap();
        CellGrid::new(MapKind::Accumulated, range)
    }

    #[test]
    fn test_new_grid_unknown() {
        let params = MargaConfig::default();
        let grid = grid(&params);
        assert_eq!(grid.cells().len(), 125 * 125);
        assert_eq!(grid.count_by_type().get(&PointType::Unknown), Some(&(125 * 125)));
        assert_eq!(grid.iter_touched().count(), 0);
    }

    #[test]
    fn test_insert_point() {
        let params = MargaConfig::default();
        let mut grid = grid(&params);
        let coord = grid.insert_point(&InputPoint::new(0.0, 5.0, -1650)).unwrap();
        assert_eq!(coord, GridCoord::new(62, 62));
        grid.insert_point(&InputPoint::new(0.01, 5.01, -1550)).unwrap();

        let cell = grid.get(coord).unwrap();
        assert_eq!(cell.point_num(), 2);
        assert_eq!(cell.highest(), -1550);
        assert_eq!(cell.lowest(), -1650);
        assert_relative_eq!(cell.average(), -1600.0, epsilon = 1e-3);

        assert!(matches!(
            grid.insert_point(&InputPoint::new(-5.1, 5.0, 0)),
            Err(RangeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_observe_classifies() {
        let params = MargaConfig::default();
        let mut grid = grid(&params);
        let coord = GridCoord::new(10, 10);
        let frame_cell = Cell::from_point(-1000);
        assert_eq!(
            grid.observe(coord, &frame_cell, Evidence::Occupied),
            Some(PointType::Unknown)
        );
        for _ in 0..3 {
            grid.observe(coord, &frame_cell, Evidence::Occupied);
        }
        assert_eq!(grid.get(coord).unwrap().cell_type(), PointType::Occupied);
        assert_eq!(grid.get(coord).unwrap().point_num(), 4);
        assert_eq!(grid.observe(GridCoord::new(500, 0), &frame_cell, Evidence::Clear), None);
    }

    #[test]
    fn test_reanchor_carries_cells() {
        let params = MargaConfig::default();
        let mut grid = grid(&params);
        grid.fuse_world(1.0, 1.0, &Cell::labeled(PointType::Curb)).unwrap();
        grid.fuse_world(-4.9, 0.1, &Cell::labeled(PointType::Pit)).unwrap();

        let mut shifted = grid.range().clone();
        shifted.shift(2.0, 0.0).unwrap();
        let stats = grid.reanchor(shifted);

        assert_eq!(stats, ReanchorStats { kept: 1, dropped: 1 });
        assert_eq!(grid.get_world(1.0, 1.0).unwrap().cell_type(), PointType::Curb);
        assert_eq!(grid.range().bounds(), RangeBounds::new(-3.0, 7.0, 0.0, 10.0));
    }

    #[test]
    fn test_reanchor_keeps_partial_edge_cells() {
        let params = MargaConfig::default();
        let range = CoordinateRange::new(&params, RangeBounds::new(0.0, 1.0, 0.0, 1.0)).unwrap();
        let mut grid = CellGrid::new(MapKind::Accumulated, range.clone());
        let corner = GridCoord::new(12, 12);
        grid.fuse_at(corner, &Cell::labeled(PointType::Curb));

        let stats = grid.reanchor(range);
        assert_eq!(stats, ReanchorStats { kept: 1, dropped: 0 });
        assert_eq!(grid.get(corner).unwrap().cell_type(), PointType::Curb);
    }

    #[test]
    fn test_observe_overrides_lane_line_label() {
        let params = MargaConfig::default();
        let mut grid = grid(&params);
        let coord = GridCoord::new(20, 20);
        grid.fuse_at(coord, &Cell::labeled(PointType::DottedLaneLine));

        let column = Cell::from_point(-800);
        let mut resolved = Vec::new();
        for _ in 0..4 {
            resolved.extend(grid.observe(coord, &column, Evidence::Occupied));
        }
        assert_eq!(
            resolved,
            [
                PointType::DottedLaneLine,
                PointType::DottedLaneLine,
                PointType::DottedLaneLine,
                PointType::Occupied,
            ]
        );
    }

    #[test]
    fn test_resolve_types_and_clear() {
        let params = MargaConfig::default();
        let mut grid = grid(&params);
        for _ in 0..4 {
            grid.fuse_at(GridCoord::new(0, 0), &Cell::observation(Evidence::Clear, 0.05));
        }
        assert_eq!(grid.resolve_types(), 1);
        assert_eq!(grid.count_by_type().get(&PointType::Clear), Some(&1));

        grid.clear();
        assert_eq!(grid.iter_touched().count(), 0);
    }
}
