//! Coordinate range: rectangle plus global ↔ cell mapping.

use std::fmt;

use crate::config::MargaConfig;
use crate::core::{GlobalPoint, GridCoord, Pose};

use super::bounds::RangeBounds;
use super::error::RangeError;

/// Slack subtracted before rounding cell counts up, so an extent that is an
/// exact multiple of the grid size does not gain a phantom cell.
const CELL_COUNT_EPSILON: f64 = 1e-9;

/// Rectangular region of the global plane mapped onto a cell grid.
///
/// Borrows the parameter store for its resolution; the store must outlive
/// every range built from it.
#[derive(Clone)]
pub struct CoordinateRange<'p> {
    params: &'p MargaConfig,
    bounds: RangeBounds,
    /// Cells along x
    max_x: u16,
    /// Cells along y
    max_y: u16,
}

/// Cell counts for a rectangle and the rectangle they actually cover.
///
/// Counts round up, so a partial last column or row becomes a whole cell
/// and `right`/`top` move out to its far edge. Every cell centre then lies
/// inside the returned bounds.
fn grid_layout(
    bounds: &RangeBounds,
    grid_size: f64,
) -> Result<(RangeBounds, u16, u16), RangeError> {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return Err(RangeError::InvalidResolution(grid_size));
    }
    if !bounds.is_valid() {
        return Err(RangeError::InvalidBounds {
            left: bounds.left,
            right: bounds.right,
            bottom: bounds.bottom,
            top: bounds.top,
        });
    }

    let scale = 1.0 / grid_size;
    let width = (bounds.width() * scale - CELL_COUNT_EPSILON).ceil().max(1.0);
    let height = (bounds.height() * scale - CELL_COUNT_EPSILON).ceil().max(1.0);
    if width > u16::MAX as f64 || height > u16::MAX as f64 {
        return Err(RangeError::TooLarge { width, height });
    }

    let far_edge = |near: f64, far: f64, cells: f64| {
        let covered = near + cells * grid_size;
        if covered - far > CELL_COUNT_EPSILON {
            covered
        } else {
            far
        }
    };
    let snapped = RangeBounds::new(
        bounds.left,
        far_edge(bounds.left, bounds.right, width),
        bounds.bottom,
        far_edge(bounds.bottom, bounds.top, height),
    );
    Ok((snapped, width as u16, height as u16))
}

impl<'p> CoordinateRange<'p> {
    /// Create a range over explicit bounds.
    ///
    /// `right` and `top` are widened to a whole number of cells.
    pub fn new(params: &'p MargaConfig, bounds: RangeBounds) -> Result<Self, RangeError> {
        let (bounds, max_x, max_y) = grid_layout(&bounds, params.scale.grid_size)?;
        Ok(Self {
            params,
            bounds,
            max_x,
            max_y,
        })
    }

    /// Default range: the configured `x_min..x_max × y_min..y_max` extent
    pub fn from_params(params: &'p MargaConfig) -> Result<Self, RangeError> {
        let scale = &params.scale;
        Self::new(
            params,
            RangeBounds::new(scale.x_min, scale.x_max, scale.y_min, scale.y_max),
        )
    }

    /// Local window around a vehicle pose.
    ///
    /// An axis-aligned square of side [`MargaConfig::expand_unit`] centred on
    /// the pose position. Heading does not rotate the window.
    pub fn around_pose(params: &'p MargaConfig, pose: &Pose) -> Result<Self, RangeError> {
        let bounds = RangeBounds::centered(pose.position(), params.expand_unit());
        Self::new(params, bounds)
    }

    /// Shared parameter store
    #[inline]
    pub fn params(&self) -> &'p MargaConfig {
        self.params
    }

    /// Current rectangle
    #[inline]
    pub fn bounds(&self) -> RangeBounds {
        self.bounds
    }

    /// Cell edge length (m)
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.params.scale.grid_size
    }

    /// Cells per metre
    #[inline]
    pub fn scale(&self) -> f64 {
        self.params.scale.x_scale()
    }

    /// Cells along x
    #[inline]
    pub fn width(&self) -> u16 {
        self.max_x
    }

    /// Cells along y
    #[inline]
    pub fn height(&self) -> u16 {
        self.max_y
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.max_x as usize * self.max_y as usize
    }

    /// Recompute the cell counts from the current bounds and resolution,
    /// widening `right`/`top` to whole cells.
    ///
    /// Returns whether the range is valid. On failure the previous counts
    /// are kept.
    pub fn update(&mut self) -> bool {
        match grid_layout(&self.bounds, self.resolution()) {
            Ok((bounds, max_x, max_y)) => {
                self.bounds = bounds;
                self.max_x = max_x;
                self.max_y = max_y;
                true
            }
            Err(e) => {
                log::warn!("Coordinate range update rejected: {e}");
                false
            }
        }
    }

    /// Replace the rectangle, widening `right`/`top` to whole cells.
    ///
    /// Either bounds and cell counts change together, or nothing changes.
    pub fn set_bounds(&mut self, bounds: RangeBounds) -> Result<(), RangeError> {
        let (bounds, max_x, max_y) = grid_layout(&bounds, self.resolution())?;
        self.bounds = bounds;
        self.max_x = max_x;
        self.max_y = max_y;
        Ok(())
    }

    /// Move the rectangle by (dx, dy) metres
    pub fn shift(&mut self, dx: f64, dy: f64) -> Result<(), RangeError> {
        self.set_bounds(self.bounds.shifted(dx, dy))
    }

    /// Is the global point inside `[left, right) × [bottom, top)`?
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }

    /// Is the cell index inside the grid?
    #[inline]
    pub fn contains_coord(&self, coord: GridCoord) -> bool {
        coord.x < self.max_x && coord.y < self.max_y
    }

    /// Global point → cell index (floor, origin at bottom-left)
    pub fn to_local(&self, x: f64, y: f64) -> Result<GridCoord, RangeError> {
        if !self.contains(x, y) {
            return Err(RangeError::OutOfRange { x, y });
        }
        let scale = self.scale();
        let gx = ((x - self.bounds.left) * scale).floor() as u32;
        let gy = ((y - self.bounds.bottom) * scale).floor() as u32;
        // Rounding can push a point just below the right/top edge onto max
        let gx = gx.min(self.max_x as u32 - 1) as u16;
        let gy = gy.min(self.max_y as u32 - 1) as u16;
        Ok(GridCoord::new(gx, gy))
    }

    /// Cell index → global centre of that cell
    #[inline]
    pub fn to_global(&self, coord: GridCoord) -> GlobalPoint {
        let g = self.resolution();
        GlobalPoint::new(
            self.bounds.left + (coord.x as f64 + 0.5) * g,
            self.bounds.bottom + (coord.y as f64 + 0.5) * g,
        )
    }

    /// Re-express a cell of this range as a cell of `other`
    pub fn translate(
        &self,
        coord: GridCoord,
        other: &CoordinateRange<'_>,
    ) -> Result<GridCoord, RangeError> {
        let center = self.to_global(coord);
        other.to_local(center.x, center.y)
    }

    /// Row-major flat index
    #[inline]
    pub fn index(&self, coord: GridCoord) -> Option<usize> {
        self.contains_coord(coord)
            .then(|| coord.y as usize * self.max_x as usize + coord.x as usize)
    }

    /// Inverse of [`index`](Self::index)
    #[inline]
    pub fn coord_of(&self, index: usize) -> Option<GridCoord> {
        (index < self.cell_count()).then(|| {
            let width = self.max_x as usize;
            GridCoord::new((index % width) as u16, (index / width) as u16)
        })
    }

    /// All cells, row-major from the bottom row
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + use<> {
        let (max_x, max_y) = (self.max_x, self.max_y);
        (0..max_y).flat_map(move |y| (0..max_x).map(move |x| GridCoord::new(x, y)))
    }

    /// Distance (m) from a point to the nearest edge; negative outside
    pub fn margin_to_edge(&self, x: f64, y: f64) -> f64 {
        let b = &self.bounds;
        (x - b.left)
            .min(b.right - x)
            .min(y - b.bottom)
            .min(b.top - y)
    }
}

impl PartialEq for CoordinateRange<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds
            && self.max_x == other.max_x
            && self.max_y == other.max_y
            && self.resolution() == other.resolution()
    }
}

impl fmt::Debug for CoordinateRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateRange")
            .field("bounds", &self.bounds)
            .field("max_x", &self.max_x)
            .field("max_y", &self.max_y)
            .field("grid_size", &self.resolution())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_range() {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        assert_eq!(range.width(), 125);
        assert_eq!(range.height(), 125);
        assert_eq!(range.cell_count(), 125 * 125);
    }

    #[test]
    fn test_to_local_centre() {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        assert_eq!(range.to_local(0.0, 5.0).unwrap(), GridCoord::new(62, 62));
        assert_eq!(range.to_local(-5.0, 0.0).unwrap(), GridCoord::new(0, 0));
        assert_eq!(
            range.to_local(4.9999, 9.9999).unwrap(),
            GridCoord::new(124, 124)
        );
    }

    #[test]
    fn test_out_of_range() {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        assert!(!range.contains(-5.1, 5.0));
        assert_eq!(
            range.to_local(-5.1, 5.0),
            Err(RangeError::OutOfRange { x: -5.1, y: 5.0 })
        );
        // Right and top edges are exclusive
        assert!(range.to_local(5.0, 5.0).is_err());
        assert!(range.to_local(0.0, 10.0).is_err());
    }

    #[test]
    fn test_to_global_is_cell_centre() {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        let p = range.to_global(GridCoord::new(0, 0));
        assert_relative_eq!(p.x, -4.96, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.04, epsilon = 1e-9);

        let coord = GridCoord::new(17, 99);
        let p = range.to_global(coord);
        assert_eq!(range.to_local(p.x, p.y).unwrap(), coord);
    }

    #[test]
    fn test_translate_between_ranges() {
        let params = MargaConfig::default();
        let a = CoordinateRange::from_params(&params).unwrap();
        let mut b = a.clone();
        b.shift(1.6, -0.8).unwrap();

        // Shift of 20 cells right, 10 cells down
        let moved = a.translate(GridCoord::new(50, 50), &b).unwrap();
        assert_eq!(moved, GridCoord::new(30, 60));

        // Leaves b entirely
        assert!(a.translate(GridCoord::new(5, 5), &b).is_err());
    }

    #[test]
    fn test_translate_identity() {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        for coord in range.coords().step_by(97) {
            assert_eq!(range.translate(coord, &range).unwrap(), coord);
        }
    }

    #[test]
    fn test_around_pose() {
        let params = MargaConfig::default();
        let pose = Pose::new(100.0, -20.0, 1.0);
        let range = CoordinateRange::around_pose(&params, &pose).unwrap();
        assert_eq!(range.bounds(), RangeBounds::new(85.0, 115.0, -35.0, -5.0));
        assert_eq!(range.width(), 375);
        assert_eq!(range.height(), 375);
        assert!(range.contains(100.0, -20.0));
        assert_relative_eq!(range.margin_to_edge(100.0, -20.0), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_set_bounds_atomic() {
        let params = MargaConfig::default();
        let mut range = CoordinateRange::from_params(&params).unwrap();
        let before = range.clone();

        let err = range
            .set_bounds(RangeBounds::new(5.0, -5.0, 0.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, RangeError::InvalidBounds { .. }));
        assert_eq!(range, before);

        let err = range
            .set_bounds(RangeBounds::new(0.0, 10_000.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, RangeError::TooLarge { .. }));
        assert_eq!(range, before);

        range
            .set_bounds(RangeBounds::new(0.0, 2.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(range.width(), 25);
        assert_eq!(range.height(), 13);
    }

    #[test]
    fn test_partial_cell_extent_widened() {
        let params = MargaConfig::default();
        let range = CoordinateRange::new(&params, RangeBounds::new(0.0, 1.0, 0.0, 1.0)).unwrap();
        assert_eq!(range.width(), 13);
        assert_eq!(range.height(), 13);
        assert_relative_eq!(range.bounds().right, 1.04, epsilon = 1e-9);
        assert_relative_eq!(range.bounds().top, 1.04, epsilon = 1e-9);

        let last = GridCoord::new(12, 12);
        let centre = range.to_global(last);
        assert!(range.contains(centre.x, centre.y));
        assert_eq!(range.translate(last, &range).unwrap(), last);
        assert_eq!(range.to_local(1.02, 0.5).unwrap(), GridCoord::new(12, 6));
    }

    #[test]
    fn test_update() {
        let params = MargaConfig::default();
        let mut range = CoordinateRange::from_params(&params).unwrap();
        assert!(range.update());
        assert_eq!(range.width(), 125);
    }

    #[test]
    fn test_invalid_resolution() {
        let mut params = MargaConfig::default();
        params.scale.grid_size = 0.0;
        assert_eq!(
            CoordinateRange::from_params(&params).unwrap_err(),
            RangeError::InvalidResolution(0.0)
        );
    }

    #[test]
    fn test_index_roundtrip() {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        assert_eq!(range.index(GridCoord::new(3, 2)), Some(2 * 125 + 3));
        assert_eq!(range.coord_of(2 * 125 + 3), Some(GridCoord::new(3, 2)));
        assert_eq!(range.index(GridCoord::new(125, 0)), None);
        assert_eq!(range.coord_of(125 * 125), None);
        assert_eq!(range.coords().count(), range.cell_count());
    }
}
