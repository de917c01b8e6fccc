//! A finished window converted to export records.

use crate::config::ExportSection;
use crate::core::{Cell, GridCoord};
use crate::grid::CellGrid;

use super::error::ExportError;
use super::fields::ExportFields;
use super::record::Point3B;

/// Placement of an export grid in the global frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    /// Cells along x
    pub width: u32,
    /// Cells along y
    pub height: u32,
    /// Cell edge length (m)
    pub resolution: f32,
    /// Global x of the left edge (m)
    pub left: f64,
    /// Global y of the bottom edge (m)
    pub bottom: f64,
}

impl GridGeometry {
    /// Number of records
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of the interleaved record buffer
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.cell_count() * Point3B::SIZE
    }
}

/// Export records for every cell of a window.
///
/// Stored row-major from the bottom row like [`CellGrid`]; the byte form
/// written to disk starts at the top row.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportGrid {
    geometry: GridGeometry,
    records: Vec<Point3B>,
}

impl ExportGrid {
    /// Wrap an existing record buffer
    pub fn new(geometry: GridGeometry, records: Vec<Point3B>) -> Result<Self, ExportError> {
        if records.len() != geometry.cell_count() {
            return Err(ExportError::LengthMismatch {
                expected: geometry.byte_len(),
                actual: records.len() * Point3B::SIZE,
            });
        }
        Ok(Self { geometry, records })
    }

    /// Classify every cell of `grid` and encode it
    pub fn from_grid(grid: &CellGrid<'_>, section: &ExportSection) -> Self {
        Self::from_grid_with(grid, section, |_, _, _| {})
    }

    /// Like [`from_grid`](Self::from_grid), letting `decorate` add fields
    /// the cell type cannot express (stop lines, arrows, lamps, moving
    /// obstacles).
    pub fn from_grid_with<F>(grid: &CellGrid<'_>, section: &ExportSection, mut decorate: F) -> Self
    where
        F: FnMut(GridCoord, &Cell, &mut ExportFields),
    {
        let prob_map = &grid.params().prob_map;
        let priority = grid.priority();
        let records = grid
            .iter()
            .map(|(coord, cell)| {
                let point_type = cell.classify(prob_map, priority);
                let mut fields = ExportFields::for_type(point_type, section.unknown_as_clear);
                decorate(coord, cell, &mut fields);
                Point3B::encode(&fields)
            })
            .collect();

        let bounds = grid.range().bounds();
        Self {
            geometry: GridGeometry {
                width: grid.width() as u32,
                height: grid.height() as u32,
                resolution: grid.range().resolution() as f32,
                left: bounds.left,
                bottom: bounds.bottom,
            },
            records,
        }
    }

    /// Placement in the global frame
    #[inline]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// All records, row-major from the bottom row
    #[inline]
    pub fn records(&self) -> &[Point3B] {
        &self.records
    }

    /// Record at cell (x, y)
    pub fn get(&self, x: u32, y: u32) -> Option<Point3B> {
        if x >= self.geometry.width || y >= self.geometry.height {
            return None;
        }
        self.records
            .get(y as usize * self.geometry.width as usize + x as usize)
            .copied()
    }

    /// Interleaved `base, road, sig` bytes, top row first
    pub fn to_bytes(&self) -> Vec<u8> {
        let width = self.geometry.width as usize;
        let mut bytes = Vec::with_capacity(self.geometry.byte_len());
        if width == 0 {
            return bytes;
        }
        for row in self.records.chunks(width).rev() {
            for record in row {
                bytes.extend_from_slice(&record.to_bytes());
            }
        }
        bytes
    }

    /// Inverse of [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(geometry: GridGeometry, bytes: &[u8]) -> Result<Self, ExportError> {
        if bytes.len() != geometry.byte_len() {
            return Err(ExportError::LengthMismatch {
                expected: geometry.byte_len(),
                actual: bytes.len(),
            });
        }
        let row_bytes = geometry.width as usize * Point3B::SIZE;
        let mut records = Vec::with_capacity(geometry.cell_count());
        if row_bytes > 0 {
            for row in bytes.chunks(row_bytes).rev() {
                records.extend(
                    row.chunks_exact(Point3B::SIZE)
                        .map(|b| Point3B::from_bytes([b[0], b[1], b[2]])),
                );
            }
        }
        Self::new(geometry, records)
    }
}
