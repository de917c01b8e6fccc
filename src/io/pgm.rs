//! Binary PGM (P5) rasters of cell grids.

use std::io::Write;
use std::path::Path;

use crate::config::ProbMapSection;
use crate::core::{Cell, MapKind, TypePriority};
use crate::grid::CellGrid;

use super::error::IoError;

/// Gray level for a cell that holds points but no height relief
const RELIEF_BASE: i32 = 64;
/// Gray step per `unit_height` of vertical extent
const RELIEF_STEP: i32 = 32;

/// How cells become gray levels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterStyle {
    /// Classified type code
    TypeCodes,
    /// Occupancy probability scaled to 0..=255
    Probability,
    /// Vertical extent in `unit_height` steps
    HeightRelief,
}

impl RasterStyle {
    /// Raster style used when saving a map kind
    pub fn for_kind(kind: MapKind) -> Option<Self> {
        match kind {
            MapKind::Local => Some(RasterStyle::TypeCodes),
            MapKind::Accumulated => Some(RasterStyle::Probability),
            MapKind::Dynamic => Some(RasterStyle::HeightRelief),
            MapKind::ThreeByte => None,
        }
    }

    /// Gray level of one cell
    pub fn gray(self, cell: &Cell, params: &ProbMapSection, priority: &TypePriority) -> u8 {
        match self {
            RasterStyle::TypeCodes => cell.classify(params, priority).code(),
            RasterStyle::Probability => (cell.probability() * 255.0).round().clamp(0.0, 255.0) as u8,
            RasterStyle::HeightRelief => {
                if !cell.has_points() {
                    return 0;
                }
                let steps = cell.height_extent() / params.unit_height.max(1) as i32;
                (RELIEF_BASE + RELIEF_STEP * steps).min(255) as u8
            }
        }
    }
}

/// Save a grid as a PGM image
pub fn save_pgm(grid: &CellGrid<'_>, style: RasterStyle, path: &Path) -> Result<(), IoError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_pgm(grid, style, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Write a grid as PGM, top row first, each cell a `pixel_per_grid` square
pub fn write_pgm<W: Write>(
    grid: &CellGrid<'_>,
    style: RasterStyle,
    writer: &mut W,
) -> Result<(), IoError> {
    let params = grid.params();
    let scale = params.scale.pixel_per_grid.max(1) as usize;
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    write!(writer, "P5\n{} {}\n255\n", width * scale, height * scale)?;

    let mut row = Vec::with_capacity(width * scale);
    for cells in grid.cells().chunks(width.max(1)).rev() {
        row.clear();
        for cell in cells {
            let gray = style.gray(cell, &params.prob_map, grid.priority());
            row.extend(std::iter::repeat_n(gray, scale));
        }
        for _ in 0..scale {
            writer.write_all(&row)?;
        }
    }
    Ok(())
}
