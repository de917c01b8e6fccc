//! Periodic saving of local map products.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::{ExportSection, MargaConfig};
use crate::core::MapKind;
use crate::export::ExportGrid;
use crate::grid::{CellGrid, LocalMap};

use super::error::IoError;
use super::pgm::{RasterStyle, save_pgm};
use super::three_byte::save_three_byte;

/// Writes the map kinds listed in `local_map.save_needed` every
/// `local_map.save_interval` frames.
///
/// Files are named `<stem>_<frame>.<ext>` inside the output directory,
/// e.g. `local_000120.pgm` or `3b_000120.3b`.
#[derive(Clone, Debug)]
pub struct MapSaver {
    output_dir: PathBuf,
    save_needed: BTreeSet<MapKind>,
    save_interval: u32,
    export: ExportSection,
    files_written: usize,
}

impl MapSaver {
    /// Create a saver from the parameter store
    pub fn new(params: &MargaConfig) -> Self {
        Self {
            output_dir: PathBuf::from(&params.persistence.output_dir),
            save_needed: params.local_map.save_needed.clone(),
            save_interval: params.local_map.save_interval,
            export: params.export.clone(),
            files_written: 0,
        }
    }

    /// Override the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Directory receiving saved maps
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Files written so far
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    /// Should frame `frame_count` trigger a save?
    ///
    /// Never true when `save_interval` is 0 or nothing is selected.
    pub fn is_due(&self, frame_count: u64) -> bool {
        self.save_interval > 0
            && !self.save_needed.is_empty()
            && frame_count > 0
            && frame_count % self.save_interval as u64 == 0
    }

    /// Save if the map's frame count hits the interval
    pub fn save_if_due(&mut self, map: &LocalMap<'_>) -> Result<Vec<PathBuf>, IoError> {
        if !self.is_due(map.frame_count()) {
            return Ok(Vec::new());
        }
        self.save(map)
    }

    /// Save every selected map kind now
    pub fn save(&mut self, map: &LocalMap<'_>) -> Result<Vec<PathBuf>, IoError> {
        if self.save_needed.is_empty() {
            log::warn!("Save requested but no map kinds are selected");
            return Ok(Vec::new());
        }
        std::fs::create_dir_all(&self.output_dir)?;

        let frame = map.frame_count();
        let mut written = Vec::with_capacity(self.save_needed.len());
        for &kind in &self.save_needed {
            let path = self.path_for(kind, frame);
            match kind {
                MapKind::ThreeByte => {
                    let export = ExportGrid::from_grid(map.accumulated(), &self.export);
                    save_three_byte(&export, &path)?;
                }
                MapKind::Dynamic => save_raster(map.last_frame(), kind, &path)?,
                MapKind::Accumulated | MapKind::Local => {
                    save_raster(map.accumulated(), kind, &path)?
                }
            }
            log::info!("Saved {:?} map to {}", kind, path.display());
            written.push(path);
        }
        self.files_written += written.len();
        Ok(written)
    }

    fn path_for(&self, kind: MapKind, frame: u64) -> PathBuf {
        let ext = match kind {
            MapKind::ThreeByte => "3b",
            _ => "pgm",
        };
        self.output_dir
            .join(format!("{}_{:06}.{}", kind.file_stem(), frame, ext))
    }
}

fn save_raster(grid: &CellGrid<'_>, kind: MapKind, path: &Path) -> Result<(), IoError> {
    let style = RasterStyle::for_kind(kind).ok_or(IoError::NoRaster(kind))?;
    save_pgm(grid, style, path)
}
