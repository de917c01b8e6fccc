//! # MargaMap
//!
//! Map-coordinate and cell-accumulation engine for a LIDAR-equipped ground
//! vehicle.
//!
//! ## Overview
//!
//! Global LIDAR points are binned into square cells of a window that follows
//! the vehicle. Each cell keeps:
//!
//! - **Occupancy probability** - nudged by one increment per frame of evidence
//! - **Height envelope** - highest, lowest and mean return height
//! - **Semantic type** - occupancy class or a classifier label, merged by priority
//!
//! Finished windows are exported as three-byte bit-packed records or PGM
//! rasters.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga_map::{LocalMap, MargaConfig, MapSaver, Pose};
//!
//! let config = MargaConfig::load_default()?;
//! let pose = Pose::new(0.0, 0.0, 0.0);
//! let mut map = LocalMap::new(&config, &pose)?;
//! let mut saver = MapSaver::new(&config);
//!
//! for (pose, points) in frames {
//!     let stats = map.integrate_frame(&pose, &points)?;
//!     saver.save_if_due(&map)?;
//! }
//! ```
//!
//! ## Coordinate System
//!
//! - Global frame: metres, anchored at the differential-GPS station
//! - Cell (0, 0) is the bottom-left cell of a range; x grows right, y up
//! - Heights: millimetres relative to the sensor

#![warn(missing_docs)]

// Core types
pub mod core;

// Parameter store
pub mod config;

// Global <-> cell mapping
pub mod range;

// Cell grids and the local map
pub mod grid;

// Three-byte export encoding
pub mod export;

// Persistence (save/load)
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    Cell, CellType, Evidence, GlobalPoint, GridCoord, InputPoint, MapKind, PointType, Pose,
    TypePriority,
};

pub use config::{ConfigError, MargaConfig};
pub use export::{ExportFields, ExportGrid, Point3B};
pub use grid::{CellGrid, FrameStats, LocalMap};
pub use io::{IoError, MapSaver};
pub use range::{CoordinateRange, RangeBounds, RangeError};
