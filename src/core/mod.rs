//! Core types for the MargaMap library.
//!
//! All global coordinates are metres in the plane anchored at the
//! differential-GPS station. Heights are millimetres relative to the LIDAR,
//! matching the raw sensor's integer output.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`GlobalPoint`]: Floating-point global coordinates in metres
//! - [`GridCoord`]: Integer cell indices inside one coordinate range
//! - [`InputPoint`]: A LIDAR return already placed in the global frame
//!
//! ### Vehicle State
//! - [`Pose`]: Vehicle position and heading
//!
//! ### Taxonomy
//! - [`PointType`]: Semantic classification with fixed persisted codes
//! - [`MapKind`]: Which stage of the pipeline a map belongs to
//! - [`TypePriority`]: Winner table for merging two cell types
//!
//! ### Grid Cells
//! - [`Cell`]: Occupancy probability, height envelope, hit count and type
//! - [`Evidence`]: Direction a single frame pushes a cell's probability

mod cell;
mod point;
mod point_type;
mod pose;
mod priority;

pub use cell::{Cell, Evidence};
pub use point::{GlobalPoint, GridCoord, InputPoint};
pub use point_type::{CellType, MapKind, PointType, TaxonomyError};
pub use pose::{Pose, normalize_angle};
pub use priority::{PriorityError, TypePriority};
