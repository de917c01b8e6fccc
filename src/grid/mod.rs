//! Cell grids and the vehicle-following local map.
//!
//! ## Architecture
//!
//! ```text
//!   InputPoint[] + Pose
//!          │
//!          ▼
//! ┌─────────────────┐  follow()   ┌──────────────────┐
//! │    LocalMap     │────────────▶│ CoordinateRange  │ (re-anchor)
//! └────────┬────────┘             └──────────────────┘
//!          │ insert_point
//!          ▼
//! ┌─────────────────┐ evidence_for ┌──────────────────┐
//! │ CellGrid        │─────────────▶│ CellGrid         │
//! │ (Dynamic frame) │   observe    │ (Accumulated)    │
//! └─────────────────┘              └──────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`CellGrid`]: dense storage of [`Cell`](crate::core::Cell)s over one range
//! - [`LocalMap`]: per-frame pipeline and window following
//! - [`evidence_for`]: occupancy evidence from one frame's height envelope
//! - [`FrameStats`], [`ReanchorStats`]: counters returned to the caller

mod frame;
mod local_map;
mod storage;

pub use frame::{FrameStats, evidence_for};
pub use local_map::LocalMap;
pub use storage::{CellGrid, ReanchorStats};
