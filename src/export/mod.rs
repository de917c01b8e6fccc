//! Compact three-byte export encoding.
//!
//! Every exported cell is one [`Point3B`] record. Each byte is split into
//! bit fields with fixed codes; the codes are a file-format contract shared
//! with downstream planners and must not change.
//!
//! | byte | bits | field |
//! |------|------|-------|
//! | base | 7-6 | [`RoadEdge`] |
//! | base | 5-3 | [`Obstacle`] |
//! | base | 2-1 | [`LaneLine`] |
//! | base | 0 | [`StopLine`] |
//! | road | 7 | [`Curb`] |
//! | road | 6-5 | [`FenceRamp`] |
//! | road | 4-3 | [`Region`] |
//! | road | 2-0 | [`Arrow`] |
//! | sig | 7-6 | [`Lamp`] |
//! | sig | 5-0 | reserved, zero |

mod bitfield;
mod error;
mod fields;
mod grid;
mod record;

pub use bitfield::BitField;
pub use error::ExportError;
pub use fields::{
    Arrow, Curb, ExportFields, FenceRamp, FieldCodes, Lamp, LaneLine, Obstacle, Region, RoadEdge,
    StopLine,
};
pub use grid::{ExportGrid, GridGeometry};
pub use record::Point3B;
