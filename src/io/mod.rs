//! Map persistence.
//!
//! - **`.3b` format**: binary export of [`ExportGrid`](crate::export::ExportGrid) records
//! - **PGM rasters**: gray-level images of cell grids for inspection
//! - **[`MapSaver`]**: writes the configured map kinds every N frames
//!
//! ```rust,ignore
//! use marga_map::io::{save_three_byte, load_three_byte};
//!
//! save_three_byte(&export, Path::new("map.3b"))?;
//! let export = load_three_byte(Path::new("map.3b"))?;
//! ```

mod error;
mod pgm;
mod saver;
mod three_byte;

pub use error::IoError;
pub use pgm::{RasterStyle, save_pgm, write_pgm};
pub use saver::MapSaver;
pub use three_byte::{load_three_byte, read_three_byte, save_three_byte, write_three_byte};
