//! Persistence errors.

use thiserror::Error;

use crate::core::MapKind;
use crate::export::ExportError;

/// Error type for map I/O
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not a valid map
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// File written by an incompatible version
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Supported format version
        expected: u8,
        /// Version in the file
        found: u8,
    },

    /// Record payload could not be decoded
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Map kind has no raster form
    #[error("{0:?} maps cannot be rendered as a raster")]
    NoRaster(MapKind),
}
