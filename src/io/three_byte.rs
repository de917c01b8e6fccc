//! `.3b` binary format for exported maps.
//!
//! Format:
//! - Header (40 bytes, little-endian):
//!   - Magic: "MG3B" (4 bytes)
//!   - Version: u8 (1 byte)
//!   - Reserved: 3 bytes
//!   - Width: u32 (4 bytes)
//!   - Height: u32 (4 bytes)
//!   - Resolution: f32 (4 bytes)
//!   - Reserved: 4 bytes
//!   - Left: f64 (8 bytes)
//!   - Bottom: f64 (8 bytes)
//! - Records: width * height * 3 bytes, top row first

use std::io::{Read, Write};
use std::path::Path;

use crate::export::{ExportGrid, GridGeometry};

use super::error::IoError;

/// Magic bytes for .3b format
const MAGIC: &[u8; 4] = b"MG3B";

/// Current format version
const VERSION: u8 = 1;

/// Header size in bytes
const HEADER_SIZE: usize = 40;

/// Largest accepted dimension, matching the 16-bit grid index
const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Save an export grid to a .3b file
pub fn save_three_byte(grid: &ExportGrid, path: &Path) -> Result<(), IoError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_three_byte(grid, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Write an export grid in .3b format
pub fn write_three_byte<W: Write>(grid: &ExportGrid, writer: &mut W) -> Result<(), IoError> {
    let geometry = grid.geometry();
    let mut header = [0u8; HEADER_SIZE];
    header[0..4].copy_from_slice(MAGIC);
    header[4] = VERSION;
    header[8..12].copy_from_slice(&geometry.width.to_le_bytes());
    header[12..16].copy_from_slice(&geometry.height.to_le_bytes());
    header[16..20].copy_from_slice(&geometry.resolution.to_le_bytes());
    header[24..32].copy_from_slice(&geometry.left.to_le_bytes());
    header[32..40].copy_from_slice(&geometry.bottom.to_le_bytes());

    writer.write_all(&header)?;
    writer.write_all(&grid.to_bytes())?;
    Ok(())
}

/// Load an export grid from a .3b file
pub fn load_three_byte(path: &Path) -> Result<ExportGrid, IoError> {
    let mut file = std::io::BufReader::new(std::fs::File::open(path)?);
    read_three_byte(&mut file)
}

/// Read an export grid in .3b format
pub fn read_three_byte<R: Read>(reader: &mut R) -> Result<ExportGrid, IoError> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    if &header[0..4] != MAGIC {
        return Err(IoError::InvalidFormat("Invalid magic bytes".to_string()));
    }
    let version = header[4];
    if version != VERSION {
        return Err(IoError::VersionMismatch {
            expected: VERSION,
            found: version,
        });
    }

    let width = u32::from_le_bytes([header[8], header[9], header[10], header[11]]);
    let height = u32::from_le_bytes([header[12], header[13], header[14], header[15]]);
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(IoError::InvalidFormat(format!(
            "Unsupported dimensions {width}x{height}"
        )));
    }

    let resolution = f32::from_le_bytes([header[16], header[17], header[18], header[19]]);
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(IoError::InvalidFormat(format!(
            "Invalid resolution {resolution}"
        )));
    }

    let mut left = [0u8; 8];
    left.copy_from_slice(&header[24..32]);
    let mut bottom = [0u8; 8];
    bottom.copy_from_slice(&header[32..40]);

    let geometry = GridGeometry {
        width,
        height,
        resolution,
        left: f64::from_le_bytes(left),
        bottom: f64::from_le_bytes(bottom),
    };

    let mut records = vec![0u8; geometry.byte_len()];
    reader.read_exact(&mut records)?;
    Ok(ExportGrid::from_bytes(geometry, &records)?)
}
