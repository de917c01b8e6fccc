//! Export encoding errors.

use thiserror::Error;

/// Three-byte record encode/decode error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Raw code does not fit its bit field
    #[error("value {value} does not fit {width}-bit field '{field}'")]
    FieldOutOfRange {
        /// Field name
        field: &'static str,
        /// Offending raw code
        value: u8,
        /// Field width in bits
        width: u8,
    },

    /// Raw code fits the field but names no variant
    #[error("unknown code {code} for field '{field}'")]
    UnknownCode {
        /// Field name
        field: &'static str,
        /// Offending raw code
        code: u8,
    },

    /// Reserved bits of the sig byte are set
    #[error("reserved sig bits set: {bits:#08b}")]
    ReservedBits {
        /// The reserved bits as found
        bits: u8,
    },

    /// Record buffer does not match the grid dimensions
    #[error("expected {expected} bytes of records, got {actual}")]
    LengthMismatch {
        /// Bytes required by width × height × 3
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}
