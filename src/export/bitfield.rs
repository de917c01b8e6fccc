//! Bit-field placement inside one record byte.

use super::error::ExportError;

/// A run of `width` bits starting at bit `shift` of a byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField {
    /// Field name for error messages
    pub name: &'static str,
    /// Position of the lowest bit
    pub shift: u8,
    /// Number of bits
    pub width: u8,
}

impl BitField {
    /// Define a field
    pub const fn new(name: &'static str, shift: u8, width: u8) -> Self {
        Self { name, shift, width }
    }

    /// Largest raw code the field can hold
    #[inline]
    pub const fn max_code(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Bits of the byte owned by this field
    #[inline]
    pub const fn mask(self) -> u8 {
        self.max_code() << self.shift
    }

    /// Shift a raw code into place. Caller guarantees the code fits.
    #[inline]
    pub const fn place(self, code: u8) -> u8 {
        (code << self.shift) & self.mask()
    }

    /// Write `code` into `byte`, replacing the field's previous bits
    pub fn insert(self, byte: u8, code: u8) -> Result<u8, ExportError> {
        if code > self.max_code() {
            return Err(ExportError::FieldOutOfRange {
                field: self.name,
                value: code,
                width: self.width,
            });
        }
        Ok((byte & !self.mask()) | self.place(code))
    }

    /// Read the field's raw code out of `byte`
    #[inline]
    pub const fn extract(self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.shift
    }
}

/// Base byte: road edge, bits 7-6
pub const ROAD_EDGE: BitField = BitField::new("road_edge", 6, 2);
/// Base byte: obstacle class, bits 5-3
pub const OBSTACLE: BitField = BitField::new("obstacle", 3, 3);
/// Base byte: lane line style, bits 2-1
pub const LANE_LINE: BitField = BitField::new("lane_line", 1, 2);
/// Base byte: stop line flag, bit 0
pub const STOP_LINE: BitField = BitField::new("stop_line", 0, 1);

/// Road byte: curb flag, bit 7
pub const CURB: BitField = BitField::new("curb", 7, 1);
/// Road byte: fence or ramp, bits 6-5
pub const FENCE_RAMP: BitField = BitField::new("fence_ramp", 5, 2);
/// Road byte: region kind, bits 4-3
pub const REGION: BitField = BitField::new("region", 3, 2);
/// Road byte: painted arrow, bits 2-0
pub const ARROW: BitField = BitField::new("arrow", 0, 3);

/// Sig byte: traffic lamp, bits 7-6
pub const LAMP: BitField = BitField::new("lamp", 6, 2);
/// Sig byte: reserved, bits 5-0, always zero
pub const SIG_RESERVED: BitField = BitField::new("sig_reserved", 0, 6);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_partition_bytes() {
        assert_eq!(
            ROAD_EDGE.mask() | OBSTACLE.mask() | LANE_LINE.mask() | STOP_LINE.mask(),
            0xFF
        );
        assert_eq!(ROAD_EDGE.mask() & OBSTACLE.mask(), 0);
        assert_eq!(
            CURB.mask() | FENCE_RAMP.mask() | REGION.mask() | ARROW.mask(),
            0xFF
        );
        assert_eq!(LAMP.mask() | SIG_RESERVED.mask(), 0xFF);
        assert_eq!(LAMP.mask() & SIG_RESERVED.mask(), 0);
    }

    #[test]
    fn test_insert_extract() {
        let byte = ROAD_EDGE.insert(0, 2).unwrap();
        assert_eq!(byte, 128);
        let byte = OBSTACLE.insert(byte, 5).unwrap();
        assert_eq!(byte, 128 + 40);
        assert_eq!(ROAD_EDGE.extract(byte), 2);
        assert_eq!(OBSTACLE.extract(byte), 5);
        // Replaces, does not OR
        let byte = ROAD_EDGE.insert(byte, 1).unwrap();
        assert_eq!(byte, 64 + 40);
    }

    #[test]
    fn test_insert_rejects_wide_code() {
        assert_eq!(
            STOP_LINE.insert(0, 2),
            Err(ExportError::FieldOutOfRange {
                field: "stop_line",
                value: 2,
                width: 1
            })
        );
        assert!(ARROW.insert(0, 7).is_ok());
        assert!(ARROW.insert(0, 8).is_err());
    }
}
