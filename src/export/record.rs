//! The three-byte export record.

use super::bitfield::{
    ARROW, CURB, FENCE_RAMP, LAMP, LANE_LINE, OBSTACLE, REGION, ROAD_EDGE, SIG_RESERVED,
    STOP_LINE,
};
use super::error::ExportError;
use super::fields::{ExportFields, FieldCodes};

/// One exported cell: three bit-packed bytes.
///
/// ```text
/// base: [road_edge:2][obstacle:3][lane_line:2][stop_line:1]
/// road: [curb:1][fence_ramp:2][region:2][arrow:3]
/// sig:  [lamp:2][reserved:6]
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point3B {
    /// Road edge, obstacle, lane line, stop line
    pub base: u8,
    /// Curb, fence/ramp, region, arrow
    pub road: u8,
    /// Lamp and reserved bits
    pub sig: u8,
}

impl Point3B {
    /// Bytes per record
    pub const SIZE: usize = 3;

    /// Place raw codes into a record.
    ///
    /// Rejects codes wider than their field, then codes no variant is
    /// assigned to (arrow 7), so every packed record decodes.
    pub fn pack(codes: &FieldCodes) -> Result<Self, ExportError> {
        let base = ROAD_EDGE.insert(0, codes.road_edge)?;
        let base = OBSTACLE.insert(base, codes.obstacle)?;
        let base = LANE_LINE.insert(base, codes.lane_line)?;
        let base = STOP_LINE.insert(base, codes.stop_line)?;

        let road = CURB.insert(0, codes.curb)?;
        let road = FENCE_RAMP.insert(road, codes.fence_ramp)?;
        let road = REGION.insert(road, codes.region)?;
        let road = ARROW.insert(road, codes.arrow)?;

        let sig = LAMP.insert(0, codes.lamp)?;

        ExportFields::try_from(*codes)?;
        Ok(Self { base, road, sig })
    }

    /// Read raw codes back out; reserved sig bits must be zero
    pub fn unpack(&self) -> Result<FieldCodes, ExportError> {
        let reserved = SIG_RESERVED.extract(self.sig);
        if reserved != 0 {
            return Err(ExportError::ReservedBits { bits: reserved });
        }
        Ok(FieldCodes {
            road_edge: ROAD_EDGE.extract(self.base),
            obstacle: OBSTACLE.extract(self.base),
            lane_line: LANE_LINE.extract(self.base),
            stop_line: STOP_LINE.extract(self.base),
            curb: CURB.extract(self.road),
            fence_ramp: FENCE_RAMP.extract(self.road),
            region: REGION.extract(self.road),
            arrow: ARROW.extract(self.road),
            lamp: LAMP.extract(self.sig),
        })
    }

    /// Encode typed fields
    pub fn encode(fields: &ExportFields) -> Self {
        Self {
            base: fields.road_edge.byte()
                | fields.obstacle.byte()
                | fields.lane_line.byte()
                | fields.stop_line.byte(),
            road: fields.curb.byte()
                | fields.fence_ramp.byte()
                | fields.region.byte()
                | fields.arrow.byte(),
            sig: fields.lamp.byte(),
        }
    }

    /// Decode into typed fields, rejecting unassigned codes
    pub fn decode(&self) -> Result<ExportFields, ExportError> {
        ExportFields::try_from(self.unpack()?)
    }

    /// Wire order: base, road, sig
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.base, self.road, self.sig]
    }

    /// Inverse of [`to_bytes`](Self::to_bytes)
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            base: bytes[0],
            road: bytes[1],
            sig: bytes[2],
        }
    }
}
