//! Typed sub-fields of the three-byte export record.
//!
//! Each enum's discriminant is the raw (unshifted) field code; `byte()`
//! gives the value already shifted into its position.

use serde::{Deserialize, Serialize};

use crate::core::PointType;

use super::bitfield::{
    ARROW, BitField, CURB, FENCE_RAMP, LAMP, LANE_LINE, OBSTACLE, REGION, ROAD_EDGE, STOP_LINE,
};
use super::error::ExportError;

macro_rules! export_field {
    (
        $(#[$meta:meta])*
        $name:ident in $field:expr => {
            $($(#[$vmeta:meta])* $variant:ident = $code:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* #[doc = concat!("Field code ", stringify!($code))] $variant = $code),+
        }

        impl $name {
            /// Bit field this value occupies
            pub const FIELD: BitField = $field;

            /// Every variant, in code order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Raw field code
            #[inline]
            pub fn code(self) -> u8 {
                self as u8
            }

            /// Value shifted into its byte position
            #[inline]
            pub fn byte(self) -> u8 {
                Self::FIELD.place(self.code())
            }

            /// Decode a raw field code
            pub fn from_code(code: u8) -> Result<Self, ExportError> {
                if code > Self::FIELD.max_code() {
                    return Err(ExportError::FieldOutOfRange {
                        field: Self::FIELD.name,
                        value: code,
                        width: Self::FIELD.width,
                    });
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.code() == code)
                    .ok_or(ExportError::UnknownCode {
                        field: Self::FIELD.name,
                        code,
                    })
            }
        }
    };
}

export_field! {
    /// Drivability of the road edge layer
    RoadEdge in ROAD_EDGE => {
        #[default]
        Unknown = 0,
        Clear = 1,
        Occupied = 2,
        Dynamic = 3,
    }
}

export_field! {
    /// Obstacle class
    Obstacle in OBSTACLE => {
        #[default]
        None = 0,
        Static = 1,
        Pedestrian = 2,
        Bike = 3,
        Moto = 4,
        Car = 5,
        Bus = 6,
        Truck = 7,
    }
}

export_field! {
    /// Painted lane line style
    LaneLine in LANE_LINE => {
        #[default]
        None = 0,
        Dotted = 1,
        Solid = 2,
        Double = 3,
    }
}

export_field! {
    /// Stop line present
    StopLine in STOP_LINE => {
        #[default]
        No = 0,
        Yes = 1,
    }
}

export_field! {
    /// Curb present
    Curb in CURB => {
        #[default]
        No = 0,
        Yes = 1,
    }
}

export_field! {
    /// Fence or ramp kind
    FenceRamp in FENCE_RAMP => {
        #[default]
        No = 0,
        City = 1,
        Highway = 2,
        Ramp = 3,
    }
}

export_field! {
    /// Road region kind
    Region in REGION => {
        #[default]
        Structured = 0,
        Intersection = 1,
        UTurn = 2,
        Rim = 3,
    }
}

export_field! {
    /// Painted arrow. Code 7 is unassigned.
    Arrow in ARROW => {
        #[default]
        None = 0,
        Straight = 1,
        Left = 2,
        Right = 3,
        UTurn = 4,
        StraightLeft = 5,
        StraightRight = 6,
    }
}

export_field! {
    /// Traffic lamp kind
    Lamp in LAMP => {
        #[default]
        None = 0,
        Round = 1,
        Arrow = 2,
        Ground = 3,
    }
}

/// Raw codes for every field of one record, before placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldCodes {
    /// Road edge code
    pub road_edge: u8,
    /// Obstacle class code
    pub obstacle: u8,
    /// Lane line style code
    pub lane_line: u8,
    /// Stop line flag code
    pub stop_line: u8,
    /// Curb flag code
    pub curb: u8,
    /// Fence or ramp code
    pub fence_ramp: u8,
    /// Region kind code
    pub region: u8,
    /// Painted arrow code
    pub arrow: u8,
    /// Traffic lamp code
    pub lamp: u8,
}

/// Typed content of one record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportFields {
    /// Road edge
    pub road_edge: RoadEdge,
    /// Obstacle class
    pub obstacle: Obstacle,
    /// Lane line style
    pub lane_line: LaneLine,
    /// Stop line flag
    pub stop_line: StopLine,
    /// Curb flag
    pub curb: Curb,
    /// Fence or ramp
    pub fence_ramp: FenceRamp,
    /// Region kind
    pub region: Region,
    /// Painted arrow
    pub arrow: Arrow,
    /// Traffic lamp
    pub lamp: Lamp,
}

impl ExportFields {
    /// Fields implied by a resolved cell type.
    ///
    /// Physical obstacles occupy the road edge; markings leave it clear and
    /// set their own field. `Unknown` becomes clear road edge when
    /// `unknown_as_clear` is set.
    pub fn for_type(point_type: PointType, unknown_as_clear: bool) -> Self {
        let clear = Self {
            road_edge: RoadEdge::Clear,
            ..Self::default()
        };
        let static_obstacle = Self {
            road_edge: RoadEdge::Occupied,
            obstacle: Obstacle::Static,
            ..Self::default()
        };

        match point_type {
            PointType::Unknown if unknown_as_clear => clear,
            PointType::Unknown => Self::default(),
            PointType::Clear | PointType::LaneCenter | PointType::CarTrack | PointType::Zebra => {
                clear
            }
            PointType::Occupied
            | PointType::Trunk
            | PointType::Tree
            | PointType::Pit
            | PointType::TrafficSign => static_obstacle,
            PointType::Curb => Self {
                road_edge: RoadEdge::Occupied,
                curb: Curb::Yes,
                ..Self::default()
            },
            PointType::SolidLaneLine | PointType::LaneLine => Self {
                lane_line: LaneLine::Solid,
                ..clear
            },
            PointType::DottedLaneLine => Self {
                lane_line: LaneLine::Dotted,
                ..clear
            },
            PointType::Intersection => Self {
                region: Region::Intersection,
                ..clear
            },
        }
    }

    /// Raw codes of every field
    pub fn codes(&self) -> FieldCodes {
        FieldCodes {
            road_edge: self.road_edge.code(),
            obstacle: self.obstacle.code(),
            lane_line: self.lane_line.code(),
            stop_line: self.stop_line.code(),
            curb: self.curb.code(),
            fence_ramp: self.fence_ramp.code(),
            region: self.region.code(),
            arrow: self.arrow.code(),
            lamp: self.lamp.code(),
        }
    }
}

impl TryFrom<FieldCodes> for ExportFields {
    type Error = ExportError;

    fn try_from(codes: FieldCodes) -> Result<Self, Self::Error> {
        Ok(Self {
            road_edge: RoadEdge::from_code(codes.road_edge)?,
            obstacle: Obstacle::from_code(codes.obstacle)?,
            lane_line: LaneLine::from_code(codes.lane_line)?,
            stop_line: StopLine::from_code(codes.stop_line)?,
            curb: Curb::from_code(codes.curb)?,
            fence_ramp: FenceRamp::from_code(codes.fence_ramp)?,
            region: Region::from_code(codes.region)?,
            arrow: Arrow::from_code(codes.arrow)?,
            lamp: Lamp::from_code(codes.lamp)?,
        })
    }
}
