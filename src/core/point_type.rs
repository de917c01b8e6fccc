//! Semantic taxonomy shared by points and cells.
//!
//! The numeric codes are part of the persisted map format: they are written
//! into raster output as gray levels and must never be renumbered.

use serde::{Deserialize, Serialize};

/// Error decoding a persisted taxonomy code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    /// The byte is not a known point type code
    #[error("unknown point type code: {0}")]
    UnknownPointType(u8),

    /// The byte is not a known map kind code
    #[error("unknown map kind code: {0}")]
    UnknownMapKind(u8),
}

/// Semantic classification of a point or grid cell.
///
/// Occupancy layer:
/// - `Unknown` - not enough evidence yet
/// - `Clear` - the vehicle may pass through
/// - `Occupied` - physically obstructed
///
/// Every other variant is a semantic label supplied by a classifier and is
/// never overwritten by the occupancy layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PointType {
    /// Physically obstructed
    Occupied = 0,
    /// Intersection area
    Intersection = 3,
    /// Road curb
    Curb = 4,
    /// Tree trunk
    Trunk = 6,
    /// Lane center line
    LaneCenter = 8,
    /// No specific type yet
    #[default]
    Unknown = 127,
    /// Previously driven vehicle track
    CarTrack = 128,
    /// Tree canopy
    Tree = 210,
    /// Clear, traversable
    Clear = 249,
    /// Solid lane line
    SolidLaneLine = 250,
    /// Dotted lane line
    DottedLaneLine = 251,
    /// Pit or pothole
    Pit = 252,
    /// Zebra crossing
    Zebra = 253,
    /// Lane line of unspecified style
    LaneLine = 254,
    /// Traffic sign
    TrafficSign = 255,
}

/// Cell-level classification.
///
/// Cells currently use the point taxonomy unchanged; the alias keeps call
/// sites distinct should the two ever diverge.
pub type CellType = PointType;

impl PointType {
    /// Number of variants
    pub const COUNT: usize = 15;

    /// All variants in code order
    pub const ALL: [PointType; Self::COUNT] = [
        PointType::Occupied,
        PointType::Intersection,
        PointType::Curb,
        PointType::Trunk,
        PointType::LaneCenter,
        PointType::Unknown,
        PointType::CarTrack,
        PointType::Tree,
        PointType::Clear,
        PointType::SolidLaneLine,
        PointType::DottedLaneLine,
        PointType::Pit,
        PointType::Zebra,
        PointType::LaneLine,
        PointType::TrafficSign,
    ];

    /// Persisted code
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Dense index in [0, COUNT), following `ALL`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PointType::Occupied => 0,
            PointType::Intersection => 1,
            PointType::Curb => 2,
            PointType::Trunk => 3,
            PointType::LaneCenter => 4,
            PointType::Unknown => 5,
            PointType::CarTrack => 6,
            PointType::Tree => 7,
            PointType::Clear => 8,
            PointType::SolidLaneLine => 9,
            PointType::DottedLaneLine => 10,
            PointType::Pit => 11,
            PointType::Zebra => 12,
            PointType::LaneLine => 13,
            PointType::TrafficSign => 14,
        }
    }

    /// Has this been observed at all?
    #[inline]
    pub fn is_known(self) -> bool {
        self != PointType::Unknown
    }

    /// Is this one of the occupancy-layer values (Unknown, Clear, Occupied)?
    #[inline]
    pub fn is_occupancy(self) -> bool {
        matches!(
            self,
            PointType::Unknown | PointType::Clear | PointType::Occupied
        )
    }

    /// Is this a lane marking of any style?
    #[inline]
    pub fn is_lane_line(self) -> bool {
        matches!(
            self,
            PointType::LaneLine | PointType::SolidLaneLine | PointType::DottedLaneLine
        )
    }

    /// Does this type block the vehicle?
    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(
            self,
            PointType::Occupied
                | PointType::Curb
                | PointType::Pit
                | PointType::Tree
                | PointType::Trunk
                | PointType::TrafficSign
        )
    }
}

impl TryFrom<u8> for PointType {
    type Error = TaxonomyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        PointType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(TaxonomyError::UnknownPointType(code))
    }
}

/// Stage of the pipeline a map belongs to.
///
/// Purely descriptive: it selects persistence and rendering policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MapKind {
    /// Points of a single frame
    Dynamic = 0,
    /// Probabilities accumulated over many frames
    Accumulated = 1,
    /// The bounded window following the vehicle
    Local = 2,
    /// Compact three-byte export form
    ThreeByte = 3,
}

impl MapKind {
    /// All kinds in code order
    pub const ALL: [MapKind; 4] = [
        MapKind::Dynamic,
        MapKind::Accumulated,
        MapKind::Local,
        MapKind::ThreeByte,
    ];

    /// Persisted code
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Short name used in file names
    pub fn file_stem(self) -> &'static str {
        match self {
            MapKind::Dynamic => "dynamic",
            MapKind::Accumulated => "accum",
            MapKind::Local => "local",
            MapKind::ThreeByte => "3b",
        }
    }
}

impl TryFrom<u8> for MapKind {
    type Error = TaxonomyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MapKind::Dynamic),
            1 => Ok(MapKind::Accumulated),
            2 => Ok(MapKind::Local),
            3 => Ok(MapKind::ThreeByte),
            _ => Err(TaxonomyError::UnknownMapKind(code)),
        }
    }
}
