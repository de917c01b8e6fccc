//! Type-priority table used when two typed cells are merged.

use super::point_type::PointType;

/// Invalid priority table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriorityError {
    /// A type appears more than once
    #[error("point type {0:?} listed more than once in priority table")]
    Duplicate(PointType),

    /// `Unknown` never wins a merge and cannot be ranked
    #[error("unknown cannot be ranked in the priority table")]
    UnknownRanked,
}

/// Total order over point types for merge conflicts.
///
/// Resolution rules:
/// 1. `Unknown` always yields to the other operand
/// 2. Listed types beat unlisted types
/// 3. Among listed types the earlier entry wins
/// 4. Ties (equal or both unlisted) keep the existing type
///
/// The default order puts physical obstacles above road markings so that a
/// lane-line label never hides a curb or an occupied cell. Curb sits above
/// Occupied: a curb is tall enough to read as occupied, and its export
/// already carries an occupied road edge plus the curb bit.
///
/// ```text
/// Curb > Occupied > Pit > Trunk > Tree > TrafficSign > Zebra >
/// SolidLaneLine > DottedLaneLine > LaneLine > LaneCenter >
/// Intersection > CarTrack > Clear
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypePriority {
    /// Rank per `PointType::index()`; lower wins, `UNRANKED` if not listed
    ranks: [u8; PointType::COUNT],
}

impl TypePriority {
    const UNRANKED: u8 = u8::MAX;

    /// Default order, highest priority first
    pub const DEFAULT_ORDER: [PointType; 14] = [
        PointType::Curb,
        PointType::Occupied,
        PointType::Pit,
        PointType::Trunk,
        PointType::Tree,
        PointType::TrafficSign,
        PointType::Zebra,
        PointType::SolidLaneLine,
        PointType::DottedLaneLine,
        PointType::LaneLine,
        PointType::LaneCenter,
        PointType::Intersection,
        PointType::CarTrack,
        PointType::Clear,
    ];

    /// Build a table from an order, highest priority first.
    pub fn from_order(order: &[PointType]) -> Result<Self, PriorityError> {
        let mut ranks = [Self::UNRANKED; PointType::COUNT];
        for (rank, &point_type) in order.iter().enumerate() {
            if point_type == PointType::Unknown {
                return Err(PriorityError::UnknownRanked);
            }
            let slot = &mut ranks[point_type.index()];
            if *slot != Self::UNRANKED {
                return Err(PriorityError::Duplicate(point_type));
            }
            // At most COUNT - 1 entries survive the checks above
            *slot = rank as u8;
        }
        Ok(Self { ranks })
    }

    /// Rank of a type (0 = highest), `None` if unlisted
    #[inline]
    pub fn rank(&self, point_type: PointType) -> Option<u8> {
        let rank = self.ranks[point_type.index()];
        (rank != Self::UNRANKED).then_some(rank)
    }

    /// Pick the surviving type when `incoming` is merged into `existing`.
    pub fn resolve(&self, existing: PointType, incoming: PointType) -> PointType {
        if existing == PointType::Unknown {
            return incoming;
        }
        if incoming == PointType::Unknown || incoming == existing {
            return existing;
        }
        let existing_rank = self.ranks[existing.index()];
        let incoming_rank = self.ranks[incoming.index()];
        if incoming_rank < existing_rank {
            incoming
        } else {
            existing
        }
    }

    /// Listed types, highest priority first
    pub fn order(&self) -> Vec<PointType> {
        let mut listed: Vec<(u8, PointType)> = PointType::ALL
            .into_iter()
            .filter_map(|t| self.rank(t).map(|r| (r, t)))
            .collect();
        listed.sort_unstable();
        listed.into_iter().map(|(_, t)| t).collect()
    }
}

impl Default for TypePriority {
    fn default() -> Self {
        let mut ranks = [Self::UNRANKED; PointType::COUNT];
        for (rank, point_type) in Self::DEFAULT_ORDER.iter().enumerate() {
            ranks[point_type.index()] = rank as u8;
        }
        Self { ranks }
    }
}
