//! Local map, fusion and export sections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{MapKind, PointType};

use super::defaults;

/// Local window persistence settings
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LocalMapSection {
    /// Map kinds written to disk
    #[serde(default)]
    pub save_needed: BTreeSet<MapKind>,

    /// Frames between saves (0 disables periodic saving)
    #[serde(default)]
    pub save_interval: u32,
}

/// Cell fusion settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FusionSection {
    /// Merge priority, highest first. Unlisted types lose to listed ones.
    #[serde(default = "defaults::priority")]
    pub priority: Vec<PointType>,
}

impl Default for FusionSection {
    fn default() -> Self {
        Self {
            priority: defaults::priority(),
        }
    }
}

/// Export encoding settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExportSection {
    /// Export unresolved cells as clear road edge instead of unknown
    #[serde(default = "defaults::enabled")]
    pub unknown_as_clear: bool,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            unknown_as_clear: defaults::enabled(),
        }
    }
}

/// Output location
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PersistenceSection {
    /// Directory receiving saved maps
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
        }
    }
}
