//! Main MargaConfig, derived values and validation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::TypePriority;

use super::error::ConfigError;
use super::local_map::{ExportSection, FusionSection, LocalMapSection, PersistenceSection};
use super::prob_map::ProbMapSection;
use super::scale::ScaleSection;
use super::segmentation::{
    DivideCarTrackSection, LineParallelSection, SameSegSection, UgvSection,
};

/// Local window side length as a multiple of the default extent width
const LOCAL_WINDOW_FACTOR: f64 = 3.0;

/// Full MargaMap parameter store.
///
/// Built once at startup, validated, then shared read-only by reference
/// with every coordinate range and grid.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct MargaConfig {
    /// Vehicle settings
    #[serde(default)]
    pub ugv: UgvSection,

    /// Track splitting knobs
    #[serde(default)]
    pub divide_car_track: DivideCarTrackSection,

    /// Line parallelism knobs
    #[serde(default)]
    pub line_parallel: LineParallelSection,

    /// Segment clustering knobs
    #[serde(default)]
    pub same_seg: SameSegSection,

    /// Extents and resolution
    #[serde(default)]
    pub scale: ScaleSection,

    /// Occupancy thresholds
    #[serde(default)]
    pub prob_map: ProbMapSection,

    /// Local window persistence
    #[serde(default)]
    pub local_map: LocalMapSection,

    /// Merge priority table
    #[serde(default)]
    pub fusion: FusionSection,

    /// Export encoding
    #[serde(default)]
    pub export: ExportSection,

    /// Output location
    #[serde(default)]
    pub persistence: PersistenceSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from the default config path (configs/config.yaml), falling back
    /// to built-in defaults when it does not exist
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No configs/config.yaml, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse from a YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = &self.scale;
        if !(scale.grid_size.is_finite() && scale.grid_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                scale.grid_size
            )));
        }
        if !(scale.x_max > scale.x_min) || !(scale.y_max > scale.y_min) {
            return Err(ConfigError::Invalid(format!(
                "empty extent: x {}..{}, y {}..{}",
                scale.x_min, scale.x_max, scale.y_min, scale.y_max
            )));
        }
        if scale.pixel_per_grid == 0 {
            return Err(ConfigError::Invalid("pixel_per_grid must be at least 1".into()));
        }

        let prob = &self.prob_map;
        if !(0.0..=1.0).contains(&prob.clear_threshold)
            || !(0.0..=1.0).contains(&prob.occupied_threshold)
            || prob.clear_threshold >= prob.occupied_threshold
        {
            return Err(ConfigError::Invalid(format!(
                "thresholds must satisfy 0 <= clear < occupied <= 1, got {} and {}",
                prob.clear_threshold, prob.occupied_threshold
            )));
        }
        if !(prob.increment_unit > 0.0 && prob.increment_unit <= 0.5) {
            return Err(ConfigError::Invalid(format!(
                "increment_unit must be in (0, 0.5], got {}",
                prob.increment_unit
            )));
        }
        if prob.height_threshold <= 0 || prob.unit_height <= 0 {
            return Err(ConfigError::Invalid(
                "height_threshold and unit_height must be positive".into(),
            ));
        }
        if !(prob.max_avg_mid_diff >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_avg_mid_diff must be non-negative, got {}",
                prob.max_avg_mid_diff
            )));
        }

        TypePriority::from_order(&self.fusion.priority)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Merge priority table built from `fusion.priority`.
    ///
    /// Falls back to the default order if the configured list is invalid;
    /// [`validate`](Self::validate) reports that case.
    pub fn type_priority(&self) -> TypePriority {
        TypePriority::from_order(&self.fusion.priority).unwrap_or_else(|e| {
            log::warn!("Invalid priority table ({e}), using default order");
            TypePriority::default()
        })
    }

    /// Initial local window width in cells
    pub fn local_map_initial_width(&self) -> f64 {
        LOCAL_WINDOW_FACTOR * self.scale.width()
    }

    /// Initial local window height in cells
    pub fn local_map_initial_height(&self) -> f64 {
        LOCAL_WINDOW_FACTOR * self.scale.width()
    }

    /// Local window side length in metres
    pub fn expand_unit(&self) -> f64 {
        LOCAL_WINDOW_FACTOR * (self.scale.x_max - self.scale.x_min)
    }
}
