//! Parameter store for MargaMap.
//!
//! All tunable thresholds live in one [`MargaConfig`], grouped by subsystem.
//! It is built once (defaults, YAML, or the legacy `Key value` parameter
//! file), validated, and then shared read-only with every coordinate range
//! and grid.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga_map::config::MargaConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = MargaConfig::load_default()?;
//!
//! // Or the legacy parameter file
//! let config = MargaConfig::load_param_file(Path::new("ugv.param"))?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`UgvSection`] | Vehicle calibration |
//! | [`DivideCarTrackSection`], [`LineParallelSection`], [`SameSegSection`] | Track segmentation knobs |
//! | [`ScaleSection`] | Map extents and resolution |
//! | [`ProbMapSection`] | Occupancy accumulation thresholds |
//! | [`LocalMapSection`] | Which maps to save and how often |
//! | [`FusionSection`] | Type merge priority |
//! | [`ExportSection`] | Three-byte export policy |
//! | [`PersistenceSection`] | Output directory |
//!
//! ## Example YAML
//!
//! ```yaml
//! scale:
//!   grid_size: 0.08      # 8cm cells
//!   x_min: -5.0
//!   x_max: 5.0
//!
//! prob_map:
//!   increment_unit: 0.05
//!   occupied_threshold: 0.7
//!   clear_threshold: 0.3
//!
//! local_map:
//!   save_needed: [local, three_byte]
//!   save_interval: 10
//! ```

mod defaults;
mod error;
mod legacy;
mod local_map;
mod marga;
mod prob_map;
mod scale;
mod segmentation;

pub use error::ConfigError;
pub use marga::MargaConfig;

pub use local_map::{ExportSection, FusionSection, LocalMapSection, PersistenceSection};
pub use prob_map::ProbMapSection;
pub use scale::ScaleSection;
pub use segmentation::{DivideCarTrackSection, LineParallelSection, SameSegSection, UgvSection};
