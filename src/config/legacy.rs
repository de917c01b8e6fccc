//! Loader for the line-oriented `Key value` parameter file.
//!
//! ```text
//! # comment lines start with '#'
//! GridSize 0.08
//! xMin -5
//! SaveNeeded 2 3
//! ```
//!
//! Values start from [`MargaConfig::default`] and are overridden line by
//! line. Any unknown key or unparsable value aborts the load, and the
//! result is validated like a YAML config.

use crate::core::MapKind;

use super::error::ConfigError;
use super::marga::MargaConfig;

/// One line being applied, for error reporting.
struct Entry<'a> {
    key: &'a str,
    line: usize,
    values: Vec<&'a str>,
}

impl<'a> Entry<'a> {
    fn invalid(&self, value: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.key.to_string(),
            line: self.line,
            value: value.to_string(),
        }
    }

    fn raw(&self) -> Result<&'a str, ConfigError> {
        self.values.first().copied().ok_or_else(|| self.invalid(""))
    }

    fn float(&self) -> Result<f64, ConfigError> {
        let raw = self.raw()?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(raw))
    }

    fn int<T: TryFrom<i64>>(&self) -> Result<T, ConfigError> {
        let raw = self.raw()?;
        let value = self.float()?;
        if value.fract() != 0.0 {
            return Err(self.invalid(raw));
        }
        T::try_from(value as i64).map_err(|_| self.invalid(raw))
    }
}

impl MargaConfig {
    /// Parse a legacy parameter file body.
    pub fn from_param_str(text: &str) -> Result<Self, ConfigError> {
        let mut config = MargaConfig::default();

        for (index, line) in text.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else {
                continue;
            };
            if key.starts_with('#') {
                continue;
            }
            let entry = Entry {
                key,
                line: index + 1,
                values: tokens.collect(),
            };
            config.apply_param(&entry)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a legacy parameter file from disk.
    pub fn load_param_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_param_str(&contents)?;
        log::info!("Loaded parameter file {}", path.display());
        Ok(config)
    }

    fn apply_param(&mut self, entry: &Entry<'_>) -> Result<(), ConfigError> {
        match entry.key {
            "CorrectionFile" => self.ugv.correction_file = entry.raw()?.to_string(),

            "EulrChangeThreshold" => self.divide_car_track.eulr_change_threshold = entry.float()?,
            "DetectPoints" => self.divide_car_track.detect_points = entry.int()?,
            "DetectDistance" => self.divide_car_track.detect_distance = entry.float()?,
            "ValidSegmentPointsNum" => {
                self.divide_car_track.valid_segment_points_num = entry.int()?
            }

            "SimilarEulrThreshold" => self.line_parallel.similar_eulr_threshold = entry.float()?,

            "LateralDistanceThreshold" => self.same_seg.lateral_distance_threshold = entry.float()?,
            "SameDirectionThreshold" => self.same_seg.same_direction_threshold = entry.float()?,

            "xMax" => self.scale.x_max = entry.float()?,
            "xMin" => self.scale.x_min = entry.float()?,
            "yMax" => self.scale.y_max = entry.float()?,
            "yMin" => self.scale.y_min = entry.float()?,
            "GridSize" => self.scale.grid_size = entry.float()?,
            "PixelPerGrid" => self.scale.pixel_per_grid = entry.int()?,

            "LeftDetectAngleBoundary" => self.prob_map.left_detect_angle_boundary = entry.int()?,
            "RightDetectAngleBoundary" => self.prob_map.right_detect_angle_boundary = entry.int()?,
            "unitHeight" => self.prob_map.unit_height = entry.int()?,
            "HeightThreshold" => self.prob_map.height_threshold = entry.int()?,
            "OccupiedThreshold" => self.prob_map.occupied_threshold = entry.float()? as f32,
            "ClearThreshold" => self.prob_map.clear_threshold = entry.float()? as f32,
            "incrementUnit" => self.prob_map.increment_unit = entry.float()? as f32,
            "MaxGroundHeight" => self.prob_map.max_ground_height = entry.int()?,
            "MaxAvgMidDiff" => self.prob_map.max_avg_mid_diff = entry.float()? as f32,
            "MinHitCount" => self.prob_map.min_hit_count = entry.int()?,

            "SaveNeeded" => {
                if entry.values.is_empty() {
                    return Err(entry.invalid(""));
                }
                for raw in &entry.values {
                    let kind = raw
                        .parse::<u8>()
                        .ok()
                        .and_then(|code| MapKind::try_from(code).ok())
                        .ok_or_else(|| entry.invalid(raw))?;
                    self.local_map.save_needed.insert(kind);
                }
            }
            "SaveInterval" => self.local_map.save_interval = entry.int()?,

            _ => {
                return Err(ConfigError::UnknownParameter {
                    key: entry.key.to_string(),
                    line: entry.line,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_and_comments() {
        let text = "\
# scale
xMax 8
xMin -8

GridSize 0.1
incrementUnit 0.1
SaveNeeded 2 3
SaveInterval 10
";
        let config = MargaConfig::from_param_str(text).unwrap();
        assert_eq!(config.scale.x_max, 8.0);
        assert_eq!(config.scale.x_min, -8.0);
        assert_eq!(config.scale.grid_size, 0.1);
        assert!((config.prob_map.increment_unit - 0.1).abs() < 1e-6);
        assert!(config.local_map.save_needed.contains(&MapKind::Local));
        assert!(config.local_map.save_needed.contains(&MapKind::ThreeByte));
        assert_eq!(config.local_map.save_needed.len(), 2);
        assert_eq!(config.local_map.save_interval, 10);
        // Untouched values keep defaults
        assert_eq!(config.scale.y_max, 10.0);
        assert_eq!(config.prob_map.max_ground_height, -1600);
    }

    #[test]
    fn test_unknown_key() {
        let err = MargaConfig::from_param_str("GridSize 0.1\nFoo 3\n").unwrap_err();
        match err {
            ConfigError::UnknownParameter { key, line } => {
                assert_eq!(key, "Foo");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            MargaConfig::from_param_str("GridSize abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            MargaConfig::from_param_str("DetectPoints 2.5"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            MargaConfig::from_param_str("PixelPerGrid -1"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            MargaConfig::from_param_str("SaveNeeded 7"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            MargaConfig::from_param_str("xMax"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
