//! Map extent and resolution section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Map extents and grid resolution.
///
/// The extent rectangle `x_min..x_max × y_min..y_max` is the default range
/// around the origin. Derived values are computed on demand, so they can
/// never go stale after a field is edited.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScaleSection {
    /// Right edge (m)
    #[serde(default = "defaults::x_max")]
    pub x_max: f64,

    /// Left edge (m)
    #[serde(default = "defaults::x_min")]
    pub x_min: f64,

    /// Top edge (m)
    #[serde(default = "defaults::y_max")]
    pub y_max: f64,

    /// Bottom edge (m)
    #[serde(default = "defaults::y_min")]
    pub y_min: f64,

    /// Cell edge length (m)
    #[serde(default = "defaults::grid_size")]
    pub grid_size: f64,

    /// Raster pixels per cell edge
    #[serde(default = "defaults::pixel_per_grid")]
    pub pixel_per_grid: u32,
}

impl Default for ScaleSection {
    fn default() -> Self {
        Self {
            x_max: defaults::x_max(),
            x_min: defaults::x_min(),
            y_max: defaults::y_max(),
            y_min: defaults::y_min(),
            grid_size: defaults::grid_size(),
            pixel_per_grid: defaults::pixel_per_grid(),
        }
    }
}

impl ScaleSection {
    /// Extent width in cells (fractional)
    #[inline]
    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min) / self.grid_size
    }

    /// Cells per metre along x
    #[inline]
    pub fn x_scale(&self) -> f64 {
        1.0 / self.grid_size
    }

    /// Cells per metre along y
    #[inline]
    pub fn y_scale(&self) -> f64 {
        1.0 / self.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_values() {
        let scale = ScaleSection::default();
        assert_relative_eq!(scale.width(), 125.0, epsilon = 1e-9);
        assert_relative_eq!(scale.x_scale(), 12.5, epsilon = 1e-9);
        assert_relative_eq!(scale.y_scale(), 12.5, epsilon = 1e-9);
    }

    #[test]
    fn test_derived_follow_edits() {
        let mut scale = ScaleSection::default();
        scale.grid_size = 0.1;
        assert_relative_eq!(scale.width(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(scale.x_scale(), 10.0, epsilon = 1e-9);
    }
}
