//! Solar disk metadata sidecar.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{LevelsError, Result};

/// Largest accepted magnitude for a disk center coordinate or radius, in pixels.
pub const MAX_DISK_EXTENT: f32 = 1.0e6;

/// Position of the solar disk within a map raster, in pixels.
///
/// Loaded from a TOML sidecar:
///
/// ```toml
/// center_x = 512.0
/// center_y = 512.0
/// radius = 480.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SolarMapMeta {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

impl SolarMapMeta {
    /// Validate the disk: finite values within [`MAX_DISK_EXTENT`] and a
    /// positive radius.
    ///
    /// # Errors
    /// `InvalidParameter` naming the offending value.
    pub fn new(center_x: f32, center_y: f32, radius: f32) -> Result<Self> {
        let meta = Self {
            center_x,
            center_y,
            radius,
        };
        meta.validate().map_err(LevelsError::InvalidParameter)?;
        Ok(meta)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if !(self.center_x.is_finite() && self.center_y.is_finite() && self.radius.is_finite()) {
            return Err("disk center and radius must be finite".to_string());
        }
        if self.radius <= 0.0 {
            return Err(format!("disk radius must be positive, got {}", self.radius));
        }
        if self.radius > MAX_DISK_EXTENT
            || self.center_x.abs() > MAX_DISK_EXTENT
            || self.center_y.abs() > MAX_DISK_EXTENT
        {
            return Err(format!("disk center and radius must be within {} px", MAX_DISK_EXTENT));
        }
        Ok(())
    }

    /// Load and validate a sidecar file.
    ///
    /// # Errors
    /// - `Io` if the file can't be read
    /// - `MetaParse` if it isn't valid TOML with the three fields
    /// - `UnsupportedSource` if the values are unusable
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let meta: Self = toml::from_str(&contents).map_err(|source| LevelsError::MetaParse {
            path: path.to_path_buf(),
            source,
        })?;
        meta.validate().map_err(|reason| LevelsError::unsupported(path, reason))?;
        Ok(meta)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x, self.center_y)
    }
}
