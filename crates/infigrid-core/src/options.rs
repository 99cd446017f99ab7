//! Viewer configuration.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::axis_indicator::DEFAULT_AXIS_INDICATOR_LENGTH;
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::plane::WorldAxis;

/// Host viewer options: window, camera and scene setup around the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub window_width: u32,
    /// Initial window height in logical pixels.
    pub window_height: u32,
    /// Clear color.
    pub background_color: Vec3,
    /// World up axis used by orbit navigation.
    pub up_axis: WorldAxis,
    /// Initial camera position.
    pub camera_position: Vec3,
    /// Initial orbit target.
    pub camera_target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Axes that get a cylinder indicator.
    pub indicator_axes: Vec<WorldAxis>,
    /// Total indicator length.
    pub indicator_length: f32,
    /// The grid itself.
    pub grid: GridConfig,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "infigrid".to_string(),
            window_width: 1280,
            window_height: 720,
            background_color: Vec3::splat(0.2),
            up_axis: WorldAxis::Z,
            camera_position: Vec3::new(10.0, 10.0, 10.0),
            camera_target: Vec3::ZERO,
            fov_degrees: 40.0,
            near: 0.01,
            far: 4000.0,
            indicator_axes: vec![WorldAxis::Z],
            indicator_length: DEFAULT_AXIS_INDICATOR_LENGTH,
            grid: GridConfig::default(),
        }
    }
}

impl ViewerOptions {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the viewer-level values.
    ///
    /// The embedded grid config is not checked; the grid clamps its own
    /// values at draw time.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(GridError::InvalidConfig(msg)) };
        if self.window_width == 0 || self.window_height == 0 {
            return invalid(format!(
                "window size {}x{} must be non-zero",
                self.window_width, self.window_height
            ));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid(format!("field of view {} must be in (0, 180)", self.fov_degrees));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return invalid(format!(
                "clip range {}..{} must satisfy 0 < near < far",
                self.near, self.far
            ));
        }
        let view = self.camera_target - self.camera_position;
        if !view.is_finite() || view.length_squared() <= f32::EPSILON {
            return invalid(format!(
                "camera position {} and target {} must differ",
                self.camera_position, self.camera_target
            ));
        }
        if view.normalize().cross(self.up_axis.unit()).length() <= 1e-4 {
            return invalid(format!(
                "view direction {view} is parallel to the {} up axis",
                self.up_axis.name()
            ));
        }
        if !(self.indicator_length.is_finite() && self.indicator_length > 0.0) {
            return invalid(format!(
                "indicator length {} must be positive",
                self.indicator_length
            ));
        }
        Ok(())
    }

    /// Loads options from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        log::info!("loaded viewer options from {}", path.display());
        Ok(options)
    }
}
