//! Grid configuration.
//!
//! [`GridConfig`] is the public, freely mutable surface of the grid drawable.
//! Values are stored exactly as set; clamping to safe ranges happens when the
//! config is turned into [`CoverageParams`](crate::coverage::CoverageParams),
//! so an external panel can write anything without faulting the renderer.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plane::{GridPlane, WorldAxis};

/// Default half extent of the backing quad, in world units.
pub const DEFAULT_QUAD_HALF_EXTENT: f32 = 1000.0;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Returns a revision no other config in this process has held.
fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Grid drawable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    plane: GridPlane,
    cell_size: f32,
    major_grid_factor: u32,
    minor_line_width: f32,
    major_line_width: f32,
    axis_line_width: f32,
    minor_line_color: Vec3,
    major_line_color: Vec3,
    x_axis_color: Vec3,
    y_axis_color: Vec3,
    z_axis_color: Vec3,
    center_color: Vec3,
    show_x_axis: bool,
    show_y_axis: bool,
    show_z_axis: bool,
    opacity: f32,
    quad_half_extent: f32,
    #[serde(skip, default = "next_revision")]
    revision: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            plane: GridPlane::default(),
            cell_size: 1.0,
            major_grid_factor: 10,
            minor_line_width: 0.01,
            major_line_width: 0.02,
            axis_line_width: 0.04,
            minor_line_color: Vec3::new(0.36, 0.36, 0.36),
            major_line_color: Vec3::new(0.55, 0.55, 0.55),
            x_axis_color: Vec3::new(0.90, 0.22, 0.22),
            y_axis_color: Vec3::new(0.30, 0.78, 0.25),
            z_axis_color: Vec3::new(0.22, 0.45, 0.95),
            center_color: Vec3::new(1.0, 1.0, 1.0),
            show_x_axis: true,
            show_y_axis: true,
            show_z_axis: true,
            opacity: 1.0,
            quad_half_extent: DEFAULT_QUAD_HALF_EXTENT,
            revision: next_revision(),
        }
    }
}

impl GridConfig {
    /// Creates a config for the given plane with default styling.
    #[must_use]
    pub fn new(plane: GridPlane) -> Self {
        Self {
            plane,
            ..Self::default()
        }
    }

    /// Creates a config from a plane selector index (0 = XZ, 1 = XY, 2 = ZY).
    pub fn from_plane_index(index: u32) -> Result<Self> {
        Ok(Self::new(GridPlane::from_index(index)?))
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a config from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded grid config from {}", path.display());
        Ok(config)
    }

    /// Saves the config to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string()?)?;
        log::info!("saved grid config to {}", path.display());
        Ok(())
    }

    /// Generation stamp, replaced by every setter.
    ///
    /// Stamps are unique across all configs in the process, so a config that
    /// was constructed or deserialized and then swapped in never matches a
    /// stamp an owner synced earlier. Clones share the stamp of their source.
    /// Owners of derived state compare it against the value they last synced.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = next_revision();
    }

    /// Returns the grid plane.
    #[must_use]
    pub fn plane(&self) -> GridPlane {
        self.plane
    }

    /// Switches the grid plane at runtime.
    pub fn set_plane(&mut self, plane: GridPlane) {
        if plane != self.plane {
            log::info!("grid plane {} -> {}", self.plane.name(), plane.name());
        }
        self.plane = plane;
        self.touch();
    }

    /// Returns the minor cell size in world units.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Sets the minor cell size in world units.
    pub fn set_cell_size(&mut self, cell_size: f32) {
        if !(cell_size > 0.0) {
            log::warn!("cell size {cell_size} is not positive; drawing with the minimum size");
        }
        self.cell_size = cell_size;
        self.touch();
    }

    /// Returns the number of minor cells per major cell.
    #[must_use]
    pub fn major_grid_factor(&self) -> u32 {
        self.major_grid_factor
    }

    /// Sets the number of minor cells per major cell.
    pub fn set_major_grid_factor(&mut self, factor: u32) {
        if factor < 2 {
            log::warn!("major grid factor {factor} makes every line a major line");
        }
        self.major_grid_factor = factor;
        self.touch();
    }

    /// Returns the minor line width as a fraction of a cell.
    #[must_use]
    pub fn minor_line_width(&self) -> f32 {
        self.minor_line_width
    }

    /// Sets the minor line width as a fraction of a cell.
    pub fn set_minor_line_width(&mut self, width: f32) {
        self.minor_line_width = width;
        self.touch();
    }

    /// Returns the major line width as a fraction of a cell.
    #[must_use]
    pub fn major_line_width(&self) -> f32 {
        self.major_line_width
    }

    /// Sets the major line width as a fraction of a cell.
    pub fn set_major_line_width(&mut self, width: f32) {
        self.major_line_width = width;
        self.touch();
    }

    /// Returns the axis line width as a fraction of a cell.
    #[must_use]
    pub fn axis_line_width(&self) -> f32 {
        self.axis_line_width
    }

    /// Sets the axis line width as a fraction of a cell.
    pub fn set_axis_line_width(&mut self, width: f32) {
        self.axis_line_width = width;
        self.touch();
    }

    #[must_use]
    pub fn minor_line_color(&self) -> Vec3 {
        self.minor_line_color
    }

    pub fn set_minor_line_color(&mut self, color: Vec3) {
        self.minor_line_color = color;
        self.touch();
    }

    #[must_use]
    pub fn major_line_color(&self) -> Vec3 {
        self.major_line_color
    }

    pub fn set_major_line_color(&mut self, color: Vec3) {
        self.major_line_color = color;
        self.touch();
    }

    #[must_use]
    pub fn center_color(&self) -> Vec3 {
        self.center_color
    }

    pub fn set_center_color(&mut self, color: Vec3) {
        self.center_color = color;
        self.touch();
    }

    /// Returns the color of a world axis line.
    #[must_use]
    pub fn axis_color(&self, axis: WorldAxis) -> Vec3 {
        match axis {
            WorldAxis::X => self.x_axis_color,
            WorldAxis::Y => self.y_axis_color,
            WorldAxis::Z => self.z_axis_color,
        }
    }

    /// Sets the color of a world axis line.
    pub fn set_axis_color(&mut self, axis: WorldAxis, color: Vec3) {
        match axis {
            WorldAxis::X => self.x_axis_color = color,
            WorldAxis::Y => self.y_axis_color = color,
            WorldAxis::Z => self.z_axis_color = color,
        }
        self.touch();
    }

    /// Returns whether a world axis line is shown.
    #[must_use]
    pub fn show_axis(&self, axis: WorldAxis) -> bool {
        match axis {
            WorldAxis::X => self.show_x_axis,
            WorldAxis::Y => self.show_y_axis,
            WorldAxis::Z => self.show_z_axis,
        }
    }

    /// Shows or hides a world axis line.
    pub fn set_show_axis(&mut self, axis: WorldAxis, show: bool) {
        match axis {
            WorldAxis::X => self.show_x_axis = show,
            WorldAxis::Y => self.show_y_axis = show,
            WorldAxis::Z => self.show_z_axis = show,
        }
        self.touch();
    }

    /// Returns the global opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets the global opacity. Values outside [0, 1] are clamped at draw time.
    pub fn set_opacity(&mut self, opacity: f32) {
        if !(0.0..=1.0).contains(&opacity) {
            log::warn!("opacity {opacity} is outside [0, 1]; it will be clamped");
        }
        self.opacity = opacity;
        self.touch();
    }

    /// Returns the half extent of the backing quad in world units.
    #[must_use]
    pub fn quad_half_extent(&self) -> f32 {
        self.quad_half_extent
    }

    /// Re-scales the backing quad. The grid fades out before this radius.
    pub fn set_quad_half_extent(&mut self, half_extent: f32) {
        self.quad_half_extent = half_extent;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_config_default() {
        let config = GridConfig::default();
        assert_eq!(config.plane(), GridPlane::Xy);
        assert_eq!(config.cell_size(), 1.0);
        assert_eq!(config.major_grid_factor(), 10);
        assert_eq!(config.opacity(), 1.0);
        assert!(config.show_axis(WorldAxis::X));
        assert!(config.show_axis(WorldAxis::Y));
        assert!(config.show_axis(WorldAxis::Z));
    }

    #[test]
    fn test_fresh_configs_have_distinct_revisions() {
        let a = GridConfig::default();
        let b = GridConfig::default();
        let c = GridConfig::from_json_str("{}").unwrap();
        assert_ne!(a.revision(), b.revision());
        assert_ne!(a.revision(), c.revision());
        assert_ne!(b.revision(), c.revision());
        assert_eq!(a.clone().revision(), a.revision());
    }

    #[test]
    fn test_from_plane_index() {
        let config = GridConfig::from_plane_index(0).unwrap();
        assert_eq!(config.plane(), GridPlane::Xz);
        assert!(GridConfig::from_plane_index(7).is_err());
    }

    #[test]
    fn test_setters_bump_revision() {
        let mut config = GridConfig::default();
        let mut seen = vec![config.revision()];
        config.set_cell_size(2.0);
        seen.push(config.revision());
        config.set_show_axis(WorldAxis::Y, false);
        seen.push(config.revision());
        config.set_axis_color(WorldAxis::Z, Vec3::ONE);
        seen.push(config.revision());
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(config.cell_size(), 2.0);
        assert!(!config.show_axis(WorldAxis::Y));
        assert_eq!(config.axis_color(WorldAxis::Z), Vec3::ONE);
    }

    #[test]
    fn test_setters_store_raw_values() {
        let mut config = GridConfig::default();
        config.set_cell_size(-3.0);
        config.set_opacity(4.0);
        assert_eq!(config.cell_size(), -3.0);
        assert_eq!(config.opacity(), 4.0);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = GridConfig::from_json_str(r#"{ "plane": "XZ", "cell_size": 2.5 }"#).unwrap();
        assert_eq!(config.plane(), GridPlane::Xz);
        assert_eq!(config.cell_size(), 2.5);
        assert_eq!(config.major_grid_factor(), 10);
    }

    #[test]
    fn test_json_rejects_unknown_plane() {
        assert!(GridConfig::from_json_str(r#"{ "plane": "XW" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip_ignores_revision() {
        let mut config = GridConfig::new(GridPlane::Zy);
        config.set_major_grid_factor(4);
        let json = config.to_json_string().unwrap();
        assert!(!json.contains("revision"));

        let parsed = GridConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.plane(), GridPlane::Zy);
        assert_eq!(parsed.major_grid_factor(), 4);
        assert_ne!(parsed.revision(), config.revision());
    }

    #[test]
    fn test_save_and_load_json() {
        let path = std::env::temp_dir().join(format!("infigrid-config-{}.json", std::process::id()));
        let mut config = GridConfig::default();
        config.set_opacity(0.25);
        config.save_json(&path).unwrap();

        let loaded = GridConfig::load_json(&path).unwrap();
        assert_eq!(loaded.opacity(), 0.25);
        let _ = std::fs::remove_file(&path);
    }
}
