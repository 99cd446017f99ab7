//! Axis indicator state kept in sync with the grid.
//!
//! An axis indicator is a thin cylinder drawn along a world axis, typically the
//! one perpendicular to the grid plane. It mirrors the grid's axis color, axis
//! line width and show flag. The grid never pushes to it: the owner calls
//! [`AxisIndicator::sync_from_grid`] (or [`AxisIndicator::sync_if_changed`])
//! after changing the grid.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::blend::{sanitize_opacity, BlendMode};
use crate::config::GridConfig;
use crate::plane::WorldAxis;

/// Smallest indicator radius; avoids a zero-radius cylinder.
pub const AXIS_INDICATOR_MIN_RADIUS: f32 = 1e-4;

/// Default total indicator length in world units.
pub const DEFAULT_AXIS_INDICATOR_LENGTH: f32 = 1000.0;

/// Visual state of one indicator, derived from a [`GridConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisIndicatorState {
    pub axis: WorldAxis,
    pub radius: f32,
    pub length: f32,
    pub color: Vec3,
    pub visible: bool,
    pub opacity: f32,
    pub blend_mode: BlendMode,
}

impl AxisIndicatorState {
    /// Derives the state for `axis` from the grid's current values.
    #[must_use]
    pub fn from_grid(axis: WorldAxis, length: f32, grid: &GridConfig) -> Self {
        let width = grid.axis_line_width() * grid.cell_size();
        let radius = if width.is_nan() {
            AXIS_INDICATOR_MIN_RADIUS
        } else {
            (width * 0.5).max(AXIS_INDICATOR_MIN_RADIUS)
        };
        let opacity = sanitize_opacity(grid.opacity());

        Self {
            axis,
            radius,
            length,
            color: grid.axis_color(axis),
            visible: grid.show_axis(axis),
            opacity,
            blend_mode: BlendMode::from_opacity(opacity),
        }
    }

    /// Model matrix for a unit cylinder (radius 1, height 1, centered on the
    /// origin, aligned with +Y) stretched along this indicator's axis.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = match self.axis {
            WorldAxis::X => Mat4::from_rotation_z(-FRAC_PI_2),
            WorldAxis::Y => Mat4::IDENTITY,
            WorldAxis::Z => Mat4::from_rotation_x(FRAC_PI_2),
        };
        rotation * Mat4::from_scale(Vec3::new(self.radius, self.length, self.radius))
    }
}

/// An indicator bound to one world axis.
#[derive(Debug, Clone)]
pub struct AxisIndicator {
    state: AxisIndicatorState,
    synced_revision: u64,
}

impl AxisIndicator {
    /// Creates an indicator and syncs it from the grid immediately.
    #[must_use]
    pub fn new(axis: WorldAxis, length: f32, grid: &GridConfig) -> Self {
        Self {
            state: AxisIndicatorState::from_grid(axis, length, grid),
            synced_revision: grid.revision(),
        }
    }

    #[must_use]
    pub fn axis(&self) -> WorldAxis {
        self.state.axis
    }

    #[must_use]
    pub fn state(&self) -> &AxisIndicatorState {
        &self.state
    }

    /// Re-reads every relevant grid field.
    pub fn sync_from_grid(&mut self, grid: &GridConfig) -> &AxisIndicatorState {
        self.state = AxisIndicatorState::from_grid(self.state.axis, self.state.length, grid);
        self.synced_revision = grid.revision();
        log::debug!(
            "synced {} axis indicator: radius {:.5}, visible {}",
            self.state.axis.name(),
            self.state.radius,
            self.state.visible
        );
        &self.state
    }

    /// Re-syncs only if the grid changed since the last sync. Returns whether it did.
    pub fn sync_if_changed(&mut self, grid: &GridConfig) -> bool {
        if grid.revision() == self.synced_revision {
            return false;
        }
        self.sync_from_grid(grid);
        true
    }
}
