//! The grid and its axis indicators as one unit.

use infigrid_core::{GridConfig, GridPlane, ViewerOptions, WorldAxis};
use infigrid_render::{AxisIndicatorDrawable, GridDrawable};

/// Interactive edits to the grid, bound to keys in the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Shows or hides one axis line and its indicator.
    ToggleAxis(WorldAxis),
    HalveCellSize,
    DoubleCellSize,
    DecreaseMajorFactor,
    IncreaseMajorFactor,
    /// Steps opacity 1.0 -> 0.5 -> 0.0 -> 1.0.
    CycleOpacity,
    /// Steps the plane XZ -> XY -> ZY -> XZ.
    CyclePlane,
}

/// Next value in the opacity cycle.
#[must_use]
pub fn next_opacity(current: f32) -> f32 {
    let current = infigrid_core::sanitize_opacity(current);
    if current >= 1.0 {
        0.5
    } else if current > 0.0 {
        0.0
    } else {
        1.0
    }
}

/// Next plane in selector order.
#[must_use]
pub fn next_plane(current: GridPlane) -> GridPlane {
    match current {
        GridPlane::Xz => GridPlane::Xy,
        GridPlane::Xy => GridPlane::Zy,
        GridPlane::Zy => GridPlane::Xz,
    }
}

impl GridAction {
    /// Applies the edit to a grid configuration.
    pub fn apply(self, config: &mut GridConfig) {
        match self {
            GridAction::ToggleAxis(axis) => {
                let show = !config.show_axis(axis);
                config.set_show_axis(axis, show);
            }
            GridAction::HalveCellSize => config.set_cell_size(config.cell_size() * 0.5),
            GridAction::DoubleCellSize => config.set_cell_size(config.cell_size() * 2.0),
            GridAction::DecreaseMajorFactor => {
                config.set_major_grid_factor(config.major_grid_factor().saturating_sub(1).max(1));
            }
            GridAction::IncreaseMajorFactor => {
                config.set_major_grid_factor(config.major_grid_factor().saturating_add(1));
            }
            GridAction::CycleOpacity => config.set_opacity(next_opacity(config.opacity())),
            GridAction::CyclePlane => config.set_plane(next_plane(config.plane())),
        }
    }
}

/// A grid plus the indicators that mirror it.
pub struct GridScene {
    pub grid: GridDrawable,
    pub indicators: Vec<AxisIndicatorDrawable>,
}

impl GridScene {
    /// Builds the scene described by viewer options.
    #[must_use]
    pub fn from_options(options: &ViewerOptions) -> Self {
        let grid = GridDrawable::new(options.grid.clone());
        let indicators = options
            .indicator_axes
            .iter()
            .map(|&axis| AxisIndicatorDrawable::new(axis, options.indicator_length, grid.config()))
            .collect();
        Self { grid, indicators }
    }

    /// Pulls the latest grid values into every indicator that is out of date.
    pub fn sync_indicators(&mut self) {
        let config = self.grid.config();
        for indicator in &mut self.indicators {
            indicator.sync_if_changed(config);
        }
    }

    /// Applies an edit and re-syncs the indicators.
    pub fn apply(&mut self, action: GridAction) {
        action.apply(self.grid.config_mut());
        log::info!("{action:?}");
        self.sync_indicators();
    }
}
