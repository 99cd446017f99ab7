//! infigrid: a camera-following procedural infinite grid.
//!
//! The grid is one quad that tracks the camera; minor lines, major lines,
//! world axis lines and an origin marker are all computed per fragment and
//! faded out with distance. Axis indicator cylinders mirror the grid's axis
//! styling.
//!
//! # Quick start
//!
//! ```no_run
//! use infigrid::*;
//!
//! let mut options = ViewerOptions::default();
//! options.grid.set_plane(GridPlane::Xz);
//! options.up_axis = WorldAxis::Y;
//! infigrid::show(options).unwrap();
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod app;
mod headless;
pub mod scene;

pub use infigrid_core::{
    AxisIndicator, AxisIndicatorState, BlendMode, CoverageParams, DepthPolicy, GridConfig,
    GridError, GridPlane, LineCategory, QuadPlacement, Result, ViewerOptions, WorldAxis,
};
pub use infigrid_core::{Mat4, Vec2, Vec3, Vec4};
pub use infigrid_render::{
    save_image, AxisIndicatorDrawable, Camera, GridDrawable, RenderEngine, RenderError,
};

pub use headless::{render_to_file, render_to_image};
pub use scene::{GridAction, GridScene};

/// Opens the viewer window and blocks until it is closed.
///
/// Keys: `X`/`Y`/`Z` toggle axis lines, `[`/`]` halve/double the cell size,
/// `-`/`=` change the major factor, `O` cycles opacity, `P` cycles the
/// plane, `Escape` quits.
pub fn show(options: ViewerOptions) -> Result<()> {
    let _ = env_logger::try_init();
    options.validate()?;
    log::info!("showing {} grid", options.grid.plane().name());
    app::run_app(options)
}
