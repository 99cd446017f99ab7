//! Core data model for infigrid.
//!
//! This crate holds everything about the infinite grid that does not touch the
//! GPU:
//! - [`GridConfig`]: the mutable configuration surface of the grid drawable
//! - [`CoverageParams`]: clamped draw-time parameters and the CPU reference of
//!   the fragment coverage algorithm
//! - [`QuadPlacement`]: camera-following recentring of the backing quad
//! - [`BlendMode`] / [`DepthPolicy`]: opacity-driven blending and depth policy
//! - [`AxisIndicator`]: axis cylinder state pulled from the grid
//! - [`ViewerOptions`]: host viewer configuration

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_precision_loss)]

pub mod axis_indicator;
pub mod blend;
pub mod config;
pub mod coverage;
pub mod error;
pub mod options;
pub mod placement;
pub mod plane;

pub use axis_indicator::{
    AxisIndicator, AxisIndicatorState, AXIS_INDICATOR_MIN_RADIUS, DEFAULT_AXIS_INDICATOR_LENGTH,
};
pub use blend::{sanitize_opacity, BlendMode, DepthPolicy};
pub use config::{GridConfig, DEFAULT_QUAD_HALF_EXTENT};
pub use coverage::{Coverage, CoverageParams, FragmentShade, LineCategory};
pub use error::{GridError, Result};
pub use options::ViewerOptions;
pub use placement::QuadPlacement;
pub use plane::{GridPlane, WorldAxis};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
