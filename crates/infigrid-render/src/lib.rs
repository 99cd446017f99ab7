//! Rendering backend for infigrid.
//!
//! This crate provides the wgpu side of the grid:
//! - [`RenderEngine`]: device, surface or offscreen target, depth buffer and pipelines
//! - [`GridDrawable`]: the camera-following grid quad and its uniforms
//! - [`AxisIndicatorDrawable`]: axis cylinders kept in sync with the grid
//! - [`Camera`]: turntable camera
//! - [`save_image`]: PNG/JPEG export of read-back frames

pub mod axis_indicator_render;
pub mod camera;
pub mod engine;
pub mod error;
pub mod grid_drawable;
pub mod grid_render;
pub mod screenshot;

pub use axis_indicator_render::{
    AxisIndicatorDrawable, AxisIndicatorPipelines, AxisIndicatorRenderData, AxisIndicatorUniforms,
};
pub use camera::Camera;
pub use engine::{CameraUniforms, RenderEngine, DEPTH_FORMAT, OFFSCREEN_FORMAT};
pub use error::{RenderError, RenderResult};
pub use grid_drawable::GridDrawable;
pub use grid_render::{
    create_grid_bind_group_layout, create_grid_pipeline, GridPipelines, GridRenderData,
    GridUniforms,
};
pub use screenshot::save_image;
