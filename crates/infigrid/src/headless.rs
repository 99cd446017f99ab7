//! Headless rendering of the grid scene.
//!
//! Renders one frame without opening a window. Useful for integration tests
//! and reference images.

use std::path::Path;

use pollster::FutureExt;

use infigrid_core::{GridError, Result, ViewerOptions};
use infigrid_render::{Camera, RenderEngine};

use crate::scene::GridScene;

/// Rejects an empty output image.
fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidConfig(format!(
            "image size {width}x{height} must be non-zero"
        )));
    }
    Ok(())
}

/// Renders the scene described by `options` to tightly packed RGBA8 pixels.
///
/// The returned buffer has `width * height * 4` bytes, row by row from the
/// top-left corner. Zero dimensions and invalid options fail with
/// [`GridError::InvalidConfig`].
#[allow(clippy::cast_precision_loss)]
pub fn render_to_image(options: &ViewerOptions, width: u32, height: u32) -> Result<Vec<u8>> {
    check_dimensions(width, height)?;
    options.validate()?;
    let mut engine = RenderEngine::new_headless(width, height)
        .block_on()
        .map_err(|e| GridError::Render(format!("failed to create headless engine: {e}")))?;

    engine.background_color = options.background_color;
    engine.camera = Camera::from_options(options, engine.width as f32 / engine.height as f32);

    let mut scene = GridScene::from_options(options);
    engine
        .render_offscreen(&mut scene.grid, &mut scene.indicators)
        .map_err(|e| GridError::Render(e.to_string()))?;
    engine
        .read_pixels()
        .map_err(|e| GridError::Render(e.to_string()))
}

/// Renders the scene to a PNG or JPEG file.
pub fn render_to_file(
    options: &ViewerOptions,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<()> {
    let data = render_to_image(options, width, height)?;
    infigrid_render::save_image(path, &data, width, height)
        .map_err(|e| GridError::Render(format!("failed to save image: {e}")))
}
