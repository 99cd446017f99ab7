//! The grid as a scene drawable.

use glam::Vec3;
use infigrid_core::{BlendMode, CoverageParams, GridConfig, GridPlane, QuadPlacement};

use crate::grid_render::{GridPipelines, GridRenderData, GridUniforms};

/// An infinite grid: configuration plus lazily created GPU resources.
///
/// The plane is chosen at construction. [`GridDrawable::from_plane_index`]
/// rejects unknown selectors before anything touches the GPU.
pub struct GridDrawable {
    config: GridConfig,
    render_data: Option<GridRenderData>,
    placement: Option<QuadPlacement>,
}

impl GridDrawable {
    /// Creates a grid from a configuration.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        log::debug!("creating {} grid", config.plane().name());
        Self {
            config,
            render_data: None,
            placement: None,
        }
    }

    /// Creates a default-styled grid on the given plane.
    #[must_use]
    pub fn with_plane(plane: GridPlane) -> Self {
        Self::new(GridConfig::new(plane))
    }

    /// Creates a grid from a plane selector (0 = XZ, 1 = XY, 2 = ZY).
    pub fn from_plane_index(index: u32) -> infigrid_core::Result<Self> {
        Ok(Self::new(GridConfig::from_plane_index(index)?))
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Mutable access for an external panel. Changes apply on the next `prepare`.
    pub fn config_mut(&mut self) -> &mut GridConfig {
        &mut self.config
    }

    /// Clamped draw-time parameters for the current configuration.
    #[must_use]
    pub fn params(&self) -> CoverageParams {
        CoverageParams::from(&self.config)
    }

    /// Blend mode selected by the current opacity.
    #[must_use]
    pub fn blend_mode(&self) -> BlendMode {
        BlendMode::from_opacity(self.config.opacity())
    }

    /// Placement computed by the last `prepare`.
    #[must_use]
    pub fn placement(&self) -> Option<&QuadPlacement> {
        self.placement.as_ref()
    }

    /// Recentres the quad under the camera and uploads uniforms.
    ///
    /// Creates GPU resources on first use.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        camera_position: Vec3,
    ) {
        let render_data = self
            .render_data
            .get_or_insert_with(|| GridRenderData::new(device, bind_group_layout, camera_buffer));

        let params = CoverageParams::from(&self.config);
        let placement = QuadPlacement::compute(&params, camera_position);
        render_data.update(queue, &GridUniforms::new(&params, &placement));
        self.placement = Some(placement);
    }

    /// Draws the grid with the pipeline matching its blend mode.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, pipelines: &GridPipelines) {
        let Some(render_data) = &self.render_data else {
            return;
        };
        render_pass.set_pipeline(pipelines.for_mode(self.blend_mode()));
        render_data.draw(render_pass);
    }
}

impl Default for GridDrawable {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infigrid_core::GridError;

    #[test]
    fn test_from_plane_index_fails_fast() {
        let err = GridDrawable::from_plane_index(5).err();
        assert!(matches!(err, Some(GridError::UnsupportedPlane(5))));
        let grid = GridDrawable::from_plane_index(2).unwrap();
        assert_eq!(grid.config().plane(), GridPlane::Zy);
    }

    #[test]
    fn test_blend_mode_follows_opacity() {
        let mut grid = GridDrawable::default();
        assert_eq!(grid.blend_mode(), BlendMode::Opaque);
        grid.config_mut().set_opacity(0.999);
        assert_eq!(grid.blend_mode(), BlendMode::Transparent);
        grid.config_mut().set_opacity(1.0);
        assert_eq!(grid.blend_mode(), BlendMode::Opaque);
    }

    #[test]
    fn test_no_placement_before_prepare() {
        let grid = GridDrawable::with_plane(GridPlane::Xz);
        assert!(grid.placement().is_none());
        assert_eq!(grid.params().plane, GridPlane::Xz);
    }
}
