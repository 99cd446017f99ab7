//! Infinite grid rendering.
//!
//! The grid is a single quad that follows the camera. All line work happens in
//! `shaders/grid.wgsl`, which mirrors [`infigrid_core::coverage`].

use glam::Mat4;
use infigrid_core::{CoverageParams, DepthPolicy, QuadPlacement};
use wgpu::util::DeviceExt;

/// GPU representation of grid uniforms.
/// Matches the shader's `GridUniforms` struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct GridUniforms {
    /// Maps the unit quad onto the recentred plane patch.
    pub model: [[f32; 4]; 4],
    pub minor_color: [f32; 4],
    pub major_color: [f32; 4],
    /// Color of the line `v = 0`; alpha is 1 when shown, 0 when hidden.
    pub u_axis_color: [f32; 4],
    /// Color of the line `u = 0`; alpha is 1 when shown, 0 when hidden.
    pub v_axis_color: [f32; 4],
    pub center_color: [f32; 4],
    /// World direction of the `u` plane coordinate.
    pub plane_u: [f32; 4],
    /// World direction of the `v` plane coordinate.
    pub plane_v: [f32; 4],
    pub cell_size: f32,
    pub major_factor: f32,
    pub minor_half_width: f32,
    pub major_half_width: f32,
    pub axis_half_width: f32,
    pub center_half_width: f32,
    pub fade_start: f32,
    pub fade_end: f32,
    pub opacity: f32,
    pub _padding: [f32; 3],
}

impl GridUniforms {
    /// Builds uniforms from clamped parameters and the current quad placement.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(params: &CoverageParams, placement: &QuadPlacement) -> Self {
        let rgba = |c: glam::Vec3, a: f32| [c.x, c.y, c.z, a];
        let visible = |v: bool| if v { 1.0 } else { 0.0 };
        let u = params.plane.u_axis().unit();
        let v = params.plane.v_axis().unit();

        Self {
            model: placement.model_matrix().to_cols_array_2d(),
            minor_color: rgba(params.minor_color, 1.0),
            major_color: rgba(params.major_color, 1.0),
            u_axis_color: rgba(params.u_axis.color, visible(params.u_axis.visible)),
            v_axis_color: rgba(params.v_axis.color, visible(params.v_axis.visible)),
            center_color: rgba(params.center_color, 1.0),
            plane_u: [u.x, u.y, u.z, 0.0],
            plane_v: [v.x, v.y, v.z, 0.0],
            cell_size: params.cell_size,
            major_factor: params.major_factor as f32,
            minor_half_width: params.minor_half_width,
            major_half_width: params.major_half_width,
            axis_half_width: params.axis_half_width,
            center_half_width: params.center_half_width,
            fade_start: params.fade_start,
            fade_end: params.fade_end,
            opacity: params.opacity,
            _padding: [0.0; 3],
        }
    }
}

impl Default for GridUniforms {
    fn default() -> Self {
        let params = CoverageParams::from(&infigrid_core::GridConfig::default());
        let placement = QuadPlacement::compute(&params, glam::Vec3::ZERO);
        Self::new(&params, &placement)
    }
}

/// Grid render resources.
pub struct GridRenderData {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GridRenderData {
    /// Creates new grid render data.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let uniforms = GridUniforms::default();

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Bind Group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            uniform_buffer,
            bind_group,
        }
    }

    /// Uploads the grid uniforms.
    pub fn update(&self, queue: &wgpu::Queue, uniforms: &GridUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Returns the bind group for rendering.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Draws the grid quad: 6 vertices, no vertex buffer.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..6, 0..1);
    }
}

/// Grid pipelines for both blend modes.
pub struct GridPipelines {
    pub opaque: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
}

impl GridPipelines {
    /// Creates both pipelines against one bind group layout.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let create = |mode: infigrid_core::BlendMode| {
            create_grid_pipeline(
                device,
                bind_group_layout,
                color_format,
                depth_format,
                mode.grid_depth_policy(),
            )
        };
        Self {
            opaque: create(infigrid_core::BlendMode::Opaque),
            transparent: create(infigrid_core::BlendMode::Transparent),
        }
    }

    /// Returns the pipeline for a blend mode.
    #[must_use]
    pub fn for_mode(&self, mode: infigrid_core::BlendMode) -> &wgpu::RenderPipeline {
        match mode {
            infigrid_core::BlendMode::Opaque => &self.opaque,
            infigrid_core::BlendMode::Transparent => &self.transparent,
        }
    }
}

/// Creates the bind group layout for grid rendering.
#[must_use]
pub fn create_grid_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Grid Bind Group Layout"),
        entries: &[
            // Camera uniforms
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            // Grid uniforms
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

/// Maps a depth policy onto wgpu depth state.
#[must_use]
pub fn depth_stencil_state(
    depth_format: wgpu::TextureFormat,
    policy: DepthPolicy,
) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: depth_format,
        depth_write_enabled: policy.write,
        depth_compare: if policy.test {
            wgpu::CompareFunction::LessEqual
        } else {
            wgpu::CompareFunction::Always
        },
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Creates a grid render pipeline with the given depth policy.
///
/// Color is always alpha blended so line edges and the distance fade stay
/// smooth; the depth policy alone separates opaque from transparent grids.
#[must_use]
pub fn create_grid_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    policy: DepthPolicy,
) -> wgpu::RenderPipeline {
    let shader_source = include_str!("shaders/grid.wgsl");
    let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Grid Shader"),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Grid Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if policy.write {
            "Grid Pipeline (opaque)"
        } else {
            "Grid Pipeline (transparent)"
        }),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader_module,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader_module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None, // Visible from both sides
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: Some(depth_stencil_state(depth_format, policy)),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Unit quad corners in the order the shader emits them.
pub const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// World positions of the six quad vertices for a model matrix.
#[must_use]
pub fn quad_world_vertices(model: Mat4) -> [glam::Vec3; 6] {
    QUAD_CORNERS.map(|[x, y]| model.transform_point3(glam::Vec3::new(x, y, 0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use infigrid_core::{BlendMode, GridConfig, GridPlane, WorldAxis};
    use proptest::prelude::*;

    fn any_scalar() -> impl Strategy<Value = f32> {
        prop_oneof![
            -1.0e6f32..1.0e6,
            Just(0.0),
            Just(f32::NAN),
            Just(f32::INFINITY),
            Just(f32::NEG_INFINITY),
        ]
    }

    #[test]
    fn test_grid_uniforms_size() {
        assert_eq!(std::mem::size_of::<GridUniforms>(), 224);
        assert_eq!(std::mem::size_of::<GridUniforms>() % 16, 0);
    }

    #[test]
    fn test_grid_uniforms_axis_visibility_in_alpha() {
        let mut config = GridConfig::new(GridPlane::Xy);
        config.set_show_axis(WorldAxis::Y, false);
        let params = CoverageParams::from(&config);
        let placement = QuadPlacement::compute(&params, Vec3::ZERO);
        let uniforms = GridUniforms::new(&params, &placement);
        // XY plane: u is X, v is Y.
        assert_eq!(uniforms.u_axis_color[3], 1.0);
        assert_eq!(uniforms.v_axis_color[3], 0.0);
        assert_eq!(uniforms.plane_u, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniforms.plane_v, [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_grid_uniforms_carry_clamped_values() {
        let mut config = GridConfig::default();
        config.set_opacity(3.0);
        config.set_major_grid_factor(0);
        let params = CoverageParams::from(&config);
        let placement = QuadPlacement::compute(&params, Vec3::ZERO);
        let uniforms = GridUniforms::new(&params, &placement);
        assert_eq!(uniforms.opacity, 1.0);
        assert_eq!(uniforms.major_factor, 1.0);
        assert!(uniforms.fade_start < uniforms.fade_end);
    }

    #[test]
    fn test_quad_vertices_lie_on_plane() {
        for plane in GridPlane::ALL {
            let params = CoverageParams::from(&GridConfig::new(plane));
            let placement = QuadPlacement::compute(&params, Vec3::new(37.0, -12.0, 5.0));
            for vertex in quad_world_vertices(placement.model_matrix()) {
                assert!(plane.height_of(vertex).abs() < 1e-3, "{plane:?}: {vertex}");
            }
        }
    }

    #[test]
    fn test_transparent_grid_keeps_depth_test() {
        let state = depth_stencil_state(
            wgpu::TextureFormat::Depth24Plus,
            BlendMode::Transparent.grid_depth_policy(),
        );
        assert!(!state.depth_write_enabled);
        assert_eq!(state.depth_compare, wgpu::CompareFunction::LessEqual);

        let indicator = depth_stencil_state(
            wgpu::TextureFormat::Depth24Plus,
            BlendMode::Transparent.indicator_depth_policy(),
        );
        assert_eq!(indicator.depth_compare, wgpu::CompareFunction::Always);
    }

    proptest! {
        #[test]
        fn prop_uniforms_are_clamped_and_finite(
            plane in 0u32..3,
            cell_size in any_scalar(),
            factor in 0u32..64,
            minor in any_scalar(),
            major in any_scalar(),
            axis in any_scalar(),
            opacity in any_scalar(),
            half_extent in any_scalar(),
            camera in prop::array::uniform3(-1.0e5f32..1.0e5),
        ) {
            let mut config = GridConfig::from_plane_index(plane).unwrap();
            config.set_cell_size(cell_size);
            config.set_major_grid_factor(factor);
            config.set_minor_line_width(minor);
            config.set_major_line_width(major);
            config.set_axis_line_width(axis);
            config.set_opacity(opacity);
            config.set_quad_half_extent(half_extent);

            let params = CoverageParams::from(&config);
            let placement = QuadPlacement::compute(&params, Vec3::from_array(camera));
            let u = GridUniforms::new(&params, &placement);

            prop_assert!(u.model.iter().flatten().all(|v| v.is_finite()));
            prop_assert!(u.cell_size > 0.0 && u.cell_size.is_finite());
            prop_assert!(u.major_factor >= 1.0);
            for half_width in [u.minor_half_width, u.major_half_width, u.axis_half_width] {
                prop_assert!(half_width >= 0.0 && half_width <= u.cell_size * 0.5);
            }
            prop_assert!(u.center_half_width.is_finite());
            prop_assert!((0.0..=1.0).contains(&u.opacity));
            prop_assert!(u.fade_start.is_finite() && u.fade_start < u.fade_end);
        }
    }
}
