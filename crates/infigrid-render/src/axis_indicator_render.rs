//! Axis indicator cylinders.

use glam::Vec3;
use infigrid_core::{AxisIndicator, AxisIndicatorState, BlendMode, GridConfig, WorldAxis};
use wgpu::util::DeviceExt;

use crate::grid_render::depth_stencil_state;

/// Number of segments around the cylinder.
pub const CYLINDER_SEGMENTS: u32 = 12;

/// Cylinder mesh vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CylinderVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Builds a unit cylinder: radius 1, height 1, centered on the origin, along +Y.
///
/// Returned as a triangle list: side quads followed by both caps.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unit_cylinder_mesh(segments: u32) -> Vec<CylinderVertex> {
    let segments = segments.max(3);
    let ring = |i: u32| {
        let angle = std::f32::consts::TAU * (i % segments) as f32 / segments as f32;
        Vec3::new(angle.cos(), 0.0, angle.sin())
    };
    let vertex = |p: Vec3, n: Vec3| CylinderVertex {
        position: p.to_array(),
        normal: n.to_array(),
    };

    let bottom = Vec3::new(0.0, -0.5, 0.0);
    let top = Vec3::new(0.0, 0.5, 0.0);
    let mut vertices = Vec::with_capacity(segments as usize * 12);

    for i in 0..segments {
        let (a, b) = (ring(i), ring(i + 1));
        let (a0, a1, b0, b1) = (a + bottom, a + top, b + bottom, b + top);
        vertices.extend_from_slice(&[
            vertex(a0, a),
            vertex(a1, a),
            vertex(b1, b),
            vertex(a0, a),
            vertex(b1, b),
            vertex(b0, b),
        ]);
        vertices.extend_from_slice(&[
            vertex(top, Vec3::Y),
            vertex(b1, Vec3::Y),
            vertex(a1, Vec3::Y),
            vertex(bottom, Vec3::NEG_Y),
            vertex(a0, Vec3::NEG_Y),
            vertex(b0, Vec3::NEG_Y),
        ]);
    }

    vertices
}

/// GPU representation of indicator uniforms.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AxisIndicatorUniforms {
    pub model: [[f32; 4]; 4],
    /// RGB color; alpha is the grid opacity.
    pub color: [f32; 4],
}

impl From<&AxisIndicatorState> for AxisIndicatorUniforms {
    fn from(state: &AxisIndicatorState) -> Self {
        Self {
            model: state.model_matrix().to_cols_array_2d(),
            color: [state.color.x, state.color.y, state.color.z, state.opacity],
        }
    }
}

/// GPU resources for one indicator.
pub struct AxisIndicatorRenderData {
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
}

impl AxisIndicatorRenderData {
    /// Creates new indicator render data.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        state: &AxisIndicatorState,
    ) -> Self {
        let mesh = unit_cylinder_mesh(CYLINDER_SEGMENTS);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Axis Indicator Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Axis Indicator Uniform Buffer"),
            contents: bytemuck::cast_slice(&[AxisIndicatorUniforms::from(state)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Axis Indicator Bind Group"),
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
            vertex_buffer,
            vertex_count: mesh.len() as u32,
            bind_group,
        }
    }

    /// Uploads the indicator uniforms.
    pub fn update(&self, queue: &wgpu::Queue, state: &AxisIndicatorState) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[AxisIndicatorUniforms::from(state)]),
        );
    }

    /// Draws the cylinder.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

/// Indicator pipelines for both blend modes.
pub struct AxisIndicatorPipelines {
    pub opaque: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
}

impl AxisIndicatorPipelines {
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let create = |mode: BlendMode| {
            create_axis_indicator_pipeline(
                device,
                bind_group_layout,
                color_format,
                depth_format,
                mode,
            )
        };
        Self {
            opaque: create(BlendMode::Opaque),
            transparent: create(BlendMode::Transparent),
        }
    }

    #[must_use]
    pub fn for_mode(&self, mode: BlendMode) -> &wgpu::RenderPipeline {
        match mode {
            BlendMode::Opaque => &self.opaque,
            BlendMode::Transparent => &self.transparent,
        }
    }
}

/// Creates the bind group layout for indicator rendering.
#[must_use]
pub fn create_axis_indicator_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Axis Indicator Bind Group Layout"),
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
            // Indicator uniforms
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

/// Creates the indicator render pipeline for a blend mode.
#[must_use]
pub fn create_axis_indicator_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    mode: BlendMode,
) -> wgpu::RenderPipeline {
    let shader_source = include_str!("shaders/axis_indicator.wgsl");
    let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Axis Indicator Shader"),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Axis Indicator Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    let blend = if mode.is_transparent() {
        Some(wgpu::BlendState::ALPHA_BLENDING)
    } else {
        Some(wgpu::BlendState::REPLACE)
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Axis Indicator Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader_module,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<CylinderVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    // position
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    },
                    // normal
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 12,
                        shader_location: 1,
                    },
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader_module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: Some(depth_stencil_state(
            depth_format,
            mode.indicator_depth_policy(),
        )),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// An axis indicator with its GPU resources.
///
/// The indicator reads the grid only when asked: call
/// [`sync_from_grid`](Self::sync_from_grid) after changing the grid.
pub struct AxisIndicatorDrawable {
    indicator: AxisIndicator,
    render_data: Option<AxisIndicatorRenderData>,
    dirty: bool,
}

impl AxisIndicatorDrawable {
    #[must_use]
    pub fn new(axis: WorldAxis, length: f32, grid: &GridConfig) -> Self {
        Self {
            indicator: AxisIndicator::new(axis, length, grid),
            render_data: None,
            dirty: true,
        }
    }

    #[must_use]
    pub fn axis(&self) -> WorldAxis {
        self.indicator.axis()
    }

    #[must_use]
    pub fn state(&self) -> &AxisIndicatorState {
        self.indicator.state()
    }

    /// Re-reads radius, color, visibility and opacity from the grid.
    pub fn sync_from_grid(&mut self, grid: &GridConfig) {
        self.indicator.sync_from_grid(grid);
        self.dirty = true;
    }

    /// Re-syncs only if the grid changed since the last sync.
    pub fn sync_if_changed(&mut self, grid: &GridConfig) -> bool {
        let changed = self.indicator.sync_if_changed(grid);
        self.dirty |= changed;
        changed
    }

    /// Creates GPU resources on first use and uploads pending changes.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) {
        let state = *self.indicator.state();
        match &self.render_data {
            Some(data) if self.dirty => data.update(queue, &state),
            Some(_) => {}
            None => {
                self.render_data = Some(AxisIndicatorRenderData::new(
                    device,
                    bind_group_layout,
                    camera_buffer,
                    &state,
                ));
            }
        }
        self.dirty = false;
    }

    /// Draws the indicator unless hidden or fully transparent.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, pipelines: &AxisIndicatorPipelines) {
        let state = self.indicator.state();
        if !state.visible || state.opacity <= 0.0 {
            return;
        }
        let Some(data) = &self.render_data else {
            return;
        };
        render_pass.set_pipeline(pipelines.for_mode(state.blend_mode));
        data.draw(render_pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_mesh_shape() {
        let mesh = unit_cylinder_mesh(CYLINDER_SEGMENTS);
        assert_eq!(mesh.len(), CYLINDER_SEGMENTS as usize * 12);
        for v in &mesh {
            let p = Vec3::from_array(v.position);
            assert!(p.y.abs() <= 0.5 + 1e-6);
            assert!(p.x.hypot(p.z) <= 1.0 + 1e-5);
            assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cylinder_mesh_minimum_segments() {
        assert_eq!(unit_cylinder_mesh(0).len(), 3 * 12);
    }

    #[test]
    fn test_indicator_uniforms_from_state() {
        let mut grid = GridConfig::default();
        grid.set_opacity(0.25);
        let indicator = AxisIndicator::new(WorldAxis::Z, 100.0, &grid);
        let uniforms = AxisIndicatorUniforms::from(indicator.state());
        assert_eq!(uniforms.color[3], 0.25);
        assert_eq!(std::mem::size_of::<AxisIndicatorUniforms>(), 80);
    }

    #[test]
    fn test_drawable_sync_tracks_grid() {
        let mut grid = GridConfig::default();
        let mut drawable = AxisIndicatorDrawable::new(WorldAxis::Z, 1000.0, &grid);
        assert!(drawable.state().visible);

        grid.set_show_axis(WorldAxis::Z, false);
        assert!(drawable.state().visible);
        assert!(drawable.sync_if_changed(&grid));
        assert!(!drawable.state().visible);

        grid.set_axis_color(WorldAxis::Z, Vec3::X);
        drawable.sync_from_grid(&grid);
        assert_eq!(drawable.state().color, Vec3::X);
        assert_eq!(drawable.axis(), WorldAxis::Z);
    }
}
