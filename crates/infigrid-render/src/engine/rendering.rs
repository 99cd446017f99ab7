//! Frame rendering: clear, axis indicators, then the grid.

use super::RenderEngine;
use crate::axis_indicator_render::AxisIndicatorDrawable;
use crate::error::{RenderError, RenderResult};
use crate::grid_drawable::GridDrawable;

impl RenderEngine {
    /// Renders one frame to the window surface and presents it.
    pub fn render_frame(
        &mut self,
        grid: &mut GridDrawable,
        indicators: &mut [AxisIndicatorDrawable],
    ) -> RenderResult<()> {
        let surface = self.surface.as_ref().ok_or(RenderError::NoSurface)?;
        let output = surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.draw_scene(&view, grid, indicators);
        output.present();
        Ok(())
    }

    /// Renders one frame into the offscreen target.
    pub fn render_offscreen(
        &mut self,
        grid: &mut GridDrawable,
        indicators: &mut [AxisIndicatorDrawable],
    ) -> RenderResult<()> {
        let view = self
            .offscreen_view
            .as_ref()
            .ok_or(RenderError::NoOffscreenTarget)?;
        self.draw_scene(view, grid, indicators);
        Ok(())
    }

    fn draw_scene(
        &self,
        view: &wgpu::TextureView,
        grid: &mut GridDrawable,
        indicators: &mut [AxisIndicatorDrawable],
    ) {
        self.update_camera_uniforms();

        grid.prepare(
            &self.device,
            &self.queue,
            &self.grid_bind_group_layout,
            &self.camera_buffer,
            self.camera.position,
        );
        for indicator in indicators.iter_mut() {
            indicator.prepare(
                &self.device,
                &self.queue,
                &self.indicator_bind_group_layout,
                &self.camera_buffer,
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene encoder"),
            });

        {
            let bg = self.background_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(bg.x),
                            g: f64::from(bg.y),
                            b: f64::from(bg.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            for indicator in indicators.iter() {
                indicator.draw(&mut render_pass, &self.indicator_pipelines);
            }
            grid.draw(&mut render_pass, &self.grid_pipelines);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
