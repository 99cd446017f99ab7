use super::{ActiveEventLoop, App, GridError};
use infigrid_render::RenderError;

impl App {
    /// Renders one frame, recovering from a lost or outdated surface.
    pub(super) fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = &mut self.engine else {
            return;
        };

        // Picks up edits made outside the key handler
        self.scene.sync_indicators();

        match engine.render_frame(&mut self.scene.grid, &mut self.scene.indicators) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost | RenderError::SurfaceOutdated) => {
                let (width, height) = engine.dimensions();
                engine.resize(width, height);
            }
            Err(RenderError::Timeout) => {
                log::warn!("surface timeout");
            }
            Err(e) => {
                self.fail(event_loop, GridError::Render(e.to_string()));
            }
        }
    }
}
