use super::{
    key_action, ActiveEventLoop, App, ApplicationHandler, Arc, Camera, ElementState, FutureExt,
    GridAction, GridError, KeyCode, LogicalSize, MouseButton, MouseScrollDelta, PhysicalKey,
    RenderEngine, Window, WindowEvent, WindowId,
};

impl ApplicationHandler for App {
    #[allow(clippy::cast_precision_loss)]
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(
                self.options.window_width,
                self.options.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, GridError::Render(format!("failed to create window: {e}")));
                return;
            }
        };

        let mut engine = match RenderEngine::new_windowed(window.clone()).block_on() {
            Ok(engine) => engine,
            Err(e) => {
                self.fail(event_loop, GridError::Render(e.to_string()));
                return;
            }
        };

        engine.background_color = self.options.background_color;
        engine.camera =
            Camera::from_options(&self.options, engine.width as f32 / engine.height as f32);

        self.window = Some(window);
        self.engine = Some(engine);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_down = modifiers.state().shift_key();
            }
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Left, ElementState::Pressed) => self.left_mouse_down = true,
                (MouseButton::Left, ElementState::Released) => self.left_mouse_down = false,
                (MouseButton::Right, ElementState::Pressed) => self.right_mouse_down = true,
                (MouseButton::Right, ElementState::Released) => self.right_mouse_down = false,
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                let delta_x = (position.x - self.mouse_pos.0) as f32;
                let delta_y = (position.y - self.mouse_pos.1) as f32;
                self.mouse_pos = (position.x, position.y);

                // Left drag orbits; Shift+left or right drag pans
                if let Some(engine) = &mut self.engine {
                    let is_rotate = self.left_mouse_down && !self.shift_down;
                    let is_pan = (self.left_mouse_down && self.shift_down) || self.right_mouse_down;

                    if is_rotate {
                        engine.camera.orbit(delta_x * 0.01, delta_y * 0.01);
                    } else if is_pan {
                        let scale = engine.camera.distance() * 0.002;
                        engine.camera.pan(-delta_x * scale, delta_y * scale);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                    };
                    let step = engine.camera.distance() * 0.1 * scroll;
                    engine.camera.zoom(step);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape {
                        self.close_requested = true;
                    } else if let Some(action) = key_action(code) {
                        self.scene.apply(action);
                        if action == GridAction::CyclePlane {
                            // Orbit about the new plane's normal
                            if let Some(engine) = &mut self.engine {
                                let up = self.scene.grid.config().plane().normal_axis();
                                engine.camera.set_up_axis(up);
                            }
                        }
                    }
                }
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}
