//! Application window and event loop management.

mod input;
mod render;

pub(super) use std::sync::Arc;

pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

pub(super) use infigrid_core::{GridError, ViewerOptions, WorldAxis};
pub(super) use infigrid_render::{Camera, RenderEngine};

pub(super) use crate::scene::{GridAction, GridScene};

/// The viewer application state.
pub struct App {
    pub(super) options: ViewerOptions,
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) scene: GridScene,
    pub(super) close_requested: bool,
    /// First fatal error; reported when the loop exits.
    pub(super) error: Option<GridError>,
    // Mouse state for camera control
    pub(super) mouse_pos: (f64, f64),
    pub(super) left_mouse_down: bool,
    pub(super) right_mouse_down: bool,
    pub(super) shift_down: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(options: ViewerOptions) -> Self {
        let scene = GridScene::from_options(&options);
        Self {
            options,
            window: None,
            engine: None,
            scene,
            close_requested: false,
            error: None,
            mouse_pos: (0.0, 0.0),
            left_mouse_down: false,
            right_mouse_down: false,
            shift_down: false,
        }
    }

    /// Records a fatal error and stops the loop.
    pub(super) fn fail(&mut self, event_loop: &ActiveEventLoop, error: GridError) {
        log::error!("{error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

/// Maps a key to a grid edit.
pub(super) fn key_action(key: KeyCode) -> Option<GridAction> {
    match key {
        KeyCode::KeyX => Some(GridAction::ToggleAxis(WorldAxis::X)),
        KeyCode::KeyY => Some(GridAction::ToggleAxis(WorldAxis::Y)),
        KeyCode::KeyZ => Some(GridAction::ToggleAxis(WorldAxis::Z)),
        KeyCode::BracketLeft => Some(GridAction::HalveCellSize),
        KeyCode::BracketRight => Some(GridAction::DoubleCellSize),
        KeyCode::Minus => Some(GridAction::DecreaseMajorFactor),
        KeyCode::Equal => Some(GridAction::IncreaseMajorFactor),
        KeyCode::KeyO => Some(GridAction::CycleOpacity),
        KeyCode::KeyP => Some(GridAction::CyclePlane),
        _ => None,
    }
}

/// Runs the viewer until the window is closed.
pub fn run_app(options: ViewerOptions) -> infigrid_core::Result<()> {
    let event_loop =
        EventLoop::new().map_err(|e| GridError::Render(format!("failed to create event loop: {e}")))?;
    let mut app = App::new(options);

    event_loop
        .run_app(&mut app)
        .map_err(|e| GridError::Render(format!("event loop error: {e}")))?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            key_action(KeyCode::KeyZ),
            Some(GridAction::ToggleAxis(WorldAxis::Z))
        );
        assert_eq!(key_action(KeyCode::KeyP), Some(GridAction::CyclePlane));
        assert_eq!(key_action(KeyCode::KeyQ), None);
    }
}
