//! Platform Bridge
//!
//! Folds winit window events into a [`DeviceSnapshot`]. The host feeds every
//! window event through [`SnapshotBuilder::handle_window_event`] and calls
//! [`SnapshotBuilder::snapshot`] once per frame; per-frame quantities (wheel,
//! cursor motion, typed text) are reset after each snapshot.
//!
//! Controllers are not reported by winit; the host pushes their state with
//! [`SnapshotBuilder::set_controller`].

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::gamepad::ControllerState;
use super::keyboard::scancode;
use super::mouse::{MouseButton, ScrollDelta};
use super::snapshot::{CaptureState, DeviceSnapshot};
use crate::config::SurfaceSettings;
use crate::menu::TextInputPlatform;

/// Scancode for a winit physical key, `None` for keys the engine ignores.
pub fn scancode_from_keycode(key: KeyCode) -> Option<u16> {
    let code = match key {
        KeyCode::KeyA => scancode::A,
        KeyCode::KeyB => scancode::B,
        KeyCode::KeyC => scancode::C,
        KeyCode::KeyD => scancode::D,
        KeyCode::KeyE => scancode::E,
        KeyCode::KeyF => scancode::F,
        KeyCode::KeyG => scancode::G,
        KeyCode::KeyH => scancode::H,
        KeyCode::KeyI => scancode::I,
        KeyCode::KeyJ => scancode::J,
        KeyCode::KeyK => scancode::K,
        KeyCode::KeyL => scancode::L,
        KeyCode::KeyM => scancode::M,
        KeyCode::KeyN => scancode::N,
        KeyCode::KeyO => scancode::O,
        KeyCode::KeyP => scancode::P,
        KeyCode::KeyQ => scancode::Q,
        KeyCode::KeyR => scancode::R,
        KeyCode::KeyS => scancode::S,
        KeyCode::KeyT => scancode::T,
        KeyCode::KeyU => scancode::U,
        KeyCode::KeyV => scancode::V,
        KeyCode::KeyW => scancode::W,
        KeyCode::KeyX => scancode::X,
        KeyCode::KeyY => scancode::Y,
        KeyCode::KeyZ => scancode::Z,
        KeyCode::Digit1 => scancode::DIGIT1,
        KeyCode::Digit2 => scancode::DIGIT2,
        KeyCode::Digit3 => scancode::DIGIT3,
        KeyCode::Digit4 => scancode::DIGIT4,
        KeyCode::Digit5 => scancode::DIGIT5,
        KeyCode::Digit6 => scancode::DIGIT6,
        KeyCode::Digit7 => scancode::DIGIT7,
        KeyCode::Digit8 => scancode::DIGIT8,
        KeyCode::Digit9 => scancode::DIGIT9,
        KeyCode::Digit0 => scancode::DIGIT0,
        KeyCode::Enter => scancode::RETURN,
        KeyCode::Escape => scancode::ESCAPE,
        KeyCode::Backspace => scancode::BACKSPACE,
        KeyCode::Tab => scancode::TAB,
        KeyCode::Space => scancode::SPACE,
        KeyCode::Minus => scancode::MINUS,
        KeyCode::Equal => scancode::EQUALS,
        KeyCode::BracketLeft => scancode::LEFT_BRACKET,
        KeyCode::BracketRight => scancode::RIGHT_BRACKET,
        KeyCode::Backslash => scancode::BACKSLASH,
        KeyCode::Semicolon => scancode::SEMICOLON,
        KeyCode::Quote => scancode::APOSTROPHE,
        KeyCode::Backquote => scancode::GRAVE,
        KeyCode::Comma => scancode::COMMA,
        KeyCode::Period => scancode::PERIOD,
        KeyCode::Slash => scancode::SLASH,
        KeyCode::CapsLock => scancode::CAPS_LOCK,
        KeyCode::F1 => scancode::F1,
        KeyCode::F2 => scancode::F2,
        KeyCode::F3 => scancode::F3,
        KeyCode::F4 => scancode::F4,
        KeyCode::F5 => scancode::F5,
        KeyCode::F6 => scancode::F6,
        KeyCode::F7 => scancode::F7,
        KeyCode::F8 => scancode::F8,
        KeyCode::F9 => scancode::F9,
        KeyCode::F10 => scancode::F10,
        KeyCode::F11 => scancode::F11,
        KeyCode::F12 => scancode::F12,
        KeyCode::Insert => scancode::INSERT,
        KeyCode::Home => scancode::HOME,
        KeyCode::PageUp => scancode::PAGE_UP,
        KeyCode::Delete => scancode::DELETE,
        KeyCode::End => scancode::END,
        KeyCode::PageDown => scancode::PAGE_DOWN,
        KeyCode::ArrowRight => scancode::RIGHT,
        KeyCode::ArrowLeft => scancode::LEFT,
        KeyCode::ArrowDown => scancode::DOWN,
        KeyCode::ArrowUp => scancode::UP,
        KeyCode::NumpadDivide => scancode::KP_DIVIDE,
        KeyCode::NumpadMultiply => scancode::KP_MULTIPLY,
        KeyCode::NumpadSubtract => scancode::KP_MINUS,
        KeyCode::NumpadAdd => scancode::KP_PLUS,
        KeyCode::NumpadEnter => scancode::KP_ENTER,
        KeyCode::Numpad1 => scancode::KP_1,
        KeyCode::Numpad2 => scancode::KP_2,
        KeyCode::Numpad3 => scancode::KP_3,
        KeyCode::Numpad4 => scancode::KP_4,
        KeyCode::Numpad5 => scancode::KP_5,
        KeyCode::Numpad6 => scancode::KP_6,
        KeyCode::Numpad7 => scancode::KP_7,
        KeyCode::Numpad8 => scancode::KP_8,
        KeyCode::Numpad9 => scancode::KP_9,
        KeyCode::Numpad0 => scancode::KP_0,
        KeyCode::NumpadDecimal => scancode::KP_PERIOD,
        KeyCode::ControlLeft => scancode::LEFT_CTRL,
        KeyCode::ShiftLeft => scancode::LEFT_SHIFT,
        KeyCode::AltLeft => scancode::LEFT_ALT,
        KeyCode::SuperLeft => scancode::LEFT_GUI,
        KeyCode::ControlRight => scancode::RIGHT_CTRL,
        KeyCode::ShiftRight => scancode::RIGHT_SHIFT,
        KeyCode::AltRight => scancode::RIGHT_ALT,
        KeyCode::SuperRight => scancode::RIGHT_GUI,
        _ => return None,
    };
    Some(code)
}

/// Engine mouse button for a winit button.
pub fn mouse_button_from_winit(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Back => Some(MouseButton::X1),
        winit::event::MouseButton::Forward => Some(MouseButton::X2),
        winit::event::MouseButton::Other(_) => None,
    }
}

/// Accumulates window events into the next device snapshot.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    current: DeviceSnapshot,
    last_cursor: Option<Vec2>,
    text_input_enabled: bool,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one winit window event. Unrelated events are ignored.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(code, event.state);
                }
                if event.state == ElementState::Pressed {
                    if let Some(text) = event.text.as_ref() {
                        self.handle_text(text);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(*button, *state);
            }
            WindowEvent::MouseWheel { delta, .. } => self.handle_scroll(*delta),
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorEntered { .. } => self.current.mouse.in_window = true,
            WindowEvent::CursorLeft { .. } => self.current.mouse.in_window = false,
            WindowEvent::Focused(false) => self.release_all(),
            WindowEvent::Resized(size) => {
                self.current.surface.window_size = Vec2::new(size.width as f32, size.height as f32);
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if let Some(code) = scancode_from_keycode(key) {
            self.current.set_key(code, state == ElementState::Pressed);
        }
    }

    pub fn handle_mouse_button(&mut self, button: winit::event::MouseButton, state: ElementState) {
        if let Some(button) = mouse_button_from_winit(button) {
            self.current
                .mouse
                .set_button(button, state == ElementState::Pressed);
        }
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let d = match delta {
            MouseScrollDelta::LineDelta(x, y) => ScrollDelta::from_lines(x, y),
            MouseScrollDelta::PixelDelta(pos) => ScrollDelta::from_pixels(pos.x, pos.y),
        };
        self.current.mouse.wheel.x += d.x;
        self.current.mouse.wheel.y += d.y;
    }

    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if let Some(last) = self.last_cursor {
            self.current.mouse.motion += position - last;
        }
        self.last_cursor = Some(position);
        self.current.mouse.position = position;
        self.current.mouse.in_window = true;
    }

    /// Text typed by the user. Dropped unless platform text input is enabled.
    pub fn handle_text(&mut self, text: &str) {
        if !self.text_input_enabled {
            return;
        }
        self.current
            .typed_text
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    /// Release every held key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.current.keyboard.fill(false);
        self.current.mouse.buttons = 0;
    }

    pub fn set_controller(&mut self, controller: ControllerState) {
        match self
            .current
            .controllers
            .iter_mut()
            .find(|c| c.device_id == controller.device_id)
        {
            Some(slot) => *slot = controller,
            None => {
                log::info!("controller {} connected", controller.device_id);
                self.current.controllers.push(controller);
            }
        }
    }

    pub fn remove_controller(&mut self, device_id: u16) {
        let before = self.current.controllers.len();
        self.current.controllers.retain(|c| c.device_id != device_id);
        if self.current.controllers.len() != before {
            log::info!("controller {device_id} disconnected");
        }
    }

    pub fn set_render_size(&mut self, render_size: Vec2) {
        self.current.surface.render_size = render_size;
    }

    pub fn set_window_size(&mut self, window_size: Vec2) {
        self.current.surface.window_size = window_size;
    }

    pub fn set_surface_settings(&mut self, settings: SurfaceSettings) {
        self.current.surface.settings = settings;
    }

    pub fn set_capture(&mut self, capture: CaptureState) {
        self.current.capture = capture;
    }

    pub fn text_input_enabled(&self) -> bool {
        self.text_input_enabled
    }

    /// Produce this frame's snapshot and reset per-frame accumulators.
    pub fn snapshot(&mut self) -> DeviceSnapshot {
        let snapshot = self.current.clone();
        self.current.mouse.wheel = ScrollDelta::default();
        self.current.mouse.motion = Vec2::ZERO;
        self.current.typed_text.clear();
        snapshot
    }
}

impl TextInputPlatform for SnapshotBuilder {
    fn set_text_input(&mut self, enabled: bool) {
        if self.text_input_enabled != enabled {
            log::debug!("platform text input {}", if enabled { "on" } else { "off" });
        }
        self.text_input_enabled = enabled;
        if !enabled {
            self.current.typed_text.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_and_release() {
        let mut builder = SnapshotBuilder::new();
        builder.handle_key(KeyCode::KeyW, ElementState::Pressed);
        assert!(builder.snapshot().key_down(scancode::W));
        builder.handle_key(KeyCode::KeyW, ElementState::Released);
        assert!(!builder.snapshot().key_down(scancode::W));
    }

    #[test]
    fn test_wheel_and_motion_reset_per_frame() {
        let mut builder = SnapshotBuilder::new();
        builder.handle_cursor_moved(10.0, 10.0);
        builder.handle_cursor_moved(15.0, 12.0);
        builder.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        builder.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));

        let first = builder.snapshot();
        assert_eq!(first.mouse.wheel.y, 2.0);
        assert_eq!(first.mouse.motion, Vec2::new(5.0, 2.0));
        assert_eq!(first.mouse.position, Vec2::new(15.0, 12.0));

        let second = builder.snapshot();
        assert_eq!(second.mouse.wheel.y, 0.0);
        assert_eq!(second.mouse.motion, Vec2::ZERO);
        assert_eq!(second.mouse.position, Vec2::new(15.0, 12.0));
    }

    #[test]
    fn test_first_cursor_event_sets_position_without_motion() {
        let mut builder = SnapshotBuilder::new();
        builder.handle_cursor_moved(40.0, 30.0);
        let first = builder.snapshot();
        assert_eq!(first.mouse.position, Vec2::new(40.0, 30.0));
        assert_eq!(first.mouse.motion, Vec2::ZERO);

        builder.handle_cursor_moved(44.0, 27.0);
        assert_eq!(builder.snapshot().mouse.motion, Vec2::new(4.0, -3.0));
    }

    #[test]
    fn test_text_only_collected_while_enabled() {
        let mut builder = SnapshotBuilder::new();
        builder.handle_text("ab");
        assert_eq!(builder.snapshot().typed_text, "");

        builder.set_text_input(true);
        builder.handle_text("cd\r");
        assert_eq!(builder.snapshot().typed_text, "cd");
    }

    #[test]
    fn test_mouse_buttons() {
        let mut builder = SnapshotBuilder::new();
        builder.handle_mouse_button(winit::event::MouseButton::Back, ElementState::Pressed);
        assert!(builder.snapshot().mouse.is_pressed(MouseButton::X1));
        builder.release_all();
        assert_eq!(builder.snapshot().mouse.buttons, 0);
    }

    #[test]
    fn test_controller_connect_update_remove() {
        let mut builder = SnapshotBuilder::new();
        builder.set_controller(ControllerState::new(4));
        builder.set_controller(ControllerState::new(4).with_axis(0, 0.5));
        assert_eq!(builder.snapshot().controllers.len(), 1);
        builder.remove_controller(4);
        assert!(builder.snapshot().controllers.is_empty());
    }
}
