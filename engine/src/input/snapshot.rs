//! Device Snapshot
//!
//! A point-in-time read of every input device, rebuilt once per frame by the
//! platform layer and read-only to everything downstream.

use super::gamepad::ControllerState;
use super::keyboard::KEYBOARD_KEY_COUNT;
use super::mouse::MouseSnapshot;
use super::surface::RenderSurface;

/// Input-ownership flags set by the host.
///
/// While an overlay (for example a layout editor) owns keyboard and mouse,
/// they read as idle to gameplay and menus. Gamepads are only gated by the
/// narrower `editor_active` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureState {
    pub overlay_captures_input: bool,
    pub editor_active: bool,
}

impl CaptureState {
    pub fn keyboard_mouse_blocked(&self) -> bool {
        self.overlay_captures_input
    }

    pub fn gamepad_blocked(&self) -> bool {
        self.editor_active
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    /// Held state per scancode.
    pub keyboard: [bool; KEYBOARD_KEY_COUNT],
    pub mouse: MouseSnapshot,
    /// Connected controllers, in connection order.
    pub controllers: Vec<ControllerState>,
    /// Text typed this frame while platform text input was enabled.
    pub typed_text: String,
    pub surface: RenderSurface,
    pub capture: CaptureState,
}

impl Default for DeviceSnapshot {
    fn default() -> Self {
        Self {
            keyboard: [false; KEYBOARD_KEY_COUNT],
            mouse: MouseSnapshot::default(),
            controllers: Vec::new(),
            typed_text: String::new(),
            surface: RenderSurface::default(),
            capture: CaptureState::default(),
        }
    }
}

impl DeviceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds-checked key read. Out-of-range scancodes read as released.
    pub fn key_down(&self, scancode: u16) -> bool {
        self.keyboard.get(scancode as usize).copied().unwrap_or(false)
    }

    /// Set a key's held state. Out-of-range scancodes are ignored.
    pub fn set_key(&mut self, scancode: u16, pressed: bool) {
        if let Some(slot) = self.keyboard.get_mut(scancode as usize) {
            *slot = pressed;
        }
    }

    pub fn controller(&self, device_id: u16) -> Option<&ControllerState> {
        self.controllers.iter().find(|c| c.device_id == device_id)
    }

    /// Builder-style key press, handy for hosts and tests.
    pub fn with_key(mut self, scancode: u16) -> Self {
        self.set_key(scancode, true);
        self
    }

    pub fn with_controller(mut self, controller: ControllerState) -> Self {
        self.controllers.retain(|c| c.device_id != controller.device_id);
        self.controllers.push(controller);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::scancode;

    #[test]
    fn test_key_bounds_checked() {
        let mut snap = DeviceSnapshot::new();
        snap.set_key(scancode::SPACE, true);
        snap.set_key(9999, true);
        assert!(snap.key_down(scancode::SPACE));
        assert!(!snap.key_down(9999));
    }

    #[test]
    fn test_with_controller_replaces_same_id() {
        let snap = DeviceSnapshot::new()
            .with_controller(ControllerState::new(2).with_axis(0, 0.5))
            .with_controller(ControllerState::new(2).with_axis(0, -0.5));
        assert_eq!(snap.controllers.len(), 1);
        assert_eq!(snap.controller(2).unwrap().axes[0], -0.5);
    }
}
