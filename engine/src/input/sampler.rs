//! Device Sampler
//!
//! Resolves an encoded binding against a device snapshot: a boolean for
//! buttons, a float or a vector for analog axes. Malformed encodings and
//! out-of-range codes always degrade to "not pressed" / zero.
//!
//! When a gamepad binding targets any device, every connected controller is
//! read and the single reading with the largest magnitude wins (sign kept).

use glam::Vec2;

use super::encoding::{DeviceKind, EncodedBinding, resolve_analog_1d, resolve_analog_2d, resolve_button};
use super::mouse::{MOUSE_AXIS_POSITION_X, MOUSE_AXIS_POSITION_Y, MOUSE_AXIS_WHEEL_X, MOUSE_AXIS_WHEEL_Y};
use super::snapshot::DeviceSnapshot;
use crate::config::InputSettings;

/// Zero `value` if it lies inside the deadzone; otherwise clamp to [-1, 1].
///
/// Readings above the threshold are passed through unscaled.
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if !value.is_finite() || value.abs() < deadzone {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Radial deadzone for a stick; length clamped to 1.
pub fn apply_radial_deadzone(value: Vec2, deadzone: f32) -> Vec2 {
    if !value.is_finite() || value.length() < deadzone {
        Vec2::ZERO
    } else {
        value.clamp_length_max(1.0)
    }
}

/// Reads bindings out of one snapshot.
pub struct DeviceSampler<'a> {
    snapshot: &'a DeviceSnapshot,
    settings: &'a InputSettings,
}

impl<'a> DeviceSampler<'a> {
    pub fn new(snapshot: &'a DeviceSnapshot, settings: &'a InputSettings) -> Self {
        Self { snapshot, settings }
    }

    pub fn snapshot(&self) -> &DeviceSnapshot {
        self.snapshot
    }

    pub fn settings(&self) -> &InputSettings {
        self.settings
    }

    fn kind_blocked(&self, kind: DeviceKind) -> bool {
        let capture = &self.snapshot.capture;
        match kind {
            DeviceKind::Keyboard | DeviceKind::Mouse => capture.keyboard_mouse_blocked(),
            DeviceKind::Gamepad => capture.gamepad_blocked(),
        }
    }

    /// True if the bound key/button is held on any matching device.
    pub fn button_is_down(&self, encoded: EncodedBinding) -> bool {
        let Some(decoded) = resolve_button(encoded) else {
            return false;
        };
        if self.kind_blocked(decoded.kind) {
            return false;
        }
        match decoded.kind {
            DeviceKind::Keyboard => self.snapshot.key_down(decoded.code),
            DeviceKind::Mouse => self.snapshot.mouse.any_in_mask(decoded.code),
            DeviceKind::Gamepad => self
                .snapshot
                .controllers
                .iter()
                .filter(|c| decoded.device.matches(c.device_id))
                .any(|c| c.button(decoded.code)),
        }
    }

    /// Read a 1D axis binding.
    ///
    /// Keyboard and mouse-button bindings read 1.0 while held. Mouse axis 0
    /// is the vertical wheel, axis 1 the horizontal wheel.
    pub fn sample_axis_1d(&self, encoded: EncodedBinding) -> f32 {
        let Some(decoded) = resolve_analog_1d(encoded) else {
            return 0.0;
        };
        if self.kind_blocked(decoded.kind) {
            return 0.0;
        }
        match decoded.kind {
            DeviceKind::Keyboard => {
                if self.snapshot.key_down(decoded.axis) {
                    1.0
                } else {
                    0.0
                }
            }
            DeviceKind::Mouse => {
                let wheel = self.snapshot.mouse.wheel;
                let raw = match decoded.axis {
                    MOUSE_AXIS_WHEEL_Y => wheel.y,
                    MOUSE_AXIS_WHEEL_X => wheel.x,
                    _ => return 0.0,
                };
                (raw * self.settings.wheel_scale).clamp(-1.0, 1.0)
            }
            DeviceKind::Gamepad => {
                let deadzone = self.settings.deadzone_for_axis(decoded.axis as usize);
                let mut best = 0.0f32;
                for controller in &self.snapshot.controllers {
                    if !decoded.device.matches(controller.device_id) {
                        continue;
                    }
                    let Some(raw) = controller.axis(decoded.axis) else {
                        continue;
                    };
                    let value = apply_deadzone(raw, deadzone);
                    if value.abs() > best.abs() {
                        best = value;
                    }
                }
                best
            }
        }
    }

    /// Read a 2D axis binding.
    ///
    /// The mouse position pair reads the cursor's normalized position within
    /// the render surface (0..1 on both axes).
    pub fn sample_axis_2d(&self, encoded: EncodedBinding) -> Vec2 {
        let Some(decoded) = resolve_analog_2d(encoded) else {
            return Vec2::ZERO;
        };
        if self.kind_blocked(decoded.kind) {
            return Vec2::ZERO;
        }
        match decoded.kind {
            DeviceKind::Keyboard => Vec2::ZERO,
            DeviceKind::Mouse => {
                if (decoded.axis_x, decoded.axis_y) != (MOUSE_AXIS_POSITION_X, MOUSE_AXIS_POSITION_Y)
                    || !self.snapshot.mouse.in_window
                {
                    return Vec2::ZERO;
                }
                self.snapshot
                    .surface
                    .normalized_position(self.snapshot.mouse.position)
            }
            DeviceKind::Gamepad => {
                let deadzone = self.settings.stick_deadzone;
                let mut best = Vec2::ZERO;
                for controller in &self.snapshot.controllers {
                    if !decoded.device.matches(controller.device_id) {
                        continue;
                    }
                    let (Some(x), Some(y)) = (
                        controller.axis(decoded.axis_x as u16),
                        controller.axis(decoded.axis_y as u16),
                    ) else {
                        continue;
                    };
                    let value = apply_radial_deadzone(Vec2::new(x, y), deadzone);
                    if value.length_squared() > best.length_squared() {
                        best = value;
                    }
                }
                best
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::encoding::{
        DeviceSelector, encode_analog_1d, encode_analog_2d, encode_button,
    };
    use crate::input::gamepad::{ControllerState, pad_axis, pad_button};
    use crate::input::keyboard::scancode;
    use crate::input::mouse::{MouseButton, ScrollDelta};

    fn settings() -> InputSettings {
        InputSettings::default()
    }

    fn left_x_any() -> EncodedBinding {
        encode_analog_1d(DeviceKind::Gamepad, DeviceSelector::Any, pad_axis::LEFT_X as u16)
    }

    #[test]
    fn test_keyboard_button() {
        let snap = DeviceSnapshot::new().with_key(scancode::W);
        let s = settings();
        let sampler = DeviceSampler::new(&snap, &s);
        assert!(sampler.button_is_down(encode_button(DeviceKind::Keyboard, DeviceSelector::Any, scancode::W)));
        assert!(!sampler.button_is_down(encode_button(DeviceKind::Keyboard, DeviceSelector::Any, scancode::S)));
        assert!(!sampler.button_is_down(encode_button(DeviceKind::Keyboard, DeviceSelector::Any, 9000)));
    }

    #[test]
    fn test_mouse_button_mask() {
        let mut snap = DeviceSnapshot::new();
        snap.mouse.set_button(MouseButton::Right, true);
        let s = settings();
        let sampler = DeviceSampler::new(&snap, &s);
        let right = encode_button(DeviceKind::Mouse, DeviceSelector::Any, MouseButton::Right.mask());
        let left = encode_button(DeviceKind::Mouse, DeviceSelector::Any, MouseButton::Left.mask());
        assert!(sampler.button_is_down(right));
        assert!(!sampler.button_is_down(left));
    }

    #[test]
    fn test_gamepad_button_device_filter() {
        let snap = DeviceSnapshot::new()
            .with_controller(ControllerState::new(0))
            .with_controller(ControllerState::new(1).with_button(pad_button::A, true));
        let s = settings();
        let sampler = DeviceSampler::new(&snap, &s);
        assert!(sampler.button_is_down(encode_button(DeviceKind::Gamepad, DeviceSelector::Any, pad_button::A)));
        assert!(sampler.button_is_down(encode_button(DeviceKind::Gamepad, DeviceSelector::Id(1), pad_button::A)));
        assert!(!sampler.button_is_down(encode_button(DeviceKind::Gamepad, DeviceSelector::Id(0), pad_button::A)));
    }

    #[test]
    fn test_largest_magnitude_wins() {
        let snap = DeviceSnapshot::new()
            .with_controller(ControllerState::new(0).with_axis(pad_axis::LEFT_X, 0.3))
            .with_controller(ControllerState::new(1).with_axis(pad_axis::LEFT_X, 0.7));
        let s = settings();
        assert_eq!(DeviceSampler::new(&snap, &s).sample_axis_1d(left_x_any()), 0.7);
    }

    #[test]
    fn test_largest_magnitude_keeps_sign() {
        let snap = DeviceSnapshot::new()
            .with_controller(ControllerState::new(0).with_axis(pad_axis::LEFT_X, 0.5))
            .with_controller(ControllerState::new(1).with_axis(pad_axis::LEFT_X, -0.8));
        let s = settings();
        assert_eq!(DeviceSampler::new(&snap, &s).sample_axis_1d(left_x_any()), -0.8);
    }

    #[test]
    fn test_deadzone_zeroes_small_readings() {
        let snap = DeviceSnapshot::new()
            .with_controller(ControllerState::new(0).with_axis(pad_axis::LEFT_X, 0.1));
        let s = settings();
        assert_eq!(DeviceSampler::new(&snap, &s).sample_axis_1d(left_x_any()), 0.0);
    }

    #[test]
    fn test_stick_2d_picks_longest_vector() {
        let snap = DeviceSnapshot::new()
            .with_controller(
                ControllerState::new(0)
                    .with_axis(pad_axis::LEFT_X, 0.6)
                    .with_axis(pad_axis::LEFT_Y, 0.0),
            )
            .with_controller(
                ControllerState::new(1)
                    .with_axis(pad_axis::LEFT_X, -0.5)
                    .with_axis(pad_axis::LEFT_Y, 0.5),
            );
        let s = settings();
        let enc = encode_analog_2d(DeviceKind::Gamepad, DeviceSelector::Any, pad_axis::LEFT_X, pad_axis::LEFT_Y);
        assert_eq!(DeviceSampler::new(&snap, &s).sample_axis_2d(enc), Vec2::new(-0.5, 0.5));
    }

    #[test]
    fn test_out_of_range_axis_is_zero() {
        let snap = DeviceSnapshot::new()
            .with_controller(ControllerState::new(0).with_axis(pad_axis::LEFT_X, 1.0));
        let s = settings();
        let sampler = DeviceSampler::new(&snap, &s);
        assert_eq!(sampler.sample_axis_1d(encode_analog_1d(DeviceKind::Gamepad, DeviceSelector::Any, 40)), 0.0);
        let enc = encode_analog_2d(DeviceKind::Gamepad, DeviceSelector::Any, 0, 200);
        assert_eq!(sampler.sample_axis_2d(enc), Vec2::ZERO);
    }

    #[test]
    fn test_wheel_scaled_and_clamped() {
        let mut snap = DeviceSnapshot::new();
        snap.mouse.wheel = ScrollDelta::from_lines(0.0, 3.0);
        let s = settings();
        let enc = encode_analog_1d(DeviceKind::Mouse, DeviceSelector::Any, MOUSE_AXIS_WHEEL_Y);
        assert_eq!(DeviceSampler::new(&snap, &s).sample_axis_1d(enc), 1.0);
    }

    #[test]
    fn test_overlay_gates_keyboard_and_mouse_only() {
        let mut snap = DeviceSnapshot::new()
            .with_key(scancode::SPACE)
            .with_controller(ControllerState::new(0).with_button(pad_button::A, true));
        snap.mouse.set_button(MouseButton::Left, true);
        snap.capture.overlay_captures_input = true;
        let s = settings();
        let sampler = DeviceSampler::new(&snap, &s);
        assert!(!sampler.button_is_down(encode_button(DeviceKind::Keyboard, DeviceSelector::Any, scancode::SPACE)));
        assert!(!sampler.button_is_down(encode_button(DeviceKind::Mouse, DeviceSelector::Any, MouseButton::Left.mask())));
        assert!(sampler.button_is_down(encode_button(DeviceKind::Gamepad, DeviceSelector::Any, pad_button::A)));
    }

    #[test]
    fn test_editor_gates_gamepad() {
        let mut snap = DeviceSnapshot::new()
            .with_controller(ControllerState::new(0).with_button(pad_button::A, true));
        snap.capture.editor_active = true;
        let s = settings();
        let sampler = DeviceSampler::new(&snap, &s);
        assert!(!sampler.button_is_down(encode_button(DeviceKind::Gamepad, DeviceSelector::Any, pad_button::A)));
    }

    #[test]
    fn test_legacy_binding_resolves() {
        let snap = DeviceSnapshot::new().with_key(scancode::UP);
        let s = settings();
        // Legacy id 1 is the up arrow.
        assert!(DeviceSampler::new(&snap, &s).button_is_down(EncodedBinding::from_raw(1)));
    }

    #[test]
    fn test_garbage_encoding_is_neutral() {
        let snap = DeviceSnapshot::new().with_key(scancode::UP);
        let s = settings();
        let sampler = DeviceSampler::new(&snap, &s);
        let garbage = EncodedBinding::from_raw(u32::MAX);
        assert!(!sampler.button_is_down(garbage));
        assert_eq!(sampler.sample_axis_1d(garbage), 0.0);
        assert_eq!(sampler.sample_axis_2d(garbage), Vec2::ZERO);
    }
}
