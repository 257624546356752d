//! Binding Capture
//!
//! Detects the input a user just pressed or moved while a rebind prompt is
//! open, by comparing two consecutive snapshots.

use super::BindsActionType;
use crate::input::gamepad::{PAD_AXIS_COUNT, PAD_BUTTON_COUNT, pad_axis};
use crate::input::keyboard::KEYBOARD_KEY_COUNT;
use crate::input::mouse::MOUSE_AXIS_WHEEL_Y;
use crate::input::{
    DeviceKind, DeviceSelector, DeviceSnapshot, EncodedBinding, MouseButton, encode_analog_1d,
    encode_analog_2d, encode_button,
};

/// Whether captured gamepad inputs bind to the pad that produced them or to
/// any pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadScope {
    #[default]
    AnyPad,
    ThisPad,
}

impl PadScope {
    fn selector(self, device_id: u16) -> DeviceSelector {
        match self {
            PadScope::AnyPad => DeviceSelector::Any,
            PadScope::ThisPad => DeviceSelector::Id(device_id),
        }
    }
}

/// An analog input that crossed the capture threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogCapture {
    /// The single axis, usable for [`BindsActionType::Analog1D`].
    pub axis: EncodedBinding,
    /// The stick the axis belongs to, usable for [`BindsActionType::Analog2D`].
    pub stick: Option<EncodedBinding>,
}

impl AnalogCapture {
    pub fn for_type(&self, ty: BindsActionType) -> Option<EncodedBinding> {
        match ty {
            BindsActionType::Button => None,
            BindsActionType::Analog1D => Some(self.axis),
            BindsActionType::Analog2D => self.stick,
        }
    }
}

/// First key, mouse button or pad button down in `current` but not in
/// `previous`. Keyboard wins over mouse, mouse over gamepads.
pub fn first_pressed_input(
    previous: &DeviceSnapshot,
    current: &DeviceSnapshot,
    scope: PadScope,
) -> Option<EncodedBinding> {
    if !current.capture.keyboard_mouse_blocked() {
        let key = (0..KEYBOARD_KEY_COUNT as u16).find(|&k| current.key_down(k) && !previous.key_down(k));
        if let Some(code) = key {
            return Some(encode_button(DeviceKind::Keyboard, DeviceSelector::Any, code));
        }
        let button = MouseButton::ALL
            .into_iter()
            .find(|&b| current.mouse.is_pressed(b) && !previous.mouse.is_pressed(b));
        if let Some(button) = button {
            return Some(encode_button(DeviceKind::Mouse, DeviceSelector::Any, button.mask()));
        }
    }
    if current.capture.gamepad_blocked() {
        return None;
    }
    for pad in &current.controllers {
        let before = previous.controller(pad.device_id);
        let pressed = (0..PAD_BUTTON_COUNT as u16)
            .find(|&b| pad.button(b) && !before.is_some_and(|p| p.button(b)));
        if let Some(code) = pressed {
            return Some(encode_button(
                DeviceKind::Gamepad,
                scope.selector(pad.device_id),
                code,
            ));
        }
    }
    None
}

fn stick_of(axis: u8) -> Option<(u8, u8)> {
    match axis {
        pad_axis::LEFT_X | pad_axis::LEFT_Y => Some((pad_axis::LEFT_X, pad_axis::LEFT_Y)),
        pad_axis::RIGHT_X | pad_axis::RIGHT_Y => Some((pad_axis::RIGHT_X, pad_axis::RIGHT_Y)),
        _ => None,
    }
}

/// First pad axis whose magnitude crossed `threshold` between the two
/// snapshots, or the mouse wheel if it moved.
pub fn first_moved_axis(
    previous: &DeviceSnapshot,
    current: &DeviceSnapshot,
    threshold: f32,
    scope: PadScope,
) -> Option<AnalogCapture> {
    if !current.capture.gamepad_blocked() {
        for pad in &current.controllers {
            let before = previous.controller(pad.device_id);
            for axis in 0..PAD_AXIS_COUNT as u8 {
                let now = pad.axis(axis as u16).unwrap_or(0.0).abs();
                let was = before.and_then(|p| p.axis(axis as u16)).unwrap_or(0.0).abs();
                if now >= threshold && was < threshold {
                    let device = scope.selector(pad.device_id);
                    return Some(AnalogCapture {
                        axis: encode_analog_1d(DeviceKind::Gamepad, device, axis as u16),
                        stick: stick_of(axis)
                            .map(|(x, y)| encode_analog_2d(DeviceKind::Gamepad, device, x, y)),
                    });
                }
            }
        }
    }
    if !current.capture.keyboard_mouse_blocked() && current.mouse.wheel.y != 0.0 {
        return Some(AnalogCapture {
            axis: encode_analog_1d(DeviceKind::Mouse, DeviceSelector::Any, MOUSE_AXIS_WHEEL_Y),
            stick: None,
        });
    }
    None
}
