//! Input Labels
//!
//! Human-readable names for bound inputs, e.g. "Keyboard Space", "Pad 1 A",
//! "Any Pad Left Stick".

use super::BindsActionType;
use crate::input::gamepad::{pad_axis_name, pad_button_name, pad_stick_name};
use crate::input::keyboard::scancode_name;
use crate::input::mouse::{MOUSE_AXIS_POSITION_X, MOUSE_AXIS_POSITION_Y, MOUSE_AXIS_WHEEL_X, MOUSE_AXIS_WHEEL_Y};
use crate::input::{
    DeviceKind, DeviceSelector, EncodedBinding, MouseButton, resolve_analog_1d, resolve_analog_2d,
    resolve_button,
};

pub fn action_type_name(ty: BindsActionType) -> &'static str {
    match ty {
        BindsActionType::Button => "Button",
        BindsActionType::Analog1D => "Axis",
        BindsActionType::Analog2D => "Stick",
    }
}

fn device_prefix(kind: DeviceKind, device: DeviceSelector) -> String {
    match (kind, device) {
        (DeviceKind::Keyboard, DeviceSelector::Any) => "Keyboard".to_string(),
        (DeviceKind::Keyboard, DeviceSelector::Id(id)) => format!("Keyboard {}", id + 1),
        (DeviceKind::Mouse, DeviceSelector::Any) => "Mouse".to_string(),
        (DeviceKind::Mouse, DeviceSelector::Id(id)) => format!("Mouse {}", id + 1),
        (DeviceKind::Gamepad, DeviceSelector::Any) => "Any Pad".to_string(),
        (DeviceKind::Gamepad, DeviceSelector::Id(id)) => format!("Pad {}", id + 1),
    }
}

fn button_name(kind: DeviceKind, code: u16) -> String {
    match kind {
        DeviceKind::Keyboard => scancode_name(code),
        DeviceKind::Mouse => MouseButton::from_mask(code)
            .map(|b| b.name().to_string())
            .unwrap_or_else(|| format!("Button {code}")),
        DeviceKind::Gamepad => pad_button_name(code)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Button {code}")),
    }
}

fn axis_name(kind: DeviceKind, axis: u16) -> String {
    match kind {
        DeviceKind::Keyboard => scancode_name(axis),
        DeviceKind::Mouse if axis == MOUSE_AXIS_WHEEL_Y => "Wheel".to_string(),
        DeviceKind::Mouse if axis == MOUSE_AXIS_WHEEL_X => "Wheel X".to_string(),
        DeviceKind::Mouse => format!("Axis {axis}"),
        DeviceKind::Gamepad => pad_axis_name(axis)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Axis {axis}")),
    }
}

fn stick_name(kind: DeviceKind, axis_x: u8, axis_y: u8) -> String {
    match kind {
        DeviceKind::Mouse if (axis_x, axis_y) == (MOUSE_AXIS_POSITION_X, MOUSE_AXIS_POSITION_Y) => {
            "Pointer".to_string()
        }
        DeviceKind::Gamepad => pad_stick_name(axis_x, axis_y)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Axes {axis_x}/{axis_y}")),
        _ => format!("Axes {axis_x}/{axis_y}"),
    }
}

/// Display label for `code` interpreted as an input of type `ty`.
pub fn binding_label(ty: BindsActionType, code: EncodedBinding) -> String {
    let label = match ty {
        BindsActionType::Button => resolve_button(code)
            .map(|d| (device_prefix(d.kind, d.device), button_name(d.kind, d.code))),
        BindsActionType::Analog1D => resolve_analog_1d(code)
            .map(|d| (device_prefix(d.kind, d.device), axis_name(d.kind, d.axis))),
        BindsActionType::Analog2D => resolve_analog_2d(code)
            .map(|d| (device_prefix(d.kind, d.device), stick_name(d.kind, d.axis_x, d.axis_y))),
    };
    match label {
        Some((device, input)) => format!("{device} {input}"),
        None => format!("Unknown ({:#x})", code.raw()),
    }
}
