//! Legacy Binding Table
//!
//! Before the extended encoding, bindings were stored as small enum ids whose
//! meaning depended on the action type. These tables map every id that was
//! ever written to disk onto a (kind, code) pair so old profiles keep working.
//! Legacy ids always mean "any device of that kind".
//!
//! New bindings are always written through the extended encoding.

use super::encoding::{
    DecodedAxis, DecodedAxisPair, DecodedButton, DeviceKind, DeviceSelector, LEGACY_ID_LIMIT,
};
use super::gamepad::{pad_axis, pad_button};
use super::keyboard::scancode;
use super::mouse::{MOUSE_AXIS_POSITION_X, MOUSE_AXIS_POSITION_Y, MOUSE_AXIS_WHEEL_Y, MouseButton};

/// A legacy button id and what it refers to.
#[derive(Debug, Clone, Copy)]
pub struct LegacyButton {
    pub id: u32,
    pub name: &'static str,
    pub kind: DeviceKind,
    pub code: u16,
}

/// A legacy 1D axis id.
#[derive(Debug, Clone, Copy)]
pub struct LegacyAxis {
    pub id: u32,
    pub name: &'static str,
    pub kind: DeviceKind,
    pub axis: u16,
}

/// A legacy 2D axis id.
#[derive(Debug, Clone, Copy)]
pub struct LegacyAxisPair {
    pub id: u32,
    pub name: &'static str,
    pub kind: DeviceKind,
    pub axis_x: u8,
    pub axis_y: u8,
}

const fn key(id: u32, name: &'static str, code: u16) -> LegacyButton {
    LegacyButton { id, name, kind: DeviceKind::Keyboard, code }
}

const fn mouse(id: u32, name: &'static str, button: MouseButton) -> LegacyButton {
    LegacyButton { id, name, kind: DeviceKind::Mouse, code: button.mask() }
}

const fn pad(id: u32, name: &'static str, code: u16) -> LegacyButton {
    LegacyButton { id, name, kind: DeviceKind::Gamepad, code }
}

pub const LEGACY_BUTTONS: &[LegacyButton] = &[
    key(1, "KEY_UP", scancode::UP),
    key(2, "KEY_DOWN", scancode::DOWN),
    key(3, "KEY_LEFT", scancode::LEFT),
    key(4, "KEY_RIGHT", scancode::RIGHT),
    key(5, "KEY_ENTER", scancode::RETURN),
    key(6, "KEY_ESCAPE", scancode::ESCAPE),
    key(7, "KEY_SPACE", scancode::SPACE),
    key(8, "KEY_TAB", scancode::TAB),
    key(9, "KEY_BACKSPACE", scancode::BACKSPACE),
    key(10, "KEY_W", scancode::W),
    key(11, "KEY_A", scancode::A),
    key(12, "KEY_S", scancode::S),
    key(13, "KEY_D", scancode::D),
    key(14, "KEY_E", scancode::E),
    key(15, "KEY_Q", scancode::Q),
    key(16, "KEY_R", scancode::R),
    key(17, "KEY_F", scancode::F),
    key(18, "KEY_LSHIFT", scancode::LEFT_SHIFT),
    key(19, "KEY_LCTRL", scancode::LEFT_CTRL),
    key(20, "KEY_LALT", scancode::LEFT_ALT),
    key(21, "KEY_PAGEUP", scancode::PAGE_UP),
    key(22, "KEY_PAGEDOWN", scancode::PAGE_DOWN),
    mouse(32, "MOUSE_LEFT", MouseButton::Left),
    mouse(33, "MOUSE_RIGHT", MouseButton::Right),
    mouse(34, "MOUSE_MIDDLE", MouseButton::Middle),
    mouse(35, "MOUSE_X1", MouseButton::X1),
    mouse(36, "MOUSE_X2", MouseButton::X2),
    pad(64, "PAD_A", pad_button::A),
    pad(65, "PAD_B", pad_button::B),
    pad(66, "PAD_X", pad_button::X),
    pad(67, "PAD_Y", pad_button::Y),
    pad(68, "PAD_BACK", pad_button::BACK),
    pad(69, "PAD_GUIDE", pad_button::GUIDE),
    pad(70, "PAD_START", pad_button::START),
    pad(71, "PAD_LSTICK", pad_button::LEFT_STICK),
    pad(72, "PAD_RSTICK", pad_button::RIGHT_STICK),
    pad(73, "PAD_LSHOULDER", pad_button::LEFT_SHOULDER),
    pad(74, "PAD_RSHOULDER", pad_button::RIGHT_SHOULDER),
    pad(75, "PAD_DPAD_UP", pad_button::DPAD_UP),
    pad(76, "PAD_DPAD_DOWN", pad_button::DPAD_DOWN),
    pad(77, "PAD_DPAD_LEFT", pad_button::DPAD_LEFT),
    pad(78, "PAD_DPAD_RIGHT", pad_button::DPAD_RIGHT),
];

pub const LEGACY_AXES_1D: &[LegacyAxis] = &[
    LegacyAxis { id: 1, name: "PAD_LEFT_X", kind: DeviceKind::Gamepad, axis: pad_axis::LEFT_X as u16 },
    LegacyAxis { id: 2, name: "PAD_LEFT_Y", kind: DeviceKind::Gamepad, axis: pad_axis::LEFT_Y as u16 },
    LegacyAxis { id: 3, name: "PAD_RIGHT_X", kind: DeviceKind::Gamepad, axis: pad_axis::RIGHT_X as u16 },
    LegacyAxis { id: 4, name: "PAD_RIGHT_Y", kind: DeviceKind::Gamepad, axis: pad_axis::RIGHT_Y as u16 },
    LegacyAxis { id: 5, name: "PAD_TRIGGER_L", kind: DeviceKind::Gamepad, axis: pad_axis::TRIGGER_LEFT as u16 },
    LegacyAxis { id: 6, name: "PAD_TRIGGER_R", kind: DeviceKind::Gamepad, axis: pad_axis::TRIGGER_RIGHT as u16 },
    LegacyAxis { id: 16, name: "MOUSE_WHEEL", kind: DeviceKind::Mouse, axis: MOUSE_AXIS_WHEEL_Y },
];

pub const LEGACY_AXES_2D: &[LegacyAxisPair] = &[
    LegacyAxisPair {
        id: 1,
        name: "PAD_LEFT_STICK",
        kind: DeviceKind::Gamepad,
        axis_x: pad_axis::LEFT_X,
        axis_y: pad_axis::LEFT_Y,
    },
    LegacyAxisPair {
        id: 2,
        name: "PAD_RIGHT_STICK",
        kind: DeviceKind::Gamepad,
        axis_x: pad_axis::RIGHT_X,
        axis_y: pad_axis::RIGHT_Y,
    },
    LegacyAxisPair {
        id: 16,
        name: "MOUSE_POSITION",
        kind: DeviceKind::Mouse,
        axis_x: MOUSE_AXIS_POSITION_X,
        axis_y: MOUSE_AXIS_POSITION_Y,
    },
];

pub fn lookup_button(id: u32) -> Option<DecodedButton> {
    if id >= LEGACY_ID_LIMIT {
        return None;
    }
    LEGACY_BUTTONS.iter().find(|e| e.id == id).map(|e| DecodedButton {
        kind: e.kind,
        device: DeviceSelector::Any,
        code: e.code,
    })
}

pub fn lookup_axis_1d(id: u32) -> Option<DecodedAxis> {
    if id >= LEGACY_ID_LIMIT {
        return None;
    }
    LEGACY_AXES_1D.iter().find(|e| e.id == id).map(|e| DecodedAxis {
        kind: e.kind,
        device: DeviceSelector::Any,
        axis: e.axis,
    })
}

pub fn lookup_axis_2d(id: u32) -> Option<DecodedAxisPair> {
    if id >= LEGACY_ID_LIMIT {
        return None;
    }
    LEGACY_AXES_2D.iter().find(|e| e.id == id).map(|e| DecodedAxisPair {
        kind: e.kind,
        device: DeviceSelector::Any,
        axis_x: e.axis_x,
        axis_y: e.axis_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::encoding::{EncodedBinding, decode_analog_1d, decode_analog_2d, decode_button};

    #[test]
    fn test_legacy_ids_never_look_extended() {
        for e in LEGACY_BUTTONS {
            assert!(decode_button(EncodedBinding::from_raw(e.id)).is_none(), "{}", e.name);
        }
        for e in LEGACY_AXES_1D {
            assert!(decode_analog_1d(EncodedBinding::from_raw(e.id)).is_none(), "{}", e.name);
        }
        for e in LEGACY_AXES_2D {
            assert!(decode_analog_2d(EncodedBinding::from_raw(e.id)).is_none(), "{}", e.name);
        }
    }

    #[test]
    fn test_legacy_ids_unique_per_table() {
        let mut ids: Vec<u32> = LEGACY_BUTTONS.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), LEGACY_BUTTONS.len());
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let d = lookup_button(65).unwrap();
        assert_eq!(d.kind, DeviceKind::Gamepad);
        assert_eq!(d.code, pad_button::B);
        assert_eq!(d.device, DeviceSelector::Any);
        assert!(lookup_button(0).is_none());
        assert!(lookup_button(999).is_none());
        assert!(lookup_axis_2d(3).is_none());
    }
}
