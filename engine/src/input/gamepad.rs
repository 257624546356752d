//! Gamepad Input Module
//!
//! Standard-layout controller button and axis ids, plus the per-controller
//! state carried in a device snapshot. Ids follow the common "game controller"
//! layout (A/B/X/Y face buttons, two sticks, two analog triggers).

/// Number of axes stored per controller.
pub const PAD_AXIS_COUNT: usize = 6;
/// Number of buttons stored per controller.
pub const PAD_BUTTON_COUNT: usize = 21;

pub mod pad_button {
    pub const A: u16 = 0;
    pub const B: u16 = 1;
    pub const X: u16 = 2;
    pub const Y: u16 = 3;
    pub const BACK: u16 = 4;
    pub const GUIDE: u16 = 5;
    pub const START: u16 = 6;
    pub const LEFT_STICK: u16 = 7;
    pub const RIGHT_STICK: u16 = 8;
    pub const LEFT_SHOULDER: u16 = 9;
    pub const RIGHT_SHOULDER: u16 = 10;
    pub const DPAD_UP: u16 = 11;
    pub const DPAD_DOWN: u16 = 12;
    pub const DPAD_LEFT: u16 = 13;
    pub const DPAD_RIGHT: u16 = 14;
    pub const MISC1: u16 = 15;
    pub const PADDLE1: u16 = 16;
    pub const PADDLE2: u16 = 17;
    pub const PADDLE3: u16 = 18;
    pub const PADDLE4: u16 = 19;
    pub const TOUCHPAD: u16 = 20;
}

pub mod pad_axis {
    pub const LEFT_X: u8 = 0;
    pub const LEFT_Y: u8 = 1;
    pub const RIGHT_X: u8 = 2;
    pub const RIGHT_Y: u8 = 3;
    pub const TRIGGER_LEFT: u8 = 4;
    pub const TRIGGER_RIGHT: u8 = 5;
}

const BUTTON_NAMES: [&str; PAD_BUTTON_COUNT] = [
    "A",
    "B",
    "X",
    "Y",
    "Back",
    "Guide",
    "Start",
    "Left Stick",
    "Right Stick",
    "Left Shoulder",
    "Right Shoulder",
    "D-Pad Up",
    "D-Pad Down",
    "D-Pad Left",
    "D-Pad Right",
    "Misc",
    "Paddle 1",
    "Paddle 2",
    "Paddle 3",
    "Paddle 4",
    "Touchpad",
];

const AXIS_NAMES: [&str; PAD_AXIS_COUNT] = [
    "Left Stick X",
    "Left Stick Y",
    "Right Stick X",
    "Right Stick Y",
    "Left Trigger",
    "Right Trigger",
];

pub fn pad_button_name(button: u16) -> Option<&'static str> {
    BUTTON_NAMES.get(button as usize).copied()
}

pub fn pad_axis_name(axis: u16) -> Option<&'static str> {
    AXIS_NAMES.get(axis as usize).copied()
}

/// Name of a stick given its axis pair, e.g. `(0, 1)` is the left stick.
pub fn pad_stick_name(axis_x: u8, axis_y: u8) -> Option<&'static str> {
    match (axis_x, axis_y) {
        (pad_axis::LEFT_X, pad_axis::LEFT_Y) => Some("Left Stick"),
        (pad_axis::RIGHT_X, pad_axis::RIGHT_Y) => Some("Right Stick"),
        (pad_axis::TRIGGER_LEFT, pad_axis::TRIGGER_RIGHT) => Some("Triggers"),
        _ => None,
    }
}

/// State of one connected controller for one frame.
///
/// Axis values are normalized by the platform layer: sticks in [-1, 1],
/// triggers in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Instance id of the controller (stable while it stays connected).
    pub device_id: u16,
    pub axes: [f32; PAD_AXIS_COUNT],
    pub buttons: [bool; PAD_BUTTON_COUNT],
}

impl ControllerState {
    /// A connected controller with everything at rest.
    pub fn new(device_id: u16) -> Self {
        Self {
            device_id,
            axes: [0.0; PAD_AXIS_COUNT],
            buttons: [false; PAD_BUTTON_COUNT],
        }
    }

    /// Bounds-checked button read.
    pub fn button(&self, button: u16) -> bool {
        self.buttons.get(button as usize).copied().unwrap_or(false)
    }

    /// Bounds-checked axis read.
    pub fn axis(&self, axis: u16) -> Option<f32> {
        self.axes.get(axis as usize).copied()
    }

    pub fn with_button(mut self, button: u16, pressed: bool) -> Self {
        if let Some(slot) = self.buttons.get_mut(button as usize) {
            *slot = pressed;
        }
        self
    }

    pub fn with_axis(mut self, axis: u8, value: f32) -> Self {
        if let Some(slot) = self.axes.get_mut(axis as usize) {
            *slot = value;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_reads_are_neutral() {
        let pad = ControllerState::new(0).with_button(pad_button::A, true);
        assert!(pad.button(pad_button::A));
        assert!(!pad.button(500));
        assert_eq!(pad.axis(99), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(pad_button_name(pad_button::DPAD_LEFT), Some("D-Pad Left"));
        assert_eq!(pad_axis_name(pad_axis::TRIGGER_RIGHT as u16), Some("Right Trigger"));
        assert_eq!(pad_stick_name(2, 3), Some("Right Stick"));
        assert_eq!(pad_stick_name(0, 3), None);
    }

    #[test]
    fn test_with_axis_ignores_bad_index() {
        let pad = ControllerState::new(1).with_axis(9, 1.0);
        assert_eq!(pad.axes, [0.0; PAD_AXIS_COUNT]);
    }
}
