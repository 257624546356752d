//! Bundled Profile
//!
//! Menu navigation bindings every profile starts from. Hosts add their
//! gameplay actions on top before handing the profile to
//! [`BindingProfiles::open`](super::BindingProfiles::open).

use super::profile::{BindSlot, BindingProfile};
use super::{ActionId, BindsActionType};
use crate::input::{
    DeviceKind, DeviceSelector, EncodedBinding, encode_analog_2d, encode_button, pad_axis,
    pad_button, scancode,
};

pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Action ids the menu engine reads. Button ids 0..16 and the first 2D id
/// are reserved for menus; gameplay ids start above them.
pub mod menu_action {
    use super::ActionId;

    pub const UP: ActionId = ActionId(0);
    pub const DOWN: ActionId = ActionId(1);
    pub const LEFT: ActionId = ActionId(2);
    pub const RIGHT: ActionId = ActionId(3);
    pub const SELECT: ActionId = ActionId(4);
    pub const BACK: ActionId = ActionId(5);
    pub const PAGE_PREV: ActionId = ActionId(6);
    pub const PAGE_NEXT: ActionId = ActionId(7);
    /// Set the focused slider to its first..fourth quick value.
    pub const QUICK_VALUES: [ActionId; 4] = [ActionId(8), ActionId(9), ActionId(10), ActionId(11)];
    /// 2D action folded into up/down/left/right.
    pub const NAVIGATE: ActionId = ActionId(0);

    /// First button id free for gameplay.
    pub const FIRST_GAMEPLAY: u16 = 16;
}

fn key(code: u16) -> EncodedBinding {
    encode_button(DeviceKind::Keyboard, DeviceSelector::Any, code)
}

fn pad(code: u16) -> EncodedBinding {
    encode_button(DeviceKind::Gamepad, DeviceSelector::Any, code)
}

/// The read-only profile with menu navigation on keyboard and any gamepad.
pub fn default_profile() -> BindingProfile {
    let mut profile = BindingProfile::new(DEFAULT_PROFILE_NAME);
    profile.read_only = true;

    let buttons: [(ActionId, &[EncodedBinding]); 8] = [
        (menu_action::UP, &[key(scancode::UP), pad(pad_button::DPAD_UP)]),
        (menu_action::DOWN, &[key(scancode::DOWN), pad(pad_button::DPAD_DOWN)]),
        (menu_action::LEFT, &[key(scancode::LEFT), pad(pad_button::DPAD_LEFT)]),
        (menu_action::RIGHT, &[key(scancode::RIGHT), pad(pad_button::DPAD_RIGHT)]),
        (
            menu_action::SELECT,
            &[key(scancode::RETURN), key(scancode::KP_ENTER), pad(pad_button::A)],
        ),
        (menu_action::BACK, &[key(scancode::ESCAPE), pad(pad_button::B)]),
        (
            menu_action::PAGE_PREV,
            &[key(scancode::PAGE_UP), pad(pad_button::LEFT_SHOULDER)],
        ),
        (
            menu_action::PAGE_NEXT,
            &[key(scancode::PAGE_DOWN), pad(pad_button::RIGHT_SHOULDER)],
        ),
    ];
    for (action, codes) in buttons {
        for &code in codes {
            profile.set_binding(BindsActionType::Button, action, code, BindSlot::Append);
        }
    }

    let digits = [scancode::DIGIT1, scancode::DIGIT2, scancode::DIGIT3, scancode::DIGIT4];
    for (action, digit) in menu_action::QUICK_VALUES.into_iter().zip(digits) {
        profile.set_binding(BindsActionType::Button, action, key(digit), BindSlot::Append);
    }

    let stick = encode_analog_2d(
        DeviceKind::Gamepad,
        DeviceSelector::Any,
        pad_axis::LEFT_X,
        pad_axis::LEFT_Y,
    );
    profile.set_binding(BindsActionType::Analog2D, menu_action::NAVIGATE, stick, BindSlot::Append);
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_read_only_and_complete() {
        let p = default_profile();
        assert!(p.read_only);
        for id in 0..8 {
            assert!(
                p.codes_for(BindsActionType::Button, ActionId(id)).count() >= 2,
                "menu action {id} underbound"
            );
        }
        assert_eq!(p.analog_2d.len(), 1);
        assert!(p.buttons.iter().all(|b| b.code.is_extended()));
    }
}
