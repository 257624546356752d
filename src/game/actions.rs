//! Gameplay Actions
//!
//! Logical actions the game reads through the active binding profile, and
//! the bundled profile that maps them.
//!
//! Default bindings:
//! - W/S/A/D = move forward/back/left/right
//! - Left Shift = sprint, Space = jump, Left Ctrl = crouch
//! - E = interact, V = camera toggle
//! - Left stick = move, right stick = look, mouse wheel = zoom

use crate::binds::defaults::menu_action;
use crate::binds::{ActionId, BindSlot, BindingProfile, BindsActionType, default_profile};
use crate::input::mouse::MOUSE_AXIS_WHEEL_Y;
use crate::input::{
    DeviceKind, DeviceSelector, EncodedBinding, encode_analog_1d, encode_analog_2d, encode_button,
    pad_axis, pad_button, scancode,
};

/// Button actions.
pub mod button {
    use super::{ActionId, menu_action::FIRST_GAMEPLAY};

    pub const MOVE_FORWARD: ActionId = ActionId(FIRST_GAMEPLAY);
    pub const MOVE_BACK: ActionId = ActionId(FIRST_GAMEPLAY + 1);
    pub const MOVE_LEFT: ActionId = ActionId(FIRST_GAMEPLAY + 2);
    pub const MOVE_RIGHT: ActionId = ActionId(FIRST_GAMEPLAY + 3);
    pub const SPRINT: ActionId = ActionId(FIRST_GAMEPLAY + 4);
    pub const JUMP: ActionId = ActionId(FIRST_GAMEPLAY + 5);
    pub const CROUCH: ActionId = ActionId(FIRST_GAMEPLAY + 6);
    pub const INTERACT: ActionId = ActionId(FIRST_GAMEPLAY + 7);
    pub const CAMERA_TOGGLE: ActionId = ActionId(FIRST_GAMEPLAY + 8);
}

/// Single-axis actions.
pub mod axis {
    use super::ActionId;

    pub const ZOOM: ActionId = ActionId(0);
}

/// Two-axis actions. Id 0 is the menu's navigate stick.
pub mod stick {
    use super::ActionId;

    pub const MOVE: ActionId = ActionId(1);
    pub const LOOK: ActionId = ActionId(2);
}

/// A rebindable action as listed on the bindings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionInfo {
    pub ty: BindsActionType,
    pub id: ActionId,
    pub name: &'static str,
}

const fn info(ty: BindsActionType, id: ActionId, name: &'static str) -> ActionInfo {
    ActionInfo { ty, id, name }
}

/// Every rebindable action, menu navigation included.
pub const ACTIONS: &[ActionInfo] = &[
    info(BindsActionType::Button, button::MOVE_FORWARD, "Move Forward"),
    info(BindsActionType::Button, button::MOVE_BACK, "Move Back"),
    info(BindsActionType::Button, button::MOVE_LEFT, "Move Left"),
    info(BindsActionType::Button, button::MOVE_RIGHT, "Move Right"),
    info(BindsActionType::Button, button::SPRINT, "Sprint"),
    info(BindsActionType::Button, button::JUMP, "Jump"),
    info(BindsActionType::Button, button::CROUCH, "Crouch"),
    info(BindsActionType::Button, button::INTERACT, "Interact"),
    info(BindsActionType::Button, button::CAMERA_TOGGLE, "Camera Toggle"),
    info(BindsActionType::Button, menu_action::UP, "Menu Up"),
    info(BindsActionType::Button, menu_action::DOWN, "Menu Down"),
    info(BindsActionType::Button, menu_action::LEFT, "Menu Left"),
    info(BindsActionType::Button, menu_action::RIGHT, "Menu Right"),
    info(BindsActionType::Button, menu_action::SELECT, "Menu Select"),
    info(BindsActionType::Button, menu_action::BACK, "Menu Back"),
    info(BindsActionType::Button, menu_action::PAGE_PREV, "Previous Page"),
    info(BindsActionType::Button, menu_action::PAGE_NEXT, "Next Page"),
    info(BindsActionType::Analog1D, axis::ZOOM, "Zoom"),
    info(BindsActionType::Analog2D, menu_action::NAVIGATE, "Menu Navigate"),
    info(BindsActionType::Analog2D, stick::MOVE, "Move"),
    info(BindsActionType::Analog2D, stick::LOOK, "Look"),
];

/// Rebindable actions of one type, in listing order.
pub fn actions_of(ty: BindsActionType) -> impl Iterator<Item = &'static ActionInfo> {
    ACTIONS.iter().filter(move |a| a.ty == ty)
}

fn key(code: u16) -> EncodedBinding {
    encode_button(DeviceKind::Keyboard, DeviceSelector::Any, code)
}

/// Menu navigation plus the gameplay defaults above.
pub fn bundled_profile() -> BindingProfile {
    let mut profile = default_profile();

    let keys = [
        (button::MOVE_FORWARD, scancode::W),
        (button::MOVE_BACK, scancode::S),
        (button::MOVE_LEFT, scancode::A),
        (button::MOVE_RIGHT, scancode::D),
        (button::SPRINT, scancode::LEFT_SHIFT),
        (button::JUMP, scancode::SPACE),
        (button::CROUCH, scancode::LEFT_CTRL),
        (button::INTERACT, scancode::E),
        (button::CAMERA_TOGGLE, scancode::V),
    ];
    for (action, code) in keys {
        profile.set_binding(BindsActionType::Button, action, key(code), BindSlot::Append);
    }
    let pad_jump = encode_button(DeviceKind::Gamepad, DeviceSelector::Any, pad_button::A);
    profile.set_binding(BindsActionType::Button, button::JUMP, pad_jump, BindSlot::Append);

    let wheel = encode_analog_1d(DeviceKind::Mouse, DeviceSelector::Any, MOUSE_AXIS_WHEEL_Y);
    profile.set_binding(BindsActionType::Analog1D, axis::ZOOM, wheel, BindSlot::Append);

    let sticks = [
        (stick::MOVE, pad_axis::LEFT_X, pad_axis::LEFT_Y),
        (stick::LOOK, pad_axis::RIGHT_X, pad_axis::RIGHT_Y),
    ];
    for (action, x, y) in sticks {
        let code = encode_analog_2d(DeviceKind::Gamepad, DeviceSelector::Any, x, y);
        profile.set_binding(BindsActionType::Analog2D, action, code, BindSlot::Append);
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_gameplay_action_is_bound() {
        let profile = bundled_profile();
        assert!(profile.read_only);
        for action in ACTIONS {
            assert!(
                profile.codes_for(action.ty, action.id).next().is_some(),
                "{} has no default binding",
                action.name
            );
        }
    }

    #[test]
    fn test_actions_of_filters_by_type() {
        assert_eq!(actions_of(BindsActionType::Analog2D).count(), 3);
        assert!(actions_of(BindsActionType::Analog1D).all(|a| a.ty == BindsActionType::Analog1D));
    }
}
