//! Menu Input
//!
//! Folds a device snapshot and the active binding profile into the small set
//! of held inputs the interaction engine consumes. Edge detection and key
//! repeat happen in the runtime, not here.

use glam::Vec2;

use crate::binds::defaults::menu_action;
use crate::binds::{ActionId, BindingProfile, action_axis_2d, action_down};
use crate::config::InputSettings;
use crate::input::{DeviceSampler, DeviceSnapshot, MouseButton, scancode};

/// Action ids the menu reads from the active profile.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuBindingIds {
    pub up: ActionId,
    pub down: ActionId,
    pub left: ActionId,
    pub right: ActionId,
    pub select: ActionId,
    pub back: ActionId,
    pub page_prev: ActionId,
    pub page_next: ActionId,
    /// 2D action folded into the four directions.
    pub navigate: Option<ActionId>,
    /// Buttons that set the focused slider to its n-th quick value.
    pub quick_values: [Option<ActionId>; 4],
}

impl Default for MenuBindingIds {
    fn default() -> Self {
        Self {
            up: menu_action::UP,
            down: menu_action::DOWN,
            left: menu_action::LEFT,
            right: menu_action::RIGHT,
            select: menu_action::SELECT,
            back: menu_action::BACK,
            page_prev: menu_action::PAGE_PREV,
            page_next: menu_action::PAGE_NEXT,
            navigate: Some(menu_action::NAVIGATE),
            quick_values: menu_action::QUICK_VALUES.map(Some),
        }
    }
}

/// Held menu inputs for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuInputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub select: bool,
    pub back: bool,
    pub page_prev: bool,
    pub page_next: bool,
    /// Index of the held quick-value button, if any.
    pub quick_value: Option<u8>,
    /// Cursor in render-target pixels, `None` when outside the window.
    pub mouse: Option<Vec2>,
    pub mouse_down: bool,
    pub mouse_moved: bool,
    /// Vertical wheel, positive away from the user.
    pub wheel: f32,
    /// Text typed this frame.
    pub typed: String,
    /// Backspace held.
    pub erase: bool,
}

impl MenuInputState {
    pub fn sample(
        snapshot: &DeviceSnapshot,
        profile: &BindingProfile,
        ids: &MenuBindingIds,
        settings: &InputSettings,
    ) -> Self {
        let sampler = DeviceSampler::new(snapshot, settings);
        let down = |id: ActionId| action_down(&sampler, profile, id);

        let mut state = MenuInputState {
            up: down(ids.up),
            down: down(ids.down),
            left: down(ids.left),
            right: down(ids.right),
            select: down(ids.select),
            back: down(ids.back),
            page_prev: down(ids.page_prev),
            page_next: down(ids.page_next),
            quick_value: ids
                .quick_values
                .iter()
                .position(|id| id.is_some_and(down))
                .map(|i| i as u8),
            ..Default::default()
        };

        if let Some(nav) = ids.navigate {
            let v = action_axis_2d(&sampler, profile, nav);
            let t = settings.nav_threshold;
            state.up |= v.y <= -t;
            state.down |= v.y >= t;
            state.left |= v.x <= -t;
            state.right |= v.x >= t;
        }

        if !snapshot.capture.keyboard_mouse_blocked() {
            let mouse = &snapshot.mouse;
            if mouse.in_window {
                state.mouse = Some(snapshot.surface.window_to_render(mouse.position));
            }
            state.mouse_down = mouse.is_pressed(MouseButton::Left);
            state.mouse_moved = mouse.moved();
            state.wheel = mouse.wheel.y;
            state.typed = snapshot.typed_text.clone();
            state.erase = snapshot.key_down(scancode::BACKSPACE);
        }
        state
    }

    /// Any keyboard/gamepad navigation input held.
    pub fn any_navigation(&self) -> bool {
        self.up
            || self.down
            || self.left
            || self.right
            || self.select
            || self.back
            || self.page_prev
            || self.page_next
            || self.quick_value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binds::default_profile;
    use crate::input::{ControllerState, pad_axis, pad_button};

    fn sample(snapshot: &DeviceSnapshot) -> MenuInputState {
        MenuInputState::sample(
            snapshot,
            &default_profile(),
            &MenuBindingIds::default(),
            &InputSettings::default(),
        )
    }

    #[test]
    fn test_keys_and_pad_buttons_map_to_directions() {
        let snap = DeviceSnapshot::new()
            .with_key(scancode::UP)
            .with_controller(ControllerState::new(0).with_button(pad_button::A, true));
        let state = sample(&snap);
        assert!(state.up && state.select);
        assert!(!state.down && !state.back);
    }

    #[test]
    fn test_stick_folds_into_directions() {
        let pad = ControllerState::new(1)
            .with_axis(pad_axis::LEFT_X, 0.8)
            .with_axis(pad_axis::LEFT_Y, 0.3);
        let state = sample(&DeviceSnapshot::new().with_controller(pad));
        assert!(state.right);
        assert!(!state.down && !state.up && !state.left);
    }

    #[test]
    fn test_overlay_hides_mouse_and_keyboard() {
        let mut snap = DeviceSnapshot::new().with_key(scancode::RETURN);
        snap.mouse.in_window = true;
        snap.mouse.set_button(MouseButton::Left, true);
        snap.capture.overlay_captures_input = true;
        let state = sample(&snap);
        assert!(!state.select);
        assert!(state.mouse.is_none());
        assert!(!state.mouse_down);
    }

    #[test]
    fn test_quick_value_keys() {
        let state = sample(&DeviceSnapshot::new().with_key(scancode::DIGIT3));
        assert_eq!(state.quick_value, Some(2));
    }
}
