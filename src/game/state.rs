//! Controls State
//!
//! Game-side state edited by the controls menus: the binding profiles, the
//! sampler settings and the "press an input" rebind prompt.

use crate::binds::capture::PadScope;
use crate::binds::{
    ActionId, BindSlot, BindingProfiles, BindsActionType, ProfileStore, first_moved_axis,
    first_pressed_input,
};
use crate::config::InputSettings;
use crate::input::{DeviceKind, DeviceSelector, DeviceSnapshot, encode_button, scancode};
use crate::menu::{BoolCell, FloatCell, MenuBindingIds, MenuInputState, SliderSpec, TextCell, bool_cell, float_cell, text_cell};

use super::actions::bundled_profile;

/// Seconds a rebind prompt waits for input.
pub const REBIND_TIMEOUT: f32 = 5.0;

/// Axis movement needed to capture an analog binding.
pub const ANALOG_CAPTURE_THRESHOLD: f32 = 0.6;

/// Deadzone slider range and quick values.
pub const DEADZONE_MIN: f32 = 0.0;
pub const DEADZONE_MAX: f32 = 0.5;
pub const DEADZONE_STEP: f32 = 0.01;
pub const DEADZONE_PRESETS: [f32; 4] = [0.05, 0.1, 0.15, 0.25];

/// A pending "press an input" prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RebindRequest {
    pub ty: BindsActionType,
    pub action: ActionId,
    pub slot: BindSlot,
    /// Seconds left before the prompt gives up.
    pub remaining: f32,
}

pub struct ControlsGame<S: ProfileStore> {
    pub profiles: BindingProfiles<S>,
    pub settings: InputSettings,
    pub bindings: MenuBindingIds,
    /// Live value of the deadzone slider; applied to `settings` on commit.
    pub deadzone: FloatCell,
    pub deadzone_text: TextCell,
    pub invert_look: BoolCell,
    rebind: Option<RebindRequest>,
    /// Menu input stays idle after a prompt ends until everything is released.
    wait_release: bool,
    previous: DeviceSnapshot,
    current: DeviceSnapshot,
}

impl<S: ProfileStore> ControlsGame<S> {
    pub fn new(store: S, settings: InputSettings) -> Self {
        let game = Self {
            profiles: BindingProfiles::open(store, bundled_profile()),
            deadzone: float_cell(settings.stick_deadzone),
            deadzone_text: text_cell(""),
            invert_look: bool_cell(false),
            bindings: MenuBindingIds::default(),
            settings,
            rebind: None,
            wait_release: false,
            previous: DeviceSnapshot::default(),
            current: DeviceSnapshot::default(),
        };
        game.deadzone_slider().sync_entry();
        game
    }

    pub fn deadzone_slider(&self) -> SliderSpec {
        SliderSpec::new(self.deadzone.clone(), DEADZONE_MIN, DEADZONE_MAX, DEADZONE_STEP)
            .with_entry(self.deadzone_text.clone())
            .with_quick_values(&DEADZONE_PRESETS)
    }

    /// Copy slider values into the live settings.
    pub fn apply_settings(&mut self) {
        self.settings.stick_deadzone = self.deadzone.get();
        log::info!("stick deadzone set to {:.2}", self.settings.stick_deadzone);
    }

    /// Take this frame's snapshot and derive menu input from it. Menu input
    /// is idle while a rebind prompt is waiting, and after it ends until the
    /// captured input is released, so the captured press does not also
    /// navigate.
    pub fn begin_frame(&mut self, snapshot: DeviceSnapshot) -> MenuInputState {
        self.previous = std::mem::replace(&mut self.current, snapshot);
        if self.rebind.is_some() {
            return MenuInputState::default();
        }
        let input =
            MenuInputState::sample(&self.current, self.profiles.active(), &self.bindings, &self.settings);
        if self.wait_release {
            if input.any_navigation() || input.mouse_down || input.erase {
                return MenuInputState::default();
            }
            self.wait_release = false;
        }
        input
    }

    fn end_rebind(&mut self) {
        self.rebind = None;
        self.wait_release = true;
    }

    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.current
    }

    pub fn rebind(&self) -> Option<&RebindRequest> {
        self.rebind.as_ref()
    }

    pub fn begin_rebind(&mut self, ty: BindsActionType, action: ActionId, slot: BindSlot) {
        log::debug!("waiting for input for {ty:?} action {}", action.0);
        self.rebind = Some(RebindRequest {
            ty,
            action,
            slot,
            remaining: REBIND_TIMEOUT,
        });
    }

    pub fn cancel_rebind(&mut self) {
        if self.rebind.is_some() {
            self.end_rebind();
            self.profiles.notify("Rebind cancelled");
        }
    }

    /// Age toasts and resolve a pending rebind.
    pub fn update(&mut self, dt: f32) {
        self.profiles.tick(dt);
        self.poll_rebind(dt);
    }

    /// Bind the first input pressed (or axis moved) since the last frame to
    /// the pending request. Escape cancels. Returns true if a binding was
    /// stored.
    pub fn poll_rebind(&mut self, dt: f32) -> bool {
        let Some(mut request) = self.rebind else {
            return false;
        };
        request.remaining -= dt;
        if request.remaining <= 0.0 {
            self.end_rebind();
            self.profiles.notify("Rebind timed out");
            return false;
        }

        let escape = encode_button(DeviceKind::Keyboard, DeviceSelector::Any, scancode::ESCAPE);
        let pressed = first_pressed_input(&self.previous, &self.current, PadScope::AnyPad);
        if pressed == Some(escape) {
            self.cancel_rebind();
            return false;
        }
        let captured = match request.ty {
            BindsActionType::Button => pressed,
            ty => first_moved_axis(
                &self.previous,
                &self.current,
                ANALOG_CAPTURE_THRESHOLD,
                PadScope::AnyPad,
            )
            .and_then(|capture| capture.for_type(ty)),
        };
        let Some(code) = captured else {
            self.rebind = Some(request);
            return false;
        };

        self.end_rebind();
        self.profiles
            .set_binding(request.ty, request.action, code, request.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binds::MemoryProfileStore;
    use crate::game::actions::{button, stick};
    use crate::input::{ControllerState, pad_axis};

    fn game() -> ControlsGame<MemoryProfileStore> {
        ControlsGame::new(MemoryProfileStore::new(), InputSettings::default())
    }

    #[test]
    fn test_deadzone_entry_starts_in_sync() {
        let game = game();
        assert_eq!(*game.deadzone_text.borrow(), "0.15");
    }

    #[test]
    fn test_rebind_captures_next_key_and_forks() {
        let mut game = game();
        game.begin_rebind(BindsActionType::Button, button::JUMP, BindSlot::Append);
        assert_eq!(game.begin_frame(DeviceSnapshot::new()), MenuInputState::default());
        assert!(!game.poll_rebind(0.1));

        game.begin_frame(DeviceSnapshot::new().with_key(scancode::F));
        assert!(game.poll_rebind(0.1));
        assert!(game.rebind().is_none());
        assert_eq!(game.profiles.active_name(), "Default (Custom)");
        let f = encode_button(DeviceKind::Keyboard, DeviceSelector::Any, scancode::F);
        assert!(game.profiles.active().codes_for(BindsActionType::Button, button::JUMP).any(|c| c == f));
    }

    #[test]
    fn test_menu_input_idle_until_captured_key_released() {
        let mut game = game();
        game.begin_rebind(BindsActionType::Button, button::JUMP, BindSlot::Append);
        game.begin_frame(DeviceSnapshot::new().with_key(scancode::RETURN));
        assert!(game.poll_rebind(0.1));

        let held = game.begin_frame(DeviceSnapshot::new().with_key(scancode::RETURN));
        assert_eq!(held, MenuInputState::default());
        assert_eq!(game.begin_frame(DeviceSnapshot::new()), MenuInputState::default());

        let pressed = game.begin_frame(DeviceSnapshot::new().with_key(scancode::RETURN));
        assert!(pressed.select);
    }

    #[test]
    fn test_escape_cancels_rebind() {
        let mut game = game();
        game.begin_rebind(BindsActionType::Button, button::JUMP, BindSlot::Append);
        game.begin_frame(DeviceSnapshot::new().with_key(scancode::ESCAPE));
        assert!(!game.poll_rebind(0.1));
        assert!(game.rebind().is_none());
        assert_eq!(game.profiles.active_name(), "Default");
        assert_eq!(game.profiles.toast().map(|t| t.text.as_str()), Some("Rebind cancelled"));
    }

    #[test]
    fn test_stick_rebind_and_timeout() {
        let mut game = game();
        game.begin_rebind(BindsActionType::Analog2D, stick::LOOK, BindSlot::Append);
        let pad = ControllerState::new(0).with_axis(pad_axis::LEFT_X, 0.9);
        game.begin_frame(DeviceSnapshot::new().with_controller(pad));
        assert!(game.poll_rebind(0.1));

        game.begin_rebind(BindsActionType::Button, button::JUMP, BindSlot::Append);
        game.begin_frame(DeviceSnapshot::new());
        assert!(!game.poll_rebind(REBIND_TIMEOUT + 1.0));
        assert!(game.rebind().is_none());
    }
}
