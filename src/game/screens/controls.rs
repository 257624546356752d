//! Controls root screen.

use crate::binds::ProfileStore;
use crate::game::state::ControlsGame;
use crate::menu::{
    BuiltScreen, MenuAction, MenuContext, MenuWidget, ScreenController, SlotRef, WidgetId,
    link_vertical,
};

use super::{BINDS_SCREEN, ControlsCommands, PROFILES_SCREEN};

pub const TITLE: WidgetId = WidgetId(1);
pub const DEADZONE: WidgetId = WidgetId(2);
pub const INVERT_LOOK: WidgetId = WidgetId(3);
pub const PROFILE: WidgetId = WidgetId(4);
pub const EDIT_BINDINGS: WidgetId = WidgetId(5);
pub const MANAGE_PROFILES: WidgetId = WidgetId(6);
pub const BACK: WidgetId = WidgetId(7);
pub const TOAST: WidgetId = WidgetId(8);

pub struct ControlsScreen {
    pub commands: ControlsCommands,
}

impl<S: ProfileStore> ScreenController<ControlsGame<S>> for ControlsScreen {
    fn build(&self, ctx: &mut MenuContext<'_, ControlsGame<S>>) -> BuiltScreen {
        let game = &*ctx.game;
        let mut built = BuiltScreen::new();

        built.push(MenuWidget::label(TITLE, SlotRef::new("title"), "Controls"));
        built.push(
            MenuWidget::slider(DEADZONE, SlotRef::at("row", 0), "Stick Deadzone", game.deadzone_slider())
                .on_select(MenuAction::RunCommand(self.commands.apply_settings, 0)),
        );
        let invert = if game.invert_look.get() { "On" } else { "Off" };
        built.push(
            MenuWidget::toggle(INVERT_LOOK, SlotRef::at("row", 1), "Invert Look", game.invert_look.clone())
                .with_secondary(invert),
        );

        let profiles = game.profiles.list();
        let current = profiles
            .iter()
            .position(|p| p.name == game.profiles.active_name())
            .unwrap_or(0);
        built.push(
            MenuWidget::option_cycle(PROFILE, SlotRef::at("row", 2), "Profile", current, profiles.len())
                .with_secondary(game.profiles.active_name())
                .on_left(MenuAction::RunCommand(self.commands.cycle_profile, -1))
                .on_right(MenuAction::RunCommand(self.commands.cycle_profile, 1))
                .disabled(profiles.len() < 2),
        );
        built.push(MenuWidget::button(
            EDIT_BINDINGS,
            SlotRef::at("row", 3),
            "Edit Bindings",
            MenuAction::PushScreen(BINDS_SCREEN),
        ));
        built.push(MenuWidget::button(
            MANAGE_PROFILES,
            SlotRef::at("row", 4),
            "Manage Profiles",
            MenuAction::PushScreen(PROFILES_SCREEN),
        ));
        built.push(MenuWidget::button(BACK, SlotRef::new("footer_back"), "Back", MenuAction::PopScreen));
        if let Some(toast) = game.profiles.toast() {
            let badge = if toast.is_error { "error" } else { "" };
            built.push(MenuWidget::label(TOAST, SlotRef::new("toast"), toast.text.clone()).with_badge(badge));
        }

        link_vertical(&mut built.widgets);
        built.default_focus = Some(DEADZONE);
        built
    }

    fn tick(&self, ctx: &mut MenuContext<'_, ControlsGame<S>>, dt: f32) {
        ctx.game.update(dt);
    }
}
