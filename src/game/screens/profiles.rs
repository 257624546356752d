//! Profile manager screen.
//!
//! Lists stored profiles. Selecting a row picks it as the target of the
//! rename box and the activate/delete buttons.

use crate::binds::{MAX_PROFILE_NAME_LEN, ProfileStore};
use crate::game::state::ControlsGame;
use crate::menu::{
    BuiltScreen, MenuAction, MenuContext, MenuWidget, ScreenController, SlotRef, TextCell,
    TextInputSpec, WidgetId, link_vertical, text_cell,
};

use super::{ControlsCommands, payload_index};

pub const TITLE: WidgetId = WidgetId(1);
pub const RENAME: WidgetId = WidgetId(2);
pub const ACTIVATE: WidgetId = WidgetId(3);
pub const DUPLICATE: WidgetId = WidgetId(4);
pub const DELETE: WidgetId = WidgetId(5);
pub const BACK: WidgetId = WidgetId(6);
pub const TOAST: WidgetId = WidgetId(7);
/// Row `i` is `WidgetId(FIRST_ROW.0 + i)`.
pub const FIRST_ROW: WidgetId = WidgetId(100);

#[derive(Debug, Clone)]
pub struct ProfilesState {
    /// Index of the selected row.
    pub selected: Option<usize>,
    /// Rename box contents.
    pub rename: TextCell,
    /// Profile the rename box was last filled from.
    rename_for: Option<String>,
}

impl Default for ProfilesState {
    fn default() -> Self {
        Self {
            selected: None,
            rename: text_cell(""),
            rename_for: None,
        }
    }
}

pub struct ProfilesScreen {
    pub commands: ControlsCommands,
}

impl<S: ProfileStore> ScreenController<ControlsGame<S>> for ProfilesScreen {
    fn build(&self, ctx: &mut MenuContext<'_, ControlsGame<S>>) -> BuiltScreen {
        let mut built = BuiltScreen::new();
        let (game, state) = ctx.parts::<ProfilesState>();
        let Some(state) = state else {
            log::warn!("profiles screen built without its state block");
            return built;
        };

        let list = game.profiles.list();
        let active = list.iter().position(|p| p.name == game.profiles.active_name());
        let selected = state
            .selected
            .filter(|&i| i < list.len())
            .or(active)
            .unwrap_or(0);
        let target = list.get(selected);

        // Refill the rename box whenever the selection points elsewhere.
        let target_name = target.map(|p| p.name.clone());
        if state.rename_for != target_name {
            *state.rename.borrow_mut() = target_name.clone().unwrap_or_default();
            state.rename_for = target_name;
        }

        built.push(MenuWidget::label(TITLE, SlotRef::new("title"), "Profiles"));
        for (i, info) in list.iter().enumerate() {
            let badge = if Some(i) == active {
                "Active"
            } else if info.read_only {
                "Read-only"
            } else {
                ""
            };
            built.push(
                MenuWidget::card(
                    WidgetId(FIRST_ROW.0 + i as u32),
                    SlotRef::at("list_row", i as u16),
                    info.name.clone(),
                    MenuAction::RunCommand(self.commands.select_profile, i as i64),
                )
                .with_secondary(format!("{} bindings", info.binding_count))
                .with_tertiary(if i == selected { "Selected" } else { "" })
                .with_badge(badge),
            );
        }

        let read_only = target.is_none_or(|p| p.read_only);
        let is_active = Some(selected) == active;
        built.push(
            MenuWidget::text_input(
                RENAME,
                SlotRef::new("rename"),
                "Name",
                TextInputSpec::text(state.rename.clone(), MAX_PROFILE_NAME_LEN),
            )
            .on_select(MenuAction::RunCommand(self.commands.rename_profile, selected as i64))
            .disabled(read_only),
        );
        built.push(
            MenuWidget::button(
                ACTIVATE,
                SlotRef::new("activate"),
                "Activate",
                MenuAction::RunCommand(self.commands.activate_profile, selected as i64),
            )
            .disabled(is_active || target.is_none()),
        );
        built.push(MenuWidget::button(
            DUPLICATE,
            SlotRef::new("duplicate"),
            "Duplicate Active",
            MenuAction::RunCommand(self.commands.duplicate_profile, 0),
        ));
        built.push(
            MenuWidget::button(
                DELETE,
                SlotRef::new("delete"),
                "Delete",
                MenuAction::RunCommand(self.commands.delete_profile, selected as i64),
            )
            .disabled(read_only || is_active),
        );
        built.push(MenuWidget::button(BACK, SlotRef::new("footer_back"), "Back", MenuAction::PopScreen));
        if let Some(toast) = game.profiles.toast() {
            let badge = if toast.is_error { "error" } else { "" };
            built.push(MenuWidget::label(TOAST, SlotRef::new("toast"), toast.text.clone()).with_badge(badge));
        }

        link_vertical(&mut built.widgets);
        built.default_focus = Some(WidgetId(FIRST_ROW.0 + active.unwrap_or(0) as u32));
        built
    }

    fn tick(&self, ctx: &mut MenuContext<'_, ControlsGame<S>>, dt: f32) {
        ctx.game.update(dt);
    }
}

fn profile_name<S: ProfileStore>(game: &ControlsGame<S>, index: usize) -> Option<String> {
    let name = game.profiles.list().into_iter().nth(index).map(|p| p.name);
    if name.is_none() {
        log::warn!("no profile at row {index}");
    }
    name
}

pub(super) fn select<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, payload: i64) {
    let index = payload_index(payload);
    if let Some(state) = ctx.state::<ProfilesState>() {
        state.selected = index;
    }
}

pub(super) fn activate<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, payload: i64) {
    let Some(index) = payload_index(payload) else {
        return;
    };
    if let Some(name) = profile_name(ctx.game, index) {
        ctx.game.profiles.activate(&name);
    }
}

/// Rename the selected profile to the rename box contents.
pub(super) fn rename<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, payload: i64) {
    let Some(index) = payload_index(payload) else {
        return;
    };
    let (game, state) = ctx.parts::<ProfilesState>();
    let Some(state) = state else {
        return;
    };
    let new_name = state.rename.borrow().trim().to_string();
    // Refill from the stored name on the next build, whether or not the
    // rename succeeded.
    state.rename_for = None;
    if let Some(old_name) = profile_name(game, index) {
        if old_name != new_name {
            game.profiles.rename_profile(&old_name, &new_name);
        }
    }
}

pub(super) fn delete<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, payload: i64) {
    let Some(index) = payload_index(payload) else {
        return;
    };
    if let Some(name) = profile_name(ctx.game, index) {
        if ctx.game.profiles.delete_profile(&name) {
            if let Some(state) = ctx.state::<ProfilesState>() {
                state.selected = None;
            }
        }
    }
}
