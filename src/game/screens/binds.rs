//! Bindings list screen.
//!
//! One page of actions of the selected type, each row showing every input
//! mapped to it. Select waits for a new input to add; left clears the row.

use crate::binds::{ActionId, BindSlot, BindsActionType, ProfileStore, action_type_name, binding_label};
use crate::game::actions::{ActionInfo, actions_of};
use crate::game::state::ControlsGame;
use crate::menu::{
    BuiltScreen, MenuAction, MenuContext, MenuWidget, ScreenController, SlotRef, WidgetId,
    link_vertical,
};

use super::{ControlsCommands, payload_index};

pub const BINDS_ROWS_PER_PAGE: usize = 6;

pub const TITLE: WidgetId = WidgetId(1);
pub const ACTION_TYPE: WidgetId = WidgetId(2);
pub const PAGE_PREV: WidgetId = WidgetId(3);
pub const PAGE_NEXT: WidgetId = WidgetId(4);
pub const PAGE_LABEL: WidgetId = WidgetId(5);
pub const BACK: WidgetId = WidgetId(6);
/// Row `i` of the page is `WidgetId(FIRST_ROW.0 + i)`.
pub const FIRST_ROW: WidgetId = WidgetId(100);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindsState {
    /// Index into [`BindsActionType::ALL`].
    pub type_index: usize,
    pub page: usize,
}

impl BindsState {
    pub fn action_type(&self) -> BindsActionType {
        BindsActionType::ALL[self.type_index % BindsActionType::ALL.len()]
    }
}

fn page_count(ty: BindsActionType) -> usize {
    actions_of(ty).count().div_ceil(BINDS_ROWS_PER_PAGE).max(1)
}

pub struct BindsScreen {
    pub commands: ControlsCommands,
}

impl<S: ProfileStore> ScreenController<ControlsGame<S>> for BindsScreen {
    fn build(&self, ctx: &mut MenuContext<'_, ControlsGame<S>>) -> BuiltScreen {
        let (game, state) = ctx.parts::<BindsState>();
        let state = state.cloned().unwrap_or_default();
        let ty = state.action_type();
        let pages = page_count(ty);
        let page = state.page.min(pages - 1);
        let mut built = BuiltScreen::new();

        built.push(MenuWidget::label(TITLE, SlotRef::new("title"), "Bindings"));
        built.push(
            MenuWidget::option_cycle(
                ACTION_TYPE,
                SlotRef::new("binds_type"),
                "Action Type",
                state.type_index,
                BindsActionType::ALL.len(),
            )
            .with_secondary(action_type_name(ty))
            .on_left(MenuAction::RunCommand(self.commands.binds_type, -1))
            .on_right(MenuAction::RunCommand(self.commands.binds_type, 1)),
        );

        let profile = game.profiles.active();
        let rows: Vec<&ActionInfo> = actions_of(ty).skip(page * BINDS_ROWS_PER_PAGE).take(BINDS_ROWS_PER_PAGE).collect();
        for (row, action) in rows.iter().enumerate() {
            let labels: Vec<String> = profile
                .codes_for(ty, action.id)
                .map(|code| binding_label(ty, code))
                .collect();
            let secondary = if labels.is_empty() { "Unbound".to_string() } else { labels.join(", ") };
            let waiting = game
                .rebind()
                .is_some_and(|r| r.ty == ty && r.action == action.id);
            built.push(
                MenuWidget::card(
                    WidgetId(FIRST_ROW.0 + row as u32),
                    SlotRef::at("binds_row", row as u16),
                    action.name,
                    MenuAction::RunCommand(self.commands.rebind, i64::from(action.id.0)),
                )
                .with_secondary(secondary)
                .with_badge(if waiting { "Press an input..." } else { "" })
                .on_left(MenuAction::RunCommand(self.commands.clear_action, i64::from(action.id.0))),
            );
        }

        built.push(
            MenuWidget::button(
                PAGE_PREV,
                SlotRef::new("binds_page_prev"),
                "<",
                MenuAction::RunCommand(self.commands.binds_page, -1),
            )
            .disabled(page == 0),
        );
        built.push(
            MenuWidget::button(
                PAGE_NEXT,
                SlotRef::new("binds_page_next"),
                ">",
                MenuAction::RunCommand(self.commands.binds_page, 1),
            )
            .disabled(page + 1 >= pages),
        );
        built.push(MenuWidget::label(
            PAGE_LABEL,
            SlotRef::new("binds_page_label"),
            format!("Page {}/{}", page + 1, pages),
        ));
        built.push(MenuWidget::button(BACK, SlotRef::new("footer_back"), "Back", MenuAction::PopScreen));

        link_vertical(&mut built.widgets);
        built.default_focus = if rows.is_empty() { Some(ACTION_TYPE) } else { Some(FIRST_ROW) };
        built
    }

    fn tick(&self, ctx: &mut MenuContext<'_, ControlsGame<S>>, dt: f32) {
        ctx.game.update(dt);
    }
}

pub(super) fn cycle_type<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, step: i64) {
    if let Some(state) = ctx.state::<BindsState>() {
        let count = BindsActionType::ALL.len() as i64;
        state.type_index = (state.type_index as i64 + step).rem_euclid(count) as usize;
        state.page = 0;
    }
}

pub(super) fn turn_page<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, step: i64) {
    if let Some(state) = ctx.state::<BindsState>() {
        let last = page_count(state.action_type()) as i64 - 1;
        state.page = (state.page as i64 + step).clamp(0, last) as usize;
    }
}

fn action_payload(payload: i64) -> Option<ActionId> {
    let index = payload_index(payload)?;
    match u16::try_from(index) {
        Ok(id) => Some(ActionId(id)),
        Err(_) => {
            log::warn!("action id {payload} out of range");
            None
        }
    }
}

pub(super) fn rebind<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, payload: i64) {
    let Some(action) = action_payload(payload) else {
        return;
    };
    let (game, state) = ctx.parts::<BindsState>();
    let ty = state.map_or(BindsActionType::Button, |s| s.action_type());
    game.begin_rebind(ty, action, BindSlot::Append);
}

pub(super) fn clear_action<S: ProfileStore>(ctx: &mut MenuContext<'_, ControlsGame<S>>, payload: i64) {
    let Some(action) = action_payload(payload) else {
        return;
    };
    let (game, state) = ctx.parts::<BindsState>();
    let ty = state.map_or(BindsActionType::Button, |s| s.action_type());
    game.profiles.clear_action(ty, action);
}
