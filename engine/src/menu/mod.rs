//! Menu Module
//!
//! Screen stack, widget model and the interaction engine that drives them.
//!
//! ## Architecture
//!
//! - `action`: widget actions, shared value cells, command registry
//! - `widget`: per-build widget descriptors
//! - `screen`: screen controllers, definitions and the build context
//! - `manager`: the screen stack and per-instance state
//! - `layout`: slot resolution and widget hit regions
//! - `input`: menu inputs sampled from devices through bindings
//! - `runtime`: focus, navigation, activation, drag and text capture
//! - `feedback`: cue and text-input hooks

pub mod action;
pub mod feedback;
pub mod input;
pub mod layout;
pub mod manager;
pub mod runtime;
pub mod screen;
pub mod widget;

use glam::Vec2;

pub use action::{
    BoolCell, CommandId, CommandRegistry, FloatCell, MenuAction, TextCell, bool_cell, float_cell,
    text_cell,
};
pub use feedback::{CueSink, NoTextInput, SilentCues, TextInputPlatform, cue};
pub use input::{MenuBindingIds, MenuInputState};
pub use layout::{Layout, LayoutLibrary, LayoutResolver, LayoutVariant, SlotRect, WidgetRects, widget_rects};
pub use manager::{MenuManager, ScreenInstance};
pub use runtime::{BuiltFrame, MenuIo, MenuRuntime};
pub use screen::{BuiltScreen, MenuContext, MenuScreenDef, ScreenController, ScreenId, ScreenStateOps};
pub use widget::{
    MenuWidget, NavEdges, SliderSpec, SlotRef, TextCommit, TextInputSpec, WidgetActions, WidgetId,
    WidgetKind, link_vertical,
};

use crate::config::MenuSettings;

/// Screen stack, commands and interaction state for one game type.
pub struct MenuSystem<G> {
    manager: MenuManager<G>,
    commands: CommandRegistry<G>,
    runtime: MenuRuntime,
}

impl<G> Default for MenuSystem<G> {
    fn default() -> Self {
        Self::new(MenuSettings::default())
    }
}

impl<G> MenuSystem<G> {
    pub fn new(settings: MenuSettings) -> Self {
        Self {
            manager: MenuManager::new(),
            commands: CommandRegistry::new(),
            runtime: MenuRuntime::new(settings),
        }
    }

    pub fn register_screen(&mut self, def: MenuScreenDef<G>) {
        self.manager.register_screen(def);
    }

    pub fn register_command(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut MenuContext<'_, G>, i64) + 'static,
    ) -> CommandId {
        self.commands.register(name, handler)
    }

    pub fn push_screen(&mut self, id: ScreenId, player: u32) -> bool {
        self.manager.push_screen(id, player)
    }

    pub fn pop_screen(&mut self) -> bool {
        self.manager.pop_screen()
    }

    /// Close every screen, top first.
    pub fn clear(&mut self) {
        self.manager.clear();
    }

    /// A screen is open.
    pub fn is_active(&self) -> bool {
        !self.manager.is_empty()
    }

    pub fn manager(&self) -> &MenuManager<G> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut MenuManager<G> {
        &mut self.manager
    }

    pub fn commands(&self) -> &CommandRegistry<G> {
        &self.commands
    }

    pub fn runtime(&self) -> &MenuRuntime {
        &self.runtime
    }

    /// Latest build of the top screen, for rendering.
    pub fn frame(&self) -> Option<&BuiltFrame> {
        self.runtime.frame()
    }

    pub fn update(&mut self, dt: f32, input: &MenuInputState, game: &mut G, viewport: Vec2, io: &mut MenuIo<'_>) {
        self.runtime.update(
            dt,
            input,
            game,
            &mut self.manager,
            &mut self.commands,
            viewport,
            io,
        );
    }
}
