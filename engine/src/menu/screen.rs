//! Screens
//!
//! A screen is a controller that turns a [`MenuContext`] into a
//! [`BuiltScreen`], plus a description of the private state block each
//! pushed instance owns.

use std::any::Any;
use std::rc::Rc;

use glam::Vec2;

use super::action::MenuAction;
use super::manager::MenuManager;
use super::widget::{MenuWidget, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u32);

/// Output of one build.
#[derive(Debug, Clone, Default)]
pub struct BuiltScreen {
    /// Overrides the screen's default layout for this build.
    pub layout: Option<&'static str>,
    pub widgets: Vec<MenuWidget>,
    /// Executed once after every build, regardless of input.
    pub frame_actions: Vec<MenuAction>,
    pub default_focus: Option<WidgetId>,
}

impl BuiltScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, widget: MenuWidget) {
        self.widgets.push(widget);
    }

    pub fn find(&self, id: WidgetId) -> Option<&MenuWidget> {
        self.widgets.iter().find(|w| w.id == id)
    }
}

/// Builds one kind of screen.
///
/// `build` may run several times per frame; it should be cheap and derive
/// everything from the context.
pub trait ScreenController<G> {
    fn build(&self, ctx: &mut MenuContext<'_, G>) -> BuiltScreen;

    /// Called once per update while the screen is on top.
    fn tick(&self, _ctx: &mut MenuContext<'_, G>, _dt: f32) {}
}

/// Creates the private state block of a screen instance.
///
/// The block is dropped exactly once, when the instance leaves the stack.
#[derive(Clone)]
pub struct ScreenStateOps {
    pub type_name: &'static str,
    pub size: usize,
    pub align: usize,
    construct: Rc<dyn Fn() -> Box<dyn Any>>,
}

impl ScreenStateOps {
    /// State block of type `T`, constructed with `T::default()`.
    pub fn of<T: Default + 'static>() -> Self {
        Self::from_fn(T::default)
    }

    pub fn from_fn<T: 'static>(construct: impl Fn() -> T + 'static) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            size: std::mem::size_of::<T>(),
            align: std::mem::align_of::<T>(),
            construct: Rc::new(move || Box::new(construct()) as Box<dyn Any>),
        }
    }

    /// Screens without private state.
    pub fn none() -> Self {
        Self::of::<()>()
    }

    pub fn construct(&self) -> Box<dyn Any> {
        (self.construct)()
    }
}

impl std::fmt::Debug for ScreenStateOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenStateOps")
            .field("type_name", &self.type_name)
            .field("size", &self.size)
            .field("align", &self.align)
            .finish()
    }
}

/// Registration record of a screen.
pub struct MenuScreenDef<G> {
    pub id: ScreenId,
    pub name: &'static str,
    pub default_layout: &'static str,
    pub controller: Rc<dyn ScreenController<G>>,
    pub state: ScreenStateOps,
}

impl<G> Clone for MenuScreenDef<G> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name,
            default_layout: self.default_layout,
            controller: Rc::clone(&self.controller),
            state: self.state.clone(),
        }
    }
}

impl<G> MenuScreenDef<G> {
    pub fn new(
        id: ScreenId,
        name: &'static str,
        default_layout: &'static str,
        controller: impl ScreenController<G> + 'static,
    ) -> Self {
        Self {
            id,
            name,
            default_layout,
            controller: Rc::new(controller),
            state: ScreenStateOps::none(),
        }
    }

    pub fn with_state(mut self, state: ScreenStateOps) -> Self {
        self.state = state;
        self
    }
}

/// What builders, ticks and commands see.
pub struct MenuContext<'a, G> {
    pub game: &'a mut G,
    manager: &'a mut MenuManager<G>,
    /// Render-target size in pixels.
    pub viewport: Vec2,
    /// Player that owns the current screen instance.
    pub player: u32,
}

impl<'a, G> MenuContext<'a, G> {
    pub fn new(game: &'a mut G, manager: &'a mut MenuManager<G>, viewport: Vec2, player: u32) -> Self {
        Self {
            game,
            manager,
            viewport,
            player,
        }
    }

    pub fn manager(&self) -> &MenuManager<G> {
        &*self.manager
    }

    /// State block of the top screen instance.
    pub fn state<T: 'static>(&mut self) -> Option<&mut T> {
        self.manager.top_state_mut::<T>()
    }

    /// Game state and the top instance's state block at the same time.
    pub fn parts<T: 'static>(&mut self) -> (&mut G, Option<&mut T>) {
        (&mut *self.game, self.manager.top_state_mut::<T>())
    }

    /// Push a screen for the same player.
    pub fn push_screen(&mut self, id: ScreenId) -> bool {
        self.manager.push_screen(id, self.player)
    }

    pub fn pop_screen(&mut self) -> bool {
        self.manager.pop_screen()
    }

    pub fn depth(&self) -> usize {
        self.manager.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Big {
        _bytes: [u64; 8],
    }

    #[test]
    fn test_state_ops_record_layout() {
        let ops = ScreenStateOps::of::<Big>();
        assert_eq!(ops.size, 64);
        assert_eq!(ops.align, std::mem::align_of::<u64>());
        assert!(ops.construct().downcast_ref::<Big>().is_some());
        assert_eq!(ScreenStateOps::none().size, 0);
    }

    #[test]
    fn test_built_screen_find() {
        let mut built = BuiltScreen::new();
        built.push(MenuWidget::label(
            WidgetId(3),
            crate::menu::SlotRef::new("title"),
            "Title",
        ));
        assert!(built.find(WidgetId(3)).is_some());
        assert!(built.find(WidgetId(4)).is_none());
    }
}
