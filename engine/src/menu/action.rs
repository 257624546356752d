//! Menu Actions
//!
//! What a widget does when it is activated, and the registry of named
//! commands that carry screen-specific logic.
//!
//! Bound values are shared cells: the owner (game state or a screen's state
//! block) keeps one handle and the widget carries a clone, so an action can
//! never outlive the value it writes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::screen::{MenuContext, ScreenId};
use super::widget::WidgetId;

pub type BoolCell = Rc<Cell<bool>>;
pub type FloatCell = Rc<Cell<f32>>;
pub type TextCell = Rc<RefCell<String>>;

pub fn bool_cell(value: bool) -> BoolCell {
    Rc::new(Cell::new(value))
}

pub fn float_cell(value: f32) -> FloatCell {
    Rc::new(Cell::new(value))
}

pub fn text_cell(value: impl Into<String>) -> TextCell {
    Rc::new(RefCell::new(value.into()))
}

/// Registered command id. Ids start at 1; 0 is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub u32);

impl CommandId {
    pub const INVALID: CommandId = CommandId(0);

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

#[derive(Debug, Clone, Default)]
pub enum MenuAction {
    #[default]
    None,
    PushScreen(ScreenId),
    PopScreen,
    RequestFocus(WidgetId),
    ToggleBool(BoolCell),
    SetFloat(FloatCell, f32),
    DeltaFloat(FloatCell, f32),
    /// Invoke a registered command with an integer payload.
    RunCommand(CommandId, i64),
}

impl MenuAction {
    pub fn is_none(&self) -> bool {
        matches!(self, MenuAction::None)
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }
}

type CommandFn<G> = Box<dyn FnMut(&mut MenuContext<'_, G>, i64)>;

struct CommandEntry<G> {
    name: String,
    handler: CommandFn<G>,
}

/// Append-only table of command handlers.
pub struct CommandRegistry<G> {
    entries: Vec<CommandEntry<G>>,
}

impl<G> Default for CommandRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> CommandRegistry<G> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a handler. The returned id stays valid for the registry's
    /// lifetime and is never reused.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut MenuContext<'_, G>, i64) + 'static,
    ) -> CommandId {
        let name = name.into();
        if self.find(&name).is_some() {
            log::warn!("command \"{name}\" registered twice; lookups by name return the first");
        }
        self.entries.push(CommandEntry {
            name,
            handler: Box::new(handler),
        });
        CommandId(self.entries.len() as u32)
    }

    pub fn find(&self, name: &str) -> Option<CommandId> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| CommandId(i as u32 + 1))
    }

    pub fn name(&self, id: CommandId) -> Option<&str> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.entries.get(index).map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the handler for `id`. Returns false for unknown or invalid ids.
    pub fn invoke(&mut self, id: CommandId, ctx: &mut MenuContext<'_, G>, payload: i64) -> bool {
        let Some(index) = (id.0 as usize).checked_sub(1) else {
            log::warn!("invalid command id 0");
            return false;
        };
        match self.entries.get_mut(index) {
            Some(entry) => {
                (entry.handler)(ctx, payload);
                true
            }
            None => {
                log::warn!("unknown command id {}", id.0);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuManager;
    use glam::Vec2;

    #[test]
    fn test_command_ids_are_one_based_and_stable() {
        let mut registry: CommandRegistry<Vec<i64>> = CommandRegistry::new();
        let a = registry.register("a", |ctx, payload| ctx.game.push(payload));
        let b = registry.register("b", |ctx, payload| ctx.game.push(payload * 10));
        assert_eq!(a, CommandId(1));
        assert_eq!(b, CommandId(2));
        assert_eq!(registry.find("b"), Some(b));
        assert_eq!(registry.name(a), Some("a"));
        assert_eq!(registry.name(CommandId::INVALID), None);

        let mut game = Vec::new();
        let mut manager = MenuManager::new();
        let mut ctx = MenuContext::new(&mut game, &mut manager, Vec2::new(640.0, 480.0), 0);
        assert!(registry.invoke(b, &mut ctx, 4));
        assert!(registry.invoke(a, &mut ctx, 1));
        assert!(!registry.invoke(CommandId::INVALID, &mut ctx, 1));
        assert!(!registry.invoke(CommandId(9), &mut ctx, 1));
        assert_eq!(game, vec![40, 1]);
    }

    #[test]
    fn test_action_default_is_none() {
        assert!(MenuAction::default().is_none());
        assert!(MenuAction::PopScreen.is_some());
    }
}
