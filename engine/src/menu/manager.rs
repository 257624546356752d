//! Menu Manager
//!
//! The stack of live screen instances. Each instance owns a state block
//! created from its definition on push and dropped on pop, so construction
//! and destruction always pair up. `clear` tears the stack down top first.

use std::any::Any;

use super::screen::{MenuScreenDef, ScreenId};

/// One pushed screen.
pub struct ScreenInstance<G> {
    def: MenuScreenDef<G>,
    player: u32,
    serial: u64,
    state: Box<dyn Any>,
}

impl<G> ScreenInstance<G> {
    pub fn id(&self) -> ScreenId {
        self.def.id
    }

    pub fn def(&self) -> &MenuScreenDef<G> {
        &self.def
    }

    pub fn player(&self) -> u32 {
        self.player
    }

    /// Unique per push; a re-pushed screen gets a new serial.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn state<T: 'static>(&self) -> Option<&T> {
        self.state.downcast_ref::<T>()
    }

    pub fn state_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.state.downcast_mut::<T>()
    }
}

pub struct MenuManager<G> {
    screens: Vec<MenuScreenDef<G>>,
    stack: Vec<ScreenInstance<G>>,
    next_serial: u64,
}

impl<G> Default for MenuManager<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> MenuManager<G> {
    pub fn new() -> Self {
        Self {
            screens: Vec::new(),
            stack: Vec::new(),
            next_serial: 1,
        }
    }

    /// Register a screen definition. A second registration with the same id
    /// replaces the first for future pushes.
    pub fn register_screen(&mut self, def: MenuScreenDef<G>) {
        match self.screens.iter_mut().find(|d| d.id == def.id) {
            Some(existing) => {
                log::warn!("screen {:?} ({}) registered twice, replacing", def.id, def.name);
                *existing = def;
            }
            None => self.screens.push(def),
        }
    }

    pub fn find_screen(&self, id: ScreenId) -> Option<&MenuScreenDef<G>> {
        self.screens.iter().find(|d| d.id == id)
    }

    /// Push a new instance of `id` owned by `player`. False if `id` was never
    /// registered.
    pub fn push_screen(&mut self, id: ScreenId, player: u32) -> bool {
        let Some(def) = self.find_screen(id).cloned() else {
            log::warn!("push of unknown screen {id:?}");
            return false;
        };
        let state = def.state.construct();
        log::debug!(
            "push screen {} (state {}, {} bytes)",
            def.name,
            def.state.type_name,
            def.state.size
        );
        let serial = self.next_serial;
        self.next_serial += 1;
        self.stack.push(ScreenInstance {
            def,
            player,
            serial,
            state,
        });
        true
    }

    /// Pop and destroy the top instance. False if the stack was empty.
    pub fn pop_screen(&mut self) -> bool {
        match self.stack.pop() {
            Some(instance) => {
                log::debug!("pop screen {}", instance.def.name);
                drop(instance);
                true
            }
            None => false,
        }
    }

    /// Destroy every instance, top of stack first.
    pub fn clear(&mut self) {
        while self.pop_screen() {}
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn top(&self) -> Option<&ScreenInstance<G>> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ScreenInstance<G>> {
        self.stack.last_mut()
    }

    pub fn top_state_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.stack.last_mut().and_then(|s| s.state_mut::<T>())
    }

    /// Instances bottom to top.
    pub fn instances(&self) -> impl Iterator<Item = &ScreenInstance<G>> {
        self.stack.iter()
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.stack.iter().any(|s| s.id() == id)
    }
}

impl<G> Drop for MenuManager<G> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::screen::{BuiltScreen, MenuContext, ScreenController, ScreenStateOps};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Empty;

    impl ScreenController<()> for Empty {
        fn build(&self, _ctx: &mut MenuContext<'_, ()>) -> BuiltScreen {
            BuiltScreen::new()
        }
    }

    struct Tracked {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.name));
        }
    }

    fn tracked_def(id: u32, name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> MenuScreenDef<()> {
        let log = Rc::clone(log);
        MenuScreenDef::new(ScreenId(id), name, "default", Empty).with_state(ScreenStateOps::from_fn(
            move || {
                log.borrow_mut().push(format!("init {name}"));
                Tracked {
                    name,
                    log: Rc::clone(&log),
                }
            },
        ))
    }

    #[test]
    fn test_unknown_screen_push_fails() {
        let mut manager: MenuManager<()> = MenuManager::new();
        assert!(!manager.push_screen(ScreenId(7), 0));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_clear_destroys_top_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = MenuManager::new();
        manager.register_screen(tracked_def(1, "A", &log));
        manager.register_screen(tracked_def(2, "B", &log));
        assert!(manager.push_screen(ScreenId(1), 0));
        assert!(manager.push_screen(ScreenId(2), 0));
        manager.clear();
        assert_eq!(*log.borrow(), vec!["init A", "init B", "drop B", "drop A"]);
        assert_eq!(manager.depth(), 0);
    }

    #[test]
    fn test_drop_pairs_every_push() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut manager = MenuManager::new();
            manager.register_screen(tracked_def(1, "A", &log));
            manager.push_screen(ScreenId(1), 0);
            manager.push_screen(ScreenId(1), 1);
            assert!(manager.pop_screen());
        }
        let inits = log.borrow().iter().filter(|l| l.starts_with("init")).count();
        let drops = log.borrow().iter().filter(|l| l.starts_with("drop")).count();
        assert_eq!((inits, drops), (2, 2));
    }

    #[test]
    fn test_serials_and_typed_state() {
        let mut manager: MenuManager<()> = MenuManager::new();
        manager.register_screen(
            MenuScreenDef::new(ScreenId(1), "Counter", "default", Empty).with_state(ScreenStateOps::of::<u32>()),
        );
        manager.push_screen(ScreenId(1), 3);
        let first = manager.top().map(|s| s.serial());
        *manager.top_state_mut::<u32>().unwrap() += 5;
        assert_eq!(manager.top().unwrap().state::<u32>(), Some(&5));
        assert!(manager.top_state_mut::<String>().is_none());
        assert_eq!(manager.top().unwrap().player(), 3);

        manager.pop_screen();
        manager.push_screen(ScreenId(1), 3);
        assert_ne!(manager.top().map(|s| s.serial()), first);
        assert_eq!(manager.top().unwrap().state::<u32>(), Some(&0));
    }
}
