//! Menu Runtime
//!
//! The interaction engine. Owns everything that changes while a screen
//! stack is being used: the cached build of the top screen, focus, the
//! per-screen remembered focus, key repeat, slider drag and text capture.
//!
//! Each update:
//! 1. ticks the top screen,
//! 2. turns held inputs into edge/repeat events,
//! 3. builds the top screen, lays it out, runs its frame actions and
//!    resolves focus, then consumes events until one mutates state; that
//!    event forces another build. The number of builds per update is capped
//!    by [`MenuSettings::max_rebuilds_per_update`].

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use glam::Vec2;

use super::action::{CommandRegistry, MenuAction, TextCell};
use super::feedback::{CueSink, TextInputPlatform, cue};
use super::input::MenuInputState;
use super::layout::{LayoutResolver, WidgetRects, widget_rects};
use super::manager::MenuManager;
use super::screen::{MenuContext, ScreenId};
use super::widget::{
    MenuWidget, NavEdges, PAGE_NEXT_SLOTS, PAGE_PREV_SLOTS, TextCommit, WidgetId, WidgetKind,
};
use crate::config::MenuSettings;
use crate::geometry::Rect;

/// External collaborators for one update.
pub struct MenuIo<'a> {
    pub layouts: &'a dyn LayoutResolver,
    pub cues: &'a mut dyn CueSink,
    pub text_input: &'a mut dyn TextInputPlatform,
}

/// The latest build of the top screen, laid out for the current viewport.
#[derive(Debug, Clone)]
pub struct BuiltFrame {
    pub screen: ScreenId,
    /// Serial of the screen instance this was built for.
    pub serial: u64,
    pub layout: &'static str,
    pub viewport: Vec2,
    pub widgets: Vec<MenuWidget>,
    /// Parallel to `widgets`.
    pub rects: Vec<WidgetRects>,
    pub default_focus: Option<WidgetId>,
}

impl BuiltFrame {
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&MenuWidget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn rects_of(&self, id: WidgetId) -> Option<&WidgetRects> {
        self.index_of(id).and_then(|i| self.rects.get(i))
    }

    /// First focusable widget whose bounds contain `p`, in list order.
    pub fn hit(&self, p: Vec2) -> Option<usize> {
        self.widgets
            .iter()
            .zip(&self.rects)
            .position(|(w, r)| w.is_focusable() && r.bounds.contains(p))
    }

    fn find_slot(&self, names: &[&str]) -> Option<&MenuWidget> {
        self.widgets.iter().find(|w| names.contains(&w.slot.name))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MenuEvent {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    PagePrev,
    PageNext,
    Quick(u8),
    Hover(Vec2),
    Click(Vec2),
    Drag(Vec2),
    Release,
    Type(String),
    Erase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Press-then-hold repeat for one input.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatTimer {
    held: bool,
    remaining: f32,
}

impl RepeatTimer {
    /// True on the press and on every repeat.
    fn update(&mut self, held: bool, dt: f32, delay: f32, interval: f32) -> bool {
        if !held {
            self.held = false;
            return false;
        }
        if !self.held {
            self.held = true;
            self.remaining = delay;
            return true;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = (self.remaining + interval).max(f32::EPSILON);
            return true;
        }
        false
    }
}

#[derive(Debug, Clone)]
struct TextCapture {
    widget: WidgetId,
    original: String,
}

#[derive(Debug, Clone, Copy)]
struct SliderDrag {
    widget: WidgetId,
}

struct Env<'e, 'io, G> {
    game: &'e mut G,
    manager: &'e mut MenuManager<G>,
    commands: &'e mut CommandRegistry<G>,
    viewport: Vec2,
    io: &'e mut MenuIo<'io>,
}

impl<G> Env<'_, '_, G> {
    fn cue(&mut self, name: &'static str) {
        self.io.cues.play_cue(name);
    }

    fn player(&self) -> u32 {
        self.manager.top().map_or(0, |s| s.player())
    }
}

pub struct MenuRuntime {
    settings: MenuSettings,
    frame: Option<BuiltFrame>,
    focus: Option<WidgetId>,
    last_focus: HashMap<ScreenId, WidgetId>,
    previous: MenuInputState,
    left_repeat: RepeatTimer,
    right_repeat: RepeatTimer,
    erase_repeat: RepeatTimer,
    drag: Option<SliderDrag>,
    capture: Option<TextCapture>,
    text_input_on: bool,
    mouse_active: bool,
    rebuilds: u32,
}

impl Default for MenuRuntime {
    fn default() -> Self {
        Self::new(MenuSettings::default())
    }
}

impl MenuRuntime {
    pub fn new(settings: MenuSettings) -> Self {
        Self {
            settings,
            frame: None,
            focus: None,
            last_focus: HashMap::new(),
            previous: MenuInputState::default(),
            left_repeat: RepeatTimer::default(),
            right_repeat: RepeatTimer::default(),
            erase_repeat: RepeatTimer::default(),
            drag: None,
            capture: None,
            text_input_on: false,
            mouse_active: false,
            rebuilds: 0,
        }
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Latest build, for rendering.
    pub fn frame(&self) -> Option<&BuiltFrame> {
        self.frame.as_ref()
    }

    pub fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    pub fn focused_widget(&self) -> Option<&MenuWidget> {
        let focus = self.focus?;
        self.frame.as_ref()?.widget(focus)
    }

    /// Widget currently editing text, if any.
    pub fn capturing_text(&self) -> Option<WidgetId> {
        self.capture.as_ref().map(|c| c.widget)
    }

    pub fn dragging(&self) -> Option<WidgetId> {
        self.drag.map(|d| d.widget)
    }

    /// True when the mouse was the most recently used input device.
    pub fn mouse_active(&self) -> bool {
        self.mouse_active
    }

    /// Builds performed by the last update.
    pub fn rebuilds_last_update(&self) -> u32 {
        self.rebuilds
    }

    /// Run one frame of menu interaction.
    #[allow(clippy::too_many_arguments)]
    pub fn update<G>(
        &mut self,
        dt: f32,
        input: &MenuInputState,
        game: &mut G,
        manager: &mut MenuManager<G>,
        commands: &mut CommandRegistry<G>,
        viewport: Vec2,
        io: &mut MenuIo<'_>,
    ) {
        let mut env = Env {
            game,
            manager,
            commands,
            viewport,
            io,
        };
        self.rebuilds = 0;

        if env.manager.is_empty() {
            self.reset(&mut env);
            self.previous = input.clone();
            self.left_repeat.update(false, dt, 0.0, 0.0);
            self.right_repeat.update(false, dt, 0.0, 0.0);
            self.erase_repeat.update(false, dt, 0.0, 0.0);
            return;
        }

        self.tick_top(&mut env, dt);
        let mut events = self.collect_events(input, dt);
        self.previous = input.clone();
        self.run(&mut env, &mut events);
    }

    fn reset<G>(&mut self, env: &mut Env<'_, '_, G>) {
        self.stop_text_input(env);
        self.drag = None;
        self.frame = None;
        self.focus = None;
    }

    fn tick_top<G>(&mut self, env: &mut Env<'_, '_, G>, dt: f32) {
        let Some(top) = env.manager.top() else {
            return;
        };
        let controller = Rc::clone(&top.def().controller);
        let player = top.player();
        let mut ctx = MenuContext::new(&mut *env.game, &mut *env.manager, env.viewport, player);
        controller.tick(&mut ctx, dt);
    }

    fn collect_events(&mut self, input: &MenuInputState, dt: f32) -> VecDeque<MenuEvent> {
        let prev = &self.previous;
        let pressed = |now: bool, before: bool| now && !before;
        let mut events = VecDeque::new();

        let nav_pressed = pressed(input.up, prev.up)
            || pressed(input.down, prev.down)
            || pressed(input.left, prev.left)
            || pressed(input.right, prev.right)
            || pressed(input.select, prev.select)
            || pressed(input.back, prev.back)
            || pressed(input.page_prev, prev.page_prev)
            || pressed(input.page_next, prev.page_next);
        let mouse_pressed = pressed(input.mouse_down, prev.mouse_down);
        if nav_pressed {
            self.mouse_active = false;
        }
        if input.mouse_moved || mouse_pressed {
            self.mouse_active = true;
        }

        if !input.typed.is_empty() {
            events.push_back(MenuEvent::Type(input.typed.clone()));
        }
        let (delay, interval) = (self.settings.repeat_delay, self.settings.repeat_interval);
        if self.erase_repeat.update(input.erase, dt, delay, interval) {
            events.push_back(MenuEvent::Erase);
        }
        if pressed(input.up, prev.up) {
            events.push_back(MenuEvent::Up);
        }
        if pressed(input.down, prev.down) {
            events.push_back(MenuEvent::Down);
        }
        if self.left_repeat.update(input.left, dt, delay, interval) {
            events.push_back(MenuEvent::Left);
        }
        if self.right_repeat.update(input.right, dt, delay, interval) {
            events.push_back(MenuEvent::Right);
        }
        if pressed(input.select, prev.select) {
            events.push_back(MenuEvent::Select);
        }
        if pressed(input.back, prev.back) {
            events.push_back(MenuEvent::Back);
        }
        if pressed(input.page_prev, prev.page_prev) {
            events.push_back(MenuEvent::PagePrev);
        }
        if pressed(input.page_next, prev.page_next) {
            events.push_back(MenuEvent::PageNext);
        }
        if let Some(n) = input.quick_value {
            if prev.quick_value != Some(n) {
                events.push_back(MenuEvent::Quick(n));
            }
        }
        if self.mouse_active && input.wheel > 0.0 {
            events.push_back(MenuEvent::Up);
        } else if self.mouse_active && input.wheel < 0.0 {
            events.push_back(MenuEvent::Down);
        }

        match (self.drag.is_some(), input.mouse) {
            (true, _) if !input.mouse_down => events.push_back(MenuEvent::Release),
            (true, Some(p)) if input.mouse_moved => events.push_back(MenuEvent::Drag(p)),
            (false, Some(p)) if mouse_pressed => events.push_back(MenuEvent::Click(p)),
            (false, Some(p)) if input.mouse_moved => events.push_back(MenuEvent::Hover(p)),
            _ => {}
        }
        events
    }

    fn run<G>(&mut self, env: &mut Env<'_, '_, G>, events: &mut VecDeque<MenuEvent>) {
        let max = self.settings.max_rebuilds_per_update.max(1);
        loop {
            if env.manager.is_empty() {
                self.reset(env);
                return;
            }
            if self.rebuilds >= max {
                log::warn!(
                    "menu rebuilt {max} times in one update, dropping {} pending events",
                    events.len()
                );
                events.clear();
                return;
            }
            self.rebuild(env);
            self.rebuilds += 1;

            // A frame action pushed or popped a screen.
            let top = env.manager.top().map(|s| s.serial());
            if top != self.frame.as_ref().map(|f| f.serial) {
                continue;
            }

            let mut dirty = false;
            while let Some(event) = events.pop_front() {
                if self.handle(env, event) {
                    dirty = true;
                    break;
                }
            }
            if !dirty {
                return;
            }
        }
    }

    fn rebuild<G>(&mut self, env: &mut Env<'_, '_, G>) {
        let Some(top) = env.manager.top() else {
            return;
        };
        let screen = top.id();
        let serial = top.serial();
        let player = top.player();
        let default_layout = top.def().default_layout;
        let controller = Rc::clone(&top.def().controller);

        let built = {
            let mut ctx = MenuContext::new(&mut *env.game, &mut *env.manager, env.viewport, player);
            controller.build(&mut ctx)
        };
        let layout = built.layout.unwrap_or(default_layout);
        let rects = built
            .widgets
            .iter()
            .map(|w| {
                let bounds = env
                    .io
                    .layouts
                    .resolve(layout, w.slot, env.viewport)
                    .map(|r| r.scaled(env.viewport))
                    .unwrap_or(Rect::ZERO);
                widget_rects(w, bounds)
            })
            .collect();

        let entered = self.frame.as_ref().is_none_or(|f| f.serial != serial);
        if entered {
            self.drag = None;
            self.stop_text_input(env);
        }
        self.frame = Some(BuiltFrame {
            screen,
            serial,
            layout,
            viewport: env.viewport,
            widgets: built.widgets,
            rects,
            default_focus: built.default_focus,
        });

        for action in &built.frame_actions {
            self.execute(env, action);
        }
        self.resolve_focus(screen, entered);

        let Some(frame) = self.frame.as_ref() else {
            return;
        };
        let capture_lost = self
            .capture
            .as_ref()
            .is_some_and(|c| frame.widget(c.widget).and_then(|w| w.text_target()).is_none());
        let drag_lost = self.drag.is_some_and(|d| {
            !matches!(frame.widget(d.widget).map(|w| &w.kind), Some(WidgetKind::Slider(_)))
        });
        if capture_lost {
            self.stop_text_input(env);
        }
        if drag_lost {
            self.drag = None;
        }
    }

    /// Keep focus across rebuilds of the same screen instance. A screen
    /// being entered restores its remembered focus, except on transient
    /// widgets (back and paging buttons).
    fn resolve_focus(&mut self, screen: ScreenId, entered: bool) {
        let Some(frame) = self.frame.as_ref() else {
            return;
        };
        let focusable = |id: &WidgetId| frame.widget(*id).is_some_and(|w| w.is_focusable());
        let remembered = self.last_focus.get(&screen).copied();
        let kept = if entered {
            remembered.filter(|&id| focusable(&id) && frame.widget(id).is_some_and(|w| !w.is_transient()))
        } else {
            self.focus.or(remembered).filter(focusable)
        };
        let focus = kept
            .or_else(|| frame.default_focus.filter(focusable))
            .or_else(|| frame.widgets.iter().find(|w| w.is_focusable()).map(|w| w.id));
        if focus != remembered {
            log::debug!("focus on {screen:?} falls back from {remembered:?} to {focus:?}");
        }
        self.focus = focus;
        match focus {
            Some(id) => {
                self.last_focus.insert(screen, id);
            }
            None => {
                self.last_focus.remove(&screen);
            }
        }
    }

    fn set_focus(&mut self, id: WidgetId) {
        self.focus = Some(id);
        if let Some(frame) = self.frame.as_ref() {
            self.last_focus.insert(frame.screen, id);
        }
    }

    fn focused(&self) -> Option<MenuWidget> {
        self.focused_widget().cloned()
    }

    fn exists(&self, id: WidgetId) -> bool {
        self.frame.as_ref().is_some_and(|f| f.widget(id).is_some())
    }

    /// Process one event. True if it changed state that requires a rebuild.
    fn handle<G>(&mut self, env: &mut Env<'_, '_, G>, event: MenuEvent) -> bool {
        if self.capture.is_some() {
            return match event {
                MenuEvent::Type(text) => self.type_text(&text),
                MenuEvent::Erase => self.erase(),
                MenuEvent::Back => {
                    let ok = self.commit_capture(env);
                    env.cue(if ok { cue::CONFIRM } else { cue::REJECT });
                    true
                }
                MenuEvent::Click(p) => {
                    let inside = self
                        .frame
                        .as_ref()
                        .and_then(|f| f.hit(p).map(|i| f.widgets[i].id))
                        == self.capturing_text();
                    if inside {
                        return false;
                    }
                    self.commit_capture(env);
                    self.click(env, p);
                    true
                }
                _ => false,
            };
        }

        match event {
            MenuEvent::Up => self.move_focus(env, |n| n.up),
            MenuEvent::Down => self.move_focus(env, |n| n.down),
            MenuEvent::Left => self.horizontal(env, Side::Left),
            MenuEvent::Right => self.horizontal(env, Side::Right),
            MenuEvent::Select => self.select(env),
            MenuEvent::Back => self.back(env),
            MenuEvent::PagePrev => self.page(env, PAGE_PREV_SLOTS, cue::LEFT),
            MenuEvent::PageNext => self.page(env, PAGE_NEXT_SLOTS, cue::RIGHT),
            MenuEvent::Quick(n) => self.quick(env, n),
            MenuEvent::Hover(p) => self.hover(env, p),
            MenuEvent::Click(p) => self.click(env, p),
            MenuEvent::Drag(p) => self.drag_to(p),
            MenuEvent::Release => self.release(env),
            MenuEvent::Type(_) | MenuEvent::Erase => false,
        }
    }

    fn execute<G>(&mut self, env: &mut Env<'_, '_, G>, action: &MenuAction) -> bool {
        match action {
            MenuAction::None => false,
            MenuAction::PushScreen(id) => {
                let player = env.player();
                env.manager.push_screen(*id, player)
            }
            MenuAction::PopScreen => env.manager.pop_screen(),
            MenuAction::RequestFocus(id) => {
                self.set_focus(*id);
                true
            }
            MenuAction::ToggleBool(cell) => {
                cell.set(!cell.get());
                true
            }
            MenuAction::SetFloat(cell, value) => {
                cell.set(*value);
                true
            }
            MenuAction::DeltaFloat(cell, delta) => {
                cell.set(cell.get() + delta);
                true
            }
            MenuAction::RunCommand(id, payload) => {
                let player = env.player();
                let mut ctx = MenuContext::new(&mut *env.game, &mut *env.manager, env.viewport, player);
                env.commands.invoke(*id, &mut ctx, *payload)
            }
        }
    }

    /// Fire a widget action with its cue. Always needs a rebuild.
    fn fire<G>(&mut self, env: &mut Env<'_, '_, G>, action: &MenuAction, accepted: &'static str) -> bool {
        let ok = self.execute(env, action);
        env.cue(if ok { accepted } else { cue::REJECT });
        true
    }

    fn reject<G>(&mut self, env: &mut Env<'_, '_, G>) -> bool {
        env.cue(cue::REJECT);
        false
    }

    fn move_focus<G>(&mut self, env: &mut Env<'_, '_, G>, edge: fn(&NavEdges) -> Option<WidgetId>) -> bool {
        let target = self
            .focused()
            .and_then(|w| edge(&w.nav))
            .filter(|&id| self.exists(id));
        match target {
            Some(id) => {
                self.set_focus(id);
                env.cue(cue::MOVE);
                false
            }
            None => self.reject(env),
        }
    }

    fn horizontal<G>(&mut self, env: &mut Env<'_, '_, G>, side: Side) -> bool {
        let Some(w) = self.focused() else {
            return self.reject(env);
        };
        let (action, edge, accepted) = match side {
            Side::Left => (&w.actions.on_left, w.nav.left, cue::LEFT),
            Side::Right => (&w.actions.on_right, w.nav.right, cue::RIGHT),
        };
        if action.is_some() {
            if w.disabled {
                return self.reject(env);
            }
            let rebuild = self.fire(env, action, accepted);
            if let WidgetKind::Slider(spec) = &w.kind {
                spec.store(spec.value.get());
            }
            return rebuild;
        }
        match edge.filter(|&id| self.exists(id)) {
            Some(id) => {
                self.set_focus(id);
                env.cue(cue::MOVE);
                false
            }
            None => self.reject(env),
        }
    }

    fn select<G>(&mut self, env: &mut Env<'_, '_, G>) -> bool {
        let Some(w) = self.focused() else {
            return self.reject(env);
        };
        if w.disabled {
            return self.reject(env);
        }
        let edits_on_select = match &w.kind {
            WidgetKind::TextInput(spec) => spec.edit_on_select,
            WidgetKind::Slider(spec) => spec.entry.is_some(),
            _ => false,
        };
        if edits_on_select {
            self.begin_capture(env, &w);
            env.cue(cue::CONFIRM);
            return true;
        }
        if w.actions.on_select.is_some() {
            return self.fire(env, &w.actions.on_select, cue::CONFIRM);
        }
        self.reject(env)
    }

    fn back<G>(&mut self, env: &mut Env<'_, '_, G>) -> bool {
        if let Some(w) = self.focused() {
            if w.actions.on_back.is_some() {
                return self.fire(env, &w.actions.on_back, cue::BACK);
            }
        }
        if env.manager.depth() > 1 {
            env.manager.pop_screen();
            env.cue(cue::BACK);
            return true;
        }
        self.reject(env)
    }

    fn page<G>(&mut self, env: &mut Env<'_, '_, G>, slots: &[&str], accepted: &'static str) -> bool {
        let target = self.frame.as_ref().and_then(|f| f.find_slot(slots)).cloned();
        match target {
            Some(w) if !w.disabled && w.actions.on_select.is_some() => {
                self.fire(env, &w.actions.on_select, accepted)
            }
            _ => self.reject(env),
        }
    }

    fn quick<G>(&mut self, env: &mut Env<'_, '_, G>, n: u8) -> bool {
        let Some(w) = self.focused() else {
            return self.reject(env);
        };
        let WidgetKind::Slider(spec) = &w.kind else {
            return self.reject(env);
        };
        let Some(&value) = spec.quick.get(n as usize) else {
            return self.reject(env);
        };
        if w.disabled {
            return self.reject(env);
        }
        spec.store(value);
        if w.actions.on_select.is_some() {
            self.execute(env, &w.actions.on_select);
        }
        env.cue(cue::CONFIRM);
        true
    }

    fn hover<G>(&mut self, env: &mut Env<'_, '_, G>, p: Vec2) -> bool {
        if !self.mouse_active {
            return false;
        }
        let hit = self.frame.as_ref().and_then(|f| f.hit(p).map(|i| f.widgets[i].id));
        if let Some(id) = hit {
            if Some(id) != self.focus {
                self.set_focus(id);
                env.cue(cue::MOVE);
            }
        }
        false
    }

    fn click<G>(&mut self, env: &mut Env<'_, '_, G>, p: Vec2) -> bool {
        let Some(frame) = self.frame.as_ref() else {
            return false;
        };
        let Some(index) = frame.hit(p) else {
            return false;
        };
        let w = frame.widgets[index].clone();
        let rects = frame.rects[index];
        self.set_focus(w.id);

        match &w.kind {
            WidgetKind::Slider(spec) => {
                if spec.entry.is_some() && rects.entry.is_some_and(|r| r.contains(p)) {
                    if w.disabled {
                        return self.reject(env);
                    }
                    self.begin_capture(env, &w);
                    env.cue(cue::CONFIRM);
                    return true;
                }
                if let Some(track) = rects.track.filter(|r| r.contains(p)) {
                    if w.disabled {
                        return self.reject(env);
                    }
                    spec.store(spec.value_at(track.fraction_x(p)));
                    self.drag = Some(SliderDrag { widget: w.id });
                    return true;
                }
            }
            WidgetKind::OptionCycle { .. } => {
                if rects.arrow_left.is_some_and(|r| r.contains(p)) {
                    return self.horizontal(env, Side::Left);
                }
                if rects.arrow_right.is_some_and(|r| r.contains(p)) {
                    return self.horizontal(env, Side::Right);
                }
            }
            _ => {}
        }
        self.select(env)
    }

    fn drag_to(&mut self, p: Vec2) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(frame) = self.frame.as_ref() else {
            return false;
        };
        let track = frame.rects_of(drag.widget).and_then(|r| r.track);
        match (frame.widget(drag.widget).map(|w| &w.kind), track) {
            (Some(WidgetKind::Slider(spec)), Some(track)) => {
                spec.store(spec.value_at(track.fraction_x(p)));
                true
            }
            _ => {
                self.drag = None;
                false
            }
        }
    }

    /// Drag release commits the value through `on_select`, once.
    fn release<G>(&mut self, env: &mut Env<'_, '_, G>) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let commit = self
            .frame
            .as_ref()
            .and_then(|f| f.widget(drag.widget))
            .map(|w| w.actions.on_select.clone());
        match commit {
            Some(action) if action.is_some() => self.fire(env, &action, cue::CONFIRM),
            Some(_) => true,
            None => false,
        }
    }

    fn begin_capture<G>(&mut self, env: &mut Env<'_, '_, G>, widget: &MenuWidget) {
        let Some((buffer, _)) = widget.text_target() else {
            return;
        };
        self.capture = Some(TextCapture {
            widget: widget.id,
            original: buffer.borrow().clone(),
        });
        if !self.text_input_on {
            env.io.text_input.set_text_input(true);
            self.text_input_on = true;
        }
        log::debug!("text capture begins on {:?}", widget.id);
    }

    fn stop_text_input<G>(&mut self, env: &mut Env<'_, '_, G>) {
        if let Some(capture) = self.capture.take() {
            log::debug!("text capture ends on {:?}", capture.widget);
        }
        if self.text_input_on {
            env.io.text_input.set_text_input(false);
            self.text_input_on = false;
        }
    }

    fn capture_buffer(&self) -> Option<(TextCell, usize)> {
        let capture = self.capture.as_ref()?;
        self.frame.as_ref()?.widget(capture.widget)?.text_target()
    }

    fn type_text(&mut self, text: &str) -> bool {
        let Some((buffer, max_len)) = self.capture_buffer() else {
            return false;
        };
        let mut buffer = buffer.borrow_mut();
        let mut len = buffer.chars().count();
        for ch in text.chars().filter(|c| !c.is_control()) {
            if len >= max_len {
                break;
            }
            buffer.push(ch);
            len += 1;
        }
        true
    }

    fn erase(&mut self) -> bool {
        let Some((buffer, _)) = self.capture_buffer() else {
            return false;
        };
        buffer.borrow_mut().pop().is_some()
    }

    /// Apply the edited buffer and leave text capture. Unparseable or empty
    /// input restores the text from before editing. A successful commit
    /// fires the widget's `on_select`.
    fn commit_capture<G>(&mut self, env: &mut Env<'_, '_, G>) -> bool {
        let Some(capture) = self.capture.clone() else {
            return false;
        };
        let widget = self
            .frame
            .as_ref()
            .and_then(|f| f.widget(capture.widget))
            .cloned();
        self.stop_text_input(env);
        let Some(w) = widget else {
            return false;
        };
        let Some((buffer, _)) = w.text_target() else {
            return false;
        };
        let text = buffer.borrow().trim().to_string();

        let ok = match &w.kind {
            WidgetKind::TextInput(spec) => match &spec.commit {
                TextCommit::Text => !text.is_empty(),
                TextCommit::Float { value, min, max } => match text.parse::<f32>() {
                    Ok(v) if v.is_finite() => {
                        let v = v.clamp(min.min(*max), max.max(*min));
                        value.set(v);
                        true
                    }
                    _ => false,
                },
            },
            WidgetKind::Slider(spec) => match text.parse::<f32>() {
                Ok(v) if v.is_finite() => {
                    spec.store(v);
                    true
                }
                _ => false,
            },
            _ => false,
        };

        if !ok {
            *buffer.borrow_mut() = capture.original;
            return false;
        }
        if w.actions.on_select.is_some() {
            self.execute(env, &w.actions.on_select);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_timer_delay_then_interval() {
        let mut t = RepeatTimer::default();
        assert!(t.update(true, 0.016, 0.35, 0.08));
        assert!(!t.update(true, 0.2, 0.35, 0.08));
        assert!(t.update(true, 0.2, 0.35, 0.08));
        assert!(!t.update(true, 0.05, 0.35, 0.08));
        assert!(t.update(true, 0.05, 0.35, 0.08));
        assert!(!t.update(false, 0.05, 0.35, 0.08));
        assert!(t.update(true, 0.05, 0.35, 0.08));
    }
}
