//! Menu Widgets
//!
//! Per-build widget descriptors. A screen returns a fresh list every time it
//! is built; nothing here outlives that build except through the shared
//! cells the widgets point at.

use smallvec::SmallVec;

use super::action::{BoolCell, FloatCell, MenuAction, TextCell};

/// Identity of a widget within one screen. Stable across rebuilds as long as
/// the builder keeps emitting the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

/// Where a widget sits in the screen's layout: a slot name plus a row index
/// for repeated slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub name: &'static str,
    pub index: u16,
}

impl SlotRef {
    pub const fn new(name: &'static str) -> Self {
        Self { name, index: 0 }
    }

    pub const fn at(name: &'static str, index: u16) -> Self {
        Self { name, index }
    }
}

// ============================================================================
// TRANSIENT SLOTS
// ============================================================================

/// Slots holding a "previous page" widget, across screen families.
pub const PAGE_PREV_SLOTS: &[&str] = &["page_prev", "list_page_prev", "binds_page_prev"];
/// Slots holding a "next page" widget, across screen families.
pub const PAGE_NEXT_SLOTS: &[&str] = &["page_next", "list_page_next", "binds_page_next"];
/// Slots holding a footer back button.
pub const BACK_SLOTS: &[&str] = &["back", "footer_back"];

/// True for slots whose widgets never keep focus across a rebuild.
pub fn is_transient_slot(name: &str) -> bool {
    PAGE_PREV_SLOTS
        .iter()
        .chain(PAGE_NEXT_SLOTS)
        .chain(BACK_SLOTS)
        .any(|s| *s == name)
}

// ============================================================================
// WIDGET KINDS
// ============================================================================

/// Maximum number of quick values on a slider.
pub const MAX_QUICK_VALUES: usize = 4;

#[derive(Debug, Clone)]
pub struct SliderSpec {
    pub value: FloatCell,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Numeric entry box text, kept in sync with `value`.
    pub entry: Option<TextCell>,
    pub quick: SmallVec<[f32; MAX_QUICK_VALUES]>,
}

impl SliderSpec {
    pub fn new(value: FloatCell, min: f32, max: f32, step: f32) -> Self {
        Self {
            value,
            min,
            max,
            step,
            entry: None,
            quick: SmallVec::new(),
        }
    }

    /// Attach a numeric entry box. The text is left as is, since the cell
    /// may hold an edit in progress; see [`SliderSpec::sync_entry`].
    pub fn with_entry(mut self, entry: TextCell) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Quick values past [`MAX_QUICK_VALUES`] are dropped.
    pub fn with_quick_values(mut self, values: &[f32]) -> Self {
        self.quick = values.iter().copied().take(MAX_QUICK_VALUES).collect();
        self
    }

    pub fn clamp(&self, value: f32) -> f32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        if value.is_nan() { lo } else { value.clamp(lo, hi) }
    }

    /// Value for a normalized track position, snapped to `step`.
    pub fn value_at(&self, t: f32) -> f32 {
        let raw = self.min + t.clamp(0.0, 1.0) * (self.max - self.min);
        if self.step > 0.0 {
            self.clamp(self.min + ((raw - self.min) / self.step).round() * self.step)
        } else {
            self.clamp(raw)
        }
    }

    pub fn format_value(&self, value: f32) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else if self.step >= 0.1 {
            1
        } else {
            2
        };
        format!("{value:.decimals$}")
    }

    /// Rewrite the entry text from the current value.
    pub fn sync_entry(&self) {
        self.store(self.value.get());
    }

    /// Clamp the bound value and refresh the entry text.
    pub fn store(&self, value: f32) {
        let value = self.clamp(value);
        self.value.set(value);
        if let Some(entry) = &self.entry {
            *entry.borrow_mut() = self.format_value(value);
        }
    }
}

/// How a text input's buffer is applied when editing ends.
#[derive(Debug, Clone)]
pub enum TextCommit {
    /// The buffer is the value. An empty buffer restores the previous text.
    Text,
    /// Parse as a number, clamp, and store; unparseable text is discarded.
    Float { value: FloatCell, min: f32, max: f32 },
}

#[derive(Debug, Clone)]
pub struct TextInputSpec {
    pub buffer: TextCell,
    /// Maximum length in characters.
    pub max_len: usize,
    /// Select starts editing instead of firing `on_select`; `on_select`
    /// then fires once after a successful commit.
    pub edit_on_select: bool,
    pub commit: TextCommit,
}

impl TextInputSpec {
    pub fn text(buffer: TextCell, max_len: usize) -> Self {
        Self {
            buffer,
            max_len,
            edit_on_select: true,
            commit: TextCommit::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub enum WidgetKind {
    Label,
    Button,
    Toggle { value: BoolCell },
    Slider(SliderSpec),
    OptionCycle { current: usize, count: usize },
    TextInput(TextInputSpec),
    Card,
}

// ============================================================================
// WIDGET
// ============================================================================

/// Neighbours for directional navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavEdges {
    pub up: Option<WidgetId>,
    pub down: Option<WidgetId>,
    pub left: Option<WidgetId>,
    pub right: Option<WidgetId>,
}

#[derive(Debug, Clone, Default)]
pub struct WidgetActions {
    pub on_select: MenuAction,
    pub on_left: MenuAction,
    pub on_right: MenuAction,
    pub on_back: MenuAction,
}

#[derive(Debug, Clone)]
pub struct MenuWidget {
    pub id: WidgetId,
    pub slot: SlotRef,
    pub kind: WidgetKind,
    pub label: String,
    pub secondary: String,
    pub tertiary: String,
    pub badge: String,
    pub nav: NavEdges,
    pub actions: WidgetActions,
    /// Disabled widgets can hold focus but reject activation.
    pub disabled: bool,
}

impl MenuWidget {
    pub fn new(id: WidgetId, slot: SlotRef, kind: WidgetKind, label: impl Into<String>) -> Self {
        Self {
            id,
            slot,
            kind,
            label: label.into(),
            secondary: String::new(),
            tertiary: String::new(),
            badge: String::new(),
            nav: NavEdges::default(),
            actions: WidgetActions::default(),
            disabled: false,
        }
    }

    pub fn label(id: WidgetId, slot: SlotRef, text: impl Into<String>) -> Self {
        Self::new(id, slot, WidgetKind::Label, text)
    }

    pub fn button(id: WidgetId, slot: SlotRef, text: impl Into<String>, on_select: MenuAction) -> Self {
        Self::new(id, slot, WidgetKind::Button, text).on_select(on_select)
    }

    pub fn card(id: WidgetId, slot: SlotRef, text: impl Into<String>, on_select: MenuAction) -> Self {
        Self::new(id, slot, WidgetKind::Card, text).on_select(on_select)
    }

    /// Select flips the bound value.
    pub fn toggle(id: WidgetId, slot: SlotRef, text: impl Into<String>, value: BoolCell) -> Self {
        let on_select = MenuAction::ToggleBool(value.clone());
        Self::new(id, slot, WidgetKind::Toggle { value }, text).on_select(on_select)
    }

    /// Left/right step the bound value by `spec.step`.
    pub fn slider(id: WidgetId, slot: SlotRef, text: impl Into<String>, spec: SliderSpec) -> Self {
        let on_left = MenuAction::DeltaFloat(spec.value.clone(), -spec.step);
        let on_right = MenuAction::DeltaFloat(spec.value.clone(), spec.step);
        Self::new(id, slot, WidgetKind::Slider(spec), text)
            .on_left(on_left)
            .on_right(on_right)
    }

    pub fn option_cycle(
        id: WidgetId,
        slot: SlotRef,
        text: impl Into<String>,
        current: usize,
        count: usize,
    ) -> Self {
        Self::new(id, slot, WidgetKind::OptionCycle { current, count }, text)
    }

    pub fn text_input(id: WidgetId, slot: SlotRef, text: impl Into<String>, spec: TextInputSpec) -> Self {
        Self::new(id, slot, WidgetKind::TextInput(spec), text)
    }

    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary = text.into();
        self
    }

    pub fn with_tertiary(mut self, text: impl Into<String>) -> Self {
        self.tertiary = text.into();
        self
    }

    pub fn with_badge(mut self, text: impl Into<String>) -> Self {
        self.badge = text.into();
        self
    }

    pub fn with_nav(mut self, nav: NavEdges) -> Self {
        self.nav = nav;
        self
    }

    pub fn nav_left(mut self, id: WidgetId) -> Self {
        self.nav.left = Some(id);
        self
    }

    pub fn nav_right(mut self, id: WidgetId) -> Self {
        self.nav.right = Some(id);
        self
    }

    pub fn on_select(mut self, action: MenuAction) -> Self {
        self.actions.on_select = action;
        self
    }

    pub fn on_left(mut self, action: MenuAction) -> Self {
        self.actions.on_left = action;
        self
    }

    pub fn on_right(mut self, action: MenuAction) -> Self {
        self.actions.on_right = action;
        self
    }

    pub fn on_back(mut self, action: MenuAction) -> Self {
        self.actions.on_back = action;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Labels are never focused.
    pub fn is_focusable(&self) -> bool {
        !matches!(self.kind, WidgetKind::Label)
    }

    pub fn is_transient(&self) -> bool {
        is_transient_slot(self.slot.name)
    }

    /// Text buffer edited while this widget captures text, with its limit.
    pub fn text_target(&self) -> Option<(TextCell, usize)> {
        match &self.kind {
            WidgetKind::TextInput(spec) => Some((spec.buffer.clone(), spec.max_len)),
            WidgetKind::Slider(SliderSpec { entry: Some(entry), .. }) => Some((entry.clone(), 16)),
            _ => None,
        }
    }
}

/// Fill in missing up/down edges between consecutive focusable widgets.
pub fn link_vertical(widgets: &mut [MenuWidget]) {
    let focusable: Vec<usize> = widgets
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_focusable())
        .map(|(i, _)| i)
        .collect();
    for pair in focusable.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (id_a, id_b) = (widgets[a].id, widgets[b].id);
        widgets[a].nav.down.get_or_insert(id_b);
        widgets[b].nav.up.get_or_insert(id_a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::action::{float_cell, text_cell};

    #[test]
    fn test_slider_actions_and_snapping() {
        let value = float_cell(0.5);
        let spec = SliderSpec::new(value.clone(), 0.0, 1.0, 0.1);
        assert_eq!(spec.value_at(0.44), 0.4);
        assert_eq!(spec.value_at(2.0), 1.0);

        let w = MenuWidget::slider(WidgetId(1), SlotRef::new("row"), "Volume", spec);
        assert!(matches!(w.actions.on_left, MenuAction::DeltaFloat(_, d) if d < 0.0));
        assert!(matches!(w.actions.on_right, MenuAction::DeltaFloat(_, d) if d > 0.0));
    }

    #[test]
    fn test_slider_store_syncs_entry() {
        let entry = text_cell("");
        let spec = SliderSpec::new(float_cell(0.25), 0.0, 1.0, 0.05).with_entry(entry.clone());
        assert_eq!(*entry.borrow(), "");
        spec.sync_entry();
        assert_eq!(*entry.borrow(), "0.25");
        spec.store(3.0);
        assert_eq!(spec.value.get(), 1.0);
        assert_eq!(*entry.borrow(), "1.00");
    }

    #[test]
    fn test_quick_values_capped() {
        let spec = SliderSpec::new(float_cell(0.0), 0.0, 1.0, 0.1)
            .with_quick_values(&[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(spec.quick.len(), MAX_QUICK_VALUES);
    }

    #[test]
    fn test_transient_slots() {
        assert!(is_transient_slot("page_next"));
        assert!(is_transient_slot("footer_back"));
        assert!(!is_transient_slot("row"));
    }

    #[test]
    fn test_link_vertical_skips_labels_and_keeps_explicit_edges() {
        let mut widgets = vec![
            MenuWidget::button(WidgetId(1), SlotRef::new("a"), "A", MenuAction::None),
            MenuWidget::label(WidgetId(2), SlotRef::new("b"), "Heading"),
            MenuWidget::button(WidgetId(3), SlotRef::new("c"), "C", MenuAction::None),
            MenuWidget::button(WidgetId(4), SlotRef::new("d"), "D", MenuAction::None),
        ];
        widgets[3].nav.up = Some(WidgetId(1));
        link_vertical(&mut widgets);
        assert_eq!(widgets[0].nav.down, Some(WidgetId(3)));
        assert_eq!(widgets[2].nav.up, Some(WidgetId(1)));
        assert_eq!(widgets[3].nav.up, Some(WidgetId(1)));
        assert_eq!(widgets[1].nav, NavEdges::default());
    }
}
