//! Layout Resolution
//!
//! Widgets name a layout slot; a [`LayoutResolver`] turns (layout, slot,
//! viewport) into a normalized rectangle. [`LayoutLibrary`] is the JSON-backed
//! resolver: each layout carries variants authored for reference resolutions
//! and the variant closest in aspect ratio (then area) to the viewport wins.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::widget::{MenuWidget, SlotRef, WidgetKind};
use crate::config::ConfigError;
use crate::geometry::Rect;

/// Resolves layout slots to normalized (0..1) rectangles.
pub trait LayoutResolver {
    fn resolve(&self, layout: &str, slot: SlotRef, viewport: Vec2) -> Option<Rect>;
}

impl<F: Fn(&str, SlotRef, Vec2) -> Option<Rect>> LayoutResolver for F {
    fn resolve(&self, layout: &str, slot: SlotRef, viewport: Vec2) -> Option<Rect> {
        self(layout, slot, viewport)
    }
}

// ============================================================================
// LAYOUT LIBRARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    pub rect: Rect,
    /// Offset applied per row index for repeated slots.
    #[serde(default)]
    pub step: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutVariant {
    /// Reference resolution this variant was authored for.
    pub width: f32,
    pub height: f32,
    pub slots: BTreeMap<String, SlotRect>,
}

impl LayoutVariant {
    fn aspect(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 0.0 }
    }

    pub fn slot(&self, slot: SlotRef) -> Option<Rect> {
        self.slots.get(slot.name).map(|s| Rect {
            min: s.rect.min + s.step * slot.index as f32,
            size: s.rect.size,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub variants: Vec<LayoutVariant>,
}

impl Layout {
    /// Variant nearest in aspect ratio to `viewport`, ties broken by area.
    pub fn variant_for(&self, viewport: Vec2) -> Option<&LayoutVariant> {
        let aspect = if viewport.y > 0.0 { viewport.x / viewport.y } else { 0.0 };
        let area = viewport.x * viewport.y;
        self.variants.iter().min_by(|a, b| {
            let da = (a.aspect() - aspect).abs();
            let db = (b.aspect() - aspect).abs();
            if (da - db).abs() > 1e-3 {
                da.total_cmp(&db)
            } else {
                let aa = (a.width * a.height - area).abs();
                let ab = (b.width * b.height - area).abs();
                aa.total_cmp(&ab)
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutLibrary {
    pub layouts: Vec<Layout>,
}

impl LayoutLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let library = Self::from_json(&data).inspect_err(|e| {
            log::warn!("unparseable layout file {}: {e}", path.display());
        })?;
        log::info!("loaded {} layouts from {}", library.layouts.len(), path.display());
        Ok(library)
    }

    /// Add a layout, replacing one with the same name.
    pub fn insert(&mut self, layout: Layout) {
        self.layouts.retain(|l| l.name != layout.name);
        self.layouts.push(layout);
    }

    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.name == name)
    }
}

impl LayoutResolver for LayoutLibrary {
    fn resolve(&self, layout: &str, slot: SlotRef, viewport: Vec2) -> Option<Rect> {
        self.get(layout)?.variant_for(viewport)?.slot(slot)
    }
}

// ============================================================================
// WIDGET RECTS
// ============================================================================

/// Hit regions of a widget, in render-target pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidgetRects {
    pub bounds: Rect,
    /// Slider track.
    pub track: Option<Rect>,
    /// Slider numeric entry box.
    pub entry: Option<Rect>,
    /// Option-cycle arrows.
    pub arrow_left: Option<Rect>,
    pub arrow_right: Option<Rect>,
}

/// Fraction of a slider row used by its label.
const SLIDER_LABEL_FRACTION: f32 = 0.4;
/// Fraction of a slider row used by the numeric entry box.
const SLIDER_ENTRY_FRACTION: f32 = 0.2;
/// Fraction of an option row used by the value area.
const OPTION_VALUE_FRACTION: f32 = 0.5;
/// Fraction of the value area each arrow takes.
const OPTION_ARROW_FRACTION: f32 = 0.15;

/// Split a widget's bounds into its sub-regions.
pub fn widget_rects(widget: &MenuWidget, bounds: Rect) -> WidgetRects {
    let mut rects = WidgetRects {
        bounds,
        ..Default::default()
    };
    if bounds.is_empty() {
        return rects;
    }
    match &widget.kind {
        WidgetKind::Slider(spec) => {
            let rest = if spec.entry.is_some() {
                let (rest, entry) = bounds.split_right(bounds.size.x * SLIDER_ENTRY_FRACTION);
                rects.entry = Some(entry);
                rest
            } else {
                bounds
            };
            let (_, track) = rest.split_left(bounds.size.x * SLIDER_LABEL_FRACTION);
            rects.track = Some(track);
        }
        WidgetKind::OptionCycle { .. } => {
            let (_, value) = bounds.split_right(bounds.size.x * OPTION_VALUE_FRACTION);
            let arrow = value.size.x * OPTION_ARROW_FRACTION;
            rects.arrow_left = Some(value.split_left(arrow).0);
            rects.arrow_right = Some(value.split_right(arrow).1);
        }
        _ => {}
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::action::{MenuAction, float_cell, text_cell};
    use crate::menu::widget::{SliderSpec, WidgetId};

    const LIBRARY: &str = r#"{
        "layouts": [{
            "name": "list",
            "variants": [
                { "width": 1920, "height": 1080, "slots": {
                    "title": { "rect": { "min": [0.1, 0.05], "size": [0.8, 0.1] } },
                    "row":   { "rect": { "min": [0.1, 0.2], "size": [0.8, 0.08] }, "step": [0.0, 0.1] }
                } },
                { "width": 1024, "height": 768, "slots": {
                    "title": { "rect": { "min": [0.05, 0.05], "size": [0.9, 0.1] } }
                } },
                { "width": 1280, "height": 720, "slots": {
                    "title": { "rect": { "min": [0.2, 0.05], "size": [0.6, 0.1] } }
                } }
            ]
        }]
    }"#;

    #[test]
    fn test_variant_by_aspect_then_area() {
        let library = LayoutLibrary::from_json(LIBRARY).unwrap();
        let layout = library.get("list").unwrap();
        assert_eq!(layout.variant_for(Vec2::new(800.0, 600.0)).unwrap().width, 1024.0);
        assert_eq!(layout.variant_for(Vec2::new(1366.0, 768.0)).unwrap().width, 1280.0);
        assert_eq!(layout.variant_for(Vec2::new(2560.0, 1440.0)).unwrap().width, 1920.0);
    }

    #[test]
    fn test_repeated_slot_rows() {
        let library = LayoutLibrary::from_json(LIBRARY).unwrap();
        let row2 = library
            .resolve("list", SlotRef::at("row", 2), Vec2::new(1920.0, 1080.0))
            .unwrap();
        assert!((row2.min.y - 0.4).abs() < 1e-5, "{row2:?}");
        assert!(library.resolve("list", SlotRef::new("missing"), Vec2::new(1920.0, 1080.0)).is_none());
        assert!(library.resolve("nope", SlotRef::new("title"), Vec2::new(1920.0, 1080.0)).is_none());
    }

    #[test]
    fn test_malformed_library_is_error() {
        assert!(LayoutLibrary::from_json("{\"layouts\": 5}").is_err());
    }

    #[test]
    fn test_slider_sub_regions() {
        let spec = SliderSpec::new(float_cell(0.0), 0.0, 1.0, 0.1).with_entry(text_cell(""));
        let w = MenuWidget::slider(WidgetId(1), SlotRef::new("row"), "Volume", spec);
        let rects = widget_rects(&w, Rect::new(0.0, 0.0, 1000.0, 50.0));
        let entry = rects.entry.unwrap();
        let track = rects.track.unwrap();
        assert_eq!(entry, Rect::new(800.0, 0.0, 200.0, 50.0));
        assert_eq!(track, Rect::new(400.0, 0.0, 400.0, 50.0));
    }

    #[test]
    fn test_option_arrows() {
        let w = MenuWidget::option_cycle(WidgetId(1), SlotRef::new("row"), "Mode", 0, 3)
            .on_left(MenuAction::None);
        let rects = widget_rects(&w, Rect::new(0.0, 0.0, 1000.0, 50.0));
        assert_eq!(rects.arrow_left.unwrap(), Rect::new(500.0, 0.0, 75.0, 50.0));
        assert_eq!(rects.arrow_right.unwrap(), Rect::new(925.0, 0.0, 75.0, 50.0));
    }
}
