//! Surface Configuration
//!
//! How the fixed-size render target is presented inside the window:
//! stretched over the whole window, or letterboxed with safe-area padding and
//! a pan/zoom adjustment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Largest fraction of the window any single safe-area edge may take.
pub const MAX_SAFE_AREA: f32 = 0.45;

/// Smallest accepted zoom factor.
pub const MIN_ZOOM: f32 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// Render target covers the whole window, aspect ratio is not preserved.
    Stretch,
    /// Aspect-preserving fit, centered, with bars on the short axis.
    #[default]
    Letterbox,
}

/// Per-edge padding as a fraction of the window size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl SafeArea {
    /// Every edge clamped to [0, MAX_SAFE_AREA].
    pub fn clamped(&self) -> SafeArea {
        let c = |v: f32| if v.is_finite() { v.clamp(0.0, MAX_SAFE_AREA) } else { 0.0 };
        SafeArea {
            left: c(self.left),
            right: c(self.right),
            top: c(self.top),
            bottom: c(self.bottom),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    pub mode: ScalingMode,
    pub safe_area: SafeArea,
    /// Offset of the content as a fraction of the padded rect size.
    pub pan: Vec2,
    /// Content scale around the padded rect's center.
    pub zoom: f32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            mode: ScalingMode::Letterbox,
            safe_area: SafeArea::default(),
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl SurfaceSettings {
    pub fn effective_zoom(&self) -> f32 {
        if self.zoom.is_finite() {
            self.zoom.max(MIN_ZOOM)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_area_clamped() {
        let area = SafeArea {
            left: -0.2,
            right: 0.9,
            top: 0.1,
            bottom: f32::NAN,
        };
        let c = area.clamped();
        assert_eq!(c.left, 0.0);
        assert_eq!(c.right, MAX_SAFE_AREA);
        assert_eq!(c.top, 0.1);
        assert_eq!(c.bottom, 0.0);
    }

    #[test]
    fn test_zoom_floor() {
        let settings = SurfaceSettings {
            zoom: 0.0,
            ..SurfaceSettings::default()
        };
        assert_eq!(settings.effective_zoom(), MIN_ZOOM);
    }
}
