//! Render Surface Mapping
//!
//! The game renders into a fixed-size target that is presented inside the
//! window either stretched or letterboxed. Cursor positions arrive in window
//! pixels and must be mapped back into render-target space before menus or
//! gameplay can use them.
//!
//! Letterbox placement:
//! 1. pad the window by the safe-area fractions (each clamped to [0, 0.45]),
//! 2. fit the render target's aspect ratio inside the padded rect, centered,
//! 3. scale around the padded rect's center by `zoom`, then offset by `pan`
//!    (a fraction of the padded rect size).

use glam::Vec2;

use crate::config::{ScalingMode, SurfaceSettings};
use crate::geometry::Rect;

/// Window and render-target sizes plus the presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    /// Window client size in pixels.
    pub window_size: Vec2,
    /// Render target size in pixels.
    pub render_size: Vec2,
    pub settings: SurfaceSettings,
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self {
            window_size: Vec2::new(1920.0, 1080.0),
            render_size: Vec2::new(1920.0, 1080.0),
            settings: SurfaceSettings::default(),
        }
    }
}

impl RenderSurface {
    pub fn new(window_size: Vec2, render_size: Vec2, settings: SurfaceSettings) -> Self {
        Self {
            window_size,
            render_size,
            settings,
        }
    }

    fn is_degenerate(&self) -> bool {
        self.window_size.x <= 0.0
            || self.window_size.y <= 0.0
            || self.render_size.x <= 0.0
            || self.render_size.y <= 0.0
    }

    /// Window rect remaining after safe-area padding.
    pub fn padded_rect(&self) -> Rect {
        let area = self.settings.safe_area.clamped();
        let w = self.window_size.x;
        let h = self.window_size.y;
        Rect::new(
            area.left * w,
            area.top * h,
            w * (1.0 - area.left - area.right),
            h * (1.0 - area.top - area.bottom),
        )
    }

    /// Window-space rect the render target is drawn into.
    pub fn content_rect(&self) -> Rect {
        if self.is_degenerate() {
            return Rect::ZERO;
        }
        match self.settings.mode {
            ScalingMode::Stretch => Rect::from_min_size(Vec2::ZERO, self.window_size),
            ScalingMode::Letterbox => {
                let padded = self.padded_rect();
                let scale = (padded.size.x / self.render_size.x)
                    .min(padded.size.y / self.render_size.y);
                let size = self.render_size * scale;
                let origin = padded.min + (padded.size - size) * 0.5;

                let anchor = padded.center();
                let zoom = self.settings.effective_zoom();
                let origin = anchor + (origin - anchor) * zoom + self.settings.pan * padded.size;
                Rect::from_min_size(origin, size * zoom)
            }
        }
    }

    /// Map a window pixel position into render-target pixel space.
    ///
    /// Uses pixel-index space: the content rect's left edge maps to 0 and its
    /// right edge to `render_width - 1`. Degenerate sizes map to the origin.
    pub fn window_to_render(&self, window_pos: Vec2) -> Vec2 {
        let rect = self.content_rect();
        if rect.is_empty() {
            return Vec2::ZERO;
        }
        let uv = (window_pos - rect.min) / rect.size;
        uv * (self.render_size - Vec2::ONE)
    }

    /// Cursor position inside the render target as 0..1 on both axes.
    pub fn normalized_position(&self, window_pos: Vec2) -> Vec2 {
        let rect = self.content_rect();
        if rect.is_empty() {
            return Vec2::ZERO;
        }
        ((window_pos - rect.min) / rect.size).clamp(Vec2::ZERO, Vec2::ONE)
    }
}
