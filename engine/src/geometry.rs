//! Geometry Module
//!
//! Axis-aligned rectangles shared by the surface mapping and the menu
//! hit-testing code. Origin is top-left, Y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Empty rectangle at the origin. Never contains any point.
    pub const ZERO: Rect = Rect {
        min: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Check if a point is within this rectangle (edges inclusive).
    pub fn contains(&self, p: Vec2) -> bool {
        if self.is_empty() {
            return false;
        }
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }

    /// Scale a normalized (0..1) rectangle into a pixel rectangle of `extent`.
    pub fn scaled(&self, extent: Vec2) -> Rect {
        Rect {
            min: self.min * extent,
            size: self.size * extent,
        }
    }

    /// Horizontal position of `p` inside the rectangle, clamped to 0..1.
    pub fn fraction_x(&self, p: Vec2) -> f32 {
        if self.size.x <= 0.0 {
            return 0.0;
        }
        ((p.x - self.min.x) / self.size.x).clamp(0.0, 1.0)
    }

    /// Split off `width` pixels from the left edge: `(left, rest)`.
    pub fn split_left(&self, width: f32) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.size.x);
        (
            Rect::from_min_size(self.min, Vec2::new(w, self.size.y)),
            Rect::from_min_size(
                Vec2::new(self.min.x + w, self.min.y),
                Vec2::new(self.size.x - w, self.size.y),
            ),
        )
    }

    /// Split off `width` pixels from the right edge: `(rest, right)`.
    pub fn split_right(&self, width: f32) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.size.x);
        let (rest, right) = self.split_left(self.size.x - w);
        (rest, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 10.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 20.0)));
        assert!(!r.contains(Vec2::new(30.1, 20.0)));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        assert!(!Rect::ZERO.contains(Vec2::ZERO));
    }

    #[test]
    fn test_split_right() {
        let r = Rect::new(0.0, 0.0, 100.0, 20.0);
        let (rest, right) = r.split_right(25.0);
        assert_eq!(rest, Rect::new(0.0, 0.0, 75.0, 20.0));
        assert_eq!(right, Rect::new(75.0, 0.0, 25.0, 20.0));
    }

    #[test]
    fn test_fraction_x_clamped() {
        let r = Rect::new(100.0, 0.0, 200.0, 10.0);
        assert_eq!(r.fraction_x(Vec2::new(50.0, 5.0)), 0.0);
        assert_eq!(r.fraction_x(Vec2::new(200.0, 5.0)), 0.5);
        assert_eq!(r.fraction_x(Vec2::new(400.0, 5.0)), 1.0);
    }
}
