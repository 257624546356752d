//! Mouse Input Module
//!
//! Mouse button masks, mouse axis ids and the per-frame mouse snapshot.
//! Decoupled from winit; the platform bridge converts into these types.

use glam::Vec2;

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Side buttons (button 4, 5)
    X1,
    X2,
}

impl MouseButton {
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Middle,
        MouseButton::Right,
        MouseButton::X1,
        MouseButton::X2,
    ];

    /// Bit of this button in the snapshot's button mask.
    pub const fn mask(self) -> u16 {
        match self {
            MouseButton::Left => 1 << 0,
            MouseButton::Middle => 1 << 1,
            MouseButton::Right => 1 << 2,
            MouseButton::X1 => 1 << 3,
            MouseButton::X2 => 1 << 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Left => "Left Button",
            MouseButton::Middle => "Middle Button",
            MouseButton::Right => "Right Button",
            MouseButton::X1 => "Button 4",
            MouseButton::X2 => "Button 5",
        }
    }

    /// Button whose mask equals `mask` exactly.
    pub fn from_mask(mask: u16) -> Option<MouseButton> {
        Self::ALL.into_iter().find(|b| b.mask() == mask)
    }
}

/// 1D mouse axis: vertical wheel.
pub const MOUSE_AXIS_WHEEL_Y: u16 = 0;
/// 1D mouse axis: horizontal wheel.
pub const MOUSE_AXIS_WHEEL_X: u16 = 1;
/// 2D mouse axis pair: cursor position within the render surface.
pub const MOUSE_AXIS_POSITION_X: u8 = 0;
pub const MOUSE_AXIS_POSITION_Y: u8 = 1;

/// Scroll wheel delta, can be line-based or pixel-based.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollDelta {
    /// Horizontal scroll (positive = right)
    pub x: f32,
    /// Vertical scroll (positive = up/forward)
    pub y: f32,
}

impl ScrollDelta {
    /// Create from line delta (common for mouse wheels).
    pub fn from_lines(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create from pixel delta (common for trackpads).
    /// Normalizes by dividing by 100 to get approximate line equivalents.
    pub fn from_pixels(x: f64, y: f64) -> Self {
        Self {
            x: (x / 100.0) as f32,
            y: (y / 100.0) as f32,
        }
    }
}

/// Mouse state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseSnapshot {
    /// Bitmask of held buttons, see [`MouseButton::mask`].
    pub buttons: u16,
    /// Wheel movement accumulated this frame, in lines.
    pub wheel: ScrollDelta,
    /// Absolute cursor position in window pixels (origin top-left).
    pub position: Vec2,
    /// Cursor movement this frame, in window pixels.
    pub motion: Vec2,
    /// Whether the cursor is inside the window.
    pub in_window: bool,
}

impl MouseSnapshot {
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() != 0
    }

    /// True if any bit of `mask` is held.
    pub fn any_in_mask(&self, mask: u16) -> bool {
        self.buttons & mask != 0
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    pub fn moved(&self) -> bool {
        self.motion != Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_are_distinct_bits() {
        let mut seen = 0u16;
        for b in MouseButton::ALL {
            assert_eq!(b.mask().count_ones(), 1);
            assert_eq!(seen & b.mask(), 0);
            seen |= b.mask();
        }
    }

    #[test]
    fn test_from_mask() {
        assert_eq!(MouseButton::from_mask(4), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_mask(3), None);
    }

    #[test]
    fn test_set_button() {
        let mut mouse = MouseSnapshot::default();
        mouse.set_button(MouseButton::Left, true);
        mouse.set_button(MouseButton::X2, true);
        assert!(mouse.is_pressed(MouseButton::Left));
        assert!(!mouse.is_pressed(MouseButton::Right));
        mouse.set_button(MouseButton::Left, false);
        assert!(!mouse.is_pressed(MouseButton::Left));
        assert!(mouse.is_pressed(MouseButton::X2));
    }

    #[test]
    fn test_pixel_scroll_normalized() {
        let d = ScrollDelta::from_pixels(0.0, 250.0);
        assert_eq!(d.y, 2.5);
    }
}
