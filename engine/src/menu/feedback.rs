//! Feedback Hooks
//!
//! Outbound calls the interaction engine makes: named audio/visual cues and
//! the platform text-input toggle.

/// Cue names. Accepted and rejected interactions always use different cues.
pub mod cue {
    pub const MOVE: &str = "menu_move";
    pub const CONFIRM: &str = "menu_confirm";
    pub const REJECT: &str = "menu_reject";
    pub const LEFT: &str = "menu_left";
    pub const RIGHT: &str = "menu_right";
    pub const BACK: &str = "menu_back";
}

/// Plays a named cue. Fire-and-forget.
pub trait CueSink {
    fn play_cue(&mut self, name: &'static str);
}

impl<F: FnMut(&'static str)> CueSink for F {
    fn play_cue(&mut self, name: &'static str) {
        self(name)
    }
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play_cue(&mut self, _name: &'static str) {}
}

/// Switches the platform's text input (IME / on-screen keyboard) on or off.
pub trait TextInputPlatform {
    fn set_text_input(&mut self, enabled: bool);
}

/// For hosts without a text input toggle.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextInput;

impl TextInputPlatform for NoTextInput {
    fn set_text_input(&mut self, _enabled: bool) {}
}
