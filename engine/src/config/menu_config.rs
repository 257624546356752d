//! Menu Configuration
//!
//! Timing and safety limits for the menu interaction engine.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Seconds left/right must be held before auto-repeat starts.
    pub repeat_delay: f32,
    /// Seconds between auto-repeat steps once repeating.
    pub repeat_interval: f32,
    /// Upper bound on screen rebuilds within one update call.
    pub max_rebuilds_per_update: u32,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            repeat_delay: 0.35,
            repeat_interval: 0.08,
            max_rebuilds_per_update: 16,
        }
    }
}
