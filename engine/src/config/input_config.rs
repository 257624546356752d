//! Input Configuration
//!
//! Tuning values for the device sampler: analog deadzones, wheel scaling and
//! the threshold at which an analog stick counts as a menu direction.

use serde::{Deserialize, Serialize};

/// Sampler tuning.
///
/// `InputSettings::default()` returns the values the sampler was tuned with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Stick readings with magnitude below this are reported as zero.
    pub stick_deadzone: f32,
    /// Trigger readings below this are reported as zero.
    pub trigger_deadzone: f32,
    /// Multiplier applied to wheel notches before clamping to [-1, 1].
    pub wheel_scale: f32,
    /// Analog magnitude at which a stick counts as a pressed menu direction.
    pub nav_threshold: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            stick_deadzone: 0.15,
            trigger_deadzone: 0.05,
            wheel_scale: 1.0,
            nav_threshold: 0.5,
        }
    }
}

impl InputSettings {
    /// Deadzone for a gamepad axis index. Axes 4 and 5 are the triggers.
    pub fn deadzone_for_axis(&self, axis: usize) -> f32 {
        if axis >= 4 {
            self.trigger_deadzone
        } else {
            self.stick_deadzone
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_axes_use_trigger_deadzone() {
        let settings = InputSettings::default();
        assert_eq!(settings.deadzone_for_axis(0), settings.stick_deadzone);
        assert_eq!(settings.deadzone_for_axis(3), settings.stick_deadzone);
        assert_eq!(settings.deadzone_for_axis(4), settings.trigger_deadzone);
        assert_eq!(settings.deadzone_for_axis(5), settings.trigger_deadzone);
    }
}
