//! Action Queries
//!
//! Gameplay-facing lookups: is an action held, what is its analog value.
//! Every input mapped to the action in the active profile is evaluated.

use glam::Vec2;

use super::profile::BindingProfile;
use super::{ActionId, BindsActionType};
use crate::input::DeviceSampler;

/// True if any input mapped to the button action is held.
pub fn action_down(sampler: &DeviceSampler<'_>, profile: &BindingProfile, action: ActionId) -> bool {
    profile
        .codes_for(BindsActionType::Button, action)
        .any(|code| sampler.button_is_down(code))
}

/// Largest-magnitude reading among the inputs mapped to a 1D action.
pub fn action_axis_1d(sampler: &DeviceSampler<'_>, profile: &BindingProfile, action: ActionId) -> f32 {
    profile
        .codes_for(BindsActionType::Analog1D, action)
        .map(|code| sampler.sample_axis_1d(code))
        .fold(0.0, |best, v| if v.abs() > best.abs() { v } else { best })
}

/// Longest vector among the inputs mapped to a 2D action.
pub fn action_axis_2d(sampler: &DeviceSampler<'_>, profile: &BindingProfile, action: ActionId) -> Vec2 {
    profile
        .codes_for(BindsActionType::Analog2D, action)
        .map(|code| sampler.sample_axis_2d(code))
        .fold(Vec2::ZERO, |best, v| {
            if v.length_squared() > best.length_squared() { v } else { best }
        })
}
