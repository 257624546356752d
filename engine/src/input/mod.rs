//! Input Module
//!
//! Device-level input: the packed binding encoding, the per-frame device
//! snapshot, and the sampler that resolves a binding against a snapshot.
//! Everything except [`platform`] is independent of the windowing system.
//!
//! # Example
//!
//! ```rust,ignore
//! use menu_forge_engine::input::{DeviceKind, DeviceSampler, DeviceSelector, encode_button, scancode};
//!
//! let jump = encode_button(DeviceKind::Keyboard, DeviceSelector::Any, scancode::SPACE);
//! let snapshot = builder.snapshot();
//! let sampler = DeviceSampler::new(&snapshot, &config.input);
//! if sampler.button_is_down(jump) {
//!     // Jump
//! }
//! ```

pub mod encoding;
pub mod gamepad;
pub mod keyboard;
pub mod legacy;
pub mod mouse;
pub mod platform;
pub mod sampler;
pub mod snapshot;
pub mod surface;

// Re-export commonly used types at module level
pub use encoding::{
    ANY_DEVICE_SENTINEL, DecodedAxis, DecodedAxisPair, DecodedButton, DeviceKind, DeviceSelector,
    EncodedBinding, MAX_DEVICE_ID, decode_analog_1d, decode_analog_2d, decode_button,
    encode_analog_1d, encode_analog_2d, encode_button, resolve_analog_1d, resolve_analog_2d,
    resolve_button,
};
pub use gamepad::{ControllerState, pad_axis, pad_button};
pub use keyboard::scancode;
pub use mouse::{MouseButton, MouseSnapshot, ScrollDelta};
pub use platform::SnapshotBuilder;
pub use sampler::DeviceSampler;
pub use snapshot::{CaptureState, DeviceSnapshot};
pub use surface::RenderSurface;
