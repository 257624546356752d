//! Device Input Encoding
//!
//! Packs "button or axis X of device kind K, instance N (or any instance)"
//! into a single `u32`. The packed value is what binding profiles store on
//! disk, so the layout is a format, not an implementation detail.
//!
//! Extended layout:
//! ```text
//! bit  31      : extended marker
//! bits 29..31  : reserved, always zero
//! bits 26..29  : device kind tag (1 = keyboard, 2 = mouse, 3 = gamepad)
//! bits 16..26  : device instance id, 1023 = any device
//! bits  0..16  : code (scancode / mouse button mask / pad button / axis ids)
//! ```
//!
//! Values without the marker are legacy enum ids from bindings saved before
//! this layout existed; they only resolve through [`super::legacy`].

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use super::legacy;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Marker bit set on every extended encoding.
pub const EXTENDED_FLAG: u32 = 1 << 31;

const KIND_SHIFT: u32 = 26;
const KIND_MASK: u32 = 0b111;
const DEVICE_SHIFT: u32 = 16;
const DEVICE_MASK: u32 = 0x3FF;
const CODE_MASK: u32 = 0xFFFF;

/// Device field value meaning "any instance of this kind".
pub const ANY_DEVICE_SENTINEL: u16 = DEVICE_MASK as u16;

/// Largest real device instance id that can be encoded.
pub const MAX_DEVICE_ID: u16 = ANY_DEVICE_SENTINEL - 1;

/// Every legacy id is strictly below this value.
pub const LEGACY_ID_LIMIT: u32 = 1 << 16;

const_assert!((KIND_MASK << KIND_SHIFT) & EXTENDED_FLAG == 0);
const_assert!((DEVICE_MASK << DEVICE_SHIFT) & (KIND_MASK << KIND_SHIFT) == 0);
const_assert!((DEVICE_MASK << DEVICE_SHIFT) & CODE_MASK == 0);
const_assert!(LEGACY_ID_LIMIT <= EXTENDED_FLAG);

// ============================================================================
// TYPES
// ============================================================================

/// Physical device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    Keyboard,
    Mouse,
    Gamepad,
}

impl DeviceKind {
    const fn tag(self) -> u32 {
        match self {
            DeviceKind::Keyboard => 1,
            DeviceKind::Mouse => 2,
            DeviceKind::Gamepad => 3,
        }
    }

    const fn from_tag(tag: u32) -> Option<DeviceKind> {
        match tag {
            1 => Some(DeviceKind::Keyboard),
            2 => Some(DeviceKind::Mouse),
            3 => Some(DeviceKind::Gamepad),
            _ => None,
        }
    }
}

/// Which instance of a device kind a binding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceSelector {
    /// Match every connected instance.
    Any,
    /// Match one instance id (0..=MAX_DEVICE_ID).
    Id(u16),
}

impl DeviceSelector {
    pub fn matches(self, device_id: u16) -> bool {
        match self {
            DeviceSelector::Any => true,
            DeviceSelector::Id(id) => id == device_id,
        }
    }

    fn to_field(self) -> u32 {
        match self {
            DeviceSelector::Any => ANY_DEVICE_SENTINEL as u32,
            DeviceSelector::Id(id) if id > MAX_DEVICE_ID => {
                log::warn!("device id {id} exceeds {MAX_DEVICE_ID}, clamping");
                MAX_DEVICE_ID as u32
            }
            DeviceSelector::Id(id) => id as u32,
        }
    }

    fn from_field(field: u32) -> DeviceSelector {
        if field == ANY_DEVICE_SENTINEL as u32 {
            DeviceSelector::Any
        } else {
            DeviceSelector::Id(field as u16)
        }
    }
}

/// A packed input binding: either an extended encoding or a legacy enum id.
///
/// Call sites never take the integer apart themselves; they go through the
/// `encode_*` / `decode_*` / `resolve_*` functions in this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedBinding(u32);

impl EncodedBinding {
    /// Wrap a raw value read from storage.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_extended(self) -> bool {
        self.0 & EXTENDED_FLAG != 0
    }
}

/// A decoded button binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedButton {
    pub kind: DeviceKind,
    pub device: DeviceSelector,
    pub code: u16,
}

/// A decoded 1D axis binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAxis {
    pub kind: DeviceKind,
    pub device: DeviceSelector,
    pub axis: u16,
}

/// A decoded 2D axis binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAxisPair {
    pub kind: DeviceKind,
    pub device: DeviceSelector,
    pub axis_x: u8,
    pub axis_y: u8,
}

// ============================================================================
// ENCODE
// ============================================================================

fn pack(kind: DeviceKind, device: DeviceSelector, code: u16) -> EncodedBinding {
    EncodedBinding(
        EXTENDED_FLAG
            | (kind.tag() << KIND_SHIFT)
            | (device.to_field() << DEVICE_SHIFT)
            | (code as u32 & CODE_MASK),
    )
}

pub fn encode_button(kind: DeviceKind, device: DeviceSelector, code: u16) -> EncodedBinding {
    pack(kind, device, code)
}

pub fn encode_analog_1d(kind: DeviceKind, device: DeviceSelector, axis: u16) -> EncodedBinding {
    pack(kind, device, axis)
}

/// The code field holds `axis_x` in the low byte and `axis_y` in the high byte.
pub fn encode_analog_2d(
    kind: DeviceKind,
    device: DeviceSelector,
    axis_x: u8,
    axis_y: u8,
) -> EncodedBinding {
    pack(kind, device, axis_x as u16 | ((axis_y as u16) << 8))
}

// ============================================================================
// DECODE (extended path only)
// ============================================================================

fn unpack(encoded: EncodedBinding) -> Option<(DeviceKind, DeviceSelector, u16)> {
    if !encoded.is_extended() {
        return None;
    }
    let raw = encoded.raw();
    let kind = DeviceKind::from_tag((raw >> KIND_SHIFT) & KIND_MASK)?;
    let device = DeviceSelector::from_field((raw >> DEVICE_SHIFT) & DEVICE_MASK);
    Some((kind, device, (raw & CODE_MASK) as u16))
}

/// `None` for legacy values and for extended values with an unknown kind tag.
pub fn decode_button(encoded: EncodedBinding) -> Option<DecodedButton> {
    unpack(encoded).map(|(kind, device, code)| DecodedButton { kind, device, code })
}

pub fn decode_analog_1d(encoded: EncodedBinding) -> Option<DecodedAxis> {
    unpack(encoded).map(|(kind, device, axis)| DecodedAxis { kind, device, axis })
}

pub fn decode_analog_2d(encoded: EncodedBinding) -> Option<DecodedAxisPair> {
    unpack(encoded).map(|(kind, device, code)| DecodedAxisPair {
        kind,
        device,
        axis_x: (code & 0xFF) as u8,
        axis_y: (code >> 8) as u8,
    })
}

// ============================================================================
// RESOLVE (extended or legacy)
// ============================================================================

/// Decode a button binding through the extended path, falling back to the
/// legacy table for unmarked values.
pub fn resolve_button(encoded: EncodedBinding) -> Option<DecodedButton> {
    if encoded.is_extended() {
        decode_button(encoded)
    } else {
        legacy::lookup_button(encoded.raw())
    }
}

pub fn resolve_analog_1d(encoded: EncodedBinding) -> Option<DecodedAxis> {
    if encoded.is_extended() {
        decode_analog_1d(encoded)
    } else {
        legacy::lookup_axis_1d(encoded.raw())
    }
}

pub fn resolve_analog_2d(encoded: EncodedBinding) -> Option<DecodedAxisPair> {
    if encoded.is_extended() {
        decode_analog_2d(encoded)
    } else {
        legacy::lookup_axis_2d(encoded.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [DeviceKind; 3] = [DeviceKind::Keyboard, DeviceKind::Mouse, DeviceKind::Gamepad];

    #[test]
    fn test_button_round_trip() {
        let devices = [DeviceSelector::Id(0), DeviceSelector::Id(1), DeviceSelector::Any];
        for kind in KINDS {
            for device in devices {
                for code in [0u16, 1, 42, 511, 0x7FFF, 0xFFFF] {
                    let decoded = decode_button(encode_button(kind, device, code)).unwrap();
                    assert_eq!(decoded, DecodedButton { kind, device, code });
                }
            }
        }
    }

    #[test]
    fn test_analog_2d_round_trip_full_byte_range() {
        for ax in (0..=255u8).step_by(17) {
            for ay in [0u8, 1, 128, 255] {
                let enc = encode_analog_2d(DeviceKind::Gamepad, DeviceSelector::Id(3), ax, ay);
                let d = decode_analog_2d(enc).unwrap();
                assert_eq!((d.kind, d.device, d.axis_x, d.axis_y), (DeviceKind::Gamepad, DeviceSelector::Id(3), ax, ay));
            }
        }
    }

    #[test]
    fn test_any_sentinel_distinct_from_real_ids() {
        let any = encode_button(DeviceKind::Gamepad, DeviceSelector::Any, 0);
        let max = encode_button(DeviceKind::Gamepad, DeviceSelector::Id(MAX_DEVICE_ID), 0);
        assert_ne!(any, max);
        assert_eq!(decode_button(max).unwrap().device, DeviceSelector::Id(MAX_DEVICE_ID));
    }

    #[test]
    fn test_oversized_device_id_is_clamped_not_any() {
        let enc = encode_button(DeviceKind::Gamepad, DeviceSelector::Id(5000), 1);
        assert_eq!(decode_button(enc).unwrap().device, DeviceSelector::Id(MAX_DEVICE_ID));
    }

    #[test]
    fn test_legacy_values_are_not_extended() {
        assert!(decode_button(EncodedBinding::from_raw(7)).is_none());
        assert!(decode_analog_2d(EncodedBinding::from_raw(LEGACY_ID_LIMIT - 1)).is_none());
    }

    #[test]
    fn test_unknown_kind_tag_fails_decode() {
        let bogus = EncodedBinding::from_raw(EXTENDED_FLAG | (7 << KIND_SHIFT) | 5);
        assert!(decode_button(bogus).is_none());
        assert!(resolve_button(bogus).is_none());
    }

    #[test]
    fn test_unknown_legacy_id_fails_resolve() {
        assert!(resolve_button(EncodedBinding::from_raw(LEGACY_ID_LIMIT - 1)).is_none());
    }
}
