//! Keyboard Input Module
//!
//! Physical key identifiers used by keyboard bindings. Codes are USB HID
//! usage ids (the same numbering SDL scancodes use), so saved bindings stay
//! valid across keyboard layouts and windowing backends.

/// Size of the keyboard state array in a device snapshot.
pub const KEYBOARD_KEY_COUNT: usize = 512;

/// Scancode constants for the keys the engine refers to by name.
pub mod scancode {
    pub const A: u16 = 4;
    pub const B: u16 = 5;
    pub const C: u16 = 6;
    pub const D: u16 = 7;
    pub const E: u16 = 8;
    pub const F: u16 = 9;
    pub const G: u16 = 10;
    pub const H: u16 = 11;
    pub const I: u16 = 12;
    pub const J: u16 = 13;
    pub const K: u16 = 14;
    pub const L: u16 = 15;
    pub const M: u16 = 16;
    pub const N: u16 = 17;
    pub const O: u16 = 18;
    pub const P: u16 = 19;
    pub const Q: u16 = 20;
    pub const R: u16 = 21;
    pub const S: u16 = 22;
    pub const T: u16 = 23;
    pub const U: u16 = 24;
    pub const V: u16 = 25;
    pub const W: u16 = 26;
    pub const X: u16 = 27;
    pub const Y: u16 = 28;
    pub const Z: u16 = 29;

    pub const DIGIT1: u16 = 30;
    pub const DIGIT2: u16 = 31;
    pub const DIGIT3: u16 = 32;
    pub const DIGIT4: u16 = 33;
    pub const DIGIT5: u16 = 34;
    pub const DIGIT6: u16 = 35;
    pub const DIGIT7: u16 = 36;
    pub const DIGIT8: u16 = 37;
    pub const DIGIT9: u16 = 38;
    pub const DIGIT0: u16 = 39;

    pub const RETURN: u16 = 40;
    pub const ESCAPE: u16 = 41;
    pub const BACKSPACE: u16 = 42;
    pub const TAB: u16 = 43;
    pub const SPACE: u16 = 44;
    pub const MINUS: u16 = 45;
    pub const EQUALS: u16 = 46;
    pub const LEFT_BRACKET: u16 = 47;
    pub const RIGHT_BRACKET: u16 = 48;
    pub const BACKSLASH: u16 = 49;
    pub const SEMICOLON: u16 = 51;
    pub const APOSTROPHE: u16 = 52;
    pub const GRAVE: u16 = 53;
    pub const COMMA: u16 = 54;
    pub const PERIOD: u16 = 55;
    pub const SLASH: u16 = 56;
    pub const CAPS_LOCK: u16 = 57;

    pub const F1: u16 = 58;
    pub const F2: u16 = 59;
    pub const F3: u16 = 60;
    pub const F4: u16 = 61;
    pub const F5: u16 = 62;
    pub const F6: u16 = 63;
    pub const F7: u16 = 64;
    pub const F8: u16 = 65;
    pub const F9: u16 = 66;
    pub const F10: u16 = 67;
    pub const F11: u16 = 68;
    pub const F12: u16 = 69;

    pub const INSERT: u16 = 73;
    pub const HOME: u16 = 74;
    pub const PAGE_UP: u16 = 75;
    pub const DELETE: u16 = 76;
    pub const END: u16 = 77;
    pub const PAGE_DOWN: u16 = 78;
    pub const RIGHT: u16 = 79;
    pub const LEFT: u16 = 80;
    pub const DOWN: u16 = 81;
    pub const UP: u16 = 82;

    pub const KP_DIVIDE: u16 = 84;
    pub const KP_MULTIPLY: u16 = 85;
    pub const KP_MINUS: u16 = 86;
    pub const KP_PLUS: u16 = 87;
    pub const KP_ENTER: u16 = 88;
    pub const KP_1: u16 = 89;
    pub const KP_2: u16 = 90;
    pub const KP_3: u16 = 91;
    pub const KP_4: u16 = 92;
    pub const KP_5: u16 = 93;
    pub const KP_6: u16 = 94;
    pub const KP_7: u16 = 95;
    pub const KP_8: u16 = 96;
    pub const KP_9: u16 = 97;
    pub const KP_0: u16 = 98;
    pub const KP_PERIOD: u16 = 99;

    pub const LEFT_CTRL: u16 = 224;
    pub const LEFT_SHIFT: u16 = 225;
    pub const LEFT_ALT: u16 = 226;
    pub const LEFT_GUI: u16 = 227;
    pub const RIGHT_CTRL: u16 = 228;
    pub const RIGHT_SHIFT: u16 = 229;
    pub const RIGHT_ALT: u16 = 230;
    pub const RIGHT_GUI: u16 = 231;
}

/// Display names for non-alphanumeric keys.
const SPECIAL_KEY_NAMES: &[(u16, &str)] = &[
    (scancode::RETURN, "Enter"),
    (scancode::ESCAPE, "Escape"),
    (scancode::BACKSPACE, "Backspace"),
    (scancode::TAB, "Tab"),
    (scancode::SPACE, "Space"),
    (scancode::MINUS, "-"),
    (scancode::EQUALS, "="),
    (scancode::LEFT_BRACKET, "["),
    (scancode::RIGHT_BRACKET, "]"),
    (scancode::BACKSLASH, "\\"),
    (scancode::SEMICOLON, ";"),
    (scancode::APOSTROPHE, "'"),
    (scancode::GRAVE, "`"),
    (scancode::COMMA, ","),
    (scancode::PERIOD, "."),
    (scancode::SLASH, "/"),
    (scancode::CAPS_LOCK, "Caps Lock"),
    (scancode::INSERT, "Insert"),
    (scancode::HOME, "Home"),
    (scancode::PAGE_UP, "Page Up"),
    (scancode::DELETE, "Delete"),
    (scancode::END, "End"),
    (scancode::PAGE_DOWN, "Page Down"),
    (scancode::RIGHT, "Right"),
    (scancode::LEFT, "Left"),
    (scancode::DOWN, "Down"),
    (scancode::UP, "Up"),
    (scancode::KP_DIVIDE, "Keypad /"),
    (scancode::KP_MULTIPLY, "Keypad *"),
    (scancode::KP_MINUS, "Keypad -"),
    (scancode::KP_PLUS, "Keypad +"),
    (scancode::KP_ENTER, "Keypad Enter"),
    (scancode::KP_PERIOD, "Keypad ."),
    (scancode::LEFT_CTRL, "Left Ctrl"),
    (scancode::LEFT_SHIFT, "Left Shift"),
    (scancode::LEFT_ALT, "Left Alt"),
    (scancode::LEFT_GUI, "Left Super"),
    (scancode::RIGHT_CTRL, "Right Ctrl"),
    (scancode::RIGHT_SHIFT, "Right Shift"),
    (scancode::RIGHT_ALT, "Right Alt"),
    (scancode::RIGHT_GUI, "Right Super"),
];

/// Human-readable name of a scancode, e.g. `"W"`, `"F5"`, `"Left Shift"`.
///
/// Unknown codes are rendered as `"Key 123"`.
pub fn scancode_name(code: u16) -> String {
    match code {
        scancode::A..=scancode::Z => {
            let letter = (b'A' + (code - scancode::A) as u8) as char;
            letter.to_string()
        }
        scancode::DIGIT1..=scancode::DIGIT9 => (code - scancode::DIGIT1 + 1).to_string(),
        scancode::DIGIT0 => "0".to_string(),
        scancode::F1..=scancode::F12 => format!("F{}", code - scancode::F1 + 1),
        scancode::KP_1..=scancode::KP_9 => format!("Keypad {}", code - scancode::KP_1 + 1),
        scancode::KP_0 => "Keypad 0".to_string(),
        _ => SPECIAL_KEY_NAMES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| (*name).to_string())
            .unwrap_or_else(|| format!("Key {code}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_names() {
        assert_eq!(scancode_name(scancode::A), "A");
        assert_eq!(scancode_name(scancode::W), "W");
        assert_eq!(scancode_name(scancode::Z), "Z");
    }

    #[test]
    fn test_digit_and_function_names() {
        assert_eq!(scancode_name(scancode::DIGIT1), "1");
        assert_eq!(scancode_name(scancode::DIGIT0), "0");
        assert_eq!(scancode_name(scancode::F11), "F11");
    }

    #[test]
    fn test_special_and_unknown_names() {
        assert_eq!(scancode_name(scancode::LEFT_SHIFT), "Left Shift");
        assert_eq!(scancode_name(scancode::SPACE), "Space");
        assert_eq!(scancode_name(300), "Key 300");
    }

    #[test]
    fn test_named_keys_fit_state_array() {
        assert!((scancode::RIGHT_GUI as usize) < KEYBOARD_KEY_COUNT);
    }
}
