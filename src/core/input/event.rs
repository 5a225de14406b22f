//=========================================================================
// Raw Input Events
//
// Platform-neutral representation of keyboard and mouse input.
//
// The platform layer converts its native events into `InputEvent`
// batches; the `StateTracker` folds them into held-key state, and the
// binding table refers to keys and buttons by name
// (`keyboard:<key>`, `mouse:<button>`).
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys/buttons, pointer)
//         ↓
//    Device (named logical buttons)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side buttons and anything else the platform reports.
    Other,
}

impl MouseButton {
    /// Parses the part after `mouse:` in an input name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "middle" => Some(Self::Middle),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// bindings survive keyboard layout changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Keys the input layer does not map.
    Unidentified,
}

impl KeyCode {
    const DIGITS: [Self; 10] = [
        Self::Digit0, Self::Digit1, Self::Digit2, Self::Digit3, Self::Digit4,
        Self::Digit5, Self::Digit6, Self::Digit7, Self::Digit8, Self::Digit9,
    ];

    const LETTERS: [Self; 26] = [
        Self::KeyA, Self::KeyB, Self::KeyC, Self::KeyD, Self::KeyE, Self::KeyF,
        Self::KeyG, Self::KeyH, Self::KeyI, Self::KeyJ, Self::KeyK, Self::KeyL,
        Self::KeyM, Self::KeyN, Self::KeyO, Self::KeyP, Self::KeyQ, Self::KeyR,
        Self::KeyS, Self::KeyT, Self::KeyU, Self::KeyV, Self::KeyW, Self::KeyX,
        Self::KeyY, Self::KeyZ,
    ];

    /// Parses the part after `keyboard:` in an input name.
    ///
    /// Names are lowercase: `a`..`z`, `0`..`9`, `up`, `down`, `left`,
    /// `right`, `space`, `return`, `escape`, `tab`, `backspace`, `delete`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "up" => Self::ArrowUp,
            "down" => Self::ArrowDown,
            "left" => Self::ArrowLeft,
            "right" => Self::ArrowRight,
            "space" => Self::Space,
            "return" => Self::Enter,
            "escape" => Self::Escape,
            "tab" => Self::Tab,
            "backspace" => Self::Backspace,
            "delete" => Self::Delete,
            _ => return Self::from_char(name),
        };
        Some(key)
    }

    fn from_char(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };

        match c {
            'a'..='z' => Some(Self::LETTERS[(c as u8 - b'a') as usize]),
            '0'..='9' => Some(Self::DIGITS[(c as u8 - b'0') as usize]),
            _ => None,
        }
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
    MouseButtonDown { button: MouseButton },
    MouseButtonUp { button: MouseButton },

    /// Cursor position in logical pixels, top-left origin.
    MouseMoved { x: f64, y: f64 },

    /// Unsupported platform event; ignored by the tracker.
    Unidentified,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=== Key Names =======================================================

    #[test]
    fn letters_and_digits_parse() {
        assert_eq!(KeyCode::from_name("a"), Some(KeyCode::KeyA));
        assert_eq!(KeyCode::from_name("z"), Some(KeyCode::KeyZ));
        assert_eq!(KeyCode::from_name("0"), Some(KeyCode::Digit0));
        assert_eq!(KeyCode::from_name("7"), Some(KeyCode::Digit7));
    }

    #[test]
    fn named_keys_parse() {
        assert_eq!(KeyCode::from_name("up"), Some(KeyCode::ArrowUp));
        assert_eq!(KeyCode::from_name("return"), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_name("escape"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_name("backspace"), Some(KeyCode::Backspace));
    }

    #[test]
    fn unknown_key_names_are_rejected() {
        assert_eq!(KeyCode::from_name(""), None);
        assert_eq!(KeyCode::from_name("A"), None, "names are lowercase");
        assert_eq!(KeyCode::from_name("ab"), None);
        assert_eq!(KeyCode::from_name("f13"), None);
    }

    //=== Mouse Names =====================================================

    #[test]
    fn mouse_names_parse() {
        assert_eq!(MouseButton::from_name("left"), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_name("middle"), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_name("right"), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_name("extra1"), None);
    }
}
