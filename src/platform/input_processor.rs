//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into engine `InputEvent`s.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Unmapped keys (F-keys, numpad, media keys) are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== Event Processing ====================================================

/// Converts a Winit key event, filtering keys the engine does not map.
pub(crate) fn process_key_event(key_event: &KeyEvent) -> Option<InputEvent> {
    let key = match key_event.physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        _ => return None,
    };

    if key == KeyCode::Unidentified {
        return None;
    }

    Some(key_input_event(key, key_event.state))
}

pub(crate) fn process_mouse_button(button: WinitMouseButton, state: ElementState) -> InputEvent {
    let button = MouseButton::from(button);
    match state {
        ElementState::Pressed => InputEvent::MouseButtonDown { button },
        ElementState::Released => InputEvent::MouseButtonUp { button },
    }
}

/// Cursor position, converted from physical to logical pixels.
pub(crate) fn process_mouse_move(x: f64, y: f64, scale_factor: f64) -> InputEvent {
    let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    InputEvent::MouseMoved {
        x: x / scale,
        y: y / scale,
    }
}

fn key_input_event(key: KeyCode, state: ElementState) -> InputEvent {
    match state {
        ElementState::Pressed => InputEvent::KeyDown { key },
        ElementState::Released => InputEvent::KeyUp { key },
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, and common special keys. Everything else
/// becomes `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Left/Right/Middle map directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_edges_follow_element_state() {
        assert_eq!(
            key_input_event(KeyCode::KeyS, ElementState::Pressed),
            InputEvent::KeyDown { key: KeyCode::KeyS }
        );
        assert_eq!(
            key_input_event(KeyCode::KeyS, ElementState::Released),
            InputEvent::KeyUp { key: KeyCode::KeyS }
        );
    }

    #[test]
    fn keycode_conversion_filters_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }

    #[test]
    fn keycode_conversion_covers_bindable_keys() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
        assert_eq!(KeyCode::from(WinitKeyCode::Enter), KeyCode::Enter);
    }

    #[test]
    fn mouse_button_events() {
        assert_eq!(
            process_mouse_button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::MouseButtonDown { button: MouseButton::Left }
        );
        assert_eq!(
            process_mouse_button(WinitMouseButton::Back, ElementState::Released),
            InputEvent::MouseButtonUp { button: MouseButton::Other }
        );
    }

    #[test]
    fn mouse_move_is_logical() {
        assert_eq!(
            process_mouse_move(200.0, 100.0, 2.0),
            InputEvent::MouseMoved { x: 100.0, y: 50.0 }
        );
        assert_eq!(
            process_mouse_move(5.0, 6.0, 0.0),
            InputEvent::MouseMoved { x: 5.0, y: 6.0 },
            "degenerate scale factor is ignored"
        );
    }
}
