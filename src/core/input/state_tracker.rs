//=========================================================================
// State Tracker
//=========================================================================
//
// Raw held-input state folded from platform event batches.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
// Edge detection for named actions lives in `Device`; the per-frame
// pressed/released sets here only describe raw keys and buttons.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::bindings::InputName;
use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    pointer: (f64, f64),

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    pointer_delta: (f64, f64),
    last_pointer: (f64, f64),
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.last_pointer = self.pointer;
    }

    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes the pointer delta for the frame.
    pub fn finalize_frame(&mut self) {
        self.pointer_delta = (
            self.pointer.0 - self.last_pointer.0,
            self.pointer.1 - self.last_pointer.1,
        );
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => {
                // OS key repeat arrives as extra KeyDowns
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key } => {
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button } => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button } => {
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => self.pointer = (x, y),
            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Analog reading of a named input: 1.0 while held, else 0.0.
    pub fn value_of(&self, input: &InputName) -> f64 {
        let held = match input {
            InputName::Key(key) => self.keys_down.contains(key),
            InputName::Mouse(button) => self.buttons_down.contains(button),
            InputName::Gamepad(_) => false,
        };
        if held { 1.0 } else { 0.0 }
    }

    //--- Keyboard ---------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only in the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //--- Mouse ------------------------------------------------------------

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Pointer position in logical pixels.
    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    pub fn pointer_delta(&self) -> (f64, f64) {
        self.pointer_delta
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
