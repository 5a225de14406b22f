//=========================================================================
// Frame Context
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

//=== Internal Dependencies ===============================================

use crate::core::imgui::Pointer;
use crate::core::input::{BindingMap, Device, MouseButton, StateTracker};

//=== FrameContext ========================================================

/// Per-frame data shared by every game state.
///
/// Written once per tick by the core loop before dispatch; states treat
/// it as read-only input.
#[derive(Debug)]
pub struct FrameContext {
    /// Named logical buttons.
    pub device: Device,

    /// Pointer for IMGUI, with the left mouse button as "down".
    pub pointer: Pointer,

    /// Seconds since the previous tick.
    pub delta: f64,
}

impl FrameContext {
    pub fn new(bindings: &BindingMap) -> Self {
        Self {
            device: Device::new(bindings),
            pointer: Pointer::default(),
            delta: 0.0,
        }
    }

    /// Pulls this tick's input and timing.
    pub fn refresh(&mut self, tracker: &StateTracker, now: Instant, delta: f64) {
        self.device.update(tracker, now);

        let (x, y) = tracker.pointer();
        self.pointer = Pointer {
            x: x.round() as i32,
            y: y.round() as i32,
            is_down: tracker.is_button_down(MouseButton::Left),
        };
        self.delta = delta;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
