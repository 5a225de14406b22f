//=========================================================================
// Input System
//
// Turns raw platform events into named logical buttons.
//
// Responsibilities:
// - Fold each frame's event batches into held-key state (`StateTracker`)
// - Resolve action → input-name bindings (`BindingMap`)
// - Derive per-action edges and durations (`Device`, `Button`)
//
// Frame order (driven by the core loop):
// ```text
// InputSystem::update(batches) → Device::update(tracker, now) → states
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod bindings;
mod button;
mod device;
mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use bindings::{BindingMap, ConfigError, InputName};
pub use button::Button;
pub use device::Device;
pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::StateTracker;

//=== External Crates =====================================================

use log::trace;

//=== InputSystem =========================================================

/// Owns the raw input state for the core thread.
#[derive(Debug, Default)]
pub struct InputSystem {
    tracker: StateTracker,
}

impl InputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the batches collected for this frame.
    pub fn update(&mut self, batches: &mut Vec<Vec<InputEvent>>) {
        self.tracker.clear();
        for batch in batches.drain(..) {
            trace!("Processing {} input events", batch.len());
            self.tracker.process_events(&batch);
        }
        self.tracker.finalize_frame();
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_drains_every_batch() {
        let mut system = InputSystem::new();

        let mut batches = vec![
            vec![InputEvent::KeyDown { key: KeyCode::KeyA }],
            vec![InputEvent::MouseMoved { x: 100.0, y: 200.0 }],
        ];
        system.update(&mut batches);

        assert!(batches.is_empty());
        assert!(system.tracker().is_key_pressed(KeyCode::KeyA));
        assert_eq!(system.tracker().pointer(), (100.0, 200.0));
    }

    #[test]
    fn press_edge_clears_on_next_update() {
        let mut system = InputSystem::new();

        system.update(&mut vec![vec![InputEvent::MouseButtonDown { button: MouseButton::Left }]]);
        assert!(system.tracker().is_button_pressed(MouseButton::Left));

        system.update(&mut Vec::new());
        assert!(!system.tracker().is_button_pressed(MouseButton::Left));
        assert!(system.tracker().is_button_down(MouseButton::Left));
    }
}
