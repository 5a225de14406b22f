//=========================================================================
// Device
//=========================================================================
//
// Named logical buttons computed from a binding table.
//
// Architecture:
//   BindingMap ──parse──> [(action, [InputName])]
//   StateTracker ──update()──> Button per action (edges vs last frame)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Instant;

use log::warn;

//=== Internal Dependencies ===============================================

use super::bindings::{BindingMap, InputName};
use super::button::Button;
use super::state_tracker::StateTracker;

//=== Device ==============================================================

static UNMAPPED: Button = Button::RELEASED;

#[derive(Debug, Default)]
pub struct Device {
    bindings: Vec<(String, Vec<InputName>)>,
    buttons: HashMap<String, Button>,
}

impl Device {
    /// Resolves every input name up front.
    ///
    /// Unknown names are dropped with a warning, as are gamepad names
    /// since no gamepad backend exists.
    pub fn new(bindings: &BindingMap) -> Self {
        let mut resolved = Vec::with_capacity(bindings.len());
        let mut buttons = HashMap::with_capacity(bindings.len());

        for (action, names) in bindings.iter() {
            let inputs = names
                .iter()
                .filter_map(|name| match InputName::parse(name) {
                    Ok(InputName::Gamepad(_)) => {
                        warn!("Skipping {:?} for action {:?}: no gamepad support", name, action);
                        None
                    }
                    Ok(input) => Some(input),
                    Err(err) => {
                        warn!("Skipping binding for action {:?}: {}", action, err);
                        None
                    }
                })
                .collect();

            resolved.push((action.to_owned(), inputs));
            buttons.insert(action.to_owned(), Button::default());
        }

        Self {
            bindings: resolved,
            buttons,
        }
    }

    /// Recomputes every action from the tracker.
    ///
    /// An action's value is the last non-zero value among its inputs.
    pub fn update(&mut self, tracker: &StateTracker, now: Instant) {
        for (action, inputs) in &self.bindings {
            let value = inputs
                .iter()
                .map(|input| tracker.value_of(input))
                .filter(|value| *value != 0.0)
                .last()
                .unwrap_or(0.0);

            if let Some(button) = self.buttons.get_mut(action) {
                button.advance(value, now);
            }
        }
    }

    /// Button for `action`; unmapped actions read as never pressed.
    pub fn get(&self, action: &str) -> &Button {
        self.buttons.get(action).unwrap_or(&UNMAPPED)
    }

    pub fn is_mapped(&self, action: &str) -> bool {
        self.buttons.contains_key(action)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, MouseButton};

    fn device() -> Device {
        let mut bindings = BindingMap::default();
        bindings
            .bind("up", &["keyboard:up", "keyboard:w"])
            .bind("fire", &["mouse:left", "gamepad:a", "keyboard:nope"]);
        Device::new(&bindings)
    }

    fn step(tracker: &mut StateTracker, device: &mut Device, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
        device.update(tracker, Instant::now());
    }

    #[test]
    fn any_bound_input_drives_action() {
        let mut tracker = StateTracker::new();
        let mut device = device();

        step(&mut tracker, &mut device, &[InputEvent::KeyDown { key: KeyCode::KeyW }]);
        assert!(device.get("up").is_pressed);

        step(&mut tracker, &mut device, &[InputEvent::KeyDown { key: KeyCode::ArrowUp }]);
        assert!(device.get("up").is_down);
        assert!(!device.get("up").is_pressed, "second input must not re-trigger the edge");

        step(&mut tracker, &mut device, &[InputEvent::KeyUp { key: KeyCode::KeyW }]);
        assert!(device.get("up").is_down, "arrow still held");

        step(&mut tracker, &mut device, &[InputEvent::KeyUp { key: KeyCode::ArrowUp }]);
        assert!(device.get("up").is_released);
    }

    #[test]
    fn unparseable_and_gamepad_inputs_are_skipped() {
        let mut tracker = StateTracker::new();
        let mut device = device();

        step(&mut tracker, &mut device, &[InputEvent::MouseButtonDown { button: MouseButton::Left }]);

        assert!(device.is_mapped("fire"));
        assert!(device.get("fire").is_pressed);
    }

    #[test]
    fn unmapped_action_reads_released() {
        let device = device();
        assert!(!device.is_mapped("jump"));
        assert_eq!(*device.get("jump"), Button::RELEASED);
    }
}
