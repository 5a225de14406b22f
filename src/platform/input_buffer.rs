//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame aggregation of platform input before it crosses to the core
// thread.
//
// Two lanes:
//   discrete   → key and button edges, order kept, consecutive repeats
//                collapsed (OS key repeat)
//   continuous → cursor position, only the latest survives
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== Constants ===========================================================

const DISCRETE_CAPACITY: usize = 64;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    cursor: Option<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(DISCRETE_CAPACITY),
            cursor: None,
        }
    }

    //--- Pushing ----------------------------------------------------------

    /// Appends a key or button edge unless it repeats the previous one.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Replaces the pending cursor position.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.cursor = Some(event);
    }

    //--- Draining ---------------------------------------------------------

    /// Takes the frame's events as `(discrete, continuous)`.
    ///
    /// Returns `None` when nothing was buffered, so empty frames are not
    /// sent at all.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::replace(&mut self.discrete, Vec::with_capacity(DISCRETE_CAPACITY));
        let continuous = self.cursor.take().into_iter().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.cursor.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key }
    }

    #[test]
    fn consecutive_repeats_collapse() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::KeyA));
        buffer.push_discrete(key_down(KeyCode::KeyA));
        buffer.push_discrete(key_down(KeyCode::KeyB));
        buffer.push_discrete(key_down(KeyCode::KeyA));

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(discrete.len(), 3, "only adjacent duplicates are dropped");
    }

    #[test]
    fn latest_cursor_position_wins() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        buffer.push_continuous(InputEvent::MouseMoved { x: 20.0, y: 30.0 });

        let (_, continuous) = buffer.drain().unwrap();
        assert_eq!(continuous, vec![InputEvent::MouseMoved { x: 20.0, y: 30.0 }]);
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(key_down(KeyCode::Space));
        buffer.push_continuous(InputEvent::MouseMoved { x: 1.0, y: 2.0 });

        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none(), "empty frames produce nothing");
    }
}
