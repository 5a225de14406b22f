//=========================================================================
// Button
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== Button ==============================================================

/// Per-frame state of a named logical button.
///
/// Edges (`is_pressed`, `is_released`) hold for exactly one update.
/// `down_duration` keeps its last value after release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    /// Analog reading; non-zero means held.
    pub value: f64,
    pub is_down: bool,
    pub is_pressed: bool,
    pub is_released: bool,
    pub pressed_at: Option<Instant>,
    pub released_at: Option<Instant>,
    pub down_duration: Duration,
}

impl Button {
    /// Never pressed. Also returned for unmapped actions.
    pub const RELEASED: Self = Self {
        value: 0.0,
        is_down: false,
        is_pressed: false,
        is_released: false,
        pressed_at: None,
        released_at: None,
        down_duration: Duration::ZERO,
    };

    /// Folds in this frame's reading, deriving edges from the last one.
    pub fn advance(&mut self, value: f64, now: Instant) {
        let was_down = self.is_down;

        self.value = value;
        self.is_down = value != 0.0;
        self.is_pressed = !was_down && self.is_down;
        self.is_released = was_down && !self.is_down;

        if self.is_pressed {
            self.pressed_at = Some(now);
        }
        if self.is_released {
            self.released_at = Some(now);
        }

        if let (true, Some(pressed_at)) = (self.is_down, self.pressed_at) {
            self.down_duration = now.saturating_duration_since(pressed_at);
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::RELEASED
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_hold_release_cycle() {
        let start = Instant::now();
        let mut button = Button::default();

        button.advance(1.0, start);
        assert!(button.is_pressed && button.is_down && !button.is_released);
        assert_eq!(button.pressed_at, Some(start));

        let later = start + Duration::from_millis(250);
        button.advance(1.0, later);
        assert!(!button.is_pressed, "pressed is a one-frame edge");
        assert_eq!(button.down_duration, Duration::from_millis(250));

        let release = start + Duration::from_millis(400);
        button.advance(0.0, release);
        assert!(button.is_released && !button.is_down);
        assert_eq!(button.released_at, Some(release));
        assert_eq!(
            button.down_duration,
            Duration::from_millis(250),
            "duration freezes on release"
        );

        button.advance(0.0, release + Duration::from_millis(16));
        assert!(!button.is_released);
    }

    #[test]
    fn analog_value_counts_as_down() {
        let mut button = Button::default();
        button.advance(-0.4, Instant::now());
        assert!(button.is_down);
        assert_eq!(button.value, -0.4);
    }
}
