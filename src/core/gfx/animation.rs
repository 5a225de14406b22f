//=========================================================================
// Animation
//=========================================================================
//
// Frame-indexed playback driven by elapsed seconds.
//
// Timing is either frames-per-second (fixed period) or a total duration
// spread evenly across the frames, recomputed as frames are added.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::{Flip, Rect};

//=== Frame ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub src: Rect,
    pub flip: Flip,
}

//=== Timing ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Timing {
    Fps,
    Duration(f64),
}

//=== Animation ===========================================================

#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Frame>,
    index: usize,
    elapsed: f64,
    period: f64,
    timing: Timing,
}

impl Animation {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            index: 0,
            elapsed: 0.0,
            period: 0.0,
            timing: Timing::Fps,
        }
    }

    //--- Building ---------------------------------------------------------

    pub fn add_frame(&mut self, x: i32, y: i32, width: i32, height: i32, flip: Flip) -> &mut Self {
        self.frames.push(Frame {
            src: Rect::new(x, y, width, height),
            flip,
        });

        if let Timing::Duration(seconds) = self.timing {
            self.period = seconds / self.frames.len() as f64;
        }
        self
    }

    /// Fixed playback rate. Non-positive rates freeze the animation.
    pub fn set_fps(&mut self, fps: f64) -> &mut Self {
        self.timing = Timing::Fps;
        self.period = if fps > 0.0 { 1.0 / fps } else { 0.0 };
        self
    }

    /// Plays all frames once per `duration`.
    pub fn set_duration(&mut self, duration: Duration) -> &mut Self {
        let seconds = duration.as_secs_f64();
        self.timing = Timing::Duration(seconds);
        self.period = if self.frames.is_empty() {
            0.0
        } else {
            seconds / self.frames.len() as f64
        };
        self
    }

    //--- Playback ---------------------------------------------------------

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.index = 0;
    }

    /// Advances by `delta` seconds, skipping as many frames as covered.
    pub fn update(&mut self, delta: f64) {
        self.elapsed += delta;

        if self.period <= 0.0 || self.frames.is_empty() {
            return;
        }

        while self.elapsed >= self.period {
            self.index = (self.index + 1) % self.frames.len();
            self.elapsed -= self.period;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Frame to display, `None` for an animation without frames.
    pub fn frame(&self) -> Option<&Frame> {
        self.frames.get(self.index)
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Seconds each frame stays on screen.
    pub fn period(&self) -> f64 {
        self.period
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
