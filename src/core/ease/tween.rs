//=========================================================================
// Tween
//=========================================================================
//
// Time-driven interpolation of one scalar between `from` and `to`.
//
// Direction model:
//   reversed  → elapsed runs backwards (value retraces its path)
//   inverted  → from/to are swapped (elapsed remapped so value holds)
//   forward   ⇔ inverted == reversed
//
// Hooks receive the tween and a caller-owned context `C`, which lets a
// finishing tween drive whatever owns it (typically a state controller).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{linear, to, Easing};

//=== Constants ===========================================================

/// Shortest duration a tween accepts; shorter values are clamped up.
pub const MIN_DURATION: f64 = 1e-6;

//=== Direction ===========================================================

/// Semantic direction of travel.
///
/// `Opposite` is only meaningful as an argument to
/// [`Tween::set_direction`]; [`Tween::direction`] never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Opposite,
}

//=== TweenHook ===========================================================

/// Callback fired when a tween starts or finishes a traversal.
pub type TweenHook<C> = Box<dyn FnMut(&Tween<C>, &mut C)>;

//=== Tween ===============================================================

pub struct Tween<C = ()> {
    from: f64,
    to: f64,
    value: f64,
    elapsed: f64,
    duration: f64,
    easing: Easing,

    is_reversed: bool,
    is_inverted: bool,
    is_started: bool,
    is_finished: bool,
    is_paused: bool,

    started_hooks: Vec<TweenHook<C>>,
    finished_hooks: Vec<TweenHook<C>>,
}

impl<C> Tween<C> {
    //--- Construction -----------------------------------------------------

    /// Creates a tween resting at `from`. `None` easing means linear.
    pub fn new(from: f64, to: f64, duration: Duration, easing: Option<Easing>) -> Self {
        let mut tween = Self {
            from,
            to,
            value: from,
            elapsed: 0.0,
            duration: MIN_DURATION,
            easing: easing.unwrap_or(linear),
            is_reversed: false,
            is_inverted: false,
            is_started: false,
            is_finished: false,
            is_paused: false,
            started_hooks: Vec::new(),
            finished_hooks: Vec::new(),
        };
        tween.set_duration(duration);
        tween
    }

    //--- Hooks ------------------------------------------------------------

    /// Registers a hook fired on the first update of every traversal.
    pub fn on_started<F>(&mut self, hook: F)
    where
        F: FnMut(&Tween<C>, &mut C) + 'static,
    {
        self.started_hooks.push(Box::new(hook));
    }

    /// Registers a hook fired once whenever a traversal completes.
    pub fn on_finished<F>(&mut self, hook: F)
    where
        F: FnMut(&Tween<C>, &mut C) + 'static,
    {
        self.finished_hooks.push(Box::new(hook));
    }

    //--- Playback ---------------------------------------------------------

    /// Rewinds to `from` and clears every direction flag.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.value = self.from;
        self.is_reversed = false;
        self.is_inverted = false;
        self.is_started = false;
        self.is_finished = false;
    }

    pub fn play(&mut self) {
        self.is_paused = false;
    }

    pub fn pause(&mut self) {
        self.is_paused = true;
    }

    /// Advances the tween by `delta` seconds.
    ///
    /// No-op while paused or finished. Finished hooks run synchronously,
    /// in registration order, on the update that reaches a boundary.
    pub fn update(&mut self, delta: f64, ctx: &mut C) {
        if self.is_paused || self.is_finished {
            return;
        }

        if !self.is_started {
            self.is_started = true;
            self.fire_started(ctx);
        }

        if self.is_reversed {
            self.elapsed -= delta;
            if self.elapsed <= 0.0 {
                self.elapsed = 0.0;
                self.is_finished = true;
            }
        } else {
            self.elapsed += delta;
            if self.elapsed >= self.duration {
                self.elapsed = self.duration;
                self.is_finished = true;
            }
        }

        let t = self.elapsed / self.duration;
        self.value = if self.is_inverted {
            to(t, self.to, self.from, self.easing)
        } else {
            to(t, self.from, self.to, self.easing)
        };

        if self.is_finished {
            debug!("Tween finished {:?} at {}", self.direction(), self.value);
            self.is_started = false;
            self.fire_finished(ctx);
        }
    }

    //--- Direction Control ------------------------------------------------

    pub fn direction(&self) -> Direction {
        if self.is_inverted == self.is_reversed {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub fn is_forward(&self) -> bool {
        self.direction() == Direction::Forward
    }

    pub fn is_backward(&self) -> bool {
        self.direction() == Direction::Backward
    }

    /// Steers the tween toward `direction`.
    ///
    /// A finished tween restarts via inversion, a running one turns
    /// around in place via reversal.
    pub fn set_direction(&mut self, direction: Direction) {
        let target = match direction {
            Direction::Opposite => match self.direction() {
                Direction::Forward => Direction::Backward,
                _ => Direction::Forward,
            },
            other => other,
        };

        if target == self.direction() {
            return;
        }

        if self.is_finished {
            self.invert(target == Direction::Backward);
        } else {
            self.reverse(!self.is_reversed);
        }
    }

    /// Swaps the interpolation endpoints without moving the value.
    ///
    /// Always clears the reversed and finished flags.
    pub fn invert(&mut self, inverted: bool) {
        if self.is_inverted != inverted {
            self.elapsed = self.duration - self.elapsed;
        }

        self.is_inverted = inverted;
        self.is_reversed = false;
        self.is_finished = false;
    }

    /// Runs elapsed time backwards (or forwards again). Clears finished.
    pub fn reverse(&mut self, reversed: bool) {
        self.is_reversed = reversed;
        self.is_finished = false;
    }

    /// Plays back the way the tween came.
    ///
    /// Finished: `invert(!inverted)`. Otherwise: `reverse(!reversed)`.
    pub fn invert_or_reverse(&mut self) {
        if self.is_finished {
            self.invert(!self.is_inverted);
        } else {
            self.reverse(!self.is_reversed);
        }
    }

    //--- Configuration ----------------------------------------------------

    /// Sets the traversal length. Non-positive values clamp to
    /// [`MIN_DURATION`].
    pub fn set_duration(&mut self, duration: Duration) {
        let seconds = duration.as_secs_f64();
        if seconds < MIN_DURATION {
            warn!("Tween duration {:?} too short, clamping to {}s", duration, MIN_DURATION);
            self.duration = MIN_DURATION;
        } else {
            self.duration = seconds;
        }
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    //--- Queries ----------------------------------------------------------

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_inverted(&self) -> bool {
        self.is_inverted
    }

    pub fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    //--- Internal Helpers -------------------------------------------------

    fn fire_started(&mut self, ctx: &mut C) {
        let mut hooks = std::mem::take(&mut self.started_hooks);
        for hook in hooks.iter_mut() {
            hook(self, ctx);
        }
        self.started_hooks = hooks;
    }

    fn fire_finished(&mut self, ctx: &mut C) {
        let mut hooks = std::mem::take(&mut self.finished_hooks);
        for hook in hooks.iter_mut() {
            hook(self, ctx);
        }
        self.finished_hooks = hooks;
    }
}

impl Tween<()> {
    /// Advances a context-free tween.
    pub fn tick(&mut self, delta: f64) {
        self.update(delta, &mut ());
    }
}

//--- Trait Implementations -----------------------------------------------

impl<C> fmt::Debug for Tween<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("value", &self.value)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("reversed", &self.is_reversed)
            .field("inverted", &self.is_inverted)
            .field("finished", &self.is_finished)
            .field("paused", &self.is_paused)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
