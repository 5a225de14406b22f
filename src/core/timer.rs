//=========================================================================
// Timer
//=========================================================================
//
// Delayed and periodic callbacks driven by an external delta tick.
//
// Two task lists:
//   after  → fires once when elapsed > interval, then dropped
//   every  → fires while elapsed >= interval (catch-up), up to a limit
//
// Nothing here measures wall time; scheduling is entirely a product of
// repeated `update(delta)` calls.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::debug;

//=== Constants ===========================================================

/// Passed as `limit` to [`Timer::every`] for a task that never expires.
pub const UNLIMITED: u32 = 0;

//=== Task ================================================================

struct Task {
    elapsed: f64,
    interval: f64,
    limit: u32,
    runs: u32,
    callback: Box<dyn FnMut()>,
}

impl Task {
    fn new(interval: Duration, limit: u32, callback: Box<dyn FnMut()>) -> Self {
        Self {
            elapsed: 0.0,
            interval: interval.as_secs_f64(),
            limit,
            runs: 0,
            callback,
        }
    }

    fn exhausted(&self) -> bool {
        self.limit != UNLIMITED && self.runs >= self.limit
    }
}

//=== Timer ===============================================================

#[derive(Default)]
pub struct Timer {
    afters: Vec<Task>,
    everys: Vec<Task>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Scheduling -------------------------------------------------------

    /// Schedules `callback` to run once, after `interval` has passed.
    pub fn after<F>(&mut self, interval: Duration, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.afters.push(Task::new(interval, UNLIMITED, Box::new(callback)));
    }

    /// Schedules `callback` every `interval`, at most `limit` times.
    ///
    /// A `limit` of [`UNLIMITED`] repeats forever.
    pub fn every<F>(&mut self, interval: Duration, limit: u32, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.everys.push(Task::new(interval, limit, Box::new(callback)));
    }

    //--- Lifecycle --------------------------------------------------------

    /// Drops every task without firing it.
    pub fn clear(&mut self) {
        self.afters.clear();
        self.everys.clear();
    }

    /// Restarts every task's schedule, keeping registrations.
    pub fn reset(&mut self) {
        for task in self.afters.iter_mut().chain(self.everys.iter_mut()) {
            task.elapsed = 0.0;
            task.runs = 0;
        }
    }

    /// Advances all tasks by `delta` seconds, firing whatever is due.
    ///
    /// A repeating task fires once per whole interval covered, so a
    /// large delta produces several calls in one update.
    pub fn update(&mut self, delta: f64) {
        self.afters.retain_mut(|task| {
            task.elapsed += delta;
            if task.elapsed > task.interval {
                (task.callback)();
                return false;
            }
            true
        });

        self.everys.retain_mut(|task| {
            task.elapsed += delta;

            while task.elapsed >= task.interval && !task.exhausted() {
                task.runs += 1;
                (task.callback)();
                task.elapsed -= task.interval;

                // Zero interval would never leave this loop.
                if task.interval <= 0.0 {
                    task.elapsed = 0.0;
                    break;
                }
            }

            if task.exhausted() {
                debug!("Repeating task finished after {} runs", task.runs);
                return false;
            }
            true
        });
    }

    //--- Queries ----------------------------------------------------------

    /// Number of tasks still scheduled.
    pub fn len(&self) -> usize {
        self.afters.len() + self.everys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("afters", &self.afters.len())
            .field("everys", &self.everys.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
