//=========================================================================
// Broker
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::mem;

use log::warn;

//=== Internal Dependencies ===============================================

use super::Event;

//=== Broker ==============================================================

pub type Listener<E> = Box<dyn FnMut(&E)>;

/// Routes events to the listeners registered for their kind.
///
/// Listeners run in registration order. Events of a kind nobody listens
/// to are dropped with a warning.
pub struct Broker<E: Event> {
    listeners: HashMap<E::Kind, Vec<Listener<E>>>,
    queue: Vec<E>,
}

impl<E: Event> Broker<E> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            queue: Vec::new(),
        }
    }

    pub fn listen(&mut self, kind: E::Kind, listener: impl FnMut(&E) + 'static) {
        self.listeners.entry(kind).or_default().push(Box::new(listener));
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers `event` now.
    pub fn dispatch(&mut self, event: E) {
        self.fire(&event);
    }

    /// Holds `event` until the next [`process`](Self::process).
    pub fn queue(&mut self, event: E) {
        self.queue.push(event);
    }

    /// Delivers every queued event in FIFO order.
    ///
    /// Events queued while processing wait for the next call.
    pub fn process(&mut self) {
        let mut batch = mem::take(&mut self.queue);
        for event in batch.drain(..) {
            self.fire(&event);
        }

        if self.queue.is_empty() {
            self.queue = batch;
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    //--- Internal Helpers -------------------------------------------------

    fn fire(&mut self, event: &E) {
        let kind = event.kind();
        match self.listeners.get_mut(&kind) {
            Some(listeners) if !listeners.is_empty() => {
                for listener in listeners.iter_mut() {
                    listener(event);
                }
            }
            _ => warn!("Dropped {:?} event: no listeners", kind),
        }
    }
}

impl<E: Event> Default for Broker<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Broker<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broker")
            .field("kinds", &self.listeners.keys().collect::<Vec<_>>())
            .field("pending", &self.queue.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
