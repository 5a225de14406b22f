//=========================================================================
// State System
//=========================================================================
//
// Stacked finite-state machines for screens and entities alike.
//
// Architecture:
//   Fsm<C, M>
//     ├─ states: arena of Box<dyn State<C, M>> (index 0 = inert base)
//     ├─ index: name → arena slot
//     ├─ stack: Vec<slot> (bottom = base, top = driving state)
//     ├─ controller: Controller<M> (single pending transition)
//     └─ data: C (shared context handed to every callback)
//
// Dispatch:
//   input()/update() → top of stack only
//   render()         → every stack entry, bottom to top
//
// A transition requested through the controller is applied as soon as
// the callback that requested it returns.
//
//=========================================================================

//=== Module Declarations =================================================

mod machine;

//=== Public API ==========================================================

pub use machine::Fsm;

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::gfx::RenderTarget;

//=== State Trait =========================================================

/// Behaviour registered under a name in an [`Fsm`].
///
/// Every method has an empty default, so a state only overrides the
/// callbacks it cares about. A state is created once and reused on every
/// activation of its name.
///
/// ```rust
/// # use adventure_engine::core::state::{Controller, Fsm, State};
/// struct Idle;
///
/// impl State<u32, ()> for Idle {
///     fn update(&mut self, _ctl: &mut Controller<()>, ticks: &mut u32) {
///         *ticks += 1;
///     }
/// }
///
/// let mut fsm = Fsm::new(0u32);
/// fsm.register_state("idle", Idle);
/// fsm.switch("idle", ());
/// fsm.update();
/// assert_eq!(*fsm.data(), 1);
/// ```
pub trait State<C, M> {
    /// Called once, right after registration.
    fn init(&mut self, _ctl: &mut Controller<M>, _data: &mut C) {}

    /// Called when the state becomes top of stack via switch or push.
    fn enter(&mut self, _ctl: &mut Controller<M>, _data: &mut C, _message: M) {}

    /// Called when the state above this one is popped.
    fn resume(&mut self, _ctl: &mut Controller<M>, _data: &mut C) {}

    /// Input handling; top of stack only.
    fn input(&mut self, _ctl: &mut Controller<M>, _data: &mut C) {}

    /// Per-frame logic; top of stack only.
    fn update(&mut self, _ctl: &mut Controller<M>, _data: &mut C) {}

    /// Drawing; every state in the stack, bottom to top.
    fn render(&mut self, _data: &C, _target: &mut dyn RenderTarget) {}

    /// Called when another state is pushed over this one.
    fn pause(&mut self, _data: &mut C) {}

    /// Called when the state leaves the stack via switch or pop.
    fn exit(&mut self, _data: &mut C) {}
}

//=== Transition ==========================================================

/// A stack operation requested by a state.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<M> {
    /// Replace the top of the stack.
    Switch { name: String, message: M },

    /// Pause the top and stack a new state over it.
    Push { name: String, message: M },

    /// Exit the top and resume the one below.
    Pop,
}

//=== Controller ==========================================================

/// Handle through which states request transitions.
///
/// Holds at most one pending request; a second request made before the
/// owning machine applies the first replaces it. Requests naming an
/// unregistered state are rejected with a warning.
#[derive(Debug)]
pub struct Controller<M> {
    registered: HashSet<String>,
    pending: Option<Transition<M>>,
}

impl<M> Controller<M> {
    pub(crate) fn new() -> Self {
        Self {
            registered: HashSet::new(),
            pending: None,
        }
    }

    //--- Requests ---------------------------------------------------------

    pub fn switch(&mut self, name: &str, message: M) {
        if self.check_registered(name, "switch to") {
            self.request(Transition::Switch { name: name.to_owned(), message });
        }
    }

    pub fn push(&mut self, name: &str, message: M) {
        if self.check_registered(name, "push") {
            self.request(Transition::Push { name: name.to_owned(), message });
        }
    }

    pub fn pop(&mut self) {
        self.request(Transition::Pop);
    }

    //--- Queries ----------------------------------------------------------

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&Transition<M>> {
        self.pending.as_ref()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    //--- Machine Access ---------------------------------------------------

    pub(super) fn register(&mut self, name: &str) {
        self.registered.insert(name.to_owned());
    }

    pub(super) fn take_pending(&mut self) -> Option<Transition<M>> {
        self.pending.take()
    }

    //--- Internal Helpers -------------------------------------------------

    fn check_registered(&self, name: &str, verb: &str) -> bool {
        if self.registered.contains(name) {
            return true;
        }
        warn!("Attempted to {} unregistered state {:?}", verb, name);
        false
    }

    fn request(&mut self, transition: Transition<M>) {
        if self.pending.is_some() {
            debug!("Pending transition overridden by a newer request");
        }
        self.pending = Some(transition);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_with(names: &[&str]) -> Controller<u8> {
        let mut ctl = Controller::new();
        for name in names {
            ctl.register(name);
        }
        ctl
    }

    #[test]
    fn request_for_known_state_is_pending() {
        let mut ctl = controller_with(&["a"]);
        ctl.push("a", 7);
        assert_eq!(
            ctl.pending(),
            Some(&Transition::Push { name: "a".into(), message: 7 })
        );
    }

    #[test]
    fn request_for_unknown_state_is_dropped() {
        let mut ctl = controller_with(&["a"]);
        ctl.switch("missing", 0);
        assert!(!ctl.has_pending());
    }

    #[test]
    fn unknown_request_keeps_earlier_pending() {
        let mut ctl = controller_with(&["a"]);
        ctl.switch("a", 1);
        ctl.push("missing", 2);
        assert_eq!(
            ctl.pending(),
            Some(&Transition::Switch { name: "a".into(), message: 1 })
        );
    }

    #[test]
    fn later_request_overwrites_pending() {
        let mut ctl = controller_with(&["a", "b"]);
        ctl.switch("a", 1);
        ctl.pop();
        ctl.push("b", 2);

        assert_eq!(ctl.take_pending(), Some(Transition::Push { name: "b".into(), message: 2 }));
        assert!(ctl.take_pending().is_none(), "only one transition may be latent");
    }
}
