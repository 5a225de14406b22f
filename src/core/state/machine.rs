//=========================================================================
// State Machine
//=========================================================================
//
// Stack machine driving registered states with a shared context.
//
// Transition application:
//   dispatch(callback) → controller.pending? → apply → (enter/resume may
//   request again) → apply … bounded by MAX_CHAINED_TRANSITIONS
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Controller, State, Transition};
use crate::core::gfx::RenderTarget;

//=== Constants ===========================================================

/// Arena slot of the inert base state seeded into every machine.
const BASE: usize = 0;

/// Upper bound on transitions applied back to back from enter/resume.
const MAX_CHAINED_TRANSITIONS: usize = 16;

//=== Base State ==========================================================

struct Inert;

impl<C, M> State<C, M> for Inert {}

//=== Entry ===============================================================

struct Entry<C, M> {
    name: String,
    state: Box<dyn State<C, M>>,
}

//=== Fsm =================================================================

/// Stacked state machine owning its states and shared context `C`.
///
/// Messages of type `M` travel with switch and push requests and are
/// handed to the destination state's `enter`.
pub struct Fsm<C, M> {
    states: Vec<Entry<C, M>>,
    index: HashMap<String, usize>,
    stack: Vec<usize>,
    controller: Controller<M>,
    data: C,
}

impl<C, M> Fsm<C, M> {
    //--- Construction -----------------------------------------------------

    /// Creates a machine whose stack holds only the inert base state.
    pub fn new(data: C) -> Self {
        Self {
            states: vec![Entry {
                name: String::new(),
                state: Box::new(Inert),
            }],
            index: HashMap::new(),
            stack: vec![BASE],
            controller: Controller::new(),
            data,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `state` under `name` and runs its `init`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered.
    pub fn register_state<S>(&mut self, name: &str, state: S)
    where
        S: State<C, M> + 'static,
    {
        if self.index.contains_key(name) {
            panic!("duplicate state registration for {:?}", name);
        }

        let id = self.states.len();
        self.states.push(Entry {
            name: name.to_owned(),
            state: Box::new(state),
        });
        self.index.insert(name.to_owned(), id);
        self.controller.register(name);
        debug!("Registered state {:?}", name);

        self.states[id].state.init(&mut self.controller, &mut self.data);
        self.apply_pending();
    }

    //--- Transitions ------------------------------------------------------

    /// Replaces the top of the stack with `name`, applied immediately.
    pub fn switch(&mut self, name: &str, message: M) {
        self.controller.switch(name, message);
        self.apply_pending();
    }

    /// Pushes `name` over the current top, applied immediately.
    pub fn push(&mut self, name: &str, message: M) {
        self.controller.push(name, message);
        self.apply_pending();
    }

    /// Pops the top of the stack, applied immediately.
    pub fn pop(&mut self) {
        self.controller.pop();
        self.apply_pending();
    }

    //--- Dispatch ---------------------------------------------------------

    /// Forwards input handling to the top state.
    pub fn input(&mut self) {
        let top = self.top();
        self.states[top].state.input(&mut self.controller, &mut self.data);
        self.apply_pending();
    }

    /// Forwards per-frame logic to the top state.
    pub fn update(&mut self) {
        let top = self.top();
        self.states[top].state.update(&mut self.controller, &mut self.data);
        self.apply_pending();
    }

    /// Renders every stacked state, bottom to top.
    pub fn render(&mut self, target: &mut dyn RenderTarget) {
        for &id in self.stack.iter() {
            self.states[id].state.render(&self.data, target);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Number of states on the stack, base included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Name of the top state, or `None` while the base state is on top.
    pub fn current(&self) -> Option<&str> {
        match self.top() {
            BASE => None,
            id => Some(self.states[id].name.as_str()),
        }
    }

    /// Names on the stack from bottom to top, base excluded.
    pub fn stack_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.stack
            .iter()
            .filter(|&&id| id != BASE)
            .map(move |&id| self.states[id].name.as_str())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn data(&self) -> &C {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut C {
        &mut self.data
    }

    //--- Internal Helpers -------------------------------------------------

    fn top(&self) -> usize {
        self.stack.last().copied().unwrap_or(BASE)
    }

    fn apply_pending(&mut self) {
        let mut applied = 0;

        while let Some(transition) = self.controller.take_pending() {
            if applied == MAX_CHAINED_TRANSITIONS {
                warn!(
                    "Transition chain exceeded {} steps, dropping the rest",
                    MAX_CHAINED_TRANSITIONS
                );
                return;
            }
            applied += 1;

            match transition {
                Transition::Switch { name, message } => self.apply_switch(&name, message),
                Transition::Push { name, message } => self.apply_push(&name, message),
                Transition::Pop => self.apply_pop(),
            }
        }
    }

    fn lookup(&self, name: &str, verb: &str) -> Option<usize> {
        let Some(&id) = self.index.get(name) else {
            warn!("Attempted to {} unregistered state {:?}", verb, name);
            return None;
        };

        if self.top() == id {
            debug!("State {:?} is already on top, ignoring {}", name, verb);
            return None;
        }

        if self.stack.contains(&id) {
            warn!("State {:?} is already in the stack, skipping {}", name, verb);
            return None;
        }

        Some(id)
    }

    fn apply_switch(&mut self, name: &str, message: M) {
        let Some(id) = self.lookup(name, "switch") else {
            return;
        };

        let top = self.top();
        debug!("Switching state {:?} -> {:?}", self.states[top].name, name);

        self.states[top].state.exit(&mut self.data);
        if let Some(slot) = self.stack.last_mut() {
            *slot = id;
        }
        self.states[id]
            .state
            .enter(&mut self.controller, &mut self.data, message);
    }

    fn apply_push(&mut self, name: &str, message: M) {
        let Some(id) = self.lookup(name, "push") else {
            return;
        };

        let top = self.top();
        debug!("Pushing state {:?} over {:?}", name, self.states[top].name);

        self.states[top].state.pause(&mut self.data);
        self.stack.push(id);
        self.states[id]
            .state
            .enter(&mut self.controller, &mut self.data, message);
    }

    fn apply_pop(&mut self) {
        if self.stack.len() <= 1 {
            warn!("Attempted to pop the last state on the stack");
            return;
        }

        let top = self.top();
        debug!("Popping state {:?}", self.states[top].name);

        self.states[top].state.exit(&mut self.data);
        self.stack.pop();

        let top = self.top();
        self.states[top]
            .state
            .resume(&mut self.controller, &mut self.data);
    }
}

//--- Trait Implementations -----------------------------------------------

impl<C, M> fmt::Debug for Fsm<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("stack", &self.stack_names().collect::<Vec<_>>())
            .field("registered", &self.index.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
