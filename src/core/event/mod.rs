//=========================================================================
// Events
//=========================================================================
//
// Kind-keyed publish/subscribe for game code.
//
// Architecture:
//   listen(kind, f) → HashMap<Kind, Vec<Listener>>
//   dispatch(e)     → listeners of e.kind(), immediately
//   queue(e)        → Vec<E> ──process()──> listeners, FIFO
//
// Pattern: queue during update → process at a point the owner picks
//
//=========================================================================

//=== Module Declarations =================================================

mod broker;

//=== Public API ==========================================================

pub use broker::{Broker, Listener};

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Event Trait =========================================================

/// A value routable through a [`Broker`].
///
/// Usually an enum whose `Kind` is a field-less mirror of its variants.
pub trait Event {
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}
