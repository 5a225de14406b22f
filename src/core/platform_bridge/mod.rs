//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the core thread.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::PlatformError;
pub(crate) use interface::PlatformEvent;
