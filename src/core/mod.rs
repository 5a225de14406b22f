//=========================================================================
// Core Systems
//=========================================================================
//
// Everything that runs on the logic (non-platform) thread.
//
// Modules:
// - `ease`, `timer`: time-driven helpers
// - `state`: stacked finite-state machines
// - `input`: raw input tracking and named logical buttons
// - `gfx`: render-target abstraction, sprites, animation
// - `imgui`: immediate-mode widgets with retained hot state
// - `event`: kind-keyed event broker
// - `context`: per-frame data shared by game states
// - `platform_bridge` + `orchestrator`: the fixed-rate core loop
//
//=========================================================================

//=== Module Declarations =================================================

pub mod context;
pub mod ease;
pub mod error;
pub mod event;
pub mod gfx;
pub mod imgui;
pub mod input;
pub mod state;
pub mod timer;

pub(crate) mod orchestrator;
pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use context::FrameContext;
pub use error::EngineError;
pub use platform_bridge::PlatformError;
