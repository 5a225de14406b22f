//=========================================================================
// Adventure Engine: Library Root
//
// A small 2D game engine built around stacked state machines.
//
// Layout:
// - `core`: everything running on the logic thread (state machines,
//   tweens, timers, input, sprites, IMGUI, events)
// - `platform`: winit window and input polling (private)
// - `engine`: builder and runtime tying the two together
// - `game`: the overworld demo content
//
// Typical usage:
// ```no_run
// use adventure_engine::EngineBuilder;
//
// EngineBuilder::<()>::new().build().run().expect("engine failed");
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` holds the winit integration and is not part of the public
// API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
