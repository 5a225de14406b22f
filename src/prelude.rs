//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use adventure_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::{EngineError, FrameContext};

// State machines
pub use crate::core::state::{Controller, Fsm, State, Transition};

// Time
pub use crate::core::ease::{Direction, Easing, Tween};
pub use crate::core::timer::Timer;

// Input
pub use crate::core::input::{BindingMap, Button, Device, KeyCode, MouseButton};

// Graphics
pub use crate::core::gfx::{Animation, Color, FRect, Flip, Rect, RenderTarget, Sprite, Texture, TileMap};

// GUI
pub use crate::core::imgui::{Gui, Pointer};

// Events
pub use crate::core::event::{Broker, Event};
