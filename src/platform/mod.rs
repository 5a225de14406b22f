//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Core Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │  ↓               │
//  │  input_processor         │    │  StateTracker    │
//  │   └─ Winit → InputEvent  │    │  ↓               │
//  │   ↓                      │    │  Device          │
//  │  InputBuffer             │    │  ↓               │
//  │   ├─ discrete: Vec<>     │    │  Game Fsm        │
//  │   └─ cursor: latest      │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush)              │             │
//  │  crossbeam channel ──────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame Boundary: RedrawRequested
//   → All buffered input sent as one batch
//   → Core processes at fixed TPS (independent of refresh rate)
//   → Empty buffers are not sent
//
// If the core thread dies the platform logs and keeps running so the
// user can still close the window.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;

//=== WindowConfig ========================================================

/// Window parameters chosen through the engine builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Adventure Engine"),
            width: 640,
            height: 480,
        }
    }
}

//=== Platform ============================================================

/// Window owner and input event aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS) and sends
/// batched events to the core thread. Not `Send`.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    config: WindowConfig,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
}

impl Platform {
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits abnormally.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends the buffered frame to the core thread.
    ///
    /// A disconnected channel drops the events with a warning.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let discrete_count = discrete.len();
        let continuous_count = continuous.len();

        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        if self
            .event_sender
            .send(PlatformEvent::Inputs { discrete, continuous })
            .is_err()
        {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                discrete_count + continuous_count
            );
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, Window::scale_factor)
    }

    #[cfg(test)]
    fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = input_processor::process_mouse_move(position.x, position.y, self.scale_factor());
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match input_processor::process_key_event(key_event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.buffer
                    .push_discrete(input_processor::process_mouse_button(*button, *state));
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
