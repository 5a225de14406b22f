//=========================================================================
// Adventure Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──> ──run()──>  [Runtime]
//         │                                              │
//         ├─ with_tps()                                  └─ spawns core thread
//         ├─ with_channel_capacity()                        runs platform
//         ├─ with_title() / with_window_size()              blocks until exit
//         ├─ with_bindings()
//         └─ with_frame_sink()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::gfx::DrawCommand;
use crate::core::input::BindingMap;
use crate::core::orchestrator::CoreSystemsOrchestrator;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::state::Fsm;
use crate::core::{EngineError, FrameContext};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// `M` is the transition message type of the game state machine.
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window**: "Adventure Engine", 640x480 logical pixels
/// - **Bindings**: empty
///
/// # Examples
///
/// ```no_run
/// use adventure_engine::EngineBuilder;
/// use adventure_engine::core::input::BindingMap;
///
/// EngineBuilder::<()>::new()
///     .with_tps(120.0)
///     .with_title("Demo")
///     .with_bindings(BindingMap::builtin())
///     .build()
///     .run()
///     .expect("engine failed");
/// ```
pub struct EngineBuilder<M> {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    bindings: BindingMap,
    frame_sink: Option<Sender<Vec<DrawCommand>>>,
    _phantom: std::marker::PhantomData<fn() -> M>,
}

impl<M: 'static> EngineBuilder<M> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig::default(),
            bindings: BindingMap::default(),
            frame_sink: None,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.window.title = title.to_owned();
        self
    }

    /// Sets the window's inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Action → input table used to build the frame's `Device`.
    pub fn with_bindings(mut self, bindings: BindingMap) -> Self {
        self.bindings = bindings;
        self
    }

    /// Receives every rendered frame's draw commands.
    ///
    /// Frames are offered without blocking; a full channel drops them.
    pub fn with_frame_sink(mut self, sink: Sender<Vec<DrawCommand>>) -> Self {
        self.frame_sink = Some(sink);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine<M> {
        info!(
            "Building engine (TPS: {}, channel: {}, bindings: {} actions)",
            self.tps,
            self.channel_capacity,
            self.bindings.len()
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(self.bindings, self.frame_sink),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<M: 'static> Default for EngineBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Adventure Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem → FrameContext → Fsm → CommandBuffer
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
pub struct Engine<M> {
    orchestrator: CoreSystemsOrchestrator<M>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<M: 'static> Engine<M> {
    //--- Initialization ---------------------------------------------------

    /// Registers game setup, run on the core thread before the first tick.
    ///
    /// The setup registers states on the game state machine and makes the
    /// first transition. May be called several times; setups run in order.
    ///
    /// ```no_run
    /// # use adventure_engine::EngineBuilder;
    /// # use adventure_engine::core::state::State;
    /// # use adventure_engine::core::FrameContext;
    /// struct Title;
    /// impl State<FrameContext, ()> for Title {}
    ///
    /// EngineBuilder::<()>::new()
    ///     .build()
    ///     .init(|fsm| {
    ///         fsm.register_state("title", Title);
    ///         fsm.switch("title", ());
    ///     })
    ///     .run()
    ///     .expect("engine failed");
    /// ```
    pub fn init<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut Fsm<FrameContext, M>) + Send + 'static,
    {
        self.orchestrator.add_setup(Box::new(setup));
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core channel
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → channel disconnects → logic thread terminates
    ///
    /// # Errors
    ///
    /// [`EngineError::Platform`] if the event loop fails, or
    /// [`EngineError::CorePanicked`] if the logic thread panicked.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.channel_capacity);

        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        let platform = Platform::new(tx, self.window);
        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        // The platform's sender is gone now, so the core loop sees a
        // disconnect even if no close event was delivered.
        let core_result = core_handle.join();
        if core_result.is_err() {
            error!("Core thread panicked");
        }

        info!("Engine shutdown complete");
        platform_result?;
        core_result.map_err(|_| EngineError::CorePanicked)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<()>::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window, WindowConfig::default());
        assert!(builder.bindings.is_empty());
        assert!(builder.frame_sink.is_none());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::<()>::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::<()>::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::<()>::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::<()>::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::<()>::new().with_window_size(0, 240);
    }

    #[test]
    fn builder_window_settings() {
        let builder = EngineBuilder::<()>::new()
            .with_title("Overworld")
            .with_window_size(320, 240);

        assert_eq!(
            builder.window,
            WindowConfig {
                title: "Overworld".into(),
                width: 320,
                height: 240
            }
        );
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let mut bindings = BindingMap::default();
        bindings.bind("jump", &["keyboard:space"]);

        let engine = EngineBuilder::<()>::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_bindings(bindings)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
    }

    #[test]
    fn init_setups_run_in_order() {
        let (_tx, rx) = crossbeam_channel::unbounded();
        let engine = EngineBuilder::<()>::new()
            .build()
            .init(|fsm| fsm.data_mut().delta = 1.0)
            .init(|fsm| fsm.data_mut().delta *= 3.0);

        let core = engine.orchestrator.into_loop(rx, std::time::Instant::now());
        assert_eq!(core.fsm().data().delta, 3.0);
    }
}
