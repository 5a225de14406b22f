//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Runs the game on the logic (non-platform) thread at a fixed tick rate.
//
// Each tick:
//   1. EventCollector drains platform batches (exit on close/disconnect)
//   2. InputSystem folds batches into the StateTracker
//   3. FrameContext pulls Device buttons, pointer and delta
//   4. Fsm input → update → render into the CommandBuffer
//   5. Frame handed to the presenter sink (if any)
//   6. Sleep out the rest of the tick
//
// The game Fsm holds non-Send states, so it is built on the core thread
// from setup closures collected by the engine.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::context::FrameContext;
use crate::core::gfx::{CommandBuffer, DrawCommand};
use crate::core::input::{BindingMap, InputSystem};
use crate::core::platform_bridge::{EventCollector, PlatformEvent, TickControl};
use crate::core::state::Fsm;

//=== Setup ===============================================================

/// Game initialization run on the core thread before the first tick.
pub(crate) type Setup<M> = Box<dyn FnOnce(&mut Fsm<FrameContext, M>) + Send>;

//=== CoreSystemsOrchestrator =============================================

/// Everything needed to start the core thread.
pub(crate) struct CoreSystemsOrchestrator<M> {
    bindings: BindingMap,
    setups: Vec<Setup<M>>,
    frame_sink: Option<Sender<Vec<DrawCommand>>>,
    _message: PhantomData<fn() -> M>,
}

impl<M: 'static> CoreSystemsOrchestrator<M> {
    pub(crate) fn new(bindings: BindingMap, frame_sink: Option<Sender<Vec<DrawCommand>>>) -> Self {
        Self {
            bindings,
            setups: Vec::new(),
            frame_sink,
            _message: PhantomData,
        }
    }

    pub(crate) fn add_setup(&mut self, setup: Setup<M>) {
        self.setups.push(setup);
    }

    /// Spawns the logic thread ticking at `tps` until the platform closes.
    pub(crate) fn spawn_core_thread(self, receiver: Receiver<PlatformEvent>, tps: f64) -> thread::JoinHandle<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut core = self.into_loop(receiver, Instant::now());

            loop {
                let tick_start = Instant::now();

                if core.tick(tick_start) == TickControl::Exit {
                    info!("Core thread exiting");
                    break;
                }

                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                }
            }
        })
    }

    /// Builds the game FSM and the per-tick state.
    pub(crate) fn into_loop(self, receiver: Receiver<PlatformEvent>, start: Instant) -> CoreLoop<M> {
        let mut fsm = Fsm::new(FrameContext::new(&self.bindings));
        for setup in self.setups {
            setup(&mut fsm);
        }
        debug!("Game state machine ready, current state {:?}", fsm.current());

        CoreLoop {
            collector: EventCollector::new(receiver),
            input: InputSystem::new(),
            fsm,
            buffer: CommandBuffer::new(),
            frame_sink: self.frame_sink,
            last_tick: start,
        }
    }
}

//=== CoreLoop ============================================================

/// Per-tick state owned by the core thread.
pub(crate) struct CoreLoop<M> {
    collector: EventCollector,
    input: InputSystem,
    fsm: Fsm<FrameContext, M>,
    buffer: CommandBuffer,
    frame_sink: Option<Sender<Vec<DrawCommand>>>,
    last_tick: Instant,
}

impl<M> CoreLoop<M> {
    /// Runs one frame at time `now`.
    pub(crate) fn tick(&mut self, now: Instant) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        let mut batches = self.collector.take_batches();
        self.input.update(&mut batches);

        let delta = now.saturating_duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        self.fsm.data_mut().refresh(self.input.tracker(), now, delta);

        self.fsm.input();
        self.fsm.update();

        self.buffer.clear();
        self.fsm.render(&mut self.buffer);
        self.present();

        TickControl::Continue
    }

    fn present(&mut self) {
        let Some(sink) = &self.frame_sink else {
            return;
        };

        match sink.try_send(self.buffer.commands().to_vec()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => trace!("Presenter behind, frame dropped"),
            Err(TrySendError::Disconnected(_)) => {
                debug!("Presenter gone, no longer sending frames");
                self.frame_sink = None;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn fsm(&self) -> &Fsm<FrameContext, M> {
        &self.fsm
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
