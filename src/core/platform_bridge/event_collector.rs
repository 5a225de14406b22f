//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input_batches → TickControl
//
// Bounded polling keeps one tick from starving on a flood of events; the
// remainder is picked up next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events into per-tick input batches.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Drains pending platform events without blocking.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    #[cfg(test)]
    fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes the collected batches, leaving an empty buffer.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    fn key_batch(key: KeyCode) -> PlatformEvent {
        PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key }],
            continuous: vec![],
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn collect_aggregates_multiple_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key_batch(KeyCode::KeyA)).unwrap();
        tx.send(PlatformEvent::Inputs {
            discrete: vec![],
            continuous: vec![InputEvent::MouseMoved { x: 10.0, y: 20.0 }],
        })
        .unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.batches().len(), 2);
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn take_batches_leaves_collector_empty() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key_batch(KeyCode::Space)).unwrap();
        collector.collect_frame();

        assert_eq!(collector.take_batches().len(), 1);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn backlog_is_spread_over_ticks() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..MAX_EVENTS_PER_FRAME + 5 {
            tx.send(key_batch(KeyCode::KeyW)).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), MAX_EVENTS_PER_FRAME);
        collector.collect_frame();
        assert_eq!(collector.batches().len(), 5);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
