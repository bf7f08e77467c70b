//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-thread inbox for pointer batches sent by an `InputCollector`.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → pointer batches → InputSystem
//                                             └→ TickControl (keep ticking?)
//
// Each tick takes at most `FRAME_BUDGET` messages so a flooded channel
// cannot stall gesture updates. A close request ends the loop, but the
// pointer batches queued ahead of it still belong to the final frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== TickControl =========================================================

/// Whether the logic thread runs another tick after this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Pointer batches received during one tick, in arrival order.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    pending: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    /// Messages taken from the channel per tick.
    pub(crate) const FRAME_BUDGET: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            pending: Vec::new(),
        }
    }

    //--- collect_frame() --------------------------------------------------
    //
    // Replaces last tick's batches with whatever the host flushed since.
    // Never blocks: the orchestrator owns pacing.
    //
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.pending.clear();

        for _ in 0..Self::FRAME_BUDGET {
            let message = match self.receiver.try_recv() {
                Ok(message) => message,
                Err(TryRecvError::Empty) => return TickControl::Continue,
                Err(TryRecvError::Disconnected) => {
                    debug!("All input collectors dropped");
                    return TickControl::Exit;
                }
            };

            match message {
                PlatformEvent::Inputs(batch) if batch.is_empty() => {}
                PlatformEvent::Inputs(batch) => self.pending.push(batch),
                PlatformEvent::WindowClosed => return TickControl::Exit,
            }
        }

        warn!(
            "Pointer input backlog: {} messages this tick, rest deferred",
            Self::FRAME_BUDGET
        );
        TickControl::Continue
    }

    /// Pointer batches for this tick.
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.pending
    }

    /// Total pointer events across this tick's batches.
    pub(crate) fn event_count(&self) -> usize {
        self.pending.iter().map(Vec::len).sum()
    }

    /// Lets the input system drain the batches in place.
    pub(crate) fn batches_mut(&mut self) -> &mut Vec<Vec<InputEvent>> {
        &mut self.pending
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn tap(id: u64) -> Vec<InputEvent> {
        vec![
            InputEvent::TouchStarted { id, x: 1.0, y: 1.0 },
            InputEvent::TouchEnded { id, x: 1.0, y: 1.0 },
        ]
    }

    #[test]
    fn idle_channel_yields_no_batches() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
        assert_eq!(collector.event_count(), 0);
    }

    #[test]
    fn flushed_frames_arrive_in_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(tap(1))).unwrap();
        tx.send(PlatformEvent::Inputs(vec![InputEvent::MouseMoved { x: 3.0, y: 4.0 }]))
            .unwrap();
        tx.send(PlatformEvent::Inputs(Vec::new())).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.batches().len(), 2);
        assert_eq!(collector.batches()[0], tap(1));
        assert_eq!(collector.event_count(), 3);
    }

    #[test]
    fn close_keeps_batches_queued_ahead_of_it() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(tap(2))).unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();
        tx.send(PlatformEvent::Inputs(tap(3))).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
        assert_eq!(collector.batches(), &[tap(2)]);
    }

    #[test]
    fn next_tick_starts_empty() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(tap(1))).unwrap();
        collector.collect_frame();
        collector.batches_mut().clear();
        tx.send(PlatformEvent::Inputs(tap(4))).unwrap();
        collector.collect_frame();

        assert_eq!(collector.batches(), &[tap(4)]);
    }

    #[test]
    fn backlog_spills_into_next_tick() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for id in 0..(EventCollector::FRAME_BUDGET as u64 + 3) {
            tx.send(PlatformEvent::Inputs(tap(id))).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), EventCollector::FRAME_BUDGET);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 3);
    }

    #[test]
    fn dropped_senders_stop_the_loop() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
