//=========================================================================
// Platform Subsystem
//
// Bridges Winit window events with the engine's logic thread via a
// bounded channel.
//
// Architecture:
// ```text
//  Host Thread (event loop):        Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit WindowEvent       │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputCollector          │    │  PointerState    │
//  │   ├─ map_window_event    │    │  ↓               │
//  │   └─ InputBuffer         │    │  TouchInput      │
//  │       ├─ discrete: Vec<> │    │  ↓               │
//  │       └─ continuous: Set │    │  GestureTracker  │
//  │   ↓                      │    │  ↓               │
//  │  RedrawRequested         │    │  GestureHandler  │
//  │   ↓ (flush)              │    └──────────────────┘
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: flush()
//    → All buffered input sent as one batch
//    → Core processes at fixed TPS (independent of refresh rate)
//    → Empty buffers NOT sent
// ```
//
// The host keeps ownership of its event loop and window. It forwards
// window events to the collector and calls `flush()` once per frame,
// typically on `RedrawRequested`.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod input_buffer;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::event::WindowEvent;

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::PlatformEvent;
use input_buffer::InputBuffer;

pub(crate) use event_mapper::map_window_event;

//=== InputCollector ======================================================

/// Buffers pointer input on the host thread and ships it to the logic
/// thread once per frame.
///
/// The collector is `Send` but not shared: each host thread that feeds
/// input should hold its own (see [`EngineHandle::collector`]).
///
/// [`EngineHandle::collector`]: crate::EngineHandle::collector
pub struct InputCollector {
    buffer: InputBuffer,
    sender: Sender<PlatformEvent>,
}

impl InputCollector {
    //--- Construction -----------------------------------------------------
    pub fn new(sender: Sender<PlatformEvent>) -> Self {
        Self {
            buffer: InputBuffer::new(),
            sender,
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Maps and buffers a Winit window event. Events without pointer data
    /// are ignored.
    pub fn window_event(&mut self, event: &WindowEvent) {
        match map_window_event(event) {
            Some(input) => self.buffer.push(input),
            None => trace!(target: "platform::input", "Ignored window event"),
        }
    }

    /// Buffers an already-mapped pointer event.
    pub fn push(&mut self, event: InputEvent) {
        self.buffer.push(event);
    }

    /// Number of events waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    //--- Frame Boundary ---------------------------------------------------

    /// Sends everything buffered since the last flush as one batch.
    ///
    /// Cursor and finger moves are coalesced to their latest position, but
    /// a move that precedes a button event keeps its place, so a click
    /// that starts and ends within one frame is still reported where it
    /// happened.
    ///
    /// Empty frames send nothing. Returns `false` only when the logic
    /// thread is gone; the events are dropped and a warning is logged.
    pub fn flush(&mut self) -> bool {
        let Some(events) = self.buffer.drain() else {
            return true;
        };

        let count = events.len();
        trace!(target: "platform::input", "Flushing {} pointer events", count);

        if self.sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                count
            );
            return false;
        }
        true
    }

    /// Tells the logic thread to finish its last frame and exit.
    pub fn close(&self) {
        info!(target: "platform", "Window close requested");
        if self.sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Logic thread already stopped");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
