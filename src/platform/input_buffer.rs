//=========================================================================
// Input Buffer
//
// Collects pointer events between two frame boundaries and splits them
// into discrete and continuous categories. Acts as a transient event
// aggregator between the platform callbacks and the logic thread.
//
// Responsibilities:
// - Store incoming pointer events per frame
// - Deduplicate repeated discrete inputs (e.g. a doubled button press)
// - Coalesce continuous inputs to the latest position per pointer
// - Keep a finger's final discrete event authoritative over its moves
//
// Notes:
// The buffer lives only for the current frame and is reset every time
// it is drained. Drained order is discrete first, then continuous, so a
// cursor move is only coalesced while no button event follows it.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Internally maintains:
// - `discrete`: ordered one-shot inputs (press, release, touch phases)
// - `continuous`: last-known position per pointer (MouseMoved, TouchMoved)
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 32;
        const CONTINUOUS_BASE: usize = 8;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Routing ----------------------------------------------------------
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Unidentified => {}
            e if e.is_continuous() => self.push_continuous(e),
            e => self.push_discrete(e),
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest move of a pointer replaces any earlier one.
    //
    pub fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events are ignored. A touch phase change drops
    // that finger's pending move, since the phase event carries its own
    // position and is replayed before continuous events. A mouse button
    // carries no position, so the cursor move pending before it is pinned
    // into the ordered list where the button happened.
    //
    pub fn push_discrete(&mut self, event: InputEvent) {
        match event {
            InputEvent::TouchStarted { id, .. }
            | InputEvent::TouchEnded { id, .. }
            | InputEvent::TouchCancelled { id, .. } => {
                self.continuous.retain(
                    |e| !matches!(e, InputEvent::TouchMoved { id: moved, .. } if *moved == id),
                );
            }
            InputEvent::MouseButtonDown { .. } | InputEvent::MouseButtonUp { .. } => {
                let cursor = InputEvent::MouseMoved { x: 0.0, y: 0.0 };
                if let Some(moved) = self.continuous.take(&cursor) {
                    self.discrete.push(moved);
                }
            }
            _ => {}
        }

        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns all collected events and clears the buffer, or `None` when
    // nothing was recorded this frame.
    //
    pub fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        let mut events = std::mem::take(&mut self.discrete);
        events.extend(self.continuous.drain());
        Some(events)
    }

    //--- Utilities --------------------------------------------------------
    pub fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
