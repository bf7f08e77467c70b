//=========================================================================
// Input System
//
// High-level interface for pointer input handling within the engine.
// Wraps the per-frame `PointerStateTracker` and the `TouchInput` slot
// pool, turning batches of raw events into gestures.
//
// Responsibilities:
// - Aggregate and process batches of raw pointer events
// - Update persistent pointer state each frame
// - Drive one gesture tracker per active pointer
// - Expose read-only queries for gameplay and UI layers
//
// Notes:
// This system is owned and updated by the GestureOrchestrator on the
// logic thread. It never touches the platform directly.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod state_tracker;
mod touch_input;

//=== Public API ==========================================================

pub use event::{InputEvent, MouseButton, PointerId};
pub use state_tracker::{PointerSample, PointerStateTracker};
pub use touch_input::{InputError, TouchInput, TouchInputConfig};

//=== Internal Imports ====================================================

use crate::core::gesture::{GestureHandler, GestureTracker};
use crate::core::hit_test::HitTest;

//=== External Crates =====================================================

use log::trace;

//=== InputSystem =========================================================
//
// Owns the engine's pointer state and gesture slots.
//
pub struct InputSystem {
    pointers: PointerStateTracker,
    touch_input: TouchInput,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------
    pub fn new(config: TouchInputConfig) -> Self {
        Self {
            pointers: PointerStateTracker::new(),
            touch_input: TouchInput::new(config),
        }
    }

    //--- process_frame() --------------------------------------------------
    //
    // Consumes all input batches received during the current frame, then
    // runs every claimed gesture tracker once with the frame's delta time.
    //
    pub fn process_frame<W, H>(
        &mut self,
        input_batches: &mut Vec<Vec<InputEvent>>,
        delta_time: f32,
        world: &W,
        handler: &mut H,
    ) where
        W: HitTest + ?Sized,
        H: GestureHandler + ?Sized,
    {
        self.pointers.clear();
        for batch in input_batches.drain(..) {
            self.pointers.process_events(&batch);
        }
        self.pointers.finalize_frame();

        if !self.pointers.samples().is_empty() {
            trace!("Processing {} pointer samples", self.pointers.samples().len());
        }

        self.touch_input
            .update(&self.pointers, delta_time, world, handler);
    }

    /// Cancels every gesture in progress (e.g. on focus loss or shutdown).
    pub fn cancel_all<H: GestureHandler + ?Sized>(&mut self, handler: &mut H) {
        self.touch_input.cancel_all(handler);
    }

    //--- Query Methods ----------------------------------------------------

    /// Returns `true` while the pointer is held.
    pub fn is_pointer_down(&self, pointer: PointerId) -> bool {
        self.pointers.is_down(pointer)
    }

    /// Returns the last known pointer position as `(x, y)`.
    pub fn pointer_position(&self, pointer: PointerId) -> Option<(f32, f32)> {
        self.pointers.position(pointer).map(|p| (p.x, p.y))
    }

    /// Returns the gesture tracker currently owned by `pointer`.
    pub fn gesture(&self, pointer: PointerId) -> Option<&GestureTracker> {
        self.touch_input.tracker(pointer)
    }

    pub fn touch_input(&self) -> &TouchInput {
        &self.touch_input
    }

    pub fn touch_input_mut(&mut self) -> &mut TouchInput {
        &mut self.touch_input
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new(TouchInputConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gesture::GestureEvent;
    use crate::core::hit_test::{Collider, ColliderWorld, TargetId};
    use glam::Vec2;

    //--- Test Helpers -----------------------------------------------------
    fn mouse_down() -> InputEvent {
        InputEvent::MouseButtonDown { button: MouseButton::Left }
    }
    fn mouse_up() -> InputEvent {
        InputEvent::MouseButtonUp { button: MouseButton::Left }
    }
    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    fn world() -> ColliderWorld {
        let mut world = ColliderWorld::new();
        world
            .insert(Collider::circle(TargetId(9), Vec2::new(100.0, 100.0), 20.0))
            .unwrap();
        world
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn batches_from_one_frame_are_merged() {
        let mut system = InputSystem::default();
        let world = world();
        let mut recorded: Vec<(TargetId, GestureEvent)> = Vec::new();

        let mut batches = vec![vec![mouse_move(100.0, 100.0)], vec![mouse_down()]];
        system.process_frame(&mut batches, 0.016, &world, &mut recorded);

        assert!(batches.is_empty());
        assert!(system.is_pointer_down(PointerId::Mouse));
        assert_eq!(system.pointer_position(PointerId::Mouse), Some((100.0, 100.0)));
        assert_eq!(
            recorded,
            vec![
                (TargetId(9), GestureEvent::TouchDown),
                (TargetId(9), GestureEvent::Touch),
                (TargetId(9), GestureEvent::Drag),
            ]
        );
        assert_eq!(
            system.gesture(PointerId::Mouse).and_then(|g| g.target()),
            Some(TargetId(9))
        );
    }

    #[test]
    fn mouse_drag_moves_pointer_and_releases() {
        let mut system = InputSystem::default();
        let world = world();
        let mut recorded: Vec<(TargetId, GestureEvent)> = Vec::new();

        system.process_frame(
            &mut vec![vec![mouse_move(95.0, 100.0), mouse_down()]],
            0.016,
            &world,
            &mut recorded,
        );
        system.process_frame(&mut vec![vec![mouse_move(105.0, 100.0)]], 0.016, &world, &mut recorded);

        let drag = system.gesture(PointerId::Mouse).map(|g| g.drag_direction());
        assert_eq!(drag, Some(Vec2::new(1.0, 0.0)));

        recorded.clear();
        system.process_frame(&mut vec![vec![mouse_up()]], 0.016, &world, &mut recorded);
        assert_eq!(
            recorded,
            vec![
                (TargetId(9), GestureEvent::TouchUp),
                (TargetId(9), GestureEvent::Click),
            ]
        );
        assert!(!system.is_pointer_down(PointerId::Mouse));
        assert!(system.gesture(PointerId::Mouse).is_none());
    }

    #[test]
    fn cancel_all_reaches_touch_input() {
        let mut system = InputSystem::default();
        let world = world();
        let mut recorded: Vec<(TargetId, GestureEvent)> = Vec::new();

        system.process_frame(
            &mut vec![vec![mouse_move(100.0, 100.0), mouse_down()]],
            0.016,
            &world,
            &mut recorded,
        );
        recorded.clear();

        system.cancel_all(&mut recorded);
        assert_eq!(recorded, vec![(TargetId(9), GestureEvent::TouchUp)]);
        assert_eq!(system.touch_input().active_count(), 1);
    }
}
