//=========================================================================
// Pointer State Tracker
//=========================================================================
//
// Low-level pointer state tracking with per-frame transition flags.
//
// Architecture:
//   InputEvent → process_events() → per-pointer state → samples()
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
// A press and release that land in the same frame are split across two
// frames: the press is reported now, the release on the next clear().
// Transition samples carry the position where the transition happened,
// not wherever the pointer drifted to later in the frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, MouseButton, PointerId};

//=== PointerSample =======================================================

/// One frame's view of a single pointer, as consumed by a gesture tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer: PointerId,
    /// Pointer is held down this frame.
    pub pressed: bool,
    /// Pointer went UP → DOWN this frame.
    pub just_pressed: bool,
    pub position: Vec2,
}

impl PointerSample {
    /// Convenience constructor for hosts that feed trackers directly.
    pub fn new(pointer: PointerId, pressed: bool, just_pressed: bool, x: f32, y: f32) -> Self {
        Self {
            pointer,
            pressed,
            just_pressed,
            position: Vec2::new(x, y),
        }
    }
}

//=== PointerState ========================================================

#[derive(Debug, Clone, Copy)]
struct PointerState {
    id: PointerId,
    position: Vec2,
    down: bool,
    pressed_this_frame: bool,
    released_this_frame: bool,
    release_pending: bool,
    press_position: Vec2,
    release_position: Vec2,
}

impl PointerState {
    fn new(id: PointerId, position: Vec2) -> Self {
        Self {
            id,
            position,
            down: false,
            pressed_this_frame: false,
            released_this_frame: false,
            release_pending: false,
            press_position: position,
            release_position: position,
        }
    }

    fn press(&mut self) {
        // Only mark as pressed if it wasn't already down
        if !self.down {
            self.down = true;
            self.pressed_this_frame = true;
            self.press_position = self.position;
        }
    }

    fn release(&mut self) {
        if !self.down || self.release_pending {
            return;
        }
        self.release_position = self.position;
        if self.pressed_this_frame {
            self.release_pending = true;
        } else {
            self.down = false;
            self.released_this_frame = true;
        }
    }

    fn sample_position(&self) -> Vec2 {
        if self.pressed_this_frame {
            self.press_position
        } else if self.released_this_frame {
            self.release_position
        } else {
            self.position
        }
    }
}

//=== PointerStateTracker =================================================

/// Tracks every live pointer (mouse cursor and fingers) across frames.
///
/// Touch pointers are forgotten one frame after their release has been
/// reported. The mouse pointer lives for the whole session.
pub struct PointerStateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    pointers: Vec<PointerState>,

    //--- Frame Outputs (reset each frame via clear()) -------------------
    cancelled_this_frame: Vec<PointerId>,
    samples: Vec<PointerSample>,
}

impl PointerStateTracker {
    /// Creates a tracker that knows only the (released) mouse pointer.
    pub fn new() -> Self {
        Self {
            pointers: vec![PointerState::new(PointerId::Mouse, Vec2::ZERO)],
            cancelled_this_frame: Vec::new(),
            samples: Vec::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific flags and applies deferred releases.
    pub fn clear(&mut self) {
        self.pointers
            .retain(|p| p.down || p.id == PointerId::Mouse);

        for pointer in &mut self.pointers {
            pointer.pressed_this_frame = false;
            pointer.released_this_frame = false;
            if pointer.release_pending {
                pointer.release_pending = false;
                pointer.down = false;
                pointer.released_this_frame = true;
            }
        }

        self.cancelled_this_frame.clear();
        self.samples.clear();
    }

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Builds this frame's samples: one per pointer that is down or was
    /// released during the frame.
    pub fn finalize_frame(&mut self) {
        self.samples.clear();
        self.samples.extend(
            self.pointers
                .iter()
                .filter(|p| p.down || p.released_this_frame)
                .map(|p| PointerSample {
                    pointer: p.id,
                    pressed: p.down,
                    just_pressed: p.pressed_this_frame,
                    position: p.sample_position(),
                }),
        );

        for sample in &self.samples {
            trace!("Pointer sample: {:?}", sample);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseButtonDown { button: MouseButton::Left } => {
                self.pointer_mut(PointerId::Mouse).press();
            }

            InputEvent::MouseButtonUp { button: MouseButton::Left } => {
                self.pointer_mut(PointerId::Mouse).release();
            }

            InputEvent::MouseMoved { x, y } => {
                self.pointer_mut(PointerId::Mouse).position = Vec2::new(x, y);
            }

            InputEvent::TouchStarted { id, x, y } => {
                let pointer = self.pointer_mut(PointerId::Touch(id));
                pointer.position = Vec2::new(x, y);
                pointer.press();
            }

            InputEvent::TouchMoved { id, x, y } => {
                match self.find_mut(PointerId::Touch(id)) {
                    Some(pointer) => pointer.position = Vec2::new(x, y),
                    None => trace!("Ignoring move for unknown touch {}", id),
                }
            }

            InputEvent::TouchEnded { id, x, y } => {
                if let Some(pointer) = self.find_mut(PointerId::Touch(id)) {
                    pointer.position = Vec2::new(x, y);
                    pointer.release();
                }
            }

            InputEvent::TouchCancelled { id, x, y } => {
                if let Some(pointer) = self.find_mut(PointerId::Touch(id)) {
                    pointer.position = Vec2::new(x, y);
                    pointer.release();
                    self.cancelled_this_frame.push(PointerId::Touch(id));
                }
            }

            // Right/middle buttons and unidentified events carry no pointer
            _ => {}
        }
    }

    fn find_mut(&mut self, id: PointerId) -> Option<&mut PointerState> {
        self.pointers.iter_mut().find(|p| p.id == id)
    }

    fn pointer_mut(&mut self, id: PointerId) -> &mut PointerState {
        let index = match self.pointers.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => {
                self.pointers.push(PointerState::new(id, Vec2::ZERO));
                self.pointers.len() - 1
            }
        };
        &mut self.pointers[index]
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns this frame's samples (valid after `finalize_frame()`).
    pub fn samples(&self) -> &[PointerSample] {
        &self.samples
    }

    /// Returns pointers the platform cancelled during this frame.
    pub fn cancelled(&self) -> &[PointerId] {
        &self.cancelled_this_frame
    }

    /// Returns `true` while the pointer is held.
    pub fn is_down(&self, id: PointerId) -> bool {
        self.pointers.iter().any(|p| p.id == id && p.down)
    }

    /// Returns the last known position of a pointer.
    pub fn position(&self, id: PointerId) -> Option<Vec2> {
        self.pointers.iter().find(|p| p.id == id).map(|p| p.position)
    }

    /// Returns the number of pointers currently held.
    pub fn down_count(&self) -> usize {
        self.pointers.iter().filter(|p| p.down).count()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for PointerStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

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

    fn frame(tracker: &mut PointerStateTracker, events: &[InputEvent]) -> Vec<PointerSample> {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
        tracker.samples().to_vec()
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    /// just_pressed is only reported on the transition frame.
    #[test]
    fn mouse_just_pressed_only_on_transition_frame() {
        let mut tracker = PointerStateTracker::new();

        let samples = frame(&mut tracker, &[mouse_move(10.0, 20.0), mouse_down()]);
        assert_eq!(
            samples,
            vec![PointerSample::new(PointerId::Mouse, true, true, 10.0, 20.0)]
        );

        let samples = frame(&mut tracker, &[]);
        assert_eq!(
            samples,
            vec![PointerSample::new(PointerId::Mouse, true, false, 10.0, 20.0)]
        );

        let samples = frame(&mut tracker, &[mouse_up()]);
        assert_eq!(
            samples,
            vec![PointerSample::new(PointerId::Mouse, false, false, 10.0, 20.0)]
        );

        // Idle mouse produces no samples
        assert!(frame(&mut tracker, &[mouse_move(1.0, 1.0)]).is_empty());
    }

    /// Press + release in one frame is split across two frames.
    #[test]
    fn fast_click_defers_release_to_next_frame() {
        let mut tracker = PointerStateTracker::new();

        let samples = frame(&mut tracker, &[mouse_down(), mouse_up()]);
        assert_eq!(samples.len(), 1);
        assert!(samples[0].pressed);
        assert!(samples[0].just_pressed);

        let samples = frame(&mut tracker, &[]);
        assert_eq!(samples.len(), 1);
        assert!(!samples[0].pressed);
        assert!(!samples[0].just_pressed);
        assert!(!tracker.is_down(PointerId::Mouse));
    }

    /// Right button does not drive the mouse pointer.
    #[test]
    fn non_left_buttons_ignored() {
        let mut tracker = PointerStateTracker::new();
        let samples = frame(
            &mut tracker,
            &[InputEvent::MouseButtonDown { button: MouseButton::Right }],
        );
        assert!(samples.is_empty());
        assert!(!tracker.is_down(PointerId::Mouse));
    }

    /// A click that starts and ends mid-frame is reported where it happened.
    #[test]
    fn fast_click_keeps_press_and_release_positions() {
        let mut tracker = PointerStateTracker::new();

        let samples = frame(
            &mut tracker,
            &[
                mouse_move(5.0, 5.0),
                mouse_down(),
                mouse_up(),
                mouse_move(80.0, 80.0),
            ],
        );
        assert_eq!(
            samples,
            vec![PointerSample::new(PointerId::Mouse, true, true, 5.0, 5.0)]
        );

        let samples = frame(&mut tracker, &[]);
        assert_eq!(
            samples,
            vec![PointerSample::new(PointerId::Mouse, false, false, 5.0, 5.0)]
        );
        assert_eq!(tracker.position(PointerId::Mouse), Some(Vec2::new(80.0, 80.0)));
    }

    /// Duplicate down is not reported as a second press.
    #[test]
    fn duplicate_mouse_down_ignored() {
        let mut tracker = PointerStateTracker::new();
        frame(&mut tracker, &[mouse_down()]);

        let samples = frame(&mut tracker, &[mouse_down()]);
        assert!(!samples[0].just_pressed);
        assert!(samples[0].pressed);
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    /// Fingers are tracked independently and retired after release.
    #[test]
    fn touches_tracked_independently_and_retired() {
        let mut tracker = PointerStateTracker::new();

        let samples = frame(
            &mut tracker,
            &[
                InputEvent::TouchStarted { id: 1, x: 0.0, y: 0.0 },
                InputEvent::TouchStarted { id: 2, x: 5.0, y: 5.0 },
            ],
        );
        assert_eq!(samples.len(), 2);
        assert_eq!(tracker.down_count(), 2);

        let samples = frame(
            &mut tracker,
            &[
                InputEvent::TouchMoved { id: 1, x: 3.0, y: 4.0 },
                InputEvent::TouchEnded { id: 2, x: 6.0, y: 6.0 },
            ],
        );
        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0],
            PointerSample::new(PointerId::Touch(1), true, false, 3.0, 4.0)
        );
        assert_eq!(
            samples[1],
            PointerSample::new(PointerId::Touch(2), false, false, 6.0, 6.0)
        );

        frame(&mut tracker, &[]);
        assert_eq!(tracker.position(PointerId::Touch(2)), None);
        assert_eq!(tracker.position(PointerId::Touch(1)), Some(Vec2::new(3.0, 4.0)));
    }

    /// Cancelled touches are released and reported.
    #[test]
    fn touch_cancel_releases_and_reports() {
        let mut tracker = PointerStateTracker::new();
        frame(&mut tracker, &[InputEvent::TouchStarted { id: 9, x: 1.0, y: 1.0 }]);

        let samples = frame(
            &mut tracker,
            &[InputEvent::TouchCancelled { id: 9, x: 2.0, y: 2.0 }],
        );
        assert_eq!(tracker.cancelled(), &[PointerId::Touch(9)]);
        assert!(!samples[0].pressed);

        frame(&mut tracker, &[]);
        assert!(tracker.cancelled().is_empty());
    }

    /// Moves for unknown fingers are ignored.
    #[test]
    fn move_for_unknown_touch_ignored() {
        let mut tracker = PointerStateTracker::new();
        let samples = frame(&mut tracker, &[InputEvent::TouchMoved { id: 3, x: 1.0, y: 1.0 }]);
        assert!(samples.is_empty());
        assert_eq!(tracker.position(PointerId::Touch(3)), None);
    }

    //=====================================================================
    // Edge Cases
    //=====================================================================

    #[test]
    fn unidentified_events_ignored() {
        let mut tracker = PointerStateTracker::new();
        let samples = frame(&mut tracker, &[InputEvent::Unidentified]);
        assert!(samples.is_empty());
        assert_eq!(tracker.position(PointerId::Mouse), Some(Vec2::ZERO));
    }

    #[test]
    fn empty_event_batch_handled() {
        let mut tracker = PointerStateTracker::new();
        assert!(frame(&mut tracker, &[]).is_empty());
        assert_eq!(tracker.down_count(), 0);
    }
}
