//=========================================================================
// Gesture Events
//=========================================================================
//
// Typed delivery of semantic gestures to the engaged target.
//
// Architecture:
//   GestureTracker ──on_gesture(target, event, tracker)──> GestureHandler
//                                                            └─ on_touch_down()
//                                                            └─ on_touch() ...
//
// Every handler method has an empty default, so hosts implement only the
// gestures they care about.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::tracker::GestureTracker;
use crate::core::hit_test::TargetId;

//=== GestureEvent ========================================================

/// Semantic gesture emitted by a [`GestureTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    /// First frame of a press that hit the target.
    TouchDown,

    /// Pointer held and still inside the target's region.
    Touch,

    /// Pointer left the target's region while held. Sent once per session.
    TouchOver,

    /// Pointer released (or the gesture was cancelled).
    TouchUp,

    /// Released without ever leaving the target's region.
    Click,

    /// Pointer held; a drag sample was logged this frame.
    Drag,
}

impl GestureEvent {
    /// Stable kebab-case name, suitable for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::TouchDown => "touch-down",
            Self::Touch => "touch",
            Self::TouchOver => "touch-over",
            Self::TouchUp => "touch-up",
            Self::Click => "click",
            Self::Drag => "drag",
        }
    }

    /// Delivers this gesture for `target` to `handler`.
    pub fn dispatch<H: GestureHandler + ?Sized>(
        self,
        handler: &mut H,
        target: TargetId,
        touch: &GestureTracker,
    ) {
        handler.on_gesture(target, self, touch);
    }
}

impl std::fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//=== GestureHandler ======================================================

/// Receives gestures for engaged targets.
///
/// The tracker passes itself so handlers can read drag state (points,
/// direction, speed). Implement the per-kind methods, or override
/// [`on_gesture`](Self::on_gesture) to receive everything in one place.
pub trait GestureHandler {
    fn on_touch_down(&mut self, _target: TargetId, _touch: &GestureTracker) {}

    fn on_touch(&mut self, _target: TargetId, _touch: &GestureTracker) {}

    fn on_touch_over(&mut self, _target: TargetId, _touch: &GestureTracker) {}

    fn on_touch_up(&mut self, _target: TargetId, _touch: &GestureTracker) {}

    fn on_click(&mut self, _target: TargetId, _touch: &GestureTracker) {}

    fn on_drag(&mut self, _target: TargetId, _touch: &GestureTracker) {}

    /// Entry point used by the tracker. Routes to the per-kind method.
    fn on_gesture(&mut self, target: TargetId, event: GestureEvent, touch: &GestureTracker) {
        match event {
            GestureEvent::TouchDown => self.on_touch_down(target, touch),
            GestureEvent::Touch => self.on_touch(target, touch),
            GestureEvent::TouchOver => self.on_touch_over(target, touch),
            GestureEvent::TouchUp => self.on_touch_up(target, touch),
            GestureEvent::Click => self.on_click(target, touch),
            GestureEvent::Drag => self.on_drag(target, touch),
        }
    }
}

//--- Trait Implementations -----------------------------------------------

/// Discards every gesture.
impl GestureHandler for () {}

/// Records `(target, event)` pairs in emission order.
impl GestureHandler for Vec<(TargetId, GestureEvent)> {
    fn on_gesture(&mut self, target: TargetId, event: GestureEvent, _touch: &GestureTracker) {
        self.push((target, event));
    }
}

impl<H: GestureHandler + ?Sized> GestureHandler for &mut H {
    fn on_gesture(&mut self, target: TargetId, event: GestureEvent, touch: &GestureTracker) {
        (**self).on_gesture(target, event, touch);
    }
}

impl<H: GestureHandler + ?Sized> GestureHandler for Box<H> {
    fn on_gesture(&mut self, target: TargetId, event: GestureEvent, touch: &GestureTracker) {
        (**self).on_gesture(target, event, touch);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
