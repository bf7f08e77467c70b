//=========================================================================
// Gesture System
//=========================================================================
//
// Semantic gesture recognition for a single pointer.
//
// Components:
// - `tracker`: per-pointer session state machine (GestureTracker)
// - `drag_log`: bounded drag history and smoothed direction/speed
// - `event`: GestureEvent kinds and the GestureHandler callback trait
//
//=========================================================================

//=== Module Declarations =================================================

mod drag_log;
mod event;
mod tracker;

//=== Public API ==========================================================

pub use drag_log::{DragLog, DragSample, DRAG_LOG_CAPACITY};
pub use event::{GestureEvent, GestureHandler};
pub use tracker::{GesturePhase, GestureTracker, DEFAULT_MIN_DELTA_TIME};
