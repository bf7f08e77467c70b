//=========================================================================
// Gesture Tracker
//=========================================================================
//
// Per-pointer state machine turning raw samples into semantic gestures.
//
// Architecture:
//   PointerSample ─┬─> hit_test() ─> candidate
//                  └─> update() ─> GestureEvent ─> GestureHandler
//                                └─> DragLog ─> direction / speed
//
// Session lifecycle:
// ```text
//   Idle ──press on target──> Engaged ──left region──> Overed
//     ↑                          │                        │
//     └──────── release ─────────┴────────────────────────┘
//     ↑
//     └── release ── Canceled <── cancel() (from any state)
// ```
//
// Frame contract: `update()` is called exactly once per tick with the
// host's inter-frame time. Delta times that are not strictly positive are
// clamped to `min_delta_time`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::drag_log::{DragLog, DragSample};
use super::event::{GestureEvent, GestureHandler};
use crate::core::hit_test::{HitTest, LayerMask, TargetId};
use crate::core::input::PointerSample;

//=== Constants ===========================================================

/// Default lower bound applied to frame delta times (seconds).
pub const DEFAULT_MIN_DELTA_TIME: f32 = 1e-4;

//=== GesturePhase ========================================================

/// Coarse view of where a tracker is in its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No target engaged.
    Idle,
    /// Pressed on a target and still inside its region.
    Engaged,
    /// Pressed on a target but the pointer has left its region.
    Overed,
    /// Cancelled; inert until the pointer is released.
    Canceled,
}

//=== GestureTracker ======================================================

/// Gesture state for one pointer slot.
///
/// Constructed once per slot and reused across sessions. All per-session
/// state resets on release.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    //--- Session State ----------------------------------------------------
    target: Option<TargetId>,
    is_overed: bool,
    is_canceled: bool,

    //--- Points -----------------------------------------------------------
    touch_point: Vec2,
    last_point: Vec2,
    start_point: Vec2,
    start_offset: Vec2,

    //--- Drag History -----------------------------------------------------
    drag_log: DragLog,
    drag_direction: Vec2,
    drag_speed: f32,

    //--- Configuration ----------------------------------------------------
    min_delta_time: f32,
}

impl GestureTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self {
            target: None,
            is_overed: false,
            is_canceled: false,
            touch_point: Vec2::ZERO,
            last_point: Vec2::ZERO,
            start_point: Vec2::ZERO,
            start_offset: Vec2::ZERO,
            drag_log: DragLog::new(),
            drag_direction: Vec2::ZERO,
            drag_speed: 0.0,
            min_delta_time: DEFAULT_MIN_DELTA_TIME,
        }
    }

    /// Sets the lower bound applied to frame delta times.
    ///
    /// # Panics
    ///
    /// Panics if `min_delta_time` is not a positive finite number.
    pub fn with_min_delta_time(mut self, min_delta_time: f32) -> Self {
        assert!(
            min_delta_time.is_finite() && min_delta_time > 0.0,
            "Minimum delta time must be positive, got {}",
            min_delta_time
        );
        self.min_delta_time = min_delta_time;
        self
    }

    //--- update() ---------------------------------------------------------
    //
    // Consumes one frame's pointer sample:
    //  1. Canceled sessions only wait for release
    //  2. Hit test the sample point
    //  3. A just-pressed sample starts a new session
    //  4. No target: nothing to report
    //  5. Pressed: touch-down, touch (or touch-over once on leaving), drag
    //  6. Released: touch-up, click if never overed, end session
    //

    /// Advances the tracker by one frame and dispatches gestures.
    pub fn update<W, H>(
        &mut self,
        sample: &PointerSample,
        filter: LayerMask,
        delta_time: f32,
        world: &W,
        handler: &mut H,
    ) where
        W: HitTest + ?Sized,
        H: GestureHandler + ?Sized,
    {
        if self.is_canceled {
            if !sample.pressed {
                self.end_touch();
            }
            return;
        }

        let hit = world.hit_test(sample.position, filter);

        if sample.just_pressed {
            self.begin_touch(sample.position, hit, world);
        }

        // The press missed everything; stay silent until the next press
        let Some(target) = self.target else {
            return;
        };

        self.last_point = self.touch_point;
        self.touch_point = sample.position;

        if sample.pressed {
            if sample.just_pressed {
                self.send(handler, target, GestureEvent::TouchDown);
            }

            if !self.is_overed {
                if hit == Some(target) {
                    self.send(handler, target, GestureEvent::Touch);
                } else {
                    self.is_overed = true;
                    trace!("Pointer left {:?}", target);
                    self.send(handler, target, GestureEvent::TouchOver);
                }
            }

            self.add_drag_log(delta_time);
            self.send(handler, target, GestureEvent::Drag);
        } else {
            self.send(handler, target, GestureEvent::TouchUp);
            if !self.is_overed {
                self.send(handler, target, GestureEvent::Click);
            }
            self.end_touch();
        }
    }

    //--- cancel() ---------------------------------------------------------

    /// Forcibly ends the current gesture.
    ///
    /// Emits `TouchUp` immediately if a target is engaged (never `Click`).
    /// Later updates are ignored until the pointer is released.
    pub fn cancel<H: GestureHandler + ?Sized>(&mut self, handler: &mut H) {
        if self.is_canceled {
            return;
        }
        self.is_canceled = true;
        if let Some(target) = self.target {
            debug!("Gesture on {:?} cancelled", target);
            self.send(handler, target, GestureEvent::TouchUp);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn begin_touch<W: HitTest + ?Sized>(&mut self, point: Vec2, hit: Option<TargetId>, world: &W) {
        self.target = hit;
        self.is_overed = false;
        self.is_canceled = false;

        self.touch_point = point;
        self.last_point = point;
        self.start_point = point;

        self.start_offset = match hit {
            Some(target) => match world.anchor_position(target) {
                Some(anchor) => anchor - point,
                None => {
                    warn!("Target {:?} has no anchor position; using zero offset", target);
                    Vec2::ZERO
                }
            },
            None => Vec2::ZERO,
        };

        self.drag_log.clear();
        self.drag_direction = Vec2::ZERO;
        self.drag_speed = 0.0;

        match hit {
            Some(target) => debug!("Touch session began on {:?} at {:?}", target, point),
            None => trace!("Touch at {:?} hit nothing", point),
        }
    }

    fn end_touch(&mut self) {
        if let Some(target) = self.target {
            debug!("Touch session ended on {:?}", target);
        }
        self.target = None;
        self.is_overed = false;
        self.is_canceled = false;
    }

    fn add_drag_log(&mut self, delta_time: f32) {
        let delta_time = self.sanitize_delta_time(delta_time);
        self.drag_log.push(self.start_offset + self.touch_point, delta_time);
        self.drag_direction = self.drag_log.weighted_direction();
        self.drag_speed = self.drag_log.average_speed();
    }

    fn sanitize_delta_time(&self, delta_time: f32) -> f32 {
        if delta_time.is_finite() && delta_time >= self.min_delta_time {
            return delta_time;
        }
        warn!(
            "Frame delta time {} is below {}; clamping",
            delta_time, self.min_delta_time
        );
        self.min_delta_time
    }

    fn send<H: GestureHandler + ?Sized>(&self, handler: &mut H, target: TargetId, event: GestureEvent) {
        trace!("{} → {:?}", event, target);
        event.dispatch(handler, target, self);
    }

    //=====================================================================
    // Query API - Session
    //=====================================================================

    /// Returns the engaged target, if any.
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    /// Returns `true` once the pointer has left the target's region.
    pub fn is_overed(&self) -> bool {
        self.is_overed
    }

    pub fn is_canceled(&self) -> bool {
        self.is_canceled
    }

    pub fn phase(&self) -> GesturePhase {
        if self.is_canceled {
            GesturePhase::Canceled
        } else if self.target.is_none() {
            GesturePhase::Idle
        } else if self.is_overed {
            GesturePhase::Overed
        } else {
            GesturePhase::Engaged
        }
    }

    //=====================================================================
    // Query API - Points
    //=====================================================================

    /// Current pointer position.
    pub fn touch_point(&self) -> Vec2 {
        self.touch_point
    }

    /// Pointer position on the previous frame.
    pub fn last_point(&self) -> Vec2 {
        self.last_point
    }

    /// Movement since the previous frame.
    pub fn delta_point(&self) -> Vec2 {
        self.touch_point - self.last_point
    }

    /// Pointer position at touch-down.
    pub fn start_point(&self) -> Vec2 {
        self.start_point
    }

    /// Target anchor at touch-down minus the touch-down point.
    ///
    /// Adding this to a pointer position gives where the target's anchor
    /// should be to follow the drag.
    pub fn start_offset(&self) -> Vec2 {
        self.start_offset
    }

    //=====================================================================
    // Query API - Drag
    //=====================================================================

    /// Newest anchored drag point.
    pub fn drag_point(&self) -> Option<Vec2> {
        self.drag_log.newest().map(|s| s.point)
    }

    /// Logged drag samples, newest first.
    pub fn drag_logs(&self) -> impl Iterator<Item = &DragSample> + '_ {
        self.drag_log.iter()
    }

    /// Number of logged drag samples (at most 10).
    pub fn drag_count(&self) -> usize {
        self.drag_log.len()
    }

    pub fn drag_log(&self) -> &DragLog {
        &self.drag_log
    }

    /// Direction of the newest drag sample only.
    pub fn drag_direction_current(&self) -> Vec2 {
        self.drag_log.newest().map_or(Vec2::ZERO, |s| s.direction)
    }

    /// Speed of the newest drag sample only.
    pub fn drag_speed_current(&self) -> f32 {
        self.drag_log.newest().map_or(0.0, |s| s.speed)
    }

    pub fn drag_speed_current_clamped(&self, max: f32) -> f32 {
        self.drag_speed_current().min(max)
    }

    /// Smoothed drag direction over the log. Unit length or zero.
    pub fn drag_direction(&self) -> Vec2 {
        self.drag_direction
    }

    /// Smoothed drag speed over the log.
    pub fn drag_speed(&self) -> f32 {
        self.drag_speed
    }

    pub fn drag_speed_clamped(&self, max: f32) -> f32 {
        self.drag_speed.min(max)
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
