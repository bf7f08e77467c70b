//=========================================================================
// Touch Input
//=========================================================================
//
// Fixed pool of gesture trackers shared by every pointer.
//
// Architecture:
//   PointerStateTracker ─samples()──> route() ─slot─> GestureTracker
//                       ─cancelled()─> cancel()
//
// A pointer claims an idle slot on press and gives it back on release.
// Presses arriving while every slot is busy are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::event::PointerId;
use super::state_tracker::{PointerSample, PointerStateTracker};
use crate::core::gesture::{GestureHandler, GestureTracker, DEFAULT_MIN_DELTA_TIME};
use crate::core::hit_test::{HitTest, LayerMask};

//=== TouchInputConfig ====================================================

/// Configuration for a [`TouchInput`] pool.
///
/// # Default Values
///
/// - **Slots**: 5 (mouse plus four fingers)
/// - **Layer mask**: all layers
/// - **Minimum delta time**: [`DEFAULT_MIN_DELTA_TIME`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInputConfig {
    pub slots: usize,
    pub layer_mask: LayerMask,
    pub min_delta_time: f32,
}

impl TouchInputConfig {
    pub fn new() -> Self {
        Self {
            slots: 5,
            layer_mask: LayerMask::ALL,
            min_delta_time: DEFAULT_MIN_DELTA_TIME,
        }
    }

    /// Sets the number of simultaneously tracked pointers.
    ///
    /// # Panics
    ///
    /// Panics if `slots == 0`.
    pub fn with_slots(mut self, slots: usize) -> Self {
        assert!(slots > 0, "Slot count must be positive");
        self.slots = slots;
        self
    }

    pub fn with_layer_mask(mut self, layer_mask: LayerMask) -> Self {
        self.layer_mask = layer_mask;
        self
    }

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
}

impl Default for TouchInputConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=== InputError ==========================================================

/// Errors returned by [`TouchInput`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The pointer does not currently own a slot.
    UnknownPointer(PointerId),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPointer(id) => write!(f, "Pointer {:?} is not being tracked", id),
        }
    }
}

impl std::error::Error for InputError {}

//=== TouchSlot ===========================================================

#[derive(Debug)]
struct TouchSlot {
    pointer: Option<PointerId>,
    tracker: GestureTracker,
}

//=== TouchInput ==========================================================

/// Routes per-pointer samples to a fixed pool of [`GestureTracker`]s.
#[derive(Debug)]
pub struct TouchInput {
    slots: Vec<TouchSlot>,
    layer_mask: LayerMask,
}

impl TouchInput {
    //--- Construction -----------------------------------------------------

    pub fn new(config: TouchInputConfig) -> Self {
        let slots = (0..config.slots)
            .map(|_| TouchSlot {
                pointer: None,
                tracker: GestureTracker::new().with_min_delta_time(config.min_delta_time),
            })
            .collect();

        Self {
            slots,
            layer_mask: config.layer_mask,
        }
    }

    //--- update() ---------------------------------------------------------
    //
    // Applies platform cancellations first so that the cancelled pointer's
    // release sample then finalizes its tracker silently. A pointer that
    // was pressed and cancelled in the same frame owns no slot yet; it is
    // cancelled right after its press has been routed.
    //

    /// Feeds one finalized frame of pointer state to the trackers.
    pub fn update<W, H>(
        &mut self,
        pointers: &PointerStateTracker,
        delta_time: f32,
        world: &W,
        handler: &mut H,
    ) where
        W: HitTest + ?Sized,
        H: GestureHandler + ?Sized,
    {
        let mut unclaimed = Vec::new();
        for &pointer in pointers.cancelled() {
            if self.cancel(pointer, handler).is_err() {
                unclaimed.push(pointer);
            }
        }

        self.update_samples(pointers.samples(), delta_time, world, handler);

        for pointer in unclaimed {
            if let Err(err) = self.cancel(pointer, handler) {
                // The press was dropped for lack of a slot
                trace!("{}", err);
            }
        }
    }

    /// Feeds raw samples, for hosts that track pointer state themselves.
    pub fn update_samples<W, H>(
        &mut self,
        samples: &[PointerSample],
        delta_time: f32,
        world: &W,
        handler: &mut H,
    ) where
        W: HitTest + ?Sized,
        H: GestureHandler + ?Sized,
    {
        for sample in samples {
            self.route(sample, delta_time, world, handler);
        }
    }

    //--- Cancellation -----------------------------------------------------

    /// Cancels the gesture owned by `pointer`.
    pub fn cancel<H: GestureHandler + ?Sized>(
        &mut self,
        pointer: PointerId,
        handler: &mut H,
    ) -> Result<(), InputError> {
        let index = self
            .slot_of(pointer)
            .ok_or(InputError::UnknownPointer(pointer))?;
        self.slots[index].tracker.cancel(handler);
        Ok(())
    }

    /// Cancels every gesture in progress.
    pub fn cancel_all<H: GestureHandler + ?Sized>(&mut self, handler: &mut H) {
        for slot in self.slots.iter_mut().filter(|s| s.pointer.is_some()) {
            slot.tracker.cancel(handler);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn route<W, H>(&mut self, sample: &PointerSample, delta_time: f32, world: &W, handler: &mut H)
    where
        W: HitTest + ?Sized,
        H: GestureHandler + ?Sized,
    {
        let index = match self.slot_of(sample.pointer) {
            Some(index) => index,
            None if sample.just_pressed => match self.claim_slot(sample.pointer) {
                Some(index) => index,
                None => {
                    warn!("No free touch slot for {:?}; press ignored", sample.pointer);
                    return;
                }
            },
            // Pointer whose press was dropped earlier
            None => return,
        };

        let slot = &mut self.slots[index];
        slot.tracker
            .update(sample, self.layer_mask, delta_time, world, handler);

        if !sample.pressed {
            debug!("Slot {} released by {:?}", index, sample.pointer);
            slot.pointer = None;
        }
    }

    fn slot_of(&self, pointer: PointerId) -> Option<usize> {
        self.slots.iter().position(|s| s.pointer == Some(pointer))
    }

    fn claim_slot(&mut self, pointer: PointerId) -> Option<usize> {
        let index = self.slots.iter().position(|s| s.pointer.is_none())?;
        self.slots[index].pointer = Some(pointer);
        debug!("Slot {} claimed by {:?}", index, pointer);
        Some(index)
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns the tracker owned by `pointer`, if any.
    pub fn tracker(&self, pointer: PointerId) -> Option<&GestureTracker> {
        self.slot_of(pointer).map(|index| &self.slots[index].tracker)
    }

    /// Iterates all slot trackers, claimed or not.
    pub fn slots(&self) -> impl Iterator<Item = &GestureTracker> {
        self.slots.iter().map(|s| &s.tracker)
    }

    /// Number of slots currently owned by a pointer.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.pointer.is_some()).count()
    }

    pub fn layer_mask(&self) -> LayerMask {
        self.layer_mask
    }

    /// Changes the hit-test filter. Takes effect on the next update.
    pub fn set_layer_mask(&mut self, layer_mask: LayerMask) {
        self.layer_mask = layer_mask;
    }
}

impl Default for TouchInput {
    fn default() -> Self {
        Self::new(TouchInputConfig::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
