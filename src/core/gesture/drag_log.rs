//=========================================================================
// Drag Log
//=========================================================================
//
// Fixed-capacity history of anchored drag positions, indexed by age.
//
// Architecture:
//   push(point, dt) → ring buffer [newest .. oldest] → aggregates
//
// Age 0 is the newest sample. When full, pushing evicts the oldest.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Constants ===========================================================

/// Number of drag samples kept per gesture session.
pub const DRAG_LOG_CAPACITY: usize = 10;

//=== DragSample ==========================================================

/// One logged drag position with its instantaneous motion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSample {
    /// Pointer position re-anchored to the target's frame.
    pub point: Vec2,
    /// Time since the previous frame.
    pub delta_time: f32,
    /// Unit direction from the previous sample, or zero.
    pub direction: Vec2,
    /// Distance from the previous sample divided by `delta_time`.
    pub speed: f32,
}

//=== DragLog =============================================================

/// Ring buffer of the most recent [`DRAG_LOG_CAPACITY`] drag samples.
#[derive(Debug, Clone)]
pub struct DragLog {
    entries: [DragSample; DRAG_LOG_CAPACITY],
    /// Slot holding the newest sample.
    head: usize,
    len: usize,
}

impl DragLog {
    pub fn new() -> Self {
        Self {
            entries: [DragSample::default(); DRAG_LOG_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Logs a new newest sample and returns it.
    ///
    /// Direction and speed are measured against the previous newest
    /// sample; the first sample of a session has neither.
    /// `delta_time` must be positive.
    pub fn push(&mut self, point: Vec2, delta_time: f32) -> DragSample {
        let mut sample = DragSample {
            point,
            delta_time,
            ..DragSample::default()
        };

        if let Some(previous) = self.newest() {
            let delta = point - previous.point;
            sample.speed = delta.length() / delta_time;
            sample.direction = delta.normalize_or_zero();
        }

        self.head = (self.head + DRAG_LOG_CAPACITY - 1) % DRAG_LOG_CAPACITY;
        self.entries[self.head] = sample;
        self.len = (self.len + 1).min(DRAG_LOG_CAPACITY);
        sample
    }

    /// Forgets every sample.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    //--- Query API --------------------------------------------------------

    /// Returns the sample logged `age` pushes ago (0 = newest).
    pub fn get(&self, age: usize) -> Option<&DragSample> {
        if age >= self.len {
            return None;
        }
        Some(&self.entries[(self.head + age) % DRAG_LOG_CAPACITY])
    }

    pub fn newest(&self) -> Option<&DragSample> {
        self.get(0)
    }

    pub fn oldest(&self) -> Option<&DragSample> {
        self.len.checked_sub(1).and_then(|age| self.get(age))
    }

    /// Iterates newest → oldest.
    pub fn iter(&self) -> impl Iterator<Item = &DragSample> + '_ {
        (0..self.len).map(move |age| &self.entries[(self.head + age) % DRAG_LOG_CAPACITY])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == DRAG_LOG_CAPACITY
    }

    pub fn capacity(&self) -> usize {
        DRAG_LOG_CAPACITY
    }

    //--- Aggregates -------------------------------------------------------
    //
    // Both aggregates skip the oldest sample: it is either the session's
    // first sample (no motion yet) or one whose reference point has been
    // evicted.
    //

    /// Normalized sum of `direction * speed * delta_time`; zero when fewer
    /// than two samples are logged or the motion cancels out.
    pub fn weighted_direction(&self) -> Vec2 {
        self.iter()
            .take(self.len.saturating_sub(1))
            .fold(Vec2::ZERO, |sum, s| sum + s.direction * s.speed * s.delta_time)
            .normalize_or_zero()
    }

    /// Mean speed; zero when fewer than two samples are logged.
    pub fn average_speed(&self) -> f32 {
        let count = self.len.saturating_sub(1);
        if count == 0 {
            return 0.0;
        }
        let total: f32 = self.iter().take(count).map(|s| s.speed).sum();
        total / count as f32
    }
}

impl Default for DragLog {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
