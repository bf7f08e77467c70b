//=========================================================================
// Gesture Engine
//
// Main entry point and coordinator for the gesture runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──start()──>  EngineHandle
//         │                                                 │
//         ├─ with_tps()                                     ├─ collector()
//         ├─ with_channel_capacity()                        ├─ sender()
//         ├─ with_slots()                                   └─ shutdown()
//         ├─ with_layer_mask()                                 joins logic thread,
//         └─ with_min_delta_time()                             returns world + handler
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::thread::JoinHandle;

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::gesture::GestureHandler;
use crate::core::hit_test::{HitTest, LayerMask};
use crate::core::input::TouchInputConfig;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::GestureOrchestrator;
use crate::platform::InputCollector;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 batches
/// - **Slots**: 5 simultaneously tracked pointers
/// - **Layer mask**: all layers
///
/// # Examples
///
/// ```no_run
/// use touch_gesture2d::EngineBuilder;
/// use touch_gesture2d::core::gesture::GestureEvent;
/// use touch_gesture2d::core::hit_test::{ColliderWorld, TargetId};
///
/// let handle = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_slots(10)
///     .build()
///     .start(ColliderWorld::new(), Vec::<(TargetId, GestureEvent)>::new());
///
/// let mut collector = handle.collector();
/// // forward winit window events, then once per frame:
/// collector.flush();
///
/// let (_world, events) = handle.shutdown().expect("logic thread panicked");
/// println!("{} gesture events", events.len());
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    touch: TouchInputConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            touch: TouchInputConfig::default(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Every tick processes the input received since the previous one and
    /// updates all gesture trackers with the measured frame time.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Counted in frame batches, not individual events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets how many pointers may hold a gesture at once.
    ///
    /// # Panics
    ///
    /// Panics if `slots == 0`.
    pub fn with_slots(mut self, slots: usize) -> Self {
        self.touch = self.touch.with_slots(slots);
        self
    }

    /// Restricts hit testing to the given layers.
    pub fn with_layer_mask(mut self, layer_mask: LayerMask) -> Self {
        self.touch = self.touch.with_layer_mask(layer_mask);
        self
    }

    /// Sets the floor applied to non-positive frame times.
    ///
    /// # Panics
    ///
    /// Panics if `min_delta_time` is not a positive finite number.
    pub fn with_min_delta_time(mut self, min_delta_time: f32) -> Self {
        self.touch = self.touch.with_min_delta_time(min_delta_time);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, slots: {})",
            self.tps, self.channel_capacity, self.touch.slots
        );

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            touch: self.touch,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Configured gesture runtime, ready to start.
///
/// # Architecture
///
/// ```text
/// Host (event loop thread)
///   ├─► InputCollector ── PlatformEvent ──┐
///   │                                     ▼
///   └─► EngineHandle           GestureOrchestrator (Logic Thread @ TPS)
///                                └─► InputSystem → GestureTracker → GestureHandler
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    touch: TouchInputConfig,
}

impl Engine {
    /// Spawns the logic thread and moves `world` and `handler` into it.
    ///
    /// Both are handed back by [`EngineHandle::shutdown`].
    pub fn start<W, H>(self, world: W, handler: H) -> EngineHandle<W, H>
    where
        W: HitTest + Send + 'static,
        H: GestureHandler + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let orchestrator = GestureOrchestrator::new(self.touch, world, handler);
        let core_handle = orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        EngineHandle {
            sender: tx,
            core_handle,
        }
    }
}

//=== EngineHandle ========================================================

/// Handle to a running engine.
pub struct EngineHandle<W, H> {
    sender: Sender<PlatformEvent>,
    core_handle: JoinHandle<(W, H)>,
}

impl<W, H> EngineHandle<W, H> {
    /// Raw channel into the logic thread.
    pub fn sender(&self) -> Sender<PlatformEvent> {
        self.sender.clone()
    }

    /// Creates a fresh [`InputCollector`] bound to this engine.
    pub fn collector(&self) -> InputCollector {
        InputCollector::new(self.sender.clone())
    }

    /// Returns `false` once the logic thread has exited.
    pub fn is_running(&self) -> bool {
        !self.core_handle.is_finished()
    }

    /// Stops the logic thread and returns the world and handler.
    ///
    /// The last received frame is processed and every live gesture is
    /// cancelled before the thread exits.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ThreadPanicked`] if the logic thread panicked.
    pub fn shutdown(self) -> Result<(W, H), EngineError> {
        info!("Shutting down engine");

        // A full channel blocks here until the logic thread drains a frame.
        let _ = self.sender.send(PlatformEvent::WindowClosed);

        match self.core_handle.join() {
            Ok(parts) => {
                info!("Core thread terminated cleanly");
                Ok(parts)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Core thread panicked: {}", message);
                Err(EngineError::ThreadPanicked(message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

//=== EngineError =========================================================

/// Runtime errors surfaced by [`EngineHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The logic thread panicked; carries the panic message.
    ThreadPanicked(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ThreadPanicked(msg) => write!(f, "Core thread panicked: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

//=========================================================================
// Unit Tests
//=========================================================================
