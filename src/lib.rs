//=========================================================================
// Touch Gesture 2D: Library Root
//
// This crate turns raw pointer input (mouse and touch) into semantic
// gestures on hit-tested 2D targets: touch-down, touch, touch-over,
// touch-up, click and drag, with smoothed drag direction and speed.
//
// Responsibilities:
// - Expose the runtime facade (`EngineBuilder`, `Engine`, `EngineHandle`)
// - Expose the frame-driven building blocks in `core` for hosts that
//   run their own loop
// - Keep Winit integration details (`platform`) behind `InputCollector`
//
// Typical usage:
// ```no_run
// use touch_gesture2d::prelude::*;
//
// let handle = EngineBuilder::new()
//     .build()
//     .start(ColliderWorld::new(), ());
// let mut input = handle.collector();
// // input.window_event(&event) for each winit event, input.flush() per frame
// input.flush();
// let _ = handle.shutdown();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the gesture pipeline: pointer tracking, hit testing,
// gesture trackers and the logic-thread orchestrator.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` maps Winit window events and batches them per frame.
// `engine` defines the runtime entry point and thread lifecycle.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError, EngineHandle};
pub use platform::InputCollector;
