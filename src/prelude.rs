//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use touch_gesture2d::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder, EngineError, EngineHandle};
pub use crate::core::platform_bridge::PlatformEvent;
pub use crate::platform::InputCollector;

// Gestures
pub use crate::core::gesture::{GestureEvent, GestureHandler, GesturePhase, GestureTracker};

// Hit testing
pub use crate::core::hit_test::{Collider, ColliderWorld, HitTest, LayerMask, Shape, TargetId};

// Input
pub use crate::core::input::{InputEvent, MouseButton, PointerId, TouchInput, TouchInputConfig};
