//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types.
//
// Defines the contract for communication between platform and core threads.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform thread to the logic thread.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Pointer events gathered during one platform frame, in order.
    Inputs(Vec<InputEvent>),

    /// Window close requested; the logic thread finishes its frame and exits.
    WindowClosed,
}
