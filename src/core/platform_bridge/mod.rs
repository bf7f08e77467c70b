//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit/SDL/etc.) with core systems.
//
// This module defines the contract between platform implementations and
// core logic, so a platform backend can be swapped without changing the
// gesture pipeline.
//
// Components:
// - `interface`: Event types crossing the thread boundary (the contract)
// - `event_collector`: Core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::PlatformEvent;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
