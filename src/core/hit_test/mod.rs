//=========================================================================
// Hit Testing
//=========================================================================
//
// Spatial query contract between gesture tracking and the host world.
//
// Architecture:
//   GestureTracker ──hit_test(point, filter)──> HitTest ──> Option<TargetId>
//                  ──anchor_position(target)──>          ──> Option<Vec2>
//
// The tracker never owns targets. It holds a `TargetId` handle for the
// duration of a session and asks the host for positions when needed.
//
//=========================================================================

//=== Module Declarations =================================================

mod collider_world;

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Public API ==========================================================

pub use collider_world::{Collider, ColliderWorld, Shape};

//=== TargetId ============================================================

/// Opaque handle to a hit-testable object in the host's object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

//=== LayerMask ===========================================================

/// 32-bit collision filter. Bit `n` selects layer `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// No layer; every hit test misses.
    pub const NONE: Self = Self(0);

    /// Number of addressable layers.
    pub const LAYER_COUNT: u8 = 32;

    /// Mask selecting a single layer.
    ///
    /// # Panics
    ///
    /// Panics if `layer >= 32`.
    pub fn layer(layer: u8) -> Self {
        assert!(
            layer < Self::LAYER_COUNT,
            "Layer index must be below {}, got {}",
            Self::LAYER_COUNT,
            layer
        );
        Self(1 << layer)
    }

    /// Returns this mask with `layer` added.
    pub fn with(self, layer: u8) -> Self {
        Self(self.0 | Self::layer(layer).0)
    }

    /// Returns `true` if `layer` is selected.
    pub fn contains(self, layer: u8) -> bool {
        layer < Self::LAYER_COUNT && self.0 & (1 << layer) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

//=== HitTest =============================================================

/// Spatial query capability supplied by the host.
///
/// Implementations must be deterministic for a given point and filter
/// within one frame.
pub trait HitTest {
    /// Returns the foremost (lowest depth) target containing `point`,
    /// restricted to layers in `filter`.
    fn hit_test(&self, point: Vec2, filter: LayerMask) -> Option<TargetId>;

    /// Returns the anchor position of `target`, or `None` if it no longer
    /// exists.
    fn anchor_position(&self, target: TargetId) -> Option<Vec2>;
}

impl<T: HitTest + ?Sized> HitTest for &T {
    fn hit_test(&self, point: Vec2, filter: LayerMask) -> Option<TargetId> {
        (**self).hit_test(point, filter)
    }

    fn anchor_position(&self, target: TargetId) -> Option<Vec2> {
        (**self).anchor_position(target)
    }
}

//=== HitTestError ========================================================

/// Errors raised while editing a [`ColliderWorld`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTestError {
    /// A collider with this id is already registered.
    DuplicateTarget(TargetId),

    /// Layer index outside `0..32`.
    InvalidLayer(u8),
}

impl std::fmt::Display for HitTestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTarget(id) => write!(f, "Target {:?} is already registered", id),
            Self::InvalidLayer(layer) => write!(
                f,
                "Layer index must be below {}, got {}",
                LayerMask::LAYER_COUNT,
                layer
            ),
        }
    }
}

impl std::error::Error for HitTestError {}

//=========================================================================
// Unit Tests
//=========================================================================
