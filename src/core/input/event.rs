//=========================================================================
// Pointer Event Types
//
// Defines the internal representation of low-level pointer events.
//
// This module abstracts away platform-specific input (e.g. Winit, SDL)
// into a unified, engine-friendly format used by the input subsystem.
//
// Responsibilities:
// - Represent mouse and touch inputs in a stable, portable way
// - Identify pointers (mouse cursor or individual fingers)
// - Provide equality and hashing semantics for coalescing movement
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    PointerStateTracker (pressed / just pressed per pointer)
//         ↓
//    TouchInput → GestureTracker (semantic gestures)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Only [`MouseButton::Left`] drives the mouse pointer's gestures; the
/// other buttons are tracked so platform mapping stays lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== PointerId ===========================================================

/// Identifies one logical pointer.
///
/// The mouse cursor is a single long-lived pointer. Every finger gets its
/// own id from the platform for the duration of its contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

//=== InputEvent ==========================================================

/// Low-level pointer event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Events are compared by type + identifying payload (button or touch id).
/// Coordinates are ignored for `MouseMoved` and `TouchMoved`, so a set of
/// continuous events keeps only the latest position per pointer.
///
/// ```text
/// MouseButtonDown{Left} == MouseButtonDown{Left}   ✓
/// MouseMoved{1,2}       == MouseMoved{3,4}         ✓ (coalesced)
/// TouchMoved{id:1,..}   == TouchMoved{id:2,..}     ✗ (different finger)
/// TouchStarted{id:1,..} == TouchStarted{id:1,..}   ✓ only if same point
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Mouse button pressed.
    MouseButtonDown { button: MouseButton },

    /// Mouse button released.
    MouseButtonUp { button: MouseButton },

    /// Mouse cursor moved to a new position (screen space, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// A finger touched the surface.
    TouchStarted { id: u64, x: f32, y: f32 },

    /// A finger moved while in contact.
    TouchMoved { id: u64, x: f32, y: f32 },

    /// A finger was lifted.
    TouchEnded { id: u64, x: f32, y: f32 },

    /// The platform aborted a touch (e.g. a system gesture took over).
    TouchCancelled { id: u64, x: f32, y: f32 },

    /// Unrecognized or unsupported event. Ignored by the input system.
    Unidentified,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// Returns the pointer this event belongs to, if any.
    ///
    /// Non-left mouse buttons carry no pointer.
    pub fn pointer(&self) -> Option<PointerId> {
        match *self {
            Self::MouseButtonDown { button: MouseButton::Left }
            | Self::MouseButtonUp { button: MouseButton::Left }
            | Self::MouseMoved { .. } => Some(PointerId::Mouse),
            Self::TouchStarted { id, .. }
            | Self::TouchMoved { id, .. }
            | Self::TouchEnded { id, .. }
            | Self::TouchCancelled { id, .. } => Some(PointerId::Touch(id)),
            _ => None,
        }
    }

    /// Returns `true` for position-only events that may be coalesced.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. } | Self::TouchMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (MouseButtonDown { button: a }, MouseButtonDown { button: b }) => a == b,
            (MouseButtonUp { button: a }, MouseButtonUp { button: b }) => a == b,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (TouchMoved { id: a, .. }, TouchMoved { id: b, .. }) => a == b,
            (
                TouchStarted { id: a, x: ax, y: ay },
                TouchStarted { id: b, x: bx, y: by },
            )
            | (
                TouchEnded { id: a, x: ax, y: ay },
                TouchEnded { id: b, x: bx, y: by },
            )
            | (
                TouchCancelled { id: a, x: ax, y: ay },
                TouchCancelled { id: b, x: bx, y: by },
            ) => a == b && ax.to_bits() == bx.to_bits() && ay.to_bits() == by.to_bits(),
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + button/touch id. Coordinates only contribute for
/// discrete touch events, consistent with equality.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::MouseButtonDown { button } | Self::MouseButtonUp { button } => {
                button.hash(state);
            }
            Self::TouchMoved { id, .. } => id.hash(state),
            Self::TouchStarted { id, x, y }
            | Self::TouchEnded { id, x, y }
            | Self::TouchCancelled { id, x, y } => {
                id.hash(state);
                x.to_bits().hash(state);
                y.to_bits().hash(state);
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn mouse_moves_are_equal_regardless_of_position() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 30.0, y: 40.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn touch_moves_coalesce_per_finger() {
        let mut set = HashSet::new();
        set.replace(InputEvent::TouchMoved { id: 1, x: 0.0, y: 0.0 });
        set.replace(InputEvent::TouchMoved { id: 1, x: 5.0, y: 5.0 });
        set.replace(InputEvent::TouchMoved { id: 2, x: 9.0, y: 9.0 });

        assert_eq!(set.len(), 2);
        let finger_one = set
            .iter()
            .find(|e| e.pointer() == Some(PointerId::Touch(1)))
            .copied();
        match finger_one {
            Some(InputEvent::TouchMoved { x, y, .. }) => assert_eq!((x, y), (5.0, 5.0)),
            other => panic!("Expected TouchMoved for finger 1, found {:?}", other),
        }
    }

    #[test]
    fn button_events_differ_by_button_and_direction() {
        let left_down = InputEvent::MouseButtonDown { button: MouseButton::Left };
        let right_down = InputEvent::MouseButtonDown { button: MouseButton::Right };
        let left_up = InputEvent::MouseButtonUp { button: MouseButton::Left };

        assert_ne!(left_down, right_down);
        assert_ne!(left_down, left_up);
    }

    #[test]
    fn pointer_identifies_source() {
        assert_eq!(
            InputEvent::MouseButtonDown { button: MouseButton::Left }.pointer(),
            Some(PointerId::Mouse)
        );
        assert_eq!(
            InputEvent::MouseButtonDown { button: MouseButton::Right }.pointer(),
            None
        );
        assert_eq!(
            InputEvent::TouchEnded { id: 7, x: 0.0, y: 0.0 }.pointer(),
            Some(PointerId::Touch(7))
        );
        assert_eq!(InputEvent::Unidentified.pointer(), None);
    }

    #[test]
    fn only_moves_are_continuous() {
        assert!(InputEvent::MouseMoved { x: 0.0, y: 0.0 }.is_continuous());
        assert!(InputEvent::TouchMoved { id: 0, x: 0.0, y: 0.0 }.is_continuous());
        assert!(!InputEvent::TouchStarted { id: 0, x: 0.0, y: 0.0 }.is_continuous());
        assert!(!InputEvent::MouseButtonUp { button: MouseButton::Left }.is_continuous());
    }
}
