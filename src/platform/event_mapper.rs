//=========================================================================
// Platform Event Mapper
//
// Converts Winit pointer events to engine-level `InputEvent` types.
// Provides a clean separation between OS-specific input and the
// engine's internal event representation.
//
// Responsibilities:
// - Translate mouse buttons, cursor movement and touch phases
// - Ignore Winit events that carry no pointer data
//
//=========================================================================

use winit::event::{ElementState, MouseButton as WinitMouseButton, Touch, TouchPhase, WindowEvent};

use crate::core::input::{InputEvent, MouseButton};

//=== Mouse Conversion ====================================================

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=== Touch Conversion ====================================================

impl From<&Touch> for InputEvent {
    fn from(touch: &Touch) -> Self {
        let id = touch.id;
        let x = touch.location.x as f32;
        let y = touch.location.y as f32;

        match touch.phase {
            TouchPhase::Started => InputEvent::TouchStarted { id, x, y },
            TouchPhase::Moved => InputEvent::TouchMoved { id, x, y },
            TouchPhase::Ended => InputEvent::TouchEnded { id, x, y },
            TouchPhase::Cancelled => InputEvent::TouchCancelled { id, x, y },
        }
    }
}

//=== Full Event Conversion ===============================================
//
// Returns `None` for window events without pointer data (resize, focus,
// keyboard, redraw...).
//
pub(crate) fn map_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        //--- Mouse Button Input ------------------------------------------
        WindowEvent::MouseInput { state, button, .. } => {
            let button = MouseButton::from(*button);
            Some(match state {
                ElementState::Pressed => InputEvent::MouseButtonDown { button },
                ElementState::Released => InputEvent::MouseButtonUp { button },
            })
        }

        //--- Mouse Movement ----------------------------------------------
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),

        //--- Touch -------------------------------------------------------
        WindowEvent::Touch(touch) => Some(InputEvent::from(touch)),

        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
