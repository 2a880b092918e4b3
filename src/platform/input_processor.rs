//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard events into engine InputEvents.
//
// Architecture:
//   winit KeyEvent → InputProcessor → InputEvent (engine type) → buffer
//
// Keys the game has no use for (function keys, numpad, media keys) map
// to `KeyCode::Unidentified` and are filtered out here.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== Conversion ==========================================================

/// Converts a winit key event to an engine event (`None` for unmapped keys).
pub(crate) fn process_key_event(key_event: &KeyEvent) -> Option<InputEvent> {
    let PhysicalKey::Code(code) = key_event.physical_key else {
        return None;
    };

    key_transition(map_key_code(code), key_event.state)
}

/// Builds the engine event for a key/state pair, dropping unmapped keys.
fn key_transition(key: KeyCode, state: ElementState) -> Option<InputEvent> {
    if key == KeyCode::Unidentified {
        return None;
    }

    Some(match state {
        ElementState::Pressed => InputEvent::KeyDown(key),
        ElementState::Released => InputEvent::KeyUp(key),
    })
}

/// Maps winit physical key codes to engine key codes.
fn map_key_code(code: WinitKeyCode) -> KeyCode {
    match code {
        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,

        WinitKeyCode::KeyA => KeyCode::KeyA,
        WinitKeyCode::KeyD => KeyCode::KeyD,
        WinitKeyCode::KeyR => KeyCode::KeyR,
        WinitKeyCode::KeyS => KeyCode::KeyS,
        WinitKeyCode::KeyW => KeyCode::KeyW,

        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::Escape => KeyCode::Escape,

        _ => KeyCode::Unidentified,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
