//=========================================================================
// Input Event Types
//
// Portable representation of the keyboard input the game consumes.
//
// The platform layer (winit) converts OS key events into these types
// before they cross the channel into the logic thread. Only keys are
// modelled: the levels are driven by four directions and a restart key.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys + per-frame edges)
//         ↓
//    ActionMapper → ActionState (game actions)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Keys outside this set arrive as [`KeyCode::Unidentified`] and are
/// dropped by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Letter Keys ------------------------------------------------------
    KeyA,
    KeyD,
    KeyR,
    KeyS,
    KeyW,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,

    /// Fallback for keys the input layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level key transition reported by the platform layer.
///
/// Repeated `KeyDown` events for a key that is already held (OS key
/// repeat) are harmless: the state tracker only records real
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),
}

impl InputEvent {
    /// Returns the key this event refers to.
    pub fn key(&self) -> KeyCode {
        match *self {
            Self::KeyDown(key) | Self::KeyUp(key) => key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_accessor_returns_payload() {
        assert_eq!(InputEvent::KeyDown(KeyCode::KeyR).key(), KeyCode::KeyR);
        assert_eq!(InputEvent::KeyUp(KeyCode::ArrowLeft).key(), KeyCode::ArrowLeft);
    }

    #[test]
    fn down_and_up_are_distinct() {
        assert_ne!(
            InputEvent::KeyDown(KeyCode::KeyR),
            InputEvent::KeyUp(KeyCode::KeyR),
            "KeyDown and KeyUp for the same key must not be equal"
        );
    }

    #[test]
    fn events_deduplicate_in_sets() {
        let mut set = HashSet::new();
        set.insert(InputEvent::KeyDown(KeyCode::ArrowUp));
        set.insert(InputEvent::KeyDown(KeyCode::ArrowUp));
        set.insert(InputEvent::KeyUp(KeyCode::ArrowUp));
        assert_eq!(set.len(), 2);
    }
}
