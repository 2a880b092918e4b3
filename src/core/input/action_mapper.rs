//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps physical keys to game actions.
//
// Architecture:
//   KeyCode → HashMap → Action
//   StateTracker + bindings → ActionState (held / pressed)
//
// Several keys may drive the same action (arrows and WASD both move).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, ActionState},
    event::KeyCode,
    state_tracker::StateTracker,
};

//=== ActionMapper ========================================================

/// Key → action lookup table.
pub(crate) struct ActionMapper<A: Action> {
    key_bindings: HashMap<KeyCode, A>,
}

impl<A: Action> ActionMapper<A> {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to an action, replacing any previous binding of that key.
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: A) -> Option<A> {
        self.key_bindings.insert(key, action)
    }

    /// Returns the action bound to `key`, if any.
    pub(crate) fn map_key(&self, key: KeyCode) -> Option<A> {
        self.key_bindings.get(&key).copied()
    }

    //--- Resolution -------------------------------------------------------

    /// Rebuilds `state` from the tracker's held and pressed keys.
    pub(crate) fn resolve(&self, tracker: &StateTracker, state: &mut ActionState<A>) {
        state.clear();

        for (&key, &action) in &self.key_bindings {
            if tracker.is_key_down(key) {
                state.set_down(action);
            }
            if tracker.is_key_pressed(key) {
                state.set_pressed(action);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
