//=========================================================================
// Action Trait & Action State
//=========================================================================
//
// Game-defined actions and the per-tick snapshot of which ones are active.
//
// Actions: Opaque identifiers routed by the engine, interpreted by the game.
// ActionState: Held (continuous) and pressed (edge) sets, rebuilt each tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// Actions represent high-level commands (MoveLeft, Restart) mapped from
/// raw keys. The engine routes actions without interpreting them.
///
/// # Example
///
/// ```
/// use star_gate::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuAction { Confirm, Back }
///
/// impl Action for MenuAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== ActionState =========================================================

/// Snapshot of game actions for a single tick.
///
/// - `is_down`: a bound key is held (movement)
/// - `is_pressed`: a bound key went down this tick (one-shot triggers)
#[derive(Debug, Clone)]
pub struct ActionState<A: Action> {
    down: HashSet<A>,
    pressed: HashSet<A>,
}

impl<A: Action> ActionState<A> {
    /// Creates an empty snapshot (nothing held).
    pub fn new() -> Self {
        Self {
            down: HashSet::new(),
            pressed: HashSet::new(),
        }
    }

    /// Returns `true` while any key bound to `action` is held.
    pub fn is_down(&self, action: A) -> bool {
        self.down.contains(&action)
    }

    /// Returns `true` only on the tick a bound key transitioned to down.
    pub fn is_pressed(&self, action: A) -> bool {
        self.pressed.contains(&action)
    }

    pub(crate) fn clear(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }

    pub(crate) fn set_down(&mut self, action: A) {
        self.down.insert(action);
    }

    pub(crate) fn set_pressed(&mut self, action: A) {
        self.pressed.insert(action);
    }
}

impl<A: Action> Default for ActionState<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
