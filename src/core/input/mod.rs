//=========================================================================
// Input System
//
// High-level interface for keyboard input on the logic thread.
//
// Responsibilities:
// - Feed each tick's key events into the `StateTracker`
// - Resolve key bindings into an `ActionState` for scenes
// - Expose the binding API used during engine initialization
//
// Notes:
// This system is owned by `GlobalSystems` and updated once per tick,
// before any scene runs.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub(crate) mod action_mapper;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, ActionState};
pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;

//=== External Crates =====================================================

use log::trace;

//=== Internal Imports ====================================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Converts raw key events into per-tick action snapshots.
pub struct InputSystem<A: Action> {
    mapper: ActionMapper<A>,
}

impl<A: Action> InputSystem<A> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` to `action`. A key drives at most one action.
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        if let Some(previous) = self.mapper.bind_key(key, action) {
            trace!(target: "input", "Rebound {:?}: {:?} -> {:?}", key, previous, action);
        }
    }

    /// Returns the action bound to `key`, if any.
    pub fn binding(&self, key: KeyCode) -> Option<A> {
        self.mapper.map_key(key)
    }

    //--- process_frame() --------------------------------------------------
    //
    // Applies every batch received this tick to the tracker, then
    // rebuilds the action snapshot from the resulting key state.
    //
    pub fn process_frame(
        &self,
        tracker: &mut StateTracker,
        batches: &[Vec<InputEvent>],
        actions: &mut ActionState<A>,
    ) {
        tracker.clear();
        for batch in batches {
            tracker.process_events(batch);
        }
        self.mapper.resolve(tracker, actions);
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Up,
        Restart,
    }

    impl Action for TestAction {}

    fn system() -> InputSystem<TestAction> {
        let mut system = InputSystem::new();
        system.bind_key(KeyCode::ArrowUp, TestAction::Up);
        system.bind_key(KeyCode::KeyR, TestAction::Restart);
        system
    }

    #[test]
    fn held_key_stays_down_across_ticks() {
        let system = system();
        let mut tracker = StateTracker::new();
        let mut actions = ActionState::new();

        system.process_frame(&mut tracker, &[vec![InputEvent::KeyDown(KeyCode::ArrowUp)]], &mut actions);
        assert!(actions.is_down(TestAction::Up));

        system.process_frame(&mut tracker, &[], &mut actions);
        assert!(actions.is_down(TestAction::Up));
    }

    #[test]
    fn restart_fires_once_per_press() {
        let system = system();
        let mut tracker = StateTracker::new();
        let mut actions = ActionState::new();

        system.process_frame(&mut tracker, &[vec![InputEvent::KeyDown(KeyCode::KeyR)]], &mut actions);
        assert!(actions.is_pressed(TestAction::Restart));

        // Still held on the next tick
        system.process_frame(&mut tracker, &[], &mut actions);
        assert!(!actions.is_pressed(TestAction::Restart));

        // Release, then press again
        system.process_frame(&mut tracker, &[vec![InputEvent::KeyUp(KeyCode::KeyR)]], &mut actions);
        system.process_frame(&mut tracker, &[vec![InputEvent::KeyDown(KeyCode::KeyR)]], &mut actions);
        assert!(actions.is_pressed(TestAction::Restart));
    }

    #[test]
    fn batches_apply_in_order() {
        let system = system();
        let mut tracker = StateTracker::new();
        let mut actions = ActionState::new();

        let batches = vec![
            vec![InputEvent::KeyDown(KeyCode::ArrowUp)],
            vec![InputEvent::KeyUp(KeyCode::ArrowUp)],
        ];
        system.process_frame(&mut tracker, &batches, &mut actions);

        assert!(!actions.is_down(TestAction::Up));
    }

    #[test]
    fn unbound_keys_produce_no_actions() {
        let system = system();
        assert_eq!(system.binding(KeyCode::Space), None);

        let mut tracker = StateTracker::new();
        let mut actions = ActionState::new();
        system.process_frame(&mut tracker, &[vec![InputEvent::KeyDown(KeyCode::Space)]], &mut actions);

        assert!(!actions.is_down(TestAction::Up));
        assert!(!actions.is_pressed(TestAction::Restart));
    }
}
