//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level key state tracking with per-frame edge detection.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys held) → query
//
// Frame lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame press edges.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
}

impl StateTracker {
    /// Creates a new state tracker with no keys held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears the press edges of the previous frame.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
    }

    /// Processes input events, updating internal state.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::KeyDown(key) => {
                    // OS key repeat must not count as a fresh press
                    if self.keys_down.insert(key) {
                        self.keys_pressed_this_frame.insert(key);
                    }
                }
                InputEvent::KeyUp(key) => {
                    self.keys_down.remove(&key);
                }
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    ///
    /// Use for edge-triggered actions such as restarting a level.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }
}

impl Default for StateTracker {
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

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown(key)
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp(key)
    }

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
    }

    #[test]
    fn pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyR)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyR));
        assert!(tracker.is_key_down(KeyCode::KeyR));

        // Held: no second press
        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyR));
        assert!(tracker.is_key_down(KeyCode::KeyR));

        frame(&mut tracker, &[key_up(KeyCode::KeyR)]);
        assert!(!tracker.is_key_down(KeyCode::KeyR));
        assert!(!tracker.is_key_pressed(KeyCode::KeyR));
    }

    #[test]
    fn key_repeat_does_not_retrigger_press() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyR)]);
        frame(&mut tracker, &[key_down(KeyCode::KeyR), key_down(KeyCode::KeyR)]);

        assert!(!tracker.is_key_pressed(KeyCode::KeyR), "Repeat should not count as press");
        assert!(tracker.is_key_down(KeyCode::KeyR));
    }

    #[test]
    fn fast_tap_captures_both_edges() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyR), key_up(KeyCode::KeyR)]);

        assert!(tracker.is_key_pressed(KeyCode::KeyR));
        assert!(!tracker.is_key_down(KeyCode::KeyR));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_up(KeyCode::ArrowLeft)]);

        assert!(!tracker.is_key_down(KeyCode::ArrowLeft));
        assert!(!tracker.is_key_pressed(KeyCode::ArrowLeft));
    }

    #[test]
    fn multiple_keys_tracked_independently() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::ArrowLeft), key_down(KeyCode::ArrowUp)]);
        frame(&mut tracker, &[key_up(KeyCode::ArrowLeft)]);

        assert!(!tracker.is_key_down(KeyCode::ArrowLeft));
        assert!(tracker.is_key_down(KeyCode::ArrowUp));
    }
}
