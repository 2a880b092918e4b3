//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, stack operations, and lifecycle.
//
// Scenes are stored in a HashMap by key and referenced via a stack
// of keys. Only the topmost scene is updated. Transitions requested
// during a tick are read from the message bus and applied at the tick
// boundary, after every scene has run.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;
use crate::core::input::Action;

//=== Scene Transition ====================================================

/// Scene stack operation requested through the message bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Replaces `.0` with `.1` in place. One-way level progression uses this.
    Replace(K, K),
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Stack-based scene lifecycle manager.
pub struct SceneManager<S: SceneKey, A: Action> {
    scenes: HashMap<S, Box<dyn Scene<S, A>>>,
    stack: Vec<S>,
}

impl<S: SceneKey, A: Action> SceneManager<S, A> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            stack: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene under `key`, replacing any previous registration.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S, A> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and places it at the bottom of the stack.
    ///
    /// Its `on_enter` hook runs when [`SceneManager::start`] is called.
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S, A> + 'static,
    {
        self.register_scene(key, scene);

        if self.stack.contains(&key) {
            warn!(target: "scene", "Scene {:?} is already in the stack", key);
        } else {
            debug!(target: "scene", "Registered scene {:?} as default", key);
            self.stack.push(key);
        }
    }

    /// Enters every scene already on the stack, bottom first.
    ///
    /// Scenes whose entry fails are dropped from the stack.
    pub fn start(&mut self, context: &mut GlobalContext<S, A>) {
        let initial = std::mem::take(&mut self.stack);
        for key in initial {
            debug!(target: "scene", "Starting scene {:?}", key);
            if self.enter(key, context) {
                self.stack.push(key);
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the scene currently receiving updates.
    pub fn active(&self) -> Option<S> {
        self.stack.last().copied()
    }

    /// Returns the scene stack, bottom first.
    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates the topmost scene.
    pub fn update(&mut self, context: &mut GlobalContext<S, A>) {
        let Some(key) = self.active() else {
            return;
        };

        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.update(context);
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies all transitions queued on the message bus, in FIFO order.
    ///
    /// Returns `true` if the active scene changed.
    pub fn process_transitions(&mut self, context: &mut GlobalContext<S, A>) -> bool {
        let before = self.active();

        for transition in context.message_bus.drain::<SceneTransition<S>>() {
            let SceneTransition::Replace(old_key, new_key) = transition;
            self.replace_internal(old_key, new_key, context);
        }

        self.active() != before
    }

    //--- Internal Helpers -------------------------------------------------

    /// Runs `on_enter`; returns whether the scene may join the stack.
    fn enter(&mut self, key: S, context: &mut GlobalContext<S, A>) -> bool {
        let Some(scene) = self.scenes.get_mut(&key) else {
            warn!(target: "scene", "Scene {:?} not registered", key);
            return false;
        };

        match scene.on_enter(context) {
            Ok(()) => true,
            Err(e) => {
                error!(target: "scene", "Scene {:?} failed to enter: {}", key, e);
                false
            }
        }
    }

    fn exit(&mut self, key: S, context: &mut GlobalContext<S, A>) {
        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_exit(context);
        }
    }

    fn replace_internal(&mut self, old_key: S, new_key: S, context: &mut GlobalContext<S, A>) {
        let Some(pos) = self.stack.iter().position(|&k| k == old_key) else {
            warn!(target: "scene", "Scene {:?} not in stack, skipping replacement", old_key);
            return;
        };

        if self.stack.contains(&new_key) {
            warn!(target: "scene", "Scene {:?} is already in the stack, skipping replacement", new_key);
            return;
        }

        if !self.scenes.contains_key(&new_key) {
            warn!(target: "scene", "Attempted to replace with unregistered scene {:?}", new_key);
            return;
        }

        debug!(target: "scene", "Replacing scene {:?} with {:?}", old_key, new_key);
        self.exit(old_key, context);

        if self.enter(new_key, context) {
            self.stack[pos] = new_key;
        } else {
            self.stack.remove(pos);
        }
    }
}

impl<S: SceneKey, A: Action> Default for SceneManager<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        Broken,
    }

    impl SceneKey for TestScene {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Go,
    }

    impl Action for TestAction {}

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recording {
        name: &'static str,
        log: Log,
        fail_enter: bool,
    }

    impl Scene<TestScene, TestAction> for Recording {
        fn on_enter(
            &mut self,
            _context: &mut GlobalContext<TestScene, TestAction>,
        ) -> Result<(), SceneError> {
            self.log.lock().unwrap().push(format!("enter {}", self.name));
            if self.fail_enter {
                Err(SceneError::new("refused"))
            } else {
                Ok(())
            }
        }

        fn on_exit(&mut self, _context: &mut GlobalContext<TestScene, TestAction>) {
            self.log.lock().unwrap().push(format!("exit {}", self.name));
        }

        fn update(&mut self, _context: &mut GlobalContext<TestScene, TestAction>) {
            self.log.lock().unwrap().push(format!("update {}", self.name));
        }
    }

    fn manager(log: &Log) -> SceneManager<TestScene, TestAction> {
        let mut manager = SceneManager::new();
        manager.register_default(
            TestScene::A,
            Recording { name: "A", log: log.clone(), fail_enter: false },
        );
        manager.register_scene(
            TestScene::B,
            Recording { name: "B", log: log.clone(), fail_enter: false },
        );
        manager.register_scene(
            TestScene::Broken,
            Recording { name: "Broken", log: log.clone(), fail_enter: true },
        );
        manager
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn start_enters_default_scene() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();

        manager.start(&mut context);

        assert_eq!(manager.active(), Some(TestScene::A));
        assert_eq!(entries(&log), vec!["enter A"]);
    }

    #[test]
    fn update_runs_only_active_scene() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        manager.start(&mut context);

        manager.update(&mut context);

        assert_eq!(manager.stack(), &[TestScene::A]);
        assert_eq!(entries(&log), vec!["enter A", "update A"]);
    }

    #[test]
    fn replace_exits_old_and_enters_new() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        manager.start(&mut context);

        context
            .message_bus
            .push(SceneTransition::Replace(TestScene::A, TestScene::B));
        let changed = manager.process_transitions(&mut context);

        assert!(changed);
        assert_eq!(manager.stack(), &[TestScene::B]);
        assert_eq!(entries(&log), vec!["enter A", "exit A", "enter B"]);
        assert!(!context.message_bus.has_messages::<SceneTransition<TestScene>>());
    }

    #[test]
    fn duplicate_replace_in_one_tick_applies_once() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        manager.start(&mut context);

        for _ in 0..2 {
            context
                .message_bus
                .push(SceneTransition::Replace(TestScene::A, TestScene::B));
        }
        manager.process_transitions(&mut context);

        let enters = entries(&log).iter().filter(|e| *e == "enter B").count();
        assert_eq!(enters, 1);
    }

    #[test]
    fn failed_enter_leaves_scene_off_stack() {
        let log = Log::default();
        let mut manager = manager(&log);
        let mut context = GlobalContext::new();
        manager.start(&mut context);

        context
            .message_bus
            .push(SceneTransition::Replace(TestScene::A, TestScene::Broken));
        manager.process_transitions(&mut context);

        assert!(manager.stack().is_empty());
        assert_eq!(manager.active(), None);
    }

    #[test]
    fn replace_with_unregistered_is_ignored() {
        let log = Log::default();
        let mut manager: SceneManager<TestScene, TestAction> = SceneManager::new();
        manager.register_default(
            TestScene::A,
            Recording { name: "A", log: log.clone(), fail_enter: false },
        );
        let mut context = GlobalContext::new();
        manager.start(&mut context);

        context
            .message_bus
            .push(SceneTransition::Replace(TestScene::A, TestScene::B));
        let changed = manager.process_transitions(&mut context);

        assert!(!changed);
        assert_eq!(manager.stack(), &[TestScene::A]);
    }
}
