//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Holds the input system and the scene manager, plus the external
// physics and presentation services. Systems operate on GlobalContext.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{Action, InputSystem};
use crate::core::physics::{NullPhysics, PhysicsEvent, PhysicsService};
use crate::core::presentation::{present_pending, NullPresenter, Presenter};
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: key bindings and action resolution
/// - `scene_manager`: stack-based scene lifecycle manager
/// - `physics`: external physics/collision backend
/// - `presenter`: external rendering backend
pub struct GlobalSystems<S: SceneKey, A: Action> {
    pub input: InputSystem<A>,
    pub scene_manager: SceneManager<S, A>,
    pub physics: Box<dyn PhysicsService>,
    pub presenter: Box<dyn Presenter>,
}

impl<S: SceneKey, A: Action> GlobalSystems<S, A> {
    /// Creates systems with no bindings, no scenes and null services.
    pub(crate) fn new() -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(),
            physics: Box::new(NullPhysics),
            presenter: Box::new(NullPresenter),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: platform batches → key state → action snapshot
    /// 2. **Scene**: top scene reads last step's physics events, pushes commands
    /// 3. **Physics**: consumed events dropped, service steps and reports
    /// 4. **Presentation**: renderer drains presentation commands
    /// 5. **Transitions**: queued scene changes applied; a scene change
    ///    discards physics events addressed to the previous scene
    pub(crate) fn update(&mut self, context: &mut GlobalContext<S, A>, dt: f32) {
        // 1. Input
        self.input.process_frame(
            &mut context.input_state,
            &context.frame_events,
            &mut context.actions,
        );
        context.frame_events.clear();

        // 2. Active scene
        self.scene_manager.update(context);

        // 3. Physics
        context.message_bus.clear::<PhysicsEvent>();
        self.physics.step(dt, &mut context.message_bus);

        // 4. Presentation
        present_pending(self.presenter.as_mut(), &mut context.message_bus);

        // 5. Scene transitions; reports from the old scene's bodies are void
        if self.scene_manager.process_transitions(context) {
            context.message_bus.clear::<PhysicsEvent>();
        }
    }
}
