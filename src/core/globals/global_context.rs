//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - input_state / actions: this tick's keyboard and action snapshot
// - message_bus: physics events in; body, presentation and scene
//   transition requests out
// - progress: score carried between levels
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::ProgressHandoff;
use crate::core::input::{Action, ActionState, InputEvent, StateTracker};
use crate::core::message_bus::MessageBus;
use crate::core::scene::SceneKey;

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` in every lifecycle hook. The
/// engine's systems live elsewhere ([`super::GlobalSystems`]), so a scene
/// can never reach into the scene manager that is driving it.
pub struct GlobalContext<S: SceneKey, A: Action> {
    /// Raw key state for low-level queries.
    pub input_state: StateTracker,

    /// Game actions resolved from key bindings this tick.
    pub actions: ActionState<A>,

    /// Per-type message queues shared with the external services.
    pub message_bus: MessageBus,

    /// Score handed from one level to the next.
    pub progress: ProgressHandoff,

    /// Input batches received from the platform this tick.
    ///
    /// Filled by the orchestrator, consumed by the input system.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,

    _scene: std::marker::PhantomData<S>,
}

impl<S: SceneKey, A: Action> GlobalContext<S, A> {
    /// Creates a new context with empty state.
    pub(crate) fn new() -> Self {
        Self {
            input_state: StateTracker::new(),
            actions: ActionState::new(),
            message_bus: MessageBus::new(),
            progress: ProgressHandoff::new(),
            frame_events: Vec::new(),
            _scene: std::marker::PhantomData,
        }
    }
}
