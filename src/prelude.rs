//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use star_gate::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems, ProgressHandoff};

// Input system
pub use crate::core::input::{Action, ActionState, KeyCode};

// Scene system
pub use crate::core::scene::{Scene, SceneError, SceneKey, SceneTransition};

// Message bus and service boundaries
pub use crate::core::message_bus::MessageBus;
pub use crate::core::physics::{
    BodyCommand, BodyId, BodyKind, ContactMode, PhysicsEvent, PhysicsService, Vec2,
};
pub use crate::core::presentation::{PresentCommand, Presenter};

// Levels
pub use crate::game::{
    bind_default_controls, register_levels, GameAction, GameContext, GameScene, LevelConfig,
    LevelController, LevelError, PlatformerLevel,
};
