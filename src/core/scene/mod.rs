//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene>>
//     └─ stack: Vec<S>
//
// Flow:
//   update() → top scene → Scene::update()
//   process_transitions() → on_exit / on_enter
//
//=========================================================================

//=== External Dependencies ===============================================

use std::error::Error;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::Action;

//=== Module Declarations =================================================

mod scene_manager;

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager, SceneTransition};

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// Scenes are registered in [`SceneManager`] and activated through the
/// scene stack. A scene keeps its value between activations but is
/// expected to rebuild its runtime state in `on_enter`.
///
/// # Minimal Implementation
///
/// ```rust
/// # use star_gate::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Title }
/// # impl SceneKey for Screen {}
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Input { Start }
/// # impl Action for Input {}
/// struct TitleScreen;
///
/// impl Scene<Screen, Input> for TitleScreen {
///     fn update(&mut self, _context: &mut GlobalContext<Screen, Input>) {}
/// }
/// ```
pub trait Scene<S: SceneKey, A: Action>: Send {
    /// Called when the scene becomes active.
    ///
    /// An error aborts activation: the manager logs it and leaves the
    /// scene off the stack.
    fn on_enter(&mut self, _context: &mut GlobalContext<S, A>) -> Result<(), SceneError> {
        Ok(())
    }

    /// Called when the scene leaves the stack.
    fn on_exit(&mut self, _context: &mut GlobalContext<S, A>) {}

    /// Called every tick while the scene is on top of the stack.
    fn update(&mut self, context: &mut GlobalContext<S, A>);
}

//=== SceneError ==========================================================

/// Failure raised while a scene is being entered.
#[derive(Debug)]
pub struct SceneError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl SceneError {
    /// Creates an error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.message, source),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for SceneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn scene_error_display_includes_source() {
        let err = SceneError::with_source(
            "entering LevelA failed",
            io::Error::new(io::ErrorKind::NotFound, "map missing"),
        );

        assert_eq!(err.to_string(), "entering LevelA failed: map missing");
        assert!(err.source().is_some());
    }

    #[test]
    fn scene_error_without_source() {
        let err = SceneError::new("no spawn");
        assert_eq!(err.to_string(), "no spawn");
        assert!(err.source().is_none());
    }
}
