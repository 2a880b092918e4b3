//=========================================================================
// Level Errors
//=========================================================================
//
// Failures that prevent a level from being entered or rebuilt.
//
// Everything here is fatal to the current entry attempt: the scene
// manager logs it and leaves the level off the stack. Contact outcomes
// that are merely informational live in `controller` as
// `CollectOutcome` / `GoalOutcome`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

//=== LevelError ==========================================================

#[derive(Debug)]
pub enum LevelError {
    /// The object layer has no entry named `"player"`.
    MissingSpawnPoint { level: String },

    /// The level definition has no object layer with the configured name.
    MissingObjectLayer { layer: String },

    /// The level definition file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The level definition is not valid Tiled JSON.
    Parse(serde_json::Error),

    /// `build_scene` was called before `load_assets`.
    NotLoaded,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::MissingSpawnPoint { level } => {
                write!(f, "level '{}' has no player spawn point", level)
            }
            LevelError::MissingObjectLayer { layer } => {
                write!(f, "object layer '{}' not found", layer)
            }
            LevelError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LevelError::Parse(e) => write!(f, "invalid level definition: {}", e),
            LevelError::NotLoaded => f.write_str("level definition not loaded"),
        }
    }
}

impl Error for LevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LevelError::Io { source, .. } => Some(source),
            LevelError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        LevelError::Parse(e)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
