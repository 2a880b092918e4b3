//=========================================================================
// Game
//
// The two tile-map levels and their wiring into the engine.
//
// Responsibilities:
// - Scene keys (`GameScene`) and input actions (`GameAction`)
// - Default key bindings
// - Registering Level-A (default) and Level-B with the scene manager
//
// Level flow:
// ```text
//   LevelA ──goal (score >= 5, score handed off)──> LevelB
//     ↑                                               │
//     └──────────────── goal (score >= 5) ────────────┘
// ```
//
//=========================================================================

//=== Submodules ==========================================================

pub mod config;
mod contacts;
pub mod controller;
pub mod definition;
pub mod entities;
pub mod error;
pub mod state;

//=== Public API ==========================================================

pub use config::{HudLayout, LevelConfig};
pub use controller::{
    CollectOutcome, FrameInput, GoalOutcome, LevelController, LevelPhase, PlatformerLevel,
};
pub use definition::{LevelDefinition, MapSource};
pub use entities::Direction;
pub use error::LevelError;
pub use state::{IconTint, LevelState};

//=== Internal Imports ====================================================

use log::info;

use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::input::{Action, InputSystem, KeyCode};
use crate::core::scene::SceneKey;

//=== Keys & Actions ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScene {
    LevelA,
    LevelB,
}

impl SceneKey for GameScene {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Restart,
}

impl Action for GameAction {}

impl From<Direction> for GameAction {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => GameAction::MoveLeft,
            Direction::Right => GameAction::MoveRight,
            Direction::Up => GameAction::MoveUp,
            Direction::Down => GameAction::MoveDown,
        }
    }
}

/// Context type every level hook receives.
pub type GameContext = GlobalContext<GameScene, GameAction>;

//=== Setup ===============================================================

/// Arrow keys (or WASD) move, `R` restarts the current level.
pub fn bind_default_controls(input: &mut InputSystem<GameAction>) {
    let bindings = [
        (KeyCode::ArrowLeft, GameAction::MoveLeft),
        (KeyCode::ArrowRight, GameAction::MoveRight),
        (KeyCode::ArrowUp, GameAction::MoveUp),
        (KeyCode::ArrowDown, GameAction::MoveDown),
        (KeyCode::KeyA, GameAction::MoveLeft),
        (KeyCode::KeyD, GameAction::MoveRight),
        (KeyCode::KeyW, GameAction::MoveUp),
        (KeyCode::KeyS, GameAction::MoveDown),
        (KeyCode::KeyR, GameAction::Restart),
    ];

    for (key, action) in bindings {
        input.bind_key(key, action);
    }
}

/// Registers both levels; the first one is entered when the engine starts.
pub fn register_levels(
    systems: &mut GlobalSystems<GameScene, GameAction>,
    first: LevelConfig,
    second: LevelConfig,
) {
    info!(target: "game", "Registering levels {:?} -> {:?}", first.key, second.key);

    let (first_key, second_key) = (first.key, second.key);
    systems
        .scene_manager
        .register_default(first_key, PlatformerLevel::new(first));
    systems
        .scene_manager
        .register_scene(second_key, PlatformerLevel::new(second));
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::{BodyCommand, BodyId, BodyKind, ContactMode, PhysicsEvent};
    use crate::core::presentation::PresentCommand;
    use serde_json::json;

    fn map(stars: usize) -> String {
        let mut objects = vec![json!({ "name": "player", "x": 10, "y": 10 })];
        for i in 0..stars {
            objects.push(json!({ "type": "star", "x": 50 + i * 10, "y": 10 }));
        }
        objects.push(json!({ "type": "meta", "x": 200, "y": 10 }));

        json!({
            "width": 10, "height": 10, "tilewidth": 16, "tileheight": 16,
            "layers": [{ "name": "Objetos", "type": "objectgroup", "objects": objects }]
        })
        .to_string()
    }

    /// Collects the ids of every body spawned since the bus was last drained.
    fn spawned(context: &mut GameContext) -> Vec<(BodyId, BodyKind)> {
        context
            .message_bus
            .drain::<BodyCommand>()
            .into_iter()
            .filter_map(|c| match c {
                BodyCommand::Spawn { body, spec } => Some((body, spec.kind)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn default_controls_cover_every_action() {
        let mut input = InputSystem::new();
        bind_default_controls(&mut input);

        assert_eq!(input.binding(KeyCode::ArrowLeft), Some(GameAction::MoveLeft));
        assert_eq!(input.binding(KeyCode::ArrowDown), Some(GameAction::MoveDown));
        assert_eq!(input.binding(KeyCode::KeyW), Some(GameAction::MoveUp));
        assert_eq!(input.binding(KeyCode::KeyR), Some(GameAction::Restart));
        assert_eq!(input.binding(KeyCode::Space), None);
    }

    #[test]
    fn direction_maps_to_move_action() {
        assert_eq!(GameAction::from(Direction::Up), GameAction::MoveUp);
        assert_eq!(GameAction::from(Direction::Right), GameAction::MoveRight);
    }

    #[test]
    fn score_carries_from_level_a_into_level_b() {
        let mut systems = GlobalSystems::new();
        let mut context = GameContext::new();
        register_levels(
            &mut systems,
            LevelConfig::level_a().with_map_json(map(5)),
            LevelConfig::level_b().with_map_json(map(2)),
        );

        systems.scene_manager.start(&mut context);
        assert_eq!(systems.scene_manager.active(), Some(GameScene::LevelA));

        let bodies = spawned(&mut context);
        let player = bodies.iter().find(|(_, k)| *k == BodyKind::Player).unwrap().0;
        let goal = bodies.iter().find(|(_, k)| *k == BodyKind::Goal).unwrap().0;
        for (star, _) in bodies.iter().filter(|(_, k)| *k == BodyKind::Collectible) {
            context.message_bus.push(PhysicsEvent::Contact {
                a: player,
                b: *star,
                mode: ContactMode::Collide,
            });
        }
        context.message_bus.push(PhysicsEvent::Contact {
            a: player,
            b: goal,
            mode: ContactMode::Overlap,
        });

        systems.scene_manager.update(&mut context);
        assert!(systems.scene_manager.process_transitions(&mut context));

        assert_eq!(systems.scene_manager.active(), Some(GameScene::LevelB));
        assert_eq!(context.progress.carried_score(), 5);

        let hud = context
            .message_bus
            .read::<PresentCommand>()
            .iter()
            .rev()
            .find_map(|c| match c {
                PresentCommand::Hud(frame) => Some(frame.label.clone()),
                _ => None,
            });
        assert_eq!(hud.as_deref(), Some("Score: 5"));
    }
}
