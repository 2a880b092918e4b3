//=========================================================================
// Star Gate: Library Root
//
// Two-level tile-map collectathon on a small fixed-tick engine shell.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder` / `Engine`)
// - Expose the `core` systems (input, scenes, message bus, service
//   boundaries) and the `game` levels built on them
// - Keep the winit integration (`platform`) private
//
// Typical usage:
// ```no_run
// use star_gate::prelude::*;
//
// fn main() {
//     EngineBuilder::<GameScene, GameAction>::new()
//         .build()
//         .init(|systems| {
//             bind_default_controls(&mut systems.input);
//             register_levels(systems, LevelConfig::level_a(), LevelConfig::level_b());
//         })
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the logic-thread systems and the contracts with the
// external physics and rendering services.
//
// `game` holds the levels: configuration, Tiled definitions, scoring
// state and the level controller.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and forwards keyboard input; it is not part
// of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
