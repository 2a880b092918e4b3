//=========================================================================
// Star Gate Engine
//
// Main entry point and coordinator for the game runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(): bindings, levels
//         ├─ with_channel_capacity() └─ run(): spawns logic thread,
//         ├─ with_window()                     runs platform,
//         ├─ with_physics()                    blocks until exit
//         └─ with_presenter()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::physics::PhysicsService;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::presentation::Presenter;
use crate::core::{Action, CoreSystemsOrchestrator, GlobalSystems, SceneKey};
use crate::platform::{Platform, WindowSettings};

//=== EngineConfig ========================================================

/// Runtime parameters collected by [`EngineBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EngineConfig {
    /// Logic ticks per second.
    pub(crate) tps: f64,
    /// Platform → core messages that may queue before the platform blocks.
    pub(crate) channel_capacity: usize,
    pub(crate) window: WindowSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowSettings::default(),
        }
    }
}

//=== EngineBuilder =======================================================

/// Configures an [`Engine`]: tick rate, channel, window and the external
/// physics and rendering services.
///
/// Defaults are 60 TPS, a 128-message channel, an 800x600 "Star Gate"
/// window and null services (levels run, nothing collides or draws).
///
/// ```no_run
/// use star_gate::prelude::*;
///
/// EngineBuilder::<GameScene, GameAction>::new()
///     .with_tps(120.0)
///     .with_window("Star Gate", 1024, 768)
///     .build()
///     .init(|systems| {
///         bind_default_controls(&mut systems.input);
///         register_levels(systems, LevelConfig::level_a(), LevelConfig::level_b());
///     })
///     .run();
/// ```
pub struct EngineBuilder<S: SceneKey, A: Action> {
    config: EngineConfig,
    physics: Option<Box<dyn PhysicsService>>,
    presenter: Option<Box<dyn Presenter>>,
    _keys: std::marker::PhantomData<(S, A)>,
}

impl<S: SceneKey, A: Action> EngineBuilder<S, A> {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            physics: None,
            presenter: None,
            _keys: std::marker::PhantomData,
        }
    }

    /// Logic ticks per second. Levels advance one step per tick.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Capacity of the bounded platform → core channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    /// Window title and logical size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window(mut self, title: impl Into<String>, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive");
        self.config.window = WindowSettings {
            title: title.into(),
            width,
            height,
        };
        self
    }

    pub fn with_physics(mut self, physics: impl PhysicsService + 'static) -> Self {
        self.physics = Some(Box::new(physics));
        self
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    /// Creates the engine with its services installed.
    pub fn build(self) -> Engine<S, A> {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.config.tps,
            self.config.channel_capacity,
            self.config.window.width,
            self.config.window.height
        );

        let mut orchestrator = CoreSystemsOrchestrator::new();
        let (physics, presenter) = (self.physics, self.presenter);
        orchestrator.init_systems(|systems| {
            if let Some(physics) = physics {
                systems.physics = physics;
            }
            if let Some(presenter) = presenter {
                systems.presenter = presenter;
            }
        });

        Engine {
            orchestrator,
            config: self.config,
        }
    }
}

impl<S: SceneKey, A: Action> Default for EngineBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// A configured game, ready to register levels and run.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, SceneManager (levels), services
///   │
///   └─► Platform (winit event loop)
///         └─► Window, keyboard
///
/// Communication: bounded channel of PlatformEvent
/// ```
pub struct Engine<S: SceneKey, A: Action> {
    orchestrator: CoreSystemsOrchestrator<S, A>,
    config: EngineConfig,
}

impl<S: SceneKey, A: Action> Engine<S, A> {
    //--- Initialization ---------------------------------------------------

    /// Gives `init_fn` the systems to bind keys and register scenes.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<S, A>),
    {
        self.orchestrator.init_systems(init_fn);
        info!("Engine systems initialized");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes.
    ///
    /// The logic thread is spawned first; the winit loop then owns the
    /// calling thread. Closing the window sends `WindowClosed`, after
    /// which the logic thread finishes its tick and is joined.
    pub fn run(self) {
        let EngineConfig { tps, channel_capacity, window } = self.config;
        info!("Starting engine runtime (TPS: {})", tps);

        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(channel_capacity);
        let core_handle = self.orchestrator.spawn_core_thread(rx, tps);

        if let Err(e) = Platform::new(tx, window).run() {
            error!("Platform error: {}", e);
        }

        match core_handle.join() {
            Ok(()) => info!("Engine shutdown complete"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
