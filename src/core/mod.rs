//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for all engine subsystems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the engine systems (`GlobalSystems`) and shared data (`GlobalContext`)
// - Receive platform events via channel and batch them per tick
// - Maintain deterministic pacing using a fixed tick rate (TPS)
//
// Notes:
// All game state lives on this one thread. The platform layer only
// ever talks to it through `PlatformEvent` messages, so no scene,
// handler or service needs synchronization.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod globals;
pub mod input;
pub mod message_bus;
pub mod physics;
pub(crate) mod platform_bridge;
pub mod presentation;
pub mod scene;

//=== Re-exports ==========================================================

pub use globals::{GlobalContext, GlobalSystems, ProgressHandoff};
pub use input::Action;
pub use platform_bridge::PlatformError;
pub use scene::SceneKey;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Modules ====================================================

use input::InputEvent;
use platform_bridge::{Drained, EventCollector, PlatformEvent};

//=== CoreSystemsOrchestrator =============================================

/// Owns the logic-thread state and drives it one tick at a time.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey, A: Action> {
    systems: GlobalSystems<S, A>,
    context: GlobalContext<S, A>,
    started: bool,
}

impl<S: SceneKey, A: Action> CoreSystemsOrchestrator<S, A> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(),
            started: false,
        }
    }

    /// Runs user configuration against the systems before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S, A>),
    {
        init_fn(&mut self.systems);
    }

    //--- tick() -----------------------------------------------------------
    //
    // One logic step: enters the initial scenes on first use, then runs
    // the full system pipeline over this tick's input batches.
    //
    pub(crate) fn tick(&mut self, batches: Vec<Vec<InputEvent>>, dt: f32) {
        if !self.started {
            self.systems.scene_manager.start(&mut self.context);
            self.started = true;
        }

        self.context.frame_events = batches;
        self.systems.update(&mut self.context, dt);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread: collect → tick → sleep, until the platform
    // reports the window closed or the channel disconnects.
    //
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        thread::spawn(move || {
            let collector = EventCollector::new(receiver);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                let batches = match collector.drain() {
                    Drained::Tick(batches) => batches,
                    Drained::Shutdown => {
                        info!(target: "core", "Core thread exiting");
                        break;
                    }
                };

                //--- Step 2: Update systems --------------------------------
                self.tick(batches, dt);

                //--- Step 3: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn systems(&self) -> &GlobalSystems<S, A> {
        &self.systems
    }

    #[cfg(test)]
    pub(crate) fn context_mut(&mut self) -> &mut GlobalContext<S, A> {
        &mut self.context
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
