//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the engine's logic thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  input_processor         │    │  InputSystem     │
//  │   ↓                      │    │  ↓               │
//  │  pending: Vec<InputEvent>│    │  SceneManager    │
//  │   ↓                      │    │  (levels)        │
//  │  RedrawRequested (flush) │    │                  │
//  │   ↓                      │    └──────────────────┘
//  │  channel ────────────────┼─────────────↑
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame boundary is `RedrawRequested`: every key event seen since the
// previous redraw is sent as one ordered batch. Empty batches are not
// sent.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::{PlatformError, PlatformEvent};

//=== WindowSettings ======================================================

/// Window title and logical size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Star Gate".to_string(),
            width: 800,
            height: 600,
        }
    }
}

//=== Platform ============================================================

/// Window owner and key event forwarder.
///
/// Runs on the main thread (winit requirement on macOS/iOS) and talks
/// to the logic thread exclusively through the channel sender.
pub(crate) struct Platform {
    window: Option<Window>,
    settings: WindowSettings,
    pending: Vec<InputEvent>,
    event_sender: Sender<PlatformEvent>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform; the window itself is created in `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, settings: WindowSettings) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            pending: Vec::with_capacity(32),
            event_sender,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered key events to the logic thread as one batch.
    ///
    /// A disconnected channel (logic thread gone) drops the batch with a
    /// warning so the window can still be closed normally.
    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.pending);
        let count = batch.len();
        trace!(target: "platform::input", "Flushing {} key events", count);

        if self.event_sender.send(PlatformEvent::Inputs(batch)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
        }
    }

    /// Tells the logic thread the window is closing. Returns whether the
    /// message was delivered.
    fn notify_closed(&self) -> bool {
        let delivered = self.event_sender.send(PlatformEvent::WindowClosed).is_ok();
        if !delivered {
            warn!(target: "platform", "Channel disconnected before close notification");
        }
        delivered
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        self.notify_closed();
        event_loop.exit();
    }
}

//=== winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{}",
                    window.inner_size().width,
                    window.inner_size().height
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.shut_down(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shut_down(event_loop);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = input_processor::process_key_event(key_event) {
                    self.pending.push(event);
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_pending();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
