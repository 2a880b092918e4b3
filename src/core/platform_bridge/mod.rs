//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit thread and the logic thread.
//
// - `interface`: what travels over the channel, and platform errors
// - `event_collector`: per-tick draining on the logic side
//
//=========================================================================

mod event_collector;
mod interface;

pub(crate) use event_collector::{Drained, EventCollector};
pub(crate) use interface::PlatformEvent;
pub use interface::PlatformError;
