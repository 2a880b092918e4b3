//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-thread end of the platform channel.
//
// Each tick the orchestrator asks for everything the platform sent since
// the previous tick. The answer is either the key batches to feed into
// the input system, or a request to shut down.
//
//   Receiver<PlatformEvent> ──drain()──> Drained::Tick(batches)
//                                      └> Drained::Shutdown
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

/// Channel messages handled per tick before the rest waits for the next one.
const MAX_MESSAGES_PER_TICK: usize = 100;

//=== Drained =============================================================

/// What one tick received from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Drained {
    /// Key batches in arrival order; empty batches are never included.
    Tick(Vec<Vec<InputEvent>>),

    /// Window closed or platform gone.
    Shutdown,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver }
    }

    /// Takes what is waiting on the channel without blocking.
    ///
    /// A close request wins over input received in the same tick.
    pub(crate) fn drain(&self) -> Drained {
        let mut batches = Vec::new();

        for _ in 0..MAX_MESSAGES_PER_TICK {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs(batch)) if batch.is_empty() => {}
                Ok(PlatformEvent::Inputs(batch)) => batches.push(batch),
                Ok(PlatformEvent::WindowClosed) => {
                    debug!(target: "core", "Window closed, discarding {} batches", batches.len());
                    return Drained::Shutdown;
                }
                Err(TryRecvError::Disconnected) => return Drained::Shutdown,
                Err(TryRecvError::Empty) => return Drained::Tick(batches),
            }
        }

        warn!(
            target: "core",
            "Platform backlog: {} messages this tick, rest deferred",
            MAX_MESSAGES_PER_TICK
        );
        Drained::Tick(batches)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    #[test]
    fn quiet_channel_yields_empty_tick() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let collector = EventCollector::new(rx);

        assert_eq!(collector.drain(), Drained::Tick(Vec::new()));
    }

    #[test]
    fn batches_keep_arrival_order() {
        let (tx, rx) = unbounded();
        let collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::ArrowLeft)]))
            .unwrap();
        tx.send(PlatformEvent::Inputs(Vec::new())).unwrap();
        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyUp(KeyCode::ArrowLeft)]))
            .unwrap();

        assert_eq!(
            collector.drain(),
            Drained::Tick(vec![
                vec![InputEvent::KeyDown(KeyCode::ArrowLeft)],
                vec![InputEvent::KeyUp(KeyCode::ArrowLeft)],
            ])
        );
    }

    #[test]
    fn backlog_is_split_across_ticks() {
        let (tx, rx) = unbounded();
        let collector = EventCollector::new(rx);
        for _ in 0..MAX_MESSAGES_PER_TICK + 5 {
            tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::KeyR)]))
                .unwrap();
        }

        let first = collector.drain();
        let second = collector.drain();

        assert!(matches!(first, Drained::Tick(ref b) if b.len() == MAX_MESSAGES_PER_TICK));
        assert!(matches!(second, Drained::Tick(ref b) if b.len() == 5));
    }

    #[test]
    fn window_close_requests_shutdown() {
        let (tx, rx) = unbounded();
        let collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::KeyR)]))
            .unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.drain(), Drained::Shutdown);
    }

    #[test]
    fn disconnect_requests_shutdown() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.drain(), Drained::Shutdown);
    }
}
