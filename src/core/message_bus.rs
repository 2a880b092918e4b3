//=========================================================================
// Message Bus
//=========================================================================
//
// Type-safe per-type message queues for inter-system communication.
//
// Architecture:
//   Scenes / services → push<M>() → HashMap<TypeId, Vec<M>>
//                                        ↓
//   Consumers ←──────────────────── read<M>() / drain<M>()
//                                        ↓
//   Coordinator ────────────────→ clear<M>() at tick boundary
//
// Every message that crosses a service boundary travels here: physics
// events, body commands, presentation commands, scene transitions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashMap;

//=== Message Trait =======================================================

/// Marker trait for types that can be sent through the [`MessageBus`].
///
/// Automatically implemented for all types that are `Send + 'static`.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageQueue ========================================================

/// Type-erased queue so heterogeneous `Vec<M>` can share one map.
trait MessageQueue: Send {
    /// Clears all messages while preserving allocated capacity.
    fn clear_queue(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== MessageBus ==========================================================

/// Batched message queues keyed by message type.
///
/// Producers push during a tick; consumers read or drain; the engine
/// clears consumed types at the tick boundary.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    /// Creates a new empty message bus.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Pushes a message into the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        self.queue_mut::<M>().push(msg);
    }

    /// Returns all messages of type `M` currently queued.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Removes and returns all messages of type `M`, oldest first.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(|v| v.drain(..).collect())
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    /// Returns the number of messages of type `M` currently queued.
    pub fn count<M: Message>(&self) -> usize {
        self.read::<M>().len()
    }

    /// Returns true if there are any messages of type `M` queued.
    pub fn has_messages<M: Message>(&self) -> bool {
        !self.read::<M>().is_empty()
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears all messages of type `M`, preserving allocated capacity.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, preserving capacity.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue_mut<M: Message>(&mut self) -> &mut Vec<M> {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        match queue.as_any_mut().downcast_mut::<Vec<M>>() {
            Some(vec) => vec,
            // The map is keyed by TypeId::of::<M>, so the entry is always Vec<M>
            None => unreachable!("message queue registered under a foreign TypeId"),
        }
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
