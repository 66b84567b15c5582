//! Listener registration and broadcast for dead-reckoning updates.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::geo::Location;

use super::engine::StopReason;

/// Receiver of dead-reckoning notifications.
///
/// Implementations are notified synchronously from the engine tick, in
/// registration order; a slow handler delays the next scheduled tick.
/// Handlers must not call back into the engine that is notifying them.
pub trait DeadReckoningHandler: Send + Sync {
    /// Called once per accepted tick with the newly generated location.
    fn on_generated_location(&self, location: &Location);

    /// Called exactly once per running period when the engine transitions
    /// back to idle, whether by explicit stop, generation-limit exhaustion,
    /// or running past the end of the route. `generated` is the final
    /// history of the session; the engine releases it after this call.
    fn on_stopped(&self, reason: StopReason, generated: &[Location]);
}

/// Blanket implementation for `Arc`-wrapped handlers.
///
/// Lets a shared handler be registered directly without a newtype wrapper;
/// the implementation delegates to the inner handler.
impl<T: DeadReckoningHandler + ?Sized> DeadReckoningHandler for Arc<T> {
    fn on_generated_location(&self, location: &Location) {
        (**self).on_generated_location(location);
    }

    fn on_stopped(&self, reason: StopReason, generated: &[Location]) {
        (**self).on_stopped(reason, generated);
    }
}

/// Opaque handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Ordered listener registry.
///
/// Listeners are keyed by a monotonically increasing id, so iteration order
/// is registration order and removal is by handle rather than by scanning
/// for value equality.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: BTreeMap<ListenerId, Box<dyn DeadReckoningHandler>>,
}

impl ListenerRegistry {
    /// Register a handler; returns the handle used to remove it later.
    pub(crate) fn add(&mut self, handler: Box<dyn DeadReckoningHandler>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, handler);
        id
    }

    /// Remove a handler by handle. Returns false for an unknown handle.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub(crate) fn notify_generated(&self, location: &Location) {
        for handler in self.entries.values() {
            handler.on_generated_location(location);
        }
    }

    pub(crate) fn notify_stopped(&self, reason: StopReason, generated: &[Location]) {
        for handler in self.entries.values() {
            handler.on_stopped(reason, generated);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
