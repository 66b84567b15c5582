//! Per-run session state for the dead-reckoning engine.

use std::sync::Arc;

use crate::geo::Location;

/// State of one running dead-reckoning period.
///
/// Created on `start`, reseeded on every hard fix, dropped on any
/// transition back to idle. The route is shared read-only input owned by
/// the caller; the session never mutates it.
pub(crate) struct Session {
    /// Route the session is constrained to follow.
    pub(crate) route: Arc<Vec<Location>>,
    /// Locations generated since the last hard fix, in generation order.
    pub(crate) generated: Vec<Location>,
    /// Count of locations generated since the last hard fix.
    pub(crate) generated_count: u32,
    /// Reseed epoch; bumped every time a hard fix clears the history, so
    /// readers can tell a fresh sequence from a continuation.
    pub(crate) epoch: u64,
}

impl Session {
    pub(crate) fn new(route: Arc<Vec<Location>>) -> Self {
        Self {
            route,
            generated: Vec::new(),
            generated_count: 0,
            epoch: 0,
        }
    }

    /// Reseed on a new hard fix: the history becomes a fresh sequence
    /// rather than a mutation of the one readers may still hold.
    pub(crate) fn reseed(&mut self) {
        self.generated = Vec::new();
        self.generated_count = 0;
        self.epoch += 1;
    }

    pub(crate) fn push(&mut self, location: Location) {
        self.generated.push(location);
        self.generated_count += 1;
    }
}
