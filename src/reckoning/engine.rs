//! Dead-reckoning state machine.
//!
//! The engine has two states, **Idle** and **Running**, and is advanced by
//! three inputs: `start`/`stop` control calls, hard fixes from the real
//! location provider, and periodic `tick` calls from the driver (see
//! [`runner`](super::runner)). Each accepted tick extrapolates from the
//! most recent known location along the carried speed and course, snaps the
//! result onto the active route, appends it to the session history and
//! notifies listeners.
//!
//! The engine itself is synchronous and timer-free: generated timestamps
//! derive from the baseline fix plus the configured interval, which keeps
//! the state machine deterministic and directly testable. It assumes
//! single-threaded cooperative calls; multi-threaded callers wrap it in a
//! mutex (the runner does exactly that).

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::geo::{self, Location};
use crate::route;

use super::config::DeadReckoningConfig;
use super::error::ReckoningError;
use super::listener::{DeadReckoningHandler, ListenerId, ListenerRegistry};
use super::session::Session;

/// Why a running engine transitioned back to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop` was called.
    Requested,
    /// Extrapolation projected past the end of the route; there is no
    /// on-path point left to generate. This is the defined termination of
    /// a session, not an error.
    RouteExhausted,
    /// The configured generation limit was reached.
    LimitReached,
}

/// Result of a single engine tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The engine is idle; nothing happened.
    Idle,
    /// The engine is running but no hard fix has ever arrived; there is no
    /// baseline to extrapolate from yet.
    Waiting,
    /// A location was generated and listeners were notified.
    Generated(Location),
    /// This tick ended the session and listeners were notified of the
    /// stop. When the reason is [`StopReason::LimitReached`] the final
    /// location was still generated and delivered on the same tick.
    Stopped(StopReason),
}

/// Route-constrained dead-reckoning engine.
///
/// Generates estimated locations at a fixed interval from the last known
/// hard fix, carrying speed and course forward (optionally decaying the
/// speed), and keeps every generated point on the active route by snapping
/// it to its projection. See the [module docs](self) for the state machine.
pub struct DeadReckoningEngine {
    config: DeadReckoningConfig,
    listeners: ListenerRegistry,
    last_fix: Option<Location>,
    session: Option<Session>,
}

impl Default for DeadReckoningEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DeadReckoningEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self {
            config: DeadReckoningConfig::default(),
            listeners: ListenerRegistry::default(),
            last_fix: None,
            session: None,
        }
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error for an inconsistent configuration.
    pub fn with_config(config: DeadReckoningConfig) -> Result<Self, ReckoningError> {
        config.validate()?;
        Ok(Self {
            config,
            listeners: ListenerRegistry::default(),
            last_fix: None,
            session: None,
        })
    }

    // ==================== configuration ====================

    /// Current configuration.
    pub fn config(&self) -> &DeadReckoningConfig {
        &self.config
    }

    /// Set the tick interval. Idle only.
    pub fn set_interval(&mut self, interval: std::time::Duration) -> Result<(), ReckoningError> {
        self.ensure_idle()?;
        if interval.is_zero() {
            return Err(ReckoningError::InvalidInterval);
        }
        self.config.interval = interval;
        Ok(())
    }

    /// Set the per-second speed decay. Idle only.
    pub fn set_deceleration(&mut self, deceleration: f64) -> Result<(), ReckoningError> {
        self.ensure_idle()?;
        if deceleration.is_nan() || deceleration.is_infinite() || deceleration < 0.0 {
            return Err(ReckoningError::InvalidDeceleration);
        }
        self.config.deceleration = deceleration;
        Ok(())
    }

    /// Set the generation limit (`None` = unlimited). Idle only.
    pub fn set_max_generated(&mut self, limit: Option<u32>) -> Result<(), ReckoningError> {
        self.ensure_idle()?;
        self.config.max_generated = limit;
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), ReckoningError> {
        if self.session.is_some() {
            return Err(ReckoningError::Busy);
        }
        Ok(())
    }

    // ==================== listeners ====================

    /// Register a listener; returns the handle used to remove it.
    pub fn add_listener(&mut self, handler: Box<dyn DeadReckoningHandler>) -> ListenerId {
        self.listeners.add(handler)
    }

    /// Remove a listener by handle. Returns false for an unknown handle.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // ==================== state machine ====================

    /// Whether the engine is currently running a session.
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// The most recent hard fix, if any has arrived.
    pub fn last_fix(&self) -> Option<&Location> {
        self.last_fix.as_ref()
    }

    /// The active route, while running.
    pub fn route(&self) -> Option<&Arc<Vec<Location>>> {
        self.session.as_ref().map(|session| &session.route)
    }

    /// Locations generated since the last hard fix (empty while idle).
    pub fn generated(&self) -> &[Location] {
        self.session
            .as_ref()
            .map(|session| session.generated.as_slice())
            .unwrap_or(&[])
    }

    /// Count of locations generated since the last hard fix.
    pub fn generated_count(&self) -> u32 {
        self.session
            .as_ref()
            .map(|session| session.generated_count)
            .unwrap_or(0)
    }

    /// Reseed epoch of the running session: bumped every time a hard fix
    /// clears the history, letting readers distinguish a fresh sequence
    /// from a continuation. Zero while idle.
    pub fn epoch(&self) -> u64 {
        self.session.as_ref().map(|session| session.epoch).unwrap_or(0)
    }

    /// Start dead reckoning along `route`.
    ///
    /// The route is read-only shared input; it must be non-empty. If no
    /// hard fix has ever been received the start is still accepted and
    /// ticks return [`TickOutcome::Waiting`] until one arrives.
    ///
    /// Starting while already running with a route equal to the active one
    /// is a no-op: the session, its history and its tick cadence are left
    /// untouched. A different route reseeds the session in place (the
    /// engine stays running, history resets).
    ///
    /// # Errors
    ///
    /// Returns [`ReckoningError::EmptyRoute`] for an empty route; the
    /// engine state is unchanged.
    pub fn start(&mut self, route: Arc<Vec<Location>>) -> Result<(), ReckoningError> {
        if route.is_empty() {
            return Err(ReckoningError::EmptyRoute);
        }

        if let Some(session) = &self.session {
            if *session.route == *route {
                debug!("start called with the active route; session unchanged");
                return Ok(());
            }
        }

        info!(
            nodes = route.len(),
            restarted = self.session.is_some(),
            "dead reckoning started"
        );
        self.session = Some(Session::new(route));
        Ok(())
    }

    /// Stop dead reckoning.
    ///
    /// Notifies `on_stopped` listeners (who see the final generated
    /// history before it is released) and discards the session. Returns
    /// whether the engine was running; stopping an idle engine is a no-op.
    pub fn stop(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.finish(StopReason::Requested);
        true
    }

    /// Accept an authoritative fix from the real location provider.
    ///
    /// The fix becomes the extrapolation baseline. While running, the
    /// generated history is cleared and the generation counter resets;
    /// ticking continues uninterrupted (no state transition).
    pub fn on_hard_fix(&mut self, fix: Location) {
        trace!(
            lat = fix.coordinate.latitude,
            lon = fix.coordinate.longitude,
            speed = ?fix.speed,
            course = ?fix.course,
            "hard fix received"
        );
        self.last_fix = Some(fix);
        if let Some(session) = self.session.as_mut() {
            // A session with no generated history has nothing to clear
            if session.generated_count > 0 {
                session.reseed();
            }
        }
    }

    /// Advance the state machine by one interval.
    ///
    /// Called by the periodic driver. Extrapolates from the most recent
    /// location (generated or hard fix) along the carried course at the
    /// decayed speed, snaps the result onto the route, records it and
    /// notifies listeners. A projection with no on-route intersection means
    /// the session has run past the route's end: the engine stops itself
    /// instead of producing an off-route point.
    pub fn tick(&mut self) -> TickOutcome {
        let route = match &self.session {
            Some(session) => Arc::clone(&session.route),
            None => return TickOutcome::Idle,
        };

        let base = match self.extrapolation_base() {
            Some(base) => base,
            None => {
                trace!("tick before the first hard fix; nothing to extrapolate");
                return TickOutcome::Waiting;
            }
        };

        let interval = self.config.interval;
        let interval_secs = interval.as_secs_f64();

        // Unknown speed or course means there is no defensible direction of
        // travel: hold position (speed zero) rather than guess.
        let (speed, direction) = match (base.speed, base.course) {
            (Some(s), Some(c)) if s > 0.0 => {
                ((s - self.config.deceleration * interval_secs).max(0.0), c)
            }
            (_, c) => (0.0, c.unwrap_or(0.0)),
        };

        let raw = geo::advance(&base, speed, interval, direction);

        let projection = match route::project_on_route(raw.coordinate, &route) {
            Ok(projection) => projection,
            // Unreachable: start() rejects empty routes
            Err(_) => return self.finish(StopReason::RouteExhausted),
        };

        let Some(intersection) = projection.intersection else {
            info!("extrapolation ran past the end of the route");
            return self.finish(StopReason::RouteExhausted);
        };

        // Re-aim the carried course at the node that follows the snapped
        // point, so consecutive ticks follow the route's curvature instead
        // of drifting off on a stale heading.
        let course = route
            .get(projection.index_after)
            .map(|next| next.coordinate)
            .filter(|next| *next != intersection)
            .map(|next| geo::bearing(intersection, next))
            .unwrap_or(direction);

        let generated = Location {
            coordinate: intersection,
            course: Some(course),
            ..raw
        };

        let count = match self.session.as_mut() {
            Some(session) => {
                session.push(generated.clone());
                session.generated_count
            }
            None => return TickOutcome::Idle,
        };

        debug!(
            lat = generated.coordinate.latitude,
            lon = generated.coordinate.longitude,
            speed,
            count,
            "generated dead-reckoned location"
        );
        self.listeners.notify_generated(&generated);

        if let Some(limit) = self.config.max_generated {
            if count >= limit {
                info!(limit, "generation limit reached");
                return self.finish(StopReason::LimitReached);
            }
        }

        TickOutcome::Generated(generated)
    }

    /// The location the next tick extrapolates from: the newest generated
    /// location, falling back to the last hard fix.
    fn extrapolation_base(&self) -> Option<Location> {
        let session = self.session.as_ref()?;
        session
            .generated
            .last()
            .cloned()
            .or_else(|| self.last_fix.clone())
    }

    /// Running -> Idle: notify listeners (while the history is still
    /// readable), then release the session.
    fn finish(&mut self, reason: StopReason) -> TickOutcome {
        if let Some(session) = self.session.take() {
            self.listeners.notify_stopped(reason, &session.generated);
            info!(
                reason = ?reason,
                generated = session.generated_count,
                "dead reckoning stopped"
            );
        }
        TickOutcome::Stopped(reason)
    }
}
