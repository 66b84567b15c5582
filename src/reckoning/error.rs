//! Error types for the dead-reckoning engine.

use thiserror::Error;

/// Errors that can occur when controlling the dead-reckoning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReckoningError {
    /// `start` was called with a route that has no nodes.
    #[error("route must contain at least one location")]
    EmptyRoute,

    /// A configuration change was attempted while the engine is running.
    /// Configuration is mutable only while idle, to avoid racing an
    /// in-flight tick.
    #[error("configuration is mutable only while the engine is idle")]
    Busy,

    /// The tick interval must be greater than zero.
    #[error("tick interval must be greater than zero")]
    InvalidInterval,

    /// Deceleration must be a finite, non-negative value.
    #[error("deceleration must be a finite, non-negative value")]
    InvalidDeceleration,
}
