//! Error types for the geometry module.

use thiserror::Error;

/// Errors that can occur in geodesic computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    /// A bounding box was requested for an empty location sequence.
    #[error("cannot compute a bounding box for an empty location sequence")]
    EmptyLocations,

    /// Speed was requested between locations whose timestamps are not
    /// causally ordered (elapsed time is zero or negative).
    #[error("elapsed time between locations is zero or negative")]
    NonCausalTime,
}
