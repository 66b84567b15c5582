//! Error types for route projection.

use thiserror::Error;

/// Errors that can occur when projecting onto a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The route has no nodes to project onto.
    #[error("route must contain at least one node")]
    EmptyRoute,
}
