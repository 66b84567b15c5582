//! Projection of positions onto ordered polylines.
//!
//! A route is an ordered sequence of [`Location`](crate::geo::Location)
//! nodes whose insertion order defines the direction of travel. This module
//! finds, for an arbitrary position, the nearest route vertex, the
//! perpendicular projection onto the nearest segment (when one exists), and
//! the index of the node that follows the projection along the route.
//!
//! Like the [`geo`](crate::geo) module, everything here is pure and
//! stateless; routes are read-only borrowed input.

mod error;
mod projection;

pub use error::RouteError;
pub use projection::{project_on_route, project_on_segment, RouteProjection, SegmentProjection};
