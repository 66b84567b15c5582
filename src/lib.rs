//! Wayline - geodesic geometry and dead reckoning for route-constrained
//! navigation.
//!
//! This library supplies the position-estimation core of a location-aware
//! navigation application: it reasons about positions on the Earth's surface
//! between real GPS fixes.
//!
//! # Modules
//!
//! - [`geo`] - spherical-earth geometry primitives: great-circle distance,
//!   initial bearing, destination-point projection, bounding boxes,
//!   coordinate validity, speed derivation.
//! - [`route`] - projection of an arbitrary position onto an ordered
//!   polyline (nearest vertex, perpendicular intersection, following node).
//! - [`reckoning`] - a timer-driven dead-reckoning engine that synthesizes
//!   intermediate position estimates at a fixed interval when no fresh fix
//!   has arrived, constrained to a known route.
//!
//! # Example
//!
//! ```
//! use wayline::geo::{self, Coordinate};
//!
//! let toulouse = Coordinate::new(43.6, 1.4);
//! let paris = Coordinate::new(49.0, 2.5);
//!
//! let meters = geo::distance(toulouse, paris);
//! assert!(meters > 500_000.0 && meters < 700_000.0);
//! ```
//!
//! Dead reckoning is a science of guessing: the engine implements a
//! best-effort linear/decelerating motion model, not a filter. It does not
//! map-match against a road graph and does not fuse inertial sensors.

pub mod geo;
pub mod reckoning;
pub mod route;

/// Version of the wayline library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
