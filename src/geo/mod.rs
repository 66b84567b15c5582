//! Spherical-earth geometry primitives.
//!
//! This module provides the navigation mathematics used throughout the
//! crate: great-circle distance, initial bearing, destination-point
//! projection, bounding boxes, coordinate validity checks, and speed
//! derivation between timestamped locations.
//!
//! All functions are pure and stateless; they are safe to call concurrently
//! from any number of threads without synchronization.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Bearing/course: degrees clockwise from true north (0-360, 0=north, 90=east)
//! - Distance: meters
//! - Speed: meters per second
//!
//! The Earth is modeled as a sphere of mean radius 6 371 000 m; no
//! ellipsoidal corrections are applied. Antimeridian and polar wraparound
//! are out of scope for the bounding-box helpers.

mod coordinate;
mod error;
mod location;
mod measure;

pub use coordinate::{Coordinate, CoordinateRect};
pub use error::GeoError;
pub use location::Location;
pub use measure::{
    advance, bearing, bounding_box_around, bounding_box_of, destination_point, destination_toward,
    distance, normalize_bearing, speed_between, EARTH_RADIUS_M,
};
