//! Timestamped location value type.

use std::time::SystemTime;

use super::coordinate::Coordinate;

/// A position fix: a coordinate plus the time it was observed, with
/// optional motion and quality attributes.
///
/// `Location` is an immutable value type; derived positions (extrapolated,
/// snapped, ...) are always newly constructed rather than mutated in place.
/// Unknown speed or course is represented as `None` rather than the negative
/// sentinels some GPS stacks report.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Geographic position.
    pub coordinate: Coordinate,
    /// Time the position was observed (or synthesized).
    pub timestamp: SystemTime,
    /// Ground speed in meters per second, if known.
    pub speed: Option<f64>,
    /// Course over ground in degrees true (0-360), if known.
    pub course: Option<f64>,
    /// Altitude in meters, if known.
    pub altitude: Option<f64>,
    /// Horizontal accuracy radius in meters, if known.
    pub horizontal_accuracy: Option<f64>,
}

impl Location {
    /// Create a location with a position and timestamp only.
    pub fn new(coordinate: Coordinate, timestamp: SystemTime) -> Self {
        Self {
            coordinate,
            timestamp,
            speed: None,
            course: None,
            altitude: None,
            horizontal_accuracy: None,
        }
    }

    /// Attach a ground speed in meters per second.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Attach a course over ground in degrees.
    pub fn with_course(mut self, course: f64) -> Self {
        self.course = Some(course);
        self
    }

    /// Attach an altitude in meters.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Attach a horizontal accuracy radius in meters.
    pub fn with_horizontal_accuracy(mut self, accuracy: f64) -> Self {
        self.horizontal_accuracy = Some(accuracy);
        self
    }
}
