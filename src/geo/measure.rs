//! Great-circle measurement and projection functions.

use std::time::Duration;

use super::coordinate::{Coordinate, CoordinateRect};
use super::error::GeoError;
use super::location::Location;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor.
const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Calculate the great-circle distance between two coordinates.
///
/// Uses the haversine formula on the spherical Earth model. The inverse-sine
/// argument is clamped to [0, 1] so antipodal and near-identical pairs stay
/// numerically stable under floating rounding.
///
/// # Arguments
///
/// * `from` - First position
/// * `to` - Second position
///
/// # Returns
///
/// Distance in meters. Symmetric in its arguments; zero for identical
/// inputs.
///
/// # Example
///
/// ```
/// use wayline::geo::{distance, Coordinate};
///
/// // 1 degree of latitude is ~111.2 km
/// let meters = distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
/// assert!((meters - 111_195.0).abs() < 100.0);
/// ```
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude * DEG_TO_RAD;
    let lat2_rad = to.latitude * DEG_TO_RAD;
    let delta_lat = (to.latitude - from.latitude) * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_M * c
}

/// Calculate the initial bearing from one coordinate to another.
///
/// Returns the forward azimuth along the great-circle path, in degrees
/// clockwise from true north.
///
/// The bearing is undefined for identical endpoints; that degenerate case
/// returns 0.0 rather than failing, since collapsed route nodes are a
/// common, harmless input.
///
/// # Example
///
/// ```
/// use wayline::geo::{bearing, Coordinate};
///
/// let due_east = bearing(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
/// assert!((due_east - 90.0).abs() < 0.1);
/// ```
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1_rad = from.latitude * DEG_TO_RAD;
    let lat2_rad = to.latitude * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    normalize_bearing(y.atan2(x) * RAD_TO_DEG)
}

/// Project a coordinate along a bearing for a given distance.
///
/// Forward geodesic projection using the direct spherical formula, the
/// inverse of `distance` and `bearing` composed: for `d > 0`,
/// `distance(origin, destination_point(origin, b, d))` is within floating
/// tolerance of `d` and the initial bearing back-calculates to `b`.
///
/// # Arguments
///
/// * `origin` - Starting position
/// * `bearing_deg` - Bearing in degrees (0-360, 0=north, 90=east)
/// * `distance_m` - Distance to travel in meters
///
/// # Returns
///
/// The destination coordinate, with longitude normalized to -180..180.
pub fn destination_point(origin: Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
    let lat1_rad = origin.latitude * DEG_TO_RAD;
    let lon1_rad = origin.longitude * DEG_TO_RAD;
    let bearing_rad = bearing_deg * DEG_TO_RAD;
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1_rad.sin();
    let cos_lat1 = lat1_rad.cos();
    let sin_d = angular_distance.sin();
    let cos_d = angular_distance.cos();

    let lat2_rad = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing_rad.cos()).asin();
    let lon2_rad =
        lon1_rad + (bearing_rad.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2_rad.sin());

    let lat2 = lat2_rad * RAD_TO_DEG;
    let mut lon2 = lon2_rad * RAD_TO_DEG;

    // Normalize longitude to -180..180
    if lon2 > 180.0 {
        lon2 -= 360.0;
    } else if lon2 < -180.0 {
        lon2 += 360.0;
    }

    Coordinate::new(lat2, lon2)
}

/// Find the point a given distance from `origin` on the straight line
/// toward `toward`.
///
/// Convenience composition of [`bearing`] and [`destination_point`]. With a
/// distance beyond `distance(origin, toward)` the result overshoots the
/// target along the same great circle.
pub fn destination_toward(origin: Coordinate, toward: Coordinate, distance_m: f64) -> Coordinate {
    destination_point(origin, bearing(origin, toward), distance_m)
}

/// Calculate the smallest axis-aligned box containing the circle of
/// `radius_m` meters around `center`.
///
/// Computed by projecting the center along bearings 0/90/180/270 and taking
/// the extremes. Circles crossing a pole or the antimeridian are not
/// handled; that is a documented limitation of [`CoordinateRect`].
pub fn bounding_box_around(center: Coordinate, radius_m: f64) -> CoordinateRect {
    let north = destination_point(center, 0.0, radius_m);
    let east = destination_point(center, 90.0, radius_m);
    let south = destination_point(center, 180.0, radius_m);
    let west = destination_point(center, 270.0, radius_m);

    CoordinateRect {
        top_left: Coordinate::new(north.latitude, west.longitude),
        bottom_right: Coordinate::new(south.latitude, east.longitude),
    }
}

/// Calculate the bounding box containing every location in `locations`.
///
/// # Errors
///
/// Returns [`GeoError::EmptyLocations`] when the sequence is empty.
pub fn bounding_box_of(locations: &[Location]) -> Result<CoordinateRect, GeoError> {
    let first = locations.first().ok_or(GeoError::EmptyLocations)?;

    let mut north = first.coordinate.latitude;
    let mut south = first.coordinate.latitude;
    let mut west = first.coordinate.longitude;
    let mut east = first.coordinate.longitude;

    for location in &locations[1..] {
        north = north.max(location.coordinate.latitude);
        south = south.min(location.coordinate.latitude);
        west = west.min(location.coordinate.longitude);
        east = east.max(location.coordinate.longitude);
    }

    Ok(CoordinateRect {
        top_left: Coordinate::new(north, west),
        bottom_right: Coordinate::new(south, east),
    })
}

/// Calculate the average ground speed between two timestamped locations.
///
/// # Errors
///
/// Returns [`GeoError::NonCausalTime`] when `to` does not strictly follow
/// `from` in time. Callers never silently receive `Infinity` or `NaN` from
/// a zero or negative time delta.
pub fn speed_between(from: &Location, to: &Location) -> Result<f64, GeoError> {
    let elapsed = to
        .timestamp
        .duration_since(from.timestamp)
        .map_err(|_| GeoError::NonCausalTime)?;

    let elapsed_secs = elapsed.as_secs_f64();
    if elapsed_secs <= 0.0 {
        return Err(GeoError::NonCausalTime);
    }

    Ok(distance(from.coordinate, to.coordinate) / elapsed_secs)
}

/// Extrapolate a location forward in time along a direction of travel.
///
/// Returns the location reached after travelling from `origin` at
/// `speed_mps` for `duration` in `direction_deg`. The result's timestamp is
/// advanced by `duration` and its speed and course carry the given motion
/// forward, so chained extrapolation stays consistent. Altitude is carried
/// from the origin; horizontal accuracy is left unknown (the result is
/// synthetic, not a measurement).
pub fn advance(origin: &Location, speed_mps: f64, duration: Duration, direction_deg: f64) -> Location {
    let distance_m = speed_mps * duration.as_secs_f64();

    Location {
        coordinate: destination_point(origin.coordinate, direction_deg, distance_m),
        timestamp: origin.timestamp + duration,
        speed: Some(speed_mps),
        course: Some(direction_deg),
        altitude: origin.altitude,
        horizontal_accuracy: None,
    }
}

/// Normalize a bearing to the range [0, 360) degrees.
///
/// Handles negative bearings and values >= 360 by wrapping appropriately.
pub fn normalize_bearing(bearing_deg: f64) -> f64 {
    let mut b = bearing_deg % 360.0;
    if b < 0.0 {
        b += 360.0;
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn location(latitude: f64, longitude: f64, unix_secs: u64) -> Location {
        Location::new(
            Coordinate::new(latitude, longitude),
            SystemTime::UNIX_EPOCH + Duration::from_secs(unix_secs),
        )
    }

    // ==================== distance tests ====================

    #[test]
    fn test_distance_one_degree_latitude() {
        // 1 degree of latitude is R * pi / 180 ~ 111,195m
        let meters = distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!(
            (meters - 111_195.0).abs() < 10.0,
            "1 degree of latitude should be ~111,195m, got {}",
            meters
        );
    }

    #[test]
    fn test_distance_zero_for_identical_points() {
        let here = Coordinate::new(45.0, -122.0);
        assert!(distance(here, here).abs() < 1e-6);
    }

    #[test]
    fn test_distance_symmetry() {
        let a = Coordinate::new(45.0, -122.0);
        let b = Coordinate::new(46.0, -121.0);

        assert!(
            (distance(a, b) - distance(b, a)).abs() < 1e-6,
            "Distance should be symmetric"
        );
    }

    #[test]
    fn test_distance_toulouse_to_paris() {
        // LFBO (Toulouse) to LFPG (Paris) is roughly 600km
        let toulouse = Coordinate::new(43.6, 1.4);
        let paris = Coordinate::new(49.0, 2.5);
        let meters = distance(toulouse, paris);

        assert!(
            (meters - 606_000.0).abs() < 15_000.0,
            "Expected ~606km, got {}m",
            meters
        );
    }

    #[test]
    fn test_distance_antipodal_is_stable() {
        // Antipodal points sit exactly half the circumference apart; the
        // clamped inverse sine must not produce NaN here.
        let meters = distance(Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;

        assert!(meters.is_finite());
        assert!(
            (meters - half_circumference).abs() < 1.0,
            "Expected {}m, got {}m",
            half_circumference,
            meters
        );
    }

    #[test]
    fn test_distance_near_identical_is_stable() {
        let a = Coordinate::new(45.0, -122.0);
        let b = Coordinate::new(45.0 + 1e-12, -122.0);

        let meters = distance(a, b);
        assert!(meters.is_finite());
        assert!(meters < 0.001, "Sub-millimeter separation, got {}m", meters);
    }

    // ==================== bearing tests ====================

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::new(0.0, 0.0);

        let north = bearing(origin, Coordinate::new(1.0, 0.0));
        assert!(north.abs() < 0.1 || (north - 360.0).abs() < 0.1, "got {}", north);

        let east = bearing(origin, Coordinate::new(0.0, 1.0));
        assert!((east - 90.0).abs() < 0.1, "got {}", east);

        let south = bearing(Coordinate::new(1.0, 0.0), origin);
        assert!((south - 180.0).abs() < 0.1, "got {}", south);

        let west = bearing(origin, Coordinate::new(0.0, -1.0));
        assert!((west - 270.0).abs() < 0.1, "got {}", west);
    }

    #[test]
    fn test_bearing_identical_points_returns_zero() {
        let here = Coordinate::new(45.0, -122.0);
        assert_eq!(bearing(here, here), 0.0);
    }

    #[test]
    fn test_bearing_always_in_range() {
        let origin = Coordinate::new(48.2, 16.4);
        for (lat, lon) in [
            (48.3, 16.4),
            (48.3, 16.5),
            (48.2, 16.5),
            (48.1, 16.5),
            (48.1, 16.4),
            (48.1, 16.3),
            (48.2, 16.3),
            (48.3, 16.3),
        ] {
            let b = bearing(origin, Coordinate::new(lat, lon));
            assert!(
                (0.0..360.0).contains(&b),
                "bearing to ({}, {}) = {} is not in [0, 360)",
                lat,
                lon,
                b
            );
        }
    }

    // ==================== destination_point tests ====================

    #[test]
    fn test_destination_north() {
        let end = destination_point(Coordinate::new(0.0, 0.0), 0.0, 111_195.0);

        assert!((end.latitude - 1.0).abs() < 0.001, "Expected ~1N, got {}", end.latitude);
        assert!(end.longitude.abs() < 0.001, "Longitude should be unchanged");
    }

    #[test]
    fn test_destination_zero_distance() {
        let start = Coordinate::new(45.5, -122.7);
        let end = destination_point(start, 123.0, 0.0);

        assert!((end.latitude - start.latitude).abs() < 1e-9);
        assert!((end.longitude - start.longitude).abs() < 1e-9);
    }

    #[test]
    fn test_destination_longitude_wrap() {
        // Projecting east across the antimeridian should wrap to negative
        let end = destination_point(Coordinate::new(0.0, 179.5), 90.0, 120_000.0);

        assert!(end.latitude.abs() < 0.1);
        assert!(end.longitude < 0.0, "Should wrap to negative longitude: {}", end.longitude);
    }

    #[test]
    fn test_destination_distance_roundtrip() {
        // Project a known distance, then measure - should match
        let start = Coordinate::new(45.0, -122.0);

        for bearing_deg in [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
            for distance_m in [10.0, 1_000.0, 50_000.0] {
                let end = destination_point(start, bearing_deg, distance_m);
                let measured = distance(start, end);

                assert!(
                    (measured - distance_m).abs() < 0.01,
                    "Projected {}m at {} deg but measured {}m",
                    distance_m,
                    bearing_deg,
                    measured
                );
            }
        }
    }

    #[test]
    fn test_destination_bearing_roundtrip() {
        // Project along a bearing, then back-calculate - should match
        let start = Coordinate::new(45.0, -122.0);

        for bearing_deg in [10.0, 60.0, 200.0, 330.0] {
            let end = destination_point(start, bearing_deg, 25_000.0);
            let measured = bearing(start, end);

            let diff = (measured - bearing_deg).abs();
            assert!(
                diff < 0.5 || (360.0 - diff) < 0.5,
                "Expected bearing ~{}, got {}",
                bearing_deg,
                measured
            );
        }
    }

    #[test]
    fn test_destination_toward_lands_between() {
        let start = Coordinate::new(0.0, 0.0);
        let target = Coordinate::new(0.0, 1.0);

        let mid = destination_toward(start, target, 55_597.5);

        assert!(mid.latitude.abs() < 0.001);
        assert!(
            (mid.longitude - 0.5).abs() < 0.001,
            "Expected halfway point ~0.5E, got {}",
            mid.longitude
        );
    }

    // ==================== bounding box tests ====================

    #[test]
    fn test_bounding_box_around_contains_circle() {
        let center = Coordinate::new(45.0, -122.0);
        let radius = 5_000.0;
        let rect = bounding_box_around(center, radius);

        assert!(rect.contains(center));

        // Points on the circle along each cardinal bearing must be inside
        for bearing_deg in [0.0, 90.0, 180.0, 270.0] {
            let edge = destination_point(center, bearing_deg, radius);
            assert!(
                rect.contains(edge),
                "Circle edge at bearing {} should be inside the box",
                bearing_deg
            );
        }
    }

    #[test]
    fn test_bounding_box_around_widens_with_latitude() {
        // The same radius spans more degrees of longitude near the pole
        let equator = bounding_box_around(Coordinate::new(0.0, 0.0), 10_000.0);
        let arctic = bounding_box_around(Coordinate::new(70.0, 0.0), 10_000.0);

        let equator_span = equator.bottom_right.longitude - equator.top_left.longitude;
        let arctic_span = arctic.bottom_right.longitude - arctic.top_left.longitude;

        assert!(
            arctic_span > equator_span * 2.0,
            "Longitude span should widen toward the pole: {} vs {}",
            arctic_span,
            equator_span
        );
    }

    #[test]
    fn test_bounding_box_of_contains_every_location() {
        let locations = vec![
            location(45.0, -122.0, 0),
            location(45.5, -122.5, 1),
            location(44.8, -121.7, 2),
            location(45.2, -122.2, 3),
        ];

        let rect = bounding_box_of(&locations).expect("non-empty input");

        for l in &locations {
            assert!(rect.contains(l.coordinate), "box should contain {}", l.coordinate);
        }

        assert_eq!(rect.top_left.latitude, 45.5);
        assert_eq!(rect.top_left.longitude, -122.5);
        assert_eq!(rect.bottom_right.latitude, 44.8);
        assert_eq!(rect.bottom_right.longitude, -121.7);
    }

    #[test]
    fn test_bounding_box_of_empty_fails() {
        assert_eq!(bounding_box_of(&[]), Err(GeoError::EmptyLocations));
    }

    #[test]
    fn test_bounding_box_of_single_location_is_degenerate() {
        let rect = bounding_box_of(&[location(45.0, -122.0, 0)]).expect("non-empty input");

        assert_eq!(rect.top_left, rect.bottom_right);
        assert!(rect.contains(Coordinate::new(45.0, -122.0)));
    }

    // ==================== speed tests ====================

    #[test]
    fn test_speed_between_known_pair() {
        // 1 degree of latitude (~111,195m) covered in one hour
        let from = location(0.0, 0.0, 1_000);
        let to = location(1.0, 0.0, 4_600);

        let speed = speed_between(&from, &to).expect("causal ordering");
        assert!(
            (speed - 111_195.0 / 3_600.0).abs() < 0.01,
            "Expected ~30.9 m/s, got {}",
            speed
        );
    }

    #[test]
    fn test_speed_between_equal_timestamps_fails() {
        let from = location(0.0, 0.0, 1_000);
        let to = location(1.0, 0.0, 1_000);

        assert_eq!(speed_between(&from, &to), Err(GeoError::NonCausalTime));
    }

    #[test]
    fn test_speed_between_reversed_timestamps_fails() {
        let from = location(0.0, 0.0, 2_000);
        let to = location(1.0, 0.0, 1_000);

        assert_eq!(speed_between(&from, &to), Err(GeoError::NonCausalTime));
    }

    // ==================== advance tests ====================

    #[test]
    fn test_advance_moves_and_restamps() {
        let origin = location(0.0, 0.0, 1_000).with_altitude(12.0);
        let moved = advance(&origin, 10.0, Duration::from_secs(60), 90.0);

        // 600m due east
        assert!((distance(origin.coordinate, moved.coordinate) - 600.0).abs() < 0.01);
        assert!(moved.coordinate.longitude > 0.0);
        assert_eq!(
            moved.timestamp,
            SystemTime::UNIX_EPOCH + Duration::from_secs(1_060)
        );

        // Motion is carried forward for chained extrapolation
        assert_eq!(moved.speed, Some(10.0));
        assert_eq!(moved.course, Some(90.0));
        assert_eq!(moved.altitude, Some(12.0));
        assert!(moved.horizontal_accuracy.is_none(), "synthetic point has no accuracy");
    }

    #[test]
    fn test_advance_chain_is_consistent_with_single_step() {
        let origin = location(45.0, -122.0, 0);

        let one_step = advance(&origin, 8.0, Duration::from_secs(10), 45.0);
        let mut chained = origin.clone();
        for _ in 0..10 {
            chained = advance(&chained, 8.0, Duration::from_secs(1), 45.0);
        }

        assert!(
            distance(one_step.coordinate, chained.coordinate) < 0.01,
            "Chained ticks should land where one big step lands"
        );
        assert_eq!(one_step.timestamp, chained.timestamp);
    }

    #[test]
    fn test_advance_with_zero_speed_holds_position() {
        let origin = location(45.0, -122.0, 500);
        let held = advance(&origin, 0.0, Duration::from_secs(1), 90.0);

        assert!(distance(origin.coordinate, held.coordinate) < 1e-6);
        assert_eq!(held.timestamp, SystemTime::UNIX_EPOCH + Duration::from_secs(501));
        assert_eq!(held.speed, Some(0.0));
    }

    // ==================== normalize_bearing tests ====================

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(450.0), 90.0);
        assert!((normalize_bearing(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_bearing(-720.0)).abs() < 1e-9);
    }
}
