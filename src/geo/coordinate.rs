//! Coordinate value types and validity checks.

/// A geographic coordinate in degrees.
///
/// Latitude is degrees north (-90 to 90), longitude degrees east
/// (-180 to 180). The exact point (0, 0) is conventionally used by GPS
/// hardware as a "no fix" sentinel and is therefore rejected by
/// [`Coordinate::is_valid_non_zero`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are within their valid ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Check that the coordinate is valid and is not the (0, 0) "no fix"
    /// sentinel.
    ///
    /// A well-behaved caller screens fixes through this check before feeding
    /// them into distance/bearing computations.
    pub fn is_valid_non_zero(&self) -> bool {
        self.is_valid() && !(self.latitude == 0.0 && self.longitude == 0.0)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}°, {:.6}°", self.latitude, self.longitude)
    }
}

/// An axis-aligned (in lat/lon space) coordinate bounding box.
///
/// Invariant: `top_left.latitude >= bottom_right.latitude` and
/// `top_left.longitude <= bottom_right.longitude`. Boxes spanning the
/// antimeridian are not representable; that case is out of scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRect {
    /// The coordinate at the top-left (north-west) corner of the box.
    pub top_left: Coordinate,
    /// The coordinate at the bottom-right (south-east) corner of the box.
    pub bottom_right: Coordinate,
}

impl CoordinateRect {
    /// Check whether a coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.latitude <= self.top_left.latitude
            && coordinate.latitude >= self.bottom_right.latitude
            && coordinate.longitude >= self.top_left.longitude
            && coordinate.longitude <= self.bottom_right.longitude
    }
}
