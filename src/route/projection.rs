//! Point-to-segment and point-to-polyline projection.
//!
//! The perpendicular foot is computed in a local tangent plane anchored at
//! the segment start (equirectangular flattening: longitude scaled by the
//! cosine of the latitude, accurate over segment-scale distances); the
//! distances reported back to callers are great-circle meters from
//! [`geo::distance`](crate::geo::distance), so segment results compare
//! consistently with direct node distances.

use crate::geo::{self, Coordinate, Location};

use super::error::RouteError;

/// Result of projecting a point onto a single segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Minimum distance from the point to the segment, in meters.
    pub distance_m: f64,
    /// The perpendicular foot of the point, when it falls strictly between
    /// the segment endpoints. `None` when the nearest point of the segment
    /// is one of its endpoints.
    pub intersection: Option<Coordinate>,
}

/// Result of projecting a point onto a full route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteProjection {
    /// Globally minimal distance from the point to the route, in meters.
    pub distance_m: f64,
    /// Index of the route vertex closest to the point, over all vertices.
    ///
    /// Computed independently by direct distance to every node; it is not
    /// necessarily an endpoint of the winning segment.
    pub nearest_node_index: usize,
    /// The perpendicular foot on the winning segment, when one exists.
    pub intersection: Option<Coordinate>,
    /// Index of the route node at or immediately following the winning
    /// point along route order.
    pub index_after: usize,
}

/// Project a point onto the segment between `start` and `end`.
///
/// If the perpendicular foot of `point` falls strictly between the
/// endpoints, the foot is returned as the intersection together with the
/// perpendicular distance; otherwise the intersection is `None` and the
/// distance is the smaller of the two endpoint distances. The reported
/// nearest point is never outside the segment.
///
/// # Example
///
/// ```
/// use wayline::geo::Coordinate;
/// use wayline::route::project_on_segment;
///
/// let projection = project_on_segment(
///     Coordinate::new(0.5, 1.2),
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(0.0, 2.0),
/// );
///
/// let foot = projection.intersection.expect("foot falls inside the segment");
/// assert!(foot.latitude.abs() < 1e-6);
/// assert!((foot.longitude - 1.2).abs() < 1e-6);
/// ```
pub fn project_on_segment(
    point: Coordinate,
    start: Coordinate,
    end: Coordinate,
) -> SegmentProjection {
    let endpoint_distance = |p: Coordinate| geo::distance(p, start).min(geo::distance(p, end));

    // Local tangent plane anchored at the segment start, in degrees with
    // longitude scaled so both axes are commensurable.
    let lon_scale = (start.latitude.to_radians()).cos();
    let seg_x = (end.longitude - start.longitude) * lon_scale;
    let seg_y = end.latitude - start.latitude;
    let point_x = (point.longitude - start.longitude) * lon_scale;
    let point_y = point.latitude - start.latitude;

    let seg_len_sq = seg_x * seg_x + seg_y * seg_y;
    if seg_len_sq == 0.0 {
        // Degenerate segment: both endpoints collapsed onto one coordinate
        return SegmentProjection {
            distance_m: geo::distance(point, start),
            intersection: None,
        };
    }

    let t = (point_x * seg_x + point_y * seg_y) / seg_len_sq;
    if t > 0.0 && t < 1.0 {
        let foot = Coordinate::new(
            start.latitude + t * seg_y,
            start.longitude + t * seg_x / lon_scale,
        );
        SegmentProjection {
            distance_m: geo::distance(point, foot),
            intersection: Some(foot),
        }
    } else {
        SegmentProjection {
            distance_m: endpoint_distance(point),
            intersection: None,
        }
    }
}

/// Project a point onto an ordered route polyline.
///
/// Scans every consecutive pair of nodes with [`project_on_segment`] and
/// keeps the globally minimal distance; equal distances resolve toward the
/// later segment, so a projection landing exactly on a shared vertex is
/// attributed to the segment that starts there.
///
/// `index_after` is the index of the node at or immediately following the
/// winning point: the segment's end index for an interior foot (or when the
/// winning point collapses to the segment end), the segment's start index
/// when it collapses to the segment start.
///
/// # Errors
///
/// Returns [`RouteError::EmptyRoute`] for a route with no nodes. A
/// single-node route has no segment to project onto; that degenerate case
/// reports the lone vertex as nearest with no intersection.
pub fn project_on_route(point: Coordinate, route: &[Location]) -> Result<RouteProjection, RouteError> {
    if route.is_empty() {
        return Err(RouteError::EmptyRoute);
    }

    // Nearest vertex, independent of the winning segment
    let mut nearest_node_index = 0;
    let mut nearest_node_distance = f64::INFINITY;
    for (index, node) in route.iter().enumerate() {
        let d = geo::distance(point, node.coordinate);
        if d < nearest_node_distance {
            nearest_node_distance = d;
            nearest_node_index = index;
        }
    }

    if route.len() == 1 {
        return Ok(RouteProjection {
            distance_m: nearest_node_distance,
            nearest_node_index: 0,
            intersection: None,
            index_after: 0,
        });
    }

    let mut best_distance = f64::INFINITY;
    let mut best_intersection = None;
    let mut best_index_after = 0;

    for index in 0..route.len() - 1 {
        let start = route[index].coordinate;
        let end = route[index + 1].coordinate;
        let projection = project_on_segment(point, start, end);

        // <= so ties resolve toward the later segment
        if projection.distance_m <= best_distance {
            best_distance = projection.distance_m;
            best_intersection = projection.intersection;
            best_index_after = if projection.intersection.is_some() {
                index + 1
            } else if geo::distance(point, start) <= geo::distance(point, end) {
                index
            } else {
                index + 1
            };
        }
    }

    Ok(RouteProjection {
        distance_m: best_distance,
        nearest_node_index,
        intersection: best_intersection,
        index_after: best_index_after,
    })
}
